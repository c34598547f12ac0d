//! Raw table loading with the one-shot semicolon fallback.
//!
//! Sales exports from spreadsheet tools in comma-decimal locales are often
//! written with `;` between fields while still carrying a `.csv` extension.
//! When the header row yields a single column under the default delimiter,
//! the same bytes are parsed once more with `;`. Whatever that second parse
//! yields is final.

use std::{fs, io, path::Path};

use encoding_rs::{Encoding, UTF_8};
use log::{debug, info};

use crate::{
    error::{PipelineError, PipelineResult},
    io_utils::{self, DEFAULT_DELIMITER, FALLBACK_DELIMITER},
};

#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Forces a delimiter and disables the fallback retry.
    pub delimiter: Option<u8>,
    pub encoding: &'static Encoding,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            encoding: UTF_8,
        }
    }
}

/// Header names plus text cells, exactly as decoded from the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    delimiter: u8,
    retried: bool,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            headers,
            rows,
            delimiter: DEFAULT_DELIMITER,
            retried: false,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Delimiter the table was finally parsed with.
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// True when the default parse was abandoned for the fallback delimiter.
    pub fn retried_with_fallback(&self) -> bool {
        self.retried
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }
}

pub fn read_source(path: &Path) -> PipelineResult<Vec<u8>> {
    fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => PipelineError::NotFound {
            path: path.to_path_buf(),
        },
        _ => PipelineError::Read {
            path: path.to_path_buf(),
            source,
        },
    })
}

pub fn load_raw_table(path: &Path, options: &LoadOptions) -> PipelineResult<RawTable> {
    let bytes = read_source(path)?;
    parse_raw_table(&bytes, options)
}

pub fn parse_raw_table(bytes: &[u8], options: &LoadOptions) -> PipelineResult<RawTable> {
    let (delimiter, retried) = match options.delimiter {
        Some(delimiter) => (delimiter, false),
        None => {
            let mut header_reader = io_utils::open_csv_reader(bytes, DEFAULT_DELIMITER);
            let width = header_reader.byte_headers()?.len();
            if width == 1 {
                info!(
                    "Header parsed as a single column with '{}'; retrying with '{}'",
                    io_utils::printable_delimiter(DEFAULT_DELIMITER),
                    io_utils::printable_delimiter(FALLBACK_DELIMITER)
                );
                (FALLBACK_DELIMITER, true)
            } else {
                (DEFAULT_DELIMITER, false)
            }
        }
    };

    let mut reader = io_utils::open_csv_reader(bytes, delimiter);
    let header_record = reader.byte_headers()?.clone();
    if header_record.is_empty() {
        return Err(PipelineError::EmptyInput);
    }
    let headers = io_utils::decode_record(&header_record, options.encoding, 1)?;

    // Short rows are kept; missing trailing cells read as empty.
    let mut rows = Vec::new();
    for (idx, record) in reader.byte_records().enumerate() {
        let record = record?;
        if record.len() > header_record.len() {
            return Err(PipelineError::TooManyFields {
                row: idx + 2,
                expected: header_record.len(),
                found: record.len(),
            });
        }
        rows.push(io_utils::decode_record(&record, options.encoding, idx + 2)?);
    }
    debug!(
        "Parsed {} row(s) across {} column(s) using '{}'",
        rows.len(),
        headers.len(),
        io_utils::printable_delimiter(delimiter)
    );

    Ok(RawTable {
        headers,
        rows,
        delimiter,
        retried,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_file_parses_without_retry() {
        let table = parse_raw_table(b"a,b\n1,2\n", &LoadOptions::default()).expect("parse");
        assert_eq!(table.headers(), ["a", "b"]);
        assert_eq!(table.delimiter(), b',');
        assert!(!table.retried_with_fallback());
    }

    #[test]
    fn semicolon_rows_with_decimal_commas_still_retry() {
        let bytes = b"Produk;Harga\nStiker;1.234,56\n";
        let table = parse_raw_table(bytes, &LoadOptions::default()).expect("parse");
        assert!(table.retried_with_fallback());
        assert_eq!(table.rows()[0], vec!["Stiker", "1.234,56"]);
    }

    #[test]
    fn explicit_delimiter_skips_retry() {
        let options = LoadOptions {
            delimiter: Some(b'|'),
            ..LoadOptions::default()
        };
        let table = parse_raw_table(b"only\nx\n", &options).expect("parse");
        assert_eq!(table.delimiter(), b'|');
        assert!(!table.retried_with_fallback());
    }

    #[test]
    fn empty_input_is_a_load_error() {
        let err = parse_raw_table(b"", &LoadOptions::default()).expect_err("empty");
        assert!(matches!(err, PipelineError::EmptyInput));
    }

    #[test]
    fn rows_wider_than_header_are_rejected() {
        let err = parse_raw_table(b"a,b\n1,2\n1,2,3\n", &LoadOptions::default()).expect_err("wide");
        assert!(matches!(
            err,
            PipelineError::TooManyFields {
                row: 3,
                expected: 2,
                found: 3
            }
        ));
    }

    #[test]
    fn short_rows_are_kept() {
        let table = parse_raw_table(b"a,b,c\n1,2,3\n4,5\n", &LoadOptions::default()).expect("parse");
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1], vec!["4", "5"]);
    }
}
