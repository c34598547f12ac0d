//! Required-column validation for raw sales tables.

use crate::error::{PipelineError, PipelineResult};

/// Returns the required names absent from `headers`, in declared order.
pub fn missing_columns<S: AsRef<str>>(headers: &[String], required: &[S]) -> Vec<String> {
    required
        .iter()
        .map(|name| name.as_ref())
        .filter(|name| !headers.iter().any(|header| header.as_str() == *name))
        .map(str::to_string)
        .collect()
}

pub fn validate_required_columns<S: AsRef<str>>(
    headers: &[String],
    required: &[S],
) -> PipelineResult<()> {
    let missing = missing_columns(headers, required);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(PipelineError::MissingColumns {
            missing,
            available: headers.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn reports_only_the_absent_column() {
        let present = headers(&["Jenis Produk", "Tanggal", "Jumlah Order", "Total"]);
        let missing = missing_columns(
            &present,
            &["Jenis Produk", "Tanggal", "Harga", "Jumlah Order", "Total"],
        );
        assert_eq!(missing, vec!["Harga".to_string()]);
    }

    #[test]
    fn preserves_declared_order_for_multiple_missing() {
        let present = headers(&["Total", "x"]);
        let missing = missing_columns(&present, &["b", "Total", "a"]);
        assert_eq!(missing, vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn header_match_is_exact() {
        let present = headers(&["harga", " Harga"]);
        let err = validate_required_columns(&present, &["Harga"]).expect_err("missing");
        match err {
            PipelineError::MissingColumns { missing, available } => {
                assert_eq!(missing, vec!["Harga".to_string()]);
                assert_eq!(available, present);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
