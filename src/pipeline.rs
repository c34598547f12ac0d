//! Load → validate → normalize → derive, as one fail-fast pass.

use std::path::Path;

use log::{info, warn};
use serde::Serialize;

use crate::{
    config::DashboardConfig,
    derive,
    error::PipelineResult,
    loader::{self, LoadOptions, RawTable},
    normalize::{NormalizationReport, Normalizer},
    records::CleanedTable,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanedDataset {
    pub table: CleanedTable,
    pub report: NormalizationReport,
}

#[derive(Debug, Clone)]
pub struct CleaningPipeline {
    normalizer: Normalizer,
    options: LoadOptions,
}

impl CleaningPipeline {
    pub fn new(config: &DashboardConfig, options: LoadOptions) -> PipelineResult<Self> {
        Ok(Self {
            normalizer: Normalizer::new(config)?,
            options,
        })
    }

    pub fn clean(&self, raw: &RawTable) -> PipelineResult<CleanedDataset> {
        let (records, report) = self.normalizer.normalize(raw)?;
        let table = derive::derive_revenue(records)?;
        if report.has_recoveries() {
            warn!("Recovered while cleaning: {report}");
        }
        Ok(CleanedDataset { table, report })
    }

    pub fn clean_bytes(&self, bytes: &[u8]) -> PipelineResult<CleanedDataset> {
        let raw = loader::parse_raw_table(bytes, &self.options)?;
        self.clean(&raw)
    }

    pub fn load(&self, path: &Path) -> PipelineResult<CleanedDataset> {
        let bytes = loader::read_source(path)?;
        let dataset = self.clean_bytes(&bytes)?;
        info!(
            "Loaded {} sales record(s) from {:?}",
            dataset.table.len(),
            path
        );
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;

    const HEADER: &str = "Jenis Produk,Tanggal,Harga,Jumlah Order,Total\n";

    fn pipeline() -> CleaningPipeline {
        CleaningPipeline::new(&DashboardConfig::default(), LoadOptions::default()).unwrap()
    }

    #[test]
    fn schema_errors_stop_before_normalization() {
        // The bad date would be a field error if normalization ran.
        let bytes = b"Jenis Produk,Tanggal,Jumlah Order,Total\nA,not-a-date,1,1\n";
        let err = pipeline().clean_bytes(bytes).expect_err("missing column");
        match err {
            PipelineError::MissingColumns { missing, .. } => {
                assert_eq!(missing, vec!["Harga".to_string()])
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn header_only_input_yields_empty_table() {
        let dataset = pipeline().clean_bytes(HEADER.as_bytes()).unwrap();
        assert!(dataset.table.is_empty());
        assert_eq!(dataset.report, NormalizationReport::default());
    }
}
