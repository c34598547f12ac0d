//! Field normalization: raw text rows to typed [`NormalizedRecord`]s.
//!
//! Product labels and numeric cells pass through [`RuleChain`]s. Numeric cells
//! that still fail to parse become zero and are counted in the
//! [`NormalizationReport`]; a date that fails to parse aborts the dataset.

use std::fmt;

use log::debug;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    config::{ColumnNames, DashboardConfig},
    data::{parse_day_first_datetime, parse_decimal_text},
    error::{PipelineError, PipelineResult},
    loader::RawTable,
    records::NormalizedRecord,
    schema,
    transform::rules::{self, RuleChain},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ZeroedCells {
    pub price: usize,
    pub quantity: usize,
    pub total: usize,
}

impl ZeroedCells {
    pub fn total_cells(&self) -> usize {
        self.price + self.quantity + self.total
    }
}

/// Recovered conditions observed while normalizing one table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NormalizationReport {
    pub rows: usize,
    pub filled_products: usize,
    pub relabeled_products: usize,
    pub zeroed: ZeroedCells,
}

impl NormalizationReport {
    pub fn has_recoveries(&self) -> bool {
        self.filled_products > 0 || self.zeroed.total_cells() > 0
    }
}

impl fmt::Display for NormalizationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} row(s); {} product label(s) filled, {} relabeled; zero-substituted cells: price {}, quantity {}, total {}",
            self.rows,
            self.filled_products,
            self.relabeled_products,
            self.zeroed.price,
            self.zeroed.quantity,
            self.zeroed.total
        )
    }
}

#[derive(Debug, Clone, Copy)]
struct ColumnIndices {
    product: usize,
    date: usize,
    price: usize,
    quantity: usize,
    total: usize,
}

impl ColumnIndices {
    fn resolve(raw: &RawTable, names: &ColumnNames) -> PipelineResult<Self> {
        schema::validate_required_columns(raw.headers(), names.required().as_slice())?;
        let index = |name: &str| {
            raw.column_index(name)
                .ok_or_else(|| PipelineError::MissingColumns {
                    missing: vec![name.to_string()],
                    available: raw.headers().to_vec(),
                })
        };
        Ok(Self {
            product: index(names.product.as_str())?,
            date: index(names.date.as_str())?,
            price: index(names.price.as_str())?,
            quantity: index(names.quantity.as_str())?,
            total: index(names.total.as_str())?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Normalizer {
    columns: ColumnNames,
    label_rules: RuleChain,
    numeric_rules: RuleChain,
}

impl Normalizer {
    pub fn new(config: &DashboardConfig) -> PipelineResult<Self> {
        Ok(Self {
            columns: config.columns.clone(),
            label_rules: rules::product_label_rules(config)?,
            numeric_rules: rules::numeric_rules(),
        })
    }

    /// Returns the cleaned value and whether zero was substituted.
    pub fn coerce_or_zero(&self, raw: &str) -> (Decimal, bool) {
        let cleaned = self.numeric_rules.apply(raw);
        match parse_decimal_text(&cleaned) {
            Some(value) => (value, false),
            None => (Decimal::ZERO, true),
        }
    }

    pub fn normalize_label(&self, raw: &str) -> String {
        self.label_rules.apply(raw).into_owned()
    }

    pub fn normalize(
        &self,
        raw: &RawTable,
    ) -> PipelineResult<(Vec<NormalizedRecord>, NormalizationReport)> {
        let indices = ColumnIndices::resolve(raw, &self.columns)?;
        let mut report = NormalizationReport {
            rows: raw.len(),
            ..NormalizationReport::default()
        };
        let mut records = Vec::with_capacity(raw.len());

        for (idx, row) in raw.rows().iter().enumerate() {
            let cell = |column: usize| row.get(column).map(String::as_str).unwrap_or("");

            let raw_label = cell(indices.product);
            let product = self.normalize_label(raw_label);
            if rules::is_missing(raw_label) {
                report.filled_products += 1;
            } else if product != raw_label {
                report.relabeled_products += 1;
            }

            let raw_date = cell(indices.date);
            let date = parse_day_first_datetime(raw_date).map_err(|_| PipelineError::InvalidDate {
                row: idx + 2,
                column: self.columns.date.clone(),
                value: raw_date.to_string(),
            })?;

            let (price, zeroed) = self.coerce_or_zero(cell(indices.price));
            report.zeroed.price += usize::from(zeroed);
            let (quantity, zeroed) = self.coerce_or_zero(cell(indices.quantity));
            report.zeroed.quantity += usize::from(zeroed);
            let (total, zeroed) = self.coerce_or_zero(cell(indices.total));
            report.zeroed.total += usize::from(zeroed);

            records.push(NormalizedRecord {
                product,
                date,
                price,
                quantity,
                total,
            });
        }
        debug!("Normalized {}", report);
        Ok((records, report))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn raw(rows: &[[&str; 5]]) -> RawTable {
        RawTable::new(
            ColumnNames::default()
                .required()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rows.iter()
                .map(|row| row.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn coerce_or_zero_flags_substitutions() {
        let normalizer = Normalizer::new(&DashboardConfig::default()).unwrap();
        assert_eq!(
            normalizer.coerce_or_zero("1.234,56"),
            (Decimal::from_str("1234.56").unwrap(), false)
        );
        assert_eq!(normalizer.coerce_or_zero("N/A"), (Decimal::ZERO, true));
        assert_eq!(normalizer.coerce_or_zero("-7"), (Decimal::from(7), false));
    }

    #[test]
    fn report_counts_recoveries() {
        let normalizer = Normalizer::new(&DashboardConfig::default()).unwrap();
        let table = raw(&[
            ["", "01/02/2024", "abc", "2", "10"],
            ["CraftLaminasi", "02/02/2024", "5", "", "10"],
            ["Stiker", "03/02/2024", "5", "1", "5"],
        ]);
        let (records, report) = normalizer.normalize(&table).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].product, "Unknown");
        assert_eq!(records[0].price, Decimal::ZERO);
        assert_eq!(records[1].product, "CraftLaminasi290");
        assert_eq!(report.filled_products, 1);
        assert_eq!(report.relabeled_products, 1);
        assert_eq!(report.zeroed, ZeroedCells { price: 1, quantity: 1, total: 0 });
        assert!(report.has_recoveries());
    }

    #[test]
    fn bad_date_aborts_with_row_and_value() {
        let normalizer = Normalizer::new(&DashboardConfig::default()).unwrap();
        let table = raw(&[
            ["A", "01/02/2024", "1", "1", "1"],
            ["B", "32/13/2024", "1", "1", "1"],
        ]);
        let err = normalizer.normalize(&table).expect_err("invalid date");
        match err {
            PipelineError::InvalidDate { row, column, value } => {
                assert_eq!(row, 3);
                assert_eq!(column, "Tanggal");
                assert_eq!(value, "32/13/2024");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
