//! Column naming and cleaning-rule configuration.
//!
//! The defaults match the sales export the dashboard was built around
//! (Indonesian column headers). A YAML file can override any subset:
//!
//! ```yaml
//! columns:
//!   product: Jenis Produk
//!   date: Tanggal
//!   price: Harga
//!   quantity: Jumlah Order
//!   total: Total
//! unknown_product: Unknown
//! label_rules:
//!   - pattern: CraftLaminasi$
//!     replacement: CraftLaminasi290
//! ```

use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};

pub const DEFAULT_PRODUCT_COLUMN: &str = "Jenis Produk";
pub const DEFAULT_DATE_COLUMN: &str = "Tanggal";
pub const DEFAULT_PRICE_COLUMN: &str = "Harga";
pub const DEFAULT_QUANTITY_COLUMN: &str = "Jumlah Order";
pub const DEFAULT_TOTAL_COLUMN: &str = "Total";
pub const DEFAULT_UNKNOWN_PRODUCT: &str = "Unknown";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnNames {
    #[serde(default = "ColumnNames::default_product")]
    pub product: String,
    #[serde(default = "ColumnNames::default_date")]
    pub date: String,
    #[serde(default = "ColumnNames::default_price")]
    pub price: String,
    #[serde(default = "ColumnNames::default_quantity")]
    pub quantity: String,
    #[serde(default = "ColumnNames::default_total")]
    pub total: String,
}

impl ColumnNames {
    fn default_product() -> String {
        DEFAULT_PRODUCT_COLUMN.to_string()
    }

    fn default_date() -> String {
        DEFAULT_DATE_COLUMN.to_string()
    }

    fn default_price() -> String {
        DEFAULT_PRICE_COLUMN.to_string()
    }

    fn default_quantity() -> String {
        DEFAULT_QUANTITY_COLUMN.to_string()
    }

    fn default_total() -> String {
        DEFAULT_TOTAL_COLUMN.to_string()
    }

    /// Required columns in the order they are reported when missing.
    pub fn required(&self) -> [&str; 5] {
        [
            self.product.as_str(),
            self.date.as_str(),
            self.price.as_str(),
            self.quantity.as_str(),
            self.total.as_str(),
        ]
    }
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            product: Self::default_product(),
            date: Self::default_date(),
            price: Self::default_price(),
            quantity: Self::default_quantity(),
            total: Self::default_total(),
        }
    }
}

/// A regex rewrite applied to product labels after missing labels are filled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabelRuleSpec {
    pub pattern: String,
    pub replacement: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardConfig {
    #[serde(default)]
    pub columns: ColumnNames,
    #[serde(default = "DashboardConfig::default_unknown_product")]
    pub unknown_product: String,
    #[serde(default = "DashboardConfig::default_label_rules")]
    pub label_rules: Vec<LabelRuleSpec>,
}

impl DashboardConfig {
    fn default_unknown_product() -> String {
        DEFAULT_UNKNOWN_PRODUCT.to_string()
    }

    fn default_label_rules() -> Vec<LabelRuleSpec> {
        vec![LabelRuleSpec {
            pattern: "CraftLaminasi$".to_string(),
            replacement: "CraftLaminasi290".to_string(),
        }]
    }

    pub fn load(path: &Path) -> PipelineResult<Self> {
        let file = File::open(path).map_err(|err| PipelineError::ConfigFile {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        serde_yaml::from_reader(BufReader::new(file)).map_err(|err| PipelineError::ConfigFile {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    pub fn load_or_default(path: Option<&Path>) -> PipelineResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Serializing configuration to YAML")
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file =
            File::create(path).with_context(|| format!("Creating configuration file {path:?}"))?;
        serde_yaml::to_writer(file, self).context("Writing configuration YAML")
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            columns: ColumnNames::default(),
            unknown_product: Self::default_unknown_product(),
            label_rules: Self::default_label_rules(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_remaining_defaults() {
        let config: DashboardConfig = serde_yaml::from_str("columns:\n  price: Unit Price\n")
            .expect("parse partial config");
        assert_eq!(config.columns.price, "Unit Price");
        assert_eq!(config.columns.product, DEFAULT_PRODUCT_COLUMN);
        assert_eq!(config.unknown_product, DEFAULT_UNKNOWN_PRODUCT);
        assert_eq!(config.label_rules.len(), 1);
    }

    #[test]
    fn required_columns_follow_declared_order() {
        let names = ColumnNames::default();
        assert_eq!(
            names.required(),
            ["Jenis Produk", "Tanggal", "Harga", "Jumlah Order", "Total"]
        );
    }

    #[test]
    fn yaml_round_trip_preserves_rules() {
        let config = DashboardConfig::default();
        let yaml = config.to_yaml_string().expect("serialize");
        let parsed: DashboardConfig = serde_yaml::from_str(&yaml).expect("parse");
        assert_eq!(parsed, config);
    }
}
