//! Cleaned sales records and borrowed row scopes over them.

use chrono::{NaiveDate, NaiveDateTime};
use itertools::Itertools;
use rust_decimal::Decimal;
use serde::Serialize;

/// A row after label, date, and numeric cleaning but before derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedRecord {
    pub product: String,
    pub date: NaiveDateTime,
    pub price: Decimal,
    pub quantity: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesRecord {
    pub product: String,
    pub date: NaiveDateTime,
    pub price: Decimal,
    pub quantity: Decimal,
    /// Amount as supplied by the source file; display only.
    pub total: Decimal,
    /// Always `price * quantity`.
    pub revenue: Decimal,
}

impl SalesRecord {
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanedTable {
    records: Vec<SalesRecord>,
}

impl CleanedTable {
    pub fn new(records: Vec<SalesRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct product labels in ascending order.
    pub fn products(&self) -> Vec<&str> {
        self.records
            .iter()
            .map(|record| record.product.as_str())
            .sorted_unstable()
            .dedup()
            .collect_vec()
    }

    pub fn full_scope(&self) -> Scope<'_> {
        Scope::new(self.records.iter().collect())
    }
}

/// Rows currently in view; borrowed from a [`CleanedTable`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope<'a> {
    records: Vec<&'a SalesRecord>,
}

impl<'a> Scope<'a> {
    pub fn new(records: Vec<&'a SalesRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[&'a SalesRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a SalesRecord> + '_ {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn to_table(&self) -> CleanedTable {
        CleanedTable::new(self.records.iter().map(|record| (*record).clone()).collect())
    }
}
