//! Metrics and grouped rollups over a [`Scope`].
//!
//! Everything here is recomputed from the scope on each call. Sums saturate
//! at the decimal range instead of panicking.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::records::{SalesRecord, Scope};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SummaryMetrics {
    pub total_revenue: Decimal,
    pub total_items_sold: Decimal,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRollup {
    pub product: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryShare {
    pub product: String,
    pub quantity: Decimal,
    /// Percentage of the scope's total quantity, 0 when that total is 0.
    pub share_percent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyRollup {
    pub date: NaiveDate,
    pub revenue: Decimal,
}

fn sum(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, |acc, value| acc.saturating_add(value))
}

fn group_sum<K: Ord>(
    scope: &Scope<'_>,
    key: impl Fn(&SalesRecord) -> K,
    value: impl Fn(&SalesRecord) -> Decimal,
) -> BTreeMap<K, Decimal> {
    let mut groups = BTreeMap::new();
    for record in scope.iter() {
        let entry = groups.entry(key(record)).or_insert(Decimal::ZERO);
        *entry = entry.saturating_add(value(record));
    }
    groups
}

pub fn total_revenue(scope: &Scope<'_>) -> Decimal {
    sum(scope.iter().map(|record| record.revenue))
}

pub fn total_items_sold(scope: &Scope<'_>) -> Decimal {
    sum(scope.iter().map(|record| record.quantity))
}

pub fn transaction_count(scope: &Scope<'_>) -> usize {
    scope.len()
}

pub fn summarize(scope: &Scope<'_>) -> SummaryMetrics {
    SummaryMetrics {
        total_revenue: total_revenue(scope),
        total_items_sold: total_items_sold(scope),
        transaction_count: transaction_count(scope),
    }
}

/// One row per product present in scope, ordered by label.
pub fn revenue_by_category(scope: &Scope<'_>) -> Vec<CategoryRollup> {
    group_sum(scope, |record| record.product.clone(), |record| record.revenue)
        .into_iter()
        .map(|(product, value)| CategoryRollup { product, value })
        .collect()
}

pub fn quantity_share_by_category(scope: &Scope<'_>) -> Vec<CategoryShare> {
    let groups = group_sum(scope, |record| record.product.clone(), |record| record.quantity);
    let total = sum(groups.values().copied());
    groups
        .into_iter()
        .map(|(product, quantity)| {
            let share_percent = quantity
                .checked_mul(Decimal::ONE_HUNDRED)
                .and_then(|scaled| scaled.checked_div(total))
                .map(|share| share.round_dp(2))
                .unwrap_or(Decimal::ZERO);
            CategoryShare {
                product,
                quantity,
                share_percent,
            }
        })
        .collect()
}

/// Revenue per calendar day, ascending. Time of day is ignored.
pub fn revenue_by_day(scope: &Scope<'_>) -> Vec<DailyRollup> {
    group_sum(scope, SalesRecord::day, |record| record.revenue)
        .into_iter()
        .map(|(date, revenue)| DailyRollup { date, revenue })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::NaiveDateTime;

    use super::*;
    use crate::records::CleanedTable;

    fn record(product: &str, date: &str, price: &str, quantity: &str) -> SalesRecord {
        let price = Decimal::from_str(price).unwrap();
        let quantity = Decimal::from_str(quantity).unwrap();
        SalesRecord {
            product: product.to_string(),
            date: NaiveDateTime::parse_from_str(date, "%Y-%m-%d %H:%M").unwrap(),
            price,
            quantity,
            total: Decimal::ZERO,
            revenue: price * quantity,
        }
    }

    fn table() -> CleanedTable {
        CleanedTable::new(vec![
            record("Stiker", "2024-03-02 09:00", "1500", "2"),
            record("Banner", "2024-03-01 10:00", "50000", "1"),
            record("Stiker", "2024-03-01 16:30", "1500", "4"),
        ])
    }

    #[test]
    fn day_rollup_ignores_time_and_sorts_ascending() {
        let table = table();
        let days = revenue_by_day(&table.full_scope());
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(days[0].revenue, Decimal::from(56000));
        assert_eq!(days[1].revenue, Decimal::from(3000));
    }

    #[test]
    fn quantity_shares_sum_to_hundred() {
        let table = table();
        let shares = quantity_share_by_category(&table.full_scope());
        let products = shares.iter().map(|s| s.product.as_str()).collect::<Vec<_>>();
        assert_eq!(products, vec!["Banner", "Stiker"]);
        assert_eq!(shares[0].share_percent, Decimal::from_str("14.29").unwrap());
        assert_eq!(shares[1].share_percent, Decimal::from_str("85.71").unwrap());
    }

    #[test]
    fn zero_quantity_scope_has_zero_shares() {
        let table = CleanedTable::new(vec![record("Stiker", "2024-03-02 09:00", "1500", "0")]);
        let shares = quantity_share_by_category(&table.full_scope());
        assert_eq!(shares[0].share_percent, Decimal::ZERO);
    }
}
