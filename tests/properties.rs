use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use sales_dashboard::{
    aggregate,
    config::DashboardConfig,
    derive::derive_revenue,
    filter::DashboardFilter,
    normalize::Normalizer,
    records::NormalizedRecord,
};

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// (formatted cell, expected value) in either `1,234.56` or `1.234,56` style.
fn price_cell_strategy() -> impl Strategy<Value = (String, Decimal)> {
    (0i64..=9_999_999, 0i64..100, any::<bool>(), any::<bool>()).prop_map(
        |(integer, cents, decimal_comma, prefixed)| {
            let (group, mark) = if decimal_comma { ('.', ',') } else { (',', '.') };
            let mut cell = format!("{}{mark}{cents:02}", group_digits(&integer.to_string(), group));
            if prefixed {
                cell = format!("Rp {cell}");
            }
            (cell, Decimal::new(integer * 100 + cents, 2))
        },
    )
}

fn record_strategy() -> impl Strategy<Value = NormalizedRecord> {
    (
        prop_oneof![Just("Stiker A4"), Just("Banner"), Just("Kartu Nama"), Just("Unknown")],
        1u32..=28,
        0i64..1_000_000,
        0i64..50,
    )
        .prop_map(|(product, day, price_cents, quantity)| NormalizedRecord {
            product: product.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, day)
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .expect("valid generated date"),
            price: Decimal::new(price_cents, 2),
            quantity: Decimal::from(quantity),
            total: Decimal::ZERO,
        })
}

proptest! {
    #[test]
    fn locale_formatted_prices_parse_exactly((cell, expected) in price_cell_strategy()) {
        let normalizer = Normalizer::new(&DashboardConfig::default()).expect("normalizer");
        let (value, zeroed) = normalizer.coerce_or_zero(&cell);
        prop_assert!(!zeroed);
        prop_assert_eq!(value, expected);
    }

    #[test]
    fn numeric_coercion_never_fails_or_goes_negative(cell in "\\PC{0,24}") {
        let normalizer = Normalizer::new(&DashboardConfig::default()).expect("normalizer");
        let (value, zeroed) = normalizer.coerce_or_zero(&cell);
        prop_assert!(value >= Decimal::ZERO);
        if zeroed {
            prop_assert_eq!(value, Decimal::ZERO);
        }
    }

    #[test]
    fn rollups_partition_totals(records in proptest::collection::vec(record_strategy(), 0..40)) {
        let table = derive_revenue(records).expect("revenue in range");
        for record in table.records() {
            prop_assert_eq!(record.revenue, record.price * record.quantity);
        }

        let scope = DashboardFilter::all().apply(&table);
        let total = aggregate::total_revenue(&scope);
        let by_category = aggregate::revenue_by_category(&scope)
            .iter()
            .fold(Decimal::ZERO, |acc, row| acc + row.value);
        let by_day = aggregate::revenue_by_day(&scope)
            .iter()
            .fold(Decimal::ZERO, |acc, row| acc + row.revenue);
        prop_assert_eq!(by_category, total);
        prop_assert_eq!(by_day, total);

        let everything = DashboardFilter::new(table.products());
        prop_assert_eq!(aggregate::summarize(&everything.apply(&table)), aggregate::summarize(&scope));
    }
}
