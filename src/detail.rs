//! Transaction detail lookup by product label search.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use log::{info, warn};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    cli::DetailArgs,
    filter::DetailLookup,
    format::{format_count, format_currency, format_timestamp},
    records::{CleanedTable, SalesRecord},
    table::TextTable,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRow {
    pub date: NaiveDateTime,
    pub product: String,
    pub quantity: Decimal,
    pub price: Decimal,
    pub total: Decimal,
}

impl From<&SalesRecord> for DetailRow {
    fn from(record: &SalesRecord) -> Self {
        Self {
            date: record.date,
            product: record.product.clone(),
            quantity: record.quantity,
            price: record.price,
            total: record.total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailView {
    pub search: Option<String>,
    pub options: Vec<String>,
    pub selection: Vec<String>,
    pub rows: Vec<DetailRow>,
}

/// An empty `selection` falls back to the lookup's default selection.
/// Requested labels outside the search results are dropped.
pub fn build_detail(table: &CleanedTable, search: Option<&str>, selection: &[String]) -> DetailView {
    let lookup = DetailLookup::new(table, search);
    let effective = if selection.is_empty() {
        lookup.default_selection()
    } else {
        lookup.select(selection)
    };
    let selection = effective
        .into_iter()
        .map(str::to_string)
        .collect::<Vec<_>>();
    let rows = lookup
        .rows(selection.as_slice())
        .into_iter()
        .map(DetailRow::from)
        .collect();
    DetailView {
        search: lookup.search().map(str::to_string),
        options: lookup.options().into_iter().map(str::to_string).collect(),
        selection,
        rows,
    }
}

pub fn render_detail(view: &DetailView) -> String {
    let mut output = String::new();
    if view.options.is_empty() {
        output.push_str("No products match the search.\n");
        return output;
    }
    output.push_str(&format!("Matching products: {}\n", view.options.join(", ")));
    output.push_str(&format!("Selected: {}\n\n", view.selection.join(", ")));

    let mut table = TextTable::new(["date", "product", "quantity", "price", "total"])
        .align_right(2)
        .align_right(3)
        .align_right(4);
    for row in &view.rows {
        table.push_row(vec![
            format_timestamp(&row.date),
            row.product.clone(),
            format_count(row.quantity),
            format_currency(row.price),
            format_currency(row.total),
        ]);
    }
    output.push_str(&table.render());
    output
}

pub fn execute(args: &DetailArgs) -> Result<()> {
    let dataset = crate::load_dataset(&args.input)?;
    let view = build_detail(&dataset.table, args.search.as_deref(), &args.select);
    for label in args
        .select
        .iter()
        .filter(|label| !view.selection.contains(*label))
    {
        warn!("Ignoring selection '{label}': not among the matching products");
    }
    if args.json {
        let rendered = serde_json::to_string_pretty(&view).context("Serializing detail view")?;
        println!("{rendered}");
    } else {
        print!("{}", render_detail(&view));
    }
    info!(
        "Listed {} transaction(s) for {} selected product(s)",
        view.rows.len(),
        view.selection.len()
    );
    Ok(())
}
