//! Dashboard view: headline metrics plus product and daily rollups.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use crate::{
    aggregate::{self, CategoryRollup, CategoryShare, DailyRollup, SummaryMetrics},
    cli::SummaryArgs,
    filter::DashboardFilter,
    format::{format_count, format_currency},
    records::CleanedTable,
    table::TextTable,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryView {
    /// Selected products; empty means the whole table is in scope.
    pub products: Vec<String>,
    pub metrics: SummaryMetrics,
    pub revenue_by_category: Vec<CategoryRollup>,
    pub quantity_share_by_category: Vec<CategoryShare>,
    pub revenue_by_day: Vec<DailyRollup>,
}

pub fn build_summary(table: &CleanedTable, filter: &DashboardFilter) -> SummaryView {
    let scope = filter.apply(table);
    SummaryView {
        products: filter.selected().map(str::to_string).collect(),
        metrics: aggregate::summarize(&scope),
        revenue_by_category: aggregate::revenue_by_category(&scope),
        quantity_share_by_category: aggregate::quantity_share_by_category(&scope),
        revenue_by_day: aggregate::revenue_by_day(&scope),
    }
}

pub fn render_summary(view: &SummaryView) -> String {
    let mut output = String::new();

    let mut metrics = TextTable::new(["metric", "value"]).align_right(1);
    metrics.push_row(vec![
        "Total revenue".to_string(),
        format_currency(view.metrics.total_revenue),
    ]);
    metrics.push_row(vec![
        "Items sold".to_string(),
        format_count(view.metrics.total_items_sold),
    ]);
    metrics.push_row(vec![
        "Transactions".to_string(),
        format_count(view.metrics.transaction_count.into()),
    ]);
    let _ = writeln!(output, "{}", metrics.render());

    let mut revenue = TextTable::new(["product", "revenue"]).align_right(1);
    for row in &view.revenue_by_category {
        revenue.push_row(vec![row.product.clone(), format_currency(row.value)]);
    }
    let _ = writeln!(output, "{}", revenue.render());

    let mut shares = TextTable::new(["product", "quantity", "share"])
        .align_right(1)
        .align_right(2);
    for row in &view.quantity_share_by_category {
        shares.push_row(vec![
            row.product.clone(),
            format_count(row.quantity),
            format!("{:.2}%", row.share_percent),
        ]);
    }
    let _ = writeln!(output, "{}", shares.render());

    let mut daily = TextTable::new(["date", "revenue"]).align_right(1);
    for row in &view.revenue_by_day {
        daily.push_row(vec![
            row.date.format("%Y-%m-%d").to_string(),
            format_currency(row.revenue),
        ]);
    }
    output.push_str(&daily.render());
    output
}

pub fn execute(args: &SummaryArgs) -> Result<()> {
    let dataset = crate::load_dataset(&args.input)?;
    let filter = DashboardFilter::new(args.products.iter().cloned());
    let view = build_summary(&dataset.table, &filter);
    if args.json {
        let rendered = serde_json::to_string_pretty(&view).context("Serializing summary")?;
        println!("{rendered}");
    } else {
        print!("{}", render_summary(&view));
    }
    info!(
        "Summarized {} of {} record(s) across {} product(s)",
        view.metrics.transaction_count,
        dataset.table.len(),
        view.revenue_by_category.len()
    );
    Ok(())
}
