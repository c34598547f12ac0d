use rust_decimal::Decimal;

use crate::{
    error::{PipelineError, PipelineResult},
    records::{CleanedTable, NormalizedRecord, SalesRecord},
};

/// Exact product, normalized so `1500.5 x 2` prints as `3001`.
pub fn compute_revenue(price: Decimal, quantity: Decimal) -> Option<Decimal> {
    price.checked_mul(quantity).map(|revenue| revenue.normalize())
}

/// Adds `revenue` to every normalized row. The source `total` never feeds it.
pub fn derive_revenue(records: Vec<NormalizedRecord>) -> PipelineResult<CleanedTable> {
    records
        .into_iter()
        .enumerate()
        .map(|(idx, record)| {
            let revenue = compute_revenue(record.price, record.quantity)
                .ok_or(PipelineError::RevenueOverflow { row: idx + 2 })?;
            Ok(SalesRecord {
                product: record.product,
                date: record.date,
                price: record.price,
                quantity: record.quantity,
                total: record.total,
                revenue,
            })
        })
        .collect::<PipelineResult<Vec<_>>>()
        .map(CleanedTable::new)
}
