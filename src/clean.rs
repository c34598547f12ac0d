use anyhow::{Context, Result};
use log::info;

use crate::{cli::CleanArgs, format::format_timestamp, io_utils, records::CleanedTable};

pub const CLEANED_HEADERS: [&str; 6] = ["product", "date", "price", "quantity", "total", "revenue"];

pub fn write_cleaned<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    table: &CleanedTable,
) -> Result<()> {
    writer
        .write_record(CLEANED_HEADERS)
        .context("Writing output headers")?;
    for (idx, record) in table.records().iter().enumerate() {
        writer
            .write_record([
                record.product.clone(),
                format_timestamp(&record.date),
                record.price.to_string(),
                record.quantity.to_string(),
                record.total.to_string(),
                record.revenue.to_string(),
            ])
            .with_context(|| format!("Writing output row {}", idx + 2))?;
    }
    writer.flush().context("Flushing output writer")?;
    Ok(())
}

pub fn execute(args: &CleanArgs) -> Result<()> {
    let dataset = crate::load_dataset(&args.input)?;
    let mut writer = io_utils::open_csv_writer(args.output.as_deref(), args.output_delimiter)?;
    write_cleaned(&mut writer, &dataset.table)?;

    let destination = args
        .output
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "stdout".to_string());
    info!(
        "Wrote {} cleaned row(s) -> {} ({})",
        dataset.table.len(),
        destination,
        dataset.report
    );
    Ok(())
}
