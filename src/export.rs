use std::path::Path;

use anyhow::{Context, Result};

use crate::declare::StockRecord;

const HEADERS: [&str; 3] = ["company", "price", "change"];

/// Writes the header row and one row per record, in order, to `path`.
///
/// The header is written even when there is nothing to report.
pub fn write_csv<P: AsRef<Path>>(path: P, records: &[StockRecord]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create output CSV file {}", path.display()))?;

    writer
        .write_record(HEADERS)
        .with_context(|| format!("Failed to write the header to {}", path.display()))?;

    for record in records {
        writer
            .write_record([&record.company, &record.price, &record.change])
            .with_context(|| format!("Failed to write {} to {}", record.company, path.display()))?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;

    Ok(())
}
