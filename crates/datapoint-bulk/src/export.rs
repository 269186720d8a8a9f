//! Template and export writers.

use crate::error::BulkError;
use crate::record::BulkRecord;
use csv::Writer;
use std::io::Write;
use telemetry_core::DataPoint;
use tracing::info;

/// Write the upload template: the header plus one sample row.
pub fn write_template<W: Write>(out: W) -> Result<(), BulkError> {
    write_records(out, std::iter::once(BulkRecord::sample()))?;
    Ok(())
}

/// Write data points in the bulk column layout.
///
/// Returns the number of rows written.
pub fn write_export<'a, W, I>(out: W, data_points: I) -> Result<usize, BulkError>
where
    W: Write,
    I: IntoIterator<Item = &'a DataPoint>,
{
    let rows = write_records(out, data_points.into_iter().map(BulkRecord::from))?;
    info!("Exported {rows} data points");
    Ok(rows)
}

fn write_records<W: Write>(
    out: W,
    records: impl Iterator<Item = BulkRecord>,
) -> Result<usize, BulkError> {
    let mut writer = Writer::from_writer(out);
    let mut rows = 0;
    for record in records {
        writer.serialize(record)?;
        rows += 1;
    }
    if rows == 0 {
        writer.write_record(crate::record::COLUMNS)?;
    }
    writer.flush()?;
    Ok(rows)
}
