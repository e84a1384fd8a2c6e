// Table Writer
//
// Sorts the collected records by numeric MCC and writes them as one
// delimited line each. Sort keys are validated before the destination is
// opened, so a bad key never leaves a truncated or half-sorted table behind.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::record::Assignment;
use crate::error::{IoContext, Result};

/// Stable sort by MCC, compared as integers
///
/// Fails on the first MCC that is not an integer.
pub fn sort_records(records: Vec<Assignment>) -> Result<Vec<Assignment>> {
    let mut keyed = records
        .into_iter()
        .map(|r| r.sort_key().map(|key| (key, r)))
        .collect::<Result<Vec<_>>>()?;

    keyed.sort_by_key(|(key, _)| *key);
    Ok(keyed.into_iter().map(|(_, r)| r).collect())
}

/// Write records to any sink, one line per record
pub fn write_records<W: Write>(
    records: &[Assignment],
    delimiter: char,
    writer: &mut W,
) -> std::io::Result<()> {
    for record in records {
        writer.write_all(record.to_line(delimiter).as_bytes())?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// Sort `records` and write them to `path`, replacing any existing file
///
/// Returns the number of lines written.
pub fn write_table(records: Vec<Assignment>, delimiter: char, path: &Path) -> Result<usize> {
    let sorted = sort_records(records)?;

    let file = File::create(path).context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_records(&sorted, delimiter, &mut writer)
        .and_then(|_| writer.flush())
        .context(|| format!("Failed to write {}", path.display()))?;

    log::info!("Wrote {} records to {}", sorted.len(), path.display());
    Ok(sorted.len())
}
