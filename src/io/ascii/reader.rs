use crate::io::{Format, error::Error};
use crate::model::record::Column;
use crate::model::snapshot::Snapshot;
use std::io::BufRead;

/// Read a whitespace-delimited text snapshot.
///
/// Every token is parsed as floating point and cast into the declared
/// column dtype, which is how text snapshots are written in the first
/// place. Blank lines and `#` comment lines are skipped.
pub fn read<R: BufRead>(reader: R, schema: &[Column]) -> Result<Snapshot, Error> {
    let mut snapshot = Snapshot::new(schema.to_vec());
    let mut row = Vec::with_capacity(schema.len());

    for (i, line) in reader.lines().enumerate() {
        let ln = i + 1;
        let content = line.map_err(|e| Error::Io { source: e })?;
        let trimmed = content.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        row.clear();
        for token in trimmed.split_whitespace() {
            let value = token.parse::<f64>().map_err(|_| {
                Error::parse(
                    Format::Ascii,
                    ln,
                    format!("invalid floating-point value '{token}'"),
                )
            })?;
            row.push(value);
        }

        if row.len() != schema.len() {
            return Err(Error::parse(
                Format::Ascii,
                ln,
                format!("expected {} columns, found {}", schema.len(), row.len()),
            ));
        }

        snapshot.push_row_f64(&row);
    }

    Ok(snapshot)
}
