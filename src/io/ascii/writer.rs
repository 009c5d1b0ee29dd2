use crate::io::error::Error;
use crate::model::snapshot::Snapshot;
use std::io::Write;

/// Write one whitespace-delimited text line per row.
///
/// All values are written as floating point in scientific notation with 18
/// fractional digits, enough to reproduce any `f64` exactly on reload.
/// Identifier columns therefore survive the text round-trip only up to
/// 2^53.
pub fn write<W: Write>(mut writer: W, snapshot: &Snapshot) -> Result<(), Error> {
    for row in 0..snapshot.n_rows() {
        for (i, column) in snapshot.columns().iter().enumerate() {
            if i > 0 {
                write!(writer, " ")?;
            }
            write!(writer, "{:.18e}", column.get_f64(row))?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::Column;
    use crate::model::snapshot::Snapshot;

    #[test]
    fn writes_one_line_per_row() {
        let mut snapshot = Snapshot::new(vec![Column::i64("id"), Column::f64("mass")]);
        snapshot.push_row_f64(&[1.0, 0.5]);
        snapshot.push_row_f64(&[2.0, 0.25]);

        let mut buf = Vec::new();
        write(&mut buf, &snapshot).expect("write ascii");
        let text = String::from_utf8(buf).expect("utf-8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].split_whitespace().count(), 2);
        assert!(lines[0].split_whitespace().next().unwrap().starts_with("1."));
    }

    #[test]
    fn empty_snapshot_writes_nothing() {
        let snapshot = Snapshot::new(vec![Column::f64("mass")]);
        let mut buf = Vec::new();
        write(&mut buf, &snapshot).expect("write ascii");
        assert!(buf.is_empty());
    }
}
