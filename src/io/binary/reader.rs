use crate::io::{Format, error::Error};
use crate::model::record::Column;
use crate::model::snapshot::{ColumnData, Snapshot};
use crate::model::types::Dtype;
use std::io::BufRead;

/// Read a fixed-layout packed binary snapshot.
///
/// The file carries no schema: it must be a whole number of rows of
/// `columns × 8` bytes each, laid out in the order the column layout
/// declares, little-endian.
pub fn read<R: BufRead>(mut reader: R, schema: &[Column]) -> Result<Snapshot, Error> {
    if schema.is_empty() {
        return Err(Error::layout("snapshot layout has no columns"));
    }

    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;

    let row_size = schema.len() * Dtype::SIZE;
    if data.len() % row_size != 0 {
        return Err(Error::truncated(
            Format::Binary,
            format!(
                "{} bytes is not a whole number of {}-byte rows ({} columns)",
                data.len(),
                row_size,
                schema.len()
            ),
        ));
    }

    let rows = data.len() / row_size;
    let mut snapshot = Snapshot::with_capacity(schema.to_vec(), rows);
    decode_rows(&data, rows, snapshot.columns_mut());
    Ok(snapshot)
}

/// Decode `rows` packed rows into column-major storage. The caller has
/// already checked that `data` holds exactly that many rows.
pub(crate) fn decode_rows(data: &[u8], rows: usize, columns: &mut [ColumnData]) {
    let mut offset = 0;
    let mut cell = [0u8; Dtype::SIZE];
    for _ in 0..rows {
        for column in columns.iter_mut() {
            cell.copy_from_slice(&data[offset..offset + Dtype::SIZE]);
            match column {
                ColumnData::F64(values) => values.push(f64::from_le_bytes(cell)),
                ColumnData::I64(values) => values.push(i64::from_le_bytes(cell)),
            }
            offset += Dtype::SIZE;
        }
    }
}
