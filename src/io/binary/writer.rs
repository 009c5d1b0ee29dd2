use crate::io::error::Error;
use crate::model::snapshot::{ColumnData, Snapshot};
use std::io::Write;

/// Write a snapshot as packed little-endian rows with no header.
pub fn write<W: Write>(mut writer: W, snapshot: &Snapshot) -> Result<(), Error> {
    writer.write_all(&encode_rows(snapshot))?;
    Ok(())
}

/// Encode the snapshot row-major, column values in schema order. Shared
/// with the npy writer, whose payload uses the same packing.
pub(crate) fn encode_rows(snapshot: &Snapshot) -> Vec<u8> {
    let mut data = Vec::with_capacity(snapshot.n_rows() * snapshot.row_size());
    for row in 0..snapshot.n_rows() {
        for column in snapshot.columns() {
            match column {
                ColumnData::F64(values) => data.extend_from_slice(&values[row].to_le_bytes()),
                ColumnData::I64(values) => data.extend_from_slice(&values[row].to_le_bytes()),
            }
        }
    }
    data
}
