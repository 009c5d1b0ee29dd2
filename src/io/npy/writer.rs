use super::MAGIC;
use crate::io::{binary, error::Error};
use crate::model::record::Column;
use crate::model::snapshot::Snapshot;
use std::io::Write;

/// Write a snapshot as a 1-D npy structured array.
///
/// The header records one field per column, so the file can be loaded by
/// any npy-aware tool without outside knowledge of the layout. The payload
/// is the same packed little-endian row data the headerless binary format
/// uses.
pub fn write<W: Write>(mut writer: W, snapshot: &Snapshot) -> Result<(), Error> {
    writer.write_all(&preamble(snapshot.schema(), snapshot.n_rows()))?;
    writer.write_all(&binary::writer::encode_rows(snapshot))?;
    Ok(())
}

/// Build magic, version, and the padded header dict.
///
/// Version 1.0 carries the header length as `u16`; if the dict is too
/// large for that (thousands of columns), version 2.0 with a `u32` length
/// is emitted instead. The header is padded with spaces to a 64-byte
/// boundary and terminated with a newline, so the payload starts aligned.
pub(crate) fn preamble(schema: &[Column], rows: usize) -> Vec<u8> {
    let fields: Vec<String> = schema
        .iter()
        .map(|column| format!("('{}', '{}')", column.name, column.dtype.npy_descr()))
        .collect();
    let mut header = format!(
        "{{'descr': [{}], 'fortran_order': False, 'shape': ({},), }}",
        fields.join(", "),
        rows
    )
    .into_bytes();

    // Magic + version + length field. Padded header length must fit the
    // version's length field; version 1.0 unless the dict is enormous.
    let v1_prefix = MAGIC.len() + 2 + 2;
    let v1_total = (v1_prefix + header.len() + 1).div_ceil(64) * 64;
    let fits_v1 = v1_total - v1_prefix <= usize::from(u16::MAX);

    let prefix_len = if fits_v1 { v1_prefix } else { MAGIC.len() + 2 + 4 };
    let total = (prefix_len + header.len() + 1).div_ceil(64) * 64;
    header.resize(total - prefix_len - 1, b' ');
    header.push(b'\n');

    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(MAGIC);
    if fits_v1 {
        out.extend_from_slice(&[1, 0]);
        out.extend_from_slice(&(header.len() as u16).to_le_bytes());
    } else {
        out.extend_from_slice(&[2, 0]);
        out.extend_from_slice(&(header.len() as u32).to_le_bytes());
    }
    out.extend_from_slice(&header);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preamble_is_aligned_and_versioned() {
        let schema = vec![Column::i64("id"), Column::f64("mass")];
        let bytes = preamble(&schema, 3);

        assert_eq!(&bytes[..6], MAGIC);
        assert_eq!(&bytes[6..8], &[1, 0]);
        assert_eq!(bytes.len() % 64, 0);
        assert_eq!(*bytes.last().unwrap(), b'\n');

        let text = std::str::from_utf8(&bytes[10..]).expect("utf-8 header");
        assert!(text.contains("('id', '<i8')"));
        assert!(text.contains("('mass', '<f8')"));
        assert!(text.contains("'fortran_order': False"));
        assert!(text.contains("'shape': (3,)"));
    }

    #[test]
    fn oversized_header_falls_back_to_version_two() {
        let schema: Vec<Column> = (0..4000)
            .map(|i| Column::f64(format!("very_long_column_name_number_{i}")))
            .collect();
        let bytes = preamble(&schema, 1);

        assert_eq!(&bytes[6..8], &[2, 0]);
        assert_eq!(bytes.len() % 64, 0);
    }

    #[test]
    fn payload_follows_header() {
        let mut snapshot = Snapshot::new(vec![Column::f64("mass")]);
        snapshot.push_row_f64(&[0.5]);

        let mut buf = Vec::new();
        write(&mut buf, &snapshot).expect("write npy");
        assert_eq!(&buf[buf.len() - 8..], &0.5f64.to_le_bytes());
        assert_eq!(buf.len() % 64, 8);
    }
}
