use super::MAGIC;
use crate::io::{Format, binary, error::Error};
use crate::model::record::Column;
use crate::model::snapshot::Snapshot;
use crate::model::types::Dtype;
use std::io::{BufRead, Read};

/// Read a 1-D npy structured array as a snapshot.
///
/// The header's field list is validated against the requested column
/// layout before any payload is decoded, so a snapshot saved with
/// different post-processing options is rejected instead of misread.
pub fn read<R: BufRead>(mut reader: R, schema: &[Column]) -> Result<Snapshot, Error> {
    let header = read_header(&mut reader)?;
    let parsed = parse_header(&header)?;
    check_layout(&parsed, schema)?;

    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;

    let row_size = schema.len() * Dtype::SIZE;
    let expected = parsed.rows.checked_mul(row_size).ok_or_else(|| {
        Error::parse(
            Format::Npy,
            1,
            format!("declared row count {} is implausibly large", parsed.rows),
        )
    })?;
    if data.len() < expected {
        return Err(Error::truncated(
            Format::Npy,
            format!(
                "header declares {} rows ({} bytes) but only {} payload bytes follow",
                parsed.rows,
                expected,
                data.len()
            ),
        ));
    }
    if data.len() > expected {
        return Err(Error::parse(
            Format::Npy,
            1,
            format!("{} trailing bytes after the declared array", data.len() - expected),
        ));
    }

    let mut snapshot = Snapshot::with_capacity(schema.to_vec(), parsed.rows);
    binary::reader::decode_rows(&data, parsed.rows, snapshot.columns_mut());
    Ok(snapshot)
}

#[derive(Debug)]
struct ParsedHeader {
    fields: Vec<(String, String)>,
    rows: usize,
}

/// Consume magic, version, and the header dict text.
fn read_header<R: BufRead>(reader: &mut R) -> Result<String, Error> {
    let mut preamble = [0u8; 8];
    read_fully(reader, &mut preamble)?;
    if &preamble[..6] != MAGIC {
        return Err(Error::parse(
            Format::Npy,
            1,
            "file does not start with the npy magic string".to_string(),
        ));
    }

    let header_len = match preamble[6] {
        1 => {
            let mut len = [0u8; 2];
            read_fully(reader, &mut len)?;
            usize::from(u16::from_le_bytes(len))
        }
        2 | 3 => {
            let mut len = [0u8; 4];
            read_fully(reader, &mut len)?;
            u32::from_le_bytes(len) as usize
        }
        major => {
            return Err(Error::parse(
                Format::Npy,
                1,
                format!("unsupported npy format version {}.{}", major, preamble[7]),
            ));
        }
    };

    let mut header = vec![0u8; header_len];
    read_fully(reader, &mut header)?;
    String::from_utf8(header)
        .map_err(|_| Error::parse(Format::Npy, 1, "header is not valid UTF-8".to_string()))
}

fn read_fully<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<(), Error> {
    reader.read_exact(buf).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            Error::truncated(Format::Npy, "file ends inside the header".to_string())
        } else {
            Error::Io { source: e }
        }
    })
}

/// Parse the python-literal header dict with string scanning. Only the
/// three keys the format defines are read; insertion order is free.
fn parse_header(header: &str) -> Result<ParsedHeader, Error> {
    let fields = parse_descr(header)?;
    parse_fortran_order(header)?;
    let rows = parse_shape(header)?;
    Ok(ParsedHeader { fields, rows })
}

fn value_after<'a>(header: &'a str, key: &str) -> Result<&'a str, Error> {
    let needle = format!("'{key}':");
    let start = header
        .find(&needle)
        .ok_or_else(|| Error::parse(Format::Npy, 1, format!("header has no '{key}' key")))?;
    Ok(header[start + needle.len()..].trim_start())
}

fn parse_quoted(text: &str) -> Result<(String, &str), Error> {
    let rest = text.strip_prefix('\'').ok_or_else(|| {
        Error::parse(Format::Npy, 1, format!("expected quoted string at '{text}'"))
    })?;
    let end = rest
        .find('\'')
        .ok_or_else(|| Error::parse(Format::Npy, 1, "unterminated string in header".to_string()))?;
    Ok((rest[..end].to_string(), &rest[end + 1..]))
}

fn parse_descr(header: &str) -> Result<Vec<(String, String)>, Error> {
    let mut rest = value_after(header, "descr")?;
    rest = rest.strip_prefix('[').ok_or_else(|| {
        Error::parse(
            Format::Npy,
            1,
            "'descr' is not a field list; plain (unstructured) arrays are not supported"
                .to_string(),
        )
    })?;

    let mut fields = Vec::new();
    loop {
        rest = rest.trim_start_matches([' ', ',']);
        if rest.starts_with(']') {
            break;
        }
        rest = rest.strip_prefix('(').ok_or_else(|| {
            Error::parse(Format::Npy, 1, "malformed field tuple in 'descr'".to_string())
        })?;
        let (name, after_name) = parse_quoted(rest.trim_start())?;
        let after_comma = after_name.trim_start().strip_prefix(',').ok_or_else(|| {
            Error::parse(Format::Npy, 1, "malformed field tuple in 'descr'".to_string())
        })?;
        let (descr, after_descr) = parse_quoted(after_comma.trim_start())?;
        rest = after_descr.trim_start().strip_prefix(')').ok_or_else(|| {
            Error::parse(Format::Npy, 1, "malformed field tuple in 'descr'".to_string())
        })?;
        fields.push((name, descr));
    }
    Ok(fields)
}

fn parse_fortran_order(header: &str) -> Result<(), Error> {
    let value = value_after(header, "fortran_order")?;
    if value.starts_with("False") {
        Ok(())
    } else if value.starts_with("True") {
        Err(Error::parse(
            Format::Npy,
            1,
            "Fortran-ordered arrays are not supported".to_string(),
        ))
    } else {
        Err(Error::parse(
            Format::Npy,
            1,
            "'fortran_order' is neither True nor False".to_string(),
        ))
    }
}

fn parse_shape(header: &str) -> Result<usize, Error> {
    let value = value_after(header, "shape")?;
    let inner = value
        .strip_prefix('(')
        .and_then(|v| v.find(')').map(|end| &v[..end]))
        .ok_or_else(|| Error::parse(Format::Npy, 1, "malformed 'shape' tuple".to_string()))?;

    let dims: Vec<&str> = inner
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .collect();
    if dims.len() != 1 {
        return Err(Error::parse(
            Format::Npy,
            1,
            format!("expected a 1-D array, found shape ({inner})"),
        ));
    }
    dims[0]
        .parse::<usize>()
        .map_err(|_| Error::parse(Format::Npy, 1, format!("invalid row count '{}'", dims[0])))
}

fn check_layout(parsed: &ParsedHeader, schema: &[Column]) -> Result<(), Error> {
    if parsed.fields.len() != schema.len() {
        return Err(Error::layout(format!(
            "file has {} fields but the requested layout has {} columns",
            parsed.fields.len(),
            schema.len()
        )));
    }
    for ((name, descr), column) in parsed.fields.iter().zip(schema) {
        if name != &column.name {
            return Err(Error::layout(format!(
                "field '{}' where column '{}' was expected",
                name, column.name
            )));
        }
        let dtype = Dtype::from_npy_descr(descr).ok_or_else(|| {
            Error::layout(format!("field '{name}' has unsupported dtype '{descr}'"))
        })?;
        if dtype != column.dtype {
            return Err(Error::layout(format!(
                "field '{}' is '{}' but '{}' was expected",
                name,
                descr,
                column.dtype.npy_descr()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::npy::writer;
    use crate::model::record::{ParticleConfig, SystemKind};
    use std::io::Cursor;

    fn sample_snapshot() -> Snapshot {
        let schema = SystemKind::Single.shape().columns(&ParticleConfig::default());
        let mut snapshot = Snapshot::new(schema);
        snapshot.push_row_f64(&[1.0, 0.5, 0.0, 0.0, 0.0, 0.1, 0.2, 0.3]);
        snapshot.push_row_f64(&[2.0, 0.25, 1.0, 0.0, 0.0, -0.1, -0.2, -0.3]);
        snapshot
    }

    fn encode(snapshot: &Snapshot) -> Vec<u8> {
        let mut buf = Vec::new();
        writer::write(&mut buf, snapshot).expect("write npy");
        buf
    }

    #[test]
    fn roundtrips_exactly() {
        let snapshot = sample_snapshot();
        let buf = encode(&snapshot);
        let reloaded = read(Cursor::new(buf), snapshot.schema()).expect("read npy");
        assert_eq!(reloaded, snapshot);
    }

    #[test]
    fn rejects_bad_magic() {
        let schema = vec![Column::f64("mass")];
        let err = read(Cursor::new(b"\x93NUMPZ\x01\x00".to_vec()), &schema).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn rejects_truncated_header() {
        let schema = vec![Column::f64("mass")];
        let err = read(Cursor::new(b"\x93NUM".to_vec()), &schema).unwrap_err();
        assert!(matches!(
            err,
            Error::Truncated {
                format: Format::Npy,
                ..
            }
        ));
    }

    #[test]
    fn rejects_layout_mismatch() {
        let snapshot = sample_snapshot();
        let buf = encode(&snapshot);

        let fewer = &snapshot.schema()[..4];
        let err = read(Cursor::new(buf.clone()), fewer).unwrap_err();
        assert!(matches!(err, Error::LayoutMismatch { .. }));

        let mut renamed = snapshot.schema().to_vec();
        renamed[1] = Column::f64("luminosity");
        let err = read(Cursor::new(buf.clone()), &renamed).unwrap_err();
        assert!(matches!(err, Error::LayoutMismatch { .. }));

        let mut retyped = snapshot.schema().to_vec();
        retyped[0] = Column::f64("id");
        let err = read(Cursor::new(buf), &retyped).unwrap_err();
        assert!(matches!(err, Error::LayoutMismatch { .. }));
    }

    #[test]
    fn rejects_implausible_row_counts() {
        let header = format!(
            "{{'descr': [('mass', '<f8')], 'fortran_order': False, 'shape': ({},), }}",
            usize::MAX
        );
        let mut buf = Vec::new();
        buf.extend_from_slice(b"\x93NUMPY\x01\x00");
        buf.extend_from_slice(&(header.len() as u16).to_le_bytes());
        buf.extend_from_slice(header.as_bytes());
        buf.extend_from_slice(&[0u8; 8]);

        let err = read(Cursor::new(buf), &[Column::f64("mass")]).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn rejects_fortran_order() {
        let header = "{'descr': [('mass', '<f8')], 'fortran_order': True, 'shape': (0,), }";
        let err = parse_header(header).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn rejects_multidimensional_arrays() {
        let header = "{'descr': [('mass', '<f8')], 'fortran_order': False, 'shape': (2, 3), }";
        let err = parse_header(header).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn rejects_short_payload() {
        let snapshot = sample_snapshot();
        let mut buf = encode(&snapshot);
        buf.truncate(buf.len() - 4);
        let err = read(Cursor::new(buf), snapshot.schema()).unwrap_err();
        assert!(matches!(
            err,
            Error::Truncated {
                format: Format::Npy,
                ..
            }
        ));
    }

    #[test]
    fn rejects_trailing_bytes() {
        let snapshot = sample_snapshot();
        let mut buf = encode(&snapshot);
        buf.extend_from_slice(&[0u8; 4]);
        let err = read(Cursor::new(buf), snapshot.schema()).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn parses_shape_with_trailing_comma() {
        let header = "{'descr': [('mass', '<f8')], 'fortran_order': False, 'shape': (7,), }";
        let parsed = parse_header(header).expect("parse header");
        assert_eq!(parsed.rows, 7);
        assert_eq!(parsed.fields, vec![("mass".to_string(), "<f8".to_string())]);
    }
}
