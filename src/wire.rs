use crate::error::{Md3Error, Result};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};

pub fn truncated(what: &str) -> Md3Error {
    Md3Error::Malformed(format!("unexpected end of data while reading {}", what))
}

pub fn read_i32(cursor: &mut Cursor<&[u8]>, what: &str) -> Result<i32> {
    cursor.read_i32::<LittleEndian>().map_err(|_| truncated(what))
}

pub fn read_f32(cursor: &mut Cursor<&[u8]>, what: &str) -> Result<f32> {
    cursor.read_f32::<LittleEndian>().map_err(|_| truncated(what))
}

pub fn read_i16(cursor: &mut Cursor<&[u8]>, what: &str) -> Result<i16> {
    cursor.read_i16::<LittleEndian>().map_err(|_| truncated(what))
}

pub fn read_vec3(cursor: &mut Cursor<&[u8]>, what: &str) -> Result<[f32; 3]> {
    Ok([
        read_f32(cursor, what)?,
        read_f32(cursor, what)?,
        read_f32(cursor, what)?,
    ])
}

/// Read a count or offset field that the format declares signed but that can
/// never meaningfully be negative.
pub fn read_len(cursor: &mut Cursor<&[u8]>, what: &str) -> Result<usize> {
    let value = read_i32(cursor, what)?;
    usize::try_from(value)
        .map_err(|_| Md3Error::Malformed(format!("negative {} ({})", what, value)))
}

/// Decode a fixed-width name field: bytes up to the first NUL, or the full
/// width when no terminator is present. Trailing bytes are padding.
pub fn read_fixed_string(cursor: &mut Cursor<&[u8]>, width: usize, what: &str) -> Result<String> {
    let mut raw = vec![0u8; width];
    cursor.read_exact(&mut raw).map_err(|_| truncated(what))?;
    let end = raw.iter().position(|&b| b == 0).unwrap_or(width);
    let text = std::str::from_utf8(&raw[..end])
        .map_err(|_| Md3Error::Malformed(format!("{} is not valid text", what)))?;
    Ok(text.to_string())
}

/// Write a name into a fixed-width field, NUL-padded to `width`. A name of
/// exactly `width` bytes is written with no terminator, matching what the
/// decoder accepts.
pub fn write_fixed_string(buf: &mut Vec<u8>, s: &str, width: usize) -> Result<()> {
    let bytes = s.as_bytes();
    if bytes.len() > width {
        return Err(Md3Error::FieldTooLong {
            name: s.to_string(),
            width,
        });
    }
    buf.extend_from_slice(bytes);
    buf.resize(buf.len() + (width - bytes.len()), 0);
    Ok(())
}

pub fn write_vec3(buf: &mut Vec<u8>, v: [f32; 3]) {
    for component in v {
        buf.extend_from_slice(&component.to_le_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_string_pads_with_nuls() {
        let mut buf = Vec::new();
        write_fixed_string(&mut buf, "abc", 8).unwrap();
        assert_eq!(buf, b"abc\0\0\0\0\0");
    }

    #[test]
    fn fixed_string_round_trips() {
        let mut buf = Vec::new();
        write_fixed_string(&mut buf, "tag_head", 16).unwrap();
        let mut cursor = Cursor::new(buf.as_slice());
        assert_eq!(read_fixed_string(&mut cursor, 16, "name").unwrap(), "tag_head");
        assert_eq!(cursor.position(), 16);
    }

    #[test]
    fn full_width_name_has_no_terminator() {
        let mut buf = Vec::new();
        write_fixed_string(&mut buf, "abcd", 4).unwrap();
        assert_eq!(buf, b"abcd");

        let mut cursor = Cursor::new(buf.as_slice());
        assert_eq!(read_fixed_string(&mut cursor, 4, "name").unwrap(), "abcd");
    }

    #[test]
    fn over_width_name_is_rejected() {
        let mut buf = Vec::new();
        let err = write_fixed_string(&mut buf, "abcde", 4).unwrap_err();
        assert!(matches!(err, Md3Error::FieldTooLong { width: 4, .. }));
        assert!(buf.is_empty());
    }

    #[test]
    fn short_read_reports_truncation() {
        let mut cursor = Cursor::new(&b"ab"[..]);
        assert!(matches!(
            read_fixed_string(&mut cursor, 4, "name"),
            Err(Md3Error::Malformed(_))
        ));
        assert!(matches!(read_i32(&mut cursor, "field"), Err(Md3Error::Malformed(_))));
    }

    #[test]
    fn negative_len_is_rejected() {
        let raw = (-1i32).to_le_bytes();
        let mut cursor = Cursor::new(&raw[..]);
        assert!(matches!(
            read_len(&mut cursor, "num_frames"),
            Err(Md3Error::Malformed(_))
        ));
    }
}
