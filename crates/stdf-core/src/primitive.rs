//! C1: the STDF primitive type alphabet (spec §4.1).

use crate::error::StdfError;
use crate::io_utils::{BinaryReader, Endianness};
use crate::types::FieldValue;

/// The element type of one [`crate::field_spec::FieldSpec`]. For a
/// `kxTYPE` array field this is the type of one element; the array-ness
/// itself is carried on the field spec, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElemType {
    U1,
    U2,
    U4,
    U8,
    I1,
    I2,
    I4,
    I8,
    R4,
    R8,
    /// Fixed-length character string; byte length supplied externally (via
    /// `ref` for a normal field, or as the array count for an array of `Cn`).
    Cn,
    /// Variable-length string: leading `U1` length, then that many bytes.
    Cf,
    /// Raw bytes; byte length supplied externally via `ref`.
    Bn,
    /// Bit-field: leading `U2` bit-length, then `ceil(b/8)` bytes.
    Dn,
    /// Low 4 bits of a `U1`.
    Nibble,
    /// Binary string form of a `U1` (width 8).
    Bit,
    /// Tagged variant: leading `U1` tag selects a branch (GDR `GEN_DATA`).
    Vn,
}

/// Decode one value of `elem` from `data[offset..]`.
///
/// `len` is the externally-supplied length for `Cn`/`Bn` (byte count) — it
/// is `None` for self-describing types (`Cf`, `Dn`, `Vn`) and scalars.
/// Returns the decoded value and the new offset.
pub fn decode(
    elem: ElemType,
    data: &[u8],
    offset: usize,
    endian: Endianness,
    len: Option<usize>,
) -> Result<(FieldValue, usize), StdfError> {
    let slice = &data[offset..];
    let mut reader = BinaryReader::new(slice);
    let value = match elem {
        ElemType::U1 => FieldValue::U(reader.read_u8()? as u64),
        ElemType::U2 => FieldValue::U(reader.read_u16(endian)? as u64),
        ElemType::U4 => FieldValue::U(reader.read_u32(endian)? as u64),
        ElemType::U8 => FieldValue::U(reader.read_u64(endian)?),
        ElemType::I1 => FieldValue::I(reader.read_i8()? as i64),
        ElemType::I2 => FieldValue::I(reader.read_i16(endian)? as i64),
        ElemType::I4 => FieldValue::I(reader.read_i32(endian)? as i64),
        ElemType::I8 => FieldValue::I(reader.read_i64(endian)?),
        ElemType::R4 => FieldValue::F(reader.read_f32(endian)? as f64),
        ElemType::R8 => FieldValue::F(reader.read_f64(endian)?),
        ElemType::Cn => {
            let n = len.unwrap_or(0);
            let bytes = reader.read_bytes(n)?;
            FieldValue::Str(decode_cn_string(&bytes))
        }
        ElemType::Cf => {
            let n = reader.read_u8()? as usize;
            let bytes = reader.read_bytes(n)?;
            FieldValue::Str(decode_cn_string(&bytes))
        }
        ElemType::Bn => {
            let n = len.unwrap_or(0);
            let bytes = reader.read_bytes(n)?;
            FieldValue::Bytes(bytes)
        }
        ElemType::Dn => {
            let bit_len = reader.read_u16(endian)? as usize;
            let byte_len = bit_len.div_ceil(8);
            let bytes = reader.read_bytes(byte_len)?;
            FieldValue::BitString(bytes_to_bit_string(&bytes, bit_len))
        }
        ElemType::Nibble => {
            let byte = reader.read_u8()?;
            FieldValue::U((byte & 0x0F) as u64)
        }
        ElemType::Bit => {
            let byte = reader.read_u8()?;
            FieldValue::BitString(bytes_to_bit_string(&[byte], 8))
        }
        ElemType::Vn => return decode_variant(slice, offset, endian),
    };
    let consumed = reader.position() as usize;
    Ok((value, offset + consumed))
}

/// `Cn` strings retain trailing spaces (spec §4.1); only a NUL terminator,
/// when present, truncates the string.
fn decode_cn_string(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    match text.find('\0') {
        Some(pos) => text[..pos].to_string(),
        None => text.into_owned(),
    }
}

/// Render `byte_len` bytes as a big-endian binary string of exactly `bit_len` bits.
fn bytes_to_bit_string(bytes: &[u8], bit_len: usize) -> String {
    let mut s = String::with_capacity(bit_len);
    for byte in bytes {
        s.push_str(&format!("{:08b}", byte));
    }
    s.truncate(bit_len);
    s
}

/// GDR `Vn` variant type codes (STDF V4 §Generic Data Record).
mod vn_codes {
    pub const B0: u8 = 0;
    pub const U1: u8 = 1;
    pub const U2: u8 = 2;
    pub const U4: u8 = 3;
    pub const I1: u8 = 4;
    pub const I2: u8 = 5;
    pub const I4: u8 = 6;
    pub const R4: u8 = 7;
    pub const R8: u8 = 8;
    pub const CN: u8 = 10;
    pub const BN: u8 = 11;
    pub const DN: u8 = 12;
    pub const N1: u8 = 13;
}

/// Decode one `Vn` tagged variant: a leading `U1` tag selects the branch.
/// `B0` (no data) still advances the cursor past the tag only.
fn decode_variant(
    data: &[u8],
    offset: usize,
    endian: Endianness,
) -> Result<(FieldValue, usize), StdfError> {
    let mut reader = BinaryReader::new(data);
    let tag = reader.read_u8()?;
    let after_tag = offset + 1;
    match tag {
        vn_codes::B0 => Ok((FieldValue::None, after_tag)),
        vn_codes::U1 => decode(ElemType::U1, data, 1, endian, None).map(|(v, o)| (v, offset + o)),
        vn_codes::U2 => decode(ElemType::U2, data, 1, endian, None).map(|(v, o)| (v, offset + o)),
        vn_codes::U4 => decode(ElemType::U4, data, 1, endian, None).map(|(v, o)| (v, offset + o)),
        vn_codes::I1 => decode(ElemType::I1, data, 1, endian, None).map(|(v, o)| (v, offset + o)),
        vn_codes::I2 => decode(ElemType::I2, data, 1, endian, None).map(|(v, o)| (v, offset + o)),
        vn_codes::I4 => decode(ElemType::I4, data, 1, endian, None).map(|(v, o)| (v, offset + o)),
        vn_codes::R4 => decode(ElemType::R4, data, 1, endian, None).map(|(v, o)| (v, offset + o)),
        vn_codes::R8 => decode(ElemType::R8, data, 1, endian, None).map(|(v, o)| (v, offset + o)),
        vn_codes::CN => decode(ElemType::Cf, data, 1, endian, None).map(|(v, o)| (v, offset + o)),
        vn_codes::BN => {
            let mut inner = BinaryReader::new(&data[1..]);
            let n = inner.read_u8()? as usize;
            decode(ElemType::Bn, data, 2, endian, Some(n)).map(|(v, o)| (v, offset + o))
        }
        vn_codes::DN => decode(ElemType::Dn, data, 1, endian, None).map(|(v, o)| (v, offset + o)),
        vn_codes::N1 => decode(ElemType::Nibble, data, 1, endian, None).map(|(v, o)| (v, offset + o)),
        _ => Ok((FieldValue::None, after_tag)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_u2_little_endian() {
        let data = [0x02, 0x04];
        let (v, off) = decode(ElemType::U2, &data, 0, Endianness::Little, None).unwrap();
        assert_eq!(v, FieldValue::U(0x0402));
        assert_eq!(off, 2);
    }

    #[test]
    fn test_decode_u2_big_endian() {
        let data = [0x02, 0x04];
        let (v, off) = decode(ElemType::U2, &data, 0, Endianness::Big, None).unwrap();
        assert_eq!(v, FieldValue::U(0x0204));
        assert_eq!(off, 2);
    }

    #[test]
    fn test_decode_cn_retains_trailing_spaces() {
        let data = b"ab  ";
        let (v, off) = decode(ElemType::Cn, data, 0, Endianness::Little, Some(4)).unwrap();
        assert_eq!(v, FieldValue::Str("ab  ".to_string()));
        assert_eq!(off, 4);
    }

    #[test]
    fn test_decode_cf_variable_length() {
        let data = [3u8, b'a', b'b', b'c', 0xFF];
        let (v, off) = decode(ElemType::Cf, &data, 0, Endianness::Little, None).unwrap();
        assert_eq!(v, FieldValue::Str("abc".to_string()));
        assert_eq!(off, 4);
    }

    #[test]
    fn test_decode_bn_raw_bytes() {
        let data = [0xDE, 0xAD, 0xBE, 0xEF];
        let (v, off) = decode(ElemType::Bn, &data, 0, Endianness::Little, Some(4)).unwrap();
        assert_eq!(v, FieldValue::Bytes(vec![0xDE, 0xAD, 0xBE, 0xEF]));
        assert_eq!(off, 4);
    }

    #[test]
    fn test_decode_dn_bitfield() {
        // bit_len=12 (U2 LE = 0x0C, 0x00), then ceil(12/8)=2 bytes
        let data = [0x0C, 0x00, 0b1010_0000, 0b1111_0000];
        let (v, off) = decode(ElemType::Dn, &data, 0, Endianness::Little, None).unwrap();
        assert_eq!(v, FieldValue::BitString("101000001111".to_string()));
        assert_eq!(off, 4);
    }

    #[test]
    fn test_decode_nibble() {
        let data = [0b1010_0110];
        let (v, _) = decode(ElemType::Nibble, &data, 0, Endianness::Little, None).unwrap();
        assert_eq!(v, FieldValue::U(0b0110));
    }

    #[test]
    fn test_decode_bit() {
        let data = [0b0000_0101];
        let (v, _) = decode(ElemType::Bit, &data, 0, Endianness::Little, None).unwrap();
        assert_eq!(v, FieldValue::BitString("00000101".to_string()));
    }

    #[test]
    fn test_decode_vn_b0_advances_one_byte() {
        let data = [vn_codes::B0, 0xFF, 0xFF];
        let (v, off) = decode(ElemType::Vn, &data, 0, Endianness::Little, None).unwrap();
        assert_eq!(v, FieldValue::None);
        assert_eq!(off, 1);
    }

    #[test]
    fn test_decode_vn_u4() {
        let data = [vn_codes::U4, 0x39, 0x00, 0x00, 0x00];
        let (v, off) = decode(ElemType::Vn, &data, 0, Endianness::Little, None).unwrap();
        assert_eq!(v, FieldValue::U(57));
        assert_eq!(off, 5);
    }

    #[test]
    fn test_decode_vn_cn() {
        let data = [vn_codes::CN, 3, b'x', b'y', b'z'];
        let (v, off) = decode(ElemType::Vn, &data, 0, Endianness::Little, None).unwrap();
        assert_eq!(v, FieldValue::Str("xyz".to_string()));
        assert_eq!(off, 5);
    }

    #[test]
    fn test_overrun_reported_as_io_error() {
        let data = [0x01];
        let result = decode(ElemType::U4, &data, 0, Endianness::Little, None);
        assert!(result.is_err());
    }
}
