//! Binary reading utilities for the STDF type codec (C1).

use crate::error::StdfError;
use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use std::io::Cursor;

/// Byte order of a single STDF file, fixed at open time (spec §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    Little,
    Big,
}

/// A cursor wrapper for reading binary data from a record payload.
///
/// Unlike a fixed-endianness reader, every primitive read takes the
/// file's detected [`Endianness`] explicitly, since STDF may be big- or
/// little-endian per file.
pub struct BinaryReader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> BinaryReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(data),
        }
    }

    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    pub fn remaining(&self) -> usize {
        let pos = self.cursor.position() as usize;
        let len = self.cursor.get_ref().len();
        if pos >= len {
            0
        } else {
            len - pos
        }
    }

    pub fn read_u8(&mut self) -> Result<u8, StdfError> {
        self.cursor.read_u8().map_err(StdfError::Io)
    }

    pub fn read_i8(&mut self) -> Result<i8, StdfError> {
        self.cursor.read_i8().map_err(StdfError::Io)
    }

    pub fn read_u16(&mut self, endian: Endianness) -> Result<u16, StdfError> {
        match endian {
            Endianness::Little => self.cursor.read_u16::<LittleEndian>(),
            Endianness::Big => self.cursor.read_u16::<BigEndian>(),
        }
        .map_err(StdfError::Io)
    }

    pub fn read_i16(&mut self, endian: Endianness) -> Result<i16, StdfError> {
        match endian {
            Endianness::Little => self.cursor.read_i16::<LittleEndian>(),
            Endianness::Big => self.cursor.read_i16::<BigEndian>(),
        }
        .map_err(StdfError::Io)
    }

    pub fn read_u32(&mut self, endian: Endianness) -> Result<u32, StdfError> {
        match endian {
            Endianness::Little => self.cursor.read_u32::<LittleEndian>(),
            Endianness::Big => self.cursor.read_u32::<BigEndian>(),
        }
        .map_err(StdfError::Io)
    }

    pub fn read_i32(&mut self, endian: Endianness) -> Result<i32, StdfError> {
        match endian {
            Endianness::Little => self.cursor.read_i32::<LittleEndian>(),
            Endianness::Big => self.cursor.read_i32::<BigEndian>(),
        }
        .map_err(StdfError::Io)
    }

    pub fn read_u64(&mut self, endian: Endianness) -> Result<u64, StdfError> {
        match endian {
            Endianness::Little => self.cursor.read_u64::<LittleEndian>(),
            Endianness::Big => self.cursor.read_u64::<BigEndian>(),
        }
        .map_err(StdfError::Io)
    }

    pub fn read_i64(&mut self, endian: Endianness) -> Result<i64, StdfError> {
        match endian {
            Endianness::Little => self.cursor.read_i64::<LittleEndian>(),
            Endianness::Big => self.cursor.read_i64::<BigEndian>(),
        }
        .map_err(StdfError::Io)
    }

    pub fn read_f32(&mut self, endian: Endianness) -> Result<f32, StdfError> {
        match endian {
            Endianness::Little => self.cursor.read_f32::<LittleEndian>(),
            Endianness::Big => self.cursor.read_f32::<BigEndian>(),
        }
        .map_err(StdfError::Io)
    }

    pub fn read_f64(&mut self, endian: Endianness) -> Result<f64, StdfError> {
        match endian {
            Endianness::Little => self.cursor.read_f64::<LittleEndian>(),
            Endianness::Big => self.cursor.read_f64::<BigEndian>(),
        }
        .map_err(StdfError::Io)
    }

    /// Read N bytes into a new Vec.
    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>, StdfError> {
        let pos = self.cursor.position() as usize;
        let data = self.cursor.get_ref();
        if pos + n > data.len() {
            return Err(StdfError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!(
                    "read_bytes: tried to read {} bytes at offset {}, but only {} available",
                    n,
                    pos,
                    data.len().saturating_sub(pos)
                ),
            )));
        }
        let result = data[pos..pos + n].to_vec();
        self.cursor.set_position((pos + n) as u64);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_primitives_little_endian() {
        let data: Vec<u8> = vec![0x01, 0xA1, 0x39, 0x00, 0x00, 0x00];
        let mut reader = BinaryReader::new(&data);
        assert_eq!(reader.read_u16(Endianness::Little).unwrap(), 0xA101);
        assert_eq!(reader.read_u32(Endianness::Little).unwrap(), 57);
    }

    #[test]
    fn test_read_primitives_big_endian() {
        let data: Vec<u8> = vec![0xA1, 0x01, 0x00, 0x00, 0x00, 0x39];
        let mut reader = BinaryReader::new(&data);
        assert_eq!(reader.read_u16(Endianness::Big).unwrap(), 0xA101);
        assert_eq!(reader.read_u32(Endianness::Big).unwrap(), 57);
    }

    #[test]
    fn test_read_bytes_out_of_range() {
        let data: Vec<u8> = vec![1, 2, 3];
        let mut reader = BinaryReader::new(&data);
        assert!(reader.read_bytes(10).is_err());
    }

    #[test]
    fn test_remaining() {
        let data: Vec<u8> = vec![0; 10];
        let mut reader = BinaryReader::new(&data);
        assert_eq!(reader.remaining(), 10);
        reader.read_bytes(4).unwrap();
        assert_eq!(reader.remaining(), 6);
    }
}
