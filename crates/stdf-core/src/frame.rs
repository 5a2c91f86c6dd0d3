//! C6: framing — turning a byte stream into a sequence of `(RecordType, payload)`
//! pairs, transparently unwrapping gzip and detecting per-file endianness.
//!
//! Reads the file fully into memory once (STDF files are rarely larger
//! than a few hundred MB), then walks it with plain offsets rather than
//! streaming reads (spec §9: "a flat byte buffer plus cursor, not an
//! incremental parser").

use crate::error::StdfError;
use crate::io_utils::{BinaryReader, Endianness};
use crate::record_type::RecordType;
use std::io::Read;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const FRAME_HEADER_LEN: usize = 4; // REC_LEN(U2) + REC_TYP(U1) + REC_SUB(U1)
const NUL_SCAN_WINDOW: usize = 256;

/// Load a file's bytes, transparently decompressing gzip (spec §4.6:
/// "input files may be gzip-compressed; detect via magic bytes, not extension").
pub fn load_bytes(path: &std::path::Path) -> Result<Vec<u8>, StdfError> {
    let raw = std::fs::read(path)?;
    if raw.len() >= 2 && raw[0..2] == GZIP_MAGIC {
        let mut decoder = flate2::read::GzDecoder::new(&raw[..]);
        let mut out = Vec::new();
        decoder.read_to_end(&mut out)?;
        Ok(out)
    } else {
        Ok(raw)
    }
}

/// One decoded frame: a record type and the payload bytes following its
/// 4-byte header.
pub struct Frame<'a> {
    pub record_type: Option<RecordType>,
    pub rec_typ: u8,
    pub rec_sub: u8,
    pub payload: &'a [u8],
}

/// Walks a byte buffer as a sequence of STDF frames.
pub struct FrameReader<'a> {
    data: &'a [u8],
    offset: usize,
    endian: Endianness,
}

impl<'a> FrameReader<'a> {
    /// Sanity-checks that the buffer looks like STDF at all, then detects
    /// endianness from the `CPU_TYPE` byte at offset 4 (spec §4.6).
    pub fn open(data: &'a [u8]) -> Result<Self, StdfError> {
        if data.len() < FRAME_HEADER_LEN {
            return Err(StdfError::NotBinary);
        }
        let scan_len = data.len().min(NUL_SCAN_WINDOW);
        if !data[..scan_len].contains(&0u8) {
            return Err(StdfError::NotBinary);
        }

        let endian = detect_endianness(data)?;
        Ok(Self { data, offset: 0, endian })
    }

    pub fn endianness(&self) -> Endianness {
        self.endian
    }
}

/// Byte offset 4 is the FAR record's `CPU_TYPE` field: `1` signals a file
/// written by a Sun/Motorola (big-endian) host, anything else little-endian
/// (spec §4.6/§6: "seek to byte offset 4, read one byte").
fn detect_endianness(data: &[u8]) -> Result<Endianness, StdfError> {
    match data.get(FRAME_HEADER_LEN) {
        Some(1) => Ok(Endianness::Big),
        Some(_) => Ok(Endianness::Little),
        None => Err(StdfError::NotBinary),
    }
}

impl<'a> Iterator for FrameReader<'a> {
    type Item = Result<Frame<'a>, StdfError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.data.len() {
            return None;
        }
        if self.data.len() - self.offset < FRAME_HEADER_LEN {
            self.offset = self.data.len();
            return Some(Err(StdfError::ShortPayload {
                expected: FRAME_HEADER_LEN,
                actual: self.data.len() - self.offset,
            }));
        }

        let mut reader = BinaryReader::new(&self.data[self.offset..]);
        let rec_len = match reader.read_u16(self.endian) {
            Ok(v) => v as usize,
            Err(e) => {
                self.offset = self.data.len();
                return Some(Err(e));
            }
        };
        let rec_typ = match reader.read_u8() {
            Ok(v) => v,
            Err(e) => {
                self.offset = self.data.len();
                return Some(Err(e));
            }
        };
        let rec_sub = match reader.read_u8() {
            Ok(v) => v,
            Err(e) => {
                self.offset = self.data.len();
                return Some(Err(e));
            }
        };

        let body_start = self.offset + FRAME_HEADER_LEN;
        let body_end = body_start + rec_len;
        if body_end > self.data.len() {
            let actual = self.data.len() - body_start;
            self.offset = self.data.len();
            return Some(Err(StdfError::ShortPayload { expected: rec_len, actual }));
        }

        let payload = &self.data[body_start..body_end];
        self.offset = body_end;
        Some(Ok(Frame {
            record_type: RecordType::from_wire(rec_typ, rec_sub),
            rec_typ,
            rec_sub,
            payload,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn far_frame(endian: Endianness) -> Vec<u8> {
        let mut buf = Vec::new();
        // cpu_type byte doubles as the endianness signal (byte offset 4):
        // 1 means big-endian, anything else little-endian.
        let cpu_type = match endian {
            Endianness::Big => 1u8,
            Endianness::Little => 4u8,
        };
        let body = [cpu_type, 2u8]; // cpu_type, stdf_ver
        match endian {
            Endianness::Little => buf.extend_from_slice(&(body.len() as u16).to_le_bytes()),
            Endianness::Big => buf.extend_from_slice(&(body.len() as u16).to_be_bytes()),
        }
        buf.push(0); // rec_typ
        buf.push(10); // rec_sub
        buf.extend_from_slice(&body);
        buf
    }

    #[test]
    fn test_open_detects_little_endian() {
        let data = far_frame(Endianness::Little);
        let reader = FrameReader::open(&data).unwrap();
        assert_eq!(reader.endianness(), Endianness::Little);
    }

    #[test]
    fn test_open_detects_big_endian() {
        let data = far_frame(Endianness::Big);
        let reader = FrameReader::open(&data).unwrap();
        assert_eq!(reader.endianness(), Endianness::Big);
    }

    #[test]
    fn test_open_rejects_non_stdf_input() {
        let data = b"hello world, this is plain text with no nul bytes".to_vec();
        assert!(matches!(FrameReader::open(&data), Err(StdfError::NotBinary)));
    }

    #[test]
    fn test_iterates_two_frames() {
        let mut data = far_frame(Endianness::Little);
        // second frame: PCR, 14-byte body
        let mut pcr = Vec::new();
        pcr.extend_from_slice(&14u16.to_le_bytes());
        pcr.push(1);
        pcr.push(30);
        pcr.extend_from_slice(&[0u8; 14]);
        data.extend_from_slice(&pcr);

        let reader = FrameReader::open(&data).unwrap();
        let frames: Vec<_> = reader.collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].record_type, Some(RecordType::Far));
        assert_eq!(frames[1].record_type, Some(RecordType::Pcr));
    }

    #[test]
    fn test_unknown_record_type_yields_none_but_does_not_abort() {
        let mut data = far_frame(Endianness::Little);
        let mut unknown = Vec::new();
        unknown.extend_from_slice(&2u16.to_le_bytes());
        unknown.push(200);
        unknown.push(200);
        unknown.extend_from_slice(&[0u8; 2]);
        data.extend_from_slice(&unknown);

        let reader = FrameReader::open(&data).unwrap();
        let frames: Vec<_> = reader.collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].record_type, None);
    }

    #[test]
    fn test_short_payload_reported() {
        let mut data = far_frame(Endianness::Little);
        data.extend_from_slice(&100u16.to_le_bytes());
        data.push(1);
        data.push(30);
        data.extend_from_slice(&[0u8; 3]); // much shorter than declared 100

        let reader = FrameReader::open(&data).unwrap();
        let results: Vec<_> = reader.collect();
        assert!(results[1].is_err());
    }
}
