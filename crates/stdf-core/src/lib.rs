//! Binary STDF record codec: framing, field templates, decoding, and the
//! vendor-hook/loader extension points shared by the ATDF transform layer.
//!
//! This crate provides:
//!
//! - The STDF primitive type alphabet (`U1`..`Vn`) and a declarative,
//!   per-record-type field template
//! - Gzip-transparent framing with per-file endianness detection
//! - A table-driven record decoder with sentinel normalization and
//!   bounded-overrun recovery
//! - `PreprocessorHook` and `Loader` extension traits for vendor quirks and
//!   external storage
//!
//! # Example
//!
//! ```no_run
//! use stdf_core::frame::{load_bytes, FrameReader};
//! use stdf_core::decoder::decode_record;
//!
//! let bytes = load_bytes(std::path::Path::new("sample.stdf")).unwrap();
//! let reader = FrameReader::open(&bytes).unwrap();
//! for frame in reader {
//!     let frame = frame.unwrap();
//!     if let Some(rt) = frame.record_type {
//!         let record = decode_record(rt, frame.payload, reader_endian(&bytes));
//!         println!("{:?}", record.record_type);
//!     }
//! }
//! # fn reader_endian(_b: &[u8]) -> stdf_core::io_utils::Endianness { stdf_core::io_utils::Endianness::Little }
//! ```

pub mod decoder;
pub mod error;
pub mod field_spec;
pub mod frame;
pub mod hooks;
pub mod io_utils;
pub mod loader;
pub mod primitive;
pub mod progress;
pub mod record_type;
pub mod templates;
pub mod types;

pub use error::StdfError;
pub use hooks::{hook_by_name, NoopHook, PreprocessorHook};
pub use loader::{Loader, LoaderError, NoopLoader};
pub use progress::{new_counter, ProgressCounter};
pub use record_type::RecordType;
pub use types::{AtdfRecord, FieldValue, FileContext, OrderedFields, RecordCollection, RecordTypeMask, StdfRecord};
