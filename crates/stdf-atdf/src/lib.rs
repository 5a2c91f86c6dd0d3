//! ATDF field derivation (C4), textual serialization (C5), the per-file
//! conversion pipeline (C7), and the parallel multi-file driver (C8) built
//! on top of `stdf-core`'s binary codec.
//!
//! # Example
//!
//! ```no_run
//! use stdf_atdf::pipeline::run_file;
//! use stdf_core::{NoopHook, NoopLoader, RecordTypeMask};
//!
//! let collection = run_file(
//!     std::path::Path::new("lot42.stdf"),
//!     Some(std::path::Path::new("lot42.atdf")),
//!     &RecordTypeMask::All,
//!     &NoopHook,
//!     &NoopLoader,
//! )
//! .unwrap();
//! println!("{} records", collection.total_records());
//! ```

pub mod driver;
pub mod pipeline;
pub mod timestamp;
pub mod transform;
pub mod writer;

pub use driver::{convert_files, worker_count, FileResult};
pub use pipeline::{run_file, AtdfError};
pub use writer::{render_line, to_atdf_record};
