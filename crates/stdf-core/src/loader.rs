//! The relational-store collaborator: an interface for persisting a file's
//! decoded records somewhere other than an ATDF text file (spec §7).
//!
//! Grounded on `metadata.rs`'s sink trait (there, writing run metadata out
//! to a side channel after the main conversion); here generalized to the
//! full per-file `RecordCollection`.

use crate::types::RecordCollection;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("loader backend error: {0}")]
    Backend(String),
}

/// Persists a file's decoded, transformed records. Implementations own
/// their own connection/session lifecycle; `load` may be called once per
/// input file from multiple worker threads, so implementations must be
/// `Send + Sync` (spec §4.8: workers run concurrently against one loader).
pub trait Loader: Send + Sync {
    fn load(&self, source_path: &std::path::Path, records: &RecordCollection) -> Result<(), LoaderError>;
}

/// The default loader: does nothing. Used when no `-d/--database` target
/// is configured and only ATDF text output is requested.
#[derive(Debug, Default)]
pub struct NoopLoader;

impl Loader for NoopLoader {
    fn load(&self, _source_path: &std::path::Path, _records: &RecordCollection) -> Result<(), LoaderError> {
        Ok(())
    }
}
