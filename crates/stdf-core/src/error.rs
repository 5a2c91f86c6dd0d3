use thiserror::Error;

/// Errors produced by the frame reader, decoder, and parallel driver.
///
/// Per-frame variants (`UnknownRecord`, `ShortPayload`) never escape the
/// per-file pipeline loop; per-file variants (`NotBinary`, `Io`) never
/// escape the driver. See spec §7 for the propagation contract.
#[derive(Error, Debug)]
pub enum StdfError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no input files found under {0}")]
    InputNotFound(String),

    #[error("stream does not look like STDF (no NUL byte found in leading scan)")]
    NotBinary,

    #[error("unsupported or unrecognized (rec_typ={rec_typ}, rec_sub={rec_sub})")]
    UnknownRecord { rec_typ: u8, rec_sub: u8 },

    #[error("short payload: expected {expected} bytes, read {actual}")]
    ShortPayload { expected: usize, actual: usize },

    #[error("decode overrun in field '{field}' at offset {offset}")]
    DecodeOverrun { field: &'static str, offset: usize },

    #[error("worker failed on {path}: {reason}")]
    WorkerError { path: String, reason: String },
}
