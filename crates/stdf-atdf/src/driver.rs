//! C8: the parallel multi-file driver — sizes a worker pool from CPU
//! count, available memory, file count, and an optional user cap, then
//! converts every file through [`crate::pipeline::run_file`] concurrently
//! (spec §4.8).
//!
//! Grounded on `batch.rs`'s folder-conversion pattern: a `rayon` thread
//! pool sized once up front, `par_iter` over the file list, one atomic
//! [`stdf_core::ProgressCounter`] ticked per completed file — threads,
//! not subprocesses, to keep per-file overhead low (spec §9 Design Notes).

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use stdf_core::loader::Loader;
use stdf_core::{hook_by_name, NoopHook, ProgressCounter, RecordTypeMask};

use crate::pipeline::{self, AtdfError};

/// Bytes of available memory budgeted per concurrent worker: twice the
/// 500 MiB a worst-case in-memory STDF buffer plus its decoded records
/// might hold (spec §4.8/§5), so this bounds how many can be in flight at
/// once on memory-constrained machines.
const MEMORY_PER_WORKER_BYTES: u64 = 2 * 500 * 1024 * 1024;

/// Hard ceiling on worker threads regardless of CPU/memory/file count
/// (spec §4.8): past this, per-worker coordination overhead outweighs the
/// parallelism gained.
const MAX_WORKERS: usize = 8;

/// Choose a worker count from CPU count (minus a quarter reserved for the
/// rest of the system), available memory, the number of files to process,
/// a hard cap, and an optional user cap — never more threads than there is
/// useful work, memory, or a ceiling for.
pub fn worker_count(file_count: usize, user_cap: Option<usize>) -> usize {
    let cpu = num_cpus::get();
    let cpu_reserve = (cpu / 4).max(1);
    let cpu_budget = cpu.saturating_sub(cpu_reserve).max(1);

    let mut sys = sysinfo::System::new();
    sys.refresh_memory();
    let mem_workers = (sys.available_memory() / MEMORY_PER_WORKER_BYTES).max(1) as usize;

    let mut n = cpu_budget.min(mem_workers).min(file_count.max(1)).min(MAX_WORKERS);
    if let Some(cap) = user_cap {
        n = n.min(cap.max(1));
    }
    n.max(1)
}

/// The outcome of converting one input file.
pub struct FileResult {
    pub path: PathBuf,
    pub outcome: Result<stdf_core::types::RecordCollection, AtdfError>,
}

/// Convert every file in `paths`, writing `<stem>.atdf` into `output_dir`
/// when given, using `workers` threads. `hook_name` selects a vendor
/// preprocessor by the same name accepted on `-p/--preprocessor`.
pub fn convert_files(
    paths: &[PathBuf],
    output_dir: Option<&Path>,
    mask: &RecordTypeMask,
    hook_name: &str,
    loader: &dyn Loader,
    workers: usize,
    counter: Option<&ProgressCounter>,
) -> Vec<FileResult> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .expect("failed to build worker pool");

    pool.install(|| {
        paths
            .par_iter()
            .map(|path| {
                let hook = hook_by_name(hook_name).unwrap_or_else(|| Box::new(NoopHook));
                let atdf_path = output_dir.map(|dir| {
                    let stem = path.file_stem().unwrap_or_default();
                    dir.join(stem).with_extension("atdf")
                });
                let outcome =
                    pipeline::run_file(path, atdf_path.as_deref(), mask, hook.as_ref(), loader);
                if let Some(c) = counter {
                    stdf_core::progress::tick(c);
                }
                FileResult { path: path.clone(), outcome }
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_count_never_exceeds_file_count() {
        let n = worker_count(1, None);
        assert_eq!(n, 1);
    }

    #[test]
    fn test_worker_count_respects_user_cap() {
        let n = worker_count(1000, Some(2));
        assert!(n <= 2);
    }

    #[test]
    fn test_worker_count_is_never_zero() {
        assert!(worker_count(0, None) >= 1);
    }

    #[test]
    fn test_worker_count_never_exceeds_hard_cap() {
        assert!(worker_count(10_000, None) <= MAX_WORKERS);
    }
}
