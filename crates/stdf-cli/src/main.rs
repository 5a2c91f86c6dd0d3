use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use stdf_core::loader::{Loader, NoopLoader};
use stdf_core::record_type::RecordType;
use stdf_core::types::RecordTypeMask;
use stdf_core::StdfError;

mod sqlite_loader;
use sqlite_loader::SqliteLoader;

/// Convert semiconductor test-data files from binary STDF to textual ATDF.
#[derive(Parser)]
#[command(name = "stdf-cli", about = "Convert STDF files to ATDF")]
struct Cli {
    /// Input STDF file, or a directory to convert recursively.
    input: PathBuf,

    /// Output ATDF file (single-file input) or directory (directory input).
    /// Defaults to alongside the input.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// SQLite database to load every converted record into, in addition to
    /// (or instead of) writing ATDF text.
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Restrict conversion to these record types (e.g. -r PTR -r PRR).
    /// Converts every record type when omitted.
    #[arg(short, long)]
    records: Vec<String>,

    /// Number of worker threads for directory conversion. Sized
    /// automatically from CPU count, available memory, and file count
    /// when omitted.
    #[arg(short, long)]
    workers: Option<usize>,

    /// Vendor preprocessor hook: none, advantest, teradyne, eagle.
    #[arg(short, long, default_value = "none")]
    preprocessor: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mask = build_mask(&cli.records)?;
    if stdf_core::hook_by_name(&cli.preprocessor).is_none() {
        bail!("unknown preprocessor '{}' (expected none, advantest, teradyne, or eagle)", cli.preprocessor);
    }

    let loader: Box<dyn Loader> = match &cli.database {
        Some(path) => Box::new(SqliteLoader::open(path).context("opening database")?),
        None => Box::new(NoopLoader),
    };

    if cli.input.is_file() {
        convert_single_file(&cli, &mask, loader.as_ref())
    } else if cli.input.is_dir() {
        convert_directory(&cli, &mask, loader.as_ref())
    } else {
        bail!("input path does not exist: {}", cli.input.display());
    }
}

fn convert_single_file(cli: &Cli, mask: &RecordTypeMask, loader: &dyn Loader) -> Result<()> {
    let output_path = cli.output.clone().unwrap_or_else(|| cli.input.with_extension("atdf"));
    let hook = stdf_core::hook_by_name(&cli.preprocessor).expect("validated above");

    let collection = stdf_atdf::run_file(&cli.input, Some(&output_path), mask, hook.as_ref(), loader)
        .with_context(|| format!("converting {}", cli.input.display()))?;

    println!(
        "{}: {} records -> {}",
        cli.input.display(),
        collection.total_records(),
        output_path.display()
    );
    Ok(())
}

fn convert_directory(cli: &Cli, mask: &RecordTypeMask, loader: &dyn Loader) -> Result<()> {
    let files = discover_files(&cli.input)?;
    let output_dir = cli.output.clone().unwrap_or_else(|| cli.input.clone());
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;

    let workers = stdf_atdf::worker_count(files.len(), cli.workers);
    log::info!("converting {} files with {} workers", files.len(), workers);

    let (counter, done, handle) = spawn_progress_bar(files.len() as u64, "Converting");
    let results = stdf_atdf::convert_files(
        &files,
        Some(&output_dir),
        mask,
        &cli.preprocessor,
        loader,
        workers,
        Some(&counter),
    );
    done.store(true, Ordering::Relaxed);
    let _ = handle.join();

    let mut total_records = 0usize;
    let mut failures = 0usize;
    for result in &results {
        match &result.outcome {
            Ok(collection) => total_records += collection.total_records(),
            Err(e) => {
                failures += 1;
                eprintln!("{}: {}", result.path.display(), e);
            }
        }
    }

    println!(
        "converted {} files ({} records total, {} failed)",
        results.len(),
        total_records,
        failures
    );
    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// Recursively collects files under `root` whose name looks like an STDF
/// file (`.stdf`/`.std`, optionally gzip-compressed).
fn discover_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in std::fs::read_dir(&dir).with_context(|| format!("reading {}", dir.display()))? {
            let path = entry?.path();
            if path.is_dir() {
                stack.push(path);
            } else if is_stdf_like(&path) {
                files.push(path);
            }
        }
    }
    if files.is_empty() {
        return Err(StdfError::InputNotFound(root.display().to_string()).into());
    }
    files.sort();
    Ok(files)
}

fn is_stdf_like(path: &Path) -> bool {
    let name = path.to_string_lossy().to_lowercase();
    name.ends_with(".stdf") || name.ends_with(".std") || name.ends_with(".stdf.gz") || name.ends_with(".std.gz")
}

fn build_mask(records: &[String]) -> Result<RecordTypeMask> {
    if records.is_empty() {
        return Ok(RecordTypeMask::All);
    }
    let mut set = HashSet::new();
    for name in records {
        let rt: RecordType = name
            .parse()
            .map_err(|_| anyhow::anyhow!("unknown record type: {name}"))?;
        set.insert(rt);
    }
    Ok(RecordTypeMask::Only(set))
}

/// Spawn a progress bar backed by an atomic counter.
///
/// Returns `(counter, done_flag, handle)`. The caller increments `counter`
/// from worker threads; a background thread polls it every 50ms to update
/// the bar. Set `done_flag` to `true` and join the returned handle to
/// finish cleanly.
fn spawn_progress_bar(
    total: u64,
    msg: &str,
) -> (stdf_core::ProgressCounter, Arc<AtomicBool>, std::thread::JoinHandle<()>) {
    let counter = stdf_core::new_counter();
    let done = Arc::new(AtomicBool::new(false));

    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap()
            .progress_chars("=> "),
    );
    bar.set_message(msg.to_string());

    let counter_clone = Arc::clone(&counter);
    let done_clone = Arc::clone(&done);
    let handle = std::thread::spawn(move || {
        while !done_clone.load(Ordering::Relaxed) {
            bar.set_position(counter_clone.load(Ordering::Relaxed));
            std::thread::sleep(std::time::Duration::from_millis(50));
        }
        bar.set_position(counter_clone.load(Ordering::Relaxed));
        bar.finish();
    });

    (counter, done, handle)
}
