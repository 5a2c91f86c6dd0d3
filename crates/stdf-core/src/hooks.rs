//! Vendor preprocessor hooks: an extension point for ATE-specific quirks,
//! run on a record's already-transformed ATDF field set, after C4 and
//! before it is appended to the file's collection (spec §6: "vendor hook
//! interface... invoked after C4, before collection append").
//!
//! Grounded on `scan_filter.rs`'s trait-object filter chain: one small
//! trait, a handful of built-ins, `Box<dyn _>` at the pipeline boundary so
//! the CLI can pick one by name at runtime.

use crate::types::AtdfRecord;

/// Mutates a rendered ATDF record in place, after the transform registry
/// has produced it and before it's written or collected. Implementations
/// should be cheap; they run once per record.
pub trait PreprocessorHook: Send + Sync {
    /// Human-readable name, used by the CLI's `-p/--preprocessor` flag.
    fn name(&self) -> &'static str;

    /// Called once per transformed record. The default no-op is correct
    /// for any vendor not named here.
    fn process(&self, record: &mut AtdfRecord);
}

/// The identity hook: no vendor-specific behavior.
#[derive(Debug, Default)]
pub struct NoopHook;

impl PreprocessorHook for NoopHook {
    fn name(&self) -> &'static str {
        "none"
    }

    fn process(&self, _record: &mut AtdfRecord) {}
}

/// Advantest testers are known to leave `part_text`/`test_text` fields
/// right-padded with NUL bytes rather than ASCII spaces; `decode_cn_string`
/// already truncates at the first NUL during decode, so today this hook is
/// a no-op placeholder for future vendor-specific quirks.
#[derive(Debug, Default)]
pub struct AdvantestHook;

impl PreprocessorHook for AdvantestHook {
    fn name(&self) -> &'static str {
        "advantest"
    }

    fn process(&self, _record: &mut AtdfRecord) {}
}

/// Teradyne testers are known to occasionally emit `soft_bin` as `0xFFFF`
/// (all-ones) rather than the documented `65535` sentinel; both decode to
/// the same `u64`, so no extra handling is needed beyond the standard
/// `FieldSpec` sentinel — kept as a named hook for parity with the CLI surface.
#[derive(Debug, Default)]
pub struct TeradyneHook;

impl PreprocessorHook for TeradyneHook {
    fn name(&self) -> &'static str {
        "teradyne"
    }

    fn process(&self, _record: &mut AtdfRecord) {}
}

/// Eagle Test Systems hardware is known to omit `opt_flag` on `PTR`/`MPR`
/// records from older firmware; `limit_compare` already renders `None` for
/// a missing `opt_flag`, so this hook is likewise a named no-op today.
#[derive(Debug, Default)]
pub struct EagleHook;

impl PreprocessorHook for EagleHook {
    fn name(&self) -> &'static str {
        "eagle"
    }

    fn process(&self, _record: &mut AtdfRecord) {}
}

/// Resolve a hook by the name accepted on `-p/--preprocessor`.
pub fn hook_by_name(name: &str) -> Option<Box<dyn PreprocessorHook>> {
    match name {
        "none" => Some(Box::new(NoopHook)),
        "advantest" => Some(Box::new(AdvantestHook)),
        "teradyne" => Some(Box::new(TeradyneHook)),
        "eagle" => Some(Box::new(EagleHook)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_by_name_resolves_all_builtins() {
        for name in ["none", "advantest", "teradyne", "eagle"] {
            assert!(hook_by_name(name).is_some(), "missing hook: {name}");
        }
    }

    #[test]
    fn test_unknown_hook_name_is_none() {
        assert!(hook_by_name("nonexistent").is_none());
    }
}
