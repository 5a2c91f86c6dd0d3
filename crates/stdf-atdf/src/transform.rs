//! C4: the `(atdf_field, record_type) -> FieldValue` transform registry.
//!
//! Grounded on `cv.rs`'s lookup-table dispatch (there, a vocabulary key
//! maps to a rendering rule; here, an ATDF field name maps to a derivation
//! rule) — a single `match`, not a trait per transform, since the set of
//! transforms is closed and known at compile time.

use stdf_core::field_spec::AtdfSource;
use stdf_core::record_type::RecordType;
use stdf_core::templates::atdf_template;
use stdf_core::types::{FieldValue, StdfRecord};

use crate::timestamp;

/// Record types/field names that carry an epoch-seconds timestamp to be
/// rendered as `HH:MM:SS DD-MON-YYYY` (spec §4.5).
const TIMESTAMP_FIELDS: &[&str] = &[
    "modification_timestamp",
    "setup_time",
    "start_time",
    "finish_time",
];

/// Resolve one ATDF field's value for a decoded record.
pub fn resolve(record: &StdfRecord, field: &stdf_core::field_spec::AtdfFieldSpec) -> FieldValue {
    if TIMESTAMP_FIELDS.contains(&field.name) {
        if let AtdfSource::Field(source) = field.source {
            return match record.fields.get(source).and_then(FieldValue::as_u64) {
                Some(secs) => FieldValue::Str(timestamp::format_epoch(secs)),
                None => FieldValue::None,
            };
        }
    }

    match (record.record_type, field.name) {
        (RecordType::Far, "data_file_type") => FieldValue::Str("A".to_string()),
        (RecordType::Far, "atdf_version") => FieldValue::Str("2".to_string()),

        (RecordType::Ptr, "pass_fail_flag") | (RecordType::Mpr, "pass_fail_flag") => {
            pass_fail_flag(record)
        }
        (RecordType::Ftr, "pass_fail_flag") => ftr_pass_fail_flag(record),

        (RecordType::Ptr, "alarm_flags") | (RecordType::Mpr, "alarm_flags") => alarm_flags(record),
        (RecordType::Ftr, "alarm_flags") => ftr_alarm_flags(record),

        (RecordType::Ptr, "limit_compare") | (RecordType::Mpr, "limit_compare") => {
            limit_compare(record)
        }

        (RecordType::Ftr, "relative_address") => match record
            .fields
            .get("rel_vadr")
            .and_then(FieldValue::as_u64)
        {
            Some(v) => FieldValue::Str(format!("{v:x}")),
            None => FieldValue::None,
        },

        (RecordType::Plr, "mode_array") => plr_mode_array(record),
        (RecordType::Plr, "radix_array") => plr_radix_array(record),
        (RecordType::Plr, "programmed_state") => plr_state(record, "pgm_char", "pgm_chal"),
        (RecordType::Plr, "returned_state") => plr_state(record, "rtn_char", "rtn_chal"),

        (RecordType::Prr, "pass_fail_code") => prr_pass_fail_code(record),
        (RecordType::Prr, "retest_code") => prr_retest_code(record),
        (RecordType::Prr, "abort_code") => prr_abort_code(record),

        (RecordType::Pcr, "head_number")
        | (RecordType::Hbr, "head_number")
        | (RecordType::Sbr, "head_number")
        | (RecordType::Tsr, "head_number")
        | (RecordType::Pcr, "site_number")
        | (RecordType::Hbr, "site_number")
        | (RecordType::Sbr, "site_number")
        | (RecordType::Tsr, "site_number") => head_or_site_number(record, field),

        (RecordType::Gdr, "generic_data") => generic_data(record),

        _ => default_passthrough(record, field.source),
    }
}

fn bits(record: &StdfRecord, name: &str) -> Option<u8> {
    record.fields.get(name).and_then(FieldValue::as_u64).map(|v| v as u8)
}

/// `test_flg` bit 6: no pass/fail indication (`None`). Bit 7: fail (only
/// meaningful when bit 6 is clear). `parm_flg` bit 5: scale error, which
/// overrides a clean pass to `"A"`. PTR/MPR only — FTR has no `parm_flg`
/// and uses [`ftr_pass_fail_flag`] instead.
fn pass_fail_flag(record: &StdfRecord) -> FieldValue {
    let Some(t) = bits(record, "test_flg") else {
        return FieldValue::None;
    };
    let p = bits(record, "parm_flg").unwrap_or(0);
    if t & 0x40 != 0 {
        FieldValue::Str("F".to_string())
    } else if t & 0x80 != 0 {
        FieldValue::None
    } else {
        FieldValue::Str(if p & 0x20 != 0 { "A" } else { "P" }.to_string())
    }
}

/// FTR's `test_flg` bit 6: fail outright. Bit 7 (checked only when bit 6 is
/// clear): fail; otherwise pass. No "no indication" or scale-error case —
/// FTR carries no `parm_flg`.
fn ftr_pass_fail_flag(record: &StdfRecord) -> FieldValue {
    match bits(record, "test_flg") {
        None => FieldValue::None,
        Some(t) if t & 0x40 != 0 => FieldValue::Str("F".to_string()),
        Some(t) => FieldValue::Str(if t & 0x80 != 0 { "F" } else { "P" }.to_string()),
    }
}

/// Concatenates single-letter alarm codes from `test_flg` (Alarm,
/// uNreliable, Timeout, Unreliable, aXis/oscillation) and `parm_flg`
/// (Drift, Hi/Lo limit, Out-of-range, Scale error). Empty string (not
/// `None`) when no alarm bit is set — the record was read cleanly. PTR/MPR
/// only — FTR has no `parm_flg` and uses [`ftr_alarm_flags`] instead.
fn alarm_flags(record: &StdfRecord) -> FieldValue {
    let t = bits(record, "test_flg").unwrap_or(0);
    let p = bits(record, "parm_flg").unwrap_or(0);
    let mut flags = String::new();
    if t & 0x01 != 0 {
        flags.push('A');
    }
    if p & 0x02 != 0 {
        flags.push('D');
    }
    if p & 0x08 != 0 {
        flags.push('H');
    }
    if p & 0x10 != 0 {
        flags.push('L');
    }
    if t & 0x10 != 0 {
        flags.push('N');
    }
    if p & 0x04 != 0 {
        flags.push('O');
    }
    if p & 0x01 != 0 {
        flags.push('S');
    }
    if t & 0x08 != 0 {
        flags.push('T');
    }
    if t & 0x04 != 0 {
        flags.push('U');
    }
    if t & 0x20 != 0 {
        flags.push('X');
    }
    FieldValue::Str(flags)
}

/// FTR's single-byte alarm dict: `test_flg` only, five letters.
fn ftr_alarm_flags(record: &StdfRecord) -> FieldValue {
    let t = bits(record, "test_flg").unwrap_or(0);
    let mut flags = String::new();
    if t & 0x01 != 0 {
        flags.push('A');
    }
    if t & 0x10 != 0 {
        flags.push('N');
    }
    if t & 0x08 != 0 {
        flags.push('T');
    }
    if t & 0x04 != 0 {
        flags.push('U');
    }
    if t & 0x20 != 0 {
        flags.push('X');
    }
    FieldValue::Str(flags)
}

/// `opt_flag` bit 6/7: whether the low/high limit is compared at all.
/// `"L"`/`"H"` concatenated for whichever side applies; `None` if neither.
fn limit_compare(record: &StdfRecord) -> FieldValue {
    match bits(record, "opt_flag") {
        None => FieldValue::None,
        Some(o) => {
            let mut s = String::new();
            if o & 0x40 != 0 {
                s.push('L');
            }
            if o & 0x80 != 0 {
                s.push('H');
            }
            if s.is_empty() {
                FieldValue::None
            } else {
                FieldValue::Str(s)
            }
        }
    }
}

/// PLR `grp_mode`: each group's mode rendered as lowercase hex, comma-joined.
fn plr_mode_array(record: &StdfRecord) -> FieldValue {
    match record.fields.get("grp_mode") {
        Some(FieldValue::Array(items)) => {
            let rendered: Vec<String> = items
                .iter()
                .map(|v| format!("{:x}", v.as_u64().unwrap_or(0)))
                .collect();
            FieldValue::Str(rendered.join(","))
        }
        _ => FieldValue::None,
    }
}

/// PLR `grp_radx`: each group's radix mapped to its letter code
/// (`2`->`B`, `8`->`O`, `10`->`D`, `16`->`H`, `20`->`S`). `None` when every
/// group is radix `0` (no radix declared for this PLR).
fn plr_radix_array(record: &StdfRecord) -> FieldValue {
    let Some(FieldValue::Array(items)) = record.fields.get("grp_radx") else {
        return FieldValue::None;
    };
    let values: Vec<u64> = items.iter().map(|v| v.as_u64().unwrap_or(0)).collect();
    if values.iter().all(|&v| v == 0) {
        return FieldValue::None;
    }
    let letters: Option<Vec<&str>> = values
        .iter()
        .map(|v| match v {
            2 => Some("B"),
            8 => Some("O"),
            10 => Some("D"),
            16 => Some("H"),
            20 => Some("S"),
            _ => None,
        })
        .collect();
    match letters {
        Some(letters) => FieldValue::Str(letters.join(",")),
        None => FieldValue::None,
    }
}

/// Pairs two parallel per-group character strings. Each group's string is
/// walked character-by-character: a space is dropped, non-space characters
/// from the two inputs are concatenated, and the per-character results are
/// comma-joined within a group; groups themselves are `/`-joined.
fn plr_state(record: &StdfRecord, chars: &str, chal: &str) -> FieldValue {
    let a = record.fields.get(chars).and_then(as_str_array);
    let b = record.fields.get(chal).and_then(as_str_array);
    let groups: Vec<String> = match (a, b) {
        (Some(a), Some(b)) => a.iter().zip(b.iter()).map(|(x, y)| zip_group(x, y)).collect(),
        (Some(a), None) => a.iter().map(|g| strip_group(g)).collect(),
        (None, Some(b)) => b.iter().map(|g| strip_group(g)).collect(),
        (None, None) => return FieldValue::None,
    };
    FieldValue::Str(groups.join("/"))
}

fn as_str_array(value: &FieldValue) -> Option<Vec<String>> {
    match value {
        FieldValue::Array(items) => Some(items.iter().map(FieldValue::render).collect()),
        _ => None,
    }
}

fn strip_group(group: &str) -> String {
    group
        .chars()
        .map(|c| if c == ' ' { String::new() } else { c.to_string() })
        .collect::<Vec<_>>()
        .join(",")
}

fn zip_group(a: &str, b: &str) -> String {
    a.chars()
        .zip(b.chars())
        .map(|(x, y)| {
            let xs = if x == ' ' { String::new() } else { x.to_string() };
            let ys = if y == ' ' { String::new() } else { y.to_string() };
            format!("{xs}{ys}")
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// `part_flg` bit 4: no pass/fail indication (checked first — this wins
/// over bit 3). Bit 3 (checked only when bit 4 is clear): fail; otherwise
/// pass.
fn prr_pass_fail_code(record: &StdfRecord) -> FieldValue {
    match bits(record, "part_flg") {
        None => FieldValue::None,
        Some(p) => {
            let bit3 = (p >> 3) & 1;
            let bit4 = (p >> 4) & 1;
            let code = if bit4 == 0 {
                if bit3 == 0 {
                    "P"
                } else {
                    "F"
                }
            } else {
                "F"
            };
            FieldValue::Str(code.to_string())
        }
    }
}

/// `part_flg` bits 0-1: `01` incomplete (`"I"`), `10` aborted-and-retested
/// (`"C"`), `00`/`11` no retest information (`None`).
fn prr_retest_code(record: &StdfRecord) -> FieldValue {
    match bits(record, "part_flg") {
        None => FieldValue::None,
        Some(p) => {
            let bit0 = p & 1;
            let bit1 = (p >> 1) & 1;
            match (bit1, bit0) {
                (0, 1) => FieldValue::Str("I".to_string()),
                (1, 0) => FieldValue::Str("C".to_string()),
                _ => FieldValue::None,
            }
        }
    }
}

/// `part_flg` bit 2: part was aborted mid-test.
fn prr_abort_code(record: &StdfRecord) -> FieldValue {
    match bits(record, "part_flg") {
        None => FieldValue::None,
        Some(p) if p & 0x04 != 0 => FieldValue::Str("Y".to_string()),
        Some(_) => FieldValue::None,
    }
}

/// Spec §3 invariant 6 / §4.4: `255` in a head/site identifier is already
/// normalized to `None` at decode time (`FieldSpec::sentinel`); this entry
/// exists so PCR/HBR/SBR/TSR's head_number/site_number are explicitly
/// registered transforms rather than falling through to the generic default.
fn head_or_site_number(record: &StdfRecord, field: &stdf_core::field_spec::AtdfFieldSpec) -> FieldValue {
    default_passthrough(record, field.source)
}

/// `GEN_DATA`'s `Vn` array, rendered as a pipe-joined list of values.
fn generic_data(record: &StdfRecord) -> FieldValue {
    match record.fields.get("gen_data") {
        Some(FieldValue::Array(items)) => {
            FieldValue::Str(items.iter().map(FieldValue::render).collect::<Vec<_>>().join("|"))
        }
        _ => FieldValue::None,
    }
}

fn default_passthrough(record: &StdfRecord, source: AtdfSource) -> FieldValue {
    match source {
        AtdfSource::Field(name) => record.fields.get(name).cloned().unwrap_or(FieldValue::None),
        AtdfSource::Pair(a, b) => {
            let a = record.fields.get(a).map(FieldValue::render).unwrap_or_default();
            let b = record.fields.get(b).map(FieldValue::render).unwrap_or_default();
            FieldValue::Str(format!("{a},{b}"))
        }
        AtdfSource::None => FieldValue::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stdf_core::types::OrderedFields;

    fn record_with(rt: RecordType, fields: &[(&'static str, FieldValue)]) -> StdfRecord {
        let mut f = OrderedFields::new();
        for (name, value) in fields {
            f.push(name, value.clone());
        }
        StdfRecord { record_type: rt, fields: f }
    }

    #[test]
    fn test_pass_fail_flag_pass() {
        let rec = record_with(
            RecordType::Ptr,
            &[("test_flg", FieldValue::U(0)), ("parm_flg", FieldValue::U(0))],
        );
        assert_eq!(pass_fail_flag(&rec), FieldValue::Str("P".to_string()));
    }

    #[test]
    fn test_pass_fail_flag_fail() {
        let rec = record_with(
            RecordType::Ptr,
            &[("test_flg", FieldValue::U(0x40)), ("parm_flg", FieldValue::U(0))],
        );
        assert_eq!(pass_fail_flag(&rec), FieldValue::Str("F".to_string()));
    }

    #[test]
    fn test_pass_fail_flag_no_indication() {
        let rec = record_with(
            RecordType::Ptr,
            &[("test_flg", FieldValue::U(0x80)), ("parm_flg", FieldValue::U(0))],
        );
        assert_eq!(pass_fail_flag(&rec), FieldValue::None);
    }

    #[test]
    fn test_pass_fail_flag_scale_error() {
        let rec = record_with(
            RecordType::Ptr,
            &[("test_flg", FieldValue::U(0)), ("parm_flg", FieldValue::U(0x20))],
        );
        assert_eq!(pass_fail_flag(&rec), FieldValue::Str("A".to_string()));
    }

    #[test]
    fn test_ftr_pass_fail_flag_fail_on_bit7() {
        let rec = record_with(RecordType::Ftr, &[("test_flg", FieldValue::U(0x80))]);
        assert_eq!(ftr_pass_fail_flag(&rec), FieldValue::Str("F".to_string()));
    }

    #[test]
    fn test_alarm_flags_combination() {
        let rec = record_with(
            RecordType::Ptr,
            &[("test_flg", FieldValue::U(0x01 | 0x08)), ("parm_flg", FieldValue::U(0x01))],
        );
        assert_eq!(alarm_flags(&rec), FieldValue::Str("ATS".to_string()));
    }

    #[test]
    fn test_alarm_flags_parm_only_bits() {
        let rec = record_with(
            RecordType::Mpr,
            &[("test_flg", FieldValue::U(0)), ("parm_flg", FieldValue::U(0x02 | 0x08 | 0x10))],
        );
        assert_eq!(alarm_flags(&rec), FieldValue::Str("DHL".to_string()));
    }

    #[test]
    fn test_ftr_alarm_flags_does_not_read_parm_flg() {
        let rec = record_with(RecordType::Ftr, &[("test_flg", FieldValue::U(0x01 | 0x10))]);
        assert_eq!(ftr_alarm_flags(&rec), FieldValue::Str("AN".to_string()));
    }

    #[test]
    fn test_limit_compare_both_sides() {
        let rec = record_with(RecordType::Ptr, &[("opt_flag", FieldValue::U(0x40 | 0x80))]);
        assert_eq!(limit_compare(&rec), FieldValue::Str("LH".to_string()));
    }

    #[test]
    fn test_limit_compare_neither_side_is_none() {
        let rec = record_with(RecordType::Ptr, &[("opt_flag", FieldValue::U(0))]);
        assert_eq!(limit_compare(&rec), FieldValue::None);
    }

    #[test]
    fn test_retest_code_11_is_none() {
        let rec = record_with(RecordType::Prr, &[("part_flg", FieldValue::U(0b0000_0011))]);
        assert_eq!(prr_retest_code(&rec), FieldValue::None);
    }

    #[test]
    fn test_retest_code_incomplete() {
        let rec = record_with(RecordType::Prr, &[("part_flg", FieldValue::U(0b0000_0001))]);
        assert_eq!(prr_retest_code(&rec), FieldValue::Str("I".to_string()));
    }

    #[test]
    fn test_retest_code_aborted_and_retested() {
        let rec = record_with(RecordType::Prr, &[("part_flg", FieldValue::U(0b0000_0010))]);
        assert_eq!(prr_retest_code(&rec), FieldValue::Str("C".to_string()));
    }

    #[test]
    fn test_abort_code_bit2() {
        let rec = record_with(RecordType::Prr, &[("part_flg", FieldValue::U(0b0000_0100))]);
        assert_eq!(prr_abort_code(&rec), FieldValue::Str("Y".to_string()));
    }

    #[test]
    fn test_plr_mode_array_renders_hex() {
        let rec = record_with(
            RecordType::Plr,
            &[("grp_mode", FieldValue::Array(vec![FieldValue::U(10), FieldValue::U(32)]))],
        );
        assert_eq!(plr_mode_array(&rec), FieldValue::Str("a,20".to_string()));
    }

    #[test]
    fn test_plr_radix_array_all_zero_is_none() {
        let rec = record_with(
            RecordType::Plr,
            &[("grp_radx", FieldValue::Array(vec![FieldValue::U(0), FieldValue::U(0)]))],
        );
        assert_eq!(plr_radix_array(&rec), FieldValue::None);
    }

    #[test]
    fn test_plr_radix_array_maps_letters() {
        let rec = record_with(
            RecordType::Plr,
            &[("grp_radx", FieldValue::Array(vec![FieldValue::U(16), FieldValue::U(10)]))],
        );
        assert_eq!(plr_radix_array(&rec), FieldValue::Str("H,D".to_string()));
    }

    #[test]
    fn test_plr_state_pairs_elements() {
        let rec = record_with(
            RecordType::Plr,
            &[
                (
                    "pgm_char",
                    FieldValue::Array(vec![FieldValue::Str("1".into()), FieldValue::Str("0".into())]),
                ),
                (
                    "pgm_chal",
                    FieldValue::Array(vec![FieldValue::Str("X".into()), FieldValue::Str("Y".into())]),
                ),
            ],
        );
        assert_eq!(plr_state(&rec, "pgm_char", "pgm_chal"), FieldValue::Str("1X/0Y".to_string()));
    }

    #[test]
    fn test_plr_state_strips_spaces_within_group() {
        let rec = record_with(
            RecordType::Plr,
            &[(
                "pgm_char",
                FieldValue::Array(vec![FieldValue::Str("1 0".into())]),
            )],
        );
        assert_eq!(plr_state(&rec, "pgm_char", "missing"), FieldValue::Str("1,,0".to_string()));
    }

    #[test]
    fn test_far_constants() {
        let rec = record_with(RecordType::Far, &[]);
        let template = atdf_template(RecordType::Far);
        assert_eq!(resolve(&rec, &template[0]), FieldValue::Str("A".to_string()));
        assert_eq!(resolve(&rec, &template[1]), FieldValue::Str("2".to_string()));
    }
}
