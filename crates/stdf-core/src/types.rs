//! Core value and record types shared by the decoder, transformer, and writer.

use crate::record_type::RecordType;
use std::collections::HashMap;

/// A single decoded (STDF side) or rendered (ATDF side) field value.
///
/// `U`/`I` are widened to 64 bits regardless of the primitive's declared
/// width; the template retains the declared [`crate::primitive::ElemType`]
/// for anyone that needs to re-narrow.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    U(u64),
    I(i64),
    F(f64),
    Str(String),
    Bytes(Vec<u8>),
    /// Rendered binary-string form (`Dn`, debug/STDF-view only).
    BitString(String),
    Array(Vec<FieldValue>),
    None,
}

impl FieldValue {
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            FieldValue::U(v) => Some(*v),
            FieldValue::I(v) if *v >= 0 => Some(*v as u64),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::U(v) => Some(*v as i64),
            FieldValue::I(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, FieldValue::None)
    }

    /// Canonical string form used by the ATDF writer for non-`None` values:
    /// integers unpadded, floats in shortest round-trip form.
    pub fn render(&self) -> String {
        match self {
            FieldValue::U(v) => v.to_string(),
            FieldValue::I(v) => v.to_string(),
            FieldValue::F(v) => format_float(*v),
            FieldValue::Str(s) => s.clone(),
            FieldValue::Bytes(b) => b
                .iter()
                .map(|byte| format!("{:02X}", byte))
                .collect::<Vec<_>>()
                .join(" "),
            FieldValue::BitString(s) => s.clone(),
            FieldValue::Array(items) => items
                .iter()
                .map(|v| v.render())
                .collect::<Vec<_>>()
                .join(","),
            FieldValue::None => String::new(),
        }
    }
}

/// Shortest round-trip decimal form, dropping a trailing `.0` the way most
/// textual test-data formats expect integral floats to read as ints would not,
/// but keeping the fractional digits a float actually carries.
fn format_float(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{:.0}", v)
    } else {
        let s = format!("{}", v);
        s
    }
}

/// An insertion-ordered `name -> value` map. Small enough (rarely more than
/// ~20 entries per record) that linear lookup beats a hash map's overhead,
/// and — unlike a `HashMap` — preserves the template's declared field order
/// (invariant 5 in spec §3).
#[derive(Debug, Clone, Default)]
pub struct OrderedFields {
    entries: Vec<(&'static str, FieldValue)>,
}

impl OrderedFields {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn push(&mut self, name: &'static str, value: FieldValue) {
        self.entries.push((name, value));
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// Overwrites an existing entry's value in place; a no-op if `name`
    /// isn't in the template. Used to stamp derived `w_id`/`p_id`
    /// correlation fields onto an already-built record.
    pub fn set(&mut self, name: &str, value: FieldValue) {
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &(&'static str, FieldValue)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A fully-decoded STDF record: record type plus its field map in template order.
#[derive(Debug, Clone)]
pub struct StdfRecord {
    pub record_type: RecordType,
    pub fields: OrderedFields,
}

/// A rendered ATDF record: record type plus its ATDF field map in template order.
#[derive(Debug, Clone)]
pub struct AtdfRecord {
    pub record_type: RecordType,
    pub fields: OrderedFields,
}

/// All ATDF records produced from one input file, grouped by record type.
/// Order within each `Vec` matches read order; no ordering is promised
/// across different record types (spec §3 invariant 5, §5 ordering guarantees).
#[derive(Debug, Clone, Default)]
pub struct RecordCollection {
    pub by_type: HashMap<RecordType, Vec<AtdfRecord>>,
}

impl RecordCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: AtdfRecord) {
        self.by_type.entry(record.record_type).or_default().push(record);
    }

    pub fn total_records(&self) -> usize {
        self.by_type.values().map(|v| v.len()).sum()
    }
}

/// Per-file decode state: byte order, the record-type filter mask, and the
/// cross-record `w_id`/`p_id` counters and latest-matching-entry maps (spec
/// §9: "counters (w, p) and latest-matching-entry cross-record IDs are
/// better expressed as explicit state carried in the FileContext... not a
/// module-level dictionary").
#[derive(Debug, Clone)]
pub struct FileContext {
    pub endianness: crate::io_utils::Endianness,
    pub record_type_mask: RecordTypeMask,
    w_counter: u64,
    p_counter: u64,
    seen_pir: bool,
    last_w_id_by_head: HashMap<Option<u64>, u64>,
    last_p_id_by_head_site: HashMap<(Option<u64>, Option<u64>), u64>,
}

impl FileContext {
    pub fn new(endianness: crate::io_utils::Endianness, record_type_mask: RecordTypeMask) -> Self {
        Self {
            endianness,
            record_type_mask,
            w_counter: 0,
            p_counter: 0,
            seen_pir: false,
            last_w_id_by_head: HashMap::new(),
            last_p_id_by_head_site: HashMap::new(),
        }
    }

    /// Stamps `w_id`/`p_id` onto a rendered ATDF record's fields, mirroring
    /// the source system's WIR/PIR counters and "latest matching entry"
    /// cross-reference: WIR allocates a new `w_id` keyed by `head_number`;
    /// WRR/PIR/PTR/MPR/FTR/PRR look one up the same way. PIR allocates a
    /// new `p_id` keyed by `(head_number, site_number)`; PTR/MPR/FTR look
    /// one up the same way. PRR allocates its own `p_id` only if the file
    /// has had no PIR records at all so far, otherwise it looks one up too.
    pub fn correlate(
        &mut self,
        record_type: RecordType,
        head: Option<u64>,
        site: Option<u64>,
        fields: &mut OrderedFields,
    ) {
        let latest_w_id = |ctx: &Self| ctx.last_w_id_by_head.get(&head).copied();
        match record_type {
            RecordType::Wir => {
                self.w_counter += 1;
                self.last_w_id_by_head.insert(head, self.w_counter);
                fields.set("w_id", FieldValue::U(self.w_counter));
            }
            RecordType::Wrr => {
                fields.set("w_id", latest_w_id(self).map_or(FieldValue::None, FieldValue::U));
            }
            RecordType::Pir => {
                self.p_counter += 1;
                self.seen_pir = true;
                self.last_p_id_by_head_site.insert((head, site), self.p_counter);
                fields.set("w_id", latest_w_id(self).map_or(FieldValue::None, FieldValue::U));
                fields.set("p_id", FieldValue::U(self.p_counter));
            }
            RecordType::Ptr | RecordType::Mpr | RecordType::Ftr => {
                let p_id = self.last_p_id_by_head_site.get(&(head, site)).copied();
                fields.set("w_id", latest_w_id(self).map_or(FieldValue::None, FieldValue::U));
                fields.set("p_id", p_id.map_or(FieldValue::None, FieldValue::U));
            }
            RecordType::Prr => {
                let p_id = if !self.seen_pir {
                    self.p_counter += 1;
                    Some(self.p_counter)
                } else {
                    self.last_p_id_by_head_site.get(&(head, site)).copied()
                };
                fields.set("w_id", latest_w_id(self).map_or(FieldValue::None, FieldValue::U));
                fields.set("p_id", p_id.map_or(FieldValue::None, FieldValue::U));
            }
            _ => {}
        }
    }
}

/// A filter over which [`RecordType`]s are processed for a given file
/// (spec §4.7: "Build the RecordType mask from the optional user filter").
#[derive(Debug, Clone)]
pub enum RecordTypeMask {
    All,
    Only(std::collections::HashSet<RecordType>),
}

impl RecordTypeMask {
    pub fn allows(&self, rt: RecordType) -> bool {
        match self {
            RecordTypeMask::All => true,
            RecordTypeMask::Only(set) => set.contains(&rt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_fields_preserves_order() {
        let mut fields = OrderedFields::new();
        fields.push("b", FieldValue::U(2));
        fields.push("a", FieldValue::U(1));
        let names: Vec<_> = fields.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_render_float_drops_trailing_zero() {
        assert_eq!(FieldValue::F(2.0).render(), "2");
        assert_eq!(FieldValue::F(2.5).render(), "2.5");
    }

    #[test]
    fn test_none_renders_empty() {
        assert_eq!(FieldValue::None.render(), "");
    }

    #[test]
    fn test_correlate_wir_pir_chain() {
        let mut ctx = FileContext::new(crate::io_utils::Endianness::Little, RecordTypeMask::All);

        let mut wir = OrderedFields::new();
        wir.push("w_id", FieldValue::None);
        ctx.correlate(RecordType::Wir, Some(1), None, &mut wir);
        assert_eq!(wir.get("w_id"), Some(&FieldValue::U(1)));

        let mut pir = OrderedFields::new();
        pir.push("w_id", FieldValue::None);
        pir.push("p_id", FieldValue::None);
        ctx.correlate(RecordType::Pir, Some(1), Some(3), &mut pir);
        assert_eq!(pir.get("w_id"), Some(&FieldValue::U(1)));
        assert_eq!(pir.get("p_id"), Some(&FieldValue::U(1)));

        let mut ptr = OrderedFields::new();
        ptr.push("w_id", FieldValue::None);
        ptr.push("p_id", FieldValue::None);
        ctx.correlate(RecordType::Ptr, Some(1), Some(3), &mut ptr);
        assert_eq!(ptr.get("w_id"), Some(&FieldValue::U(1)));
        assert_eq!(ptr.get("p_id"), Some(&FieldValue::U(1)));

        let mut prr = OrderedFields::new();
        prr.push("w_id", FieldValue::None);
        prr.push("p_id", FieldValue::None);
        ctx.correlate(RecordType::Prr, Some(1), Some(3), &mut prr);
        assert_eq!(prr.get("p_id"), Some(&FieldValue::U(1)));
    }

    #[test]
    fn test_correlate_prr_allocates_when_no_pir_seen() {
        let mut ctx = FileContext::new(crate::io_utils::Endianness::Little, RecordTypeMask::All);
        let mut prr = OrderedFields::new();
        prr.push("p_id", FieldValue::None);
        ctx.correlate(RecordType::Prr, Some(1), Some(0), &mut prr);
        assert_eq!(prr.get("p_id"), Some(&FieldValue::U(1)));
    }

    #[test]
    fn test_record_type_mask() {
        let mut set = std::collections::HashSet::new();
        set.insert(RecordType::Far);
        let mask = RecordTypeMask::Only(set);
        assert!(mask.allows(RecordType::Far));
        assert!(!mask.allows(RecordType::Mir));
        assert!(RecordTypeMask::All.allows(RecordType::Mir));
    }
}
