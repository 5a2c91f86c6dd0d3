//! C2: the declarative shape of one record's STDF and ATDF field templates.

use crate::primitive::ElemType;
use crate::types::FieldValue;

/// A "no value" convention, checked after decode and normalized to
/// [`FieldValue::None`] (spec §4.1 "Missing-value conventions").
#[derive(Debug, Clone, Copy)]
pub enum Sentinel {
    /// Unsigned sentinel, e.g. `255` for head/site identifiers.
    U(u64),
    /// Signed sentinel, e.g. `-32768` for X/Y wafer coordinates.
    I(i64),
    /// `R4` `NaN` (spec §4.1: "R4=NaN").
    F32Nan,
    /// `R8` `NaN`.
    F64Nan,
    /// Empty string.
    EmptyString,
}

impl Sentinel {
    fn matches(self, value: &FieldValue) -> bool {
        match (self, value) {
            (Sentinel::U(s), FieldValue::U(v)) => s == *v,
            (Sentinel::I(s), FieldValue::I(v)) => s == *v,
            (Sentinel::F32Nan, FieldValue::F(v)) => v.is_nan(),
            (Sentinel::F64Nan, FieldValue::F(v)) => v.is_nan(),
            (Sentinel::EmptyString, FieldValue::Str(s)) => s.is_empty(),
            _ => false,
        }
    }
}

/// Apply a field's missing-value sentinel, turning a matching raw value
/// into `FieldValue::None`.
pub fn normalize(value: FieldValue, sentinel: Option<Sentinel>) -> FieldValue {
    match sentinel {
        Some(s) if s.matches(&value) => FieldValue::None,
        _ => value,
    }
}

/// One field in a record's STDF template (spec §3 "FieldSpec (STDF)").
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub elem: ElemType,
    /// `true` for a `kxTYPE` array; `elem` is then the element type and
    /// `len_ref` names the field holding the element count `k`.
    pub array: bool,
    /// For `Cn`/`Bn`: the field holding the byte length `n`. For an array:
    /// the field holding the element count `k`. `None` for scalars and
    /// self-describing types (`Cf`, `Dn`, `Vn`, fixed-width numerics).
    pub len_ref: Option<&'static str>,
    pub required: bool,
    pub sentinel: Option<Sentinel>,
}

impl FieldSpec {
    pub const fn scalar(name: &'static str, elem: ElemType) -> Self {
        Self {
            name,
            elem,
            array: false,
            len_ref: None,
            required: true,
            sentinel: None,
        }
    }

    pub const fn optional(name: &'static str, elem: ElemType) -> Self {
        Self {
            name,
            elem,
            array: false,
            len_ref: None,
            required: false,
            sentinel: None,
        }
    }

    pub const fn sized(name: &'static str, elem: ElemType, len_ref: &'static str) -> Self {
        Self {
            name,
            elem,
            array: false,
            len_ref: Some(len_ref),
            required: false,
            sentinel: None,
        }
    }

    pub const fn array_of(name: &'static str, elem: ElemType, len_ref: &'static str) -> Self {
        Self {
            name,
            elem,
            array: true,
            len_ref: Some(len_ref),
            required: false,
            sentinel: None,
        }
    }

    pub const fn with_sentinel(mut self, sentinel: Sentinel) -> Self {
        self.sentinel = Some(sentinel);
        self
    }

    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

/// Where an ATDF field's value comes from (spec §3 "FieldSpec (ATDF)").
#[derive(Debug, Clone, Copy)]
pub enum AtdfSource {
    /// Passthrough or transform input: a single named STDF field.
    Field(&'static str),
    /// Transform input: an ordered tuple of named STDF fields.
    Pair(&'static str, &'static str),
    /// Derived from record identity alone (e.g. `atdf_version` on `FAR`).
    None,
}

/// One field in a record's ATDF template.
#[derive(Debug, Clone, Copy)]
pub struct AtdfFieldSpec {
    pub name: &'static str,
    pub source: AtdfSource,
    pub required: bool,
}

impl AtdfFieldSpec {
    pub const fn field(name: &'static str, source: &'static str) -> Self {
        Self {
            name,
            source: AtdfSource::Field(source),
            required: false,
        }
    }

    pub const fn pair(name: &'static str, a: &'static str, b: &'static str) -> Self {
        Self {
            name,
            source: AtdfSource::Pair(a, b),
            required: false,
        }
    }

    pub const fn derived(name: &'static str) -> Self {
        Self {
            name,
            source: AtdfSource::None,
            required: false,
        }
    }

    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_u_matches() {
        let value = FieldValue::U(255);
        assert_eq!(
            normalize(value, Some(Sentinel::U(255))),
            FieldValue::None
        );
    }

    #[test]
    fn test_sentinel_does_not_match_other_values() {
        let value = FieldValue::U(12);
        assert_eq!(normalize(value.clone(), Some(Sentinel::U(255))), value);
    }

    #[test]
    fn test_sentinel_f32_nan() {
        let value = FieldValue::F(f64::NAN);
        assert_eq!(normalize(value, Some(Sentinel::F32Nan)), FieldValue::None);
    }

    #[test]
    fn test_no_sentinel_passes_through() {
        let value = FieldValue::U(7);
        assert_eq!(normalize(value.clone(), None), value);
    }
}
