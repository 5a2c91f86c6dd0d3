//! C3: walks one record's STDF template across its payload bytes.
//!
//! Grounded on `scan_data_decoder.rs`'s peak-list walk: a single forward
//! cursor, one field at a time, overrun turns the rest of the record into
//! `None` rather than aborting the file (spec §4.3 edge case: "a record
//! that runs out of bytes mid-template").

use crate::field_spec::{normalize, FieldSpec};
use crate::io_utils::Endianness;
use crate::primitive::{self, ElemType};
use crate::record_type::RecordType;
use crate::templates::stdf_template;
use crate::types::{FieldValue, OrderedFields, StdfRecord};

/// Decode one record body against its template.
///
/// `payload` is the record's bytes *after* the 4-byte frame header (spec
/// §4.2). Fields beyond the first decode overrun are set to
/// [`FieldValue::None`] and a warning is logged (spec §4.3).
pub fn decode_record(
    record_type: RecordType,
    payload: &[u8],
    endian: Endianness,
) -> StdfRecord {
    let template = stdf_template(record_type);
    let mut fields = OrderedFields::new();
    let mut offset = 0usize;
    let mut overrun = false;

    for spec in template {
        if overrun {
            fields.push(spec.name, FieldValue::None);
            continue;
        }
        match decode_field(spec, payload, offset, endian, &fields) {
            Ok((value, new_offset)) => {
                offset = new_offset;
                fields.push(spec.name, value);
            }
            Err(_) => {
                log::warn!(
                    "{}: decode overrun at field '{}' (offset {}); remaining fields set to none",
                    record_type,
                    spec.name,
                    offset
                );
                overrun = true;
                fields.push(spec.name, FieldValue::None);
            }
        }
    }

    StdfRecord { record_type, fields }
}

fn decode_field(
    spec: &FieldSpec,
    payload: &[u8],
    offset: usize,
    endian: Endianness,
    fields_so_far: &OrderedFields,
) -> Result<(FieldValue, usize), crate::error::StdfError> {
    if spec.array {
        let count = spec
            .len_ref
            .and_then(|r| fields_so_far.get(r))
            .and_then(FieldValue::as_u64)
            .unwrap_or(0) as usize;
        let mut items = Vec::with_capacity(count);
        let mut cursor = offset;
        for _ in 0..count {
            let (value, next) = primitive::decode(spec.elem, payload, cursor, endian, None)?;
            items.push(value);
            cursor = next;
        }
        return Ok((FieldValue::Array(items), cursor));
    }

    let len = match spec.elem {
        ElemType::Cn | ElemType::Bn => spec
            .len_ref
            .and_then(|r| fields_so_far.get(r))
            .and_then(FieldValue::as_u64)
            .map(|n| n as usize),
        _ => None,
    };

    let (raw, next) = primitive::decode(spec.elem, payload, offset, endian, len)?;
    Ok((normalize(raw, spec.sentinel), next))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_far_minimal() {
        let payload = [2u8, 4u8];
        let rec = decode_record(RecordType::Far, &payload, Endianness::Little);
        assert_eq!(rec.fields.get("cpu_type"), Some(&FieldValue::U(2)));
        assert_eq!(rec.fields.get("stdf_ver"), Some(&FieldValue::U(4)));
    }

    #[test]
    fn test_decode_pcr_applies_head_site_sentinel() {
        let mut payload = vec![255u8, 255u8]; // head_num, site_num => none
        payload.extend_from_slice(&10u32.to_le_bytes()); // part_cnt
        let rec = decode_record(RecordType::Pcr, &payload, Endianness::Little);
        assert_eq!(rec.fields.get("head_num"), Some(&FieldValue::None));
        assert_eq!(rec.fields.get("part_cnt"), Some(&FieldValue::U(10)));
    }

    #[test]
    fn test_decode_overrun_fills_none() {
        // PCR needs head_num, site_num, part_cnt (4 bytes) at minimum; give 1 byte.
        let payload = [1u8];
        let rec = decode_record(RecordType::Pcr, &payload, Endianness::Little);
        assert_eq!(rec.fields.get("head_num"), Some(&FieldValue::U(1)));
        assert_eq!(rec.fields.get("site_num"), Some(&FieldValue::None));
        assert_eq!(rec.fields.get("part_cnt"), Some(&FieldValue::None));
    }

    #[test]
    fn test_decode_pgr_array_from_ref() {
        let mut payload = vec![];
        payload.extend_from_slice(&1u16.to_le_bytes()); // grp_indx
        payload.push(1); // grp_nam length
        payload.push(b'A');
        payload.extend_from_slice(&2u16.to_le_bytes()); // indx_cnt = 2
        payload.extend_from_slice(&10u16.to_le_bytes());
        payload.extend_from_slice(&20u16.to_le_bytes());
        let rec = decode_record(RecordType::Pgr, &payload, Endianness::Little);
        assert_eq!(
            rec.fields.get("pmr_indx"),
            Some(&FieldValue::Array(vec![FieldValue::U(10), FieldValue::U(20)]))
        );
    }
}
