//! C5: renders a decoded STDF record as one ATDF text line.
//!
//! Streams one record at a time rather than buffering a whole file:
//! `TAG:field1|field2|...\n`, trailing optional-empty fields trimmed (spec
//! §4.2 invariant: "a record's rendered line never ends in empty `|`
//! placeholders it doesn't need").

use stdf_core::record_type::RecordType;
use stdf_core::templates::atdf_template;
use stdf_core::types::{AtdfRecord, OrderedFields, StdfRecord};

use crate::transform;

/// Build the ATDF field map for a decoded record by running every field in
/// its ATDF template through the transform registry.
pub fn to_atdf_record(record: &StdfRecord) -> AtdfRecord {
    let template = atdf_template(record.record_type);
    let mut fields = OrderedFields::new();
    for field in template {
        let value = transform::resolve(record, field);
        fields.push(field.name, value);
    }
    AtdfRecord { record_type: record.record_type, fields }
}

/// Render one ATDF record as a single pipe-delimited line, trailing
/// optional-and-empty fields trimmed from the end (spec §4.2).
pub fn render_line(record: &AtdfRecord) -> String {
    let template = atdf_template(record.record_type);
    let mut rendered: Vec<String> = record.fields.iter().map(|(_, v)| v.render()).collect();

    while let Some(last) = rendered.last() {
        let idx = rendered.len() - 1;
        if template[idx].required || !last.is_empty() {
            break;
        }
        rendered.pop();
    }

    format!("{}:{}\n", record.record_type.tag(), rendered.join("|"))
}

/// The record type tag alone, used by the CLI's `-r/--records` summary.
pub fn tag_of(record_type: RecordType) -> &'static str {
    record_type.tag()
}
