//! Boundary normalization of heterogeneous backend encodings.
//!
//! The three backend services disagree on field shapes: booleans arrive as
//! `true`, `"true"`, `1` or `"1"`, and age groups arrive as enum codes
//! (`"AGE_3"`) or localized free text (`"3 años"`). These functions reconcile
//! every variant into one canonical in-process representation. They are pure
//! and total: no I/O, no errors, called once per record immediately after
//! deserialization so no downstream consumer ever sees an unnormalized value.

use serde_json::Value;

use crate::model::{AgeGroup, AgeGroupField};

/// Coerce a heterogeneous wire value into a boolean.
///
/// `true`, `"true"`, `1` and `"1"` map to `true`; everything else, including
/// `null` and absent-field defaults, maps to `false`.
pub fn normalize_boolean(v: &Value) -> bool {
    match v {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64() == Some(1) || n.as_f64() == Some(1.0),
        Value::String(s) => {
            let s = s.trim();
            s.eq_ignore_ascii_case("true") || s == "1"
        }
        _ => false,
    }
}

/// Map an age-group string to its canonical group.
///
/// Recognizes enum codes (`AGE_3`), bare digits (`3`) and the localized
/// spellings the legacy services emit (`3 años`, `3 anos`). Unrecognized
/// input passes through unchanged as [`AgeGroupField::Unknown`] — a
/// data-quality signal for the caller, never a silent coercion.
pub fn normalize_age_group(raw: &str) -> AgeGroupField {
    let folded = raw.trim().to_lowercase();
    let group = match folded.as_str() {
        "age_3" | "3" | "3 años" | "3 anos" | "tres años" => Some(AgeGroup::Age3),
        "age_4" | "4" | "4 años" | "4 anos" | "cuatro años" => Some(AgeGroup::Age4),
        "age_5" | "5" | "5 años" | "5 anos" | "cinco años" => Some(AgeGroup::Age5),
        _ => None,
    };
    match group {
        Some(g) => AgeGroupField::Known(g),
        None => AgeGroupField::Unknown(raw.to_string()),
    }
}

/// Age-group normalization over a raw wire value.
///
/// Some backends emit the group as a bare JSON number; everything else is
/// stringly typed. Null and non-scalar values become `Unknown("")`.
pub fn normalize_age_group_value(v: &Value) -> AgeGroupField {
    match v {
        Value::String(s) => normalize_age_group(s),
        Value::Number(n) => normalize_age_group(&n.to_string()),
        _ => AgeGroupField::Unknown(String::new()),
    }
}

/// Derive the student age from a normalized age group.
///
/// The mapping {AGE_3→3, AGE_4→4, AGE_5→5} is authoritative. Unknown groups
/// yield `None`; callers must not substitute a default age — the policy for
/// unrecognized groups belongs to the caller (the validation gate treats it
/// as a missing required field).
pub fn derive_student_age(group: &AgeGroupField) -> Option<u8> {
    group.as_known().map(|g| g.age())
}
