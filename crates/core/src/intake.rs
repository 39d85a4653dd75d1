//! Order submission normalization and required-field validation.
//!
//! Submissions arrive as a loosely-typed JSON bag assembled by the public
//! order form. Every field is coerced to a trimmed string before validation
//! so that downstream code (persistence, notifications) only ever sees
//! `String` values. Validation is fail-fast: the first empty required field,
//! in declared order, is reported by its wire name.

use serde_json::Value;

/// Required submission fields, by wire name, in the order they are checked.
pub const REQUIRED_FIELDS: &[&str] = &[
    "name",
    "email",
    "phone",
    "type",
    "budgetRange",
    "deadline",
    "meeting",
    "details",
];

/// A submission with every field coerced to a trimmed string.
///
/// `meeting_unavailable` is the one optional field (a free-text scheduling
/// constraint); it stays empty when the form omits it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedOrder {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub request_type: String,
    pub budget_range: String,
    pub deadline: String,
    pub meeting: String,
    pub details: String,
    pub meeting_unavailable: String,
}

/// Coerce a loosely-typed JSON value to a trimmed string.
///
/// Strings are trimmed; numbers and booleans take their display form;
/// null, absent values, and composites (arrays, objects) become the empty
/// string, so the required check treats them as missing.
pub fn clean_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Normalize a raw submission object into a [`NormalizedOrder`].
///
/// Unrecognized keys are ignored; a non-object input yields all-empty
/// fields and falls out at the required check.
pub fn normalize_order(raw: &Value) -> NormalizedOrder {
    NormalizedOrder {
        name: clean_string(raw.get("name")),
        email: clean_string(raw.get("email")),
        phone: clean_string(raw.get("phone")),
        request_type: clean_string(raw.get("type")),
        budget_range: clean_string(raw.get("budgetRange")),
        deadline: clean_string(raw.get("deadline")),
        meeting: clean_string(raw.get("meeting")),
        details: clean_string(raw.get("details")),
        meeting_unavailable: clean_string(raw.get("meetingUnavailable")),
    }
}

/// Report the first required field that is empty after normalization, by
/// wire name, or `None` when the submission is complete.
pub fn first_missing_field(order: &NormalizedOrder) -> Option<&'static str> {
    // Values in the same order as REQUIRED_FIELDS.
    let values = [
        &order.name,
        &order.email,
        &order.phone,
        &order.request_type,
        &order.budget_range,
        &order.deadline,
        &order.meeting,
        &order.details,
    ];

    REQUIRED_FIELDS
        .iter()
        .zip(values)
        .find(|(_, value)| value.is_empty())
        .map(|(name, _)| *name)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
