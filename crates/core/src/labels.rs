//! Display tables for budget-range and deadline codes.
//!
//! The order form submits machine codes; notifications render them through
//! these tables. Unrecognized codes pass through unchanged so a form update
//! can never silently blank a notification, and an empty code renders as
//! `-`.

/// Map a budget-range code to its display form.
pub fn format_budget(code: &str) -> &str {
    match code {
        "" => "-",
        "5000-10000" => "¥5,000〜¥10,000",
        "10000-20000" => "¥10,000〜¥20,000",
        "20000-30000" => "¥20,000〜¥30,000",
        "30000over" => "¥30,000以上",
        other => other,
    }
}

/// Map a deadline code to its display form.
pub fn format_deadline(code: &str) -> &str {
    match code {
        "" => "-",
        "no-rush" => "急ぎではない",
        "1week" => "1週間以内",
        "2week" => "2週間以内",
        "1month" => "1ヶ月以内",
        "other" => "その他（詳細欄参照）",
        other => other,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
