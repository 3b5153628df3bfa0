//! Value normalization: the one place where dirty input becomes clean numbers.
//!
//! Asset data arrives from forms and from a store that may hold records
//! written by older versions of the app, with inconsistent field naming and
//! string-typed numbers. Everything funnels through `to_number` and
//! `resolve_aliased`, which are total: no input ever produces an error or a
//! non-finite value. Malformed data contributes zero instead of crashing a
//! dashboard.

use crate::models::asset::{AssetRecord, AttributeValue};

/// Alias precedence for an asset's current valuation, most explicit first:
/// prefer the current value, then a generic `value` field, then fall back to
/// the original purchase price. Snake_case spellings tolerate legacy records.
///
/// Every total in the system resolves through this one list, so the category
/// tiles, the grand total, and both chart series can never disagree.
pub const CURRENT_VALUE_ALIASES: [&str; 5] = [
    "currentValue",
    "current_value",
    "value",
    "purchaseValue",
    "purchase_value",
];

/// Coerce arbitrary text into a finite decimal number.
///
/// Trims whitespace, strips `,` thousands separators, then parses the leading
/// numeric portion of what remains (sign, decimal point, optional exponent).
/// Anything that does not start with a number — empty input, `"abc"`,
/// `"Infinity"` — yields `0.0`. Never panics, never returns NaN.
pub fn to_number(input: &str) -> f64 {
    let cleaned = input.trim().replace(',', "");
    match numeric_prefix(&cleaned).parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// Coerce an already-deserialized attribute value into a finite decimal.
pub fn numeric_value(value: &AttributeValue) -> f64 {
    match value {
        AttributeValue::Number(n) if n.is_finite() => *n,
        AttributeValue::Number(_) => 0.0,
        AttributeValue::Text(s) => to_number(s),
        AttributeValue::Other(_) => 0.0,
    }
}

/// Resolve a numeric field from the first present, non-null candidate key.
///
/// Candidates are tried strictly in order; a key that is present but
/// unparsable still wins the resolution (and normalizes to zero) — the chain
/// only falls through on genuinely absent or null fields.
pub fn resolve_aliased(record: &AssetRecord, candidates: &[&str]) -> f64 {
    for key in candidates {
        match record.field(key) {
            None => continue,
            Some(AttributeValue::Other(serde_json::Value::Null)) => continue,
            Some(v) => return numeric_value(v),
        }
    }
    0.0
}

/// The longest prefix of `s` that parses as a float: optional sign, digits
/// with an optional fractional part, optional exponent. Empty when `s` does
/// not start with a number.
fn numeric_prefix(s: &str) -> &str {
    let b = s.as_bytes();
    let mut i = 0;
    if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
        i += 1;
    }
    let mut digits = 0;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
        digits += 1;
    }
    if i < b.len() && b[i] == b'.' {
        i += 1;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return "";
    }

    // Exponent only counts if at least one digit follows it.
    let mantissa_end = i;
    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        let mut j = i + 1;
        if j < b.len() && (b[j] == b'+' || b[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        i = if j > exp_start { j } else { mantissa_end };
    }

    &s[..i]
}
