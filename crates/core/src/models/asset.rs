use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};

use super::schema::{self, AttributeKind};
use crate::normalize::{numeric_value, to_number};

/// Opaque identifier assigned by the asset store on creation.
///
/// The core only ever uses it as an equality key for lookup and deletion —
/// it carries no structure. Stores that hand out numeric ids on the wire are
/// tolerated; the number is stringified on the way in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Serialize for AssetId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AssetId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) => Ok(Self(s)),
            serde_json::Value::Number(n) => Ok(Self(n.to_string())),
            other => Err(D::Error::custom(format!(
                "asset id must be a string or number, got {other}"
            ))),
        }
    }
}

/// One value in an asset's open attribute mapping.
///
/// Untagged so the wire shape stays plain JSON: numbers deserialize as
/// `Number`, strings as `Text`, and anything else legacy data might contain
/// (null, booleans, nested values) is absorbed as `Other` rather than
/// failing the whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl AttributeValue {
    /// The value as a finite decimal, zero when it is not one.
    #[must_use]
    pub fn as_number(&self) -> f64 {
        numeric_value(self)
    }

    /// The value as text, if it is text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Keys that are canonical valuation fields, not category attributes.
const RESERVED_KEYS: [&str; 2] = ["purchaseValue", "currentValue"];

/// One entry in the portfolio: required common fields plus an open,
/// category-specific attribute mapping.
///
/// The struct deliberately keeps `purchaseValue`, `currentValue`, the
/// category attributes, and any legacy keys a fetched record carries in one
/// flattened field map. That preserves key *presence*, which alias
/// resolution depends on: a record holding only a snake_case
/// `current_value` must still resolve its valuation from it, and a record
/// with no current value at all must fall back to its purchase price.
///
/// On the wire this serializes to the flat shape the store speaks:
/// `{ id?, category, name, purchaseDate, purchaseValue, currentValue,
/// ...attributes }` — attributes at the top level, never nested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
    /// Assigned by the store; absent before creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AssetId>,

    /// Category tag (`property`, `gold`, ...). Unknown tags are accepted
    /// verbatim; blank means the record groups under "Uncategorized".
    #[serde(default)]
    pub category: String,

    /// Display label, trimmed.
    #[serde(default)]
    pub name: String,

    /// Calendar date as opaque text; no format is enforced.
    #[serde(default)]
    pub purchase_date: String,

    /// Everything else: canonical valuation fields, category attributes,
    /// and legacy keys, exactly as present on the wire.
    #[serde(flatten)]
    fields: BTreeMap<String, AttributeValue>,
}

/// Sentinel bucket for records with a missing or blank category.
pub const UNCATEGORIZED: &str = "Uncategorized";

impl AssetRecord {
    /// Construct a normalized record from raw form input.
    ///
    /// Required fields are always present: `name` is trimmed,
    /// `purchaseDate` passes through unmodified, and the two valuation
    /// fields are normalized to finite numbers (zero when unparsable —
    /// never an error).
    ///
    /// Optional fields follow the inclusion rule: each key in the
    /// category-spanning candidate list is included only when the form
    /// supplies it non-blank, coerced numeric or text per the schema
    /// registry. Blank and absent keys are omitted entirely, never stored
    /// as null or zero placeholders.
    #[must_use]
    pub fn build(category: &str, form: &HashMap<String, String>) -> Self {
        let raw = |key: &str| form.get(key).map(String::as_str).unwrap_or("");

        let mut fields = BTreeMap::new();
        fields.insert(
            "purchaseValue".to_string(),
            AttributeValue::Number(to_number(raw("purchaseValue"))),
        );
        fields.insert(
            "currentValue".to_string(),
            AttributeValue::Number(to_number(raw("currentValue"))),
        );

        for (key, kind) in schema::candidate_keys() {
            let supplied = match form.get(*key) {
                Some(v) if !v.trim().is_empty() => v,
                _ => continue,
            };
            let value = match kind {
                AttributeKind::Numeric => AttributeValue::Number(to_number(supplied)),
                AttributeKind::Text => AttributeValue::Text(supplied.trim().to_string()),
            };
            fields.insert((*key).to_string(), value);
        }

        Self {
            id: None,
            category: category.to_string(),
            name: raw("name").trim().to_string(),
            purchase_date: raw("purchaseDate").to_string(),
            fields,
        }
    }

    /// Look up a field by its wire key (valuation fields, attributes, and
    /// legacy keys alike). Named fields (`name`, `category`, `purchaseDate`)
    /// are not part of this map.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&AttributeValue> {
        self.fields.get(key)
    }

    /// The normalized purchase value. Zero when absent or unparsable.
    #[must_use]
    pub fn purchase_value(&self) -> f64 {
        self.field("purchaseValue").map_or(0.0, numeric_value)
    }

    /// The normalized current value under its canonical key only.
    /// Valuation with legacy-alias fallback lives in the aggregation
    /// engine, which all totals must go through.
    #[must_use]
    pub fn current_value(&self) -> f64 {
        self.field("currentValue").map_or(0.0, numeric_value)
    }

    /// Category-specific attributes: every field except the canonical
    /// valuation keys, in stable (sorted) key order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.fields
            .iter()
            .filter(|(k, _)| !RESERVED_KEYS.contains(&k.as_str()))
            .map(|(k, v)| (k.as_str(), v))
    }

    /// The category used for grouping: the tag itself, or the
    /// "Uncategorized" sentinel when missing or blank.
    #[must_use]
    pub fn display_category(&self) -> &str {
        if self.category.trim().is_empty() {
            UNCATEGORIZED
        } else {
            &self.category
        }
    }
}
