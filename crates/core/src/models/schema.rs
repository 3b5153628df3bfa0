use serde::{Deserialize, Serialize};

/// How a category attribute is coerced during record construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeKind {
    /// Normalized to a finite decimal via `normalize::to_number`.
    Numeric,
    /// Stored as trimmed text.
    Text,
}

/// The category-spanning candidate list: the union of every category's
/// optional attributes, in a fixed order. Record construction walks this list
/// and includes whichever keys the form supplied non-blank.
///
/// `purchasePrice` appears once but belongs to both stocks and crypto — the
/// key is shared on purpose (a per-unit purchase price in either case), and
/// only one category is ever active per construction call.
const CANDIDATE_KEYS: &[(&str, AttributeKind)] = &[
    // property
    ("location", AttributeKind::Text),
    ("size", AttributeKind::Text),
    ("type", AttributeKind::Text),
    // gold
    ("weight", AttributeKind::Text),
    ("purity", AttributeKind::Text),
    // stocks
    ("ticker", AttributeKind::Text),
    ("shares", AttributeKind::Numeric),
    ("purchasePrice", AttributeKind::Numeric),
    // crypto
    ("coin", AttributeKind::Text),
    ("quantity", AttributeKind::Numeric),
    // mutual funds
    ("fundName", AttributeKind::Text),
    ("units", AttributeKind::Numeric),
    ("nav", AttributeKind::Numeric),
];

const PROPERTY: &[(&str, AttributeKind)] = &[
    ("location", AttributeKind::Text),
    ("size", AttributeKind::Text),
    ("type", AttributeKind::Text),
];

const GOLD: &[(&str, AttributeKind)] = &[
    ("weight", AttributeKind::Text),
    ("purity", AttributeKind::Text),
];

const STOCKS: &[(&str, AttributeKind)] = &[
    ("ticker", AttributeKind::Text),
    ("shares", AttributeKind::Numeric),
    ("purchasePrice", AttributeKind::Numeric),
];

const CRYPTO: &[(&str, AttributeKind)] = &[
    ("coin", AttributeKind::Text),
    ("quantity", AttributeKind::Numeric),
    ("purchasePrice", AttributeKind::Numeric),
];

const MUTUAL_FUNDS: &[(&str, AttributeKind)] = &[
    ("fundName", AttributeKind::Text),
    ("units", AttributeKind::Numeric),
    ("nav", AttributeKind::Numeric),
];

/// The optional attributes recognized for a category tag.
///
/// Lookup is exact and case-sensitive; an unknown category yields an empty
/// slice. The registry is advisory, not enforcing: it only decides numeric
/// vs. text coercion for keys a caller already chose to include — it never
/// rejects extra keys or demands missing ones, so unknown categories still
/// produce working (attribute-less) records.
pub fn attributes_for(category: &str) -> &'static [(&'static str, AttributeKind)] {
    match category {
        "property" => PROPERTY,
        "gold" => GOLD,
        "stocks" => STOCKS,
        "crypto" => CRYPTO,
        "mutualfunds" => MUTUAL_FUNDS,
        _ => &[],
    }
}

/// All candidate attribute keys across every category, in declaration order.
pub fn candidate_keys() -> &'static [(&'static str, AttributeKind)] {
    CANDIDATE_KEYS
}

/// The coercion kind for a single attribute key, if it is a known key.
pub fn kind_of(key: &str) -> Option<AttributeKind> {
    CANDIDATE_KEYS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, kind)| *kind)
}
