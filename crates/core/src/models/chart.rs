use serde::{Deserialize, Serialize};

/// One entry in the chart-ready category series: a category name and its
/// summed valuation.
///
/// The core generates these — the frontend just renders them. Both the
/// share-of-whole (pie) and the magnitude-comparison (bar) visualizations
/// consume the same sequence, so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSlice {
    /// Category name (or the "Uncategorized" sentinel)
    pub name: String,

    /// Summed valuation of every asset in the category
    pub value: f64,
}

impl ChartSlice {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}
