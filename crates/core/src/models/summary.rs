use serde::{Deserialize, Serialize};

/// Summary of the entire portfolio, as shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Total number of assets in the portfolio
    pub total_assets: usize,

    /// Total portfolio valuation across all categories
    pub total_value: f64,

    /// Per-category breakdown, in first-seen category order
    pub categories: Vec<CategorySummary>,
}

/// Summary of a single category tile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    /// Category name (or the "Uncategorized" sentinel)
    pub name: String,

    /// Summed valuation of the category's assets
    pub total_value: f64,

    /// Number of assets in the category
    pub asset_count: usize,
}
