use crate::models::asset::AssetRecord;
use crate::models::chart::ChartSlice;
use crate::models::summary::{CategorySummary, PortfolioSummary};
use crate::normalize::{resolve_aliased, CURRENT_VALUE_ALIASES};

/// One category bucket produced by grouping: the category name and the
/// member records, in the order they appeared in the source collection.
#[derive(Debug)]
pub struct CategoryGroup<'a> {
    pub name: String,
    pub records: Vec<&'a AssetRecord>,
}

/// Groups assets by category and derives every valuation the dashboard
/// shows: category tiles, the portfolio grand total, and the chart series.
///
/// Pure business logic — no I/O, no store calls. Aggregation never fails:
/// a malformed record contributes its normalized-to-zero valuation, and an
/// empty collection yields empty outputs rather than an error.
pub struct AggregationService;

impl AggregationService {
    pub fn new() -> Self {
        Self
    }

    /// Stable partition of the collection by category.
    ///
    /// Buckets appear in first-seen order and keep the source collection's
    /// insertion order within each bucket; nothing is sorted. Records with
    /// a missing or blank category land in the "Uncategorized" bucket.
    pub fn group_by_category<'a>(&self, records: &'a [AssetRecord]) -> Vec<CategoryGroup<'a>> {
        let mut groups: Vec<CategoryGroup<'a>> = Vec::new();
        for record in records {
            let category = record.display_category();
            match groups.iter().position(|g| g.name == category) {
                Some(idx) => groups[idx].records.push(record),
                None => groups.push(CategoryGroup {
                    name: category.to_string(),
                    records: vec![record],
                }),
            }
        }
        groups
    }

    /// The single valuation function behind every total.
    ///
    /// Resolves through the fixed alias chain (current value, then a
    /// generic `value`, then the purchase price) so that tiles, the grand
    /// total, and both chart series always agree. Total: returns a finite
    /// number for any record.
    #[must_use]
    pub fn valuation_of(&self, record: &AssetRecord) -> f64 {
        resolve_aliased(record, &CURRENT_VALUE_ALIASES)
    }

    /// One `{name, value}` slice per bucket, in grouping order.
    ///
    /// This sequence is the single source of truth for both the
    /// proportional and the magnitude chart — there is no second
    /// computation path to drift out of sync.
    pub fn category_totals(&self, groups: &[CategoryGroup<'_>]) -> Vec<ChartSlice> {
        groups
            .iter()
            .map(|group| {
                let total = group
                    .records
                    .iter()
                    .map(|record| self.valuation_of(record))
                    .sum();
                ChartSlice::new(group.name.clone(), total)
            })
            .collect()
    }

    /// Total portfolio valuation, independent of grouping.
    /// Always equals the sum of `category_totals` over the same records.
    #[must_use]
    pub fn portfolio_total(&self, records: &[AssetRecord]) -> f64 {
        records.iter().map(|record| self.valuation_of(record)).sum()
    }

    /// Full dashboard summary: grand total plus one tile per category with
    /// its total and item count, in grouping order.
    #[must_use]
    pub fn summarize(&self, records: &[AssetRecord]) -> PortfolioSummary {
        let groups = self.group_by_category(records);
        let categories = groups
            .iter()
            .map(|group| CategorySummary {
                name: group.name.clone(),
                total_value: group
                    .records
                    .iter()
                    .map(|record| self.valuation_of(record))
                    .sum(),
                asset_count: group.records.len(),
            })
            .collect();

        PortfolioSummary {
            total_assets: records.len(),
            total_value: self.portfolio_total(records),
            categories,
        }
    }
}

impl Default for AggregationService {
    fn default() -> Self {
        Self::new()
    }
}
