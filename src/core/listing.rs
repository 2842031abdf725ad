//! Inventory list: search filter and derived statistics

use crate::core::category::ClothCategory;
use crate::core::format::format_inr;
use crate::core::record::InventoryRecord;
use indexmap::IndexMap;
use serde::Serialize;

/// Records whose owner name, cloth id or category contain `term`
///
/// Matching is case-insensitive. An empty term matches everything. The input
/// slice is never modified.
pub fn filter_records<'a>(records: &'a [InventoryRecord], term: &str) -> Vec<&'a InventoryRecord> {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return records.iter().collect();
    }
    records.iter().filter(|r| r.matches(&needle)).collect()
}

/// Count of records in one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: ClothCategory,
    pub count: usize,
}

/// Aggregates shown above the inventory list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub total_items: usize,
    pub category_count: usize,
    /// Mean purchase price rounded to the nearest rupee; 0 for an empty store
    pub average_purchase_price: u64,
    /// Sum of all purchase prices
    pub total_purchase_value: u64,
    /// Every item is available while rental tracking does not exist
    pub available_items: usize,
    /// Rental tracking is not implemented; always 0
    pub rented_items: usize,
    /// Per-category counts in order of first appearance
    pub categories: Vec<CategoryCount>,
}

impl InventoryStats {
    pub fn compute(records: &[InventoryRecord]) -> Self {
        let mut by_category: IndexMap<ClothCategory, usize> = IndexMap::new();
        for record in records {
            *by_category.entry(record.cloth_category).or_default() += 1;
        }

        Self {
            total_items: records.len(),
            category_count: by_category.len(),
            average_purchase_price: average_purchase_price(records),
            total_purchase_value: total_purchase_value(records),
            available_items: records.len(),
            rented_items: 0,
            categories: by_category
                .into_iter()
                .map(|(category, count)| CategoryCount { category, count })
                .collect(),
        }
    }

    pub fn average_purchase_price_display(&self) -> String {
        format_inr(self.average_purchase_price)
    }

    pub fn total_purchase_value_display(&self) -> String {
        format_inr(self.total_purchase_value)
    }
}

fn purchase_sum(records: &[InventoryRecord]) -> u128 {
    records.iter().map(|r| r.purchase_price as u128).sum()
}

/// Sum of purchase prices, saturating at `u64::MAX`
fn total_purchase_value(records: &[InventoryRecord]) -> u64 {
    u64::try_from(purchase_sum(records)).unwrap_or(u64::MAX)
}

fn average_purchase_price(records: &[InventoryRecord]) -> u64 {
    if records.is_empty() {
        return 0;
    }
    let n = records.len() as u128;
    let sum = purchase_sum(records);
    // round half up, which is half away from zero for non-negative values
    ((sum + n / 2) / n) as u64
}

/// One card in the inventory list
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemView {
    #[serde(flatten)]
    pub record: InventoryRecord,
    pub purchase_price_display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rental_price_display: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resale_price_display: Option<String>,
    pub receipt_url: String,
}

impl From<&InventoryRecord> for InventoryItemView {
    fn from(record: &InventoryRecord) -> Self {
        Self {
            purchase_price_display: format_inr(record.purchase_price),
            rental_price_display: record.rental_price.map(format_inr),
            resale_price_display: record.resale_price.map(format_inr),
            receipt_url: record.receipt_path(),
            record: record.clone(),
        }
    }
}

/// Snapshot of the inventory list for one search term
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryListing {
    pub items: Vec<InventoryItemView>,
    /// Number of items matching the search
    pub count: usize,
    /// Statistics over the whole store, independent of the search
    pub stats: InventoryStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl InventoryListing {
    pub fn build(records: &[InventoryRecord], search: Option<&str>) -> Self {
        let items: Vec<InventoryItemView> = filter_records(records, search.unwrap_or_default())
            .into_iter()
            .map(InventoryItemView::from)
            .collect();

        Self {
            count: items.len(),
            items,
            stats: InventoryStats::compute(records),
            search: search.map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(cloth_id: &str, owner: &str, category: ClothCategory, price: u64) -> InventoryRecord {
        InventoryRecord {
            cloth_id: cloth_id.to_string(),
            owner_name: owner.to_string(),
            owner_mobile: "9876543210".to_string(),
            cloth_category: category,
            cloth_age: 3,
            purchase_price: price,
            rental_price: None,
            resale_price: Some(price / 2),
            date: "17 October 2026".to_string(),
            created_at: "2026-10-17T04:30:00.000Z".to_string(),
        }
    }

    fn sample() -> Vec<InventoryRecord> {
        vec![
            record("LUX-EVG-1-001", "Asha Rao", ClothCategory::EveningGown, 15000),
            record("LUX-CDR-2-002", "Meera Iyer", ClothCategory::CocktailDress, 8000),
            record("LUX-EVG-3-003", "Kavya", ClothCategory::EveningGown, 12001),
        ]
    }

    #[test]
    fn test_filter_is_case_insensitive_across_fields() {
        let records = sample();
        assert_eq!(filter_records(&records, "ASHA").len(), 1);
        assert_eq!(filter_records(&records, "lux-evg").len(), 2);
        assert_eq!(filter_records(&records, "cocktail").len(), 1);
        assert_eq!(filter_records(&records, "gown").len(), 2);
    }

    #[test]
    fn test_empty_term_matches_all() {
        let records = sample();
        assert_eq!(filter_records(&records, "").len(), 3);
    }

    #[test]
    fn test_whitespace_is_part_of_the_term() {
        let records = sample();
        assert_eq!(filter_records(&records, "asha rao").len(), 1);
        assert!(filter_records(&records, "   ").is_empty());
    }

    #[test]
    fn test_no_match_leaves_records_untouched() {
        let records = sample();
        let before = records.clone();
        assert!(filter_records(&records, "saree").is_empty());
        assert_eq!(records, before);
    }

    #[test]
    fn test_stats_on_empty_store() {
        let stats = InventoryStats::compute(&[]);
        assert_eq!(stats.total_items, 0);
        assert_eq!(stats.category_count, 0);
        assert_eq!(stats.average_purchase_price, 0);
        assert_eq!(stats.average_purchase_price_display(), "₹0");
        assert!(stats.categories.is_empty());
    }

    #[test]
    fn test_stats_aggregates() {
        let stats = InventoryStats::compute(&sample());
        assert_eq!(stats.total_items, 3);
        assert_eq!(stats.category_count, 2);
        // (15000 + 8000 + 12001) / 3 = 11667
        assert_eq!(stats.average_purchase_price, 11667);
        assert_eq!(stats.rented_items, 0);
        assert_eq!(stats.available_items, 3);
        assert_eq!(stats.total_purchase_value, 35001);
        assert_eq!(stats.total_purchase_value_display(), "₹35,001");
        assert_eq!(
            stats.categories,
            vec![
                CategoryCount { category: ClothCategory::EveningGown, count: 2 },
                CategoryCount { category: ClothCategory::CocktailDress, count: 1 },
            ]
        );
    }

    #[test]
    fn test_average_rounds_half_up() {
        let records = vec![
            record("a", "A", ClothCategory::FormalDress, 1),
            record("b", "B", ClothCategory::FormalDress, 2),
        ];
        assert_eq!(InventoryStats::compute(&records).average_purchase_price, 2);
    }

    #[test]
    fn test_huge_prices_saturate_total() {
        let records = vec![
            record("a", "A", ClothCategory::FormalDress, u64::MAX),
            record("b", "B", ClothCategory::FormalDress, 1),
        ];
        let stats = InventoryStats::compute(&records);
        assert_eq!(stats.total_purchase_value, u64::MAX);
        assert_eq!(stats.average_purchase_price, u64::MAX / 2 + 1);
        assert!(stats.total_purchase_value_display().starts_with('₹'));
    }

    #[test]
    fn test_listing_stats_ignore_search() {
        let records = sample();
        let listing = InventoryListing::build(&records, Some("meera"));
        assert_eq!(listing.count, 1);
        assert_eq!(listing.stats.total_items, 3);
        assert_eq!(listing.items[0].purchase_price_display, "₹8,000");
        assert_eq!(listing.items[0].resale_price_display.as_deref(), Some("₹4,000"));
        assert!(listing.items[0].rental_price_display.is_none());
    }

    #[test]
    fn test_item_view_flattens_record() {
        let records = sample();
        let value = serde_json::to_value(InventoryItemView::from(&records[0])).unwrap();
        assert_eq!(value["clothId"], "LUX-EVG-1-001");
        assert_eq!(value["receiptUrl"], "/receipt/LUX-EVG-1-001");
        assert_eq!(value["purchasePriceDisplay"], "₹15,000");
    }
}
