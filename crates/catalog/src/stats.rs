//! Dashboard aggregates over a snapshot

use serde::Serialize;

use crate::discount::{average_discount, best_discount};
use crate::feed::Snapshot;

/// Coupon count for one category
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub category_id: String,
    pub name_ar: String,
    pub coupons: u64,
}

/// Admin dashboard numbers
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub coupons: u64,
    pub stores: u64,
    /// Highest percentage across all coupons and their variants
    pub best_discount: Option<f64>,
    /// Mean of per-coupon best discounts; coupons with no parseable
    /// percentage are left out rather than counted as zero
    pub average_discount: Option<f64>,
    /// Per-category counts in the categories' own sort order
    pub per_category: Vec<CategoryCount>,
}

impl CatalogStats {
    pub fn compute(snapshot: &Snapshot) -> Self {
        let per_coupon: Vec<Option<f64>> = snapshot
            .coupons
            .iter()
            .map(|c| best_discount(&c.discount_label, &c.variants))
            .collect();

        let best = per_coupon
            .iter()
            .flatten()
            .copied()
            .fold(None, |acc: Option<f64>, v| {
                Some(acc.map_or(v, |a| a.max(v)))
            });

        let mut categories: Vec<_> = snapshot.categories.iter().collect();
        categories.sort_by_key(|c| c.sort_order);
        let per_category = categories
            .into_iter()
            .map(|category| CategoryCount {
                category_id: category.id.clone(),
                name_ar: category.display_name_ar().to_string(),
                coupons: snapshot
                    .coupons
                    .iter()
                    .filter(|c| c.category_id == category.id)
                    .count() as u64,
            })
            .collect();

        Self {
            coupons: snapshot.coupons.len() as u64,
            stores: snapshot.stores.len() as u64,
            best_discount: best,
            average_discount: average_discount(&per_coupon),
            per_category,
        }
    }
}

#[cfg(test)]
mod tests {
    use wafr_model::{Category, Coupon};

    use super::*;

    fn snapshot_with(coupons: Vec<Coupon>) -> Snapshot {
        let mut food = Category::new("مطاعم", "Food", 2);
        food.id = "food".into();
        let mut fashion = Category::new("أزياء", "Fashion", 1);
        fashion.id = "fashion".into();
        Snapshot::build(Vec::new(), vec![food, fashion], Vec::new(), coupons)
    }

    fn coupon(category: &str, label: &str) -> Coupon {
        let mut c = Coupon::new("عرض", "X", "s1", category, "sa");
        c.discount_label = label.into();
        c
    }

    #[test]
    fn discounts_ignore_unparseable_labels() {
        let stats = CatalogStats::compute(&snapshot_with(vec![
            coupon("food", "خصم 10%"),
            coupon("food", "شحن مجاني"),
            coupon("fashion", "خصم 30%"),
        ]));
        assert_eq!(stats.best_discount, Some(30.0));
        assert_eq!(stats.average_discount, Some(20.0));
    }

    #[test]
    fn empty_catalog_has_no_discounts() {
        let stats = CatalogStats::compute(&snapshot_with(Vec::new()));
        assert_eq!(stats.coupons, 0);
        assert_eq!(stats.best_discount, None);
        assert_eq!(stats.average_discount, None);
    }

    #[test]
    fn category_counts_follow_sort_order() {
        let stats = CatalogStats::compute(&snapshot_with(vec![
            coupon("food", ""),
            coupon("food", ""),
            coupon("fashion", ""),
        ]));
        assert_eq!(stats.per_category.len(), 2);
        assert_eq!(stats.per_category[0].category_id, "fashion");
        assert_eq!(stats.per_category[0].coupons, 1);
        assert_eq!(stats.per_category[1].coupons, 2);
    }
}
