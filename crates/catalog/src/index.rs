//! Entity indexes
//!
//! id → entity maps, built once per snapshot so relation resolution is
//! O(1) per lookup.

use std::collections::HashMap;

use wafr_model::{Category, Country, Store};

/// Lookup indexes over the relation targets of a coupon
#[derive(Debug, Clone, Default)]
pub struct EntityIndexes {
    stores: HashMap<String, Store>,
    categories: HashMap<String, Category>,
    countries: HashMap<String, Country>,
}

impl EntityIndexes {
    /// Build indexes from loaded collections
    pub fn build(stores: &[Store], categories: &[Category], countries: &[Country]) -> Self {
        Self {
            stores: stores.iter().map(|s| (s.id.clone(), s.clone())).collect(),
            categories: categories
                .iter()
                .map(|c| (c.id.clone(), c.clone()))
                .collect(),
            countries: countries
                .iter()
                .map(|c| (c.id.clone(), c.clone()))
                .collect(),
        }
    }

    pub fn store(&self, id: &str) -> Option<&Store> {
        self.stores.get(id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.get(id)
    }

    pub fn country(&self, id: &str) -> Option<&Country> {
        self.countries.get(id)
    }
}
