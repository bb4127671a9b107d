//! Readiness join over the catalog source collections
//!
//! The four sources load independently and in no particular order. State
//! stays `Loading` until every one of them has delivered at least once;
//! only then is a snapshot built. A failed load parks the feed in `Failed`
//! until the next delivery.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use wafr_model::{Category, Country, Coupon, Store};

use crate::index::EntityIndexes;
use crate::resolve::resolve;
use crate::row::{expand, CodeRow};

/// A fully reconciled view of the catalog at one point in time
///
/// Immutable once built; consumers share it behind an `Arc` and queries
/// run against `rows` without further joins.
#[derive(Debug)]
pub struct Snapshot {
    pub countries: Vec<Country>,
    pub categories: Vec<Category>,
    pub stores: Vec<Store>,
    pub coupons: Vec<Coupon>,
    /// Expanded rows, base-first per coupon, in coupon order
    pub rows: Vec<CodeRow>,
    pub built_at: DateTime<Utc>,
}

impl Snapshot {
    /// Resolve relations and expand variants over the given collections
    pub fn build(
        countries: Vec<Country>,
        categories: Vec<Category>,
        stores: Vec<Store>,
        coupons: Vec<Coupon>,
    ) -> Self {
        let indexes = EntityIndexes::build(&stores, &categories, &countries);

        let mut rows = Vec::new();
        for coupon in &coupons {
            let display = resolve(coupon, &indexes);
            rows.extend(expand(&display));
        }

        Self {
            countries,
            categories,
            stores,
            coupons,
            rows,
            built_at: Utc::now(),
        }
    }
}

/// The single value consumers observe
#[derive(Debug, Clone, Default)]
pub enum CatalogState {
    #[default]
    Loading,
    Ready(Arc<Snapshot>),
    Failed {
        message: String,
    },
}

impl CatalogState {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// The current snapshot, if one exists
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        match self {
            Self::Ready(snap) => Some(Arc::clone(snap)),
            _ => None,
        }
    }
}

/// Pure state machine joining the source deliveries
///
/// Holds the latest delivery per source. No I/O here; [`crate::LiveCatalog`]
/// feeds it from the store's change feed.
#[derive(Debug, Default)]
pub struct CatalogFeed {
    countries: Option<Vec<Country>>,
    categories: Option<Vec<Category>>,
    stores: Option<Vec<Store>>,
    coupons: Option<Vec<Coupon>>,
    failure: Option<String>,
}

impl CatalogFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_countries(&mut self, countries: Vec<Country>) {
        self.countries = Some(countries);
        self.failure = None;
    }

    pub fn on_categories(&mut self, categories: Vec<Category>) {
        self.categories = Some(categories);
        self.failure = None;
    }

    pub fn on_stores(&mut self, stores: Vec<Store>) {
        self.stores = Some(stores);
        self.failure = None;
    }

    pub fn on_coupons(&mut self, coupons: Vec<Coupon>) {
        self.coupons = Some(coupons);
        self.failure = None;
    }

    /// Record a failed source load; clears on the next delivery
    pub fn on_failure(&mut self, message: impl Into<String>) {
        self.failure = Some(message.into());
    }

    /// The join: `Loading` until all four sources have delivered
    pub fn state(&self) -> CatalogState {
        if let Some(message) = &self.failure {
            return CatalogState::Failed {
                message: message.clone(),
            };
        }
        match (&self.countries, &self.categories, &self.stores, &self.coupons) {
            (Some(countries), Some(categories), Some(stores), Some(coupons)) => {
                CatalogState::Ready(Arc::new(Snapshot::build(
                    countries.clone(),
                    categories.clone(),
                    stores.clone(),
                    coupons.clone(),
                )))
            }
            _ => CatalogState::Loading,
        }
    }
}
