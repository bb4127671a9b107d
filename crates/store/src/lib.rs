//! Wafr document store
//!
//! Turso-backed persistence for every backend collection, with an
//! in-process change feed standing in for the managed document store's
//! `listen(query)` semantics.
//!
//! # Architecture
//!
//! | Piece | Role |
//! |-------|------|
//! | [`DataPlane`] | Database handle, schema, change broadcast |
//! | Repositories | Per-collection CRUD with validation at the write path |
//! | [`Change`] feed | Refresh hints for live consumers (the catalog feed) |
//!
//! # Usage
//!
//! ```ignore
//! use wafr_store::DataPlane;
//!
//! // File-based (production)
//! let plane = DataPlane::new("data").await?;
//!
//! // In-memory (testing)
//! let plane = DataPlane::new_memory().await?;
//!
//! let coupons = plane.coupons().list_active().await?;
//! let mut changes = plane.watch();
//! ```

pub mod error;
pub mod plane;
pub mod repos;

pub use error::{Result, StoreError};
pub use plane::{Change, Collection, DataPlane};
pub use repos::{
    Documents, EventRepo, LeadRepo, NewStoreDetails, NotificationRepo, ReportRepo, SettingsRepo,
    StoreRequestRepo,
};

use wafr_model::{Category, Country, Coupon, Entity, Store};

/// Ties an entity type to the collection it lives in
///
/// Implemented for the four catalog entities served by the generic
/// [`Documents`] repository, so callers can write `plane.docs::<T>()` in
/// generic code.
pub trait CatalogEntity: Entity {
    fn collection() -> Collection;
}

impl CatalogEntity for Country {
    fn collection() -> Collection {
        Collection::Countries
    }
}

impl CatalogEntity for Category {
    fn collection() -> Collection {
        Collection::Categories
    }
}

impl CatalogEntity for Store {
    fn collection() -> Collection {
        Collection::Stores
    }
}

impl CatalogEntity for Coupon {
    fn collection() -> Collection {
        Collection::Coupons
    }
}

impl DataPlane {
    /// Generic repository for a catalog entity type
    pub fn docs<T: CatalogEntity>(&self) -> Documents<'_, T> {
        Documents::new(self, T::collection())
    }

    /// Country repository
    pub fn countries(&self) -> Documents<'_, Country> {
        Documents::new(self, Collection::Countries)
    }

    /// Category repository
    pub fn categories(&self) -> Documents<'_, Category> {
        Documents::new(self, Collection::Categories)
    }

    /// Store repository
    pub fn stores(&self) -> Documents<'_, Store> {
        Documents::new(self, Collection::Stores)
    }

    /// Coupon repository
    pub fn coupons(&self) -> Documents<'_, Coupon> {
        Documents::new(self, Collection::Coupons)
    }

    /// Lead repository
    pub fn leads(&self) -> LeadRepo<'_> {
        LeadRepo::new(self)
    }

    /// Store request repository
    pub fn store_requests(&self) -> StoreRequestRepo<'_> {
        StoreRequestRepo::new(self)
    }

    /// Notification repository
    pub fn notifications(&self) -> NotificationRepo<'_> {
        NotificationRepo::new(self)
    }

    /// Report repository
    pub fn reports(&self) -> ReportRepo<'_> {
        ReportRepo::new(self)
    }

    /// Usage event repository
    pub fn events(&self) -> EventRepo<'_> {
        EventRepo::new(self)
    }

    /// Settings repository
    pub fn settings(&self) -> SettingsRepo<'_> {
        SettingsRepo::new(self)
    }
}
