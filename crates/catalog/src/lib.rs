//! Wafr catalog reconciliation
//!
//! Turns the stored collections into the rows the app renders, in five
//! steps:
//!
//! 1. **Indexes** — id → entity maps built once per snapshot
//!    ([`EntityIndexes`]).
//! 2. **Relation resolution** — denormalizes store/category/country display
//!    fields onto each coupon, substituting fallbacks for broken references
//!    ([`resolve`]).
//! 3. **Variant expansion** — one base row plus one row per variant, keyed
//!    by `(coupon_id, variant_id-or-base)` ([`expand`]).
//! 4. **Filter/sort/group** — search, scope filters, stable sorts, and the
//!    per-store usage grouping ([`RowQuery`], [`group_by_store`]).
//! 5. **Stats** — discount extraction and dashboard aggregates
//!    ([`extract_percent`], [`CatalogStats`]).
//!
//! [`CatalogFeed`] is the readiness join over the independently-loaded
//! source collections: a single state value that stays `Loading` until
//! every source has delivered at least once. [`LiveCatalog`] wires that
//! join to the store's change feed.

mod collate;
mod discount;
mod error;
mod feed;
mod index;
mod live;
mod query;
mod resolve;
mod row;
mod stats;

#[cfg(test)]
mod discount_test;
#[cfg(test)]
mod feed_test;
#[cfg(test)]
mod row_test;

pub use collate::{normalize_arabic, title_cmp};
pub use discount::{average_discount, best_discount, extract_percent};
pub use error::{CatalogError, Result};
pub use feed::{CatalogFeed, CatalogState, Snapshot};
pub use index::EntityIndexes;
pub use live::LiveCatalog;
pub use query::{
    group_by_store, GroupPage, RowQuery, ScopeFilter, SortMode, StoreGroup, GROUP_PAGE_SIZE,
};
pub use resolve::{resolve, DisplayCoupon};
pub use row::{attach_usage, expand, CodeRow, RowKind};
pub use stats::{CatalogStats, CategoryCount};
