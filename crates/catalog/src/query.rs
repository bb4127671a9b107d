//! Filter, sort, and group engine
//!
//! Filters are pure predicate intersections, so applying them in any order
//! yields the same rows. Sorts are stable: equal-key rows keep their
//! pre-sort relative order, which pagination depends on.

use serde::Deserialize;

use crate::collate::title_cmp;
use crate::row::CodeRow;

/// Rows revealed per store group before "show more"
pub const GROUP_PAGE_SIZE: usize = 50;

/// Scope filter over one relation dimension
///
/// The literal id `"all"` (any case, covering the admin `"ALL"` spelling)
/// is a designated sentinel meaning no filter, distinct from an absent
/// parameter only in where it comes from; both parse to [`ScopeFilter::Any`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ScopeFilter {
    #[default]
    Any,
    Id(String),
}

impl ScopeFilter {
    /// Parse a query-string value
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            None => Self::Any,
            Some(v) if v.eq_ignore_ascii_case("all") => Self::Any,
            Some(v) => Self::Id(v.to_string()),
        }
    }

    fn matches(&self, id: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Id(want) => want == id,
        }
    }
}

/// Sort strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Uses descending, ties by most recent use descending
    #[default]
    Popular,
    /// Title ascending, Arabic-aware
    TitleAsc,
    /// Title descending, Arabic-aware
    TitleDesc,
    /// Creation time descending (admin context)
    Newest,
}

impl SortMode {
    /// Parse a query-string value; unknown input falls back to popular
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("a-z") => Self::TitleAsc,
            Some("z-a") => Self::TitleDesc,
            Some("newest") => Self::Newest,
            _ => Self::Popular,
        }
    }
}

/// A complete row query: search, scope filters, sort
#[derive(Debug, Clone, Default)]
pub struct RowQuery {
    /// Free-text search; blank is a no-op
    pub search: String,
    pub category: ScopeFilter,
    pub store: ScopeFilter,
    pub country: ScopeFilter,
    pub sort: SortMode,
}

impl RowQuery {
    /// Apply the query: filter, then stable-sort
    pub fn apply(&self, rows: &[CodeRow]) -> Vec<CodeRow> {
        let needle = self.search.trim().to_lowercase();

        let mut out: Vec<CodeRow> = rows
            .iter()
            .filter(|row| {
                self.category.matches(&row.category_id)
                    && self.store.matches(&row.store_id)
                    && self.country.matches(&row.country_id)
                    && search_matches(row, &needle)
            })
            .cloned()
            .collect();

        sort_rows(&mut out, self.sort);
        out
    }
}

/// Case-insensitive substring over code OR store name
fn search_matches(row: &CodeRow, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    row.code.to_lowercase().contains(needle) || row.store_name.to_lowercase().contains(needle)
}

/// Stable in-place sort by the chosen mode
pub fn sort_rows(rows: &mut [CodeRow], sort: SortMode) {
    match sort {
        SortMode::Popular => rows.sort_by(|a, b| {
            b.uses
                .cmp(&a.uses)
                .then_with(|| b.last_used_at.cmp(&a.last_used_at))
        }),
        SortMode::TitleAsc => rows.sort_by(|a, b| title_cmp(&a.title, &b.title)),
        SortMode::TitleDesc => rows.sort_by(|a, b| title_cmp(&b.title, &a.title)),
        SortMode::Newest => rows.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
}

// =============================================================================
// Store grouping (admin usage views)
// =============================================================================

/// Rows grouped under one store
#[derive(Debug, Clone)]
pub struct StoreGroup {
    pub store_id: String,
    pub store_name: String,
    /// Sum of uses across the group's rows
    pub total_uses: u64,
    /// Rows sorted by (uses desc, last used desc)
    pub rows: Vec<CodeRow>,
}

/// A page of a store group, for the "show more" affordance
#[derive(Debug)]
pub struct GroupPage<'a> {
    /// The visible slice
    pub rows: &'a [CodeRow],
    /// Rows hidden behind "show more"
    pub remaining: usize,
}

impl StoreGroup {
    /// The visible slice given how many rows the client has revealed
    ///
    /// `shown == 0` means the initial page. No re-fetch: the full group is
    /// already in memory, paging only slices it.
    pub fn page(&self, shown: usize) -> GroupPage<'_> {
        let visible = if shown == 0 { GROUP_PAGE_SIZE } else { shown };
        let visible = visible.min(self.rows.len());
        GroupPage {
            rows: &self.rows[..visible],
            remaining: self.rows.len() - visible,
        }
    }
}

/// Group rows by store for the admin usage view
///
/// Rows within a group sort by (uses desc, last used desc); groups order
/// by total uses descending. Both sorts are stable.
pub fn group_by_store(rows: Vec<CodeRow>) -> Vec<StoreGroup> {
    let mut groups: Vec<StoreGroup> = Vec::new();

    for row in rows {
        match groups.iter_mut().find(|g| g.store_id == row.store_id) {
            Some(group) => {
                group.total_uses += row.uses;
                group.rows.push(row);
            }
            None => groups.push(StoreGroup {
                store_id: row.store_id.clone(),
                store_name: row.store_name.clone(),
                total_uses: row.uses,
                rows: vec![row],
            }),
        }
    }

    for group in &mut groups {
        group.rows.sort_by(|a, b| {
            b.uses
                .cmp(&a.uses)
                .then_with(|| b.last_used_at.cmp(&a.last_used_at))
        });
    }
    groups.sort_by(|a, b| b.total_uses.cmp(&a.total_uses));
    groups
}
