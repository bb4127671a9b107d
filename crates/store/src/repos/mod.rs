//! Collection repositories
//!
//! One repository per collection, borrowed from the [`DataPlane`]. Each
//! write validates first, stores the entity's JSON document, and publishes
//! on the change feed after commit.
//!
//! [`DataPlane`]: crate::DataPlane

mod docs;
mod events;
mod leads;
mod notifications;
mod reports;
mod requests;
mod settings;

pub use docs::Documents;
pub use events::EventRepo;
pub use leads::LeadRepo;
pub use notifications::NotificationRepo;
pub use reports::ReportRepo;
pub use requests::{NewStoreDetails, StoreRequestRepo};
pub use settings::SettingsRepo;

/// Extract a text column from a row, empty string when absent
pub(crate) fn text_column(row: &turso::Row, index: usize) -> crate::Result<String> {
    Ok(row
        .get_value(index)?
        .as_text()
        .cloned()
        .unwrap_or_default())
}
