//! Data plane: database connection, schema, change feed
//!
//! One Turso (async SQLite-compatible) database holds every collection.
//! Each collection is a table of `(id, data)` where `data` is the entity's
//! JSON document, plus helper columns on the tables that get filtered
//! (`device_id`, `status`, `created_at`).
//!
//! # Change feed
//!
//! Every committed write publishes a [`Change`] on a broadcast channel —
//! the document-store `listen` analog. Within one collection, changes are
//! observed in commit order; nothing is guaranteed across collections, so
//! consumers that need several collections must join on their own readiness
//! (the catalog feed does exactly that). A lagged receiver just misses
//! notifications and resyncs by re-reading; the feed is a refresh hint,
//! never a correctness input.

use tokio::sync::broadcast;
use tracing::{debug, info};
use turso::{Builder, Database};

use crate::error::Result;

/// Capacity of the change broadcast channel
const CHANGE_CHANNEL_CAPACITY: usize = 256;

/// A backend collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Countries,
    Categories,
    Stores,
    Coupons,
    Leads,
    StoreRequests,
    Notifications,
    Reports,
    CouponEvents,
    Settings,
}

impl Collection {
    /// Table name for this collection
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Countries => "countries",
            Self::Categories => "categories",
            Self::Stores => "stores",
            Self::Coupons => "coupons",
            Self::Leads => "leads",
            Self::StoreRequests => "store_requests",
            Self::Notifications => "notifications",
            Self::Reports => "reports",
            Self::CouponEvents => "coupon_events",
            Self::Settings => "settings",
        }
    }
}

/// A committed write, published on the change feed
#[derive(Debug, Clone)]
pub struct Change {
    /// Collection the write landed in
    pub collection: Collection,
    /// Document id
    pub id: String,
}

/// Document store manager
///
/// Owns the database handle and the change feed. Repositories borrow the
/// plane; `Database` is internally reference-counted so connections are
/// cheap.
pub struct DataPlane {
    db: Database,
    changes: broadcast::Sender<Change>,
}

impl DataPlane {
    /// Open a file-backed plane at `{data_dir}/wafr/data.db`
    pub async fn new(data_dir: impl Into<String>) -> Result<Self> {
        let data_dir = data_dir.into();
        let dir = format!("{}/wafr", data_dir);
        std::fs::create_dir_all(&dir).map_err(|e| {
            wafr_model::ModelError::validation("dataDir", format!("cannot create directory: {}", e))
        })?;

        let path = format!("{}/data.db", dir);
        info!(path = %path, "Opening data plane database");
        let db = Builder::new_local(&path).build().await?;

        let plane = Self::wrap(db);
        plane.init_schema().await?;
        Ok(plane)
    }

    /// Open an in-memory plane (tests)
    pub async fn new_memory() -> Result<Self> {
        let db = Builder::new_local(":memory:").build().await?;
        let plane = Self::wrap(db);
        plane.init_schema().await?;
        Ok(plane)
    }

    fn wrap(db: Database) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self { db, changes }
    }

    /// The underlying database
    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Subscribe to the change feed
    pub fn watch(&self) -> broadcast::Receiver<Change> {
        self.changes.subscribe()
    }

    /// Publish a committed write
    ///
    /// Send errors mean nobody is listening, which is fine.
    pub(crate) fn publish(&self, collection: Collection, id: &str) {
        let _ = self.changes.send(Change {
            collection,
            id: id.to_string(),
        });
        debug!(collection = collection.as_str(), id, "change published");
    }

    /// Create all tables and indexes, idempotently
    async fn init_schema(&self) -> Result<()> {
        let conn = self.db.connect()?;

        for schema in [
            SCHEMA_COUNTRIES,
            SCHEMA_CATEGORIES,
            SCHEMA_STORES,
            SCHEMA_COUPONS,
            SCHEMA_LEADS,
            SCHEMA_STORE_REQUESTS,
            SCHEMA_NOTIFICATIONS,
            SCHEMA_REPORTS,
            SCHEMA_COUPON_EVENTS,
            SCHEMA_SETTINGS,
            INDEX_LEADS_DEVICE,
            INDEX_REQUESTS_STATUS,
            INDEX_REQUESTS_DEVICE,
            INDEX_NOTIFICATIONS_DEVICE,
            INDEX_EVENTS_COUPON,
            INDEX_EVENTS_CREATED,
        ] {
            conn.execute(schema, ()).await?;
        }

        info!("Data plane schema initialized");
        Ok(())
    }
}

// =============================================================================
// Schema
// =============================================================================

const SCHEMA_COUNTRIES: &str = r#"
CREATE TABLE IF NOT EXISTS countries (
    id TEXT PRIMARY KEY,
    data TEXT NOT NULL
)
"#;

const SCHEMA_CATEGORIES: &str = r#"
CREATE TABLE IF NOT EXISTS categories (
    id TEXT PRIMARY KEY,
    data TEXT NOT NULL
)
"#;

const SCHEMA_STORES: &str = r#"
CREATE TABLE IF NOT EXISTS stores (
    id TEXT PRIMARY KEY,
    data TEXT NOT NULL
)
"#;

const SCHEMA_COUPONS: &str = r#"
CREATE TABLE IF NOT EXISTS coupons (
    id TEXT PRIMARY KEY,
    data TEXT NOT NULL
)
"#;

const SCHEMA_LEADS: &str = r#"
CREATE TABLE IF NOT EXISTS leads (
    id TEXT PRIMARY KEY,
    device_id TEXT NOT NULL,
    created_at TEXT NOT NULL,
    data TEXT NOT NULL
)
"#;

const SCHEMA_STORE_REQUESTS: &str = r#"
CREATE TABLE IF NOT EXISTS store_requests (
    id TEXT PRIMARY KEY,
    device_id TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'pending',
    created_at TEXT NOT NULL,
    data TEXT NOT NULL
)
"#;

const SCHEMA_NOTIFICATIONS: &str = r#"
CREATE TABLE IF NOT EXISTS notifications (
    id TEXT PRIMARY KEY,
    device_id TEXT NOT NULL,
    created_at TEXT NOT NULL,
    data TEXT NOT NULL
)
"#;

const SCHEMA_REPORTS: &str = r#"
CREATE TABLE IF NOT EXISTS reports (
    id TEXT PRIMARY KEY,
    created_at TEXT NOT NULL,
    data TEXT NOT NULL
)
"#;

const SCHEMA_COUPON_EVENTS: &str = r#"
CREATE TABLE IF NOT EXISTS coupon_events (
    id TEXT PRIMARY KEY,
    coupon_id TEXT NOT NULL,
    created_at TEXT NOT NULL,
    data TEXT NOT NULL
)
"#;

const SCHEMA_SETTINGS: &str = r#"
CREATE TABLE IF NOT EXISTS settings (
    id TEXT PRIMARY KEY,
    data TEXT NOT NULL
)
"#;

const INDEX_LEADS_DEVICE: &str =
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_leads_device ON leads(device_id)";

const INDEX_REQUESTS_STATUS: &str =
    "CREATE INDEX IF NOT EXISTS idx_requests_status ON store_requests(status)";

const INDEX_REQUESTS_DEVICE: &str =
    "CREATE INDEX IF NOT EXISTS idx_requests_device ON store_requests(device_id)";

const INDEX_NOTIFICATIONS_DEVICE: &str =
    "CREATE INDEX IF NOT EXISTS idx_notifications_device ON notifications(device_id)";

const INDEX_EVENTS_COUPON: &str =
    "CREATE INDEX IF NOT EXISTS idx_events_coupon ON coupon_events(coupon_id)";

const INDEX_EVENTS_CREATED: &str =
    "CREATE INDEX IF NOT EXISTS idx_events_created ON coupon_events(created_at)";
