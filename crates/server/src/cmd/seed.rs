//! Seed command - load a JSON fixture bundle into the store
//!
//! The bundle is one JSON object with an array per collection, in the wire
//! shape the backend stores:
//!
//! ```json
//! {
//!   "countries":  [{"id": "kw", "nameAr": "الكويت", ...}],
//!   "categories": [...],
//!   "stores":     [...],
//!   "coupons":    [...],
//!   "settings":   {"appName": "وفر", ...}
//! }
//! ```
//!
//! Documents run through the same decoders and validation as admin writes;
//! a bad document fails the whole seed rather than half-loading.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;
use tracing::info;

use wafr_model::{AppSettings, Category, Country, Coupon, Store};
use wafr_store::{CatalogEntity, DataPlane};

use crate::cmd::load_config;

/// Seed command arguments
#[derive(Args, Debug)]
pub struct SeedArgs {
    /// Path to the JSON fixture bundle
    #[arg(short, long)]
    pub file: PathBuf,

    /// Path to configuration file (defaults to configs/wafr.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Run the seed command
pub async fn run(args: SeedArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;

    let contents = std::fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let bundle: Value = serde_json::from_str(&contents)
        .with_context(|| format!("parsing {}", args.file.display()))?;

    let plane = if config.store.memory {
        DataPlane::new_memory().await?
    } else {
        DataPlane::new(&config.store.data_dir).await?
    };
    let plane = Arc::new(plane);

    let countries = seed_collection::<Country>(&plane, &bundle, "countries").await?;
    let categories = seed_collection::<Category>(&plane, &bundle, "categories").await?;
    let stores = seed_collection::<Store>(&plane, &bundle, "stores").await?;
    let coupons = seed_collection::<Coupon>(&plane, &bundle, "coupons").await?;

    if let Some(settings) = bundle.get("settings") {
        let settings: AppSettings =
            serde_json::from_value(settings.clone()).context("decoding settings")?;
        plane.settings().put(&settings).await?;
        info!("seeded settings");
    }

    info!(
        countries,
        categories, stores, coupons, "seed complete"
    );
    Ok(())
}

/// Decode and write one collection's array; returns how many documents
async fn seed_collection<T: CatalogEntity>(
    plane: &DataPlane,
    bundle: &Value,
    key: &'static str,
) -> Result<usize> {
    let Some(docs) = bundle.get(key) else {
        return Ok(0);
    };
    let docs = docs
        .as_array()
        .with_context(|| format!("'{}' is not an array", key))?;

    for (index, doc) in docs.iter().enumerate() {
        let id = doc
            .get("id")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let entity =
            T::decode(&id, doc).with_context(|| format!("decoding {}[{}]", key, index))?;
        plane
            .docs::<T>()
            .put(&entity)
            .await
            .with_context(|| format!("writing {}[{}]", key, index))?;
    }

    info!(count = docs.len(), collection = key, "seeded collection");
    Ok(docs.len())
}
