//! Live catalog: change feed → readiness join → watch channel

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use wafr_store::{Change, Collection, DataPlane};

use crate::error::Result;
use crate::feed::{CatalogFeed, CatalogState};

/// Handle to the background reconciliation task
///
/// Subscribes to [`DataPlane::watch`], keeps a [`CatalogFeed`] current, and
/// publishes every state change through a `watch` channel. Dropping the
/// handle stops the task.
pub struct LiveCatalog {
    plane: Arc<DataPlane>,
    feed: Arc<Mutex<CatalogFeed>>,
    state: watch::Sender<CatalogState>,
    task: JoinHandle<()>,
}

impl LiveCatalog {
    /// Spawn the task: initial full load, then debounced incremental reloads
    pub fn spawn(plane: Arc<DataPlane>, debounce: Duration) -> Self {
        let feed = Arc::new(Mutex::new(CatalogFeed::new()));
        let (tx, _) = watch::channel(CatalogState::Loading);

        let task = tokio::spawn(run(
            Arc::clone(&plane),
            Arc::clone(&feed),
            tx.clone(),
            debounce,
        ));

        Self {
            plane,
            feed,
            state: tx,
            task,
        }
    }

    /// Observe state changes
    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.state.subscribe()
    }

    /// The state as of now
    pub fn state(&self) -> CatalogState {
        self.state.borrow().clone()
    }

    /// Synchronous full reload, for admin-triggered retry and tests
    ///
    /// Runs on the caller's task so callers observe the reloaded state as
    /// soon as this returns.
    pub async fn refresh_now(&self) -> Result<()> {
        let mut feed = self.feed.lock().await;
        match load_all(&self.plane, &mut feed).await {
            Ok(()) => {}
            Err(err) => {
                warn!(error = %err, "catalog refresh failed");
                feed.on_failure(err.to_string());
            }
        }
        let state = feed.state();
        drop(feed);
        self.state.send_replace(state);
        Ok(())
    }
}

impl Drop for LiveCatalog {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(
    plane: Arc<DataPlane>,
    feed: Arc<Mutex<CatalogFeed>>,
    tx: watch::Sender<CatalogState>,
    debounce: Duration,
) {
    let mut changes = plane.watch();

    {
        let mut feed = feed.lock().await;
        if let Err(err) = load_all(&plane, &mut feed).await {
            warn!(error = %err, "initial catalog load failed");
            feed.on_failure(err.to_string());
        }
        tx.send_replace(feed.state());
    }

    loop {
        let first = match changes.recv().await {
            Ok(change) => Some(change.collection),
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                debug!(missed, "change feed lagged, reloading everything");
                None
            }
            Err(broadcast::error::RecvError::Closed) => return,
        };

        // Coalesce the burst: wait out the debounce window, then drain
        // whatever else arrived.
        tokio::time::sleep(debounce).await;
        let mut dirty: Option<HashSet<Collection>> = first.map(|c| {
            let mut set = HashSet::new();
            set.insert(c);
            set
        });
        loop {
            match changes.try_recv() {
                Ok(Change { collection, .. }) => {
                    if let Some(set) = dirty.as_mut() {
                        set.insert(collection);
                    }
                }
                Err(broadcast::error::TryRecvError::Lagged(_)) => dirty = None,
                Err(_) => break,
            }
        }

        let mut feed = feed.lock().await;
        let result = match &dirty {
            Some(set) => load_dirty(&plane, &mut feed, set).await,
            None => load_all(&plane, &mut feed).await,
        };
        if let Err(err) = result {
            warn!(error = %err, "catalog reload failed");
            feed.on_failure(err.to_string());
        }
        let state = feed.state();
        drop(feed);
        tx.send_replace(state);
    }
}

async fn load_all(plane: &DataPlane, feed: &mut CatalogFeed) -> Result<()> {
    feed.on_countries(plane.countries().list_active().await?);
    feed.on_categories(plane.categories().list_active().await?);
    feed.on_stores(plane.stores().list_active().await?);
    feed.on_coupons(plane.coupons().list_active().await?);
    debug!("catalog fully reloaded");
    Ok(())
}

/// Reload only the collections a change burst touched
async fn load_dirty(
    plane: &DataPlane,
    feed: &mut CatalogFeed,
    dirty: &HashSet<Collection>,
) -> Result<()> {
    for collection in dirty {
        match collection {
            Collection::Countries => feed.on_countries(plane.countries().list_active().await?),
            Collection::Categories => feed.on_categories(plane.categories().list_active().await?),
            Collection::Stores => feed.on_stores(plane.stores().list_active().await?),
            Collection::Coupons => feed.on_coupons(plane.coupons().list_active().await?),
            // Everything else has no bearing on the snapshot.
            _ => continue,
        }
        debug!(collection = collection.as_str(), "catalog source reloaded");
    }
    Ok(())
}
