use std::sync::Arc;
use std::time::Duration;

use wafr_model::{Category, Country, Coupon, Store};
use wafr_store::DataPlane;

use crate::feed::{CatalogFeed, CatalogState};
use crate::live::LiveCatalog;

fn seed() -> (Country, Category, Store, Coupon) {
    let mut country = Country::new("الكويت", "Kuwait");
    country.id = "kw".into();
    let mut category = Category::new("مطاعم", "Food", 1);
    category.id = "food".into();
    let mut store = Store::new("طلبات", "Talabat", "kw");
    store.id = "talabat".into();
    let mut coupon = Coupon::new("خصم طلبات", "TLB10", "talabat", "food", "kw");
    coupon.id = "cp1".into();
    (country, category, store, coupon)
}

#[test]
fn loading_until_every_source_has_delivered() {
    let (country, category, store, coupon) = seed();
    let mut feed = CatalogFeed::new();
    assert!(matches!(feed.state(), CatalogState::Loading));

    feed.on_countries(vec![country]);
    feed.on_categories(vec![category]);
    feed.on_stores(vec![store]);
    assert!(matches!(feed.state(), CatalogState::Loading));

    feed.on_coupons(vec![coupon]);
    let state = feed.state();
    assert!(state.is_ready());
    let snapshot = state.snapshot().unwrap();
    assert_eq!(snapshot.rows.len(), 1);
    assert_eq!(snapshot.rows[0].store_name, "طلبات");
}

#[test]
fn delivery_order_does_not_matter() {
    let (country, category, store, coupon) = seed();
    let mut feed = CatalogFeed::new();
    feed.on_coupons(vec![coupon]);
    feed.on_stores(vec![store]);
    feed.on_countries(vec![country]);
    assert!(matches!(feed.state(), CatalogState::Loading));
    feed.on_categories(vec![category]);
    assert!(feed.state().is_ready());
}

#[test]
fn empty_collections_still_count_as_delivered() {
    let mut feed = CatalogFeed::new();
    feed.on_countries(Vec::new());
    feed.on_categories(Vec::new());
    feed.on_stores(Vec::new());
    feed.on_coupons(Vec::new());
    let state = feed.state();
    assert!(state.is_ready());
    assert!(state.snapshot().unwrap().rows.is_empty());
}

#[test]
fn failure_parks_the_feed_until_the_next_delivery() {
    let (country, category, store, coupon) = seed();
    let mut feed = CatalogFeed::new();
    feed.on_countries(vec![country]);
    feed.on_categories(vec![category]);
    feed.on_stores(vec![store]);
    feed.on_failure("database unavailable");

    match feed.state() {
        CatalogState::Failed { message } => assert_eq!(message, "database unavailable"),
        other => panic!("expected failed state, got {other:?}"),
    }

    feed.on_coupons(vec![coupon]);
    assert!(feed.state().is_ready());
}

#[tokio::test]
async fn live_catalog_reaches_ready_over_a_real_plane() {
    let (country, category, store, coupon) = seed();
    let plane = Arc::new(DataPlane::new_memory().await.unwrap());
    plane.countries().put(&country).await.unwrap();
    plane.categories().put(&category).await.unwrap();
    plane.stores().put(&store).await.unwrap();
    plane.coupons().put(&coupon).await.unwrap();

    let live = LiveCatalog::spawn(Arc::clone(&plane), Duration::from_millis(5));
    live.refresh_now().await.unwrap();

    let state = live.state();
    assert!(state.is_ready());
    assert_eq!(state.snapshot().unwrap().rows.len(), 1);
}

#[tokio::test]
async fn refresh_now_picks_up_later_writes() {
    let (country, category, store, coupon) = seed();
    let plane = Arc::new(DataPlane::new_memory().await.unwrap());
    plane.countries().put(&country).await.unwrap();
    plane.categories().put(&category).await.unwrap();
    plane.stores().put(&store).await.unwrap();
    plane.coupons().put(&coupon).await.unwrap();

    let live = LiveCatalog::spawn(Arc::clone(&plane), Duration::from_millis(5));
    live.refresh_now().await.unwrap();
    assert_eq!(live.state().snapshot().unwrap().rows.len(), 1);

    let mut second = Coupon::new("خصم ثاني", "TLB20", "talabat", "food", "kw");
    second.id = "cp2".into();
    plane.coupons().put(&second).await.unwrap();

    live.refresh_now().await.unwrap();
    assert_eq!(live.state().snapshot().unwrap().rows.len(), 2);
}

#[tokio::test]
async fn deactivated_coupons_leave_the_snapshot() {
    let (country, category, store, mut coupon) = seed();
    let plane = Arc::new(DataPlane::new_memory().await.unwrap());
    plane.countries().put(&country).await.unwrap();
    plane.categories().put(&category).await.unwrap();
    plane.stores().put(&store).await.unwrap();
    plane.coupons().put(&coupon).await.unwrap();

    let live = LiveCatalog::spawn(Arc::clone(&plane), Duration::from_millis(5));
    live.refresh_now().await.unwrap();
    assert_eq!(live.state().snapshot().unwrap().rows.len(), 1);

    coupon.is_active = false;
    plane.coupons().put(&coupon).await.unwrap();
    live.refresh_now().await.unwrap();
    assert!(live.state().snapshot().unwrap().rows.is_empty());
}
