use chrono::{TimeZone, Utc};
use wafr_model::{Category, Country, Coupon, Store, Variant, UNKNOWN_STORE};
use wafr_usage::{EventKind, UsageEvent, UsageMap};

use crate::index::EntityIndexes;
use crate::resolve::resolve;
use crate::row::{attach_usage, expand, RowKind};

fn fixture() -> (Vec<Store>, Vec<Category>, Vec<Country>) {
    let mut country = Country::new("السعودية", "Saudi Arabia");
    country.id = "sa".into();
    let mut category = Category::new("أزياء", "Fashion", 1);
    category.id = "fashion".into();
    let mut store = Store::new("نون", "Noon", "sa");
    store.id = "noon".into();
    store.logo_url = "https://cdn/noon.png".into();
    (vec![store], vec![category], vec![country])
}

fn coupon_with_variants(n: usize) -> Coupon {
    let mut coupon = Coupon::new("خصم نون", "NOON10", "noon", "fashion", "sa");
    coupon.id = "cp1".into();
    coupon.discount_label = "خصم 10%".into();
    coupon.link_url = "https://noon.com".into();
    for i in 0..n {
        let mut v = Variant::new(format!("شريحة {i}"), format!("V{i}"));
        v.id = format!("var{i}");
        coupon.variants.push(v);
    }
    coupon
}

#[test]
fn expansion_yields_base_plus_one_row_per_variant() {
    let (stores, categories, countries) = fixture();
    let indexes = EntityIndexes::build(&stores, &categories, &countries);

    for n in [0usize, 1, 3] {
        let coupon = coupon_with_variants(n);
        let rows = expand(&resolve(&coupon, &indexes));

        assert_eq!(rows.len(), n + 1);
        assert_eq!(rows[0].kind, RowKind::Base);
        assert_eq!(rows[0].variant_id, None);
        assert_eq!(
            rows.iter().filter(|r| r.kind == RowKind::Base).count(),
            1
        );
        // variants keep array order
        for (i, row) in rows[1..].iter().enumerate() {
            assert_eq!(row.kind, RowKind::Variant);
            assert_eq!(row.variant_id.as_deref(), Some(format!("var{i}").as_str()));
        }
    }
}

#[test]
fn blank_variant_id_gets_positional_key() {
    let (stores, categories, countries) = fixture();
    let indexes = EntityIndexes::build(&stores, &categories, &countries);

    let mut coupon = coupon_with_variants(2);
    coupon.variants[1].id = String::new();
    let rows = expand(&resolve(&coupon, &indexes));

    assert_eq!(rows[2].variant_id.as_deref(), Some("v1"));
    assert_eq!(rows[2].key_text, "cp1::v1");
}

#[test]
fn variant_rows_inherit_unset_fields() {
    let (stores, categories, countries) = fixture();
    let indexes = EntityIndexes::build(&stores, &categories, &countries);

    let mut coupon = coupon_with_variants(2);
    coupon.variants[0].discount_label = "خصم 25%".into();
    coupon.variants[0].link_url = Some("https://noon.com/new".into());
    let rows = expand(&resolve(&coupon, &indexes));

    // explicit variant values win
    assert_eq!(rows[1].discount_label, "خصم 25%");
    assert_eq!(rows[1].link_url, "https://noon.com/new");
    // unset values fall back to the coupon's
    assert_eq!(rows[2].discount_label, "خصم 10%");
    assert_eq!(rows[2].link_url, "https://noon.com");
}

#[test]
fn base_row_carries_stored_usage_count_variants_zero() {
    let (stores, categories, countries) = fixture();
    let indexes = EntityIndexes::build(&stores, &categories, &countries);

    let mut coupon = coupon_with_variants(1);
    coupon.usage_count = 42;
    let rows = expand(&resolve(&coupon, &indexes));

    assert_eq!(rows[0].uses, 42);
    assert_eq!(rows[1].uses, 0);
}

#[test]
fn missing_store_resolves_to_fallback_not_error() {
    let indexes = EntityIndexes::build(&[], &[], &[]);
    let coupon = coupon_with_variants(0);
    let rows = expand(&resolve(&coupon, &indexes));

    assert_eq!(rows[0].store_name, UNKNOWN_STORE);
    assert_eq!(rows[0].store_logo, "");
    assert_eq!(rows[0].category_name, "—");
}

#[test]
fn attach_usage_overrides_stored_counters_wholesale() {
    let (stores, categories, countries) = fixture();
    let indexes = EntityIndexes::build(&stores, &categories, &countries);

    let mut coupon = coupon_with_variants(1);
    coupon.usage_count = 99;
    let mut rows = expand(&resolve(&coupon, &indexes));

    let stamp = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).single();
    let mut events = vec![
        UsageEvent::new("cp1", EventKind::Copy)
            .with_variant("var0")
            .with_device("d1"),
        UsageEvent::new("cp1", EventKind::Copy)
            .with_variant("var0")
            .with_device("d2"),
    ];
    for e in &mut events {
        if let Some(at) = stamp {
            e.created_at = at;
        }
    }
    let usage = UsageMap::aggregate(&events);

    attach_usage(&mut rows, &usage);

    // base row had no events: the admin counter is replaced by zero
    assert_eq!(rows[0].uses, 0);
    assert_eq!(rows[0].last_used_at, None);
    assert_eq!(rows[1].uses, 2);
    assert_eq!(rows[1].distinct_devices, 2);
    assert_eq!(rows[1].last_used_at, stamp);
}
