//! Tests for tolerant document decoding

use serde_json::json;

use crate::{Category, Coupon, Country, Entity, Report, Store, StoreRequest};

#[test]
fn test_country_decode_minimal() {
    let doc = json!({ "nameAr": "مصر" });
    let country = Country::decode("c-1", &doc).unwrap();
    assert_eq!(country.id, "c-1");
    assert_eq!(country.name_ar, "مصر");
    assert_eq!(country.name_en, "");
    assert!(country.is_active);
}

#[test]
fn test_decode_injected_id_wins_over_stale_body_id() {
    let doc = json!({ "id": "stale", "nameAr": "مصر" });
    let country = Country::decode("c-1", &doc).unwrap();
    assert_eq!(country.id, "c-1");
}

#[test]
fn test_decode_rejects_non_object() {
    assert!(Country::decode("c-1", &json!("not a doc")).is_err());
    assert!(Country::decode("c-1", &json!(42)).is_err());
}

#[test]
fn test_decode_ignores_unknown_fields() {
    let doc = json!({ "nameAr": "أزياء", "legacyField": { "nested": true } });
    let category = Category::decode("cat-1", &doc).unwrap();
    assert_eq!(category.name_ar, "أزياء");
    assert_eq!(category.sort_order, 0);
}

#[test]
fn test_store_decode_missing_logo() {
    let doc = json!({ "nameAr": "نون", "countryId": "c-1" });
    let store = Store::decode("s-1", &doc).unwrap();
    assert!(!store.has_logo());
    assert!(store.banner_url.is_none());
}

#[test]
fn test_coupon_decode_full_document() {
    let doc = json!({
        "titleAr": "خصم ١٠٪",
        "code": "SAVE10",
        "discountLabel": "خصم 10%",
        "storeId": "s-1",
        "categoryId": "cat-1",
        "countryId": "c-1",
        "terms": ["مرة واحدة لكل مستخدم"],
        "usageCount": 42,
        "createdAt": "2026-01-05T10:00:00Z",
        "variants": [
            { "id": "v-1", "labelAr": "الجدد", "code": "NEW20", "isDefault": true }
        ]
    });
    let coupon = Coupon::decode("cp-1", &doc).unwrap();
    assert_eq!(coupon.code, "SAVE10");
    assert_eq!(coupon.usage_count, 42);
    assert_eq!(coupon.variants.len(), 1);
    assert_eq!(coupon.default_variant().unwrap().id, "v-1");
    assert_eq!(coupon.created_at.to_rfc3339(), "2026-01-05T10:00:00+00:00");
}

#[test]
fn test_coupon_decode_malformed_timestamp_degrades() {
    let doc = json!({
        "titleAr": "خصم",
        "code": "SAVE10",
        "storeId": "s-1",
        "categoryId": "cat-1",
        "countryId": "c-1",
        "createdAt": "yesterday-ish",
        "expiryDate": "not a date"
    });
    let coupon = Coupon::decode("cp-1", &doc).unwrap();
    // created_at degraded to now, expiry to none; the document still decodes
    assert!(coupon.expiry_date.is_none());
}

#[test]
fn test_store_request_unknown_status_reads_pending() {
    let doc = json!({ "storeName": "نمشي", "countryId": "c-1", "deviceId": "d-1" });
    let req = StoreRequest::decode("r-1", &doc).unwrap();
    assert!(req.is_pending());
}

#[test]
fn test_report_decode_defaults() {
    let doc = json!({ "couponId": "cp-1", "code": "SAVE10" });
    let report = Report::decode("rep-1", &doc).unwrap();
    assert!(!report.is_resolved);
    assert!(report.variant_id.is_none());
}

#[test]
fn test_round_trip_through_wire_form() {
    let mut coupon = Coupon::new("خصم", "SAVE10", "s-1", "cat-1", "c-1");
    coupon.is_popular = true;
    let value = serde_json::to_value(&coupon).unwrap();
    // Wire form is camelCase
    assert!(value.get("titleAr").is_some());
    assert!(value.get("isPopular").is_some());
    let back = Coupon::decode(&coupon.id, &value).unwrap();
    assert_eq!(back.code, coupon.code);
    assert!(back.is_popular);
}
