//! Tests for discount percent extraction

use wafr_model::Variant;

use crate::discount::{average_discount, best_discount, extract_percent};

fn variant_with_label(label: &str) -> Variant {
    let mut v = Variant::new("شريحة", "CODE");
    v.discount_label = label.to_string();
    v
}

#[test]
fn test_extract_simple_percent() {
    assert_eq!(extract_percent("خصم 20%"), Some(20.0));
    assert_eq!(extract_percent("10% off"), Some(10.0));
}

#[test]
fn test_extract_decimal_percent() {
    assert_eq!(extract_percent("خصم 12.5%"), Some(12.5));
}

#[test]
fn test_extract_first_match_wins() {
    assert_eq!(extract_percent("من 10% حتى 70%"), Some(10.0));
}

#[test]
fn test_extract_no_match() {
    assert_eq!(extract_percent("توصيل مجاني"), None);
    assert_eq!(extract_percent(""), None);
    assert_eq!(extract_percent("%"), None);
}

#[test]
fn test_arabic_indic_digits_do_not_parse() {
    // ASCII-only matching: labels written with ٠-٩ fall out of statistics
    assert_eq!(extract_percent("خصم ٢٠٪"), None);
    assert_eq!(extract_percent("خصم ٢٠%"), None);
}

#[test]
fn test_best_discount_across_variants() {
    let variants = vec![variant_with_label("25%"), variant_with_label("5%")];
    assert_eq!(best_discount("10%", &variants), Some(25.0));
}

#[test]
fn test_best_discount_base_only() {
    assert_eq!(best_discount("30%", &[]), Some(30.0));
}

#[test]
fn test_best_discount_nothing_parses() {
    let variants = vec![variant_with_label("شحن مجاني")];
    assert_eq!(best_discount("عرض خاص", &variants), None);
}

#[test]
fn test_average_ignores_none() {
    assert_eq!(average_discount(&[Some(20.0), None, Some(40.0)]), Some(30.0));
}

#[test]
fn test_average_all_none_is_none() {
    assert_eq!(average_discount(&[None, None]), None);
    assert_eq!(average_discount(&[]), None);
}
