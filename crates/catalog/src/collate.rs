//! Arabic-aware title comparison
//!
//! The corpus has no ICU binding, so title ordering uses a documented
//! normalization pass instead of full locale collation: strip tatweel and
//! harakat, unify alef and hamza-on-alef forms, fold teh marbuta to heh
//! and alef maksura to yeh, then compare the normalized strings. Ties fall
//! back to the raw strings so the order stays total and deterministic.

use std::cmp::Ordering;

/// Normalize Arabic text for comparison
pub fn normalize_arabic(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            // Tatweel (kashida) stretches, no lexical value
            '\u{0640}' => {}
            // Harakat and quranic marks
            '\u{064B}'..='\u{0655}' | '\u{0670}' => {}
            // Alef variants including hamza forms
            'أ' | 'إ' | 'آ' | 'ٱ' => out.push('ا'),
            // Teh marbuta reads like heh at word end
            'ة' => out.push('ه'),
            // Alef maksura reads like yeh
            'ى' => out.push('ي'),
            _ => out.push(ch),
        }
    }
    out
}

/// Compare two titles under Arabic normalization
pub fn title_cmp(a: &str, b: &str) -> Ordering {
    normalize_arabic(a)
        .cmp(&normalize_arabic(b))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_tatweel_and_harakat() {
        assert_eq!(normalize_arabic("خَصْــم"), "خصم");
    }

    #[test]
    fn test_unifies_alef_forms() {
        assert_eq!(normalize_arabic("أحذية"), normalize_arabic("احذية"));
        assert_eq!(normalize_arabic("إلكترونيات"), normalize_arabic("الكترونيات"));
    }

    #[test]
    fn test_teh_marbuta_folds_to_heh() {
        assert_eq!(normalize_arabic("موضة"), "موضه");
    }

    #[test]
    fn test_title_cmp_is_total() {
        assert_eq!(title_cmp("أزياء", "ازياء").is_eq(), false);
        // Normalized-equal strings still order deterministically by raw form
        assert_eq!(title_cmp("أزياء", "أزياء"), Ordering::Equal);
    }

    #[test]
    fn test_latin_passthrough() {
        assert_eq!(normalize_arabic("Noon"), "Noon");
        assert!(title_cmp("Amazon", "Noon").is_lt());
    }
}
