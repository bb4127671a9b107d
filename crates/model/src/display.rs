//! Display fallbacks
//!
//! Backend documents were written by several app versions and by hand, so
//! display names can be blank. Renderers never show an empty string; they
//! show these fallbacks instead.

/// Placeholder for a blank display name
pub const NAME_FALLBACK: &str = "—";

/// Fallback store name used when a coupon references a store that no longer
/// exists ("store" in Arabic)
pub const UNKNOWN_STORE: &str = "متجر";

/// True when a string is empty or whitespace-only
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// A display name, or the em-dash fallback when blank
pub fn display_or_dash(s: &str) -> &str {
    if is_blank(s) { NAME_FALLBACK } else { s }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_detection() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(is_blank("\t\n"));
        assert!(!is_blank("متجر"));
    }

    #[test]
    fn test_display_or_dash() {
        assert_eq!(display_or_dash(""), NAME_FALLBACK);
        assert_eq!(display_or_dash("  "), NAME_FALLBACK);
        assert_eq!(display_or_dash("نون"), "نون");
    }
}
