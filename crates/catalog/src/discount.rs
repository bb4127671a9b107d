//! Discount percent extraction
//!
//! Discount labels are free text ("خصم 20%", "توصيل مجاني"). The extractor
//! takes the first `NN%` or `NN.N%` match. Matching is ASCII-digit only on
//! purpose: labels written with Arabic-indic numerals (٠-٩) do not parse
//! and fall out of the statistics, matching the established behavior. The
//! pattern spells `[0-9]` rather than `\d` because the regex crate's `\d`
//! is Unicode-aware and would silently widen the match.

use once_cell::sync::Lazy;
use regex::Regex;
use wafr_model::Variant;

static PERCENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+(?:\.[0-9]+)?)%").expect("valid percent pattern"));

/// First percentage embedded in a label, if any
pub fn extract_percent(label: &str) -> Option<f64> {
    let captures = PERCENT_RE.captures(label)?;
    captures.get(1)?.as_str().parse().ok()
}

/// Best (maximum) percentage across a coupon's base label and its variants
pub fn best_discount(main_label: &str, variants: &[Variant]) -> Option<f64> {
    std::iter::once(extract_percent(main_label))
        .chain(variants.iter().map(|v| extract_percent(&v.discount_label)))
        .flatten()
        .fold(None, |best, value| match best {
            Some(b) if b >= value => Some(b),
            _ => Some(value),
        })
}

/// Average of the parseable percentages; `None` when nothing parsed
///
/// Ignores `None` entries so an all-`None` or empty input never divides by
/// zero.
pub fn average_discount(values: &[Option<f64>]) -> Option<f64> {
    let parsed: Vec<f64> = values.iter().flatten().copied().collect();
    if parsed.is_empty() {
        return None;
    }
    Some(parsed.iter().sum::<f64>() / parsed.len() as f64)
}
