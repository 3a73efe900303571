//! Near-duplicate detection between page bodies.

use std::collections::HashSet;

use super::metrics::strip_markup;

fn word_set(text: &str) -> HashSet<String> {
    strip_markup(text)
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Maximum Jaccard similarity (0-100) between `candidate` and any of
/// `existing`, over lowercased, markup-stripped word sets. Returns 0 when
/// there is nothing to compare against. Rejection thresholds are left to
/// the caller.
pub fn check_uniqueness<S: AsRef<str>>(candidate: &str, existing: &[S]) -> f64 {
    if existing.is_empty() {
        return 0.0;
    }
    let words = word_set(candidate);

    existing
        .iter()
        .map(|other| {
            let other = word_set(other.as_ref());
            let union = words.union(&other).count();
            if union == 0 {
                return 0.0;
            }
            let shared = words.intersection(&other).count();
            shared as f64 / union as f64 * 100.0
        })
        .fold(0.0, f64::max)
}
