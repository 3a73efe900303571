//! Whole-page link count and duplicate checks.

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::models::LinkSection;

use super::LinkPolicy;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkValidation {
    pub is_valid: bool,
    pub total_link_count: usize,
    pub warnings: Vec<String>,
    /// URLs that appear more than once, in first-repeat order.
    pub duplicate_urls: Vec<String>,
}

/// Total links across all sections.
pub fn count_internal_links(sections: &[LinkSection]) -> usize {
    sections.iter().map(|s| s.links.len()).sum()
}

/// A page is valid when its link count is within the policy bounds and no
/// URL repeats.
pub fn validate_internal_linking(sections: &[LinkSection], policy: &LinkPolicy) -> LinkValidation {
    let total = count_internal_links(sections);
    let mut warnings = Vec::new();

    if total < policy.min_total {
        warnings.push(format!(
            "Only {} internal links (recommend {}-{} minimum)",
            total,
            policy.min_total,
            policy.recommended_total.max(policy.min_total)
        ));
    }
    if total > policy.max_total {
        warnings.push(format!(
            "Too many links ({total}). Consider limiting to avoid dilution."
        ));
    }

    let mut seen = HashSet::new();
    let mut duplicate_urls: Vec<String> = Vec::new();
    for link in sections.iter().flat_map(|s| &s.links) {
        if !seen.insert(link.url.as_str()) && !duplicate_urls.contains(&link.url) {
            duplicate_urls.push(link.url.clone());
        }
    }
    if !duplicate_urls.is_empty() {
        warnings.push(format!("Duplicate links detected: {}", duplicate_urls.join(", ")));
    }

    let is_valid =
        (policy.min_total..=policy.max_total).contains(&total) && duplicate_urls.is_empty();
    if !is_valid {
        tracing::debug!("[LINKS] page failed link policy: {}", warnings.join("; "));
    }

    LinkValidation {
        is_valid,
        total_link_count: total,
        warnings,
        duplicate_urls,
    }
}
