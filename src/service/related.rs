//! Sibling lookups for topic and intent pages.
//!
//! Related topics share keywords; related intents share a category derived
//! from the intent key. Both only ever return publishable entities.

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::models::CanonicalEntity;
use crate::service::canonicalizer::CatalogIndex;
use crate::service::scorer::CuratedKeywords;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IntentCategory {
    TattooInspiration,
    WeddingsAndLove,
    GriefAndRemembrance,
    LifeMilestones,
    HolidaysAndSeasons,
    SharingAndSocial,
    ForYoungPeople,
    AudienceSpecific,
    ByTranslation,
    ByType,
    DifficultTimes,
    Sacraments,
    NewLife,
    General,
}

/// First matching rule wins, so order matters ("funeral" before "men").
const CATEGORY_RULES: &[(IntentCategory, &[&str])] = &[
    (IntentCategory::TattooInspiration, &["tattoo"]),
    (IntentCategory::WeddingsAndLove, &["wedding", "anniversary", "couples"]),
    (IntentCategory::GriefAndRemembrance, &["funeral", "memorial", "losing"]),
    (IntentCategory::LifeMilestones, &["graduation", "new-job", "retirement", "new-beginnings"]),
    (
        IntentCategory::HolidaysAndSeasons,
        &["christmas", "easter", "thanksgiving", "good-friday", "lent", "advent"],
    ),
    (IntentCategory::SharingAndSocial, &["instagram", "facebook", "social-media", "cards"]),
    (IntentCategory::ForYoungPeople, &["kids", "children", "teens", "youth", "students"]),
    (IntentCategory::AudienceSpecific, &["women", "men", "mothers", "teachers"]),
    (IntentCategory::ByTranslation, &["kjv", "niv", "esv"]),
    (IntentCategory::ByType, &["short", "famous", "popular", "powerful", "inspirational"]),
    (
        IntentCategory::DifficultTimes,
        &["anxiety", "depression", "fear", "grief", "loneliness", "suffering"],
    ),
    (IntentCategory::Sacraments, &["baptism", "confirmation"]),
    (IntentCategory::NewLife, &["baby-shower", "pregnancy"]),
];

impl IntentCategory {
    /// Categorize an intent key by substring rules.
    pub fn of(key: &str) -> Self {
        CATEGORY_RULES
            .iter()
            .find(|(_, needles)| needles.iter().any(|n| key.contains(n)))
            .map(|(category, _)| *category)
            .unwrap_or(IntentCategory::General)
    }

    pub fn label(&self) -> &'static str {
        match self {
            IntentCategory::TattooInspiration => "Tattoo Inspiration",
            IntentCategory::WeddingsAndLove => "Weddings & Love",
            IntentCategory::GriefAndRemembrance => "Grief & Remembrance",
            IntentCategory::LifeMilestones => "Life Milestones",
            IntentCategory::HolidaysAndSeasons => "Holidays & Seasons",
            IntentCategory::SharingAndSocial => "Sharing & Social",
            IntentCategory::ForYoungPeople => "For Young People",
            IntentCategory::AudienceSpecific => "Audience Specific",
            IntentCategory::ByTranslation => "By Translation",
            IntentCategory::ByType => "By Type",
            IntentCategory::DifficultTimes => "Difficult Times",
            IntentCategory::Sacraments => "Sacraments",
            IntentCategory::NewLife => "New Life",
            IntentCategory::General => "General",
        }
    }
}

/// Other publishable intents, same category first, in listing order.
pub fn related_intents<'a>(index: &'a CatalogIndex, key: &str, limit: usize) -> Vec<&'a CanonicalEntity> {
    if index.get(key).is_none() {
        return Vec::new();
    }
    let category = IntentCategory::of(key);
    let (same, others): (Vec<_>, Vec<_>) = index
        .publishable()
        .filter(|e| e.canonical_key != key)
        .partition(|e| IntentCategory::of(&e.canonical_key) == category);

    same.into_iter().chain(others).take(limit).collect()
}

fn topic_terms(curated: &CuratedKeywords, key: &str) -> Vec<String> {
    match curated.get(key) {
        Some(keywords) => keywords.iter().map(|k| k.to_lowercase()).collect(),
        None => key.split('-').map(str::to_lowercase).collect(),
    }
}

/// Other publishable topics ranked by keyword overlap, padded with the
/// highest-traffic remaining topics when fewer than `limit` overlap.
pub fn related_topics<'a>(
    index: &'a CatalogIndex,
    curated: &CuratedKeywords,
    key: &str,
    limit: usize,
) -> Vec<&'a CanonicalEntity> {
    let source: HashSet<String> = topic_terms(curated, key).into_iter().collect();

    let mut scored: Vec<(&CanonicalEntity, usize)> = index
        .publishable()
        .filter(|e| e.canonical_key != key)
        .filter_map(|other| {
            let keyword_overlap = topic_terms(curated, &other.canonical_key)
                .iter()
                .filter(|k| source.contains(k.as_str()))
                .count();
            let slug_overlap = other
                .canonical_key
                .split('-')
                .filter(|w| source.contains(*w))
                .count();
            let total = keyword_overlap + slug_overlap;
            (total > 0).then_some((other, total))
        })
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1));

    let mut result: Vec<&CanonicalEntity> =
        scored.into_iter().take(limit).map(|(e, _)| e).collect();
    if result.len() < limit {
        let padding: Vec<&CanonicalEntity> = index
            .publishable()
            .filter(|e| e.canonical_key != key)
            .filter(|e| !result.iter().any(|r| r.canonical_key == e.canonical_key))
            .take(limit - result.len())
            .collect();
        result.extend(padding);
    }
    result
}
