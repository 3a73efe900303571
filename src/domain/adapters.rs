//! Adapter layer for converting static data records to domain models.
//!
//! The catalogs and the verse corpus are exported as JSON by the data
//! pipeline. These record types mirror that shape exactly; the `From`
//! impls below turn them into the engine's domain types.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::models::{CatalogEntry, ContentItem, Locator, Translation};

// ============================================================================
// CATALOG RECORDS
// ============================================================================

/// One row of `topics-master.json` / `intents-master.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub search_volume: u64,
    #[serde(default)]
    pub competition: Option<f64>,
}

impl From<CatalogRecord> for CatalogEntry {
    fn from(record: CatalogRecord) -> Self {
        Self {
            key: record.slug.trim().to_string(),
            display_title: record.title,
            traffic_weight: record.search_volume,
            competition_weight: record.competition,
        }
    }
}

// ============================================================================
// VERSE RECORDS
// ============================================================================

/// One verse of the priority corpus export.
#[derive(Debug, Clone, Deserialize)]
pub struct VerseRecord {
    #[serde(default)]
    pub id: Option<u64>,
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    pub slug: String,
    #[serde(default)]
    pub text_niv: Option<String>,
    #[serde(default)]
    pub text_kjv: Option<String>,
    #[serde(default)]
    pub text_esv: Option<String>,
    #[serde(default)]
    pub text_nlt: Option<String>,
}

impl From<VerseRecord> for ContentItem {
    fn from(record: VerseRecord) -> Self {
        let text_by_variant: BTreeMap<Translation, String> = [
            (Translation::Niv, record.text_niv),
            (Translation::Kjv, record.text_kjv),
            (Translation::Esv, record.text_esv),
            (Translation::Nlt, record.text_nlt),
        ]
        .into_iter()
        .filter_map(|(translation, text)| text.map(|t| (translation, t)))
        .collect();

        Self {
            locator: Locator::new(record.book, record.chapter, record.verse),
            text_by_variant,
            slug: record.slug,
        }
    }
}
