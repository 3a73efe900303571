//! Core domain entities shared by every component of the engine.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

// ====== Enums ======

/// Kinds of pages the engine builds links and validates content for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    Verse,
    Topic,
    Intent,
    Book,
    Chapter,
}

impl PageType {
    pub const ALL: [PageType; 5] = [
        PageType::Verse,
        PageType::Topic,
        PageType::Intent,
        PageType::Book,
        PageType::Chapter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PageType::Verse => "verse",
            PageType::Topic => "topic",
            PageType::Intent => "intent",
            PageType::Book => "book",
            PageType::Chapter => "chapter",
        }
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PageType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown page type: {s}"))
    }
}

/// The two flat catalogs that get canonicalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    Topic,
    Intent,
}

impl CatalogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogKind::Topic => "topic",
            CatalogKind::Intent => "intent",
        }
    }
}

/// Translation identifiers a verse text can be stored under.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Translation {
    #[default]
    Niv,
    Kjv,
    Esv,
    Nlt,
}

// ====== Catalog ======

/// A raw catalog record as declared in the static topic/intent catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub key: String,
    pub display_title: String,
    pub traffic_weight: u64,
    pub competition_weight: Option<f64>,
}

impl CatalogEntry {
    pub fn new(key: impl Into<String>, display_title: impl Into<String>, traffic_weight: u64) -> Self {
        Self {
            key: key.into(),
            display_title: display_title.into(),
            traffic_weight,
            competition_weight: None,
        }
    }
}

/// The single published identity one or more raw catalog keys resolve to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalEntity {
    pub canonical_key: String,
    /// Title of the highest-traffic member.
    pub title: String,
    /// Max traffic weight among absorbed entries.
    pub traffic_weight: u64,
    /// Every raw key mapped to this entity, including its own when present.
    pub variant_keys: BTreeSet<String>,
}

impl CanonicalEntity {
    /// Keys used for keyword derivation: the canonical key first, then variants.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.canonical_key.as_str()).chain(
            self.variant_keys
                .iter()
                .map(String::as_str)
                .filter(move |k| *k != self.canonical_key),
        )
    }
}

// ====== Corpus ======

/// Book, chapter and verse number of a content item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
}

impl Locator {
    pub fn new(book: impl Into<String>, chapter: u32, verse: u32) -> Self {
        Self { book: book.into(), chapter, verse }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", self.book, self.chapter, self.verse)
    }
}

/// A verse from the static corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub locator: Locator,
    pub text_by_variant: BTreeMap<Translation, String>,
    /// Stable URL key, unique across the corpus.
    pub slug: String,
}

impl ContentItem {
    pub fn text(&self, translation: Translation) -> &str {
        self.text_by_variant
            .get(&translation)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn default_text(&self) -> &str {
        self.text(Translation::default())
    }
}

/// A content item paired with its relevance score for one entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMatch<'a> {
    pub item: &'a ContentItem,
    /// Always >= 1.
    pub score: u32,
}

// ====== Links ======

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkCategory {
    Breadcrumb,
    Parent,
    Sibling,
    Related,
    CrossReference,
    Popular,
    Topic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalLink {
    pub url: String,
    pub display_text: String,
    pub category: LinkCategory,
    /// 1-10, only used when flattening sections.
    pub priority: u8,
}

impl InternalLink {
    pub fn new(
        url: impl Into<String>,
        display_text: impl Into<String>,
        category: LinkCategory,
        priority: u8,
    ) -> Self {
        Self {
            url: url.into(),
            display_text: display_text.into(),
            category,
            priority: priority.clamp(1, 10),
        }
    }
}

/// A titled, ordered group of outbound links on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSection {
    pub title: String,
    pub links: Vec<InternalLink>,
}

impl LinkSection {
    /// Build a section, or `None` when there is nothing to link to.
    pub fn non_empty(title: impl Into<String>, links: Vec<InternalLink>) -> Option<Self> {
        if links.is_empty() {
            None
        } else {
            Some(Self { title: title.into(), links })
        }
    }
}

// ====== Content validation ======

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordDensity {
    pub keyword: String,
    /// Percentage of total words.
    pub density: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContentMetrics {
    pub word_count: usize,
    pub character_count: usize,
    pub paragraph_count: usize,
    pub sentence_count: usize,
    pub avg_words_per_sentence: f64,
    pub readability_score: f64,
    pub keyword_density: Option<Vec<KeywordDensity>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    /// 0-100
    pub quality_score: u8,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub metrics: ContentMetrics,
}
