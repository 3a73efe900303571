//! Link graph assembler - titled sections of internal links per page.
//!
//! Hub-and-spoke linking: every page gets breadcrumbs, its parent hub,
//! siblings, related pages and (for verses) cross-references and popular
//! verses of the same book. Assembly is synchronous and pure; the only
//! async step is the optional popularity lookup, resolved beforehand with
//! [`resolve_popular`].

mod policy;
mod sections;

pub use policy::{count_internal_links, validate_internal_linking, LinkValidation};
pub use sections::SectionBuilder;

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::domain::models::{InternalLink, LinkSection, Locator};
use crate::domain::pages::{PageData, VersePage, VerseRef};

pub const DEFAULT_BASE_URL: &str = "https://bibleverserandomizer.com";

/// Popular-in-book links requested from a lookup.
pub const POPULAR_IN_BOOK_LIMIT: usize = 5;

/// Whole-page link policy and URL base.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LinkPolicy {
    pub base_url: Url,
    /// Fewer links than this warns "too few".
    pub min_total: usize,
    /// Upper end of the range suggested in the "too few" warning.
    pub recommended_total: usize,
    /// More links than this warns about dilution.
    pub max_total: usize,
    /// Default budget for [`flatten`] callers such as a sidebar.
    pub flatten_limit: usize,
    /// Cap on the chapter list of a book page.
    pub max_chapter_links: u32,
}

impl Default for LinkPolicy {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            min_total: 10,
            recommended_total: 15,
            max_total: 50,
            flatten_limit: 15,
            max_chapter_links: 10,
        }
    }
}

/// Ranked verses of a book, supplied by a storage collaborator.
#[async_trait]
pub trait PopularityLookup: Send + Sync {
    /// Most popular verses of `book`, excluding `exclude_slug`, best first.
    async fn popular_in_book(
        &self,
        book: &str,
        exclude_slug: &str,
        limit: usize,
    ) -> anyhow::Result<Vec<VerseRef>>;

    /// Most popular verses across the whole site, best first.
    async fn popular_verses(&self, limit: usize) -> anyhow::Result<Vec<VerseRef>>;

    /// Human-readable name for logging.
    fn name(&self) -> &'static str;
}

/// Fill `page.popular_in_book` from the lookup. Without a lookup, or when
/// it fails or returns nothing, the field stays `None` and the section is
/// omitted.
pub async fn resolve_popular(page: &mut VersePage, lookup: Option<&dyn PopularityLookup>) {
    let Some(lookup) = lookup else {
        return;
    };

    match lookup
        .popular_in_book(&page.locator.book, &page.slug, POPULAR_IN_BOOK_LIMIT)
        .await
    {
        Ok(verses) => {
            let verses: Vec<VerseRef> = verses
                .into_iter()
                .filter(|v| v.slug != page.slug)
                .take(POPULAR_IN_BOOK_LIMIT)
                .collect();
            if !verses.is_empty() {
                page.popular_in_book = Some(verses);
            }
        }
        Err(e) => {
            tracing::warn!(
                "[LINKS] popularity lookup '{}' failed for {}: {:#}",
                lookup.name(),
                page.slug,
                e
            );
        }
    }
}

/// What a site-wide "You might also like" list points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopularCategory {
    Verse,
    Topic,
}

/// Site-wide popular verse links. Empty without a lookup or when the
/// lookup fails.
pub async fn popular_verse_pages(
    lookup: Option<&dyn PopularityLookup>,
    limit: usize,
    policy: &LinkPolicy,
) -> Vec<InternalLink> {
    let Some(lookup) = lookup else {
        return Vec::new();
    };

    match lookup.popular_verses(limit).await {
        Ok(verses) => {
            let verses: Vec<VerseRef> = verses.into_iter().take(limit).collect();
            SectionBuilder::new(policy).popular_verse_links(&verses)
        }
        Err(e) => {
            tracing::warn!(
                "[LINKS] popularity lookup '{}' failed for site-wide verses: {:#}",
                lookup.name(),
                e
            );
            Vec::new()
        }
    }
}

/// Build every link section for a page, in template order. Sections whose
/// related data is absent are omitted.
pub fn assemble_links(page: &PageData, policy: &LinkPolicy) -> Vec<LinkSection> {
    let builder = SectionBuilder::new(policy);
    let sections = match page {
        PageData::Verse(verse) => builder.verse_sections(verse),
        PageData::Topic(topic) => builder.topic_sections(topic),
        PageData::Intent(intent) => builder.intent_sections(intent),
        PageData::Book(book) => builder.book_sections(book),
        PageData::Chapter(chapter) => builder.chapter_sections(chapter),
    };
    tracing::debug!(
        "[LINKS] {} page: {} sections, {} links",
        page.page_type(),
        sections.len(),
        count_internal_links(&sections)
    );
    sections
}

/// Merge all sections into one list, highest priority first (stable within
/// equal priority), truncated to `max_links`.
pub fn flatten(sections: &[LinkSection], max_links: usize) -> Vec<InternalLink> {
    let mut links: Vec<InternalLink> = sections
        .iter()
        .flat_map(|s| s.links.iter().cloned())
        .collect();
    links.sort_by(|a, b| b.priority.cmp(&a.priority));
    links.truncate(max_links);
    links
}

/// What an anchor points at, for anchor text suggestions.
#[derive(Debug, Clone, Copy)]
pub enum AnchorTarget<'a> {
    Verse(&'a Locator),
    Topic(&'a str),
    Intent(&'a str),
    Book(&'a str),
    Other(&'a str),
}

pub fn anchor_text(target: AnchorTarget<'_>) -> String {
    match target {
        AnchorTarget::Verse(locator) => locator.to_string(),
        AnchorTarget::Topic(name) => format!("Bible verses about {}", name.to_lowercase()),
        AnchorTarget::Intent(name) => format!("Bible verses for {}", name.to_lowercase()),
        AnchorTarget::Book(name) => format!("Book of {name}"),
        AnchorTarget::Other(name) if name.trim().is_empty() => "Read more".to_string(),
        AnchorTarget::Other(name) => name.to_string(),
    }
}
