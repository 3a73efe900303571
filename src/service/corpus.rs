//! Read-only verse corpus index, unique by slug.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::models::ContentItem;
use crate::domain::pages::VerseRef;
use crate::service::linking::PopularityLookup;

#[derive(Debug, Clone, Default)]
pub struct Corpus {
    items: Vec<ContentItem>,
    by_slug: HashMap<String, usize>,
}

impl Corpus {
    /// Index items in their natural order. A repeated slug keeps the first
    /// occurrence.
    pub fn new(items: impl IntoIterator<Item = ContentItem>) -> Self {
        let mut corpus = Self::default();
        let mut duplicates = 0usize;

        for item in items {
            if corpus.by_slug.contains_key(&item.slug) {
                duplicates += 1;
                tracing::warn!("[LOAD] duplicate slug {}, keeping first", item.slug);
                continue;
            }
            corpus.by_slug.insert(item.slug.clone(), corpus.items.len());
            corpus.items.push(item);
        }

        tracing::debug!(
            "[LOAD] indexed {} items ({} duplicates dropped)",
            corpus.items.len(),
            duplicates
        );
        corpus
    }

    /// Items in insertion order; this is the scorer's tie-break order.
    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn get(&self, slug: &str) -> Option<&ContentItem> {
        self.by_slug.get(slug).map(|&idx| &self.items[idx])
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Verses of one chapter, ordered by verse number.
    pub fn chapter(&self, book: &str, chapter: u32) -> Vec<&ContentItem> {
        let mut verses: Vec<&ContentItem> = self
            .items
            .iter()
            .filter(|i| i.locator.chapter == chapter && i.locator.book.eq_ignore_ascii_case(book))
            .collect();
        verses.sort_by_key(|i| i.locator.verse);
        verses
    }
}

/// The priority corpus is stored most-visited first, so corpus order
/// doubles as a popularity ranking when no analytics store is wired in.
#[async_trait]
impl PopularityLookup for Corpus {
    async fn popular_in_book(
        &self,
        book: &str,
        exclude_slug: &str,
        limit: usize,
    ) -> anyhow::Result<Vec<VerseRef>> {
        Ok(self
            .items
            .iter()
            .filter(|i| i.slug != exclude_slug && i.locator.book.eq_ignore_ascii_case(book))
            .take(limit)
            .map(VerseRef::from)
            .collect())
    }

    async fn popular_verses(&self, limit: usize) -> anyhow::Result<Vec<VerseRef>> {
        Ok(self.items.iter().take(limit).map(VerseRef::from).collect())
    }

    fn name(&self) -> &'static str {
        "corpus-order"
    }
}
