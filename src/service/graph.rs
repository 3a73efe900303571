//! Read-only engine facade built once at startup.
//!
//! Holds the canonical indexes, the corpus and the curated keywords, and
//! turns raw page keys into resolved [`PageData`] for the link assembler.

use std::collections::HashSet;

use crate::config::EngineSettings;
use crate::domain::canon;
use crate::domain::models::{CanonicalEntity, CatalogKind, InternalLink, LinkSection, ScoredMatch};
use crate::domain::pages::{
    BookPage, ChapterPage, EntityRef, IntentPage, PageData, TopicPage, VersePage, VerseRef,
};
use crate::service::canonicalizer::{CatalogIndex, Resolution};
use crate::service::corpus::Corpus;
use crate::service::linking::{self, PopularCategory, PopularityLookup, SectionBuilder};
use crate::service::related;
use crate::service::scorer::{keyword_hits, CuratedKeywords, KeywordRules, RelevanceScorer};

/// How many related entities a page asks for; section caps trim further.
const RELATED_LIMIT: usize = 6;
const VERSE_TOPIC_LIMIT: usize = 5;
const KEY_VERSE_LIMIT: usize = 7;

pub struct ContentGraph {
    settings: EngineSettings,
    topics: CatalogIndex,
    intents: CatalogIndex,
    corpus: Corpus,
    topic_keywords: CuratedKeywords,
    intent_keywords: CuratedKeywords,
    topic_rules: KeywordRules,
    intent_rules: KeywordRules,
}

impl ContentGraph {
    pub fn new(
        settings: EngineSettings,
        topics: CatalogIndex,
        intents: CatalogIndex,
        corpus: Corpus,
        topic_keywords: CuratedKeywords,
        intent_keywords: CuratedKeywords,
    ) -> Self {
        let topic_rules = KeywordRules::with_prefixes(&settings.topics.strip_prefixes);
        let intent_rules = KeywordRules::with_prefixes(&settings.intents.strip_prefixes);
        Self {
            settings,
            topics,
            intents,
            corpus,
            topic_keywords,
            intent_keywords,
            topic_rules,
            intent_rules,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn index(&self, kind: CatalogKind) -> &CatalogIndex {
        match kind {
            CatalogKind::Topic => &self.topics,
            CatalogKind::Intent => &self.intents,
        }
    }

    pub fn scorer(&self, kind: CatalogKind) -> RelevanceScorer<'_> {
        match kind {
            CatalogKind::Topic => RelevanceScorer::new(&self.topic_keywords, &self.topic_rules),
            CatalogKind::Intent => RelevanceScorer::new(&self.intent_keywords, &self.intent_rules),
        }
    }

    // ====== Lookups ======

    pub fn topic(&self, raw_key: &str) -> Option<Resolution<'_>> {
        self.topics.resolve(raw_key)
    }

    pub fn intent(&self, raw_key: &str) -> Option<Resolution<'_>> {
        self.intents.resolve(raw_key)
    }

    /// Ranked verses for a raw or canonical key, up to the catalog's match
    /// limit. Unknown keys rank nothing.
    pub fn top_verses(&self, kind: CatalogKind, raw_key: &str) -> Vec<ScoredMatch<'_>> {
        let Some(resolution) = self.index(kind).resolve(raw_key) else {
            return Vec::new();
        };
        let limit = self.settings.catalog(kind).match_limit;
        self.scorer(kind)
            .score(resolution.entity(), self.corpus.items(), limit)
    }

    pub fn related_topics(&self, key: &str, limit: usize) -> Vec<&CanonicalEntity> {
        related::related_topics(&self.topics, &self.topic_keywords, key, limit)
    }

    pub fn related_intents(&self, key: &str, limit: usize) -> Vec<&CanonicalEntity> {
        related::related_intents(&self.intents, key, limit)
    }

    /// Publishable topics whose key shares a token with the intent's keywords.
    pub fn intent_topics(&self, key: &str, limit: usize) -> Vec<&CanonicalEntity> {
        let Some(intent) = self.intents.get(key) else {
            return Vec::new();
        };
        let keywords: HashSet<String> =
            self.scorer(CatalogKind::Intent).keywords(intent).into_iter().collect();

        self.topics
            .publishable()
            .filter(|topic| topic.canonical_key.split('-').any(|t| keywords.contains(t)))
            .take(limit)
            .collect()
    }

    /// Publishable topics whose keywords occur in a verse, most hits first.
    pub fn verse_topics(&self, slug: &str, limit: usize) -> Vec<&CanonicalEntity> {
        let Some(item) = self.corpus.get(slug) else {
            return Vec::new();
        };
        let scorer = self.scorer(CatalogKind::Topic);
        let mut hits: Vec<(&CanonicalEntity, u32)> = self
            .topics
            .publishable()
            .filter_map(|topic| {
                let score = keyword_hits(&scorer.keywords(topic), item.default_text());
                (score > 0).then_some((topic, score))
            })
            .collect();
        hits.sort_by(|a, b| b.1.cmp(&a.1));
        hits.into_iter().take(limit).map(|(t, _)| t).collect()
    }

    // ====== Page data ======

    pub fn topic_page(&self, raw_key: &str) -> Option<PageData> {
        let entity = self.topic(raw_key)?.entity();
        let key = entity.canonical_key.as_str();

        let top_verses: Vec<VerseRef> = self
            .top_verses(CatalogKind::Topic, key)
            .iter()
            .map(VerseRef::from)
            .collect();

        Some(PageData::Topic(TopicPage {
            slug: key.to_string(),
            name: entity.title.clone(),
            parent: None,
            sub_topics: None,
            related_topics: Some(entity_refs(self.related_topics(key, RELATED_LIMIT))),
            top_verses: Some(top_verses),
        }))
    }

    pub fn intent_page(&self, raw_key: &str) -> Option<PageData> {
        let entity = self.intent(raw_key)?.entity();
        let key = entity.canonical_key.as_str();

        let verses: Vec<VerseRef> = self
            .top_verses(CatalogKind::Intent, key)
            .iter()
            .map(VerseRef::from)
            .collect();

        Some(PageData::Intent(IntentPage {
            slug: key.to_string(),
            name: entity.title.clone(),
            related_intents: Some(entity_refs(self.related_intents(key, RELATED_LIMIT))),
            verses: Some(verses),
            topics: Some(entity_refs(self.intent_topics(key, RELATED_LIMIT))),
        }))
    }

    /// Verse page data without popular verses; see [`Self::verse_page_with`].
    pub fn verse_page(&self, slug: &str) -> Option<VersePage> {
        let item = self.corpus.get(slug)?;
        Some(VersePage {
            locator: item.locator.clone(),
            slug: item.slug.clone(),
            cross_references: None,
            topics: Some(entity_refs(self.verse_topics(slug, VERSE_TOPIC_LIMIT))),
            popular_in_book: None,
        })
    }

    /// Verse page data with popular verses resolved through `lookup`.
    pub async fn verse_page_with(
        &self,
        slug: &str,
        lookup: Option<&dyn PopularityLookup>,
    ) -> Option<PageData> {
        let mut page = self.verse_page(slug)?;
        linking::resolve_popular(&mut page, lookup).await;
        Some(PageData::Verse(page))
    }

    pub fn book_page(&self, book_slug: &str) -> Option<PageData> {
        let book = canon::find(book_slug)?;
        let key_verses: Vec<VerseRef> = self
            .corpus
            .items()
            .iter()
            .filter(|i| canon::find(&i.locator.book).is_some_and(|b| b.slug == book.slug))
            .take(KEY_VERSE_LIMIT)
            .map(VerseRef::from)
            .collect();
        BookPage::from_canon(book.slug, Some(key_verses)).map(PageData::Book)
    }

    pub fn chapter_page(&self, book_slug: &str, chapter: u32) -> Option<PageData> {
        let book = canon::find(book_slug)?;
        ChapterPage::from_canon(book.slug, chapter).map(PageData::Chapter)
    }

    /// Site-wide "You might also like" links. Topics come from the
    /// publishable listing (highest traffic first); verses from `lookup`,
    /// and are empty without one.
    pub async fn popular_pages(
        &self,
        category: PopularCategory,
        limit: usize,
        lookup: Option<&dyn PopularityLookup>,
    ) -> Vec<InternalLink> {
        let policy = &self.settings.links;
        match category {
            PopularCategory::Verse => linking::popular_verse_pages(lookup, limit, policy).await,
            PopularCategory::Topic => {
                let topics = entity_refs(self.topics.publishable().take(limit).collect());
                SectionBuilder::new(policy).popular_topic_links(&topics)
            }
        }
    }

    /// Link sections for a page under this engine's link policy.
    pub fn page_links(&self, page: &PageData) -> Vec<LinkSection> {
        linking::assemble_links(page, &self.settings.links)
    }
}

fn entity_refs(entities: Vec<&CanonicalEntity>) -> Vec<EntityRef> {
    entities
        .into_iter()
        .map(|e| EntityRef::new(e.canonical_key.clone(), e.title.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::CatalogEntry;
    use crate::service::canonicalizer::AliasTable;
    use crate::test_utils::fixtures::verse;

    fn graph() -> ContentGraph {
        let settings = EngineSettings::default();
        let topics = CatalogIndex::build(
            CatalogKind::Topic,
            &[
                CatalogEntry::new("strength", "Bible Verses About Strength", 60000),
                CatalogEntry::new("gods-strength", "God's Strength", 7000),
                CatalogEntry::new("peace", "Bible Verses About Peace", 40000),
                CatalogEntry::new("rare", "Rare", 10),
            ],
            AliasTable::from([("gods-strength".to_string(), "strength".to_string())]),
            settings.topics.min_traffic,
        );
        let intents = CatalogIndex::build(
            CatalogKind::Intent,
            &[
                CatalogEntry::new("for-strength", "Verses for Strength", 3000),
                CatalogEntry::new("for-weddings", "Verses for Weddings", 2000),
            ],
            AliasTable::new(),
            settings.intents.min_traffic,
        );
        let corpus = Corpus::new(vec![
            verse("Isaiah", 40, 31, "They will renew their strength"),
            verse("Philippians", 4, 7, "And the peace of God"),
            verse("Psalms", 46, 1, "God is our refuge and strength"),
            verse("Isaiah", 26, 3, "You will keep in perfect peace"),
        ]);
        ContentGraph::new(
            settings,
            topics,
            intents,
            corpus,
            CuratedKeywords::new(),
            CuratedKeywords::new(),
        )
    }

    #[test]
    fn variant_keys_serve_canonical_page() {
        let graph = graph();
        assert!(graph.topic("gods-strength").unwrap().is_redirect());

        let Some(PageData::Topic(page)) = graph.topic_page("gods-strength") else {
            panic!("expected topic page");
        };
        assert_eq!(page.slug, "strength");
        assert_eq!(page.name, "Bible Verses About Strength");
        let top: Vec<&str> = page.top_verses.iter().flatten().map(|v| v.slug.as_str()).collect();
        assert_eq!(top, vec!["isaiah-40-31", "psalms-46-1"]);
        // "rare" is below the publication threshold
        let related: Vec<&str> = page.related_topics.iter().flatten().map(|t| t.slug.as_str()).collect();
        assert_eq!(related, vec!["peace"]);
    }

    #[test]
    fn unknown_keys_yield_nothing() {
        let graph = graph();
        assert!(graph.topic_page("nope").is_none());
        assert!(graph.top_verses(CatalogKind::Intent, "for-nope").is_empty());
        assert!(graph.verse_page("john-3-16").is_none());
    }

    #[test]
    fn intent_page_links_matching_topics() {
        let graph = graph();
        let Some(PageData::Intent(page)) = graph.intent_page("for-strength") else {
            panic!("expected intent page");
        };
        let topics: Vec<&str> = page.topics.iter().flatten().map(|t| t.slug.as_str()).collect();
        assert_eq!(topics, vec!["strength"]);
        assert_eq!(page.related_intents.as_ref().unwrap()[0].slug, "for-weddings");
        assert_eq!(page.verses.as_ref().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn verse_page_uses_corpus_popularity() {
        let graph = graph();
        let Some(PageData::Verse(page)) = graph
            .verse_page_with("isaiah-40-31", Some(graph.corpus() as &dyn PopularityLookup))
            .await
        else {
            panic!("expected verse page");
        };
        assert_eq!(page.topics.as_ref().unwrap()[0].slug, "strength");
        let popular = page.popular_in_book.unwrap();
        assert_eq!(popular.len(), 1);
        assert_eq!(popular[0].slug, "isaiah-26-3");
    }

    #[test]
    fn book_page_collects_key_verses_from_corpus() {
        let graph = graph();
        let Some(PageData::Book(page)) = graph.book_page("Isaiah") else {
            panic!("expected book page");
        };
        assert_eq!(page.key_verses.as_ref().unwrap().len(), 2);
        let sections = graph.page_links(&PageData::Book(page));
        assert!(sections.iter().any(|s| s.title == "Key Verses in Isaiah"));
    }

    #[tokio::test]
    async fn popular_pages_list_top_topics_and_corpus_verses() {
        let graph = graph();

        let topics = graph.popular_pages(PopularCategory::Topic, 5, None).await;
        let names: Vec<&str> = topics.iter().map(|l| l.display_text.as_str()).collect();
        assert_eq!(names, vec!["Bible Verses About Strength", "Bible Verses About Peace"]);

        let verses = graph
            .popular_pages(PopularCategory::Verse, 1, Some(graph.corpus() as &dyn PopularityLookup))
            .await;
        assert_eq!(verses.len(), 1);
        assert!(verses[0].url.ends_with("/verse/isaiah-40-31"));

        assert!(graph.popular_pages(PopularCategory::Verse, 5, None).await.is_empty());
    }
}
