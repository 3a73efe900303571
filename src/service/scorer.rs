//! Relevance scorer - ranks corpus verses for a canonical entity.
//!
//! The keyword set is the union of curated keywords registered for the
//! canonical key and tokens derived from the canonical key and its variants.
//! A verse scores one point per keyword found as a case-insensitive
//! substring of its default-translation text. Substring matching can
//! over-match inside longer words ("rest" in "forest"); rankings built on
//! top of it depend on that behaviour, so it stays.

use std::collections::{HashMap, HashSet};

use crate::domain::models::{CanonicalEntity, ContentItem, ScoredMatch};

/// Canonical key -> hand-picked keywords.
pub type CuratedKeywords = HashMap<String, Vec<String>>;

/// Tokens of this many characters or fewer are not used as keywords.
const MAX_DISCARDED_TOKEN_LEN: usize = 2;

/// Rules for deriving keywords from catalog keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordRules {
    /// Prefixes removed from a key before it is split (e.g. "for-").
    pub strip_prefixes: Vec<String>,
}

impl KeywordRules {
    pub fn with_prefixes(prefixes: &[String]) -> Self {
        Self { strip_prefixes: prefixes.to_vec() }
    }

    /// Split a key on word-boundary separators, dropping short tokens.
    pub fn derive<'k>(&self, key: &'k str) -> impl Iterator<Item = &'k str> {
        let stripped = self
            .strip_prefixes
            .iter()
            .find_map(|p| key.strip_prefix(p.as_str()))
            .unwrap_or(key);
        stripped
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| t.chars().count() > MAX_DISCARDED_TOKEN_LEN)
    }
}

/// Scores corpus items against canonical entities. Cheap to construct and
/// side-effect free, so it can be shared across threads.
#[derive(Debug, Clone, Copy)]
pub struct RelevanceScorer<'a> {
    curated: &'a CuratedKeywords,
    rules: &'a KeywordRules,
}

impl<'a> RelevanceScorer<'a> {
    pub fn new(curated: &'a CuratedKeywords, rules: &'a KeywordRules) -> Self {
        Self { curated, rules }
    }

    /// Lowercased, deduplicated keywords: curated first, then derived.
    pub fn keywords(&self, entity: &CanonicalEntity) -> Vec<String> {
        let curated = self
            .curated
            .get(&entity.canonical_key)
            .into_iter()
            .flatten()
            .map(|k| k.trim());
        let derived = entity.keys().flat_map(|key| self.rules.derive(key));

        let mut seen = HashSet::new();
        curated
            .chain(derived)
            .filter(|k| !k.is_empty())
            .map(str::to_lowercase)
            .filter(|k| seen.insert(k.clone()))
            .collect()
    }

    /// Top `limit` matches, score descending, ties in corpus order.
    pub fn score<'c>(
        &self,
        entity: &CanonicalEntity,
        corpus: &'c [ContentItem],
        limit: usize,
    ) -> Vec<ScoredMatch<'c>> {
        let keywords = self.keywords(entity);
        if keywords.is_empty() {
            tracing::debug!("[SCORE] no keywords for {}", entity.canonical_key);
            return Vec::new();
        }

        let mut matches: Vec<ScoredMatch<'c>> = corpus
            .iter()
            .filter_map(|item| {
                let score = keyword_hits(&keywords, item.default_text());
                (score > 0).then_some(ScoredMatch { item, score })
            })
            .collect();

        // sort_by is stable, so equal scores keep corpus order
        matches.sort_by(|a, b| b.score.cmp(&a.score));
        matches.truncate(limit);

        tracing::debug!(
            "[SCORE] {}: {} keywords, {} matches kept",
            entity.canonical_key,
            keywords.len(),
            matches.len()
        );
        matches
    }
}

/// Number of keywords occurring anywhere in `text`, case-insensitively.
pub fn keyword_hits(keywords: &[String], text: &str) -> u32 {
    if text.is_empty() {
        return 0;
    }
    let text = text.to_lowercase();
    keywords.iter().filter(|k| text.contains(k.as_str())).count() as u32
}

/// One-shot scoring with default keyword rules.
pub fn score<'c>(
    entity: &CanonicalEntity,
    corpus: &'c [ContentItem],
    curated: &CuratedKeywords,
    limit: usize,
) -> Vec<ScoredMatch<'c>> {
    let rules = KeywordRules::default();
    RelevanceScorer::new(curated, &rules).score(entity, corpus, limit)
}
