//! Catalog canonicalizer - collapses duplicate topic/intent keys into one
//! canonical entity per concept.
//!
//! Built once at process start from a flat catalog plus a hand-curated alias
//! table, then read-only. Raw keys absent from the alias table are canonical
//! under their own key. Alias lookups are single-level: an alias target is
//! not itself looked up again.

use std::collections::{BTreeSet, HashMap};

use crate::domain::models::{CanonicalEntity, CatalogEntry, CatalogKind};

/// Known-duplicate raw key -> designated canonical key.
pub type AliasTable = HashMap<String, String>;

/// How a raw key resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// The key is the entity's own canonical key.
    Canonical(&'a CanonicalEntity),
    /// The key is a variant; callers should redirect to `to`.
    Redirect { to: &'a CanonicalEntity },
}

impl<'a> Resolution<'a> {
    pub fn entity(&self) -> &'a CanonicalEntity {
        match self {
            Resolution::Canonical(entity) => entity,
            Resolution::Redirect { to } => to,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Resolution::Redirect { .. })
    }
}

/// Canonicalize a raw catalog into `canonicalKey -> CanonicalEntity`.
pub fn canonicalize(
    kind: CatalogKind,
    entries: &[CatalogEntry],
    aliases: &AliasTable,
) -> HashMap<String, CanonicalEntity> {
    CatalogIndex::build(kind, entries, aliases.clone(), 0)
        .entities
        .into_iter()
        .map(|e| (e.canonical_key.clone(), e))
        .collect()
}

/// Read-only canonical entity index for one catalog.
#[derive(Debug, Clone)]
pub struct CatalogIndex {
    kind: CatalogKind,
    /// First-seen order of canonical keys.
    entities: Vec<CanonicalEntity>,
    by_canonical: HashMap<String, usize>,
    by_raw: HashMap<String, usize>,
    aliases: AliasTable,
    /// Indexes of publishable entities, traffic descending.
    publishable: Vec<usize>,
    min_traffic: u64,
}

impl CatalogIndex {
    pub fn build(
        kind: CatalogKind,
        entries: &[CatalogEntry],
        aliases: AliasTable,
        min_traffic: u64,
    ) -> Self {
        let mut entities: Vec<CanonicalEntity> = Vec::new();
        let mut by_canonical: HashMap<String, usize> = HashMap::new();
        let mut by_raw: HashMap<String, usize> = HashMap::new();
        let mut dropped = 0usize;

        for entry in entries {
            let raw_key = entry.key.trim();
            if raw_key.is_empty() {
                dropped += 1;
                tracing::warn!(
                    "[CANON] dropping {} entry with blank key (title: {:?})",
                    kind.as_str(),
                    entry.display_title
                );
                continue;
            }

            let canonical_key = resolve_alias(&aliases, raw_key);

            let idx = match by_canonical.get(canonical_key) {
                Some(&idx) => {
                    let existing = &mut entities[idx];
                    // Strictly greater: ties keep the earliest-seen title.
                    if entry.traffic_weight > existing.traffic_weight {
                        existing.title = entry.display_title.clone();
                        existing.traffic_weight = entry.traffic_weight;
                    }
                    existing.variant_keys.insert(raw_key.to_string());
                    idx
                }
                None => {
                    entities.push(CanonicalEntity {
                        canonical_key: canonical_key.to_string(),
                        title: entry.display_title.clone(),
                        traffic_weight: entry.traffic_weight,
                        variant_keys: BTreeSet::from([raw_key.to_string()]),
                    });
                    let idx = entities.len() - 1;
                    by_canonical.insert(canonical_key.to_string(), idx);
                    idx
                }
            };
            by_raw.insert(raw_key.to_string(), idx);
        }

        let mut publishable: Vec<usize> = (0..entities.len())
            .filter(|&i| entities[i].traffic_weight >= min_traffic)
            .collect();
        publishable.sort_by(|&a, &b| entities[b].traffic_weight.cmp(&entities[a].traffic_weight));

        tracing::debug!(
            "[CANON] {} catalog: {} raw entries -> {} canonical ({} publishable, {} dropped)",
            kind.as_str(),
            entries.len(),
            entities.len(),
            publishable.len(),
            dropped
        );

        Self {
            kind,
            entities,
            by_canonical,
            by_raw,
            aliases,
            publishable,
            min_traffic,
        }
    }

    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    pub fn min_traffic(&self) -> u64 {
        self.min_traffic
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// All canonical entities in first-seen order, publishable or not.
    pub fn entities(&self) -> &[CanonicalEntity] {
        &self.entities
    }

    /// Lookup by canonical key only.
    pub fn get(&self, canonical_key: &str) -> Option<&CanonicalEntity> {
        self.by_canonical
            .get(canonical_key)
            .map(|&idx| &self.entities[idx])
    }

    /// Resolve a raw or canonical key. Keys not present in the catalog still
    /// resolve through the alias table when their target exists.
    pub fn resolve(&self, key: &str) -> Option<Resolution<'_>> {
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        let idx = self
            .by_raw
            .get(key)
            .or_else(|| self.by_canonical.get(resolve_alias(&self.aliases, key)))?;
        let entity = &self.entities[*idx];
        if entity.canonical_key == key {
            Some(Resolution::Canonical(entity))
        } else {
            Some(Resolution::Redirect { to: entity })
        }
    }

    /// Publishable entities, highest traffic first (ties in first-seen order).
    pub fn publishable(&self) -> impl Iterator<Item = &CanonicalEntity> + '_ {
        self.publishable.iter().map(move |&idx| &self.entities[idx])
    }

    pub fn is_publishable(&self, canonical_key: &str) -> bool {
        self.get(canonical_key)
            .map(|e| e.traffic_weight >= self.min_traffic)
            .unwrap_or(false)
    }
}

fn resolve_alias<'a>(aliases: &'a AliasTable, raw_key: &'a str) -> &'a str {
    match aliases.get(raw_key).map(|t| t.trim()) {
        Some(target) if !target.is_empty() => target,
        _ => raw_key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aliases(pairs: &[(&str, &str)]) -> AliasTable {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn entry(key: &str, title: &str, traffic: u64) -> CatalogEntry {
        CatalogEntry::new(key, title, traffic)
    }

    #[test]
    fn merges_alias_into_highest_traffic_title() {
        let entries = vec![
            entry("loving-god", "Loving God", 50),
            entry("love", "Bible Verses About Love", 900),
        ];
        let map = canonicalize(CatalogKind::Topic, &entries, &aliases(&[("loving-god", "love")]));

        assert_eq!(map.len(), 1);
        let love = &map["love"];
        assert_eq!(love.title, "Bible Verses About Love");
        assert_eq!(love.traffic_weight, 900);
        let variants: Vec<&str> = love.variant_keys.iter().map(String::as_str).collect();
        assert_eq!(variants, vec!["love", "loving-god"]);
    }

    #[test]
    fn ties_keep_earliest_seen_title() {
        let entries = vec![
            entry("gods-love", "God's Love", 500),
            entry("love", "Love", 500),
        ];
        let map = canonicalize(CatalogKind::Topic, &entries, &aliases(&[("gods-love", "love")]));
        assert_eq!(map["love"].title, "God's Love");
    }

    #[test]
    fn every_raw_key_lands_in_exactly_one_entity() {
        let entries = vec![
            entry("love", "Love", 900),
            entry("loving", "Loving", 40),
            entry("joy", "Joy", 300),
            entry("joyful", "Joyful", 20),
            entry("hope", "Hope", 10),
            entry("joy", "Joy again", 5),
        ];
        let map = canonicalize(
            CatalogKind::Topic,
            &entries,
            &aliases(&[("loving", "love"), ("joyful", "joy"), ("unused", "hope")]),
        );

        for raw in ["love", "loving", "joy", "joyful", "hope"] {
            let owners = map.values().filter(|e| e.variant_keys.contains(raw)).count();
            assert_eq!(owners, 1, "raw key {raw} owned by {owners} entities");
        }
        let total: usize = map.values().map(|e| e.variant_keys.len()).sum();
        assert_eq!(total, 5);
    }

    #[test]
    fn canonicalizing_twice_is_idempotent() {
        let entries = vec![
            entry("worry", "Worry", 700),
            entry("worries", "Worries", 900),
            entry("peace", "Peace", 100),
        ];
        let table = aliases(&[("worries", "worry")]);
        let first = canonicalize(CatalogKind::Topic, &entries, &table);
        assert_eq!(first, canonicalize(CatalogKind::Topic, &entries, &table));
    }

    #[test]
    fn result_is_independent_of_input_order_for_distinct_weights() {
        let forward = vec![entry("moms", "Moms", 10), entry("mother", "Mother", 70)];
        let backward: Vec<_> = forward.iter().rev().cloned().collect();
        let table = aliases(&[("moms", "mother")]);
        assert_eq!(
            canonicalize(CatalogKind::Topic, &forward, &table),
            canonicalize(CatalogKind::Topic, &backward, &table)
        );
    }

    #[test]
    fn blank_keys_are_dropped() {
        let entries = vec![entry("   ", "Nothing", 1_000_000), entry("faith", "Faith", 10)];
        let map = canonicalize(CatalogKind::Topic, &entries, &AliasTable::new());
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("faith"));
    }

    #[test]
    fn intent_catalogs_canonicalize_under_their_own_kind() {
        let entries = vec![
            entry("for-wedding", "Verses for a Wedding", 400),
            entry("for-weddings", "Verses for Weddings", 2000),
        ];
        let table = aliases(&[("for-wedding", "for-weddings")]);
        let map = canonicalize(CatalogKind::Intent, &entries, &table);
        assert_eq!(map.len(), 1);
        assert_eq!(map["for-weddings"].variant_keys.len(), 2);

        let index = CatalogIndex::build(CatalogKind::Intent, &entries, table, 0);
        assert_eq!(index.kind(), CatalogKind::Intent);
    }

    #[test]
    fn resolve_distinguishes_canonical_from_redirect() {
        let entries = vec![entry("prayer", "Prayer", 9000), entry("praying", "Praying", 10)];
        let index = CatalogIndex::build(
            CatalogKind::Topic,
            &entries,
            aliases(&[("praying", "prayer"), ("prayers", "prayer")]),
            0,
        );

        let direct = index.resolve("prayer").unwrap();
        assert!(!direct.is_redirect());

        let variant = index.resolve("praying").unwrap();
        assert!(variant.is_redirect());
        assert_eq!(variant.entity().canonical_key, "prayer");

        // Not in the catalog, but aliased to an existing entity
        let aliased = index.resolve("prayers").unwrap();
        assert_eq!(aliased.entity().canonical_key, "prayer");

        assert!(index.resolve("fasting").is_none());
        assert!(index.resolve("").is_none());
    }

    #[test]
    fn publishable_view_filters_and_orders_by_traffic() {
        let entries = vec![
            entry("grief", "Grief", 6000),
            entry("joy", "Joy", 12000),
            entry("hard-work", "Hard Work", 4000),
            entry("peace", "Peace", 6000),
        ];
        let index = CatalogIndex::build(CatalogKind::Topic, &entries, AliasTable::new(), 5000);

        let listed: Vec<&str> = index.publishable().map(|e| e.canonical_key.as_str()).collect();
        assert_eq!(listed, vec!["joy", "grief", "peace"]);
        assert!(!index.is_publishable("hard-work"));
        // Still resolvable for redirect-style lookups
        assert!(index.resolve("hard-work").is_some());
    }
}
