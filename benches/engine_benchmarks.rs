// benches/engine_benchmarks.rs
use criterion::{criterion_group, criterion_main, Criterion};
use std::collections::BTreeMap;
use std::{hint::black_box, time::Duration};

use seograph::domain::models::{CatalogEntry, CatalogKind, ContentItem, Locator, PageType, Translation};
use seograph::domain::pages::{PageData, TopicPage, VerseRef};
use seograph::service::content::{ContentInput, ContentValidator};
use seograph::service::linking::{assemble_links, flatten, LinkPolicy};
use seograph::service::{AliasTable, CatalogIndex, CuratedKeywords, KeywordRules, RelevanceScorer};

const WORDS: &[&str] = &[
    "love", "strength", "peace", "hope", "grace", "mercy", "faith", "joy", "rest", "light",
];

fn corpus(size: usize) -> Vec<ContentItem> {
    (0..size)
        .map(|i| {
            let text = format!(
                "The Lord gives {} and {} to all who seek {} in verse {}",
                WORDS[i % WORDS.len()],
                WORDS[(i * 7) % WORDS.len()],
                WORDS[(i * 3) % WORDS.len()],
                i
            );
            ContentItem {
                locator: Locator::new("Psalms", (i / 20) as u32 + 1, (i % 20) as u32 + 1),
                text_by_variant: BTreeMap::from([(Translation::Niv, text)]),
                slug: format!("psalms-{}-{}", i / 20 + 1, i % 20 + 1),
            }
        })
        .collect()
}

fn bench_scoring(c: &mut Criterion) {
    let entries: Vec<CatalogEntry> = WORDS
        .iter()
        .enumerate()
        .map(|(i, w)| CatalogEntry::new(*w, *w, 10_000 - i as u64))
        .collect();
    let index = CatalogIndex::build(CatalogKind::Topic, &entries, AliasTable::new(), 0);
    let items = corpus(1000);
    let curated = CuratedKeywords::new();
    let rules = KeywordRules::default();
    let scorer = RelevanceScorer::new(&curated, &rules);

    c.bench_function("score_all_topics_1000_verses", |b| {
        b.iter(|| {
            for entity in index.publishable() {
                black_box(scorer.score(black_box(entity), &items, 20));
            }
        });
    });
}

fn bench_links(c: &mut Criterion) {
    let items = corpus(20);
    let page = PageData::Topic(TopicPage {
        slug: "strength".into(),
        name: "Strength".into(),
        parent: None,
        sub_topics: None,
        related_topics: None,
        top_verses: Some(items.iter().map(VerseRef::from).collect()),
    });
    let policy = LinkPolicy::default();

    c.bench_function("assemble_and_flatten_topic_links", |b| {
        b.iter(|| {
            let sections = assemble_links(black_box(&page), &policy);
            black_box(flatten(&sections, policy.flatten_limit))
        });
    });
}

fn bench_validation(c: &mut Criterion) {
    let body = corpus(300)
        .iter()
        .map(|i| format!("{}.", i.default_text()))
        .collect::<Vec<_>>()
        .join("\n\n");
    let input = ContentInput::new(PageType::Verse, "Psalm 23 Meaning and Commentary", body);
    let validator = ContentValidator::default();

    c.bench_function("validate_verse_body", |b| {
        b.iter(|| black_box(validator.validate(black_box(&input))));
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(20)
        .measurement_time(Duration::from_secs(5));
    targets = bench_scoring, bench_links, bench_validation
}

criterion_main!(benches);
