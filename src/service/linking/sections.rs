//! Section templates for each page type.

use crate::domain::models::{InternalLink, LinkCategory, LinkSection};
use crate::domain::pages::{
    BookPage, ChapterPage, ChapterRef, EntityRef, IntentPage, TopicPage, VersePage, VerseRef,
};
use crate::domain::slugify;

use super::LinkPolicy;

// Per-section caps
const MAX_CROSS_REFERENCES: usize = 7;
const MAX_VERSE_TOPICS: usize = 5;
const MAX_SUB_TOPICS: usize = 7;
const MAX_RELATED_TOPICS: usize = 6;
const MAX_TOP_VERSES: usize = 5;
const MAX_SIMILAR_OCCASIONS: usize = 5;
const MAX_FEATURED_VERSES: usize = 8;
const MAX_INTENT_TOPICS: usize = 5;
const MAX_KEY_VERSES: usize = 7;
const MAX_POPULAR: usize = 5;

// Priorities (10 = highest)
const PRIORITY_HOME: u8 = 10;
const PRIORITY_HUB: u8 = 9;
const PRIORITY_NEARBY: u8 = 8;
const PRIORITY_RELATED: u8 = 7;
const PRIORITY_POPULAR: u8 = 6;
const PRIORITY_SITE_POPULAR: u8 = 5;

/// Builds link sections against one site base URL.
pub struct SectionBuilder<'p> {
    base: &'p str,
    policy: &'p LinkPolicy,
}

impl<'p> SectionBuilder<'p> {
    pub fn new(policy: &'p LinkPolicy) -> Self {
        Self {
            base: policy.base_url.as_str().trim_end_matches('/'),
            policy,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn home(&self) -> InternalLink {
        InternalLink::new(self.base, "Home", LinkCategory::Breadcrumb, PRIORITY_HOME)
    }

    fn verse_link(&self, verse: &VerseRef, category: LinkCategory, priority: u8) -> InternalLink {
        InternalLink::new(
            self.url(&format!("/verse/{}", verse.slug)),
            verse.locator.to_string(),
            category,
            priority,
        )
    }

    fn verse_links(
        &self,
        verses: Option<&Vec<VerseRef>>,
        cap: usize,
        category: LinkCategory,
        priority: u8,
    ) -> Vec<InternalLink> {
        verses
            .into_iter()
            .flatten()
            .take(cap)
            .map(|v| self.verse_link(v, category, priority))
            .collect()
    }

    fn entity_links(
        &self,
        entities: Option<&Vec<EntityRef>>,
        route: &str,
        cap: usize,
        category: LinkCategory,
        priority: u8,
    ) -> Vec<InternalLink> {
        entities
            .into_iter()
            .flatten()
            .take(cap)
            .map(|e| {
                InternalLink::new(
                    self.url(&format!("/{route}/{}", e.slug)),
                    e.name.clone(),
                    category,
                    priority,
                )
            })
            .collect()
    }

    // ====== Site-wide ======

    /// "You might also like" links to the most popular verses of the site.
    pub fn popular_verse_links(&self, verses: &[VerseRef]) -> Vec<InternalLink> {
        verses
            .iter()
            .map(|v| self.verse_link(v, LinkCategory::Popular, PRIORITY_SITE_POPULAR))
            .collect()
    }

    /// "You might also like" links to the highest-traffic topics.
    pub fn popular_topic_links(&self, topics: &[EntityRef]) -> Vec<InternalLink> {
        topics
            .iter()
            .map(|t| {
                InternalLink::new(
                    self.url(&format!("/topic/{}", t.slug)),
                    t.name.clone(),
                    LinkCategory::Popular,
                    PRIORITY_SITE_POPULAR,
                )
            })
            .collect()
    }

    // ====== Verse ======

    /// Nearby verses adjust the verse number only; the next verse is linked
    /// without checking the chapter's actual length.
    pub fn verse_sections(&self, page: &VersePage) -> Vec<LinkSection> {
        let book = &page.locator.book;
        let book_slug = slugify(book);
        let chapter = page.locator.chapter;
        let verse = page.locator.verse;

        let navigation = LinkSection::non_empty(
            "Navigation",
            vec![
                self.home(),
                InternalLink::new(
                    self.url(&format!("/book/{book_slug}")),
                    format!("Book of {book}"),
                    LinkCategory::Breadcrumb,
                    PRIORITY_HUB,
                ),
                InternalLink::new(
                    self.url(&format!("/book/{book_slug}/chapter/{chapter}")),
                    format!("{book} Chapter {chapter}"),
                    LinkCategory::Parent,
                    PRIORITY_HUB,
                ),
            ],
        );

        let nearby_link = |n: u32| {
            InternalLink::new(
                self.url(&format!("/verse/{book_slug}-{chapter}-{n}")),
                format!("{book} {chapter}:{n}"),
                LinkCategory::Sibling,
                PRIORITY_NEARBY,
            )
        };
        let mut nearby = Vec::with_capacity(2);
        if verse > 1 {
            nearby.push(nearby_link(verse - 1));
        }
        if let Some(next) = verse.checked_add(1) {
            nearby.push(nearby_link(next));
        }
        let nearby = LinkSection::non_empty("Nearby Verses", nearby);

        let cross_references = LinkSection::non_empty(
            "Related Verses",
            page.cross_references
                .iter()
                .flatten()
                .take(MAX_CROSS_REFERENCES)
                .map(|reference| {
                    InternalLink::new(
                        self.url(&format!("/verse/{}", slugify(reference))),
                        reference.clone(),
                        LinkCategory::CrossReference,
                        PRIORITY_HUB,
                    )
                })
                .collect(),
        );

        let topics = LinkSection::non_empty(
            "Topics in This Verse",
            self.entity_links(
                page.topics.as_ref(),
                "topic",
                MAX_VERSE_TOPICS,
                LinkCategory::Topic,
                PRIORITY_RELATED,
            ),
        );

        let popular = LinkSection::non_empty(
            format!("Popular in {book}"),
            self.verse_links(
                page.popular_in_book.as_ref(),
                MAX_POPULAR,
                LinkCategory::Popular,
                PRIORITY_POPULAR,
            ),
        );

        [navigation, nearby, cross_references, topics, popular]
            .into_iter()
            .flatten()
            .collect()
    }

    // ====== Topic ======

    pub fn topic_sections(&self, page: &TopicPage) -> Vec<LinkSection> {
        let navigation = LinkSection::non_empty(
            "Navigation",
            vec![
                self.home(),
                InternalLink::new(self.url("/topics"), "All Topics", LinkCategory::Parent, PRIORITY_HUB),
            ],
        );

        let parent = page.parent.as_ref().and_then(|parent| {
            LinkSection::non_empty(
                "Parent Topic",
                vec![InternalLink::new(
                    self.url(&format!("/topic/{}", parent.slug)),
                    parent.name.clone(),
                    LinkCategory::Parent,
                    PRIORITY_HUB,
                )],
            )
        });

        let sub_topics = LinkSection::non_empty(
            "Explore More Specific Topics",
            self.entity_links(
                page.sub_topics.as_ref(),
                "topic",
                MAX_SUB_TOPICS,
                LinkCategory::Sibling,
                PRIORITY_NEARBY,
            ),
        );

        let related = LinkSection::non_empty(
            "Related Topics",
            self.entity_links(
                page.related_topics.as_ref(),
                "topic",
                MAX_RELATED_TOPICS,
                LinkCategory::Related,
                PRIORITY_RELATED,
            ),
        );

        let top_verses = LinkSection::non_empty(
            format!("Top {} Verses", page.name),
            self.verse_links(
                page.top_verses.as_ref(),
                MAX_TOP_VERSES,
                LinkCategory::Related,
                PRIORITY_NEARBY,
            ),
        );

        [navigation, parent, sub_topics, related, top_verses]
            .into_iter()
            .flatten()
            .collect()
    }

    // ====== Intent ======

    pub fn intent_sections(&self, page: &IntentPage) -> Vec<LinkSection> {
        let navigation = LinkSection::non_empty(
            "Navigation",
            vec![
                self.home(),
                InternalLink::new(
                    self.url("/for"),
                    "Browse by Occasion",
                    LinkCategory::Parent,
                    PRIORITY_HUB,
                ),
            ],
        );

        let similar = LinkSection::non_empty(
            "Similar Occasions",
            self.entity_links(
                page.related_intents.as_ref(),
                "for",
                MAX_SIMILAR_OCCASIONS,
                LinkCategory::Related,
                PRIORITY_RELATED,
            ),
        );

        let featured = LinkSection::non_empty(
            format!("Featured Verses for {}", page.name),
            self.verse_links(
                page.verses.as_ref(),
                MAX_FEATURED_VERSES,
                LinkCategory::Related,
                PRIORITY_NEARBY,
            ),
        );

        let topics = LinkSection::non_empty(
            "Related Topics",
            self.entity_links(
                page.topics.as_ref(),
                "topic",
                MAX_INTENT_TOPICS,
                LinkCategory::Topic,
                PRIORITY_RELATED,
            ),
        );

        [navigation, similar, featured, topics]
            .into_iter()
            .flatten()
            .collect()
    }

    // ====== Book ======

    pub fn book_sections(&self, page: &BookPage) -> Vec<LinkSection> {
        let navigation = LinkSection::non_empty(
            "Navigation",
            vec![
                self.home(),
                InternalLink::new(self.url("/books"), "All Books", LinkCategory::Parent, PRIORITY_HUB),
                InternalLink::new(
                    self.url(&format!("/books/{}", slugify(&page.testament))),
                    page.testament.clone(),
                    LinkCategory::Parent,
                    PRIORITY_HUB,
                ),
            ],
        );

        let chapter_cap = page.chapter_count.min(self.policy.max_chapter_links);
        let chapters = LinkSection::non_empty(
            format!("Chapters in {}", page.name),
            (1..=chapter_cap)
                .map(|n| {
                    InternalLink::new(
                        self.url(&format!("/book/{}/chapter/{n}", page.slug)),
                        format!("Chapter {n}"),
                        LinkCategory::Sibling,
                        PRIORITY_NEARBY,
                    )
                })
                .collect(),
        );

        let key_verses = LinkSection::non_empty(
            format!("Key Verses in {}", page.name),
            self.verse_links(
                page.key_verses.as_ref(),
                MAX_KEY_VERSES,
                LinkCategory::Related,
                PRIORITY_HUB,
            ),
        );

        let mut browse = Vec::with_capacity(2);
        if let Some(previous) = &page.previous_book {
            browse.push(InternalLink::new(
                self.url(&format!("/book/{}", previous.slug)),
                format!("← {}", previous.name),
                LinkCategory::Sibling,
                PRIORITY_RELATED,
            ));
        }
        if let Some(next) = &page.next_book {
            browse.push(InternalLink::new(
                self.url(&format!("/book/{}", next.slug)),
                format!("{} →", next.name),
                LinkCategory::Sibling,
                PRIORITY_RELATED,
            ));
        }
        let browse = LinkSection::non_empty("Browse Books", browse);

        [navigation, chapters, key_verses, browse]
            .into_iter()
            .flatten()
            .collect()
    }

    // ====== Chapter ======

    pub fn chapter_sections(&self, page: &ChapterPage) -> Vec<LinkSection> {
        let navigation = LinkSection::non_empty(
            "Navigation",
            vec![
                self.home(),
                InternalLink::new(
                    self.url(&format!("/book/{}", page.book_slug)),
                    format!("Book of {}", page.book_name),
                    LinkCategory::Parent,
                    PRIORITY_HUB,
                ),
            ],
        );

        let label = |target: &ChapterRef| {
            if target.book_slug == page.book_slug {
                format!("Chapter {}", target.chapter)
            } else {
                format!("{} {}", target.book_name, target.chapter)
            }
        };
        let chapter_link = |target: &ChapterRef, text: String| {
            InternalLink::new(
                self.url(&format!("/book/{}/chapter/{}", target.book_slug, target.chapter)),
                text,
                LinkCategory::Sibling,
                PRIORITY_NEARBY,
            )
        };

        let mut browse = Vec::with_capacity(2);
        if let Some(previous) = &page.previous {
            browse.push(chapter_link(previous, format!("← {}", label(previous))));
        }
        if let Some(next) = &page.next {
            browse.push(chapter_link(next, format!("{} →", label(next))));
        }
        let browse = LinkSection::non_empty("Browse Chapters", browse);

        [navigation, browse].into_iter().flatten().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Locator;

    fn policy() -> LinkPolicy {
        LinkPolicy::default()
    }

    fn verse_ref(book: &str, chapter: u32, verse: u32) -> VerseRef {
        VerseRef {
            locator: Locator::new(book, chapter, verse),
            slug: slugify(&format!("{book} {chapter} {verse}")),
        }
    }

    #[test]
    fn verse_page_without_related_data_has_navigation_and_nearby() {
        let policy = policy();
        let page = VersePage {
            locator: Locator::new("1 John", 4, 1),
            slug: "1-john-4-1".into(),
            cross_references: None,
            topics: Some(vec![]),
            popular_in_book: None,
        };
        let sections = SectionBuilder::new(&policy).verse_sections(&page);

        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Navigation", "Nearby Verses"]);

        let nav = &sections[0].links;
        assert_eq!(nav[0].url, "https://bibleverserandomizer.com");
        assert_eq!(nav[1].url, "https://bibleverserandomizer.com/book/1-john");
        assert_eq!(nav[2].display_text, "1 John Chapter 4");

        // Verse 1 has no previous verse
        let nearby = &sections[1].links;
        assert_eq!(nearby.len(), 1);
        assert_eq!(nearby[0].url, "https://bibleverserandomizer.com/verse/1-john-4-2");
    }

    #[test]
    fn last_representable_verse_has_no_next_link() {
        let policy = policy();
        let page = VersePage {
            locator: Locator::new("John", 3, u32::MAX),
            slug: "john-3-max".into(),
            cross_references: None,
            topics: None,
            popular_in_book: None,
        };
        let sections = SectionBuilder::new(&policy).verse_sections(&page);

        let nearby = sections.iter().find(|s| s.title == "Nearby Verses").unwrap();
        let urls: Vec<&str> = nearby.links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(urls, vec![format!("https://bibleverserandomizer.com/verse/john-3-{}", u32::MAX - 1)]);
    }

    #[test]
    fn site_popular_links_use_popular_category() {
        let policy = policy();
        let builder = SectionBuilder::new(&policy);

        let verses = builder.popular_verse_links(&[verse_ref("Jeremiah", 29, 11)]);
        assert_eq!(verses[0].url, "https://bibleverserandomizer.com/verse/jeremiah-29-11");
        assert_eq!(verses[0].display_text, "Jeremiah 29:11");
        assert_eq!(verses[0].category, LinkCategory::Popular);
        assert_eq!(verses[0].priority, 5);

        let topics = builder.popular_topic_links(&[EntityRef::new("love", "Bible Verses About Love")]);
        assert_eq!(topics[0].url, "https://bibleverserandomizer.com/topic/love");
        assert_eq!(topics[0].display_text, "Bible Verses About Love");
    }

    #[test]
    fn verse_cross_references_are_capped_and_slugified() {
        let policy = policy();
        let refs: Vec<String> = (1..=9).map(|n| format!("Romans 8:{n}")).collect();
        let page = VersePage {
            locator: Locator::new("Romans", 8, 28),
            slug: "romans-8-28".into(),
            cross_references: Some(refs),
            topics: None,
            popular_in_book: Some(vec![verse_ref("Romans", 12, 2)]),
        };
        let sections = SectionBuilder::new(&policy).verse_sections(&page);

        let related = sections.iter().find(|s| s.title == "Related Verses").unwrap();
        assert_eq!(related.links.len(), MAX_CROSS_REFERENCES);
        assert_eq!(related.links[0].url, "https://bibleverserandomizer.com/verse/romans-8-1");
        assert_eq!(related.links[0].category, LinkCategory::CrossReference);

        let popular = sections.last().unwrap();
        assert_eq!(popular.title, "Popular in Romans");
        assert_eq!(popular.links[0].priority, PRIORITY_POPULAR);
    }

    #[test]
    fn topic_sections_follow_template_order() {
        let policy = policy();
        let page = TopicPage {
            slug: "anxiety".into(),
            name: "Anxiety".into(),
            parent: Some(EntityRef::new("mental-health", "Mental Health")),
            sub_topics: None,
            related_topics: Some(vec![EntityRef::new("worry", "Worry"), EntityRef::new("fear", "Fear")]),
            top_verses: Some(vec![verse_ref("Philippians", 4, 6)]),
        };
        let sections = SectionBuilder::new(&policy).topic_sections(&page);
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Navigation", "Parent Topic", "Related Topics", "Top Anxiety Verses"]);
        assert_eq!(sections[2].links[1].url, "https://bibleverserandomizer.com/topic/fear");
    }

    #[test]
    fn intent_links_route_under_for() {
        let policy = policy();
        let page = IntentPage {
            slug: "for-weddings".into(),
            name: "Weddings".into(),
            related_intents: Some(vec![EntityRef::new("for-anniversary", "Anniversary")]),
            verses: Some((1..=10).map(|n| verse_ref("Ruth", 1, n)).collect()),
            topics: None,
        };
        let sections = SectionBuilder::new(&policy).intent_sections(&page);
        assert_eq!(sections[1].links[0].url, "https://bibleverserandomizer.com/for/for-anniversary");
        assert_eq!(sections[2].title, "Featured Verses for Weddings");
        assert_eq!(sections[2].links.len(), MAX_FEATURED_VERSES);
    }

    #[test]
    fn long_books_cap_the_chapter_list() {
        let policy = policy();
        let psalms = BookPage::from_canon("psalms", None).unwrap();
        let sections = SectionBuilder::new(&policy).book_sections(&psalms);

        let nav = &sections[0].links;
        assert_eq!(nav[2].url, "https://bibleverserandomizer.com/books/old-testament");

        let chapters = sections.iter().find(|s| s.title == "Chapters in Psalms").unwrap();
        assert_eq!(chapters.links.len(), 10);

        let browse = sections.last().unwrap();
        assert_eq!(browse.title, "Browse Books");
        assert_eq!(browse.links[0].display_text, "← Job");
        assert_eq!(browse.links[1].display_text, "Proverbs →");
    }

    #[test]
    fn chapter_navigation_names_the_other_book_when_crossing() {
        let policy = policy();
        let page = ChapterPage::from_canon("matthew", 1).unwrap();
        let sections = SectionBuilder::new(&policy).chapter_sections(&page);

        let browse = &sections[1].links;
        assert_eq!(browse[0].display_text, "← Malachi 4");
        assert_eq!(browse[0].url, "https://bibleverserandomizer.com/book/malachi/chapter/4");
        assert_eq!(browse[1].display_text, "Chapter 2 →");
    }
}
