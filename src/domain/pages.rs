//! Per-page-type data consumed by the link graph assembler.
//!
//! One variant per page type, each carrying exactly what that page's
//! section builders need. Optional related data is `None` when the caller
//! has nothing to supply, and the matching section is omitted.

use serde::{Deserialize, Serialize};

use super::canon::{self, BookInfo};
use super::models::{ContentItem, Locator, PageType, ScoredMatch};

// ====== References to other pages ======

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseRef {
    pub locator: Locator,
    pub slug: String,
}

impl From<&ContentItem> for VerseRef {
    fn from(item: &ContentItem) -> Self {
        Self { locator: item.locator.clone(), slug: item.slug.clone() }
    }
}

impl From<&ScoredMatch<'_>> for VerseRef {
    fn from(m: &ScoredMatch<'_>) -> Self {
        Self::from(m.item)
    }
}

/// A topic or intent page reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub slug: String,
    pub name: String,
}

impl EntityRef {
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self { slug: slug.into(), name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRef {
    pub slug: String,
    pub name: String,
}

impl From<&BookInfo> for BookRef {
    fn from(book: &BookInfo) -> Self {
        Self { slug: book.slug.to_string(), name: book.name.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterRef {
    pub book_slug: String,
    pub book_name: String,
    pub chapter: u32,
}

// ====== Page variants ======

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersePage {
    pub locator: Locator,
    pub slug: String,
    /// References such as "Romans 8:28".
    pub cross_references: Option<Vec<String>>,
    pub topics: Option<Vec<EntityRef>>,
    /// Ranked verses of the same book, filled by a popularity lookup.
    pub popular_in_book: Option<Vec<VerseRef>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicPage {
    pub slug: String,
    pub name: String,
    /// Set when this is a sub-topic.
    pub parent: Option<EntityRef>,
    pub sub_topics: Option<Vec<EntityRef>>,
    pub related_topics: Option<Vec<EntityRef>>,
    pub top_verses: Option<Vec<VerseRef>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentPage {
    pub slug: String,
    pub name: String,
    pub related_intents: Option<Vec<EntityRef>>,
    pub verses: Option<Vec<VerseRef>>,
    pub topics: Option<Vec<EntityRef>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookPage {
    pub slug: String,
    pub name: String,
    pub testament: String,
    pub chapter_count: u32,
    pub key_verses: Option<Vec<VerseRef>>,
    pub previous_book: Option<BookRef>,
    pub next_book: Option<BookRef>,
}

impl BookPage {
    /// Build book page data from the canon table, `None` for unknown slugs.
    pub fn from_canon(slug: &str, key_verses: Option<Vec<VerseRef>>) -> Option<Self> {
        let index = canon::position(slug)?;
        let book = &canon::BOOKS[index];
        Some(Self {
            slug: book.slug.to_string(),
            name: book.name.to_string(),
            testament: book.testament.as_str().to_string(),
            chapter_count: book.chapters,
            key_verses,
            previous_book: index.checked_sub(1).map(|i| BookRef::from(&canon::BOOKS[i])),
            next_book: canon::BOOKS.get(index + 1).map(BookRef::from),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterPage {
    pub book_slug: String,
    pub book_name: String,
    pub chapter: u32,
    pub total_chapters: u32,
    pub previous: Option<ChapterRef>,
    pub next: Option<ChapterRef>,
}

impl ChapterPage {
    /// Build chapter page data from the canon table. Previous/next cross
    /// book boundaries at the first and last chapter.
    pub fn from_canon(book_slug: &str, chapter: u32) -> Option<Self> {
        let index = canon::position(book_slug)?;
        let book = &canon::BOOKS[index];
        if chapter == 0 || chapter > book.chapters {
            return None;
        }
        Some(Self {
            book_slug: book.slug.to_string(),
            book_name: book.name.to_string(),
            chapter,
            total_chapters: book.chapters,
            previous: canon::previous_chapter(index, chapter),
            next: canon::next_chapter(index, chapter),
        })
    }
}

/// Resolved data for one page, keyed by page type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "page_type", rename_all = "lowercase")]
pub enum PageData {
    Verse(VersePage),
    Topic(TopicPage),
    Intent(IntentPage),
    Book(BookPage),
    Chapter(ChapterPage),
}

impl PageData {
    pub fn page_type(&self) -> PageType {
        match self {
            PageData::Verse(_) => PageType::Verse,
            PageData::Topic(_) => PageType::Topic,
            PageData::Intent(_) => PageType::Intent,
            PageData::Book(_) => PageType::Book,
            PageData::Chapter(_) => PageType::Chapter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_page_links_neighbours_from_canon() {
        let ruth = BookPage::from_canon("ruth", None).unwrap();
        assert_eq!(ruth.name, "Ruth");
        assert_eq!(ruth.chapter_count, 4);
        assert_eq!(ruth.previous_book.unwrap().slug, "judges");
        assert_eq!(ruth.next_book.unwrap().slug, "1-samuel");

        let genesis = BookPage::from_canon("genesis", None).unwrap();
        assert!(genesis.previous_book.is_none());
        let revelation = BookPage::from_canon("revelation", None).unwrap();
        assert!(revelation.next_book.is_none());
    }

    #[test]
    fn chapter_page_crosses_book_boundaries() {
        let page = ChapterPage::from_canon("exodus", 1).unwrap();
        let previous = page.previous.unwrap();
        assert_eq!(previous.book_slug, "genesis");
        assert_eq!(previous.chapter, 50);
        assert_eq!(page.next.unwrap().chapter, 2);

        let last = ChapterPage::from_canon("genesis", 50).unwrap();
        let next = last.next.unwrap();
        assert_eq!(next.book_slug, "exodus");
        assert_eq!(next.chapter, 1);
    }

    #[test]
    fn chapter_page_rejects_out_of_range_chapters() {
        assert!(ChapterPage::from_canon("jude", 2).is_none());
        assert!(ChapterPage::from_canon("jude", 0).is_none());
        assert!(ChapterPage::from_canon("enoch", 1).is_none());
    }
}
