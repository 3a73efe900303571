//! The 66-book canon: display names, URL slugs, chapter counts.

use super::pages::ChapterRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Testament {
    Old,
    New,
}

impl Testament {
    pub fn as_str(&self) -> &'static str {
        match self {
            Testament::Old => "Old Testament",
            Testament::New => "New Testament",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookInfo {
    pub name: &'static str,
    pub slug: &'static str,
    pub chapters: u32,
    pub testament: Testament,
}

const fn old(name: &'static str, slug: &'static str, chapters: u32) -> BookInfo {
    BookInfo { name, slug, chapters, testament: Testament::Old }
}

const fn new(name: &'static str, slug: &'static str, chapters: u32) -> BookInfo {
    BookInfo { name, slug, chapters, testament: Testament::New }
}

pub static BOOKS: [BookInfo; 66] = [
    old("Genesis", "genesis", 50),
    old("Exodus", "exodus", 40),
    old("Leviticus", "leviticus", 27),
    old("Numbers", "numbers", 36),
    old("Deuteronomy", "deuteronomy", 34),
    old("Joshua", "joshua", 24),
    old("Judges", "judges", 21),
    old("Ruth", "ruth", 4),
    old("1 Samuel", "1-samuel", 31),
    old("2 Samuel", "2-samuel", 24),
    old("1 Kings", "1-kings", 22),
    old("2 Kings", "2-kings", 25),
    old("1 Chronicles", "1-chronicles", 29),
    old("2 Chronicles", "2-chronicles", 36),
    old("Ezra", "ezra", 10),
    old("Nehemiah", "nehemiah", 13),
    old("Esther", "esther", 10),
    old("Job", "job", 42),
    old("Psalms", "psalms", 150),
    old("Proverbs", "proverbs", 31),
    old("Ecclesiastes", "ecclesiastes", 12),
    old("Song of Solomon", "song-of-solomon", 8),
    old("Isaiah", "isaiah", 66),
    old("Jeremiah", "jeremiah", 52),
    old("Lamentations", "lamentations", 5),
    old("Ezekiel", "ezekiel", 48),
    old("Daniel", "daniel", 12),
    old("Hosea", "hosea", 14),
    old("Joel", "joel", 3),
    old("Amos", "amos", 9),
    old("Obadiah", "obadiah", 1),
    old("Jonah", "jonah", 4),
    old("Micah", "micah", 7),
    old("Nahum", "nahum", 3),
    old("Habakkuk", "habakkuk", 3),
    old("Zephaniah", "zephaniah", 3),
    old("Haggai", "haggai", 2),
    old("Zechariah", "zechariah", 14),
    old("Malachi", "malachi", 4),
    new("Matthew", "matthew", 28),
    new("Mark", "mark", 16),
    new("Luke", "luke", 24),
    new("John", "john", 21),
    new("Acts", "acts", 28),
    new("Romans", "romans", 16),
    new("1 Corinthians", "1-corinthians", 16),
    new("2 Corinthians", "2-corinthians", 13),
    new("Galatians", "galatians", 6),
    new("Ephesians", "ephesians", 6),
    new("Philippians", "philippians", 4),
    new("Colossians", "colossians", 4),
    new("1 Thessalonians", "1-thessalonians", 5),
    new("2 Thessalonians", "2-thessalonians", 3),
    new("1 Timothy", "1-timothy", 6),
    new("2 Timothy", "2-timothy", 4),
    new("Titus", "titus", 3),
    new("Philemon", "philemon", 1),
    new("Hebrews", "hebrews", 13),
    new("James", "james", 5),
    new("1 Peter", "1-peter", 5),
    new("2 Peter", "2-peter", 3),
    new("1 John", "1-john", 5),
    new("2 John", "2-john", 1),
    new("3 John", "3-john", 1),
    new("Jude", "jude", 1),
    new("Revelation", "revelation", 22),
];

/// Index of a book in canonical order, by slug.
pub fn position(slug: &str) -> Option<usize> {
    BOOKS.iter().position(|b| b.slug == slug)
}

/// Look up a book by display name or slug.
pub fn find(name_or_slug: &str) -> Option<&'static BookInfo> {
    let slug = super::slugify(name_or_slug);
    BOOKS.iter().find(|b| b.slug == slug)
}

fn chapter_ref(book: &BookInfo, chapter: u32) -> ChapterRef {
    ChapterRef {
        book_slug: book.slug.to_string(),
        book_name: book.name.to_string(),
        chapter,
    }
}

/// Chapter before `chapter` of `BOOKS[index]`, stepping into the previous
/// book's last chapter at chapter 1.
pub fn previous_chapter(index: usize, chapter: u32) -> Option<ChapterRef> {
    let book = BOOKS.get(index)?;
    if chapter > 1 {
        return Some(chapter_ref(book, chapter - 1));
    }
    let prev = BOOKS.get(index.checked_sub(1)?)?;
    Some(chapter_ref(prev, prev.chapters))
}

/// Chapter after `chapter` of `BOOKS[index]`, stepping into the next
/// book's first chapter at the last chapter.
pub fn next_chapter(index: usize, chapter: u32) -> Option<ChapterRef> {
    let book = BOOKS.get(index)?;
    if chapter < book.chapters {
        return Some(chapter_ref(book, chapter + 1));
    }
    BOOKS.get(index + 1).map(|next| chapter_ref(next, 1))
}
