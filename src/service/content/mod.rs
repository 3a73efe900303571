//! Content validator - judges generated page copy against page-type minimums.
//!
//! Nothing here fails: every shortfall is reported as an error (blocks
//! publication) or a warning (lowers the quality score) inside a
//! [`ValidationResult`].

mod metrics;
mod report;
mod uniqueness;

pub use metrics::{compute_metrics, keyword_density, readability, strip_markup};
pub use report::{batch_validate, report, suggestions, validate_faqs, BatchSummary, FaqValidation};
pub use uniqueness::check_uniqueness;

use serde::{Deserialize, Serialize};

use crate::domain::models::{PageType, ValidationResult};

// ====== Thresholds ======

/// Minimum word count per page type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContentThresholds {
    pub verse: usize,
    pub topic: usize,
    pub intent: usize,
    pub book: usize,
    pub chapter: usize,
}

impl Default for ContentThresholds {
    fn default() -> Self {
        Self {
            verse: 1500,
            topic: 2000,
            intent: 1800,
            book: 2000,
            chapter: 1000,
        }
    }
}

impl ContentThresholds {
    pub fn min_words(&self, page_type: PageType) -> usize {
        match page_type {
            PageType::Verse => self.verse,
            PageType::Topic => self.topic,
            PageType::Intent => self.intent,
            PageType::Book => self.book,
            PageType::Chapter => self.chapter,
        }
    }
}

const TITLE_MAX: usize = 70;
const TITLE_MIN: usize = 30;
const DESCRIPTION_MAX: usize = 160;
const DESCRIPTION_MIN: usize = 120;
const DENSITY_MAX: f64 = 3.0;
const DENSITY_MIN: f64 = 0.5;
const READABILITY_LOW: f64 = 40.0;
const READABILITY_HIGH: f64 = 90.0;
const MIN_PARAGRAPHS: usize = 5;
const MAX_AVG_SENTENCE_WORDS: f64 = 25.0;
const MIN_FAQS: usize = 3;

// ====== Input ======

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

/// Named sections of generated copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSections {
    pub intro: Option<String>,
    pub context: Option<String>,
    pub meaning: Option<String>,
    pub application: Option<String>,
    pub prayer: Option<String>,
    pub faqs: Vec<Faq>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMetadata {
    pub description: Option<String>,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentInput {
    pub page_type: PageType,
    pub title: String,
    /// Main text, plain or markdown.
    pub body: String,
    #[serde(default)]
    pub sections: Option<ContentSections>,
    #[serde(default)]
    pub metadata: Option<PageMetadata>,
}

impl ContentInput {
    pub fn new(page_type: PageType, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            page_type,
            title: title.into(),
            body: body.into(),
            sections: None,
            metadata: None,
        }
    }

    pub fn with_sections(mut self, sections: ContentSections) -> Self {
        self.sections = Some(sections);
        self
    }

    pub fn with_metadata(mut self, metadata: PageMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

// ====== Required sections ======

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Intro,
    Context,
    Meaning,
    Application,
    Prayer,
    Faqs,
}

/// (section, name reported when missing)
fn required_sections(page_type: PageType) -> &'static [(Section, &'static str)] {
    match page_type {
        PageType::Verse => &[
            (Section::Context, "context"),
            (Section::Meaning, "meaning"),
            (Section::Application, "application"),
            (Section::Prayer, "prayer"),
            (Section::Faqs, "faqs (minimum 3)"),
        ],
        PageType::Topic => &[(Section::Intro, "intro")],
        PageType::Intent => &[(Section::Intro, "intro"), (Section::Application, "application")],
        PageType::Book => &[(Section::Intro, "intro"), (Section::Context, "historical context")],
        PageType::Chapter => &[],
    }
}

fn has_text(text: &Option<String>) -> bool {
    text.as_deref().is_some_and(|t| !t.trim().is_empty())
}

fn is_present(sections: &ContentSections, section: Section) -> bool {
    match section {
        Section::Intro => has_text(&sections.intro),
        Section::Context => has_text(&sections.context),
        Section::Meaning => has_text(&sections.meaning),
        Section::Application => has_text(&sections.application),
        Section::Prayer => has_text(&sections.prayer),
        Section::Faqs => sections.faqs.len() >= MIN_FAQS,
    }
}

fn missing_sections(input: &ContentInput) -> Vec<&'static str> {
    let empty = ContentSections::default();
    let sections = input.sections.as_ref().unwrap_or(&empty);
    required_sections(input.page_type)
        .iter()
        .filter(|(section, _)| !is_present(sections, *section))
        .map(|(_, name)| *name)
        .collect()
}

// ====== Validator ======

/// Stateless validator over a fixed threshold table.
#[derive(Debug, Clone, Default)]
pub struct ContentValidator {
    thresholds: ContentThresholds,
}

impl ContentValidator {
    pub fn new(thresholds: ContentThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ContentThresholds {
        &self.thresholds
    }

    pub fn validate(&self, input: &ContentInput) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut metrics = compute_metrics(&input.body);
        let min_words = self.thresholds.min_words(input.page_type);

        // Word count
        if metrics.word_count < min_words {
            errors.push(format!(
                "Word count too low: {} (minimum: {})",
                metrics.word_count, min_words
            ));
        } else if (metrics.word_count as f64) < min_words as f64 * 1.2 {
            warnings.push(format!(
                "Word count is acceptable but on the low end: {}",
                metrics.word_count
            ));
        }

        let missing = missing_sections(input);
        if !missing.is_empty() {
            errors.push(format!("Missing required sections: {}", missing.join(", ")));
        }

        // Readability
        if metrics.readability_score < READABILITY_LOW {
            warnings.push("Content may be too complex (low readability score)".to_string());
        } else if metrics.readability_score > READABILITY_HIGH {
            warnings.push("Content may be too simple".to_string());
        }

        // Title
        let title_len = input.title.trim().chars().count();
        if title_len == 0 {
            errors.push("Title is required".to_string());
        } else if title_len > TITLE_MAX {
            warnings.push(format!("Title too long: {title_len} characters (recommend <60)"));
        } else if title_len < TITLE_MIN {
            warnings.push(format!("Title too short: {title_len} characters (recommend 50-60)"));
        }

        if let Some(metadata) = &input.metadata {
            if let Some(description) = metadata.description.as_deref().filter(|d| !d.is_empty()) {
                let len = description.chars().count();
                if len > DESCRIPTION_MAX {
                    warnings.push(format!("Meta description too long: {len} characters"));
                } else if len < DESCRIPTION_MIN {
                    warnings.push(format!("Meta description too short: {len} characters"));
                }
            }

            if !metadata.keywords.is_empty() {
                let density = keyword_density(&input.body, &metadata.keywords);
                for kd in &density {
                    if kd.density > DENSITY_MAX {
                        warnings.push(format!(
                            "Keyword \"{}\" may be overused ({:.1}% density)",
                            kd.keyword, kd.density
                        ));
                    } else if kd.density < DENSITY_MIN {
                        warnings.push(format!(
                            "Keyword \"{}\" underused ({:.1}% density, target 1-2%)",
                            kd.keyword, kd.density
                        ));
                    }
                }
                metrics.keyword_density = Some(density);
            }
        }

        // Structure
        if metrics.paragraph_count < MIN_PARAGRAPHS {
            warnings.push("Consider adding more paragraphs for better readability".to_string());
        }
        if metrics.avg_words_per_sentence > MAX_AVG_SENTENCE_WORDS {
            warnings.push("Sentences may be too long (average >25 words)".to_string());
        }

        let quality_score = quality_score(
            metrics.word_count,
            metrics.readability_score,
            errors.len(),
            warnings.len(),
            min_words,
        );

        tracing::debug!(
            "[CONTENT] {} {:?}: {} words, score {}, {} errors, {} warnings",
            input.page_type,
            input.title,
            metrics.word_count,
            quality_score,
            errors.len(),
            warnings.len()
        );

        ValidationResult {
            is_valid: errors.is_empty(),
            quality_score,
            errors,
            warnings,
            metrics,
        }
    }
}

/// 100, minus 20 per error and 5 per warning, plus 10 for a body well past
/// the minimum and 10 for readability in 60..=80; clamped to 0..=100.
fn quality_score(
    word_count: usize,
    readability: f64,
    errors: usize,
    warnings: usize,
    min_words: usize,
) -> u8 {
    let mut score: i64 = 100;
    score -= errors as i64 * 20;
    score -= warnings as i64 * 5;
    if word_count as f64 > min_words as f64 * 1.5 {
        score += 10;
    }
    if (60.0..=80.0).contains(&readability) {
        score += 10;
    }
    score.clamp(0, 100) as u8
}
