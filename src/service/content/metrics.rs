//! Structural text metrics: counts, readability and keyword density.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::models::{ContentMetrics, KeywordDensity};

/// Remove HTML tags and common markdown so only prose is counted.
pub fn strip_markup(text: &str) -> String {
    static RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    let rules = RULES.get_or_init(|| {
        [
            (r"<[^>]*>", ""),
            (r"(?m)^#+\s+", ""),
            (r"\*\*(.*?)\*\*", "$1"),
            (r"__(.*?)__", "$1"),
            (r"\*(.*?)\*", "$1"),
            (r"_(.*?)_", "$1"),
            (r"\[([^\]]+)\]\([^)]+\)", "$1"),
            (r"(?s)```.*?```", ""),
            (r"`([^`]+)`", "$1"),
            (r"(?m)^>\s+", ""),
        ]
        .into_iter()
        .map(|(pattern, replacement)| (Regex::new(pattern).expect("valid markup pattern"), replacement))
        .collect()
    });

    let mut plain = text.to_string();
    for (pattern, replacement) in rules {
        plain = pattern.replace_all(&plain, *replacement).into_owned();
    }
    plain.trim().to_string()
}

fn paragraph_break() -> &'static Regex {
    static BREAK: OnceLock<Regex> = OnceLock::new();
    BREAK.get_or_init(|| Regex::new(r"\n\s*\n").expect("valid paragraph pattern"))
}

fn sentence_break() -> &'static Regex {
    static BREAK: OnceLock<Regex> = OnceLock::new();
    BREAK.get_or_init(|| Regex::new(r"[.!?]+").expect("valid sentence pattern"))
}

/// Counts for `body`. Paragraphs are counted on the raw body (blank-line
/// separated); everything else on the markup-stripped text.
pub fn compute_metrics(body: &str) -> ContentMetrics {
    let plain = strip_markup(body);

    let word_count = plain.split_whitespace().count();
    let character_count = plain.chars().count();
    let paragraph_count = paragraph_break()
        .split(body)
        .filter(|p| !p.trim().is_empty())
        .count();
    let sentence_count = sentence_break()
        .split(&plain)
        .filter(|s| !s.trim().is_empty())
        .count();
    let avg_words_per_sentence = if sentence_count > 0 {
        word_count as f64 / sentence_count as f64
    } else {
        0.0
    };

    let mut metrics = ContentMetrics {
        word_count,
        character_count,
        paragraph_count,
        sentence_count,
        avg_words_per_sentence,
        readability_score: 0.0,
        keyword_density: None,
    };
    metrics.readability_score = readability(&metrics);
    metrics
}

/// Flesch Reading Ease approximation, clamped to 0..=100. Syllables per
/// word are estimated as a third of the average word length (at least 1).
pub fn readability(metrics: &ContentMetrics) -> f64 {
    if metrics.sentence_count == 0 || metrics.word_count == 0 {
        return 0.0;
    }
    let words = metrics.word_count as f64;
    let words_per_sentence = words / metrics.sentence_count as f64;
    let syllables_per_word = (metrics.character_count as f64 / words / 3.0).max(1.0);

    let score = 206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word;
    score.clamp(0.0, 100.0)
}

/// Whole-word, case-insensitive occurrences of each keyword as a
/// percentage of all words, in the order given.
pub fn keyword_density(body: &str, keywords: &[String]) -> Vec<KeywordDensity> {
    let plain = strip_markup(body).to_lowercase();
    let total_words = plain.split_whitespace().count();

    keywords
        .iter()
        .map(|keyword| {
            let pattern = format!(r"\b{}\b", regex::escape(&keyword.to_lowercase()));
            let count = match Regex::new(&pattern) {
                Ok(re) => re.find_iter(&plain).count(),
                Err(e) => {
                    tracing::warn!("[CONTENT] skipping keyword {:?}: {}", keyword, e);
                    0
                }
            };
            let density = if total_words > 0 {
                count as f64 / total_words as f64 * 100.0
            } else {
                0.0
            };
            KeywordDensity { keyword: keyword.clone(), density }
        })
        .collect()
}
