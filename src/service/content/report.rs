//! FAQ checks, improvement suggestions, batch runs and the text report.

use std::fmt::Write as _;

use serde::Serialize;

use crate::domain::models::ValidationResult;

use super::{ContentInput, ContentValidator, Faq};

const QUESTION_WORDS: &[&str] = &[
    "what", "why", "how", "when", "where", "who", "which", "is", "are", "can", "does",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaqValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// 3 to 10 entries; each question at least 10 characters and phrased as a
/// question; each answer 50 to 500 characters. Errors are 1-indexed.
pub fn validate_faqs(faqs: &[Faq]) -> FaqValidation {
    let mut errors = Vec::new();

    if faqs.len() < 3 {
        errors.push("Minimum 3 FAQs required".to_string());
    }
    if faqs.len() > 10 {
        errors.push("Too many FAQs (maximum 10 recommended)".to_string());
    }

    for (i, faq) in faqs.iter().enumerate() {
        let n = i + 1;
        let question_len = faq.question.chars().count();
        let answer_len = faq.answer.chars().count();

        if question_len < 10 {
            errors.push(format!("FAQ {n}: Question too short"));
        }
        if answer_len < 50 {
            errors.push(format!("FAQ {n}: Answer too short (minimum 50 characters)"));
        }
        if answer_len > 500 {
            errors.push(format!("FAQ {n}: Answer too long (keep under 500 characters)"));
        }

        let lowered = faq.question.to_lowercase();
        let question_like = QUESTION_WORDS.iter().any(|w| lowered.starts_with(w));
        if !question_like && !faq.question.contains('?') {
            errors.push(format!("FAQ {n}: Should be phrased as a question"));
        }
    }

    FaqValidation { is_valid: errors.is_empty(), errors }
}

/// Concrete next steps for an author, given the page's minimum word count.
pub fn suggestions(result: &ValidationResult, min_words: usize) -> Vec<String> {
    let metrics = &result.metrics;
    let mut out = Vec::new();

    if metrics.word_count < min_words {
        out.push(
            "Add more detailed explanations in the \"Meaning\" and \"Application\" sections".to_string(),
        );
    }
    if metrics.paragraph_count < 8 {
        out.push("Break content into more paragraphs for better readability".to_string());
    }
    if metrics.avg_words_per_sentence > 20.0 {
        out.push("Consider shorter sentences for improved clarity".to_string());
    }
    if metrics.readability_score > 0.0 && metrics.readability_score < 50.0 {
        out.push("Simplify language to improve readability".to_string());
    }
    if result.warnings.iter().any(|w| w.contains("Keyword")) {
        out.push("Review keyword usage to ensure natural integration".to_string());
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub total_valid: usize,
    pub total_invalid: usize,
    /// 0 for an empty batch.
    pub average_score: f64,
    pub results: Vec<ValidationResult>,
}

pub fn batch_validate(validator: &ContentValidator, inputs: &[ContentInput]) -> BatchSummary {
    let results: Vec<ValidationResult> = inputs.iter().map(|i| validator.validate(i)).collect();
    let total_valid = results.iter().filter(|r| r.is_valid).count();
    let average_score = if results.is_empty() {
        0.0
    } else {
        results.iter().map(|r| f64::from(r.quality_score)).sum::<f64>() / results.len() as f64
    };

    tracing::info!(
        "[CONTENT] batch of {}: {} valid, average score {:.1}",
        results.len(),
        total_valid,
        average_score
    );

    BatchSummary {
        total_valid,
        total_invalid: results.len() - total_valid,
        average_score,
        results,
    }
}

/// Plain-text report for terminals and CI logs.
pub fn report(result: &ValidationResult, min_words: usize) -> String {
    let metrics = &result.metrics;
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "Content Validation Report");
    let _ = writeln!(out, "{}\n", "=".repeat(50));
    let _ = writeln!(out, "Overall Score: {}/100", result.quality_score);
    let _ = writeln!(out, "Status: {}\n", if result.is_valid { "PASS" } else { "FAIL" });

    let _ = writeln!(out, "Metrics:");
    let _ = writeln!(out, "  Word Count: {}", metrics.word_count);
    let _ = writeln!(out, "  Paragraphs: {}", metrics.paragraph_count);
    let _ = writeln!(out, "  Sentences: {}", metrics.sentence_count);
    let _ = writeln!(out, "  Avg Words/Sentence: {:.1}", metrics.avg_words_per_sentence);
    if metrics.readability_score > 0.0 {
        let _ = writeln!(out, "  Readability Score: {:.1}/100", metrics.readability_score);
    }
    out.push('\n');

    write_numbered(&mut out, "Errors", &result.errors, true);
    write_numbered(&mut out, "Warnings", &result.warnings, true);
    write_numbered(&mut out, "Suggestions", &suggestions(result, min_words), false);

    out
}

fn write_numbered(out: &mut String, heading: &str, items: &[String], with_count: bool) {
    if items.is_empty() {
        return;
    }
    if with_count {
        let _ = writeln!(out, "{heading} ({}):", items.len());
    } else {
        let _ = writeln!(out, "{heading}:");
    }
    for (i, item) in items.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, item);
    }
    if with_count {
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{ContentMetrics, PageType};

    fn faq(question: &str, answer_len: usize) -> Faq {
        Faq { question: question.to_string(), answer: "a".repeat(answer_len) }
    }

    #[test]
    fn well_formed_faqs_pass() {
        let faqs = vec![
            faq("What does John 3:16 mean?", 120),
            faq("Who wrote the Gospel of John", 80),
            faq("Tell me why it matters?", 60),
        ];
        assert!(validate_faqs(&faqs).is_valid);
    }

    #[test]
    fn faq_errors_are_numbered() {
        let faqs = vec![faq("Tell me", 20), faq("Explain the context please", 600)];
        let result = validate_faqs(&faqs);
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec![
                "Minimum 3 FAQs required",
                "FAQ 1: Question too short",
                "FAQ 1: Answer too short (minimum 50 characters)",
                "FAQ 1: Should be phrased as a question",
                "FAQ 2: Answer too long (keep under 500 characters)",
                "FAQ 2: Should be phrased as a question",
            ]
        );
    }

    #[test]
    fn too_many_faqs() {
        let faqs = vec![faq("How can I pray more?", 100); 11];
        assert_eq!(validate_faqs(&faqs).errors, vec!["Too many FAQs (maximum 10 recommended)"]);
    }

    fn result_with(metrics: ContentMetrics, warnings: Vec<String>) -> ValidationResult {
        ValidationResult {
            is_valid: false,
            quality_score: 40,
            errors: vec!["Word count too low: 300 (minimum: 1500)".into()],
            warnings,
            metrics,
        }
    }

    #[test]
    fn suggestions_follow_metrics() {
        let result = result_with(
            ContentMetrics {
                word_count: 300,
                paragraph_count: 2,
                avg_words_per_sentence: 22.0,
                readability_score: 35.0,
                ..Default::default()
            },
            vec!["Keyword \"hope\" underused (0.1% density, target 1-2%)".into()],
        );
        let tips = suggestions(&result, 1500);
        assert_eq!(tips.len(), 5);
        assert!(tips[4].starts_with("Review keyword usage"));
    }

    #[test]
    fn report_lists_sections() {
        let result = result_with(
            ContentMetrics { word_count: 300, paragraph_count: 9, ..Default::default() },
            vec![],
        );
        let text = report(&result, 1500);
        assert!(text.starts_with("Content Validation Report\n"));
        assert!(text.contains("Overall Score: 40/100"));
        assert!(text.contains("Status: FAIL"));
        assert!(text.contains("Errors (1):\n  1. Word count too low: 300 (minimum: 1500)"));
        assert!(!text.contains("Warnings"));
        assert!(!text.contains("Readability Score"));
        assert!(text.contains("Suggestions:\n  1. Add more detailed explanations"));
    }

    #[test]
    fn batch_counts_and_averages() {
        let validator = ContentValidator::default();
        let inputs = vec![
            ContentInput::new(PageType::Chapter, "Short", "Too short."),
            ContentInput::new(PageType::Topic, "", ""),
        ];
        let summary = batch_validate(&validator, &inputs);
        assert_eq!(summary.total_valid, 0);
        assert_eq!(summary.total_invalid, 2);
        assert_eq!(summary.results.len(), 2);

        let empty = batch_validate(&validator, &[]);
        assert_eq!(empty.average_score, 0.0);
    }
}
