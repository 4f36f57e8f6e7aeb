//! Flesch-Kincaid grade level over the visible text.
//!
//! Syllables are estimated from word length (`chars / 4 + 1`), which is coarse
//! but stable: scores only move when the text does.

use super::{AnalysisRule, RuleReport};
use crate::parser::html::strip_tags;
use crate::{AnalysisInput, Finding, ReadabilityReport, Rule, Status};
use regex::Regex;
use std::sync::LazyLock;

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid sentence pattern"));

/// Grade level above which content is flagged
pub const MAX_GRADE_LEVEL: f64 = 12.0;

pub const UNKNOWN_GRADE: &str = "Unknown";

/// Rule for checking readability
pub struct ReadabilityRule;

impl ReadabilityRule {
    /// Estimated syllables in a single word
    pub fn syllables(word: &str) -> usize {
        (word.chars().count() / 4 + 1).max(1)
    }

    /// Flesch-Kincaid grade level, clamped at zero
    pub fn grade_level(words: usize, sentences: usize, syllables: usize) -> f64 {
        if words == 0 {
            return 0.0;
        }
        let sentences = sentences.max(1) as f64;
        let words = words as f64;
        let raw = 0.39 * (words / sentences) + 11.8 * (syllables as f64 / words) - 15.59;
        raw.max(0.0)
    }

    /// Human-readable label for a grade level
    pub fn grade_label(score: f64) -> &'static str {
        if score <= 8.0 {
            "Easy (6th grade or below)"
        } else if score <= 10.0 {
            "Fairly easy (7th-8th grade)"
        } else if score <= 12.0 {
            "Plain English (9th-10th grade)"
        } else if score <= 16.0 {
            "Fairly difficult (11th-12th grade)"
        } else {
            "Difficult (College level)"
        }
    }
}

impl AnalysisRule for ReadabilityRule {
    type Report = ReadabilityReport;

    fn name(&self) -> &'static str {
        "readability"
    }

    fn analyze(&self, input: &AnalysisInput) -> ReadabilityReport {
        let text = strip_tags(&input.content);
        let words: Vec<&str> = text.split_whitespace().collect();
        let word_count = words.len();
        let sentence_count = SENTENCE_END.find_iter(&text).count().max(1);

        if word_count == 0 {
            return ReadabilityReport {
                word_count: 0,
                sentence_count,
                syllable_count: 0,
                score: 0.0,
                grade: UNKNOWN_GRADE.to_string(),
                status: Status::Good,
            };
        }

        let syllable_count: usize = words.iter().map(|w| Self::syllables(w)).sum();
        let score = Self::grade_level(word_count, sentence_count, syllable_count);

        ReadabilityReport {
            word_count,
            sentence_count,
            syllable_count,
            score,
            grade: Self::grade_label(score).to_string(),
            status: if score > MAX_GRADE_LEVEL {
                Status::Warning
            } else {
                Status::Good
            },
        }
    }
}

impl RuleReport for ReadabilityReport {
    fn rule(&self) -> Rule {
        Rule::Readability
    }

    fn status(&self) -> Status {
        self.status
    }

    fn findings(&self) -> Vec<Finding> {
        if self.status == Status::Good {
            return vec![];
        }
        vec![Finding::new(
            Rule::Readability,
            self.status,
            format!(
                "Content is hard to read (grade level {:.1}, {})",
                self.score, self.grade
            ),
            "Use shorter sentences and simpler words to bring the grade level to 12 or below",
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn readability(content: &str) -> ReadabilityReport {
        ReadabilityRule.analyze(&AnalysisInput::new("", "", content))
    }

    #[test]
    fn test_empty_content_is_unknown_and_good() {
        let report = readability("");
        assert_eq!(report.word_count, 0);
        assert_eq!(report.grade, "Unknown");
        assert_eq!(report.status, Status::Good);
        assert_eq!(report.score, 0.0);
        assert!(report.findings().is_empty());
    }

    #[test]
    fn test_markup_only_is_unknown() {
        let report = readability("<div><img src=\"a.png\"></div>");
        assert_eq!(report.word_count, 0);
        assert_eq!(report.grade, "Unknown");
    }

    #[test]
    fn test_syllable_heuristic() {
        assert_eq!(ReadabilityRule::syllables("a"), 1);
        assert_eq!(ReadabilityRule::syllables("the"), 1);
        assert_eq!(ReadabilityRule::syllables("word"), 2);
        assert_eq!(ReadabilityRule::syllables("readability"), 3);
    }

    #[test]
    fn test_tags_are_word_boundaries() {
        let report = readability("<p>one</p><p>two</p>");
        assert_eq!(report.word_count, 2);
    }

    #[test]
    fn test_sentence_runs() {
        let report = readability("Wait... what?! Yes.");
        assert_eq!(report.sentence_count, 3);
        let report = readability("no terminal punctuation here");
        assert_eq!(report.sentence_count, 1);
    }

    #[test]
    fn test_simple_text_is_easy() {
        let report = readability("<p>The cat sat. The dog ran. I am here.</p>");
        // 9 words, 3 sentences, 12 syllables ("sat." counts as four characters)
        assert_eq!(report.word_count, 9);
        assert_eq!(report.sentence_count, 3);
        assert_eq!(report.syllable_count, 12);
        assert!(report.score > 1.0 && report.score < 2.0);
        assert_eq!(report.grade, "Easy (6th grade or below)");
        assert_eq!(report.status, Status::Good);
    }

    #[test]
    fn test_long_sentence_is_flagged() {
        let sentence = "internationalization ".repeat(40);
        let report = readability(&sentence);
        assert!(report.score > 16.0);
        assert_eq!(report.grade, "Difficult (College level)");
        assert_eq!(report.status, Status::Warning);
        assert!(report.findings()[0].issue.contains("hard to read"));
    }

    #[test]
    fn test_grade_labels() {
        assert_eq!(ReadabilityRule::grade_label(8.0), "Easy (6th grade or below)");
        assert_eq!(ReadabilityRule::grade_label(9.5), "Fairly easy (7th-8th grade)");
        assert_eq!(ReadabilityRule::grade_label(12.0), "Plain English (9th-10th grade)");
        assert_eq!(ReadabilityRule::grade_label(15.0), "Fairly difficult (11th-12th grade)");
        assert_eq!(ReadabilityRule::grade_label(16.1), "Difficult (College level)");
    }
}
