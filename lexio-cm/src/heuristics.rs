//! Best-effort field derivation for migrated content
//!
//! These heuristics fill columns the WordPress export never carried
//! (difficulty, durations, points, synthesized vocabulary and cultural
//! rows). They are calibrated to the historical export's conventions;
//! inference misses fall back to documented defaults and are never
//! surfaced as errors.

use crate::parser::types::{LessonType, TopicType};
use crate::parser::{match_rules, SubstringRule};
use lexio_common::text::word_count;

/// Institution type, inferred from a LearnDash group title
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstitutionType {
    University,
    School,
    Center,
    Tutor,
    Corporate,
}

impl InstitutionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstitutionType::University => "university",
            InstitutionType::School => "school",
            InstitutionType::Center => "center",
            InstitutionType::Tutor => "tutor",
            InstitutionType::Corporate => "corporate",
        }
    }
}

const INSTITUTION_TYPE_RULES: &[SubstringRule<InstitutionType>] = &[
    SubstringRule { needle: "university", value: InstitutionType::University },
    SubstringRule { needle: "school", value: InstitutionType::School },
    SubstringRule { needle: "center", value: InstitutionType::Center },
    SubstringRule { needle: "tutor", value: InstitutionType::Tutor },
    SubstringRule { needle: "corporate", value: InstitutionType::Corporate },
];

pub fn infer_institution_type(title: &str) -> InstitutionType {
    match_rules(title, INSTITUTION_TYPE_RULES, InstitutionType::School)
}

/// Explicit level keywords override any content-length banding
const DIFFICULTY_RULES: &[SubstringRule<i64>] = &[
    SubstringRule { needle: "beginner", value: 1 },
    SubstringRule { needle: "easy", value: 1 },
    SubstringRule { needle: "elementary", value: 2 },
    SubstringRule { needle: "intermediate", value: 3 },
    SubstringRule { needle: "advanced", value: 4 },
    SubstringRule { needle: "expert", value: 5 },
];

/// Topic difficulty on a 1-5 scale.
///
/// A level keyword in the title wins outright; otherwise content length is
/// banded with `<` comparators at 100/300/500/800 words.
pub fn infer_difficulty(title: &str, content: &str) -> i64 {
    let by_keyword = match_rules(title, DIFFICULTY_RULES, 0);
    if by_keyword > 0 {
        return by_keyword;
    }

    let words = word_count(content);
    if words < 100 {
        1
    } else if words < 300 {
        2
    } else if words < 500 {
        3
    } else if words < 800 {
        4
    } else {
        5
    }
}

/// Points awarded for completing a topic, by topic type
pub fn topic_points(topic_type: TopicType) -> i64 {
    match topic_type {
        TopicType::Quiz => 20,
        TopicType::ListeningGapFill => 15,
        TopicType::VocabularyGame => 15,
        TopicType::Anagram => 10,
        TopicType::MatchingPairs => 10,
        TopicType::FindTheMatch => 10,
        TopicType::Page | TopicType::StoryPage => 10,
    }
}

/// Estimated lesson duration in minutes: a per-type floor plus reading time
/// at roughly 150 words per minute, capped at one hour
pub fn estimate_lesson_duration(content: &str, lesson_type: LessonType) -> i64 {
    let base = match lesson_type {
        LessonType::Story => 5,
        LessonType::Vocabulary => 8,
        LessonType::Game => 10,
        LessonType::Grammar => 12,
    };
    let reading = word_count(content).div_ceil(150) as i64;
    (base + reading).min(60)
}

/// Maximum synthesized vocabulary rows per lesson
pub const MAX_VOCABULARY_PER_LESSON: usize = 10;

const MIN_TOKEN_LEN: usize = 4;
const MAX_TOKEN_LEN: usize = 19;

/// Extract unique word-like tokens from lesson content.
///
/// Tokens are whitespace-delimited runs stripped of surrounding
/// punctuation, kept when 4-19 characters of Latin letters (diacritics
/// included), lowercased, deduplicated in order of first appearance, and
/// capped at [`MAX_VOCABULARY_PER_LESSON`]. No translation happens here;
/// the caller stores the surface token as-is.
pub fn extract_vocabulary(content: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut words = Vec::new();

    for raw in content.split_whitespace() {
        let token: String = raw
            .trim_matches(|c: char| !c.is_alphabetic())
            .to_lowercase();
        let len = token.chars().count();
        if len < MIN_TOKEN_LEN || len > MAX_TOKEN_LEN {
            continue;
        }
        if !token.chars().all(is_latin_letter) {
            continue;
        }
        if seen.insert(token.clone()) {
            words.push(token);
            if words.len() == MAX_VOCABULARY_PER_LESSON {
                break;
            }
        }
    }

    words
}

/// ASCII letters plus the Latin-1 diacritic range (à, é, ñ, ü, ß, ...)
fn is_latin_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || ('\u{00C0}'..='\u{00FF}').contains(&c)
}

/// Synthesized cultural-content theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CulturalTheme {
    /// Title keyword that triggers the theme
    pub keyword: &'static str,
    /// Human-readable theme label for the placeholder row
    pub label: &'static str,
    /// `culture_type` enum value in the target schema
    pub culture_type: &'static str,
}

/// Fixed keyword → theme table applied to lesson titles. A title can match
/// several keywords and then synthesizes one row per match.
pub const CULTURAL_THEMES: &[CulturalTheme] = &[
    CulturalTheme { keyword: "food", label: "Food and meals", culture_type: "cuisine" },
    CulturalTheme { keyword: "family", label: "Family life", culture_type: "daily_life" },
    CulturalTheme { keyword: "school", label: "School days", culture_type: "daily_life" },
    CulturalTheme { keyword: "holiday", label: "Holidays", culture_type: "celebrations" },
    CulturalTheme { keyword: "health", label: "Health and wellbeing", culture_type: "daily_life" },
    CulturalTheme { keyword: "town", label: "Around town", culture_type: "geography" },
    CulturalTheme { keyword: "christmas", label: "Christmas traditions", culture_type: "celebrations" },
];

/// Themes triggered by a lesson title, in table order
pub fn cultural_themes(title: &str) -> Vec<CulturalTheme> {
    let lower = title.to_lowercase();
    CULTURAL_THEMES
        .iter()
        .filter(|theme| lower.contains(theme.keyword))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_keyword_overrides_length_banding() {
        let long_content = "word ".repeat(900);
        assert_eq!(infer_difficulty("Beginner greetings", &long_content), 1);
    }

    #[test]
    fn difficulty_bands_use_exclusive_upper_bounds() {
        let words = |n: usize| "mot ".repeat(n);
        assert_eq!(infer_difficulty("Untitled", &words(99)), 1);
        assert_eq!(infer_difficulty("Untitled", &words(100)), 2);
        assert_eq!(infer_difficulty("Untitled", &words(299)), 2);
        assert_eq!(infer_difficulty("Untitled", &words(300)), 3);
        assert_eq!(infer_difficulty("Untitled", &words(500)), 4);
        assert_eq!(infer_difficulty("Untitled", &words(800)), 5);
        assert_eq!(infer_difficulty("Untitled", &words(850)), 5);
    }

    #[test]
    fn vocabulary_is_capped_and_length_bounded() {
        // 40 distinct qualifying tokens; suffixes are letters because digits
        // would be trimmed off and collapse the tokens into one
        let content: String = (0..40u8)
            .map(|i| format!("palabra{}{} ", (b'a' + i / 26) as char, (b'a' + i % 26) as char))
            .collect();
        let words = extract_vocabulary(&content);
        assert_eq!(words.len(), MAX_VOCABULARY_PER_LESSON);

        assert!(extract_vocabulary("aux et le la un").is_empty(), "3-letter words rejected");
        assert!(extract_vocabulary("antidisestablishmentarianism").is_empty(), "20+ letters rejected");
    }

    #[test]
    fn vocabulary_trims_digit_suffixes_before_dedup() {
        let content: String = (0..40).map(|i| format!("palabra{i:02} ")).collect();
        assert_eq!(extract_vocabulary(&content), vec!["palabra".to_string()]);
    }

    #[test]
    fn lesson_duration_rounds_reading_time_up_and_caps_at_an_hour() {
        assert_eq!(estimate_lesson_duration("", LessonType::Story), 5);
        // 151 words is two reading minutes, not one
        let content = "mot ".repeat(151);
        assert_eq!(estimate_lesson_duration(&content, LessonType::Story), 7);
        let long = "mot ".repeat(20_000);
        assert_eq!(estimate_lesson_duration(&long, LessonType::Grammar), 60);
    }

    #[test]
    fn vocabulary_keeps_diacritics_and_dedups() {
        let words = extract_vocabulary("Café! café, marché; 1234 ab12cd");
        assert_eq!(words, vec!["café".to_string(), "marché".to_string()]);
    }

    #[test]
    fn cultural_theme_table_matches_multiple_keywords() {
        let themes = cultural_themes("Food and family at Christmas");
        let labels: Vec<_> = themes.iter().map(|t| t.label).collect();
        assert_eq!(labels, vec!["Food and meals", "Family life", "Christmas traditions"]);
        assert!(cultural_themes("Verbs of motion").is_empty());
    }

    #[test]
    fn institution_type_defaults_to_school() {
        assert_eq!(infer_institution_type("Lyon University"), InstitutionType::University);
        assert_eq!(infer_institution_type("Private tutor network"), InstitutionType::Tutor);
        assert_eq!(infer_institution_type("The Language People"), InstitutionType::School);
    }
}
