//! Classification heuristics for WordPress posts
//!
//! Every cascade is an ordered `(needle, value)` table with an explicit
//! default. The tables are best-effort guesses calibrated against the
//! historical LearnDash export this tool was written for, not a general
//! classifier.

use super::types::{Language, LessonType, QuestionType, QuizType, TopicType};
use std::collections::HashMap;

/// Ordered substring rule: first needle found in the (lowercased) haystack
/// wins
pub struct SubstringRule<T> {
    pub needle: &'static str,
    pub value: T,
}

/// Apply an ordered rule table, falling back to `default` when nothing
/// matches. Matching is case-insensitive.
pub fn match_rules<T: Copy>(haystack: &str, rules: &[SubstringRule<T>], default: T) -> T {
    let lower = haystack.to_lowercase();
    rules
        .iter()
        .find(|rule| lower.contains(rule.needle))
        .map(|rule| rule.value)
        .unwrap_or(default)
}

pub const LANGUAGE_RULES: &[SubstringRule<Language>] = &[
    SubstringRule { needle: "french", value: Language::French },
    SubstringRule { needle: "german", value: Language::German },
    SubstringRule { needle: "spanish", value: Language::Spanish },
];

/// Default matches the historical export, where untitled-language courses
/// were all French
pub const DEFAULT_LANGUAGE: Language = Language::French;

pub const LESSON_TYPE_RULES: &[SubstringRule<LessonType>] = &[
    SubstringRule { needle: "game", value: LessonType::Game },
    SubstringRule { needle: "story", value: LessonType::Story },
    SubstringRule { needle: "vocabulary", value: LessonType::Vocabulary },
    SubstringRule { needle: "grammar", value: LessonType::Grammar },
];

pub const DEFAULT_LESSON_TYPE: LessonType = LessonType::Story;

/// Ordered most-specific-first; checked against title and content together
pub const TOPIC_TYPE_RULES: &[SubstringRule<TopicType>] = &[
    SubstringRule { needle: "quiz", value: TopicType::Quiz },
    SubstringRule { needle: "gap fill", value: TopicType::ListeningGapFill },
    SubstringRule { needle: "vocabulary game", value: TopicType::VocabularyGame },
    SubstringRule { needle: "anagram", value: TopicType::Anagram },
    SubstringRule { needle: "matching pairs", value: TopicType::MatchingPairs },
    SubstringRule { needle: "find the match", value: TopicType::FindTheMatch },
    SubstringRule { needle: "page", value: TopicType::Page },
];

pub const DEFAULT_TOPIC_TYPE: TopicType = TopicType::StoryPage;

pub const QUIZ_TYPE_RULES: &[SubstringRule<QuizType>] = &[
    SubstringRule { needle: "vocabulary", value: QuizType::Vocabulary },
    SubstringRule { needle: "listening", value: QuizType::Listening },
    SubstringRule { needle: "grammar", value: QuizType::Grammar },
    SubstringRule { needle: "writing", value: QuizType::Writing },
];

pub const DEFAULT_QUIZ_TYPE: QuizType = QuizType::Comprehension;

/// Map a LearnDash internal answer-type code to a question type.
/// Unknown or missing codes fall back to multiple choice.
pub fn question_type_from_code(code: Option<&str>) -> QuestionType {
    match code {
        Some("single") | Some("multiple") => QuestionType::MultipleChoice,
        Some("free_answer") => QuestionType::ShortAnswer,
        Some("sort_answer") => QuestionType::Ordering,
        Some("matrix_sort_answer") => QuestionType::Matching,
        Some("cloze_answer") => QuestionType::FillBlank,
        _ => QuestionType::MultipleChoice,
    }
}

/// Resolve a parent reference from post metadata.
///
/// WordPress encodes hierarchy as loosely-typed metadata strings under
/// inconsistent key spellings; aliases are tried in order. A missing key,
/// an unparseable value, or the conventional `0` sentinel all mean
/// "no parent".
pub fn parent_ref(meta: &HashMap<String, String>, aliases: &[&str]) -> Option<i64> {
    aliases
        .iter()
        .find_map(|key| meta.get(*key))
        .and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|id| *id > 0)
}

pub const COURSE_ID_ALIASES: &[&str] = &["course_id", "_course_id"];
pub const LESSON_ID_ALIASES: &[&str] = &["lesson_id", "_lesson_id"];
pub const TOPIC_ID_ALIASES: &[&str] = &["topic_id", "_topic_id"];
pub const QUIZ_ID_ALIASES: &[&str] = &["quiz_id", "_quiz_id"];
pub const QUESTION_TYPE_ALIASES: &[&str] = &["question_type", "_question_type"];
pub const ANSWER_DATA_ALIASES: &[&str] = &["answer_data", "_answerData"];

/// First metadata value found under any of the aliases
pub fn meta_alias<'a>(meta: &'a HashMap<String, String>, aliases: &[&str]) -> Option<&'a str> {
    aliases.iter().find_map(|key| meta.get(*key)).map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_defaults_to_french() {
        assert_eq!(
            match_rules("Beginner Reading", LANGUAGE_RULES, DEFAULT_LANGUAGE),
            Language::French
        );
        assert_eq!(
            match_rules("Spanish Stories 1", LANGUAGE_RULES, DEFAULT_LANGUAGE),
            Language::Spanish
        );
        assert_eq!(
            match_rules("GERMAN for travel", LANGUAGE_RULES, DEFAULT_LANGUAGE),
            Language::German
        );
    }

    #[test]
    fn topic_rules_are_ordered_most_specific_first() {
        // "quiz" outranks everything, including a title that also says "page"
        assert_eq!(
            match_rules("Quiz page 3", TOPIC_TYPE_RULES, DEFAULT_TOPIC_TYPE),
            TopicType::Quiz
        );
        assert_eq!(
            match_rules("Listening gap fill: le marché", TOPIC_TYPE_RULES, DEFAULT_TOPIC_TYPE),
            TopicType::ListeningGapFill
        );
        assert_eq!(
            match_rules("Chapter one", TOPIC_TYPE_RULES, DEFAULT_TOPIC_TYPE),
            TopicType::StoryPage
        );
    }

    #[test]
    fn question_codes_map_to_platform_types() {
        assert_eq!(question_type_from_code(Some("single")), QuestionType::MultipleChoice);
        assert_eq!(question_type_from_code(Some("free_answer")), QuestionType::ShortAnswer);
        assert_eq!(question_type_from_code(Some("sort_answer")), QuestionType::Ordering);
        assert_eq!(question_type_from_code(Some("matrix_sort_answer")), QuestionType::Matching);
        assert_eq!(question_type_from_code(Some("cloze_answer")), QuestionType::FillBlank);
        assert_eq!(question_type_from_code(Some("essay")), QuestionType::MultipleChoice);
        assert_eq!(question_type_from_code(None), QuestionType::MultipleChoice);
    }

    #[test]
    fn parent_ref_tries_aliases_in_order() {
        let mut meta = HashMap::new();
        meta.insert("_course_id".to_string(), "42".to_string());
        assert_eq!(parent_ref(&meta, COURSE_ID_ALIASES), Some(42));

        // Unprefixed key wins when both are present
        meta.insert("course_id".to_string(), "7".to_string());
        assert_eq!(parent_ref(&meta, COURSE_ID_ALIASES), Some(7));
    }

    #[test]
    fn parent_ref_treats_zero_and_garbage_as_unlinked() {
        let mut meta = HashMap::new();
        meta.insert("course_id".to_string(), "0".to_string());
        assert_eq!(parent_ref(&meta, COURSE_ID_ALIASES), None);

        meta.insert("course_id".to_string(), "not-a-number".to_string());
        assert_eq!(parent_ref(&meta, COURSE_ID_ALIASES), None);

        assert_eq!(parent_ref(&HashMap::new(), COURSE_ID_ALIASES), None);
    }
}
