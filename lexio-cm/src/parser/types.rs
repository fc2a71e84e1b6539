//! Transient entities reconstructed from a WordPress eXtended RSS export
//!
//! Everything in this module is keyed by the original WordPress post id
//! (`wp_id`) and lives only for the duration of one migration run.

use chrono::NaiveDateTime;
use std::collections::HashMap;

/// Raw post record, one per `<item>` element.
///
/// `post_type` decides which typed entity (if any) the post is promoted to
/// during classification; unrecognized post types stay in the raw map only.
#[derive(Debug, Clone, Default)]
pub struct WpPost {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub post_type: String,
    pub status: String,
    /// Author login as it appears in `dc:creator`
    pub author: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    /// Folded `wp:postmeta` children, last value wins on duplicate keys
    pub meta: HashMap<String, String>,
    /// `<category>` child text contents
    pub categories: Vec<String>,
}

/// One `<wp:author>` block. Populated once, read-only afterward.
#[derive(Debug, Clone, Default)]
pub struct WpAuthor {
    pub id: i64,
    pub login: String,
    pub email: String,
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
}

/// One channel-level `<wp:category>` taxonomy term
#[derive(Debug, Clone, Default)]
pub struct WpCategory {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

/// LearnDash group post, later mapped to an institution
#[derive(Debug, Clone)]
pub struct WpGroup {
    pub wp_id: i64,
    pub title: String,
    pub description: String,
}

/// Course language, inferred from the course title
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    French,
    German,
    Spanish,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::French => "french",
            Language::German => "german",
            Language::Spanish => "spanish",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonType {
    Story,
    Game,
    Vocabulary,
    Grammar,
}

impl LessonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LessonType::Story => "story",
            LessonType::Game => "game",
            LessonType::Vocabulary => "vocabulary",
            LessonType::Grammar => "grammar",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicType {
    Quiz,
    ListeningGapFill,
    VocabularyGame,
    Anagram,
    MatchingPairs,
    FindTheMatch,
    Page,
    StoryPage,
}

impl TopicType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TopicType::Quiz => "quiz",
            TopicType::ListeningGapFill => "listening_gap_fill",
            TopicType::VocabularyGame => "vocabulary_game",
            TopicType::Anagram => "anagram",
            TopicType::MatchingPairs => "matching_pairs",
            TopicType::FindTheMatch => "find_the_match",
            TopicType::Page => "page",
            TopicType::StoryPage => "story_page",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizType {
    Comprehension,
    Vocabulary,
    Listening,
    Grammar,
    Writing,
}

impl QuizType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuizType::Comprehension => "comprehension",
            QuizType::Vocabulary => "vocabulary",
            QuizType::Listening => "listening",
            QuizType::Grammar => "grammar",
            QuizType::Writing => "writing",
        }
    }
}

/// Question type, mapped from LearnDash internal answer-type codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionType {
    MultipleChoice,
    ShortAnswer,
    Ordering,
    Matching,
    FillBlank,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::ShortAnswer => "short_answer",
            QuestionType::Ordering => "ordering",
            QuestionType::Matching => "matching",
            QuestionType::FillBlank => "fill_blank",
        }
    }
}

/// Typed reconstruction of an `sfwd-courses` post
#[derive(Debug, Clone)]
pub struct ParsedCourse {
    pub wp_id: i64,
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: Language,
    pub created_at: Option<NaiveDateTime>,
    /// wpIds of classified lessons linked to this course
    pub lessons: Vec<i64>,
}

/// Typed reconstruction of an `sfwd-lessons` post
#[derive(Debug, Clone)]
pub struct ParsedLesson {
    pub wp_id: i64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub lesson_type: LessonType,
    /// Declared parent course wpId; `None` means the lesson is unlinked
    pub course_id: Option<i64>,
    pub created_at: Option<NaiveDateTime>,
    /// wpIds of classified topics linked to this lesson
    pub topics: Vec<i64>,
}

/// Typed reconstruction of an `sfwd-topic` post
#[derive(Debug, Clone)]
pub struct ParsedTopic {
    pub wp_id: i64,
    pub title: String,
    pub content: String,
    pub topic_type: TopicType,
    pub lesson_id: Option<i64>,
    /// Raw shortcode content when the topic embeds an `[h5p ...]` or
    /// `[quiz` block, `None` otherwise
    pub interactive_data: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

/// Typed reconstruction of an `sfwd-quiz` post
#[derive(Debug, Clone)]
pub struct ParsedQuiz {
    pub wp_id: i64,
    pub title: String,
    pub description: String,
    pub quiz_type: QuizType,
    pub lesson_id: Option<i64>,
    pub topic_id: Option<i64>,
    pub created_at: Option<NaiveDateTime>,
    /// wpIds of classified questions linked to this quiz
    pub questions: Vec<i64>,
}

/// Typed reconstruction of an `sfwd-question` post
#[derive(Debug, Clone)]
pub struct ParsedQuestion {
    pub wp_id: i64,
    pub title: String,
    pub question_text: String,
    pub question_type: QuestionType,
    pub quiz_id: Option<i64>,
    /// Parsed answer-option JSON; empty when the metadata was absent or
    /// unparseable
    pub answer_options: Vec<serde_json::Value>,
}
