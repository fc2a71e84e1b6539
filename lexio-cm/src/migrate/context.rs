//! Id-translation tables threaded through the migration phases
//!
//! These maps are the only channel by which later phases resolve foreign
//! keys; there is no query-back-to-database lookup. Each entry is written
//! once when its entity is inserted and read many times afterward.

use crate::parser::types::Language;
use std::collections::HashMap;

/// Mapping entry for a migrated course
#[derive(Debug, Clone, Copy)]
pub struct CourseMapping {
    /// Freshly generated course id in the target schema
    pub new_id: i64,
    /// Inferred course language, reused by the derived-content phases
    pub language: Language,
}

/// Mapping entry for a migrated lesson
#[derive(Debug, Clone, Copy)]
pub struct LessonMapping {
    pub new_id: i64,
    /// New id of the course the lesson was attached to
    pub course_id: i64,
}

/// Mapping entry for a migrated topic
#[derive(Debug, Clone, Copy)]
pub struct TopicMapping {
    pub new_id: i64,
    /// New id of the lesson the topic was attached to
    pub lesson_id: i64,
}

/// All id-translation state for one migration run
#[derive(Debug, Default)]
pub struct MigrationContext {
    /// WordPress course id → target course
    pub courses: HashMap<i64, CourseMapping>,
    /// WordPress lesson id → target lesson
    pub lessons: HashMap<i64, LessonMapping>,
    /// WordPress topic id → target topic
    pub topics: HashMap<i64, TopicMapping>,
    /// Author email → target user id
    pub users: HashMap<String, i64>,
}
