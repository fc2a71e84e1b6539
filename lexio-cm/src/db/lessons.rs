//! Lesson persistence

use anyhow::Result;
use sqlx::SqliteConnection;

/// Lesson row awaiting insertion; `course_id` is the freshly generated
/// course id, never the WordPress one
#[derive(Debug, Clone)]
pub struct NewLesson {
    pub course_id: i64,
    pub title: String,
    pub content: String,
    pub lesson_type: String,
    pub lesson_order: i64,
    pub estimated_duration: i64,
    pub wp_lesson_id: i64,
}

/// Insert a lesson, returning the generated id
pub async fn insert(conn: &mut SqliteConnection, lesson: &NewLesson) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO lessons (
            course_id, title, content, lesson_type, lesson_order,
            estimated_duration, wp_lesson_id
        ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(lesson.course_id)
    .bind(&lesson.title)
    .bind(&lesson.content)
    .bind(&lesson.lesson_type)
    .bind(lesson.lesson_order)
    .bind(lesson.estimated_duration)
    .bind(lesson.wp_lesson_id)
    .execute(conn)
    .await?;

    Ok(result.last_insert_rowid())
}
