//! Topic persistence

use anyhow::Result;
use sqlx::SqliteConnection;

/// Topic row awaiting insertion; `lesson_id` is the freshly generated
/// lesson id
#[derive(Debug, Clone)]
pub struct NewTopic {
    pub lesson_id: i64,
    pub title: String,
    pub content: String,
    pub topic_type: String,
    pub difficulty: i64,
    pub points: i64,
    pub interactive_data: Option<String>,
    pub topic_order: i64,
    pub wp_topic_id: i64,
}

/// Insert a topic, returning the generated id
pub async fn insert(conn: &mut SqliteConnection, topic: &NewTopic) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO topics (
            lesson_id, title, content, topic_type, difficulty, points,
            interactive_data, topic_order, wp_topic_id
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(topic.lesson_id)
    .bind(&topic.title)
    .bind(&topic.content)
    .bind(&topic.topic_type)
    .bind(topic.difficulty)
    .bind(topic.points)
    .bind(&topic.interactive_data)
    .bind(topic.topic_order)
    .bind(topic.wp_topic_id)
    .execute(conn)
    .await?;

    Ok(result.last_insert_rowid())
}
