//! Synthesized cultural-content persistence
//!
//! Placeholder rows derived from lesson titles; editors replace the
//! templated body with curated content after the run.

use anyhow::Result;
use sqlx::SqliteConnection;

/// Cultural-content row awaiting insertion
#[derive(Debug, Clone)]
pub struct NewCulturalContent {
    pub lesson_id: i64,
    pub title: String,
    pub culture_type: String,
    pub content: String,
    pub language: String,
}

/// Insert a cultural-content row, returning the generated id
pub async fn insert(conn: &mut SqliteConnection, entry: &NewCulturalContent) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO cultural_content (lesson_id, title, culture_type, content, language)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(entry.lesson_id)
    .bind(&entry.title)
    .bind(&entry.culture_type)
    .bind(&entry.content)
    .bind(&entry.language)
    .execute(conn)
    .await?;

    Ok(result.last_insert_rowid())
}
