//! Synthesized vocabulary persistence
//!
//! These rows are derived from lesson content, not migrated: the surface
//! token is stored as both the source text and the word in the lesson's
//! language. Real translations are backfilled by editors after the run.

use crate::parser::types::Language;
use anyhow::Result;
use sqlx::SqliteConnection;

/// Vocabulary row awaiting insertion
#[derive(Debug, Clone)]
pub struct NewVocabulary {
    pub lesson_id: i64,
    pub word: String,
    pub language: Language,
}

/// Insert a vocabulary row, placing the token in the column matching the
/// lesson's course language. Returns the generated id.
pub async fn insert(conn: &mut SqliteConnection, vocab: &NewVocabulary) -> Result<i64> {
    let (french, german, spanish) = match vocab.language {
        Language::French => (Some(&vocab.word), None, None),
        Language::German => (None, Some(&vocab.word), None),
        Language::Spanish => (None, None, Some(&vocab.word)),
    };

    let result = sqlx::query(
        r#"
        INSERT INTO vocabulary (lesson_id, source_text, french_text, german_text, spanish_text)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(vocab.lesson_id)
    .bind(&vocab.word)
    .bind(french)
    .bind(german)
    .bind(spanish)
    .execute(conn)
    .await?;

    Ok(result.last_insert_rowid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::{Row, SqlitePool};

    // One connection only: each new in-memory connection is a fresh database
    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory database");
        crate::db::init_tables(&pool).await.expect("init tables");
        pool
    }

    #[tokio::test]
    async fn token_lands_in_language_column() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        insert(
            &mut conn,
            &NewVocabulary {
                lesson_id: 1,
                word: "marché".to_string(),
                language: Language::French,
            },
        )
        .await
        .expect("insert");

        let row = sqlx::query(
            "SELECT source_text, french_text, spanish_text FROM vocabulary WHERE lesson_id = 1",
        )
        .fetch_one(&mut *conn)
        .await
        .unwrap();
        assert_eq!(row.get::<String, _>("source_text"), "marché");
        assert_eq!(row.get::<Option<String>, _>("french_text").as_deref(), Some("marché"));
        assert_eq!(row.get::<Option<String>, _>("spanish_text"), None);
    }
}
