//! Course persistence

use anyhow::Result;
use sqlx::SqliteConnection;

/// Course row awaiting insertion
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub language: String,
    pub course_order: i64,
    /// Estimated total minutes across the course's lessons
    pub estimated_duration: i64,
    pub created_by: i64,
    pub wp_course_id: i64,
}

/// Insert a course, returning the generated id.
///
/// `slug` is UNIQUE in the sink schema, so a duplicate title surfaces here
/// as an error rather than a silent second copy.
pub async fn insert(conn: &mut SqliteConnection, course: &NewCourse) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO courses (
            title, slug, description, language, course_order,
            estimated_duration, created_by, wp_course_id
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&course.title)
    .bind(&course.slug)
    .bind(&course.description)
    .bind(&course.language)
    .bind(course.course_order)
    .bind(course.estimated_duration)
    .bind(course.created_by)
    .bind(course.wp_course_id)
    .execute(conn)
    .await?;

    Ok(result.last_insert_rowid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

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

    fn sample(slug: &str) -> NewCourse {
        NewCourse {
            title: "Spanish Stories 1".to_string(),
            slug: slug.to_string(),
            description: None,
            language: "spanish".to_string(),
            course_order: 1,
            estimated_duration: 90,
            created_by: 1,
            wp_course_id: 101,
        }
    }

    #[tokio::test]
    async fn insert_returns_generated_id_and_rejects_duplicate_slug() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        let first = insert(&mut conn, &sample("spanish-stories-1")).await.expect("insert");
        let second = insert(&mut conn, &sample("spanish-stories-2")).await.expect("insert");
        assert!(second > first);

        assert!(insert(&mut conn, &sample("spanish-stories-1")).await.is_err());
    }
}
