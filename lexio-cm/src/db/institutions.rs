//! Institution persistence (migrated from LearnDash groups)

use anyhow::Result;
use sqlx::{Row, SqliteConnection};

/// Institution row awaiting insertion
#[derive(Debug, Clone)]
pub struct NewInstitution {
    pub name: String,
    pub institution_type: String,
    pub description: Option<String>,
    pub wp_group_id: i64,
}

/// Find an institution id by exact name (the dedup surface)
pub async fn find_by_name(conn: &mut SqliteConnection, name: &str) -> Result<Option<i64>> {
    let row = sqlx::query("SELECT id FROM institutions WHERE name = ?")
        .bind(name)
        .fetch_optional(conn)
        .await?;

    Ok(row.map(|r| r.get("id")))
}

/// Insert an institution, returning the generated id
pub async fn insert(conn: &mut SqliteConnection, institution: &NewInstitution) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO institutions (name, institution_type, description, wp_group_id)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&institution.name)
    .bind(&institution.institution_type)
    .bind(&institution.description)
    .bind(institution.wp_group_id)
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

    #[tokio::test]
    async fn insert_and_find_by_name() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        let institution = NewInstitution {
            name: "Riverside School".to_string(),
            institution_type: "school".to_string(),
            description: None,
            wp_group_id: 12,
        };

        assert_eq!(find_by_name(&mut conn, "Riverside School").await.unwrap(), None);
        let id = insert(&mut conn, &institution).await.expect("insert");
        assert_eq!(find_by_name(&mut conn, "Riverside School").await.unwrap(), Some(id));
    }
}
