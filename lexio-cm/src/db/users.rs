//! User persistence (content-author accounts)

use anyhow::Result;
use sqlx::{Row, SqliteConnection};

/// Placeholder credential stored for every migrated account; the platform
/// forces a reset on first login.
pub const PLACEHOLDER_PASSWORD_HASH: &str = "!migrated-account-reset-required";

/// Role assigned to every migrated author
pub const CONTENT_CREATOR_ROLE: &str = "content_creator";

/// User row awaiting insertion
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub display_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub wp_login: String,
}

/// Find a user id by email (the dedup surface)
pub async fn find_by_email(conn: &mut SqliteConnection, email: &str) -> Result<Option<i64>> {
    let row = sqlx::query("SELECT id FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(conn)
        .await?;

    Ok(row.map(|r| r.get("id")))
}

/// Insert a content-creator account, returning the generated id
pub async fn insert(conn: &mut SqliteConnection, user: &NewUser) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO users (
            email, password_hash, display_name, first_name, last_name,
            role, requires_password_reset, wp_login
        ) VALUES (?, ?, ?, ?, ?, ?, 1, ?)
        "#,
    )
    .bind(&user.email)
    .bind(PLACEHOLDER_PASSWORD_HASH)
    .bind(&user.display_name)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(CONTENT_CREATOR_ROLE)
    .bind(&user.wp_login)
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
    async fn email_is_unique() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        let user = NewUser {
            email: "marie@example.com".to_string(),
            display_name: Some("Marie D.".to_string()),
            first_name: None,
            last_name: None,
            wp_login: "marie".to_string(),
        };

        let id = insert(&mut conn, &user).await.expect("insert");
        assert_eq!(find_by_email(&mut conn, "marie@example.com").await.unwrap(), Some(id));
        assert!(insert(&mut conn, &user).await.is_err(), "duplicate email rejected");
    }
}
