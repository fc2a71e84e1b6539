//! Quiz and quiz-question persistence

use anyhow::Result;
use sqlx::SqliteConnection;

/// Quiz row awaiting insertion; both parent links are optional
#[derive(Debug, Clone)]
pub struct NewQuiz {
    pub lesson_id: Option<i64>,
    pub topic_id: Option<i64>,
    pub title: String,
    pub description: String,
    pub quiz_type: String,
    pub wp_quiz_id: i64,
}

/// Question row awaiting insertion, nested under a migrated quiz
#[derive(Debug, Clone)]
pub struct NewQuizQuestion {
    pub quiz_id: i64,
    pub question_text: String,
    pub question_type: String,
    /// JSON-encoded answer options, `[]` when none survived parsing
    pub answer_options: String,
    pub question_order: i64,
    pub wp_question_id: i64,
}

/// Insert a quiz, returning the generated id
pub async fn insert(conn: &mut SqliteConnection, quiz: &NewQuiz) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO quizzes (lesson_id, topic_id, title, description, quiz_type, wp_quiz_id)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(quiz.lesson_id)
    .bind(quiz.topic_id)
    .bind(&quiz.title)
    .bind(&quiz.description)
    .bind(&quiz.quiz_type)
    .bind(quiz.wp_quiz_id)
    .execute(conn)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Insert a question under a quiz, returning the generated id
pub async fn insert_question(
    conn: &mut SqliteConnection,
    question: &NewQuizQuestion,
) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO quiz_questions (
            quiz_id, question_text, question_type, answer_options,
            question_order, wp_question_id
        ) VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(question.quiz_id)
    .bind(&question.question_text)
    .bind(&question.question_type)
    .bind(&question.answer_options)
    .bind(question.question_order)
    .bind(question.wp_question_id)
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
    async fn quiz_and_nested_question_round_trip() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        let quiz_id = insert(
            &mut conn,
            &NewQuiz {
                lesson_id: None,
                topic_id: None,
                title: "Vocabulary check".to_string(),
                description: String::new(),
                quiz_type: "vocabulary".to_string(),
                wp_quiz_id: 40,
            },
        )
        .await
        .expect("insert quiz");

        insert_question(
            &mut conn,
            &NewQuizQuestion {
                quiz_id,
                question_text: "Pick the right article".to_string(),
                question_type: "multiple_choice".to_string(),
                answer_options: r#"[{"text":"le"},{"text":"la"}]"#.to_string(),
                question_order: 0,
                wp_question_id: 30,
            },
        )
        .await
        .expect("insert question");

        let row = sqlx::query("SELECT quiz_id, question_order FROM quiz_questions WHERE wp_question_id = 30")
            .fetch_one(&mut *conn)
            .await
            .unwrap();
        assert_eq!(row.get::<i64, _>("quiz_id"), quiz_id);
        assert_eq!(row.get::<i64, _>("question_order"), 0);
    }
}
