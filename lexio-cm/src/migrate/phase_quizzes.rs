//! Phase 6: quizzes and their nested questions
//!
//! A quiz need not reference a lesson or topic; both foreign keys are
//! resolved opportunistically through the mapping tables. Sibling question
//! order is not preserved from the export, every question is inserted with
//! order 0.

use super::context::MigrationContext;
use super::stats::{EntityKind, MigrationStats};
use super::{ContentMigration, MigrationError};
use crate::db::quizzes::{self, NewQuiz, NewQuizQuestion};
use crate::parser::WxrParser;

impl ContentMigration {
    pub(super) async fn migrate_quizzes(
        &self,
        parser: &WxrParser,
        ctx: &MigrationContext,
        stats: &mut MigrationStats,
    ) -> Result<(), MigrationError> {
        tracing::info!(
            quizzes = parser.quizzes().len(),
            questions = parser.questions().len(),
            "phase 6: quizzes and questions"
        );

        let mut tx = self.db.begin().await?;

        for (wp_id, quiz) in parser.quizzes().iter() {
            let row = NewQuiz {
                lesson_id: quiz
                    .lesson_id
                    .and_then(|id| ctx.lessons.get(&id))
                    .map(|m| m.new_id),
                topic_id: quiz
                    .topic_id
                    .and_then(|id| ctx.topics.get(&id))
                    .map(|m| m.new_id),
                title: quiz.title.clone(),
                description: quiz.description.clone(),
                quiz_type: quiz.quiz_type.as_str().to_string(),
                wp_quiz_id: wp_id,
            };

            let quiz_id = match quizzes::insert(&mut tx, &row).await {
                Ok(id) => {
                    stats.quizzes += 1;
                    id
                }
                Err(e) => {
                    stats.record_issue(EntityKind::Quiz, Some(wp_id), &quiz.title, &e);
                    continue;
                }
            };

            for question_wp_id in &quiz.questions {
                // Linking guarantees the id is present, stay defensive anyway
                let Some(question) = parser.questions().get(*question_wp_id) else {
                    continue;
                };

                let question_row = NewQuizQuestion {
                    quiz_id,
                    question_text: question.question_text.clone(),
                    question_type: question.question_type.as_str().to_string(),
                    answer_options: serde_json::to_string(&question.answer_options)
                        .unwrap_or_else(|_| "[]".to_string()),
                    question_order: 0,
                    wp_question_id: *question_wp_id,
                };

                match quizzes::insert_question(&mut tx, &question_row).await {
                    Ok(_) => stats.questions += 1,
                    Err(e) => stats.record_issue(
                        EntityKind::Question,
                        Some(*question_wp_id),
                        &question.title,
                        &e,
                    ),
                }
            }
        }

        tx.commit().await?;
        Ok(())
    }
}
