//! Phase 5: topics
//!
//! Skipped (warning, not issue) when the parent lesson was never
//! migrated. Difficulty and points come from the heuristics tables.

use super::context::{MigrationContext, TopicMapping};
use super::stats::{EntityKind, MigrationStats};
use super::{ContentMigration, MigrationError};
use crate::db::topics::{self, NewTopic};
use crate::heuristics::{infer_difficulty, topic_points};
use crate::parser::WxrParser;
use std::collections::HashMap;

impl ContentMigration {
    pub(super) async fn migrate_topics(
        &self,
        parser: &WxrParser,
        ctx: &mut MigrationContext,
        stats: &mut MigrationStats,
    ) -> Result<(), MigrationError> {
        tracing::info!(topics = parser.topics().len(), "phase 5: topics");

        let mut tx = self.db.begin().await?;
        let mut order_in_lesson: HashMap<i64, i64> = HashMap::new();

        for (wp_id, topic) in parser.topics().iter() {
            let Some(lesson) = topic.lesson_id.and_then(|id| ctx.lessons.get(&id)).copied()
            else {
                tracing::warn!(
                    topic = wp_id,
                    lesson = ?topic.lesson_id,
                    "skipping topic without a migrated lesson"
                );
                continue;
            };

            let order = order_in_lesson.entry(lesson.new_id).or_insert(0);
            let row = NewTopic {
                lesson_id: lesson.new_id,
                title: topic.title.clone(),
                content: topic.content.clone(),
                topic_type: topic.topic_type.as_str().to_string(),
                difficulty: infer_difficulty(&topic.title, &topic.content),
                points: topic_points(topic.topic_type),
                interactive_data: topic.interactive_data.clone(),
                topic_order: *order,
                wp_topic_id: wp_id,
            };

            match topics::insert(&mut tx, &row).await {
                Ok(new_id) => {
                    stats.topics += 1;
                    *order += 1;
                    ctx.topics.insert(
                        wp_id,
                        TopicMapping {
                            new_id,
                            lesson_id: lesson.new_id,
                        },
                    );
                }
                Err(e) => stats.record_issue(EntityKind::Topic, Some(wp_id), &topic.title, &e),
            }
        }

        tx.commit().await?;
        Ok(())
    }
}
