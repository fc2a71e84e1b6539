//! Phase 4: lessons
//!
//! A lesson whose course never made it into the course mapping is skipped
//! with a warning, not an issue: there is nothing to attach it to, and the
//! parse already flagged dangling references.

use super::context::{LessonMapping, MigrationContext};
use super::stats::{EntityKind, MigrationStats};
use super::{ContentMigration, MigrationError};
use crate::db::lessons::{self, NewLesson};
use crate::heuristics::estimate_lesson_duration;
use crate::parser::WxrParser;
use std::collections::HashMap;

impl ContentMigration {
    pub(super) async fn migrate_lessons(
        &self,
        parser: &WxrParser,
        ctx: &mut MigrationContext,
        stats: &mut MigrationStats,
    ) -> Result<(), MigrationError> {
        tracing::info!(lessons = parser.lessons().len(), "phase 4: lessons");

        let mut tx = self.db.begin().await?;
        // Position of the next lesson within each migrated course
        let mut order_in_course: HashMap<i64, i64> = HashMap::new();

        for (wp_id, lesson) in parser.lessons().iter() {
            let Some(course) = lesson.course_id.and_then(|id| ctx.courses.get(&id)).copied()
            else {
                tracing::warn!(
                    lesson = wp_id,
                    course = ?lesson.course_id,
                    "skipping lesson without a migrated course"
                );
                continue;
            };

            let order = order_in_course.entry(course.new_id).or_insert(0);
            let row = NewLesson {
                course_id: course.new_id,
                title: lesson.title.clone(),
                content: lesson.content.clone(),
                lesson_type: lesson.lesson_type.as_str().to_string(),
                lesson_order: *order,
                estimated_duration: estimate_lesson_duration(&lesson.content, lesson.lesson_type),
                wp_lesson_id: wp_id,
            };

            match lessons::insert(&mut tx, &row).await {
                Ok(new_id) => {
                    stats.lessons += 1;
                    *order += 1;
                    ctx.lessons.insert(
                        wp_id,
                        LessonMapping {
                            new_id,
                            course_id: course.new_id,
                        },
                    );
                }
                Err(e) => stats.record_issue(EntityKind::Lesson, Some(wp_id), &lesson.title, &e),
            }
        }

        tx.commit().await?;
        Ok(())
    }
}
