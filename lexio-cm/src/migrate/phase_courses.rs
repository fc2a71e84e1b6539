//! Phase 3: courses
//!
//! Ownership resolves author login → author email → user mapping, falling
//! back to the platform's default user when the author never became an
//! account. The course's new id and inferred language go into the course
//! mapping for every later phase.

use super::context::{CourseMapping, MigrationContext};
use super::stats::{EntityKind, MigrationStats};
use super::{ContentMigration, MigrationError};
use crate::db::courses::{self, NewCourse};
use crate::parser::WxrParser;
use lexio_common::text::{first_integer, generate_slug};

/// Minutes budgeted per linked lesson when estimating course duration
const MINUTES_PER_LESSON: i64 = 30;

impl ContentMigration {
    pub(super) async fn migrate_courses(
        &self,
        parser: &WxrParser,
        ctx: &mut MigrationContext,
        stats: &mut MigrationStats,
    ) -> Result<(), MigrationError> {
        tracing::info!(courses = parser.courses().len(), "phase 3: courses");

        let mut tx = self.db.begin().await?;

        for (wp_id, course) in parser.courses().iter() {
            let created_by = parser
                .author_by_login(&course.author)
                .and_then(|author| ctx.users.get(&author.email))
                .copied()
                .unwrap_or(self.default_user_id);

            let row = NewCourse {
                title: course.title.clone(),
                slug: generate_slug(&course.title),
                description: (!course.description.trim().is_empty())
                    .then(|| course.description.clone()),
                language: course.language.as_str().to_string(),
                course_order: first_integer(&course.title).unwrap_or(0),
                estimated_duration: MINUTES_PER_LESSON * course.lessons.len() as i64,
                created_by,
                wp_course_id: wp_id,
            };

            match courses::insert(&mut tx, &row).await {
                Ok(new_id) => {
                    stats.courses += 1;
                    ctx.courses.insert(
                        wp_id,
                        CourseMapping {
                            new_id,
                            language: course.language,
                        },
                    );
                }
                Err(e) => stats.record_issue(EntityKind::Course, Some(wp_id), &course.title, &e),
            }
        }

        tx.commit().await?;
        Ok(())
    }
}
