//! Phase 8: derived cultural content
//!
//! Placeholder rows synthesized from the fixed keyword → theme table over
//! lesson titles. The body is a template, not real content; curators
//! replace it after the run.

use super::context::MigrationContext;
use super::stats::{EntityKind, MigrationStats};
use super::{ContentMigration, MigrationError};
use crate::db::cultural_content::{self, NewCulturalContent};
use crate::heuristics::cultural_themes;
use crate::parser::WxrParser;

impl ContentMigration {
    pub(super) async fn synthesize_cultural_content(
        &self,
        parser: &WxrParser,
        ctx: &MigrationContext,
        stats: &mut MigrationStats,
    ) -> Result<(), MigrationError> {
        tracing::info!("phase 8: cultural content synthesis");

        let mut tx = self.db.begin().await?;

        for (wp_id, lesson) in parser.lessons().iter() {
            let Some(mapping) = ctx.lessons.get(&wp_id) else {
                continue;
            };
            let Some(language) = lesson
                .course_id
                .and_then(|id| ctx.courses.get(&id))
                .map(|c| c.language)
            else {
                continue;
            };

            for theme in cultural_themes(&lesson.title) {
                let row = NewCulturalContent {
                    lesson_id: mapping.new_id,
                    title: format!("{}: {}", theme.label, lesson.title),
                    culture_type: theme.culture_type.to_string(),
                    content: format!(
                        "Placeholder cultural note on {} for learners of {}. \
                         Generated from lesson '{}' during the WordPress migration; \
                         replace with curated content.",
                        theme.label.to_lowercase(),
                        language.as_str(),
                        lesson.title
                    ),
                    language: language.as_str().to_string(),
                };
                match cultural_content::insert(&mut tx, &row).await {
                    Ok(_) => stats.cultural_content += 1,
                    Err(e) => stats.record_issue(
                        EntityKind::CulturalContent,
                        Some(wp_id),
                        &lesson.title,
                        &e,
                    ),
                }
            }
        }

        tx.commit().await?;
        Ok(())
    }
}
