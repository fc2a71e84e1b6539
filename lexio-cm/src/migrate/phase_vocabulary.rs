//! Phase 7: derived vocabulary
//!
//! Not a faithful migration: word-like tokens are pulled out of migrated
//! lesson content and stored untranslated, the same surface token as both
//! source text and the word in the course's language. Editors backfill the
//! real translations.

use super::context::MigrationContext;
use super::stats::{EntityKind, MigrationStats};
use super::{ContentMigration, MigrationError};
use crate::db::vocabulary::{self, NewVocabulary};
use crate::heuristics::extract_vocabulary;
use crate::parser::WxrParser;

impl ContentMigration {
    pub(super) async fn synthesize_vocabulary(
        &self,
        parser: &WxrParser,
        ctx: &MigrationContext,
        stats: &mut MigrationStats,
    ) -> Result<(), MigrationError> {
        tracing::info!("phase 7: vocabulary synthesis");

        let mut tx = self.db.begin().await?;

        for (wp_id, lesson) in parser.lessons().iter() {
            // Only lessons that actually made it into the target schema
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

            for word in extract_vocabulary(&lesson.content) {
                let row = NewVocabulary {
                    lesson_id: mapping.new_id,
                    word,
                    language,
                };
                match vocabulary::insert(&mut tx, &row).await {
                    Ok(_) => stats.vocabulary += 1,
                    Err(e) => {
                        stats.record_issue(EntityKind::Vocabulary, Some(wp_id), &lesson.title, &e)
                    }
                }
            }
        }

        tx.commit().await?;
        Ok(())
    }
}
