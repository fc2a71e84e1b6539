//! Phase 1: institutions from LearnDash groups
//!
//! Dedup by exact name: running the phase twice against the same target
//! never creates a second institution with an identical name.

use super::stats::{EntityKind, MigrationStats};
use super::{ContentMigration, MigrationError};
use crate::db::institutions::{self, NewInstitution};
use crate::heuristics::infer_institution_type;
use crate::parser::WxrParser;

impl ContentMigration {
    pub(super) async fn migrate_institutions(
        &self,
        parser: &WxrParser,
        stats: &mut MigrationStats,
    ) -> Result<(), MigrationError> {
        tracing::info!(groups = parser.groups().len(), "phase 1: institutions");

        let mut tx = self.db.begin().await?;

        for (wp_id, group) in parser.groups().iter() {
            let outcome: anyhow::Result<bool> = async {
                if institutions::find_by_name(&mut tx, &group.title).await?.is_some() {
                    return Ok(false);
                }
                let institution = NewInstitution {
                    name: group.title.clone(),
                    institution_type: infer_institution_type(&group.title).as_str().to_string(),
                    description: (!group.description.trim().is_empty())
                        .then(|| group.description.clone()),
                    wp_group_id: wp_id,
                };
                institutions::insert(&mut tx, &institution).await?;
                Ok(true)
            }
            .await;

            match outcome {
                Ok(true) => stats.institutions += 1,
                Ok(false) => {
                    tracing::debug!(name = %group.title, "institution already present, skipped")
                }
                Err(e) => stats.record_issue(EntityKind::Institution, Some(wp_id), &group.title, &e),
            }
        }

        tx.commit().await?;
        Ok(())
    }
}
