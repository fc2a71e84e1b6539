//! Phase 2: authors → content-creator users
//!
//! Only authors with a syntactically plausible email get an account;
//! dedup is by email. Every author that resolves to an account, fresh or
//! pre-existing, lands in the email → user-id mapping so the course phase
//! can attribute ownership.

use super::context::MigrationContext;
use super::stats::{EntityKind, MigrationStats};
use super::{ContentMigration, MigrationError};
use crate::db::users::{self, NewUser};
use crate::parser::WxrParser;
use lexio_common::text::is_plausible_email;

impl ContentMigration {
    pub(super) async fn migrate_users(
        &self,
        parser: &WxrParser,
        ctx: &mut MigrationContext,
        stats: &mut MigrationStats,
    ) -> Result<(), MigrationError> {
        tracing::info!(authors = parser.authors().len(), "phase 2: users");

        let mut tx = self.db.begin().await?;

        for author in parser.authors() {
            if !is_plausible_email(&author.email) {
                tracing::debug!(login = %author.login, "author has no usable email, skipped");
                continue;
            }

            let outcome: anyhow::Result<(i64, bool)> = async {
                if let Some(existing) = users::find_by_email(&mut tx, &author.email).await? {
                    return Ok((existing, false));
                }
                let user = NewUser {
                    email: author.email.clone(),
                    display_name: (!author.display_name.is_empty())
                        .then(|| author.display_name.clone()),
                    first_name: (!author.first_name.is_empty()).then(|| author.first_name.clone()),
                    last_name: (!author.last_name.is_empty()).then(|| author.last_name.clone()),
                    wp_login: author.login.clone(),
                };
                let id = users::insert(&mut tx, &user).await?;
                Ok((id, true))
            }
            .await;

            match outcome {
                Ok((id, created)) => {
                    if created {
                        stats.users += 1;
                    }
                    ctx.users.insert(author.email.clone(), id);
                }
                Err(e) => stats.record_issue(EntityKind::User, None, &author.login, &e),
            }
        }

        tx.commit().await?;
        Ok(())
    }
}
