//! Content migration orchestrator
//!
//! Drives the WXR parser, then eight ordered phases (dependency order,
//! leaves first):
//!
//! institutions → users → courses → lessons → topics → quizzes/questions
//! → vocabulary (derived) → cultural content (derived)
//!
//! Each phase runs inside one transaction committed at phase end, with
//! per-entity catch-and-continue inside the phase: one failing insert is
//! recorded as an issue and never aborts the run. The only fatal failures
//! are the initial XML parse and database-level faults
//! (open/begin/commit). A crash mid-run leaves earlier phases committed.

pub mod context;
pub mod stats;

mod phase_courses;
mod phase_culture;
mod phase_institutions;
mod phase_lessons;
mod phase_quizzes;
mod phase_topics;
mod phase_users;
mod phase_vocabulary;

use crate::parser::{ParseError, WxrParser};
use context::MigrationContext;
use sqlx::SqlitePool;
use stats::MigrationStats;
use std::path::Path;
use thiserror::Error;

/// Fallback `created_by` when a course's author never became a user
pub const DEFAULT_USER_ID: i64 = 1;

/// Fatal migration errors; everything per-entity is absorbed into
/// [`MigrationStats::issues`] instead
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// One-shot migration job over a parsed WXR export
pub struct ContentMigration {
    db: SqlitePool,
    default_user_id: i64,
}

impl ContentMigration {
    pub fn new(db: SqlitePool) -> Self {
        Self {
            db,
            default_user_id: DEFAULT_USER_ID,
        }
    }

    /// Run the full migration against `xml_path`.
    ///
    /// Returns the accumulated statistics; a non-empty issue list still
    /// counts as a successful run.
    pub async fn run(&self, xml_path: &Path) -> Result<MigrationStats, MigrationError> {
        tracing::info!(path = %xml_path.display(), "starting content migration");

        let mut parser = WxrParser::new();
        parser.parse_file(xml_path)?;

        let mut ctx = MigrationContext::default();
        let mut stats = MigrationStats::default();

        self.migrate_institutions(&parser, &mut stats).await?;
        self.migrate_users(&parser, &mut ctx, &mut stats).await?;
        self.migrate_courses(&parser, &mut ctx, &mut stats).await?;
        self.migrate_lessons(&parser, &mut ctx, &mut stats).await?;
        self.migrate_topics(&parser, &mut ctx, &mut stats).await?;
        self.migrate_quizzes(&parser, &ctx, &mut stats).await?;
        self.synthesize_vocabulary(&parser, &ctx, &mut stats).await?;
        self.synthesize_cultural_content(&parser, &ctx, &mut stats).await?;

        stats.log_summary();
        Ok(stats)
    }
}
