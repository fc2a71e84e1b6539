//! Migration run statistics and per-entity issue records

use serde::Serialize;
use std::fmt;

/// Entity kind, for issue attribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Institution,
    User,
    Course,
    Lesson,
    Topic,
    Quiz,
    Question,
    Vocabulary,
    CulturalContent,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Institution => "institution",
            EntityKind::User => "user",
            EntityKind::Course => "course",
            EntityKind::Lesson => "lesson",
            EntityKind::Topic => "topic",
            EntityKind::Quiz => "quiz",
            EntityKind::Question => "question",
            EntityKind::Vocabulary => "vocabulary",
            EntityKind::CulturalContent => "cultural content",
        };
        f.write_str(name)
    }
}

/// One recorded per-entity failure.
///
/// Issues never abort the run; they are the only channel for
/// partial-failure visibility, so they carry enough context to locate the
/// source object after the run.
#[derive(Debug, Clone, Serialize)]
pub struct MigrationIssue {
    pub entity: EntityKind,
    /// Original WordPress id, when the failing object has one
    pub wp_id: Option<i64>,
    pub title: String,
    pub message: String,
}

impl fmt::Display for MigrationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.wp_id {
            Some(id) => write!(f, "{} {} '{}': {}", self.entity, id, self.title, self.message),
            None => write!(f, "{} '{}': {}", self.entity, self.title, self.message),
        }
    }
}

/// Counters and issues accumulated across one migration run
#[derive(Debug, Default, Clone, Serialize)]
pub struct MigrationStats {
    pub institutions: usize,
    pub users: usize,
    pub courses: usize,
    pub lessons: usize,
    pub topics: usize,
    pub quizzes: usize,
    pub questions: usize,
    pub vocabulary: usize,
    pub cultural_content: usize,
    pub issues: Vec<MigrationIssue>,
}

impl MigrationStats {
    /// Record one per-entity failure and keep going
    pub fn record_issue(
        &mut self,
        entity: EntityKind,
        wp_id: Option<i64>,
        title: &str,
        error: &anyhow::Error,
    ) {
        let issue = MigrationIssue {
            entity,
            wp_id,
            title: title.to_string(),
            message: format!("{error:#}"),
        };
        tracing::error!(%issue, "entity failed, continuing");
        self.issues.push(issue);
    }

    /// Emit the final run summary: per-entity counts and the full issue
    /// list. This is the sole user-visible failure report.
    pub fn log_summary(&self) {
        tracing::info!("migration summary:");
        tracing::info!("  institutions:     {}", self.institutions);
        tracing::info!("  users:            {}", self.users);
        tracing::info!("  courses:          {}", self.courses);
        tracing::info!("  lessons:          {}", self.lessons);
        tracing::info!("  topics:           {}", self.topics);
        tracing::info!("  quizzes:          {}", self.quizzes);
        tracing::info!("  questions:        {}", self.questions);
        tracing::info!("  vocabulary:       {}", self.vocabulary);
        tracing::info!("  cultural content: {}", self.cultural_content);

        if self.issues.is_empty() {
            tracing::info!("no issues recorded");
        } else {
            tracing::warn!("{} issue(s) recorded:", self.issues.len());
            for issue in &self.issues {
                tracing::warn!("  {}", issue);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_display_includes_wp_id_and_title() {
        let issue = MigrationIssue {
            entity: EntityKind::Course,
            wp_id: Some(101),
            title: "Spanish Stories 1".to_string(),
            message: "UNIQUE constraint failed".to_string(),
        };
        assert_eq!(
            issue.to_string(),
            "course 101 'Spanish Stories 1': UNIQUE constraint failed"
        );
    }

    #[test]
    fn record_issue_appends_exactly_one_entry() {
        let mut stats = MigrationStats::default();
        let err = anyhow::anyhow!("boom");
        stats.record_issue(EntityKind::Topic, Some(7), "Quiz page", &err);
        assert_eq!(stats.issues.len(), 1);
        assert_eq!(stats.issues[0].entity, EntityKind::Topic);
    }
}
