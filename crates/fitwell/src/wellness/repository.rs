use super::domain::UserId;
use super::leveling::ProgressRecord;
use super::plan::{HealthScoreSnapshot, PlanRecord};

/// Storage abstraction the service writes through.
///
/// Writes go through a [`UserSession`], which holds the user's single-writer slot until it
/// is committed or dropped. Reads outside a session see only committed state.
pub trait WellnessRepository: Send + Sync {
    /// Open an exclusive write session for `user`, waiting for any session already open
    /// for the same user. Sessions for different users do not contend.
    fn begin(&self, user: &UserId) -> Result<Box<dyn UserSession + '_>, RepositoryError>;

    fn plan(&self, user: &UserId) -> Result<Option<PlanRecord>, RepositoryError>;

    /// Score history, newest first.
    fn score_history(&self, user: &UserId) -> Result<Vec<HealthScoreSnapshot>, RepositoryError>;

    fn progress(&self, user: &UserId) -> Result<Option<ProgressRecord>, RepositoryError>;
}

/// Staged writes for one user. Nothing is visible to readers until [`UserSession::commit`];
/// dropping the session discards everything staged.
pub trait UserSession {
    fn upsert_plan(&mut self, plan: PlanRecord) -> Result<(), RepositoryError>;

    fn append_score_snapshot(&mut self, snapshot: HealthScoreSnapshot)
        -> Result<(), RepositoryError>;

    /// Current progress including writes staged in this session.
    fn read_progress(&mut self) -> Result<Option<ProgressRecord>, RepositoryError>;

    fn write_progress(&mut self, progress: ProgressRecord) -> Result<(), RepositoryError>;

    fn commit(self: Box<Self>) -> Result<(), RepositoryError>;
}

/// Error enumeration for storage failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("concurrent write conflict for user {0}")]
    Conflict(UserId),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
