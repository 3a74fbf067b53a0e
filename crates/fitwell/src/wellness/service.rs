use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::domain::{IntakeError, IntakeForm, UserId};
use super::leveling::{LevelingEngine, ProgressRecord, ProgressView};
use super::plan::{GeneratedPlan, HealthScoreSnapshot, PlanGenerator, PlanRecord};
use super::repository::{RepositoryError, WellnessRepository};
use super::scoring::{EngineConfig, SubScores};

/// Result of one plan generation as returned to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanOutcome {
    pub plan: PlanRecord,
    pub snapshot: HealthScoreSnapshot,
    pub progress: ProgressRecord,
    pub xp_awarded: u32,
}

/// Service composing plan generation, leveling, and the storage collaborator.
pub struct WellnessService<R> {
    repository: Arc<R>,
    generator: PlanGenerator,
    leveling: LevelingEngine,
}

impl<R> WellnessService<R>
where
    R: WellnessRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: EngineConfig) -> Self {
        Self {
            repository,
            generator: PlanGenerator::new(config),
            leveling: LevelingEngine::new(),
        }
    }

    pub fn generate(
        &self,
        user: &UserId,
        form: IntakeForm,
    ) -> Result<PlanOutcome, WellnessServiceError> {
        self.generate_at(user, form, Utc::now())
    }

    /// Validate, score, and persist a plan for `user`.
    ///
    /// All computation finishes before the user's write session opens. The plan upsert,
    /// snapshot append, and progress update commit together or not at all.
    pub fn generate_at(
        &self,
        user: &UserId,
        form: IntakeForm,
        now: DateTime<Utc>,
    ) -> Result<PlanOutcome, WellnessServiceError> {
        let generated = form
            .validate()
            .and_then(|intake| self.generator.generate(user, &intake, now))
            .map_err(|err| {
                warn!(%user, error = %err, "rejected wellness intake");
                err
            })?;

        let scores = generated.snapshot.scores;
        debug!(
            %user,
            bmi = scores.bmi(),
            fitness = scores.fitness_score(),
            recovery = scores.recovery_score(),
            lifestyle = scores.lifestyle_score(),
            consistency = scores.consistency_score(),
            "computed wellness sub-scores"
        );

        let (previous, progress) = self.persist(user, &generated).map_err(|err| {
            warn!(%user, error = %err, "plan generation rolled back");
            err
        })?;

        info!(
            %user,
            goal = generated.plan.intake.goal.label(),
            total_score = scores.total_score(),
            xp = progress.xp,
            level_before = previous.level,
            level_after = progress.level,
            "generated wellness plan"
        );

        Ok(PlanOutcome {
            plan: generated.plan,
            snapshot: generated.snapshot,
            progress,
            xp_awarded: generated.xp_award,
        })
    }

    /// Runs the writes in collaborator order: upsert plan, append snapshot, read progress,
    /// apply XP, write progress. Returns the progress before and after.
    fn persist(
        &self,
        user: &UserId,
        generated: &GeneratedPlan,
    ) -> Result<(ProgressRecord, ProgressRecord), RepositoryError> {
        let mut session = self.repository.begin(user)?;
        session.upsert_plan(generated.plan.clone())?;
        session.append_score_snapshot(generated.snapshot)?;
        let existing = session.read_progress()?.unwrap_or_default();
        let progress = generated.progress_after(&self.leveling, existing);
        session.write_progress(progress)?;
        session.commit()?;
        Ok((existing, progress))
    }

    pub fn plan(&self, user: &UserId) -> Result<Option<PlanRecord>, WellnessServiceError> {
        Ok(self.repository.plan(user)?)
    }

    /// Score snapshots, newest first.
    pub fn score_history(
        &self,
        user: &UserId,
    ) -> Result<Vec<HealthScoreSnapshot>, WellnessServiceError> {
        Ok(self.repository.score_history(user)?)
    }

    /// Sub-scores of the most recent snapshot, if any.
    pub fn latest_scores(&self, user: &UserId) -> Result<Option<SubScores>, WellnessServiceError> {
        let history = self.repository.score_history(user)?;
        Ok(history.first().map(|snapshot| snapshot.scores.sub_scores()))
    }

    /// Current progress. Members without a record start at level 1 with no XP.
    pub fn progress(&self, user: &UserId) -> Result<ProgressView, WellnessServiceError> {
        let progress = self.repository.progress(user)?.unwrap_or_default();
        Ok(ProgressView::from(progress))
    }
}

/// Error raised by the wellness service.
#[derive(Debug, thiserror::Error)]
pub enum WellnessServiceError {
    #[error(transparent)]
    Validation(#[from] IntakeError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
