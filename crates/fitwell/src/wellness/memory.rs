use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use super::domain::UserId;
use super::leveling::ProgressRecord;
use super::plan::{HealthScoreSnapshot, PlanRecord};
use super::repository::{RepositoryError, UserSession, WellnessRepository};

#[derive(Debug, Default, Clone)]
struct UserState {
    plan: Option<PlanRecord>,
    history: Vec<HealthScoreSnapshot>,
    progress: Option<ProgressRecord>,
}

#[derive(Debug, Default)]
struct StoreInner {
    users: Mutex<HashMap<UserId, UserState>>,
    writers: Mutex<HashSet<UserId>>,
    writer_released: Condvar,
}

/// Process-local store with one writer per user at a time.
///
/// Cloning shares the underlying state.
#[derive(Debug, Default, Clone)]
pub struct InMemoryWellnessStore {
    inner: Arc<StoreInner>,
}

impl InMemoryWellnessStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn users(&self) -> Result<MutexGuard<'_, HashMap<UserId, UserState>>, RepositoryError> {
        self.inner.users.lock().map_err(|_| poisoned())
    }
}

fn poisoned() -> RepositoryError {
    RepositoryError::Unavailable("store lock poisoned".to_string())
}

impl WellnessRepository for InMemoryWellnessStore {
    fn begin(&self, user: &UserId) -> Result<Box<dyn UserSession + '_>, RepositoryError> {
        let mut writers = self.inner.writers.lock().map_err(|_| poisoned())?;
        while writers.contains(user) {
            writers = self
                .inner
                .writer_released
                .wait(writers)
                .map_err(|_| poisoned())?;
        }
        writers.insert(user.clone());

        Ok(Box::new(MemorySession {
            inner: &self.inner,
            user: user.clone(),
            staged: StagedWrites::default(),
        }))
    }

    fn plan(&self, user: &UserId) -> Result<Option<PlanRecord>, RepositoryError> {
        Ok(self
            .users()?
            .get(user)
            .and_then(|state| state.plan.clone()))
    }

    fn score_history(&self, user: &UserId) -> Result<Vec<HealthScoreSnapshot>, RepositoryError> {
        let mut history = self
            .users()?
            .get(user)
            .map(|state| state.history.clone())
            .unwrap_or_default();
        history.reverse();
        history.sort_by(|left, right| right.recorded_at.cmp(&left.recorded_at));
        Ok(history)
    }

    fn progress(&self, user: &UserId) -> Result<Option<ProgressRecord>, RepositoryError> {
        Ok(self.users()?.get(user).and_then(|state| state.progress))
    }
}

#[derive(Debug, Default)]
struct StagedWrites {
    plan: Option<PlanRecord>,
    snapshots: Vec<HealthScoreSnapshot>,
    progress: Option<ProgressRecord>,
}

struct MemorySession<'a> {
    inner: &'a StoreInner,
    user: UserId,
    staged: StagedWrites,
}

impl UserSession for MemorySession<'_> {
    fn upsert_plan(&mut self, plan: PlanRecord) -> Result<(), RepositoryError> {
        self.staged.plan = Some(plan);
        Ok(())
    }

    fn append_score_snapshot(
        &mut self,
        snapshot: HealthScoreSnapshot,
    ) -> Result<(), RepositoryError> {
        self.staged.snapshots.push(snapshot);
        Ok(())
    }

    fn read_progress(&mut self) -> Result<Option<ProgressRecord>, RepositoryError> {
        if let Some(progress) = self.staged.progress {
            return Ok(Some(progress));
        }
        let users = self.inner.users.lock().map_err(|_| poisoned())?;
        Ok(users.get(&self.user).and_then(|state| state.progress))
    }

    fn write_progress(&mut self, progress: ProgressRecord) -> Result<(), RepositoryError> {
        self.staged.progress = Some(progress);
        Ok(())
    }

    fn commit(mut self: Box<Self>) -> Result<(), RepositoryError> {
        let staged = std::mem::take(&mut self.staged);
        let mut users = self.inner.users.lock().map_err(|_| poisoned())?;
        let state = users.entry(self.user.clone()).or_default();

        if let Some(plan) = staged.plan {
            state.plan = Some(plan);
        }
        state.history.extend(staged.snapshots);
        if let Some(progress) = staged.progress {
            state.progress = Some(progress);
        }
        Ok(())
    }
}

impl Drop for MemorySession<'_> {
    fn drop(&mut self) {
        let mut writers = self
            .inner
            .writers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        writers.remove(&self.user);
        self.inner.writer_released.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wellness::domain::{ActivityLevel, Gender, Goal, Intake};
    use crate::wellness::plan::PlanGenerator;
    use chrono::{Duration, TimeZone, Utc};
    use std::sync::mpsc;
    use std::thread;

    fn generated(goal: Goal, minutes: i64) -> (PlanRecord, HealthScoreSnapshot) {
        let intake = Intake {
            age: 34,
            gender: Gender::Female,
            weight_kg: 62.0,
            height_cm: 168.0,
            goal,
            activity_level: ActivityLevel::Moderate,
            dietary_preferences: String::new(),
        };
        let at = Utc
            .with_ymd_and_hms(2026, 1, 5, 7, 0, 0)
            .single()
            .expect("valid timestamp")
            + Duration::minutes(minutes);
        let generated = PlanGenerator::default()
            .generate(&UserId("member".to_string()), &intake, at)
            .expect("valid intake");
        (generated.plan, generated.snapshot)
    }

    #[test]
    fn dropped_session_discards_staged_writes() {
        let store = InMemoryWellnessStore::new();
        let user = UserId("member".to_string());
        let (plan, snapshot) = generated(Goal::Endurance, 0);

        {
            let mut session = store.begin(&user).expect("session opens");
            session.upsert_plan(plan).expect("staged");
            session.append_score_snapshot(snapshot).expect("staged");
            session
                .write_progress(ProgressRecord::default())
                .expect("staged");
        }

        assert!(store.plan(&user).expect("read").is_none());
        assert!(store.score_history(&user).expect("read").is_empty());
        assert!(store.progress(&user).expect("read").is_none());
    }

    #[test]
    fn commit_publishes_all_staged_writes() {
        let store = InMemoryWellnessStore::new();
        let user = UserId("member".to_string());
        let (plan, snapshot) = generated(Goal::Endurance, 0);

        let mut session = store.begin(&user).expect("session opens");
        session.upsert_plan(plan.clone()).expect("staged");
        session.append_score_snapshot(snapshot).expect("staged");
        let progress = ProgressRecord {
            xp: 500,
            level: 2,
            health_score: 84,
        };
        session.write_progress(progress).expect("staged");
        assert_eq!(session.read_progress().expect("read"), Some(progress));
        session.commit().expect("commit");

        assert_eq!(store.plan(&user).expect("read"), Some(plan));
        assert_eq!(store.score_history(&user).expect("read"), vec![snapshot]);
        assert_eq!(store.progress(&user).expect("read"), Some(progress));
    }

    #[test]
    fn history_is_returned_newest_first() {
        let store = InMemoryWellnessStore::new();
        let user = UserId("member".to_string());

        for (goal, minutes) in [(Goal::WeightLoss, 0), (Goal::MuscleGain, 30)] {
            let (plan, snapshot) = generated(goal, minutes);
            let mut session = store.begin(&user).expect("session opens");
            session.upsert_plan(plan).expect("staged");
            session.append_score_snapshot(snapshot).expect("staged");
            session.commit().expect("commit");
        }

        let history = store.score_history(&user).expect("read");
        assert_eq!(history.len(), 2);
        assert!(history[0].recorded_at > history[1].recorded_at);
        let plan = store.plan(&user).expect("read").expect("plan present");
        assert_eq!(plan.intake.goal, Goal::MuscleGain);
    }

    #[test]
    fn second_writer_for_same_user_waits_for_release() {
        let store = InMemoryWellnessStore::new();
        let user = UserId("member".to_string());
        let session = store.begin(&user).expect("first session opens");

        let (acquired_tx, acquired_rx) = mpsc::channel();
        let contender = {
            let store = store.clone();
            let user = user.clone();
            thread::spawn(move || {
                let session = store.begin(&user).expect("second session opens");
                acquired_tx.send(()).expect("receiver alive");
                drop(session);
            })
        };

        assert!(acquired_rx
            .recv_timeout(std::time::Duration::from_millis(100))
            .is_err());

        drop(session);
        acquired_rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .expect("second writer proceeds after release");
        contender.join().expect("contender finishes");
    }

    #[test]
    fn writers_for_different_users_do_not_block() {
        let store = InMemoryWellnessStore::new();
        let _first = store
            .begin(&UserId("alpha".to_string()))
            .expect("alpha session");
        let second = store.begin(&UserId("beta".to_string()));
        assert!(second.is_ok());
    }
}
