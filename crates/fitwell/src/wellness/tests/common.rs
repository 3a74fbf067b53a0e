use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::wellness::domain::{IntakeForm, UserId};
use crate::wellness::leveling::ProgressRecord;
use crate::wellness::plan::{HealthScoreSnapshot, PlanRecord};
use crate::wellness::repository::{RepositoryError, UserSession, WellnessRepository};
use crate::wellness::{wellness_router, EngineConfig, InMemoryWellnessStore, WellnessService};

pub(super) fn member() -> UserId {
    UserId("member-42".to_string())
}

pub(super) fn generated_at(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 2, 6, minute, 0)
        .single()
        .expect("valid timestamp")
}

/// Young, active male on keto: every bonus except elite activity applies.
pub(super) fn muscle_gain_form() -> IntakeForm {
    IntakeForm {
        age: 25,
        gender: Some("male".to_string()),
        weight_kg: 70.0,
        height_cm: 175.0,
        goal: "muscle_gain".to_string(),
        activity_level: Some("active".to_string()),
        dietary_preferences: Some("keto".to_string()),
    }
}

pub(super) fn weight_loss_form() -> IntakeForm {
    IntakeForm {
        age: 55,
        gender: Some("female".to_string()),
        weight_kg: 90.0,
        height_cm: 170.0,
        goal: "weight_loss".to_string(),
        activity_level: Some("sedentary".to_string()),
        dietary_preferences: None,
    }
}

pub(super) fn zero_height_form() -> IntakeForm {
    IntakeForm {
        height_cm: 0.0,
        ..muscle_gain_form()
    }
}

pub(super) fn build_service() -> (WellnessService<InMemoryWellnessStore>, InMemoryWellnessStore) {
    let store = InMemoryWellnessStore::new();
    let service = WellnessService::new(Arc::new(store.clone()), EngineConfig::default());
    (service, store)
}

pub(super) fn wellness_router_with_service(
    service: WellnessService<InMemoryWellnessStore>,
) -> axum::Router {
    wellness_router(Arc::new(service))
}

/// Repository whose backing store is offline.
pub(super) struct UnavailableRepository;

impl WellnessRepository for UnavailableRepository {
    fn begin(&self, _user: &UserId) -> Result<Box<dyn UserSession + '_>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn plan(&self, _user: &UserId) -> Result<Option<PlanRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn score_history(&self, _user: &UserId) -> Result<Vec<HealthScoreSnapshot>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn progress(&self, _user: &UserId) -> Result<Option<ProgressRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Repository that refuses to open a session because another writer holds the user.
pub(super) struct ConflictRepository;

impl WellnessRepository for ConflictRepository {
    fn begin(&self, user: &UserId) -> Result<Box<dyn UserSession + '_>, RepositoryError> {
        Err(RepositoryError::Conflict(user.clone()))
    }

    fn plan(&self, _user: &UserId) -> Result<Option<PlanRecord>, RepositoryError> {
        Ok(None)
    }

    fn score_history(&self, _user: &UserId) -> Result<Vec<HealthScoreSnapshot>, RepositoryError> {
        Ok(Vec::new())
    }

    fn progress(&self, _user: &UserId) -> Result<Option<ProgressRecord>, RepositoryError> {
        Ok(None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum FailurePoint {
    ProgressWrite,
    Commit,
}

/// Wraps the in-memory store and fails one step of every write session.
pub(super) struct FlakyRepository {
    pub(super) store: InMemoryWellnessStore,
    pub(super) fail_at: FailurePoint,
}

impl WellnessRepository for FlakyRepository {
    fn begin(&self, user: &UserId) -> Result<Box<dyn UserSession + '_>, RepositoryError> {
        Ok(Box::new(FlakySession {
            inner: self.store.begin(user)?,
            fail_at: self.fail_at,
        }))
    }

    fn plan(&self, user: &UserId) -> Result<Option<PlanRecord>, RepositoryError> {
        self.store.plan(user)
    }

    fn score_history(&self, user: &UserId) -> Result<Vec<HealthScoreSnapshot>, RepositoryError> {
        self.store.score_history(user)
    }

    fn progress(&self, user: &UserId) -> Result<Option<ProgressRecord>, RepositoryError> {
        self.store.progress(user)
    }
}

struct FlakySession<'a> {
    inner: Box<dyn UserSession + 'a>,
    fail_at: FailurePoint,
}

impl UserSession for FlakySession<'_> {
    fn upsert_plan(&mut self, plan: PlanRecord) -> Result<(), RepositoryError> {
        self.inner.upsert_plan(plan)
    }

    fn append_score_snapshot(
        &mut self,
        snapshot: HealthScoreSnapshot,
    ) -> Result<(), RepositoryError> {
        self.inner.append_score_snapshot(snapshot)
    }

    fn read_progress(&mut self) -> Result<Option<ProgressRecord>, RepositoryError> {
        self.inner.read_progress()
    }

    fn write_progress(&mut self, progress: ProgressRecord) -> Result<(), RepositoryError> {
        if self.fail_at == FailurePoint::ProgressWrite {
            return Err(RepositoryError::Unavailable("progress table locked".to_string()));
        }
        self.inner.write_progress(progress)
    }

    fn commit(self: Box<Self>) -> Result<(), RepositoryError> {
        if self.fail_at == FailurePoint::Commit {
            return Err(RepositoryError::Unavailable("commit timed out".to_string()));
        }
        self.inner.commit()
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
