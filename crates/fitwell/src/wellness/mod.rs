//! Wellness scoring, plan templates, plan generation, and XP leveling.
//!
//! Computation lives in [`scoring`], [`templates`], [`plan`], and [`leveling`] and never
//! touches storage. [`service`] sequences those results through a [`WellnessRepository`]
//! session so a plan, its score snapshot, and the XP award land together.

pub mod domain;
pub mod leveling;
pub mod memory;
pub mod plan;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod templates;

#[cfg(test)]
mod tests;

pub use domain::{ActivityLevel, Gender, Goal, Intake, IntakeError, IntakeForm, UserId};
pub use leveling::{LevelingEngine, ProgressRecord, ProgressView};
pub use memory::InMemoryWellnessStore;
pub use plan::{
    GeneratedPlan, HealthScoreSnapshot, Macros, Meals, NutritionPlan, PlanAnalysis, PlanGenerator,
    PlanRecord, WorkoutPlan,
};
pub use repository::{RepositoryError, UserSession, WellnessRepository};
pub use router::wellness_router;
pub use scoring::{EngineConfig, ScoreBreakdown, ScoreCalculator, SubScores};
pub use service::{PlanOutcome, WellnessService, WellnessServiceError};
pub use templates::PlanTemplateSelector;
