use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{Intake, IntakeError, UserId};
use super::leveling::{LevelingEngine, ProgressRecord};
use super::scoring::{EngineConfig, ScoreBreakdown, ScoreCalculator, SubScores};
use super::templates::{NutritionTemplate, PlanTemplateSelector, WorkoutTemplate};

/// Score summary stamped onto the workout plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanAnalysis {
    pub bmi: f64,
    pub score: u8,
    pub breakdown: SubScores,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub schedule: String,
    pub focus: String,
    pub exercises: Vec<String>,
    pub analysis: PlanAnalysis,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Macros {
    pub protein: String,
    pub carbs: String,
    pub fats: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meals {
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
    pub snack: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionPlan {
    pub calories: u32,
    pub macros: Macros,
    pub meals: Meals,
}

impl From<NutritionTemplate> for NutritionPlan {
    fn from(template: NutritionTemplate) -> Self {
        Self {
            calories: template.calories,
            macros: Macros {
                protein: template.macros.protein.to_string(),
                carbs: template.macros.carbs.to_string(),
                fats: template.macros.fats.to_string(),
            },
            meals: Meals {
                breakfast: template.meals.breakfast.to_string(),
                lunch: template.meals.lunch.to_string(),
                dinner: template.meals.dinner.to_string(),
                snack: template.meals.snack.to_string(),
            },
        }
    }
}

/// The member's current plan. One per user; regeneration replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanRecord {
    pub user_id: UserId,
    pub intake: Intake,
    pub workout_plan: WorkoutPlan,
    pub nutrition_plan: NutritionPlan,
    pub scores: ScoreBreakdown,
    pub generated_at: DateTime<Utc>,
}

impl PlanRecord {
    pub fn message(&self) -> &str {
        &self.workout_plan.analysis.message
    }
}

/// Append-only history row written once per plan generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HealthScoreSnapshot {
    pub scores: ScoreBreakdown,
    pub recorded_at: DateTime<Utc>,
}

/// Everything one generation produces, before any of it is written.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPlan {
    pub plan: PlanRecord,
    pub snapshot: HealthScoreSnapshot,
    pub xp_award: u32,
}

impl GeneratedPlan {
    /// Progress after this generation: the XP award is applied and the health score
    /// replaced with the new composite.
    pub fn progress_after(
        &self,
        leveling: &LevelingEngine,
        existing: ProgressRecord,
    ) -> ProgressRecord {
        let mut progress = leveling.apply_xp(existing, self.xp_award);
        progress.health_score = self.snapshot.scores.total_score();
        progress
    }
}

/// Composes scoring and template selection into a plan record.
#[derive(Debug, Clone)]
pub struct PlanGenerator {
    calculator: ScoreCalculator,
    selector: PlanTemplateSelector,
    plan_creation_xp: u32,
}

impl PlanGenerator {
    pub fn new(config: EngineConfig) -> Self {
        let plan_creation_xp = config.plan_creation_xp;
        Self {
            calculator: ScoreCalculator::new(config),
            selector: PlanTemplateSelector::new(),
            plan_creation_xp,
        }
    }

    /// Pure computation; nothing is written. Fails only on invalid intake.
    pub fn generate(
        &self,
        user_id: &UserId,
        intake: &Intake,
        generated_at: DateTime<Utc>,
    ) -> Result<GeneratedPlan, IntakeError> {
        let scores = self.calculator.compute(intake)?;
        let (workout, nutrition) = self.selector.select(intake.goal, intake.gender);

        let analysis = PlanAnalysis {
            bmi: scores.display_bmi(),
            score: scores.total_score(),
            breakdown: scores.sub_scores(),
            message: analysis_message(&scores, intake),
        };

        let plan = PlanRecord {
            user_id: user_id.clone(),
            intake: intake.clone(),
            workout_plan: workout_plan(workout, analysis),
            nutrition_plan: NutritionPlan::from(nutrition),
            scores,
            generated_at,
        };

        Ok(GeneratedPlan {
            plan,
            snapshot: HealthScoreSnapshot {
                scores,
                recorded_at: generated_at,
            },
            xp_award: self.plan_creation_xp,
        })
    }
}

impl Default for PlanGenerator {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

fn workout_plan(template: WorkoutTemplate, analysis: PlanAnalysis) -> WorkoutPlan {
    WorkoutPlan {
        schedule: template.schedule.to_string(),
        focus: template.focus.to_string(),
        exercises: template
            .exercises
            .iter()
            .map(|exercise| exercise.to_string())
            .collect(),
        analysis,
    }
}

fn analysis_message(scores: &ScoreBreakdown, intake: &Intake) -> String {
    format!(
        "You are operating at {}% of your potential. Optimized for {}.",
        scores.total_score(),
        intake.goal.display_name()
    )
}
