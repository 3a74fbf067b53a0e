use crate::infra::in_memory_service;
use chrono::Utc;
use clap::Args;
use fitwell::config::AppConfig;
use fitwell::error::AppError;
use fitwell::telemetry;
use fitwell::wellness::{IntakeForm, PlanOutcome, PlanRecord, ProgressView, UserId};
use serde::Serialize;

/// Identity used for one-shot CLI plans, which never outlive the process.
const CLI_MEMBER: &str = "cli-member";
const DEMO_MEMBER: &str = "demo-member";

#[derive(Args, Debug)]
pub(crate) struct PlanArgs {
    /// Age in whole years
    #[arg(long)]
    pub(crate) age: i64,
    /// male, female, or other (defaults to male)
    #[arg(long)]
    pub(crate) gender: Option<String>,
    /// Body weight in kilograms
    #[arg(long)]
    pub(crate) weight_kg: f64,
    /// Height in centimeters
    #[arg(long)]
    pub(crate) height_cm: f64,
    /// weight_loss, muscle_gain, endurance, or maintenance
    #[arg(long)]
    pub(crate) goal: String,
    /// sedentary, moderate, active, or elite (defaults to moderate)
    #[arg(long)]
    pub(crate) activity_level: Option<String>,
    /// Free-text dietary preferences, e.g. "keto" or "vegan, clean eating"
    #[arg(long)]
    pub(crate) diet: Option<String>,
    /// Print the plan as JSON instead of a readable summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the final plan as JSON after the walkthrough.
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), AppError> {
    telemetry::init_cli()?;
    let config = AppConfig::load()?;
    let service = in_memory_service(config.engine);

    let PlanArgs {
        age,
        gender,
        weight_kg,
        height_cm,
        goal,
        activity_level,
        diet,
        json,
    } = args;
    let form = IntakeForm {
        age,
        gender,
        weight_kg,
        height_cm,
        goal,
        activity_level,
        dietary_preferences: diet,
    };

    let outcome = service.generate(&UserId(CLI_MEMBER.to_string()), form)?;

    if json {
        print_json(&outcome)?;
    } else {
        render_outcome(&outcome);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    telemetry::init_cli()?;
    let config = AppConfig::load()?;
    let service = in_memory_service(config.engine);
    let member = UserId(DEMO_MEMBER.to_string());

    println!("FitWell plan generation demo");
    let mut last = None;
    for form in demo_forms() {
        let goal = form.goal.clone();
        let outcome = service.generate_at(&member, form, Utc::now())?;
        println!(
            "\nGenerated {} plan: score {} | +{} XP | level {}",
            goal,
            outcome.plan.scores.total_score(),
            outcome.xp_awarded,
            outcome.progress.level
        );
        last = Some(outcome);
    }

    let plan = service.plan(&member)?;
    let history = service.score_history(&member)?;
    let progress = service.progress(&member)?;

    println!("\nStored state for {member}");
    if let Some(plan) = &plan {
        println!(
            "- current plan: {} ({})",
            plan.workout_plan.focus, plan.workout_plan.schedule
        );
    }
    println!("- score snapshots recorded: {}", history.len());
    for snapshot in &history {
        println!(
            "  - {} total {}",
            snapshot.recorded_at.format("%Y-%m-%d %H:%M:%S"),
            snapshot.scores.total_score()
        );
    }
    render_progress(&progress);

    if args.json {
        if let Some(outcome) = &last {
            print_json(outcome)?;
        }
    }
    Ok(())
}

fn demo_forms() -> [IntakeForm; 2] {
    [
        IntakeForm {
            age: 34,
            gender: Some("female".to_string()),
            weight_kg: 78.0,
            height_cm: 165.0,
            goal: "weight_loss".to_string(),
            activity_level: Some("moderate".to_string()),
            dietary_preferences: None,
        },
        IntakeForm {
            age: 34,
            gender: Some("female".to_string()),
            weight_kg: 72.0,
            height_cm: 165.0,
            goal: "endurance".to_string(),
            activity_level: Some("active".to_string()),
            dietary_preferences: Some("clean eating".to_string()),
        },
    ]
}

fn render_outcome(outcome: &PlanOutcome) {
    let plan = &outcome.plan;
    let scores = &plan.scores;
    let workout = &plan.workout_plan;
    let nutrition = &plan.nutrition_plan;

    println!("{}", plan.message());
    println!("\nScore breakdown (BMI {:.1})", scores.display_bmi());
    println!("- fitness: {}", scores.fitness_score());
    println!("- recovery: {}", scores.recovery_score());
    println!("- lifestyle: {}", scores.lifestyle_score());
    println!("- consistency: {}", scores.consistency_score());
    println!("- total: {}", scores.total_score());

    println!("\nWorkout: {} ({})", workout.focus, workout.schedule);
    for exercise in &workout.exercises {
        println!("  - {exercise}");
    }

    println!("\nNutrition: {} kcal/day", nutrition.calories);
    println!(
        "- macros: protein {} | carbs {} | fats {}",
        nutrition.macros.protein, nutrition.macros.carbs, nutrition.macros.fats
    );
    println!("- breakfast: {}", nutrition.meals.breakfast);
    println!("- lunch: {}", nutrition.meals.lunch);
    println!("- dinner: {}", nutrition.meals.dinner);
    println!("- snack: {}", nutrition.meals.snack);

    println!("\n+{} XP", outcome.xp_awarded);
    render_progress(&ProgressView::from(outcome.progress));
}

fn render_progress(progress: &ProgressView) {
    println!(
        "Level {} | {} XP | {} XP to level {} | health score {}",
        progress.level,
        progress.xp,
        progress.xp_to_next_level,
        progress.level.saturating_add(1),
        progress.health_score
    );
}

/// JSON shape shared with the `POST /api/v1/wellness/plan` response.
#[derive(Debug, Serialize)]
struct PlanReport<'a> {
    plan: &'a PlanRecord,
    progress: ProgressView,
    xp_awarded: u32,
}

fn print_json(outcome: &PlanOutcome) -> Result<(), AppError> {
    let report = PlanReport {
        plan: &outcome.plan,
        progress: ProgressView::from(outcome.progress),
        xp_awarded: outcome.xp_awarded,
    };
    let rendered = serde_json::to_string_pretty(&report).map_err(std::io::Error::from)?;
    println!("{rendered}");
    Ok(())
}
