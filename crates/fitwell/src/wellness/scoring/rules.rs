use super::super::domain::{ActivityLevel, Gender, Intake};

pub(crate) const FITNESS_BASE: i32 = 70;
pub(crate) const RECOVERY_BASE: i32 = 80;
pub(crate) const LIFESTYLE_BASE: i32 = 75;
/// Fresh plans carry no adherence history, so consistency starts from a fixed value.
pub(crate) const CONSISTENCY_NEW_PLAN: i32 = 85;

const HEALTHY_BMI: (f64, f64) = (18.5, 24.9);
const OVERWEIGHT_BMI: (f64, f64) = (25.0, 29.9);
const RECOGNIZED_DIETS: [&str; 4] = ["keto", "vegan", "paleo", "clean"];

pub(crate) fn body_mass_index(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Bands are closed on both ends; values between 24.9 and 25 fall through to the penalty.
fn bmi_adjustment(bmi: f64) -> i32 {
    if (HEALTHY_BMI.0..=HEALTHY_BMI.1).contains(&bmi) {
        15
    } else if (OVERWEIGHT_BMI.0..=OVERWEIGHT_BMI.1).contains(&bmi) {
        5
    } else {
        -5
    }
}

fn activity_adjustment(level: ActivityLevel) -> i32 {
    match level {
        ActivityLevel::Elite => 15,
        ActivityLevel::Active => 10,
        ActivityLevel::Moderate => 5,
        ActivityLevel::Sedentary => 0,
    }
}

pub(crate) fn fitness_score(bmi: f64, activity_level: ActivityLevel) -> u8 {
    clamp_score(FITNESS_BASE + bmi_adjustment(bmi) + activity_adjustment(activity_level))
}

pub(crate) fn recovery_score(age: u32, gender: Gender) -> u8 {
    let mut score = RECOVERY_BASE;
    if age < 30 {
        score += 10;
    } else if age > 50 {
        score -= 10;
    }
    if gender == Gender::Female {
        score += 5;
    }
    clamp_score(score)
}

pub(crate) fn lifestyle_score(dietary_preferences: &str) -> u8 {
    let diet = dietary_preferences.trim().to_lowercase();
    let mut score = LIFESTYLE_BASE;
    if RECOGNIZED_DIETS.iter().any(|keyword| diet.contains(keyword)) {
        score += 15;
    }
    if diet.is_empty() {
        score -= 5;
    }
    clamp_score(score)
}

pub(crate) fn consistency_score() -> u8 {
    clamp_score(CONSISTENCY_NEW_PLAN)
}

pub(crate) fn score_intake(intake: &Intake) -> (f64, [u8; 4]) {
    let bmi = body_mass_index(intake.weight_kg, intake.height_cm);
    let scores = [
        fitness_score(bmi, intake.activity_level),
        recovery_score(intake.age, intake.gender),
        lifestyle_score(intake.diet()),
        consistency_score(),
    ];
    (bmi, scores)
}

fn clamp_score(raw: i32) -> u8 {
    raw.clamp(0, 100) as u8
}
