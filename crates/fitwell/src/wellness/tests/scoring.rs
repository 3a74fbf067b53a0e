use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::wellness::domain::{ActivityLevel, Gender, Goal, Intake};
use crate::wellness::plan::{HealthScoreSnapshot, PlanRecord};
use crate::wellness::scoring::{EngineConfig, ScoreBreakdown, ScoreCalculator, SubScores};

fn intake(
    age: u32,
    gender: Gender,
    weight_kg: f64,
    height_cm: f64,
    activity_level: ActivityLevel,
    diet: &str,
) -> Intake {
    Intake {
        age,
        gender,
        weight_kg,
        height_cm,
        goal: Goal::Maintenance,
        activity_level,
        dietary_preferences: diet.to_string(),
    }
}

#[test]
fn reference_members_score_as_expected() {
    let calculator = ScoreCalculator::default();
    let cases = [
        (
            intake(25, Gender::Male, 70.0, 175.0, ActivityLevel::Active, "keto"),
            22.9,
            [95, 90, 90, 85],
            91,
        ),
        (
            intake(55, Gender::Female, 90.0, 170.0, ActivityLevel::Sedentary, ""),
            31.1,
            [65, 75, 70, 85],
            72,
        ),
        (
            intake(40, Gender::Other, 80.0, 180.0, ActivityLevel::Moderate, "mediterranean"),
            24.7,
            [90, 80, 75, 85],
            84,
        ),
        (
            intake(30, Gender::Female, 60.0, 165.0, ActivityLevel::Elite, "Vegan, clean eating"),
            22.0,
            [100, 85, 90, 85],
            92,
        ),
        (
            intake(50, Gender::Male, 85.0, 175.0, ActivityLevel::Active, "paleo"),
            27.8,
            [85, 80, 90, 85],
            85,
        ),
        (
            intake(51, Gender::Male, 100.0, 175.0, ActivityLevel::Sedentary, "none"),
            32.7,
            [65, 70, 75, 85],
            72,
        ),
    ];

    for (intake, bmi, [fitness, recovery, lifestyle, consistency], total) in cases {
        let scores = calculator.compute(&intake).expect("valid intake");
        assert_eq!(scores.display_bmi(), bmi, "{intake:?}");
        assert_eq!(
            scores.sub_scores(),
            SubScores {
                fitness,
                recovery,
                lifestyle,
                consistency,
            },
            "{intake:?}"
        );
        assert_eq!(scores.total_score(), total, "{intake:?}");
    }
}

#[test]
fn bmi_just_under_overweight_band_takes_the_penalty() {
    // 76.5 kg at 175 cm is BMI 24.98, between the healthy and overweight bands.
    let scores = ScoreCalculator::default()
        .compute(&intake(40, Gender::Other, 76.5, 175.0, ActivityLevel::Sedentary, ""))
        .expect("valid intake");

    assert_eq!(scores.display_bmi(), 25.0);
    assert_eq!(scores.fitness_score(), 65);
    assert_eq!(scores.total_score(), 73);
}

#[test]
fn weighted_total_truncates_instead_of_rounding() {
    let calculator = ScoreCalculator::new(EngineConfig {
        fitness_weight: 0.35,
        recovery_weight: 0.25,
        lifestyle_weight: 0.2,
        consistency_weight: 0.2,
        ..EngineConfig::default()
    });
    let scores = SubScores {
        fitness: 95,
        recovery: 90,
        lifestyle: 90,
        consistency: 85,
    };

    // 33.25 + 22.5 + 18 + 17 = 90.75
    assert_eq!(calculator.weighted_total(scores), 90);
}

#[test]
fn total_matches_weighted_formula_for_every_category_combination() {
    let config = EngineConfig::default();
    let calculator = ScoreCalculator::new(config.clone());
    let bodies = [(45.0, 170.0), (60.0, 170.0), (80.0, 170.0), (120.0, 170.0)];
    let ages = [18, 29, 30, 50, 51, 90];
    let genders = [Gender::Male, Gender::Female, Gender::Other];
    let diets = ["", "keto", "vegetarian", "  CLEAN  "];

    for (weight_kg, height_cm) in bodies {
        for age in ages {
            for gender in genders {
                for activity_level in ActivityLevel::all() {
                    for diet in diets {
                        let intake =
                            intake(age, gender, weight_kg, height_cm, activity_level, diet);
                        let scores = calculator.compute(&intake).expect("valid intake");

                        for sub in [
                            scores.fitness_score(),
                            scores.recovery_score(),
                            scores.lifestyle_score(),
                            scores.consistency_score(),
                        ] {
                            assert!(sub <= 100, "{intake:?}");
                        }

                        let expected = (f64::from(scores.fitness_score()) * config.fitness_weight
                            + f64::from(scores.recovery_score()) * config.recovery_weight
                            + f64::from(scores.lifestyle_score()) * config.lifestyle_weight
                            + f64::from(scores.consistency_score())
                                * config.consistency_weight)
                            .trunc() as u8;
                        assert_eq!(scores.total_score(), expected, "{intake:?}");
                        assert_eq!(calculator.compute(&intake), Ok(scores));
                    }
                }
            }
        }
    }
}

/// Resolves to `true` only when `T` can be built from serialized input.
struct Deserializable<T>(PhantomData<T>);

trait Fallback {
    const ACCEPTED: bool = false;
}

impl<T> Fallback for T {}

impl<T: DeserializeOwned> Deserializable<T> {
    const ACCEPTED: bool = true;
}

#[test]
fn score_carrying_records_cannot_be_built_from_serialized_input() {
    assert!(Deserializable::<SubScores>::ACCEPTED);

    assert!(!Deserializable::<ScoreBreakdown>::ACCEPTED);
    assert!(!Deserializable::<HealthScoreSnapshot>::ACCEPTED);
    assert!(!Deserializable::<PlanRecord>::ACCEPTED);
}

#[test]
fn serialized_breakdown_exposes_total_with_sub_scores() {
    let scores = ScoreCalculator::default()
        .compute(&intake(25, Gender::Male, 70.0, 175.0, ActivityLevel::Active, "keto"))
        .expect("valid intake");
    let value = serde_json::to_value(scores).expect("serializes");

    assert_eq!(value["fitness_score"], 95);
    assert_eq!(value["total_score"], 91);
}
