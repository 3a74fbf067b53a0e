mod config;
mod rules;

pub use config::EngineConfig;

use super::domain::{Intake, IntakeError};
use serde::{Deserialize, Serialize};

/// The four weighted components of the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubScores {
    pub fitness: u8,
    pub recovery: u8,
    pub lifestyle: u8,
    pub consistency: u8,
}

/// Derived, immutable result of scoring one intake.
///
/// `total_score` is computed from the sub-scores at construction and cannot be set on its own.
/// Only [`ScoreCalculator::compute`] builds one, so the type is serialize-only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    bmi: f64,
    fitness_score: u8,
    recovery_score: u8,
    lifestyle_score: u8,
    consistency_score: u8,
    total_score: u8,
}

impl ScoreBreakdown {
    pub fn bmi(&self) -> f64 {
        self.bmi
    }

    /// BMI rounded to one decimal place for display. Exact halves round to even.
    pub fn display_bmi(&self) -> f64 {
        round_half_even_tenths(self.bmi)
    }

    pub fn fitness_score(&self) -> u8 {
        self.fitness_score
    }

    pub fn recovery_score(&self) -> u8 {
        self.recovery_score
    }

    pub fn lifestyle_score(&self) -> u8 {
        self.lifestyle_score
    }

    pub fn consistency_score(&self) -> u8 {
        self.consistency_score
    }

    pub fn total_score(&self) -> u8 {
        self.total_score
    }

    pub fn sub_scores(&self) -> SubScores {
        SubScores {
            fitness: self.fitness_score,
            recovery: self.recovery_score,
            lifestyle: self.lifestyle_score,
            consistency: self.consistency_score,
        }
    }
}

/// Stateless calculator applying the configured weights to an intake.
#[derive(Debug, Clone)]
pub struct ScoreCalculator {
    config: EngineConfig,
}

impl ScoreCalculator {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Score an intake. Non-positive height or weight is rejected before the BMI division.
    pub fn compute(&self, intake: &Intake) -> Result<ScoreBreakdown, IntakeError> {
        intake.validate()?;

        let (bmi, [fitness, recovery, lifestyle, consistency]) = rules::score_intake(intake);
        let total_score = self.weighted_total(SubScores {
            fitness,
            recovery,
            lifestyle,
            consistency,
        });

        Ok(ScoreBreakdown {
            bmi,
            fitness_score: fitness,
            recovery_score: recovery,
            lifestyle_score: lifestyle,
            consistency_score: consistency,
            total_score,
        })
    }

    /// Weighted sum cast to an integer: truncated, never rounded.
    pub fn weighted_total(&self, scores: SubScores) -> u8 {
        let weighted = f64::from(scores.fitness) * self.config.fitness_weight
            + f64::from(scores.recovery) * self.config.recovery_weight
            + f64::from(scores.lifestyle) * self.config.lifestyle_weight
            + f64::from(scores.consistency) * self.config.consistency_weight;

        weighted.trunc().clamp(0.0, 100.0) as u8
    }
}

fn round_half_even_tenths(value: f64) -> f64 {
    let scaled = value * 10.0;
    let mut rounded = scaled.round();
    if scaled.fract().abs() == 0.5 && rounded % 2.0 != 0.0 {
        rounded -= scaled.signum();
    }
    rounded / 10.0
}

impl Default for ScoreCalculator {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
