use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identity supplied by the identity collaborator; the engine never authenticates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const fn label(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl FromStr for Gender {
    type Err = IntakeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "other" => Ok(Self::Other),
            _ => Err(IntakeError::UnknownGender(value.to_string())),
        }
    }
}

/// Fitness goal driving template selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    WeightLoss,
    MuscleGain,
    Endurance,
    Maintenance,
}

impl Goal {
    pub const fn all() -> [Self; 4] {
        [
            Self::WeightLoss,
            Self::MuscleGain,
            Self::Endurance,
            Self::Maintenance,
        ]
    }

    /// Wire identifier, e.g. `weight_loss`.
    pub const fn label(self) -> &'static str {
        match self {
            Goal::WeightLoss => "weight_loss",
            Goal::MuscleGain => "muscle_gain",
            Goal::Endurance => "endurance",
            Goal::Maintenance => "maintenance",
        }
    }

    /// Human-readable form used in analysis messages.
    pub fn display_name(self) -> String {
        self.label().replace('_', " ")
    }
}

impl FromStr for Goal {
    type Err = IntakeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "weight_loss" => Ok(Self::WeightLoss),
            "muscle_gain" => Ok(Self::MuscleGain),
            "endurance" => Ok(Self::Endurance),
            "maintenance" => Ok(Self::Maintenance),
            _ => Err(IntakeError::UnknownGoal(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Moderate,
    Active,
    Elite,
}

impl ActivityLevel {
    pub const fn all() -> [Self; 4] {
        [Self::Sedentary, Self::Moderate, Self::Active, Self::Elite]
    }

    pub const fn label(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::Elite => "elite",
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = IntakeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sedentary" => Ok(Self::Sedentary),
            "moderate" => Ok(Self::Moderate),
            "active" => Ok(Self::Active),
            "elite" => Ok(Self::Elite),
            _ => Err(IntakeError::UnknownActivityLevel(value.to_string())),
        }
    }
}

/// Validated biometric and lifestyle answers for one plan request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intake {
    pub age: u32,
    pub gender: Gender,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub goal: Goal,
    pub activity_level: ActivityLevel,
    #[serde(default)]
    pub dietary_preferences: String,
}

impl Intake {
    /// Checks the numeric preconditions the score formula depends on.
    ///
    /// Typed intakes can be assembled directly, so the calculator re-runs this before
    /// dividing by height.
    pub fn validate(&self) -> Result<(), IntakeError> {
        if self.age == 0 {
            return Err(IntakeError::NonPositiveAge(0));
        }
        if !self.weight_kg.is_finite() || !self.height_cm.is_finite() {
            return Err(IntakeError::NonFiniteMeasurement);
        }
        if self.weight_kg <= 0.0 {
            return Err(IntakeError::NonPositiveWeight(self.weight_kg));
        }
        if self.height_cm <= 0.0 {
            return Err(IntakeError::NonPositiveHeight(self.height_cm));
        }
        Ok(())
    }

    /// Dietary preferences with surrounding whitespace removed.
    pub fn diet(&self) -> &str {
        self.dietary_preferences.trim()
    }
}

/// Raw questionnaire submission as received from the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeForm {
    pub age: i64,
    #[serde(default)]
    pub gender: Option<String>,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub goal: String,
    #[serde(default)]
    pub activity_level: Option<String>,
    #[serde(default)]
    pub dietary_preferences: Option<String>,
}

impl IntakeForm {
    /// Parse enum fields and check numeric bounds, producing a typed [`Intake`].
    ///
    /// Missing gender defaults to `male` and missing activity level to `moderate`.
    pub fn validate(self) -> Result<Intake, IntakeError> {
        let age = u32::try_from(self.age)
            .ok()
            .filter(|age| *age > 0)
            .ok_or(IntakeError::NonPositiveAge(self.age))?;

        let gender = match self.gender.as_deref() {
            Some(raw) => raw.parse()?,
            None => Gender::Male,
        };
        let goal = self.goal.parse()?;
        let activity_level = match self.activity_level.as_deref() {
            Some(raw) => raw.parse()?,
            None => ActivityLevel::Moderate,
        };

        let intake = Intake {
            age,
            gender,
            weight_kg: self.weight_kg,
            height_cm: self.height_cm,
            goal,
            activity_level,
            dietary_preferences: self.dietary_preferences.unwrap_or_default(),
        };
        intake.validate()?;
        Ok(intake)
    }
}

/// Malformed intake. Raised before any write and surfaced to the member untranslated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntakeError {
    #[error("age must be a positive number of years (got {0})")]
    NonPositiveAge(i64),
    #[error("weight_kg must be greater than zero (got {0})")]
    NonPositiveWeight(f64),
    #[error("height_cm must be greater than zero (got {0})")]
    NonPositiveHeight(f64),
    #[error("weight_kg and height_cm must be finite numbers")]
    NonFiniteMeasurement,
    #[error("unrecognized gender '{0}' (expected male, female, or other)")]
    UnknownGender(String),
    #[error(
        "unrecognized goal '{0}' (expected weight_loss, muscle_gain, endurance, or maintenance)"
    )]
    UnknownGoal(String),
    #[error(
        "unrecognized activity level '{0}' (expected sedentary, moderate, active, or elite)"
    )]
    UnknownActivityLevel(String),
}
