use serde::{Deserialize, Serialize};

/// Weights and awards the engine is constructed with. Passed in explicitly rather than
/// read from global settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub fitness_weight: f64,
    pub recovery_weight: f64,
    pub lifestyle_weight: f64,
    pub consistency_weight: f64,
    pub plan_creation_xp: u32,
}

impl EngineConfig {
    pub fn weight_sum(&self) -> f64 {
        self.fitness_weight + self.recovery_weight + self.lifestyle_weight + self.consistency_weight
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fitness_weight: 0.4,
            recovery_weight: 0.2,
            lifestyle_weight: 0.2,
            consistency_weight: 0.2,
            plan_creation_xp: 500,
        }
    }
}
