//! Wellness scoring, plan generation, and XP leveling for FitWell members.
//!
//! The [`wellness`] module owns the computation; storage, identity, and transport are
//! collaborators that feed it intake data and persist what it produces.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod wellness;
