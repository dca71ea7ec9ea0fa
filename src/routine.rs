//! Routine snapshot data model shared by the scoring engine, the
//! recommendation composer and the HTTP layer.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::deserializers::de_role_forgiving;
use crate::error::{DigitalTwinError, Result};

/// Who the routine belongs to; selects the rule set used in prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Role {
    #[default]
    Student,
    Professional,
}

impl Role {
    /// Uppercase the label and match it exactly; anything else is a student.
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(str::to_uppercase).as_deref() {
            Some("PROFESSIONAL") => Role::Professional,
            _ => Role::Student,
        }
    }

    /// Label used inside the prompt text
    pub fn prompt_label(self) -> &'static str {
        match self {
            Role::Student => "STUDENT",
            Role::Professional => "PROFESSIONAL",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prompt_label())
    }
}

/// One user's self-reported daily metrics.
///
/// Field names follow the camelCase JSON the clients send. Values are not
/// range-checked here; see [`RoutineSnapshot::validate_domain`] for the
/// opt-in strict check.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineSnapshot {
    pub sleep_hours: f64,
    /// Study or work hours
    pub study_hours: f64,
    pub screen_time: f64,
    /// 1 (lowest) to 5 (highest)
    pub mood: i64,
    #[serde(default, deserialize_with = "de_role_forgiving")]
    pub role: Role,
}

impl RoutineSnapshot {
    pub fn new(sleep_hours: f64, study_hours: f64, screen_time: f64, mood: i64) -> Self {
        Self {
            sleep_hours,
            study_hours,
            screen_time,
            mood,
            role: Role::Student,
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Reject negative hours and moods outside 1-5.
    pub fn validate_domain(&self) -> Result<()> {
        let hours = [
            ("sleepHours", self.sleep_hours),
            ("studyHours", self.study_hours),
            ("screenTime", self.screen_time),
        ];
        for (name, value) in hours {
            if value < 0.0 {
                return Err(DigitalTwinError::Validation {
                    message: format!("{name} cannot be negative (got {value})"),
                });
            }
        }
        if !(1..=5).contains(&self.mood) {
            return Err(DigitalTwinError::Validation {
                message: format!("mood must be between 1 and 5 (got {})", self.mood),
            });
        }
        Ok(())
    }
}

/// Coarse burnout classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        };
        f.write_str(s)
    }
}

/// Baseline and hypothetical routine to compare.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationRequest {
    pub current: RoutineSnapshot,
    pub changes: RoutineSnapshot,
}

impl SimulationRequest {
    pub fn validate_domain(&self) -> Result<()> {
        self.current.validate_domain()?;
        self.changes.validate_domain()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationResult {
    pub original_score: u8,
    pub new_score: u8,
    pub improvement: i32,
    pub new_risk: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub productivity_score: u8,
    pub burnout_risk: RiskLevel,
}
