//! Core domain types for the Lift workout engine.
//!
//! This module defines the fundamental types used throughout the system:
//! - Experience levels, goals and training phases
//! - Catalog exercises and their modality
//! - Exercise history records
//! - Generated prescriptions
//! - The per-call user context

use crate::equipment::{EquipmentRequirement, Inventory};
use crate::split::SplitName;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Levels, Goals and Phases
// ============================================================================

/// Experience tier, stored in catalogs and profiles as "1".."4"
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    #[serde(rename = "1")]
    Beginner,
    #[serde(rename = "2")]
    Novice,
    #[serde(rename = "3")]
    Intermediate,
    #[serde(rename = "4")]
    Advanced,
}

impl Level {
    /// Load multiplier applied to a catalog lower bound when nothing else is known
    pub fn cold_start_multiplier(self) -> f64 {
        match self {
            Level::Beginner => 1.0,
            Level::Novice => 1.25,
            Level::Intermediate => 1.5,
            Level::Advanced => 2.0,
        }
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "1" | "beginner" => Ok(Level::Beginner),
            "2" | "novice" => Ok(Level::Novice),
            "3" | "intermediate" => Ok(Level::Intermediate),
            "4" | "advanced" => Ok(Level::Advanced),
            other => Err(Error::Config(format!("Unknown experience level: {}", other))),
        }
    }
}

/// Inclusive target rep range of a training phase
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RepRange {
    pub min: u32,
    pub max: u32,
}

impl RepRange {
    pub fn contains(&self, reps: u32) -> bool {
        self.min <= reps && reps <= self.max
    }
}

/// Goal-driven rep/rest regime
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Strength,
    Hypertrophy,
    Endurance,
}

impl Phase {
    pub fn target_reps(self) -> RepRange {
        match self {
            Phase::Strength => RepRange { min: 5, max: 8 },
            Phase::Hypertrophy => RepRange { min: 9, max: 12 },
            Phase::Endurance => RepRange { min: 13, max: 16 },
        }
    }

    /// Rest between sets, in minutes
    pub fn rest_minutes(self) -> u32 {
        match self {
            Phase::Strength => 2,
            Phase::Hypertrophy | Phase::Endurance => 1,
        }
    }

    /// Load step used by the weight progression
    pub fn weight_increment(self) -> f64 {
        10.0
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Strength => write!(f, "Strength"),
            Phase::Hypertrophy => write!(f, "Hypertrophy"),
            Phase::Endurance => write!(f, "Endurance"),
        }
    }
}

impl FromStr for Phase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "strength" => Ok(Phase::Strength),
            "hypertrophy" => Ok(Phase::Hypertrophy),
            "endurance" => Ok(Phase::Endurance),
            other => Err(Error::Config(format!("Unknown training phase: {}", other))),
        }
    }
}

/// User training goal
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub enum Goal {
    GetStronger,
    Powerlifting,
    Bodybuilding,
    BuildMuscles,
    Aesthetics,
    LosingWeight,
    GetLean,
    IncreaseEndurance,
}

impl Goal {
    pub const ALL: [Goal; 8] = [
        Goal::GetStronger,
        Goal::Powerlifting,
        Goal::Bodybuilding,
        Goal::BuildMuscles,
        Goal::Aesthetics,
        Goal::LosingWeight,
        Goal::GetLean,
        Goal::IncreaseEndurance,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Goal::GetStronger => "Get stronger",
            Goal::Powerlifting => "Powerlifting",
            Goal::Bodybuilding => "Bodybuilding",
            Goal::BuildMuscles => "Build muscles",
            Goal::Aesthetics => "Aesthetics",
            Goal::LosingWeight => "Losing weight",
            Goal::GetLean => "Get lean",
            Goal::IncreaseEndurance => "Increase endurance",
        }
    }

    pub fn phase(self) -> Phase {
        match self {
            Goal::GetStronger | Goal::Powerlifting => Phase::Strength,
            Goal::Bodybuilding
            | Goal::BuildMuscles
            | Goal::Aesthetics
            | Goal::LosingWeight
            | Goal::GetLean => Phase::Hypertrophy,
            Goal::IncreaseEndurance => Phase::Endurance,
        }
    }

    /// Exercise purpose tags this goal trains ("H" hypertrophy, "C" cardio, "AE" aerobic endurance)
    pub fn modalities(self) -> &'static [&'static str] {
        match self {
            Goal::LosingWeight | Goal::GetLean => &["H", "C"],
            Goal::IncreaseEndurance => &["H", "AE"],
            _ => &["H"],
        }
    }

    /// Goals that count as a strength focus when choosing a split
    pub fn is_strength_focus(self) -> bool {
        matches!(self, Goal::GetStronger | Goal::Powerlifting)
    }

    /// Goals that count as a muscle-building focus when choosing a split
    pub fn is_hypertrophy_focus(self) -> bool {
        matches!(self, Goal::Bodybuilding | Goal::BuildMuscles | Goal::GetLean)
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Goal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Goal::ALL
            .into_iter()
            .find(|g| g.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownGoal(wanted.to_string()))
    }
}

impl TryFrom<String> for Goal {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Goal> for String {
    fn from(goal: Goal) -> Self {
        goal.label().to_string()
    }
}

// ============================================================================
// Modality and Loads
// ============================================================================

/// How an exercise is loaded, inferred from its catalog lower bound
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Modality {
    #[serde(rename = "Gym Equipment")]
    GymEquipment,
    #[serde(rename = "Resistance Band")]
    ResistanceBand,
    #[serde(rename = "Timed Exercise")]
    Timed,
    Bodyweight,
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modality::GymEquipment => write!(f, "Gym Equipment"),
            Modality::ResistanceBand => write!(f, "Resistance Band"),
            Modality::Timed => write!(f, "Timed Exercise"),
            Modality::Bodyweight => write!(f, "Bodyweight"),
        }
    }
}

/// Resistance band level, lightest first
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BandLevel {
    #[serde(rename = "Extra Light")]
    ExtraLight,
    Light,
    Medium,
    Heavy,
    #[serde(rename = "Extra Heavy")]
    ExtraHeavy,
}

impl BandLevel {
    /// Full band vocabulary, lightest first
    pub const ALL: [BandLevel; 5] = [
        BandLevel::ExtraLight,
        BandLevel::Light,
        BandLevel::Medium,
        BandLevel::Heavy,
        BandLevel::ExtraHeavy,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BandLevel::ExtraLight => "Extra Light",
            BandLevel::Light => "Light",
            BandLevel::Medium => "Medium",
            BandLevel::Heavy => "Heavy",
            BandLevel::ExtraHeavy => "Extra Heavy",
        }
    }

    /// Position in [`BandLevel::ALL`]
    pub fn position(self) -> usize {
        self as usize
    }
}

impl fmt::Display for BandLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BandLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        BandLevel::ALL
            .into_iter()
            .find(|b| b.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::Other(format!("Unknown band level: {}", wanted)))
    }
}

/// A recorded or owned load: a numeric weight or a band level
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Load {
    Weight(f64),
    Band(BandLevel),
}

impl Load {
    pub fn weight(&self) -> Option<f64> {
        match self {
            Load::Weight(w) => Some(*w),
            Load::Band(_) => None,
        }
    }

    pub fn band(&self) -> Option<BandLevel> {
        match self {
            Load::Band(b) => Some(*b),
            Load::Weight(_) => None,
        }
    }

    /// Equality with a tolerance for float weights
    pub fn matches(&self, other: &Load) -> bool {
        match (self, other) {
            (Load::Weight(a), Load::Weight(b)) => same_weight(*a, *b),
            (Load::Band(a), Load::Band(b)) => a == b,
            _ => false,
        }
    }
}

/// Weights are compared with a small tolerance so that 23.5 * 2 == 47.0 holds
pub fn same_weight(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

/// Catalog lower bound: a weight, a time or band token, or nothing (bodyweight)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(untagged)]
pub enum LowerBound {
    Weight(f64),
    Text(String),
    #[default]
    None,
}

impl LowerBound {
    /// Classify the exercise modality. This is the only place modality is decided.
    pub fn modality(&self) -> Modality {
        match self {
            LowerBound::Weight(w) if *w > 0.0 => Modality::GymEquipment,
            LowerBound::Text(s) if is_time_token(s) => Modality::Timed,
            LowerBound::Text(s) if s.parse::<BandLevel>().is_ok() => Modality::ResistanceBand,
            _ => Modality::Bodyweight,
        }
    }

    pub fn weight(&self) -> Option<f64> {
        match self {
            LowerBound::Weight(w) if *w > 0.0 => Some(*w),
            _ => None,
        }
    }

    pub fn band(&self) -> Option<BandLevel> {
        match self {
            LowerBound::Text(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Duration in seconds for time tokens such as "30 seconds" or "1 minute"
    pub fn seconds(&self) -> Option<u32> {
        let LowerBound::Text(s) = self else {
            return None;
        };
        if !is_time_token(s) {
            return None;
        }
        let amount: f64 = s
            .split_whitespace()
            .find_map(|part| part.parse().ok())?;
        let seconds = if s.to_lowercase().contains("minute") {
            amount * 60.0
        } else {
            amount
        };
        (seconds >= 0.0).then(|| seconds.round() as u32)
    }
}

fn is_time_token(s: &str) -> bool {
    let lower = s.to_lowercase();
    lower.contains("second") || lower.contains("minute")
}

// ============================================================================
// Exercises
// ============================================================================

/// Compound movements are presented before isolation movements
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExerciseType {
    Compound,
    Isolation,
}

/// A catalog entry
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    #[serde(default)]
    pub main_muscles: BTreeSet<String>,
    #[serde(default)]
    pub secondary_muscles: BTreeSet<String>,
    #[serde(default)]
    pub equipment: EquipmentRequirement,
    #[serde(default)]
    pub level: BTreeSet<Level>,
    #[serde(default)]
    pub difficulty: u8,
    #[serde(default)]
    pub lower_bound: LowerBound,
    #[serde(default)]
    pub risk_level: u8,
    #[serde(default)]
    pub exercise_purpose: BTreeSet<String>,
    #[serde(default)]
    pub pain_exclusions: BTreeSet<String>,
    #[serde(default)]
    pub variations: Vec<String>,
    #[serde(default)]
    pub progression: Vec<String>,
    #[serde(default)]
    pub regression: Vec<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<ExerciseType>,
}

impl Exercise {
    pub fn modality(&self) -> Modality {
        self.lower_bound.modality()
    }

    pub fn trains(&self, muscle: &str) -> bool {
        self.main_muscles.contains(muscle)
    }
}

// ============================================================================
// History
// ============================================================================

/// One completed set-group of an exercise on one occasion
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseRecord {
    pub phase: Phase,
    #[serde(default)]
    pub weight: Option<Load>,
    #[serde(default)]
    pub reps: Vec<u32>,
    #[serde(default, alias = "time")]
    pub times: Vec<u32>,
}

impl ExerciseRecord {
    pub fn total_reps(&self) -> u32 {
        self.reps.iter().sum()
    }

    /// Mean reps per set, rounded to the nearest integer
    pub fn average_reps(&self) -> Option<u32> {
        if self.reps.is_empty() {
            return None;
        }
        Some((self.total_reps() as f64 / self.reps.len() as f64).round() as u32)
    }

    /// Mean reps per set, rounded down
    pub fn average_reps_floor(&self) -> Option<u32> {
        if self.reps.is_empty() {
            return None;
        }
        Some(self.total_reps() / self.reps.len() as u32)
    }

    pub fn min_reps(&self) -> Option<u32> {
        self.reps.iter().copied().min()
    }

    /// Mean seconds per set, rounded down
    pub fn average_time_floor(&self) -> Option<u32> {
        if self.times.is_empty() {
            return None;
        }
        Some(self.times.iter().sum::<u32>() / self.times.len() as u32)
    }

    pub fn weight_value(&self) -> Option<f64> {
        self.weight.and_then(|w| w.weight())
    }

    pub fn band(&self) -> Option<BandLevel> {
        self.weight.and_then(|w| w.band())
    }
}

// ============================================================================
// Output
// ============================================================================

/// Prescribed intensity, one variant per modality.
///
/// `None` loads mean the value could not be resolved against the user's
/// equipment and should be shown as not available.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "modality")]
pub enum Prescription {
    #[serde(rename = "Gym Equipment")]
    Gym { weight: Option<f64>, reps: u32 },
    #[serde(rename = "Resistance Band")]
    Band { level: Option<BandLevel>, reps: u32 },
    #[serde(rename = "Bodyweight")]
    Bodyweight { reps: u32 },
    #[serde(rename = "Timed Exercise")]
    Timed { seconds: Option<u32> },
}

impl Prescription {
    pub fn modality(&self) -> Modality {
        match self {
            Prescription::Gym { .. } => Modality::GymEquipment,
            Prescription::Band { .. } => Modality::ResistanceBand,
            Prescription::Bodyweight { .. } => Modality::Bodyweight,
            Prescription::Timed { .. } => Modality::Timed,
        }
    }

    pub fn reps(&self) -> Option<u32> {
        match self {
            Prescription::Gym { reps, .. }
            | Prescription::Band { reps, .. }
            | Prescription::Bodyweight { reps } => Some(*reps),
            Prescription::Timed { .. } => None,
        }
    }
}

/// Which branch of the intensity engine produced a prescription
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntensityBasis {
    /// Progressive overload on records from the current phase
    Progression,
    /// Rep-max conversion of a record from another phase
    RepMaxEstimate,
    /// Transfer from a variation the user has history for
    SimilarExercise { name: String },
    /// Catalog lower bound, experience multiplier or phase start values
    ColdStart,
    /// Catalog data could not be interpreted
    Fallback,
}

/// One exercise of a generated workout
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GeneratedExercise {
    pub name: String,
    /// Target muscle the exercise was selected for
    pub muscle: String,
    pub prescription: Prescription,
    pub basis: IntensityBasis,
}

impl GeneratedExercise {
    pub fn modality(&self) -> Modality {
        self.prescription.modality()
    }
}

// ============================================================================
// User Context
// ============================================================================

/// Soft and hard exercise preferences
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub favorites: BTreeSet<String>,
    #[serde(default)]
    pub suggest_less: BTreeSet<String>,
    #[serde(default)]
    pub do_not_show: BTreeSet<String>,
}

/// Weekly availability used by the split planner
#[derive(Clone, Debug, Default)]
pub struct Schedule {
    /// Available weekdays, 1 = Monday .. 7 = Sunday
    pub days: Vec<u8>,
    pub frequency: u32,
    pub session_minutes: u32,
}

/// Everything the engine knows about the user for one generation call
#[derive(Clone, Debug)]
pub struct UserContext {
    pub age: u32,
    pub level: Level,
    /// Ordered; the first occurrence of each phase fixes the phase cycle order
    pub goals: Vec<Goal>,
    pub pain_points: BTreeSet<String>,
    pub priority_muscles: BTreeSet<String>,
    pub inventory: Inventory,
    pub preferences: Preferences,
    pub schedule: Schedule,
    /// Fixed split; when absent the planner recommends one from the schedule
    pub split: Option<SplitName>,
    /// Number of workouts the user has generated so far
    pub workout_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modality_classification() {
        assert_eq!(LowerBound::Weight(20.0).modality(), Modality::GymEquipment);
        assert_eq!(LowerBound::Weight(0.0).modality(), Modality::Bodyweight);
        assert_eq!(
            LowerBound::Text("30 seconds".into()).modality(),
            Modality::Timed
        );
        assert_eq!(
            LowerBound::Text("Extra Heavy".into()).modality(),
            Modality::ResistanceBand
        );
        assert_eq!(
            LowerBound::Text("Purple".into()).modality(),
            Modality::Bodyweight
        );
        assert_eq!(LowerBound::None.modality(), Modality::Bodyweight);
    }

    #[test]
    fn test_lower_bound_seconds() {
        assert_eq!(LowerBound::Text("30 seconds".into()).seconds(), Some(30));
        assert_eq!(LowerBound::Text("1 minute".into()).seconds(), Some(60));
        assert_eq!(LowerBound::Text("some seconds".into()).seconds(), None);
        assert_eq!(LowerBound::Weight(30.0).seconds(), None);
    }

    #[test]
    fn test_lower_bound_deserializes_all_shapes() {
        let parsed: Vec<LowerBound> =
            serde_json::from_str(r#"[12.5, "Medium", "45 seconds", null]"#).unwrap();
        assert_eq!(parsed[0], LowerBound::Weight(12.5));
        assert_eq!(parsed[1].band(), Some(BandLevel::Medium));
        assert_eq!(parsed[2].seconds(), Some(45));
        assert_eq!(parsed[3], LowerBound::None);
    }

    #[test]
    fn test_goal_parsing_is_case_insensitive() {
        assert_eq!("get STRONGER".parse::<Goal>().unwrap(), Goal::GetStronger);
        assert_eq!("Build Muscles".parse::<Goal>().unwrap(), Goal::BuildMuscles);
        assert!(matches!(
            "Be happy".parse::<Goal>(),
            Err(Error::UnknownGoal(_))
        ));
    }

    #[test]
    fn test_every_goal_has_phase_and_modality() {
        for goal in Goal::ALL {
            assert!(!goal.modalities().is_empty(), "{} has no modality", goal);
            let _ = goal.phase();
        }
    }

    #[test]
    fn test_record_averages() {
        let record = ExerciseRecord {
            phase: Phase::Hypertrophy,
            weight: Some(Load::Weight(100.0)),
            reps: vec![10, 11, 11],
            times: vec![],
        };
        assert_eq!(record.average_reps(), Some(11));
        assert_eq!(record.average_reps_floor(), Some(10));
        assert_eq!(record.min_reps(), Some(10));
        assert_eq!(record.weight_value(), Some(100.0));
        assert_eq!(record.band(), None);
    }

    #[test]
    fn test_record_deserializes_band_and_time_alias() {
        let json = r#"{"phase":"Endurance","weight":"Heavy","reps":[12],"time":[30,35]}"#;
        let record: ExerciseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.band(), Some(BandLevel::Heavy));
        assert_eq!(record.average_time_floor(), Some(32));
    }

    #[test]
    fn test_prescription_serializes_with_modality_tag() {
        let p = Prescription::Gym {
            weight: Some(50.0),
            reps: 10,
        };
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["modality"], "Gym Equipment");
        assert_eq!(json["weight"], 50.0);
    }
}
