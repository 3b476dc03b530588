//! User profile loader.
//!
//! A profile is a JSON file describing the user: birthdate or age, level,
//! goals, schedule, equipment rows and preferences. It is converted into the
//! [`UserContext`] the generator consumes.

use crate::equipment::{EquipmentRow, Inventory};
use crate::split::SplitName;
use crate::types::{Goal, Level, Preferences, Schedule, UserContext};
use crate::{Error, Result};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Weekday given as 1-7 (Monday = 1) or a name such as "Tue" or "friday"
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum DaySpec {
    Number(u8),
    Name(String),
}

impl DaySpec {
    pub fn to_weekday_number(&self) -> Result<u8> {
        match self {
            DaySpec::Number(n) if (1..=7).contains(n) => Ok(*n),
            DaySpec::Number(n) => Err(Error::Config(format!(
                "weekday number must be 1-7, got {}",
                n
            ))),
            DaySpec::Name(name) => parse_weekday(name),
        }
    }
}

/// Parse a weekday name into 1 (Monday) .. 7 (Sunday)
pub fn parse_weekday(name: &str) -> Result<u8> {
    name.trim()
        .parse::<Weekday>()
        .map(|day| day.number_from_monday() as u8)
        .map_err(|_| Error::Config(format!("Unknown weekday: {}", name)))
}

/// Whole years between `birthdate` and `today`
pub fn age_on(birthdate: NaiveDate, today: NaiveDate) -> u32 {
    let mut years = today.year() - birthdate.year();
    if (today.month(), today.day()) < (birthdate.month(), birthdate.day()) {
        years -= 1;
    }
    years.max(0) as u32
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub birthdate: Option<NaiveDate>,
    /// Used only when no birthdate is given
    #[serde(default)]
    pub age: Option<u32>,
    pub level: Level,
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub pain_points: BTreeSet<String>,
    #[serde(default)]
    pub priority_muscles: BTreeSet<String>,
    #[serde(default)]
    pub days: Vec<DaySpec>,
    #[serde(default)]
    pub frequency: u32,
    #[serde(default = "default_session_minutes")]
    pub session_minutes: u32,
    #[serde(default)]
    pub equipment: Vec<EquipmentRow>,
    #[serde(flatten)]
    pub preferences: Preferences,
    #[serde(default)]
    pub split: Option<SplitName>,
    #[serde(default)]
    pub workout_count: u64,
}

fn default_session_minutes() -> u32 {
    60
}

impl UserProfile {
    /// Load a profile from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let profile: UserProfile = serde_json::from_str(&contents)?;
        tracing::info!(
            "Loaded profile from {:?} ({} goals, {} equipment rows)",
            path,
            profile.goals.len(),
            profile.equipment.len()
        );
        Ok(profile)
    }

    /// Build the generator context, computing age as of `today`
    pub fn to_context(&self, today: NaiveDate) -> Result<UserContext> {
        let age = match (self.birthdate, self.age) {
            (Some(birthdate), _) => age_on(birthdate, today),
            (None, Some(age)) => age,
            (None, None) => {
                return Err(Error::Config(
                    "profile needs a birthdate or an age".into(),
                ))
            }
        };

        let days = self
            .days
            .iter()
            .map(DaySpec::to_weekday_number)
            .collect::<Result<Vec<_>>>()?;

        Ok(UserContext {
            age,
            level: self.level,
            goals: self.goals.clone(),
            pain_points: self.pain_points.clone(),
            priority_muscles: self.priority_muscles.clone(),
            inventory: Inventory::from_rows(&self.equipment),
            preferences: self.preferences.clone(),
            schedule: Schedule {
                frequency: if self.frequency == 0 {
                    days.len() as u32
                } else {
                    self.frequency
                },
                days,
                session_minutes: self.session_minutes,
            },
            split: self.split,
            workout_count: self.workout_count,
        })
    }
}
