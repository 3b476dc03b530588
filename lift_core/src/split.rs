//! Training splits and the split planner.
//!
//! Split tables are immutable statics: each split is an ordered list of day
//! groups, and each day group carries its target muscles with a focus range
//! and a sampling probability per muscle.

use crate::types::{Goal, Level};
use crate::{Error, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Fixed split vocabulary
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub enum SplitName {
    FullBody,
    UpperLower,
    PushPullLegs,
    Phul,
    HybridPplUpperLower,
    BodyPart,
    SixDayBodyPart,
    PplActiveRest,
}

impl SplitName {
    pub const ALL: [SplitName; 8] = [
        SplitName::FullBody,
        SplitName::UpperLower,
        SplitName::PushPullLegs,
        SplitName::Phul,
        SplitName::HybridPplUpperLower,
        SplitName::BodyPart,
        SplitName::SixDayBodyPart,
        SplitName::PplActiveRest,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SplitName::FullBody => "Full-Body",
            SplitName::UpperLower => "Upper-Lower",
            SplitName::PushPullLegs => "Push-Pull-Legs",
            SplitName::Phul => "Power Hypertrophy Upper Lower",
            SplitName::HybridPplUpperLower => "Hybrid PPL + Upper-Lower",
            SplitName::BodyPart => "Body Part Split",
            SplitName::SixDayBodyPart => "6-Day Body Part Split",
            SplitName::PplActiveRest => "Push-Pull-Legs + Active Rest",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            SplitName::FullBody => &["full body"],
            SplitName::UpperLower => &["upper lower"],
            SplitName::PushPullLegs => &["ppl", "push pull legs"],
            SplitName::Phul => &["phul", "power-hypertrophy-upper-lower"],
            SplitName::HybridPplUpperLower => &["hybrid", "hybrid ppl+upper-lower"],
            SplitName::BodyPart => &["body-part-split"],
            SplitName::SixDayBodyPart => &["6-day-body-part-split"],
            SplitName::PplActiveRest => &["ppl+active-rest", "ppl + active rest"],
        }
    }

    /// Static table for this split
    pub fn split(self) -> &'static Split {
        &SPLITS[&self]
    }
}

impl fmt::Display for SplitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SplitName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        SplitName::ALL
            .into_iter()
            .find(|name| {
                name.label().eq_ignore_ascii_case(wanted)
                    || name
                        .aliases()
                        .iter()
                        .any(|alias| alias.eq_ignore_ascii_case(wanted))
            })
            .ok_or_else(|| Error::UnknownSplit(wanted.to_string()))
    }
}

impl TryFrom<String> for SplitName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<SplitName> for String {
    fn from(name: SplitName) -> Self {
        name.label().to_string()
    }
}

// ============================================================================
// Split tables
// ============================================================================

/// Target muscle of a day group
#[derive(Clone, Debug, PartialEq)]
pub struct MuscleTarget {
    pub muscle: &'static str,
    /// Share of the session this muscle should take, (min, max)
    pub focus: (f64, f64),
    pub probability: f64,
}

/// One day of a split
#[derive(Clone, Debug)]
pub struct DayGroup {
    pub label: &'static str,
    pub targets: Vec<MuscleTarget>,
}

impl DayGroup {
    pub fn muscles(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.targets.iter().map(|t| t.muscle)
    }
}

#[derive(Clone, Debug)]
pub struct Split {
    pub name: SplitName,
    pub groups: Vec<DayGroup>,
}

type Row = (&'static str, (f64, f64), f64);

fn group(label: &'static str, rows: &[Row]) -> DayGroup {
    DayGroup {
        label,
        targets: rows
            .iter()
            .map(|&(muscle, (lo, hi), probability)| MuscleTarget {
                muscle,
                focus: (lo, hi.max(lo)),
                probability,
            })
            .collect(),
    }
}

const FULL_BODY: &[Row] = &[
    ("Chest", (0.2, 0.3), 0.19),
    ("Back", (0.2, 0.3), 0.19),
    ("Shoulders", (0.1, 0.2), 0.05),
    ("Quads", (0.2, 0.3), 0.19),
    ("Hamstrings", (0.2, 0.3), 0.09),
    ("Triceps", (0.0, 0.1), 0.03),
    ("Biceps", (0.0, 0.1), 0.03),
    ("Trapezius", (0.0, 0.1), 0.03),
    ("Lower back", (0.0, 0.1), 0.02),
    ("Obliques", (0.0, 0.1), 0.02),
    ("Abs", (0.0, 0.1), 0.02),
    ("Glutes", (0.1, 0.2), 0.03),
    ("Abductors", (0.0, 0.1), 0.03),
    ("Adductors", (0.0, 0.1), 0.03),
    ("Calves", (0.0, 0.1), 0.02),
];

const UPPER: &[Row] = &[
    ("Chest", (0.2, 0.35), 0.25),
    ("Shoulders", (0.1, 0.2), 0.14),
    ("Triceps", (0.0, 0.15), 0.08),
    ("Back", (0.2, 0.35), 0.25),
    ("Biceps", (0.0, 0.15), 0.08),
    ("Trapezius", (0.0, 0.1), 0.05),
    ("Lower back", (0.0, 0.1), 0.03),
    ("Obliques", (0.0, 0.1), 0.03),
    ("Abs", (0.0, 0.1), 0.09),
];

const LOWER: &[Row] = &[
    ("Quads", (0.3, 0.4), 0.3),
    ("Glutes", (0.2, 0.3), 0.2),
    ("Hamstrings", (0.2, 0.3), 0.3),
    ("Abductors", (0.05, 0.1), 0.05),
    ("Adductors", (0.05, 0.1), 0.05),
    ("Calves", (0.1, 0.15), 0.1),
];

const PHUL_UPPER: &[Row] = &[
    ("Chest", (0.2, 0.3), 0.24),
    ("Shoulders", (0.1, 0.2), 0.16),
    ("Triceps", (0.1, 0.15), 0.08),
    ("Back", (0.2, 0.3), 0.24),
    ("Biceps", (0.1, 0.15), 0.08),
    ("Trapezius", (0.1, 0.15), 0.05),
    ("Lower back", (0.05, 0.1), 0.03),
    ("Obliques", (0.05, 0.1), 0.03),
    ("Abs", (0.05, 0.1), 0.09),
];

const PUSH: &[Row] = &[
    ("Chest", (0.4, 0.6), 0.5),
    ("Shoulders", (0.2, 0.4), 0.3),
    ("Triceps", (0.2, 0.4), 0.2),
];

const PULL: &[Row] = &[
    ("Back", (0.4, 0.6), 0.5),
    ("Biceps", (0.1, 0.3), 0.2),
    ("Trapezius", (0.1, 0.2), 0.13),
    ("Abs", (0.1, 0.3), 0.12),
    ("Obliques", (0.05, 0.1), 0.05),
];

const LEGS: &[Row] = &[
    ("Quads", (0.3, 0.4), 0.24),
    ("Glutes", (0.2, 0.3), 0.2),
    ("Hamstrings", (0.2, 0.3), 0.24),
    ("Abductors", (0.05, 0.1), 0.08),
    ("Adductors", (0.05, 0.1), 0.08),
    ("Calves", (0.1, 0.15), 0.1),
    ("Lower back", (0.05, 0.1), 0.06),
];

const LEGS_NO_LOWER_BACK: &[Row] = &[
    ("Quads", (0.3, 0.4), 0.3),
    ("Glutes", (0.2, 0.3), 0.2),
    ("Hamstrings", (0.2, 0.3), 0.3),
    ("Abductors", (0.05, 0.1), 0.05),
    ("Adductors", (0.05, 0.1), 0.05),
    ("Calves", (0.1, 0.15), 0.1),
];

const CHEST_DAY: &[Row] = &[("Chest", (0.8, 1.0), 1.0)];

const BACK_DAY: &[Row] = &[("Back", (0.7, 0.9), 0.8), ("Trapezius", (0.1, 0.3), 0.2)];

const SHOULDERS_CORE_DAY: &[Row] = &[
    ("Shoulders", (0.6, 0.8), 0.7),
    ("Abs", (0.2, 0.4), 0.2),
    ("Obliques", (0.05, 0.2), 0.1),
];

const SHOULDERS_DAY: &[Row] = &[("Shoulders", (0.8, 1.0), 1.0)];

const CORE_DAY: &[Row] = &[
    ("Abs", (0.6, 0.7), 0.7),
    ("Obliques", (0.2, 0.3), 0.2),
    ("Lower back", (0.2, 0.3), 0.1),
];

const ARMS_DAY: &[Row] = &[("Biceps", (0.4, 0.6), 0.5), ("Triceps", (0.4, 0.6), 0.5)];

const ACTIVE_REST: &[Row] = &[
    ("Abs", (0.3, 0.5), 0.4),
    ("Obliques", (0.2, 0.3), 0.3),
    ("Lower back", (0.2, 0.3), 0.3),
];

static SPLITS: Lazy<BTreeMap<SplitName, Split>> = Lazy::new(|| {
    let table = [
        (SplitName::FullBody, vec![group("Full Body", FULL_BODY)]),
        (
            SplitName::UpperLower,
            vec![group("Upper", UPPER), group("Lower", LOWER)],
        ),
        (
            SplitName::PushPullLegs,
            vec![group("Push", PUSH), group("Pull", PULL), group("Legs", LEGS)],
        ),
        (
            SplitName::Phul,
            vec![
                group("Power Upper", PHUL_UPPER),
                group("Power Lower", LOWER),
                group("Hypertrophy Upper", PHUL_UPPER),
                group("Hypertrophy Lower", LOWER),
            ],
        ),
        (
            SplitName::HybridPplUpperLower,
            vec![
                group("Push", PUSH),
                group("Pull", PULL),
                group("Legs", LEGS),
                group("Upper", PHUL_UPPER),
                group("Lower", LOWER),
            ],
        ),
        (
            SplitName::BodyPart,
            vec![
                group("Chest", CHEST_DAY),
                group("Back", BACK_DAY),
                group("Legs", LEGS),
                group("Shoulders & Core", SHOULDERS_CORE_DAY),
                group("Arms", ARMS_DAY),
            ],
        ),
        (
            SplitName::SixDayBodyPart,
            vec![
                group("Chest", CHEST_DAY),
                group("Back", BACK_DAY),
                group("Legs", LEGS_NO_LOWER_BACK),
                group("Core", CORE_DAY),
                group("Shoulders", SHOULDERS_DAY),
                group("Arms", ARMS_DAY),
            ],
        ),
        (
            SplitName::PplActiveRest,
            vec![
                group("Push", PUSH),
                group("Pull", PULL),
                group("Legs", LEGS),
                group("Active Rest", ACTIVE_REST),
            ],
        ),
    ];

    table
        .into_iter()
        .map(|(name, groups)| (name, Split { name, groups }))
        .collect()
});

// ============================================================================
// Split planner
// ============================================================================

/// Schedule, level and goal inputs of the split planner
#[derive(Clone, Debug)]
pub struct PlannerInputs<'a> {
    /// Available weekdays, 1 = Monday .. 7 = Sunday
    pub days: &'a [u8],
    pub frequency: u32,
    pub session_minutes: u32,
    pub level: Level,
    pub goals: &'a [Goal],
}

/// Pick a split from schedule, level and goals. Total and deterministic.
pub fn recommend_split(inputs: &PlannerInputs<'_>) -> SplitName {
    let mut days: Vec<u8> = inputs
        .days
        .iter()
        .copied()
        .filter(|d| (1..=7).contains(d))
        .collect();
    days.sort_unstable();
    days.dedup();

    let strength = inputs.goals.iter().any(|g| g.is_strength_focus());
    let hypertrophy = inputs.goals.iter().any(|g| g.is_hypertrophy_focus());
    let minutes = inputs.session_minutes;

    let split = match inputs.frequency {
        0 | 1 => SplitName::FullBody,
        2 => {
            if two_days_apart(&days, 3) && inputs.level >= Level::Beginner {
                SplitName::FullBody
            } else if two_days_apart(&days, 2) && inputs.level >= Level::Novice {
                SplitName::FullBody
            } else {
                SplitName::UpperLower
            }
        }
        3 => {
            if three_day_upper_lower(&days) && minutes > 45 {
                SplitName::UpperLower
            } else if three_day_full_body(&days) && minutes <= 45 {
                SplitName::FullBody
            } else {
                SplitName::PushPullLegs
            }
        }
        4 => {
            let spaced = four_day_upper_lower(&days);
            if strength && hypertrophy && spaced {
                SplitName::Phul
            } else if spaced {
                SplitName::UpperLower
            } else {
                SplitName::PushPullLegs
            }
        }
        5 => {
            if strength && hypertrophy {
                SplitName::HybridPplUpperLower
            } else if !strength && minutes <= 45 {
                SplitName::BodyPart
            } else if !strength {
                SplitName::HybridPplUpperLower
            } else {
                SplitName::PushPullLegs
            }
        }
        6 => {
            if minutes <= 30 {
                SplitName::SixDayBodyPart
            } else {
                SplitName::PushPullLegs
            }
        }
        _ => SplitName::PplActiveRest,
    };

    tracing::debug!(
        "Recommended split {} for frequency {} on days {:?} ({} min)",
        split,
        inputs.frequency,
        days,
        minutes
    );
    split
}

/// Whether any k-subset of `days` (kept in order) satisfies `pred`
fn any_combination(days: &[u8], k: usize, pred: &dyn Fn(&[u8]) -> bool) -> bool {
    fn walk(
        days: &[u8],
        k: usize,
        start: usize,
        current: &mut Vec<u8>,
        pred: &dyn Fn(&[u8]) -> bool,
    ) -> bool {
        if current.len() == k {
            return pred(current);
        }
        for i in start..days.len() {
            current.push(days[i]);
            if walk(days, k, i + 1, current, pred) {
                return true;
            }
            current.pop();
        }
        false
    }

    walk(days, k, 0, &mut Vec::with_capacity(k), pred)
}

fn wrap_gap(a: u8, b: u8) -> u8 {
    7 - a.max(b) + a.min(b)
}

/// Two sessions at least `min_gap` days apart in both directions
fn two_days_apart(days: &[u8], min_gap: u8) -> bool {
    any_combination(days, 2, &|c| {
        c[1].abs_diff(c[0]) >= min_gap && wrap_gap(c[0], c[1]) >= min_gap
    })
}

/// Upper on the first and third session needs three days of recovery either way
fn three_day_upper_lower(days: &[u8]) -> bool {
    any_combination(days, 3, &|c| {
        c[2].abs_diff(c[0]) >= 3 && wrap_gap(c[0], c[2]) >= 3
    })
}

/// Three full-body sessions each separated by at least a day of rest
fn three_day_full_body(days: &[u8]) -> bool {
    any_combination(days, 3, &|c| {
        c[1] - c[0] >= 2 && c[2] - c[1] >= 2 && 7 - c[2] + c[0] >= 2
    })
}

fn four_day_upper_lower(days: &[u8]) -> bool {
    any_combination(days, 4, &|c| c[2] - c[0] >= 3 && c[3] - c[0] >= 3)
}
