//! Day-group and phase resolution.
//!
//! The day group advances every workout; the phase advances once per full
//! pass through the split, cycling through the user's distinct goal phases.

use crate::split::{DayGroup, SplitName};
use crate::types::{Goal, Phase};
use crate::{Error, Result};

/// Today's slot in the split/phase macro-cycle
#[derive(Clone, Debug)]
pub struct DayPlan {
    pub split: SplitName,
    pub group_index: usize,
    pub group: &'static DayGroup,
    pub phase: Phase,
}

impl DayPlan {
    pub fn label(&self) -> &'static str {
        self.group.label
    }
}

/// Distinct phases implied by the goals, in first-occurrence order
pub fn ordered_phases(goals: &[Goal]) -> Vec<Phase> {
    let mut phases = Vec::new();
    for phase in goals.iter().map(|g| g.phase()) {
        if !phases.contains(&phase) {
            phases.push(phase);
        }
    }
    phases
}

/// Resolve the day group and phase for the user's `workout_count`-th workout
pub fn resolve_day(split: SplitName, goals: &[Goal], workout_count: u64) -> Result<DayPlan> {
    let phases = ordered_phases(goals);
    if phases.is_empty() {
        return Err(Error::Config(
            "at least one goal is required to choose a training phase".into(),
        ));
    }

    let groups = &split.split().groups;
    let len = groups.len() as u64;
    let group_index = (workout_count % len) as usize;
    let phase = phases[((workout_count / len) % phases.len() as u64) as usize];

    tracing::debug!(
        "Workout {} of {}: day {} ({}), phase {}",
        workout_count,
        split,
        group_index,
        groups[group_index].label,
        phase
    );

    Ok(DayPlan {
        split,
        group_index,
        group: &groups[group_index],
        phase,
    })
}
