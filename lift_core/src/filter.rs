//! Catalog filtering.
//!
//! The primary filter keeps exercises the user may do at all; the muscle
//! filter narrows that universe to today's target muscles.

use crate::catalog::Catalog;
use crate::types::{Exercise, Goal, UserContext};
use std::collections::BTreeSet;

/// Users above this age only get exercises at or below [`MAX_RISK_ABOVE_AGE`]
pub const RISK_AGE_THRESHOLD: u32 = 50;
pub const MAX_RISK_ABOVE_AGE: u8 = 2;

/// Union of the purpose tags trained by every goal
pub fn training_modalities(goals: &[Goal]) -> BTreeSet<&'static str> {
    goals
        .iter()
        .flat_map(|g| g.modalities().iter().copied())
        .collect()
}

/// Whether the user may be given this exercise at all
pub fn is_eligible(exercise: &Exercise, user: &UserContext, modalities: &BTreeSet<&str>) -> bool {
    if !exercise.level.contains(&user.level) {
        return false;
    }

    // Name-only ownership; pairing is checked during reconciliation
    let groups = exercise.equipment.groups();
    if !groups.is_empty()
        && !groups
            .iter()
            .any(|group| user.inventory.owns_group_by_name(group))
    {
        return false;
    }

    if !exercise
        .exercise_purpose
        .iter()
        .any(|p| modalities.contains(p.as_str()))
    {
        return false;
    }

    if !exercise.pain_exclusions.is_disjoint(&user.pain_points) {
        return false;
    }

    user.age <= RISK_AGE_THRESHOLD || exercise.risk_level <= MAX_RISK_ABOVE_AGE
}

/// Exercises valid for the user, in catalog order
pub fn primary_filter<'c>(catalog: &'c Catalog, user: &UserContext) -> Vec<&'c Exercise> {
    let modalities = training_modalities(&user.goals);
    let kept: Vec<&Exercise> = catalog
        .exercises()
        .iter()
        .filter(|e| is_eligible(e, user, &modalities))
        .collect();

    tracing::debug!(
        "Primary filter kept {} of {} exercises",
        kept.len(),
        catalog.len()
    );
    kept
}

/// Exercises whose main muscles intersect the target muscles
pub fn muscle_filter<'c, 'm>(
    exercises: &[&'c Exercise],
    muscles: impl IntoIterator<Item = &'m str>,
) -> Vec<&'c Exercise> {
    let muscles: BTreeSet<&str> = muscles.into_iter().collect();
    exercises
        .iter()
        .copied()
        .filter(|e| e.main_muscles.iter().any(|m| muscles.contains(m.as_str())))
        .collect()
}
