//! Exercise selection.
//!
//! Samples exercises per allocated muscle without replacement, weighting
//! favorites up and suggest-less entries down.

use crate::allocation::MuscleAllocation;
use crate::types::{Exercise, ExerciseType, Preferences};
use rand::seq::IndexedRandom;
use rand::Rng;
use std::cmp::Reverse;

/// Sampling weight multipliers
#[derive(Clone, Copy, Debug)]
pub struct SelectionWeights {
    pub favorite: f64,
    pub suggest_less: f64,
}

impl Default for SelectionWeights {
    fn default() -> Self {
        Self {
            favorite: 2.0,
            suggest_less: 0.25,
        }
    }
}

impl SelectionWeights {
    pub fn weight_of(&self, exercise: &Exercise, preferences: &Preferences) -> f64 {
        if preferences.favorites.contains(&exercise.name) {
            self.favorite
        } else if preferences.suggest_less.contains(&exercise.name) {
            self.suggest_less
        } else {
            1.0
        }
    }
}

/// An exercise chosen for one of the day's muscles
#[derive(Clone, Debug)]
pub struct Selected<'c> {
    pub muscle: String,
    pub exercise: &'c Exercise,
}

/// Choose exercises for every muscle with a positive allocation.
///
/// An exercise is selected at most once per workout, even when it trains
/// several of the day's muscles.
pub fn select_exercises<'c, R: Rng + ?Sized>(
    pool: &[&'c Exercise],
    allocation: &[MuscleAllocation],
    preferences: &Preferences,
    weights: SelectionWeights,
    rng: &mut R,
) -> Vec<Selected<'c>> {
    let mut selected: Vec<Selected<'c>> = Vec::new();

    for target in allocation.iter().filter(|a| a.count > 0) {
        let candidates: Vec<&'c Exercise> = pool
            .iter()
            .copied()
            .filter(|e| e.trains(&target.muscle))
            .filter(|e| !preferences.do_not_show.contains(&e.name))
            .filter(|e| !selected.iter().any(|s| s.exercise.name == e.name))
            .collect();

        let mut picked = if target.count >= candidates.len() {
            candidates
        } else {
            sample_weighted(&candidates, target.count, preferences, weights, rng)
        };

        if picked.len() < target.count {
            tracing::debug!(
                "Only {} of {} exercises available for {}",
                picked.len(),
                target.count,
                target.muscle
            );
        }

        order_for_presentation(&mut picked);
        selected.extend(picked.into_iter().map(|exercise| Selected {
            muscle: target.muscle.clone(),
            exercise,
        }));
    }

    selected
}

/// Weighted sampling without replacement, topped up uniformly when the
/// weights cannot supply `amount` items
fn sample_weighted<'c, R: Rng + ?Sized>(
    candidates: &[&'c Exercise],
    amount: usize,
    preferences: &Preferences,
    weights: SelectionWeights,
    rng: &mut R,
) -> Vec<&'c Exercise> {
    let mut picked: Vec<&'c Exercise> = match candidates
        .choose_multiple_weighted(rng, amount, |e| weights.weight_of(e, preferences))
    {
        Ok(iter) => iter.copied().collect(),
        Err(e) => {
            tracing::debug!("Weighted sampling unavailable ({}), using uniform", e);
            Vec::new()
        }
    };

    if picked.len() < amount {
        let remaining: Vec<&'c Exercise> = candidates
            .iter()
            .copied()
            .filter(|c| !picked.iter().any(|p| p.name == c.name))
            .collect();
        picked.extend(
            remaining
                .choose_multiple(rng, amount - picked.len())
                .copied(),
        );
    }

    picked
}

/// Compound before isolation, then hardest first
fn order_for_presentation(exercises: &mut [&Exercise]) {
    exercises.sort_by_key(|e| {
        let kind = match e.kind {
            Some(ExerciseType::Compound) => 0,
            Some(ExerciseType::Isolation) => 1,
            None => 2,
        };
        (kind, Reverse(e.difficulty))
    });
}
