//! Volume allocation.
//!
//! Turns a session's time budget into an exercise count and spreads it over
//! the day group's target muscles, biased toward the user's priority muscles.

use crate::config::AllocatorKind;
use crate::split::DayGroup;
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeSet;

/// Exercises allotted to one target muscle
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MuscleAllocation {
    pub muscle: String,
    pub count: usize,
}

/// Number of exercises that fit in a session:
/// `floor(minutes / (minutes_per_set + rest) / sets_per_exercise)`
pub fn session_budget(
    session_minutes: u32,
    minutes_per_set: u32,
    rest_minutes: u32,
    sets_per_exercise: u32,
) -> usize {
    let per_exercise = (minutes_per_set + rest_minutes) * sets_per_exercise;
    if per_exercise == 0 {
        return 0;
    }
    (session_minutes / per_exercise) as usize
}

/// Dispatch to the configured allocator
pub fn allocate<R: Rng + ?Sized>(
    kind: AllocatorKind,
    budget: usize,
    group: &DayGroup,
    priority: &BTreeSet<String>,
    bias_factor: f64,
    rng: &mut R,
) -> Vec<MuscleAllocation> {
    let allocation = match kind {
        AllocatorKind::Stochastic => allocate_stochastic(budget, group, priority, bias_factor, rng),
        AllocatorKind::Biased => allocate_biased(budget, group, priority, bias_factor, rng),
    };
    tracing::debug!("{:?} allocation of {} over {}: {:?}", kind, budget, group.label, allocation);
    allocation
}

/// Categorical draws from the day group's probabilities, with `bias_factor`
/// added to priority muscles before normalising
pub fn allocate_stochastic<R: Rng + ?Sized>(
    budget: usize,
    group: &DayGroup,
    priority: &BTreeSet<String>,
    bias_factor: f64,
    rng: &mut R,
) -> Vec<MuscleAllocation> {
    let weights: Vec<f64> = group
        .targets
        .iter()
        .map(|t| {
            if priority.contains(t.muscle) {
                t.probability + bias_factor
            } else {
                t.probability
            }
        })
        .collect();
    let probabilities = normalize(&weights);

    let mut counts = vec![0usize; probabilities.len()];
    if !counts.is_empty() {
        for _ in 0..budget {
            let draw: f64 = rng.random();
            let mut cumulative = 0.0;
            // Float error can leave the last bucket's upper edge below 1
            let mut chosen = probabilities.len() - 1;
            for (i, p) in probabilities.iter().enumerate() {
                cumulative += p;
                if draw < cumulative {
                    chosen = i;
                    break;
                }
            }
            counts[chosen] += 1;
        }
    }

    tally(group, counts)
}

/// Uniform draws inside each muscle's focus range, boosted for priority
/// muscles, renormalised and scaled to the budget
pub fn allocate_biased<R: Rng + ?Sized>(
    budget: usize,
    group: &DayGroup,
    priority: &BTreeSet<String>,
    bias_factor: f64,
    rng: &mut R,
) -> Vec<MuscleAllocation> {
    let shares: Vec<f64> = group
        .targets
        .iter()
        .map(|t| {
            let (lo, hi) = (t.focus.0.max(0.0), t.focus.1.max(t.focus.0.max(0.0)));
            let mut value = if hi > lo {
                rng.random_range(lo..=hi)
            } else {
                lo
            };
            if priority.contains(t.muscle) {
                value = (value * (1.0 + bias_factor)).clamp(lo, hi);
            }
            value
        })
        .collect();

    let counts = normalize(&shares)
        .into_iter()
        .map(|share| (share * budget as f64).round() as usize)
        .collect();
    tally(group, counts)
}

/// Scale to sum 1; an all-zero vector becomes uniform
fn normalize(values: &[f64]) -> Vec<f64> {
    let total: f64 = values.iter().sum();
    if total > 0.0 {
        values.iter().map(|v| v / total).collect()
    } else if values.is_empty() {
        Vec::new()
    } else {
        vec![1.0 / values.len() as f64; values.len()]
    }
}

fn tally(group: &DayGroup, counts: Vec<usize>) -> Vec<MuscleAllocation> {
    group
        .targets
        .iter()
        .zip(counts)
        .map(|(t, count)| MuscleAllocation {
            muscle: t.muscle.to_string(),
            count,
        })
        .collect()
}
