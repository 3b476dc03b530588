//! Intensity engine.
//!
//! Decides the load and reps (or hold time) of one selected exercise:
//! - Gym equipment: progressive overload on same-phase history, a rep-max
//!   conversion of other-phase history, a transfer from a variation, or a
//!   cold start from the catalog lower bound
//! - Resistance bands: step a four-level ladder up or down
//! - Bodyweight: add a rep until the phase ceiling
//! - Timed: add five seconds up to three minutes
//!
//! Gym and band suggestions are then reconciled against owned equipment.

use crate::equipment::{specific_equipment, Inventory};
use crate::history::History;
use crate::reconcile::{reconcile_band, reconcile_weight};
use crate::types::*;

/// Discount applied when transferring a load from a similar exercise
pub const TRANSFER_FACTOR: f64 = 0.8;

/// Reps prescribed when starting from the catalog
pub const DEFAULT_REPS: u32 = 10;

/// Hold-time increment and ceiling, in seconds
pub const TIME_INCREMENT: u32 = 5;
pub const MAX_HOLD_SECONDS: u32 = 180;

/// Band ladder used for progression; "Extra Light" sits at the floor
pub const BAND_LADDER: [BandLevel; 4] = [
    BandLevel::Light,
    BandLevel::Medium,
    BandLevel::Heavy,
    BandLevel::ExtraHeavy,
];

/// Per-unit weights commonly stocked for dumbbells and kettlebells
const COMMON_WEIGHTS: [f64; 24] = [
    5.0, 7.5, 10.0, 12.5, 15.0, 17.5, 20.0, 22.5, 25.0, 30.0, 35.0, 40.0, 45.0, 50.0, 55.0, 60.0,
    65.0, 70.0, 75.0, 80.0, 85.0, 90.0, 95.0, 100.0,
];

/// Everything the engine reads besides the exercise itself
#[derive(Clone, Copy, Debug)]
pub struct IntensityContext<'a> {
    pub level: Level,
    pub phase: Phase,
    pub history: &'a History,
    pub inventory: &'a Inventory,
    /// Filtered exercises; similar-exercise transfer only applies inside it
    pub universe: &'a [&'a Exercise],
}

#[derive(Clone, Debug, PartialEq)]
pub struct Suggestion {
    pub prescription: Prescription,
    pub basis: IntensityBasis,
}

/// Weight and reps before equipment reconciliation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeightReps {
    pub weight: f64,
    pub reps: u32,
}

/// Prescribe intensity for one exercise. Never fails; missing data degrades
/// through the documented fallbacks.
pub fn determine_intensity(exercise: &Exercise, ctx: &IntensityContext<'_>) -> Suggestion {
    let suggestion = match exercise.modality() {
        Modality::GymEquipment => gym_suggestion(exercise, ctx),
        Modality::ResistanceBand => band_suggestion(exercise, ctx),
        Modality::Bodyweight => bodyweight_suggestion(exercise, ctx),
        Modality::Timed => timed_suggestion(exercise, ctx),
    };
    tracing::debug!(
        "{}: {:?} via {:?}",
        exercise.name,
        suggestion.prescription,
        suggestion.basis
    );
    suggestion
}

// ============================================================================
// Gym equipment
// ============================================================================

fn gym_suggestion(exercise: &Exercise, ctx: &IntensityContext<'_>) -> Suggestion {
    let equipment = specific_equipment(&exercise.equipment);
    let quantity = equipment.map_or(1, |(_, q)| q);
    let records = ctx.history.records(&exercise.name);

    let estimate = progress_weight(records, ctx.phase)
        .or_else(|| transfer_from_similar(exercise, ctx, quantity))
        .or_else(|| {
            let lower_bound = exercise.lower_bound.weight()?;
            let raw = cold_start_weight(lower_bound, quantity, ctx.level);
            Some((
                WeightReps {
                    weight: round_gym_weight(raw, quantity > 1),
                    reps: DEFAULT_REPS,
                },
                IntensityBasis::ColdStart,
            ))
        });

    let Some((target, basis)) = estimate else {
        return Suggestion {
            prescription: Prescription::Gym {
                weight: None,
                reps: DEFAULT_REPS,
            },
            basis: IntensityBasis::Fallback,
        };
    };

    Suggestion {
        prescription: Prescription::Gym {
            weight: reconcile_weight(target.weight, equipment, ctx.inventory),
            reps: target.reps,
        },
        basis,
    }
}

/// Same-phase progression, else a rep-max conversion of the latest record
fn progress_weight(
    records: &[ExerciseRecord],
    phase: Phase,
) -> Option<(WeightReps, IntensityBasis)> {
    if let Some(next) = weight_algorithm(records, phase) {
        return Some((next, IntensityBasis::Progression));
    }

    let last = records
        .iter()
        .rev()
        .find(|r| r.weight_value().is_some() && !r.reps.is_empty())?;
    let weight = last.weight_value()?;
    let reps = last.average_reps()?;
    let target = phase.target_reps().min;
    tracing::debug!(
        "No {} history, estimating from {} x {}",
        phase,
        weight,
        reps
    );
    Some((
        WeightReps {
            weight: estimate_weight_at_reps(weight, reps, target),
            reps: target,
        },
        IntensityBasis::RepMaxEstimate,
    ))
}

/// Next (weight, reps) from records of the current phase.
///
/// Tries, in order: lighter weight for two more reps, heavier weight for one
/// or two fewer reps, same weight for one more rep, heavier weight at the
/// bottom of the range. Each candidate must stay inside the phase range and
/// must not have been matched or beaten before at that weight. Returns `None` without same-phase weighted records.
pub fn weight_algorithm(records: &[ExerciseRecord], phase: Phase) -> Option<WeightReps> {
    let history: Vec<&ExerciseRecord> = records
        .iter()
        .filter(|r| r.phase == phase && r.weight_value().is_some() && !r.reps.is_empty())
        .collect();
    let last = history.last()?;
    let last_weight = last.weight_value()?;
    let avg = last.average_reps()?;

    let range = phase.target_reps();
    let increment = phase.weight_increment();
    let already_achieved = |weight: f64, reps: u32| {
        history.iter().any(|r| {
            r.weight_value().is_some_and(|w| same_weight(w, weight))
                && r.total_reps() >= reps * r.reps.len() as u32
        })
    };
    let candidate = |weight: f64, reps: u32| {
        (!already_achieved(weight, reps)).then_some(WeightReps { weight, reps })
    };

    let lighter = last_weight - increment;
    if range.contains(avg + 2) && lighter > 0.0 {
        if let Some(next) = candidate(lighter, avg + 2) {
            return Some(next);
        }
    }

    let heavier = last_weight + increment;
    for drop in [2, 1] {
        if avg >= drop && range.contains(avg - drop) {
            if let Some(next) = candidate(heavier, avg - drop) {
                return Some(next);
            }
        }
    }

    if range.contains(avg + 1) {
        if let Some(next) = candidate(last_weight, avg + 1) {
            return Some(next);
        }
    }

    Some(WeightReps {
        weight: heavier,
        reps: range.min,
    })
}

/// Brzycki one-rep max; valid for low rep counts
pub fn brzycki(weight: f64, reps: u32, target_reps: u32) -> f64 {
    let one_rm = weight / (1.0278 - 0.0278 * reps as f64);
    one_rm * (1.0278 - 0.0278 * target_reps as f64)
}

/// Epley one-rep max
pub fn epley(weight: f64, reps: u32, target_reps: u32) -> f64 {
    let one_rm = weight * (1.0 + 0.0333 * reps as f64);
    one_rm / (1.0 + 0.0333 * target_reps as f64)
}

/// Equivalent weight at `target_reps`, rounded to the nearest 5
pub fn estimate_weight_at_reps(weight: f64, reps: u32, target_reps: u32) -> f64 {
    let estimate = if reps <= 10 && target_reps <= 10 {
        brzycki(weight, reps, target_reps)
    } else {
        epley(weight, reps, target_reps)
    };
    round_to_increment(estimate, 5.0)
}

pub fn round_to_increment(weight: f64, increment: f64) -> f64 {
    (weight / increment).round() * increment
}

/// Round to a plausible gym weight. Pairs round the per-unit weight to the
/// closest commonly stocked size and double it.
pub fn round_gym_weight(weight: f64, pair: bool) -> f64 {
    if !pair {
        return round_to_increment(weight, 5.0);
    }
    let per_unit = weight / 2.0;
    let closest = COMMON_WEIGHTS
        .iter()
        .copied()
        .min_by(|a, b| {
            (a - per_unit)
                .abs()
                .total_cmp(&(b - per_unit).abs())
                .then(a.total_cmp(b))
        })
        .unwrap_or(per_unit);
    closest * 2.0
}

/// Catalog lower bound scaled to the required units and experience level
pub fn cold_start_weight(lower_bound: f64, quantity: u32, level: Level) -> f64 {
    lower_bound * quantity as f64 * level.cold_start_multiplier()
}

/// First variation with weighted history, discounted and rounded
fn transfer_from_similar(
    exercise: &Exercise,
    ctx: &IntensityContext<'_>,
    quantity: u32,
) -> Option<(WeightReps, IntensityBasis)> {
    if !ctx.universe.iter().any(|e| e.name == exercise.name) {
        return None;
    }

    exercise.variations.iter().find_map(|name| {
        let last = ctx
            .history
            .records(name)
            .iter()
            .rev()
            .find(|r| r.weight_value().is_some() && !r.reps.is_empty())?;
        let weight = last.weight_value()? * TRANSFER_FACTOR;
        Some((
            WeightReps {
                weight: round_gym_weight(weight, quantity > 1),
                reps: last.average_reps_floor()?,
            },
            IntensityBasis::SimilarExercise { name: name.clone() },
        ))
    })
}

// ============================================================================
// Resistance bands
// ============================================================================

fn band_suggestion(exercise: &Exercise, ctx: &IntensityContext<'_>) -> Suggestion {
    let equipment = specific_equipment(&exercise.equipment);
    let records = ctx.history.records(&exercise.name);

    let (level, reps, basis) = match progress_band(records, ctx.phase) {
        Some((level, reps)) => (Some(level), reps, IntensityBasis::Progression),
        None => match exercise.lower_bound.band() {
            Some(level) => (Some(level), DEFAULT_REPS, IntensityBasis::ColdStart),
            None => (None, DEFAULT_REPS, IntensityBasis::Fallback),
        },
    };

    Suggestion {
        prescription: Prescription::Band {
            level: level.and_then(|l| reconcile_band(l, equipment, ctx.inventory)),
            reps,
        },
        basis,
    }
}

/// Next band level and reps from the latest same-phase record, or the latest
/// record of any phase
pub fn progress_band(records: &[ExerciseRecord], phase: Phase) -> Option<(BandLevel, u32)> {
    let usable = |r: &&ExerciseRecord| r.band().is_some() && !r.reps.is_empty();
    let last = records
        .iter()
        .rev()
        .filter(usable)
        .find(|r| r.phase == phase)
        .or_else(|| records.iter().rev().find(usable))?;
    let band = last.band()?;
    let avg = last.average_reps_floor()?;
    let range = phase.target_reps();

    let Some(index) = BAND_LADDER.iter().position(|b| *b == band) else {
        // Extra Light sits below the ladder and can only step up to its first rung
        return if avg >= range.max {
            Some((BAND_LADDER[0], range.min))
        } else {
            Some((band, avg + 1))
        };
    };
    if avg >= range.max && index + 1 < BAND_LADDER.len() {
        Some((BAND_LADDER[index + 1], range.min))
    } else if avg < range.min && index > 0 {
        Some((BAND_LADDER[index - 1], avg + 1))
    } else {
        Some((band, avg + 1))
    }
}

// ============================================================================
// Bodyweight and timed
// ============================================================================

fn bodyweight_suggestion(exercise: &Exercise, ctx: &IntensityContext<'_>) -> Suggestion {
    let records = ctx.history.records(&exercise.name);
    match progress_bodyweight(records, ctx.phase) {
        Some(reps) => Suggestion {
            prescription: Prescription::Bodyweight { reps },
            basis: IntensityBasis::Progression,
        },
        None => Suggestion {
            prescription: Prescription::Bodyweight {
                reps: ctx.phase.target_reps().min,
            },
            basis: IntensityBasis::ColdStart,
        },
    }
}

/// One more rep than the weakest set of the latest same-phase record,
/// capped at the phase ceiling
pub fn progress_bodyweight(records: &[ExerciseRecord], phase: Phase) -> Option<u32> {
    let last = records
        .iter()
        .rev()
        .find(|r| r.phase == phase && !r.reps.is_empty())?;
    let min = last.min_reps()?;
    let max = phase.target_reps().max;
    Some(if min < max { min + 1 } else { max })
}

fn timed_suggestion(exercise: &Exercise, ctx: &IntensityContext<'_>) -> Suggestion {
    let records = ctx.history.records(&exercise.name);
    if let Some(seconds) = progress_time(records) {
        return Suggestion {
            prescription: Prescription::Timed {
                seconds: Some(seconds),
            },
            basis: IntensityBasis::Progression,
        };
    }

    let seconds = exercise.lower_bound.seconds();
    Suggestion {
        prescription: Prescription::Timed { seconds },
        basis: if seconds.is_some() {
            IntensityBasis::ColdStart
        } else {
            IntensityBasis::Fallback
        },
    }
}

/// Average hold of the latest timed record plus the increment, capped
pub fn progress_time(records: &[ExerciseRecord]) -> Option<u32> {
    let last = records.iter().rev().find(|r| !r.times.is_empty())?;
    let avg = last.average_time_floor()?;
    Some((avg + TIME_INCREMENT).min(MAX_HOLD_SECONDS))
}
