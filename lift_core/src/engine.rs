//! Workout generation.
//!
//! One call runs the whole pipeline for one user:
//!
//! 1. **Split**: the user's fixed split, or the planner's recommendation
//! 2. **Day and phase**: from the split and the workout counter
//! 3. **Filter**: catalog eligibility, then today's target muscles
//! 4. **Volume**: the session's exercise budget spread over those muscles
//! 5. **Selection**: weighted sampling per muscle
//! 6. **Intensity**: load and reps per exercise, reconciled with equipment
//!
//! All randomness comes from the caller's `rng`, so a seeded generator
//! replays the same workout.

use crate::allocation::{allocate, session_budget, MuscleAllocation};
use crate::catalog::Catalog;
use crate::config::GenerationConfig;
use crate::filter::{muscle_filter, primary_filter};
use crate::history::History;
use crate::intensity::{determine_intensity, IntensityContext};
use crate::phase::{resolve_day, DayPlan};
use crate::selection::{select_exercises, SelectionWeights};
use crate::split::{recommend_split, PlannerInputs, SplitName};
use crate::types::{GeneratedExercise, Phase, UserContext};
use crate::{Error, Result};
use rand::Rng;
use serde::Serialize;

/// A generated workout with the decisions that shaped it
#[derive(Clone, Debug, Serialize)]
pub struct GeneratedWorkout {
    pub split: SplitName,
    pub day_label: String,
    pub group_index: usize,
    pub phase: Phase,
    /// Exercises the session time allows
    pub budget: usize,
    pub allocation: Vec<MuscleAllocation>,
    pub exercises: Vec<GeneratedExercise>,
    pub estimated_minutes: u32,
}

/// The user's fixed split, or the planner's pick for their schedule
pub fn choose_split(user: &UserContext) -> SplitName {
    if let Some(split) = user.split {
        return split;
    }
    let split = recommend_split(&PlannerInputs {
        days: &user.schedule.days,
        frequency: user.schedule.frequency,
        session_minutes: user.schedule.session_minutes,
        level: user.level,
        goals: &user.goals,
    });
    tracing::info!("Recommended split: {}", split);
    split
}

/// Today's day group and phase for the user
pub fn plan_today(user: &UserContext) -> Result<DayPlan> {
    resolve_day(choose_split(user), &user.goals, user.workout_count)
}

/// `(minutes_per_set + rest) * sets_per_exercise * exercise_count`
pub fn estimated_minutes(settings: &GenerationConfig, phase: Phase, exercise_count: usize) -> u32 {
    (settings.minutes_per_set + phase.rest_minutes())
        * settings.sets_per_exercise
        * exercise_count as u32
}

/// Generate the user's next workout
pub fn generate_workout<R: Rng + ?Sized>(
    catalog: &Catalog,
    user: &UserContext,
    history: &History,
    settings: &GenerationConfig,
    rng: &mut R,
) -> Result<GeneratedWorkout> {
    settings.validate()?;

    let plan = plan_today(user)?;
    tracing::info!(
        "Generating {} day ({}) in {} phase",
        plan.label(),
        plan.split,
        plan.phase
    );

    let universe = primary_filter(catalog, user);
    let pool = muscle_filter(&universe, plan.group.muscles());

    let budget = session_budget(
        user.schedule.session_minutes,
        settings.minutes_per_set,
        plan.phase.rest_minutes(),
        settings.sets_per_exercise,
    );
    let allocation = allocate(
        settings.allocator,
        budget,
        plan.group,
        &user.priority_muscles,
        settings.bias_factor,
        rng,
    );
    tracing::info!("Budget of {} exercises over {} candidates", budget, pool.len());

    let weights = SelectionWeights {
        favorite: settings.favorite_multiplier,
        suggest_less: settings.suggest_less_multiplier,
    };
    let selected = select_exercises(&pool, &allocation, &user.preferences, weights, rng);

    let ctx = IntensityContext {
        level: user.level,
        phase: plan.phase,
        history,
        inventory: &user.inventory,
        universe: &pool,
    };
    let exercises: Vec<GeneratedExercise> = selected
        .into_iter()
        .map(|s| {
            let suggestion = determine_intensity(s.exercise, &ctx);
            GeneratedExercise {
                name: s.exercise.name.clone(),
                muscle: s.muscle,
                prescription: suggestion.prescription,
                basis: suggestion.basis,
            }
        })
        .collect();

    if exercises.len() < budget {
        tracing::warn!(
            "Only {} of {} exercises could be filled for {}",
            exercises.len(),
            budget,
            plan.label()
        );
    }

    Ok(GeneratedWorkout {
        split: plan.split,
        day_label: plan.label().to_string(),
        group_index: plan.group_index,
        phase: plan.phase,
        budget,
        allocation,
        estimated_minutes: estimated_minutes(settings, plan.phase, exercises.len()),
        exercises,
    })
}

/// Prescribe one named exercise for today's phase.
///
/// The exercise does not have to pass the user's filters or train today's
/// muscles; outside today's filtered pool it only loses the similar-exercise
/// transfer.
pub fn suggest_for_exercise(
    catalog: &Catalog,
    user: &UserContext,
    history: &History,
    name: &str,
) -> Result<GeneratedExercise> {
    let exercise = catalog
        .get(name)
        .ok_or_else(|| Error::UnknownExercise(name.to_string()))?;

    let plan = plan_today(user)?;
    let universe = primary_filter(catalog, user);
    let pool = muscle_filter(&universe, plan.group.muscles());
    let ctx = IntensityContext {
        level: user.level,
        phase: plan.phase,
        history,
        inventory: &user.inventory,
        universe: &pool,
    };
    let suggestion = determine_intensity(exercise, &ctx);

    let muscle = exercise
        .main_muscles
        .iter()
        .find(|m| plan.group.muscles().any(|target| target == m.as_str()))
        .or_else(|| exercise.main_muscles.iter().next())
        .cloned()
        .unwrap_or_default();

    Ok(GeneratedExercise {
        name: exercise.name.clone(),
        muscle,
        prescription: suggestion.prescription,
        basis: suggestion.basis,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;
    use crate::equipment::Inventory;
    use crate::types::{
        ExerciseRecord, Goal, IntensityBasis, Level, Load, Modality, Preferences, Prescription,
        Schedule,
    };
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn push_day_user() -> UserContext {
        UserContext {
            age: 30,
            level: Level::Beginner,
            goals: vec![Goal::GetStronger],
            pain_points: Default::default(),
            priority_muscles: Default::default(),
            inventory: Inventory::new(["Olympic barbell", "Bench", "None"]),
            preferences: Preferences::default(),
            schedule: Schedule {
                days: vec![1, 3, 5],
                frequency: 3,
                session_minutes: 60,
            },
            split: Some(SplitName::PushPullLegs),
            workout_count: 0,
        }
    }

    fn generate(user: &UserContext, history: &History, seed: u64) -> GeneratedWorkout {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        generate_workout(
            default_catalog().unwrap(),
            user,
            history,
            &GenerationConfig::default(),
            &mut rng,
        )
        .unwrap()
    }

    #[test]
    fn test_push_day_cold_start() {
        crate::logging::init_test();
        let user = push_day_user();
        let workout = generate(&user, &History::new(), 7);

        assert_eq!(workout.day_label, "Push");
        assert_eq!(workout.phase, Phase::Strength);
        assert_eq!(workout.budget, 5);
        assert_eq!(
            workout.allocation.iter().map(|a| a.count).sum::<usize>(),
            5
        );
        assert!(!workout.exercises.is_empty());
        assert!(workout.exercises.len() <= 5);

        let allowed = [
            "Barbell bench press",
            "Push up",
            "Knee push up",
            "Barbell overhead press",
            "Bench dip",
            "Barbell skull crusher",
        ];
        for exercise in &workout.exercises {
            assert!(allowed.contains(&exercise.name.as_str()), "{}", exercise.name);
            assert!(["Chest", "Shoulders", "Triceps"].contains(&exercise.muscle.as_str()));
            if exercise.modality() == Modality::GymEquipment {
                assert_eq!(exercise.basis, IntensityBasis::ColdStart);
            }
        }
        assert_eq!(
            workout.estimated_minutes,
            12 * workout.exercises.len() as u32
        );
    }

    #[test]
    fn test_same_seed_same_workout() {
        let user = push_day_user();
        let a = generate(&user, &History::new(), 42);
        let b = generate(&user, &History::new(), 42);
        assert_eq!(a.allocation, b.allocation);
        assert_eq!(a.exercises, b.exercises);
    }

    #[test]
    fn test_no_duplicate_exercises() {
        let mut user = push_day_user();
        user.split = Some(SplitName::FullBody);
        user.inventory = Inventory::new(["Olympic barbell", "Bench", "Squat rack", "Pull up bar"]);
        user.schedule.session_minutes = 120;

        for seed in 0..10 {
            let workout = generate(&user, &History::new(), seed);
            let mut names: Vec<&str> = workout.exercises.iter().map(|e| e.name.as_str()).collect();
            names.sort_unstable();
            let before = names.len();
            names.dedup();
            assert_eq!(before, names.len());
        }
    }

    #[test]
    fn test_do_not_show_is_respected() {
        let mut user = push_day_user();
        user.preferences.do_not_show.insert("Push up".into());
        for seed in 0..10 {
            let workout = generate(&user, &History::new(), seed);
            assert!(workout.exercises.iter().all(|e| e.name != "Push up"));
        }
    }

    #[test]
    fn test_planner_used_without_fixed_split() {
        let mut user = push_day_user();
        user.split = None;
        let workout = generate(&user, &History::new(), 1);
        assert_eq!(workout.split, choose_split(&user));
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let user = push_day_user();
        let settings = GenerationConfig {
            sets_per_exercise: 0,
            ..GenerationConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let result = generate_workout(
            default_catalog().unwrap(),
            &user,
            &History::new(),
            &settings,
            &mut rng,
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_suggest_uses_history() {
        let user = push_day_user();
        let mut history = History::new();
        history.push(
            "Barbell bench press",
            ExerciseRecord {
                phase: Phase::Strength,
                weight: Some(Load::Weight(100.0)),
                reps: vec![5, 5, 5],
                times: vec![],
            },
        );

        let suggestion =
            suggest_for_exercise(default_catalog().unwrap(), &user, &history, "barbell BENCH press")
                .unwrap();
        assert_eq!(suggestion.name, "Barbell bench press");
        assert_eq!(suggestion.muscle, "Chest");
        assert_eq!(suggestion.basis, IntensityBasis::Progression);
        assert!(matches!(suggestion.prescription, Prescription::Gym { .. }));
    }

    #[test]
    fn test_suggest_transfers_only_on_matching_day() {
        let mut user = push_day_user();
        user.inventory = Inventory::new(["Bench"]).with_load(
            crate::equipment::EquipmentFamily::Dumbbells,
            Load::Weight(10.0),
            2,
        );
        let mut history = History::new();
        history.push(
            "Barbell bent-over row",
            ExerciseRecord {
                phase: Phase::Strength,
                weight: Some(Load::Weight(100.0)),
                reps: vec![10, 10, 10],
                times: vec![],
            },
        );
        let catalog = default_catalog().unwrap();

        // Push day: rows are not in today's pool
        let push = suggest_for_exercise(catalog, &user, &history, "Dumbbell row").unwrap();
        assert_eq!(push.basis, IntensityBasis::ColdStart);

        user.workout_count = 1;
        let pull = suggest_for_exercise(catalog, &user, &history, "Dumbbell row").unwrap();
        assert_eq!(
            pull.basis,
            IntensityBasis::SimilarExercise {
                name: "Barbell bent-over row".into()
            }
        );
        assert_eq!(pull.muscle, "Back");
    }

    #[test]
    fn test_suggest_unknown_exercise() {
        let user = push_day_user();
        let result =
            suggest_for_exercise(default_catalog().unwrap(), &user, &History::new(), "Moon squat");
        assert!(matches!(result, Err(Error::UnknownExercise(_))));
    }

    #[test]
    fn test_estimated_minutes() {
        let settings = GenerationConfig::default();
        assert_eq!(estimated_minutes(&settings, Phase::Strength, 5), 60);
        assert_eq!(estimated_minutes(&settings, Phase::Hypertrophy, 3), 24);
        assert_eq!(estimated_minutes(&settings, Phase::Endurance, 0), 0);
    }
}
