use clap::{Parser, Subcommand};
use lift_core::alternatives::CandidateGap;
use lift_core::engine::{choose_split, plan_today};
use lift_core::history::read_entries;
use lift_core::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "lift")]
#[command(about = "Strength workout generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the split and today's day for a profile
    Split {
        #[arg(long)]
        profile: PathBuf,
    },

    /// Generate today's workout
    Generate {
        #[arg(long)]
        profile: PathBuf,

        /// Exercise catalog JSON (defaults to the built-in catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// History file (defaults to <data-dir>/history.jsonl)
        #[arg(long)]
        history: Option<PathBuf>,

        /// Seed for a reproducible workout
        #[arg(long)]
        seed: Option<u64>,

        /// Also write the workout as CSV
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Suggest load and reps for one exercise
    Suggest {
        #[arg(long)]
        profile: PathBuf,

        #[arg(long)]
        exercise: String,

        #[arg(long)]
        catalog: Option<PathBuf>,

        #[arg(long)]
        history: Option<PathBuf>,
    },

    /// Check whether the profile's equipment covers an exercise
    Check {
        #[arg(long)]
        profile: PathBuf,

        #[arg(long)]
        exercise: String,

        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Find a harder or easier alternative for an exercise
    Swap {
        #[arg(long)]
        profile: PathBuf,

        #[arg(long)]
        exercise: String,

        /// challenge or easy
        #[arg(long)]
        mode: String,

        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Record a completed exercise in the history file
    Log {
        #[arg(long)]
        exercise: String,

        /// Strength, Hypertrophy or Endurance
        #[arg(long)]
        phase: String,

        #[arg(long, conflicts_with = "band")]
        weight: Option<f64>,

        /// Band level, e.g. "Medium"
        #[arg(long)]
        band: Option<String>,

        /// Reps per set, comma separated
        #[arg(long, value_delimiter = ',')]
        reps: Vec<u32>,

        /// Seconds per set, comma separated
        #[arg(long, value_delimiter = ',')]
        time: Vec<u32>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    lift_core::logging::init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(data_dir) = cli.data_dir {
        config.data.data_dir = data_dir;
    }

    match cli.command {
        Commands::Split { profile } => cmd_split(&profile),
        Commands::Generate {
            profile,
            catalog,
            history,
            seed,
            csv,
            json,
        } => cmd_generate(
            &config,
            &profile,
            catalog.as_deref(),
            history.as_deref(),
            seed,
            csv.as_deref(),
            json,
        ),
        Commands::Suggest {
            profile,
            exercise,
            catalog,
            history,
        } => cmd_suggest(
            &config,
            &profile,
            &exercise,
            catalog.as_deref(),
            history.as_deref(),
        ),
        Commands::Check {
            profile,
            exercise,
            catalog,
        } => cmd_check(&profile, &exercise, catalog.as_deref()),
        Commands::Swap {
            profile,
            exercise,
            mode,
            catalog,
        } => cmd_swap(&profile, &exercise, &mode, catalog.as_deref()),
        Commands::Log {
            exercise,
            phase,
            weight,
            band,
            reps,
            time,
        } => cmd_log(&config, exercise, &phase, weight, band.as_deref(), reps, time),
    }
}

fn load_context(profile: &Path) -> Result<UserContext> {
    let today = chrono::Local::now().date_naive();
    UserProfile::load(profile)?.to_context(today)
}

fn load_catalog(path: Option<&Path>) -> Result<Cow<'static, Catalog>> {
    match path {
        Some(path) => Ok(Cow::Owned(Catalog::load(path)?)),
        None => Ok(Cow::Borrowed(default_catalog()?)),
    }
}

fn load_history(config: &Config, path: Option<&Path>) -> Result<History> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.history_path());
    Ok(read_entries(&path)?.into_iter().collect())
}

fn cmd_split(profile: &Path) -> Result<()> {
    let user = load_context(profile)?;
    let split = choose_split(&user);
    let plan = plan_today(&user)?;

    println!("Split: {}", split);
    for (i, group) in split.split().groups.iter().enumerate() {
        let marker = if i == plan.group_index { "→" } else { " " };
        println!("  {} {}. {}", marker, i + 1, group.label);
    }
    println!("Phase: {}", plan.phase);
    Ok(())
}

fn cmd_generate(
    config: &Config,
    profile: &Path,
    catalog: Option<&Path>,
    history: Option<&Path>,
    seed: Option<u64>,
    csv: Option<&Path>,
    json: bool,
) -> Result<()> {
    let user = load_context(profile)?;
    let catalog = load_catalog(catalog)?;
    let history = load_history(config, history)?;

    let seed = seed.unwrap_or_else(rand::random);
    tracing::info!("Generating with seed {}", seed);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let workout = generate_workout(&catalog, &user, &history, &config.generation, &mut rng)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&workout)?);
    } else {
        display_workout(&workout);
    }

    if let Some(path) = csv {
        let written = lift_core::export::export_csv(path, &workout.exercises)?;
        if !json {
            println!("✓ Wrote {} exercises to {}", written, path.display());
        }
    }

    Ok(())
}

fn cmd_suggest(
    config: &Config,
    profile: &Path,
    exercise: &str,
    catalog: Option<&Path>,
    history: Option<&Path>,
) -> Result<()> {
    let user = load_context(profile)?;
    let catalog = load_catalog(catalog)?;
    let history = load_history(config, history)?;

    let suggestion = suggest_for_exercise(&catalog, &user, &history, exercise)?;
    println!(
        "{}: {} ({})",
        suggestion.name,
        describe_prescription(&suggestion.prescription),
        describe_basis(&suggestion.basis)
    );
    Ok(())
}

fn cmd_check(profile: &Path, exercise: &str, catalog: Option<&Path>) -> Result<()> {
    let user = load_context(profile)?;
    let catalog = load_catalog(catalog)?;

    match check_exercise_equipment(&catalog, &user.inventory, exercise)? {
        EquipmentCheck::Satisfied => println!("✓ You have everything for {}", exercise),
        EquipmentCheck::Missing(gap) => {
            println!("✗ Missing for {}: {}", exercise, gap.missing.join(", "));
            println!("  To buy: {}", gap.purchase_names().join(", "));
        }
    }
    Ok(())
}

fn cmd_swap(profile: &Path, exercise: &str, mode: &str, catalog: Option<&Path>) -> Result<()> {
    let mode: AdjustMode = mode.parse()?;
    let user = load_context(profile)?;
    let catalog = load_catalog(catalog)?;

    match find_alternative(&catalog, &user.inventory, exercise, mode)? {
        Alternative::Found(alternative) => {
            println!("Try {} instead of {}", alternative.name, exercise)
        }
        Alternative::NoCandidates => {
            println!("No {} alternative is listed for {}", mode, exercise)
        }
        Alternative::NoneEquipped(gaps) => {
            println!("No {} alternative fits your equipment:", mode);
            for CandidateGap { name, gap } in gaps {
                println!("  {} needs {}", name, gap.missing.join(", "));
            }
        }
    }
    Ok(())
}

fn cmd_log(
    config: &Config,
    exercise: String,
    phase: &str,
    weight: Option<f64>,
    band: Option<&str>,
    reps: Vec<u32>,
    time: Vec<u32>,
) -> Result<()> {
    let phase: Phase = phase.parse()?;
    let weight = match (weight, band) {
        (Some(weight), _) => Some(Load::Weight(weight)),
        (None, Some(band)) => Some(Load::Band(band.parse()?)),
        (None, None) => None,
    };
    if reps.is_empty() && time.is_empty() {
        return Err(Error::Other("log needs --reps or --time".into()));
    }

    let entry = HistoryEntry {
        exercise,
        phase,
        weight,
        reps,
        time,
    };

    let mut sink = JsonlHistory::new(config.history_path());
    sink.append(&entry)?;

    println!("✓ Logged {} to {}", entry.exercise, sink.path().display());
    Ok(())
}

fn display_workout(workout: &GeneratedWorkout) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {} DAY ({})", workout.day_label.to_uppercase(), workout.phase);
    println!("╰─────────────────────────────────────────╯");
    println!("  Split: {}", workout.split);
    println!();

    if workout.exercises.is_empty() {
        println!("  No exercises fit your equipment and filters today.");
    }
    for (i, exercise) in workout.exercises.iter().enumerate() {
        println!(
            "  {}. {} [{}]: {}",
            i + 1,
            exercise.name,
            exercise.muscle,
            describe_prescription(&exercise.prescription)
        );
    }

    println!();
    println!("  ~{} minutes", workout.estimated_minutes);
    println!();
}

fn describe_prescription(prescription: &Prescription) -> String {
    match prescription {
        Prescription::Gym {
            weight: Some(weight),
            reps,
        } => format!("{} x {} reps", weight, reps),
        Prescription::Gym { weight: None, reps } => {
            format!("no owned weight fits, {} reps", reps)
        }
        Prescription::Band {
            level: Some(level),
            reps,
        } => format!("{} band x {} reps", level, reps),
        Prescription::Band { level: None, reps } => {
            format!("no owned band fits, {} reps", reps)
        }
        Prescription::Bodyweight { reps } => format!("{} reps", reps),
        Prescription::Timed {
            seconds: Some(seconds),
        } => format!("{} seconds", seconds),
        Prescription::Timed { seconds: None } => "hold time not available".to_string(),
    }
}

fn describe_basis(basis: &IntensityBasis) -> String {
    match basis {
        IntensityBasis::Progression => "progression".to_string(),
        IntensityBasis::RepMaxEstimate => "estimated from another phase".to_string(),
        IntensityBasis::SimilarExercise { name } => format!("based on {}", name),
        IntensityBasis::ColdStart => "starting point".to_string(),
        IntensityBasis::Fallback => "no catalog data".to_string(),
    }
}
