//! CSV export of generated workouts.

use crate::types::{GeneratedExercise, IntensityBasis, Prescription};
use crate::Result;
use std::io::Write;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    order: usize,
    exercise: String,
    modality: String,
    reps: Option<u32>,
    weight: Option<f64>,
    band: Option<String>,
    seconds: Option<u32>,
    basis: String,
}

impl CsvRow {
    fn new(order: usize, exercise: &GeneratedExercise) -> Self {
        let (weight, band, seconds) = match &exercise.prescription {
            Prescription::Gym { weight, .. } => (*weight, None, None),
            Prescription::Band { level, .. } => (None, level.map(|l| l.label().to_string()), None),
            Prescription::Bodyweight { .. } => (None, None, None),
            Prescription::Timed { seconds } => (None, None, *seconds),
        };
        CsvRow {
            order,
            exercise: exercise.name.clone(),
            modality: exercise.modality().to_string(),
            reps: exercise.prescription.reps(),
            weight,
            band,
            seconds,
            basis: basis_label(&exercise.basis),
        }
    }
}

fn basis_label(basis: &IntensityBasis) -> String {
    match basis {
        IntensityBasis::Progression => "progression".into(),
        IntensityBasis::RepMaxEstimate => "rep_max_estimate".into(),
        IntensityBasis::SimilarExercise { name } => format!("similar:{}", name),
        IntensityBasis::ColdStart => "cold_start".into(),
        IntensityBasis::Fallback => "fallback".into(),
    }
}

/// Write exercises as CSV with a header row, numbering them from 1
pub fn write_csv<W: Write>(out: W, exercises: &[GeneratedExercise]) -> Result<usize> {
    let mut writer = csv::Writer::from_writer(out);
    for (i, exercise) in exercises.iter().enumerate() {
        writer.serialize(CsvRow::new(i + 1, exercise))?;
    }
    writer.flush()?;
    Ok(exercises.len())
}

/// Write exercises to a CSV file, replacing any existing file
pub fn export_csv(path: &Path, exercises: &[GeneratedExercise]) -> Result<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    let written = write_csv(file, exercises)?;
    tracing::info!("Exported {} exercises to {:?}", written, path);
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BandLevel;

    fn exercises() -> Vec<GeneratedExercise> {
        vec![
            GeneratedExercise {
                name: "Barbell bench press".into(),
                muscle: "Chest".into(),
                prescription: Prescription::Gym {
                    weight: Some(20.0),
                    reps: 10,
                },
                basis: IntensityBasis::ColdStart,
            },
            GeneratedExercise {
                name: "Band lateral raise".into(),
                muscle: "Shoulders".into(),
                prescription: Prescription::Band {
                    level: Some(BandLevel::ExtraLight),
                    reps: 12,
                },
                basis: IntensityBasis::SimilarExercise {
                    name: "Dumbbell lateral raise".into(),
                },
            },
            GeneratedExercise {
                name: "Plank".into(),
                muscle: "Abs".into(),
                prescription: Prescription::Timed { seconds: None },
                basis: IntensityBasis::Fallback,
            },
        ]
    }

    #[test]
    fn test_write_csv() {
        let mut buffer = Vec::new();
        let written = write_csv(&mut buffer, &exercises()).unwrap();
        assert_eq!(written, 3);

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "order,exercise,modality,reps,weight,band,seconds,basis"
        );
        assert_eq!(
            lines[1],
            "1,Barbell bench press,Gym Equipment,10,20.0,,,cold_start"
        );
        assert_eq!(
            lines[2],
            "2,Band lateral raise,Resistance Band,12,,Extra Light,,similar:Dumbbell lateral raise"
        );
        assert_eq!(lines[3], "3,Plank,Timed Exercise,,,,,fallback");
    }

    #[test]
    fn test_export_csv_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("out").join("workout.csv");

        export_csv(&path, &exercises()).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.records().count(), 3);
    }
}
