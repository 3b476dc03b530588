//! Exercise history.
//!
//! In memory, history maps exercise names to their records, oldest first.
//! On disk it is a JSONL file of `{exercise, phase, weight, reps, time}`
//! entries, appended under an exclusive file lock and read under a shared one.

use crate::types::{ExerciseRecord, Load, Phase};
use crate::Result;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Per-exercise records, most recent last. Names match case-insensitively.
#[derive(Clone, Debug, Default)]
pub struct History {
    by_exercise: BTreeMap<String, Vec<ExerciseRecord>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, exercise: &str, record: ExerciseRecord) {
        self.by_exercise
            .entry(exercise.trim().to_lowercase())
            .or_default()
            .push(record);
    }

    /// Records for one exercise; empty when there are none
    pub fn records(&self, exercise: &str) -> &[ExerciseRecord] {
        self.by_exercise
            .get(&exercise.trim().to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.by_exercise.is_empty()
    }

    /// Number of exercises with at least one record
    pub fn len(&self) -> usize {
        self.by_exercise.len()
    }
}

impl FromIterator<HistoryEntry> for History {
    fn from_iter<I: IntoIterator<Item = HistoryEntry>>(iter: I) -> Self {
        let mut history = History::new();
        for entry in iter {
            let (exercise, record) = entry.into_parts();
            history.push(&exercise, record);
        }
        history
    }
}

/// One line of the history file
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub exercise: String,
    pub phase: Phase,
    #[serde(default)]
    pub weight: Option<Load>,
    #[serde(default)]
    pub reps: Vec<u32>,
    #[serde(default)]
    pub time: Vec<u32>,
}

impl HistoryEntry {
    pub fn new(exercise: impl Into<String>, record: ExerciseRecord) -> Self {
        Self {
            exercise: exercise.into(),
            phase: record.phase,
            weight: record.weight,
            reps: record.reps,
            time: record.times,
        }
    }

    pub fn into_parts(self) -> (String, ExerciseRecord) {
        (
            self.exercise,
            ExerciseRecord {
                phase: self.phase,
                weight: self.weight,
                reps: self.reps,
                times: self.time,
            },
        )
    }
}

/// Destination for newly logged records
pub trait RecordSink {
    fn append(&mut self, entry: &HistoryEntry) -> Result<()>;
}

/// JSONL-based history file with file locking
pub struct JsonlHistory {
    path: PathBuf,
}

impl JsonlHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load everything recorded so far
    pub fn load(&self) -> Result<History> {
        Ok(read_entries(&self.path)?.into_iter().collect())
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl RecordSink for JsonlHistory {
    fn append(&mut self, entry: &HistoryEntry) -> Result<()> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;

        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(entry)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        drop(writer);

        file.unlock()?;

        tracing::debug!("Appended {} record to {:?}", entry.exercise, self.path);
        Ok(())
    }
}

/// Read all entries from a history file. Missing files are empty; malformed
/// lines are skipped with a warning.
pub fn read_entries(path: &Path) -> Result<Vec<HistoryEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut entries = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<HistoryEntry>(&line) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                tracing::warn!(
                    "Skipping malformed history line {}: {}",
                    line_num + 1,
                    e
                );
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} history entries from {:?}", entries.len(), path);
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BandLevel;

    fn bench(weight: f64, reps: &[u32]) -> HistoryEntry {
        HistoryEntry::new(
            "Barbell bench press",
            ExerciseRecord {
                phase: Phase::Strength,
                weight: Some(Load::Weight(weight)),
                reps: reps.to_vec(),
                times: vec![],
            },
        )
    }

    #[test]
    fn test_append_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = JsonlHistory::new(temp_dir.path().join("nested").join("history.jsonl"));

        store.append(&bench(60.0, &[5, 5, 5])).unwrap();
        store.append(&bench(70.0, &[5, 5, 4])).unwrap();

        let history = store.load().unwrap();
        let records = history.records("barbell bench press");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].weight_value(), Some(70.0));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = JsonlHistory::new(temp_dir.path().join("history.jsonl"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("history.jsonl");
        std::fs::write(
            &path,
            concat!(
                r#"{"exercise":"Plank","phase":"Endurance","time":[30,30]}"#,
                "\n",
                "not json\n",
                "\n",
                r#"{"exercise":"Band lateral raise","phase":"Hypertrophy","weight":"Light","reps":[12,12]}"#,
                "\n",
            ),
        )
        .unwrap();

        let entries = read_entries(&path).unwrap();
        assert_eq!(entries.len(), 2);

        let history: History = entries.into_iter().collect();
        assert_eq!(history.records("Plank")[0].times, vec![30, 30]);
        assert_eq!(
            history.records("Band lateral raise")[0].band(),
            Some(BandLevel::Light)
        );
    }

    #[test]
    fn test_unknown_exercise_has_no_records() {
        let history = History::new();
        assert!(history.records("Anything").is_empty());
    }
}
