//! Exercise catalog.
//!
//! The built-in catalog is embedded JSON, parsed once and cached. Callers may
//! also load their own catalog from a JSON file of exercise entries.

use crate::types::*;
use crate::{Error, Result};
use once_cell::sync::OnceCell;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

const DEFAULT_CATALOG_JSON: &str = include_str!("../data/catalog.json");

/// Cached default catalog - parsed once and reused across all operations
static DEFAULT_CATALOG: OnceCell<Catalog> = OnceCell::new();

/// Get a reference to the cached default catalog
pub fn default_catalog() -> Result<&'static Catalog> {
    DEFAULT_CATALOG.get_or_try_init(build_default_catalog)
}

/// Parse the embedded catalog
///
/// **Note**: For production use, prefer `default_catalog()` which returns a
/// cached reference.
pub fn build_default_catalog() -> Result<Catalog> {
    Catalog::from_json_str(DEFAULT_CATALOG_JSON)
}

/// Ordered exercise table with a case-insensitive name index
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    exercises: Vec<Exercise>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate names
    pub fn new(exercises: Vec<Exercise>) -> Result<Self> {
        let mut index = HashMap::with_capacity(exercises.len());
        for (i, exercise) in exercises.iter().enumerate() {
            if index.insert(exercise.name.to_lowercase(), i).is_some() {
                return Err(Error::CatalogValidation(format!(
                    "duplicate exercise name '{}'",
                    exercise.name
                )));
            }
        }
        Ok(Self { exercises, index })
    }

    /// Parse a JSON array of exercises. Consistency problems other than
    /// duplicate names are logged, not fatal.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let exercises: Vec<Exercise> = serde_json::from_str(json)?;
        let catalog = Self::new(exercises)?;
        for problem in catalog.validate() {
            tracing::warn!("Catalog: {}", problem);
        }
        tracing::debug!("Loaded catalog with {} exercises", catalog.len());
        Ok(catalog)
    }

    /// Load a catalog from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    /// Case-insensitive lookup by name
    pub fn get(&self, name: &str) -> Option<&Exercise> {
        self.index
            .get(&name.trim().to_lowercase())
            .map(|&i| &self.exercises[i])
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let mut seen = BTreeSet::new();
        for exercise in &self.exercises {
            let name = &exercise.name;
            if name.trim().is_empty() {
                errors.push("Exercise has empty name".to_string());
            }
            if !seen.insert(name.to_lowercase()) {
                errors.push(format!("Duplicate exercise name '{}'", name));
            }
            if exercise.level.is_empty() {
                errors.push(format!("Exercise '{}' allows no experience level", name));
            }
            if exercise.main_muscles.is_empty() {
                errors.push(format!("Exercise '{}' has no main muscles", name));
            }
            if exercise.exercise_purpose.is_empty() {
                errors.push(format!("Exercise '{}' has no purpose tags", name));
            }

            // Text lower bounds must be a band level or a time
            if let LowerBound::Text(text) = &exercise.lower_bound {
                match exercise.modality() {
                    Modality::Timed if exercise.lower_bound.seconds().is_none() => {
                        errors.push(format!(
                            "Exercise '{}' has unparseable time '{}'",
                            name, text
                        ));
                    }
                    Modality::Bodyweight => {
                        errors.push(format!(
                            "Exercise '{}' has unrecognised lower bound '{}'",
                            name, text
                        ));
                    }
                    _ => {}
                }
            }

            let references = [
                ("variation", &exercise.variations),
                ("progression", &exercise.progression),
                ("regression", &exercise.regression),
            ];
            for (kind, names) in references {
                for other in names {
                    if self.get(other).is_none() {
                        errors.push(format!(
                            "Exercise '{}' references non-existent {} '{}'",
                            name, kind, other
                        ));
                    }
                }
            }
        }

        errors
    }
}
