//! Harder and easier swaps, and per-exercise equipment checks.

use crate::catalog::Catalog;
use crate::equipment::{EquipmentCheck, EquipmentGap, Inventory};
use crate::types::Exercise;
use crate::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Direction of a swap
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustMode {
    /// Follow the exercise's progression list
    Challenge,
    /// Follow the exercise's regression list
    Easy,
}

impl fmt::Display for AdjustMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdjustMode::Challenge => write!(f, "challenge"),
            AdjustMode::Easy => write!(f, "easy"),
        }
    }
}

impl FromStr for AdjustMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "challenge" | "harder" => Ok(AdjustMode::Challenge),
            "easy" | "easier" => Ok(AdjustMode::Easy),
            other => Err(Error::Other(format!("Unknown swap mode: {}", other))),
        }
    }
}

/// A listed candidate the user cannot equip
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CandidateGap {
    pub name: String,
    pub gap: EquipmentGap,
}

#[derive(Clone, Debug)]
pub enum Alternative<'c> {
    Found(&'c Exercise),
    /// The exercise lists no candidates in that direction
    NoCandidates,
    /// Every candidate needs equipment the user lacks
    NoneEquipped(Vec<CandidateGap>),
}

/// First candidate from the progression or regression list whose equipment
/// the user owns. Candidates missing from the catalog are skipped.
pub fn find_alternative<'c>(
    catalog: &'c Catalog,
    inventory: &Inventory,
    name: &str,
    mode: AdjustMode,
) -> Result<Alternative<'c>> {
    let exercise = catalog
        .get(name)
        .ok_or_else(|| Error::UnknownExercise(name.to_string()))?;

    let listed = match mode {
        AdjustMode::Challenge => &exercise.progression,
        AdjustMode::Easy => &exercise.regression,
    };

    let mut gaps = Vec::new();
    for candidate_name in listed {
        let Some(candidate) = catalog.get(candidate_name) else {
            tracing::warn!(
                "{} lists unknown {} candidate '{}'",
                exercise.name,
                mode,
                candidate_name
            );
            continue;
        };

        match inventory.check(&candidate.equipment) {
            EquipmentCheck::Satisfied => {
                tracing::info!("{} swap for {}: {}", mode, exercise.name, candidate.name);
                return Ok(Alternative::Found(candidate));
            }
            EquipmentCheck::Missing(gap) => gaps.push(CandidateGap {
                name: candidate.name.clone(),
                gap,
            }),
        }
    }

    if gaps.is_empty() {
        Ok(Alternative::NoCandidates)
    } else {
        Ok(Alternative::NoneEquipped(gaps))
    }
}

/// Equipment report for one catalog exercise
pub fn check_exercise_equipment(
    catalog: &Catalog,
    inventory: &Inventory,
    name: &str,
) -> Result<EquipmentCheck> {
    let exercise = catalog
        .get(name)
        .ok_or_else(|| Error::UnknownExercise(name.to_string()))?;
    Ok(inventory.check(&exercise.equipment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;
    use crate::equipment::EquipmentFamily;
    use crate::types::Load;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("Challenge".parse::<AdjustMode>().unwrap(), AdjustMode::Challenge);
        assert_eq!("easier".parse::<AdjustMode>().unwrap(), AdjustMode::Easy);
        assert!("sideways".parse::<AdjustMode>().is_err());
    }

    #[test]
    fn test_easier_swap_found() {
        let catalog = default_catalog().unwrap();
        let inventory = Inventory::new(["Olympic barbell", "Bench"]);
        match find_alternative(catalog, &inventory, "Barbell bench press", AdjustMode::Easy)
            .unwrap()
        {
            Alternative::Found(exercise) => assert_eq!(exercise.name, "Push up"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_harder_swap_reports_gaps() {
        let catalog = default_catalog().unwrap();
        let inventory = Inventory::new(["Olympic barbell", "Bench"]);
        match find_alternative(catalog, &inventory, "Barbell bench press", AdjustMode::Challenge)
            .unwrap()
        {
            Alternative::NoneEquipped(gaps) => {
                assert_eq!(gaps.len(), 1);
                assert_eq!(gaps[0].name, "Incline barbell bench press");
                assert_eq!(gaps[0].gap.missing, vec!["Incline bench".to_string()]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_no_candidates() {
        let catalog = default_catalog().unwrap();
        let result =
            find_alternative(catalog, &Inventory::default(), "Bench dip", AdjustMode::Challenge)
                .unwrap();
        assert!(matches!(result, Alternative::NoCandidates));
    }

    #[test]
    fn test_unknown_exercise() {
        let catalog = default_catalog().unwrap();
        let result = find_alternative(catalog, &Inventory::default(), "Moon squat", AdjustMode::Easy);
        assert!(matches!(result, Err(Error::UnknownExercise(_))));
    }

    #[test]
    fn test_check_exercise_equipment() {
        let catalog = default_catalog().unwrap();

        let inventory = Inventory::new(["Bench"]);
        match check_exercise_equipment(catalog, &inventory, "Dumbbell bench press").unwrap() {
            EquipmentCheck::Missing(gap) => {
                assert_eq!(gap.missing, vec!["2 Dumbbell".to_string()]);
                assert_eq!(gap.purchase_names(), vec!["dumbbells".to_string()]);
            }
            EquipmentCheck::Satisfied => panic!("dumbbells are not owned"),
        }

        let equipped = inventory.with_load(EquipmentFamily::Dumbbells, Load::Weight(10.0), 2);
        assert_eq!(
            check_exercise_equipment(catalog, &equipped, "Dumbbell bench press").unwrap(),
            EquipmentCheck::Satisfied
        );
        assert_eq!(
            check_exercise_equipment(catalog, &Inventory::default(), "Plank").unwrap(),
            EquipmentCheck::Satisfied
        );
    }
}
