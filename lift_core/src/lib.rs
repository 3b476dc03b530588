#![forbid(unsafe_code)]

//! Core domain model and workout generation for Lift.
//!
//! This crate provides:
//! - Domain types (exercises, records, prescriptions, user context)
//! - Equipment requirements, inventory and reconciliation
//! - Split tables, the split planner and day/phase resolution
//! - Catalog filtering, volume allocation and exercise selection
//! - The intensity engine and the generation pipeline
//! - Persistence helpers (profiles, JSONL history, CSV export)

pub mod types;
pub mod error;
pub mod equipment;
pub mod split;
pub mod phase;
pub mod catalog;
pub mod filter;
pub mod allocation;
pub mod selection;
pub mod reconcile;
pub mod intensity;
pub mod engine;
pub mod alternatives;
pub mod config;
pub mod logging;
pub mod history;
pub mod profile;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, default_catalog, Catalog};
pub use config::{AllocatorKind, Config, GenerationConfig};
pub use equipment::{EquipmentCheck, EquipmentGap, EquipmentRequirement, Inventory};
pub use split::{recommend_split, SplitName};
pub use history::{History, HistoryEntry, JsonlHistory, RecordSink};
pub use profile::UserProfile;
pub use engine::{generate_workout, suggest_for_exercise, GeneratedWorkout};
pub use alternatives::{check_exercise_equipment, find_alternative, AdjustMode, Alternative};
