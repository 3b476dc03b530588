//! Equipment reconciliation.
//!
//! Snaps computed weights and band levels onto what the user actually owns.
//! A suggestion with no owned match at all resolves to `None`.

use crate::equipment::{EquipmentFamily, Inventory};
use crate::types::{same_weight, BandLevel, Load};

/// Whether the user's barbells stand in for fixed weight bars
fn bar_substitutes(family: EquipmentFamily, inventory: &Inventory) -> bool {
    family == EquipmentFamily::FixedWeightBar
        && (inventory.owns_name("olympic barbell") || inventory.owns_name("ez curl bar"))
}

/// Pair prescriptions are combined weights; the ledger is per unit
fn per_unit(weight: f64, family: EquipmentFamily, quantity: u32) -> f64 {
    if family.is_pairable() && quantity == 2 {
        weight / 2.0
    } else {
        weight
    }
}

fn combined(weight: f64, family: EquipmentFamily, quantity: u32) -> f64 {
    if family.is_pairable() && quantity == 2 {
        weight * 2.0
    } else {
        weight
    }
}

/// Closest owned weight held at least `quantity` times, by distance then
/// lighter first. Returned as a combined figure for pairs.
pub fn closest_owned_weight(
    suggested: f64,
    family: EquipmentFamily,
    quantity: u32,
    inventory: &Inventory,
) -> Option<f64> {
    let target = per_unit(suggested, family, quantity);
    inventory
        .loads(family)
        .iter()
        .filter(|owned| owned.count >= quantity)
        .filter_map(|owned| owned.load.weight())
        .min_by(|a, b| {
            let da = (a - target).abs();
            let db = (b - target).abs();
            da.total_cmp(&db).then(a.total_cmp(b))
        })
        .map(|w| combined(w, family, quantity))
}

/// Closest owned band level held at least `quantity` times, scanning outward
/// from the target and checking the lighter side first
pub fn closest_owned_band(
    level: BandLevel,
    family: EquipmentFamily,
    quantity: u32,
    inventory: &Inventory,
) -> Option<BandLevel> {
    let owned = |band: BandLevel| inventory.count_of(family, &Load::Band(band)) >= quantity;
    let start = level.position();
    let ladder = BandLevel::ALL;

    for distance in 0..ladder.len() {
        if let Some(lower) = start.checked_sub(distance) {
            if owned(ladder[lower]) {
                return Some(ladder[lower]);
            }
        }
        if let Some(&higher) = ladder.get(start + distance) {
            if owned(higher) {
                return Some(higher);
            }
        }
    }
    None
}

/// Reconcile a gym weight. Exercises without a ledger family keep their weight.
pub fn reconcile_weight(
    weight: f64,
    equipment: Option<(EquipmentFamily, u32)>,
    inventory: &Inventory,
) -> Option<f64> {
    let Some((family, quantity)) = equipment else {
        return Some(weight);
    };
    if bar_substitutes(family, inventory) {
        return Some(weight);
    }

    let unit = per_unit(weight, family, quantity);
    if inventory.count_of(family, &Load::Weight(unit)) >= quantity {
        return Some(weight);
    }

    let snapped = closest_owned_weight(weight, family, quantity, inventory);
    match snapped {
        Some(w) if !same_weight(w, weight) => {
            tracing::debug!("Snapped {} {} to owned {}", family.label(), weight, w)
        }
        None => tracing::debug!(
            "No owned {} for {} x{}",
            family.label(),
            weight,
            quantity
        ),
        _ => {}
    }
    snapped
}

/// Reconcile a band level. Exercises without a ledger family keep their level.
pub fn reconcile_band(
    level: BandLevel,
    equipment: Option<(EquipmentFamily, u32)>,
    inventory: &Inventory,
) -> Option<BandLevel> {
    let Some((family, quantity)) = equipment else {
        return Some(level);
    };
    if inventory.count_of(family, &Load::Band(level)) >= quantity {
        return Some(level);
    }
    closest_owned_band(level, family, quantity, inventory)
}
