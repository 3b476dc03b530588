//! Equipment resolver.
//!
//! Parses catalog equipment requirements into OR-of-AND groups and answers
//! ownership questions against a user's [`Inventory`]: plain equipment names
//! plus a per-family ledger of owned weights/band levels and their counts.

use crate::types::{BandLevel, Load};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::iter::Peekable;
use std::str::Chars;

/// Bodyweight token; a group containing it is always satisfied
pub const BODYWEIGHT_TOKEN: &str = "None";

// ============================================================================
// Requirements
// ============================================================================

/// Alternative requirement sets: satisfied when every token of at least one
/// group is owned. No groups means no requirement.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Vec<Vec<String>>")]
pub struct EquipmentRequirement {
    groups: Vec<Vec<String>>,
}

impl EquipmentRequirement {
    /// Build from explicit groups, dropping blank tokens and empty groups
    pub fn new(groups: Vec<Vec<String>>) -> Self {
        let groups = groups
            .into_iter()
            .map(|group| {
                group
                    .into_iter()
                    .map(|token| token.trim().to_string())
                    .filter(|token| !token.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|group| !group.is_empty())
            .collect();
        Self { groups }
    }

    /// Parse a raw JSON value: a flat list (one group), a list of lists,
    /// a string holding either of those, or brace-delimited text.
    pub fn from_value(raw: &Value) -> Result<Self> {
        match raw {
            Value::Null => Ok(Self::default()),
            Value::String(text) => Self::parse_text(text),
            Value::Array(items) => groups_from_array(items).map(Self::new),
            other => Err(Error::MalformedEquipment(other.to_string())),
        }
    }

    /// Parse textual forms: `[["A","B"],["C"]]`, `["A","B"]`,
    /// `{{"A","B"},{C}}` or `{A,B}`
    pub fn parse_text(raw: &str) -> Result<Self> {
        let text = raw.trim();
        if text.is_empty() {
            return Ok(Self::default());
        }
        if text.starts_with('[') {
            let value: Value = serde_json::from_str(text)
                .map_err(|e| Error::MalformedEquipment(format!("{}: {}", raw, e)))?;
            let Value::Array(items) = value else {
                return Err(Error::MalformedEquipment(raw.to_string()));
            };
            return groups_from_array(&items).map(Self::new);
        }
        if text.starts_with('{') {
            return parse_braces(text).map(Self::new);
        }
        Err(Error::MalformedEquipment(raw.to_string()))
    }

    pub fn groups(&self) -> &[Vec<String>] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// True when there is no requirement or some group contains "None"
    pub fn is_bodyweight(&self) -> bool {
        self.groups.is_empty()
            || self.groups.iter().any(|group| {
                group
                    .iter()
                    .any(|token| token.eq_ignore_ascii_case(BODYWEIGHT_TOKEN))
            })
    }
}

impl TryFrom<Value> for EquipmentRequirement {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(&value)
    }
}

impl From<EquipmentRequirement> for Vec<Vec<String>> {
    fn from(req: EquipmentRequirement) -> Self {
        req.groups
    }
}

fn groups_from_array(items: &[Value]) -> Result<Vec<Vec<String>>> {
    if items.iter().all(Value::is_string) {
        let group = items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect::<Vec<_>>();
        return Ok(if group.is_empty() { vec![] } else { vec![group] });
    }

    items
        .iter()
        .map(|item| match item {
            Value::Array(tokens) => tokens
                .iter()
                .map(|t| {
                    t.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| Error::MalformedEquipment(t.to_string()))
                })
                .collect(),
            other => Err(Error::MalformedEquipment(other.to_string())),
        })
        .collect()
}

enum BraceNode {
    Text(String),
    List(Vec<BraceNode>),
}

fn parse_braces(raw: &str) -> Result<Vec<Vec<String>>> {
    let mut chars = raw.chars().peekable();
    if chars.next() != Some('{') {
        return Err(Error::MalformedEquipment(raw.to_string()));
    }
    let nodes = parse_brace_list(&mut chars, raw)?;
    if chars.any(|c| !c.is_whitespace()) {
        return Err(Error::MalformedEquipment(format!(
            "{}: trailing characters",
            raw
        )));
    }

    if nodes.iter().all(|n| matches!(n, BraceNode::Text(_))) {
        let group = nodes
            .into_iter()
            .filter_map(|n| match n {
                BraceNode::Text(t) => Some(t),
                BraceNode::List(_) => None,
            })
            .collect::<Vec<_>>();
        return Ok(if group.is_empty() { vec![] } else { vec![group] });
    }

    nodes
        .into_iter()
        .map(|node| match node {
            BraceNode::List(inner) => inner
                .into_iter()
                .map(|n| match n {
                    BraceNode::Text(t) => Ok(t),
                    BraceNode::List(_) => Err(Error::MalformedEquipment(format!(
                        "{}: nested too deeply",
                        raw
                    ))),
                })
                .collect(),
            BraceNode::Text(t) => Err(Error::MalformedEquipment(format!(
                "{}: mixed tokens and groups at '{}'",
                raw, t
            ))),
        })
        .collect()
}

/// Parse list items after an opening brace up to and including its closing brace
fn parse_brace_list(chars: &mut Peekable<Chars<'_>>, raw: &str) -> Result<Vec<BraceNode>> {
    let mut nodes = Vec::new();
    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        match chars.peek().copied() {
            None => {
                return Err(Error::MalformedEquipment(format!(
                    "{}: unterminated brace",
                    raw
                )))
            }
            Some('}') => {
                chars.next();
                return Ok(nodes);
            }
            Some(',') => {
                chars.next();
            }
            Some('{') => {
                chars.next();
                nodes.push(BraceNode::List(parse_brace_list(chars, raw)?));
            }
            Some('"') => {
                chars.next();
                let mut token = String::new();
                loop {
                    match chars.next() {
                        None => {
                            return Err(Error::MalformedEquipment(format!(
                                "{}: unterminated quote",
                                raw
                            )))
                        }
                        Some('\\') => {
                            if let Some(escaped) = chars.next() {
                                token.push(escaped);
                            }
                        }
                        Some('"') => break,
                        Some(c) => token.push(c),
                    }
                }
                nodes.push(BraceNode::Text(token));
            }
            Some(_) => {
                let mut token = String::new();
                while let Some(c) = chars.next_if(|c| *c != ',' && *c != '}') {
                    token.push(c);
                }
                let token = token.trim();
                if token.contains('{') || token.contains('"') {
                    return Err(Error::MalformedEquipment(raw.to_string()));
                }
                nodes.push(BraceNode::Text(token.to_string()));
            }
        }
    }
}

// ============================================================================
// Free-weight and band families
// ============================================================================

/// Equipment with a discrete owned-weight or band-level ledger
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EquipmentFamily {
    Dumbbells,
    Kettlebells,
    #[serde(rename = "Fixed weight bar")]
    FixedWeightBar,
    #[serde(rename = "Mini loop band")]
    MiniLoopBand,
    #[serde(rename = "Loop band")]
    LoopBand,
    #[serde(rename = "Handle band")]
    HandleBand,
}

impl EquipmentFamily {
    pub fn label(self) -> &'static str {
        match self {
            EquipmentFamily::Dumbbells => "Dumbbells",
            EquipmentFamily::Kettlebells => "Kettlebells",
            EquipmentFamily::FixedWeightBar => "Fixed weight bar",
            EquipmentFamily::MiniLoopBand => "Mini loop band",
            EquipmentFamily::LoopBand => "Loop band",
            EquipmentFamily::HandleBand => "Handle band",
        }
    }

    /// Resolve an inventory row name, accepting the stored aliases
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "dumbbells" | "dumbbell" => Some(EquipmentFamily::Dumbbells),
            "kettlebells" | "kettlebell" => Some(EquipmentFamily::Kettlebells),
            "fixed weight bar" | "fixedweightbar" | "fixed weight bars" => {
                Some(EquipmentFamily::FixedWeightBar)
            }
            "mini loop band" | "mini loop bands" => Some(EquipmentFamily::MiniLoopBand),
            "loop band" | "loop bands" | "regular loop band" => Some(EquipmentFamily::LoopBand),
            "handle band" | "handle bands" => Some(EquipmentFamily::HandleBand),
            _ => None,
        }
    }

    /// Dumbbells and kettlebells prescribe a combined weight for a pair
    pub fn is_pairable(self) -> bool {
        matches!(self, EquipmentFamily::Dumbbells | EquipmentFamily::Kettlebells)
    }

    /// Singular label used for "1 <x>" / "2 <x>" inventory names
    fn unit_label(self) -> Option<&'static str> {
        match self {
            EquipmentFamily::Dumbbells => Some("dumbbell"),
            EquipmentFamily::Kettlebells => Some("kettlebell"),
            EquipmentFamily::LoopBand => Some("loop band"),
            _ => None,
        }
    }
}

/// Requirement tokens that name a specific family and quantity
const FAMILY_TOKENS: [(&str, EquipmentFamily, u32); 9] = [
    ("1 dumbbell", EquipmentFamily::Dumbbells, 1),
    ("2 dumbbell", EquipmentFamily::Dumbbells, 2),
    ("1 kettlebell", EquipmentFamily::Kettlebells, 1),
    ("2 kettlebell", EquipmentFamily::Kettlebells, 2),
    ("fixed weight bar", EquipmentFamily::FixedWeightBar, 1),
    ("mini loop band", EquipmentFamily::MiniLoopBand, 1),
    ("1 loop band", EquipmentFamily::LoopBand, 1),
    ("2 loop band", EquipmentFamily::LoopBand, 2),
    ("handle band", EquipmentFamily::HandleBand, 1),
];

/// The first family token found across the requirement's groups, with the
/// number of matching units it needs
pub fn specific_equipment(req: &EquipmentRequirement) -> Option<(EquipmentFamily, u32)> {
    req.groups().iter().flatten().find_map(|token| {
        let lower = token.to_lowercase();
        FAMILY_TOKENS
            .iter()
            .find(|(name, _, _)| *name == lower)
            .map(|(_, family, quantity)| (*family, *quantity))
    })
}

// ============================================================================
// Inventory
// ============================================================================

/// One raw inventory row as stored by the caller
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EquipmentRow {
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Weight, band level or time label of the row
    #[serde(default)]
    pub weight_resistance_time: Option<RowLabel>,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RowLabel {
    Number(f64),
    Text(String),
}

impl RowLabel {
    fn to_load(&self) -> Option<Load> {
        match self {
            RowLabel::Number(w) => Some(Load::Weight(*w)),
            RowLabel::Text(t) => t
                .trim()
                .parse::<f64>()
                .ok()
                .map(Load::Weight)
                .or_else(|| t.parse::<BandLevel>().ok().map(Load::Band)),
        }
    }
}

/// Owned units of one discrete load
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OwnedLoad {
    pub load: Load,
    pub count: u32,
}

/// Queryable view of what a user owns
#[derive(Clone, Debug, Default)]
pub struct Inventory {
    /// Lowercased equipment names
    names: BTreeSet<String>,
    ledger: BTreeMap<EquipmentFamily, Vec<OwnedLoad>>,
}

impl Inventory {
    /// Inventory from plain equipment names. "None" is always owned.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names: BTreeSet<String> = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_lowercase())
            .filter(|n| !n.is_empty())
            .collect();
        names.insert(BODYWEIGHT_TOKEN.to_lowercase());
        Self {
            names,
            ledger: BTreeMap::new(),
        }
    }

    /// Builder-style ledger entry
    pub fn with_load(mut self, family: EquipmentFamily, load: Load, count: u32) -> Self {
        self.add_load(family, load, count);
        self
    }

    /// Record `count` owned units of `load`. Repeated loads accumulate.
    pub fn add_load(&mut self, family: EquipmentFamily, load: Load, count: u32) {
        if count == 0 {
            return;
        }
        let loads = self.ledger.entry(family).or_default();
        match loads.iter_mut().find(|owned| owned.load.matches(&load)) {
            Some(owned) => owned.count += count,
            None => loads.push(OwnedLoad { load, count }),
        }
        self.names.insert(family.label().to_lowercase());
        self.refresh_unit_labels(family);
    }

    /// Build from raw inventory rows. Family rows feed the ledger; every
    /// row with a positive quantity contributes its name.
    pub fn from_rows(rows: &[EquipmentRow]) -> Self {
        let mut inventory = Self::new(
            rows.iter()
                .filter(|row| row.quantity > 0)
                .map(|row| row.name.as_str()),
        );

        for row in rows.iter().filter(|row| row.quantity > 0) {
            let Some(family) = EquipmentFamily::from_name(&row.name) else {
                continue;
            };
            match row.weight_resistance_time.as_ref().and_then(RowLabel::to_load) {
                Some(load) => inventory.add_load(family, load, row.quantity),
                None => tracing::debug!(
                    "Inventory row {:?} has no usable weight/resistance label",
                    row.name
                ),
            }
        }

        tracing::debug!(
            "Built inventory with {} names and {} ledger families",
            inventory.names.len(),
            inventory.ledger.len()
        );
        inventory
    }

    /// Adds "1 dumbbell"-style names once any unit exists and "2 dumbbell"
    /// once some load has a matched pair
    fn refresh_unit_labels(&mut self, family: EquipmentFamily) {
        let Some(unit) = family.unit_label() else {
            return;
        };
        if self.has_units(family, 1) {
            self.names.insert(format!("1 {}", unit));
        }
        if self.has_units(family, 2) {
            self.names.insert(format!("2 {}", unit));
        }
    }

    /// Case-insensitive exact name membership
    pub fn owns_name(&self, name: &str) -> bool {
        self.names.contains(&name.trim().to_lowercase())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn loads(&self, family: EquipmentFamily) -> &[OwnedLoad] {
        self.ledger.get(&family).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Units owned of exactly this load
    pub fn count_of(&self, family: EquipmentFamily, load: &Load) -> u32 {
        self.loads(family)
            .iter()
            .filter(|owned| owned.load.matches(load))
            .map(|owned| owned.count)
            .sum()
    }

    /// Whether some single load of the family is owned at least `count` times
    pub fn has_units(&self, family: EquipmentFamily, count: u32) -> bool {
        self.loads(family).iter().any(|owned| owned.count >= count)
    }

    /// Resolve one requirement token against the inventory
    pub fn has(&self, token: &str) -> bool {
        let token = token.trim().to_lowercase();
        if token.is_empty() || token == BODYWEIGHT_TOKEN.to_lowercase() {
            return true;
        }

        let units = match token.as_str() {
            "dumbbell" | "1 dumbbell" | "dumbbells" => Some((EquipmentFamily::Dumbbells, 1)),
            "2 dumbbell" => Some((EquipmentFamily::Dumbbells, 2)),
            "kettlebell" | "1 kettlebell" | "kettlebells" => {
                Some((EquipmentFamily::Kettlebells, 1))
            }
            "2 kettlebell" => Some((EquipmentFamily::Kettlebells, 2)),
            _ => None,
        };
        if let Some((family, count)) = units {
            if self.has_units(family, count) {
                return true;
            }
        }

        self.names.contains(&token)
    }

    /// Every token of the group is "None" or an owned name. This is the
    /// looser check used to gate catalog inclusion.
    pub fn owns_group_by_name(&self, group: &[String]) -> bool {
        group
            .iter()
            .all(|token| token.eq_ignore_ascii_case(BODYWEIGHT_TOKEN) || self.owns_name(token))
    }

    /// Full satisfaction check with a gap report for the closest group
    pub fn check(&self, req: &EquipmentRequirement) -> EquipmentCheck {
        if req.is_bodyweight() {
            return EquipmentCheck::Satisfied;
        }

        let mut closest: Option<EquipmentGap> = None;
        for (index, group) in req.groups().iter().enumerate() {
            let missing: Vec<String> = group
                .iter()
                .filter(|token| !self.has(token))
                .cloned()
                .collect();
            if missing.is_empty() {
                return EquipmentCheck::Satisfied;
            }

            let better = match &closest {
                None => true,
                Some(best) => {
                    (missing.len(), group.len())
                        < (best.missing.len(), req.groups()[best.group_index].len())
                }
            };
            if better {
                closest = Some(EquipmentGap {
                    group_index: index,
                    missing,
                });
            }
        }

        match closest {
            Some(gap) => EquipmentCheck::Missing(gap),
            None => EquipmentCheck::Satisfied,
        }
    }

    pub fn satisfies(&self, req: &EquipmentRequirement) -> bool {
        self.check(req) == EquipmentCheck::Satisfied
    }
}

/// Result of checking one requirement against an inventory
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EquipmentCheck {
    Satisfied,
    Missing(EquipmentGap),
}

/// The requirement group closest to being owned and what it lacks
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EquipmentGap {
    pub group_index: usize,
    pub missing: Vec<String>,
}

impl EquipmentGap {
    /// Shopping-list names for the missing tokens
    pub fn purchase_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for token in &self.missing {
            let name = purchase_name(token);
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}

/// Catalogue product name for a requirement token: "2 Dumbbell" becomes
/// "dumbbells", "1 Loop band" becomes "regular loop band" and
/// "1 Single grip handle" becomes "single grip handle"
pub fn purchase_name(token: &str) -> String {
    let lower = token.trim().to_lowercase();
    match lower.as_str() {
        "dumbbell" | "1 dumbbell" | "2 dumbbell" | "dumbbells" => return "dumbbells".into(),
        "kettlebell" | "1 kettlebell" | "2 kettlebell" | "kettlebells" => {
            return "kettlebells".into()
        }
        "1 loop band" | "2 loop band" => return "regular loop band".into(),
        _ => {}
    }

    match lower.split_once(' ') {
        Some((n, rest)) if n.chars().all(|c| c.is_ascii_digit()) => rest.trim().to_string(),
        _ => lower,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn req(groups: &[&[&str]]) -> EquipmentRequirement {
        EquipmentRequirement::new(
            groups
                .iter()
                .map(|g| g.iter().map(|t| t.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_parse_native_lists() {
        let flat = EquipmentRequirement::from_value(&json!(["Bench", "Olympic barbell"])).unwrap();
        assert_eq!(flat.groups().len(), 1);

        let nested =
            EquipmentRequirement::from_value(&json!([["A", "B"], ["C"]])).unwrap();
        assert_eq!(nested, req(&[&["A", "B"], &["C"]]));

        let empty = EquipmentRequirement::from_value(&json!([])).unwrap();
        assert!(empty.is_empty());
        assert!(empty.is_bodyweight());
    }

    #[test]
    fn test_parse_text_forms() {
        let json_text = EquipmentRequirement::parse_text(r#"[["A","B"],["C"]]"#).unwrap();
        let braces = EquipmentRequirement::parse_text(r#"{{"A","B"},{"C"}}"#).unwrap();
        let bare = EquipmentRequirement::parse_text("{{A, B},{C}}").unwrap();
        assert_eq!(json_text, braces);
        assert_eq!(braces, bare);

        let single = EquipmentRequirement::parse_text("{Pull up bar,\"1 Loop band\"}").unwrap();
        assert_eq!(single, req(&[&["Pull up bar", "1 Loop band"]]));

        assert!(EquipmentRequirement::parse_text("{}").unwrap().is_empty());
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(
            EquipmentRequirement::parse_text("{{A,B}"),
            Err(Error::MalformedEquipment(_))
        ));
        assert!(EquipmentRequirement::parse_text("{A,{B}}").is_err());
        assert!(EquipmentRequirement::parse_text("Bench").is_err());
        assert!(EquipmentRequirement::from_value(&json!([["A"], 3])).is_err());
        assert!(EquipmentRequirement::from_value(&json!(42)).is_err());
    }

    #[test]
    fn test_deserialize_from_string_field() {
        let parsed: EquipmentRequirement =
            serde_json::from_value(json!("{{\"2 Dumbbell\",Bench}}")).unwrap();
        assert_eq!(parsed, req(&[&["2 Dumbbell", "Bench"]]));
    }

    #[test]
    fn test_dnf_satisfaction() {
        let inventory = Inventory::new(["C"]);
        assert!(inventory.satisfies(&req(&[&["A", "B"], &["C"]])));

        let inventory = Inventory::new(["A", "B"]);
        assert!(inventory.satisfies(&req(&[&["A", "B"], &["C"]])));

        let inventory = Inventory::new(["A"]);
        assert!(!inventory.satisfies(&req(&[&["A", "B"], &["C"]])));

        let empty = Inventory::default();
        assert!(empty.satisfies(&req(&[&["Cable machine"], &["None"]])));
    }

    #[test]
    fn test_name_matching_is_case_insensitive() {
        let inventory = Inventory::new(["Olympic Barbell"]);
        assert!(inventory.has("olympic barbell"));
        assert!(inventory.has("OLYMPIC BARBELL"));
        assert!(!inventory.has("olympic"));
        assert!(inventory.has("None"));
        assert!(inventory.has(""));
    }

    #[test]
    fn test_pairing_rules() {
        let single = Inventory::new(Vec::<String>::new()).with_load(
            EquipmentFamily::Dumbbells,
            Load::Weight(20.0),
            1,
        );
        assert!(single.has("1 Dumbbell"));
        assert!(single.has("Dumbbells"));
        assert!(!single.has("2 Dumbbell"));

        let pair = single.clone().with_load(EquipmentFamily::Dumbbells, Load::Weight(20.0), 1);
        assert!(pair.has("2 Dumbbell"));

        let mixed = Inventory::default()
            .with_load(EquipmentFamily::Kettlebells, Load::Weight(12.0), 1)
            .with_load(EquipmentFamily::Kettlebells, Load::Weight(16.0), 1);
        assert!(mixed.has("1 Kettlebell"));
        assert!(!mixed.has("2 Kettlebell"));
    }

    #[test]
    fn test_from_rows() {
        let rows = vec![
            EquipmentRow {
                name: "Dumbbells".into(),
                quantity: 2,
                weight_resistance_time: Some(RowLabel::Text("25".into())),
            },
            EquipmentRow {
                name: "Regular loop band".into(),
                quantity: 1,
                weight_resistance_time: Some(RowLabel::Text("Heavy".into())),
            },
            EquipmentRow {
                name: "Bench".into(),
                quantity: 1,
                weight_resistance_time: None,
            },
            EquipmentRow {
                name: "Ankle strap".into(),
                quantity: 0,
                weight_resistance_time: None,
            },
        ];
        let inventory = Inventory::from_rows(&rows);

        assert_eq!(
            inventory.count_of(EquipmentFamily::Dumbbells, &Load::Weight(25.0)),
            2
        );
        assert_eq!(
            inventory.count_of(EquipmentFamily::LoopBand, &Load::Band(BandLevel::Heavy)),
            1
        );
        assert!(inventory.has("2 Dumbbell"));
        assert!(inventory.has("1 Loop band"));
        assert!(inventory.has("bench"));
        assert!(!inventory.has("Ankle strap"));
    }

    #[test]
    fn test_specific_equipment() {
        assert_eq!(
            specific_equipment(&req(&[&["Bench", "2 Dumbbell"], &["1 Kettlebell"]])),
            Some((EquipmentFamily::Dumbbells, 2))
        );
        assert_eq!(
            specific_equipment(&req(&[&["Pull up bar", "1 Loop band"]])),
            Some((EquipmentFamily::LoopBand, 1))
        );
        assert_eq!(specific_equipment(&req(&[&["Olympic barbell"]])), None);
    }

    #[test]
    fn test_gap_report_picks_closest_group() {
        let inventory = Inventory::new(["Bench"]);
        let requirement = req(&[
            &["Cable machine", "Ankle strap", "Bench"],
            &["Olympic barbell", "Bench"],
        ]);

        match inventory.check(&requirement) {
            EquipmentCheck::Missing(gap) => {
                assert_eq!(gap.group_index, 1);
                assert_eq!(gap.missing, vec!["Olympic barbell".to_string()]);
            }
            EquipmentCheck::Satisfied => panic!("expected a gap"),
        }
    }

    #[test]
    fn test_gap_ties_prefer_shorter_group() {
        let inventory = Inventory::new(["Bench"]);
        let requirement = req(&[&["Bench", "Squat rack"], &["Ankle strap"]]);
        let EquipmentCheck::Missing(gap) = inventory.check(&requirement) else {
            panic!("expected a gap");
        };
        assert_eq!(gap.group_index, 1);
    }

    #[test]
    fn test_purchase_names() {
        assert_eq!(purchase_name("2 Dumbbell"), "dumbbells");
        assert_eq!(purchase_name("1 Single grip handle"), "single grip handle");
        assert_eq!(purchase_name("Ankle strap"), "ankle strap");
        assert_eq!(purchase_name("1 Kettlebell"), "kettlebells");
        assert_eq!(purchase_name("2 Loop band"), "regular loop band");
        assert_eq!(purchase_name("1 Loop band"), "regular loop band");
        assert_eq!(purchase_name("Mini loop band"), "mini loop band");

        let gap = EquipmentGap {
            group_index: 0,
            missing: vec!["1 Dumbbell".into(), "dumbbell".into(), "Bench".into()],
        };
        assert_eq!(gap.purchase_names(), vec!["dumbbells", "bench"]);
    }
}
