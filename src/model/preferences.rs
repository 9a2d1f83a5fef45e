use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Calorie band a recipe should fall into for the user's current
/// training or activity phase.
///
/// | Phase    | Recipe calories |
/// |----------|-----------------|
/// | `Low`    | `< 800`         |
/// | `Medium` | `< 1200`        |
/// | `High`   | `>= 1200`       |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaloricPhase {
    Low,
    Medium,
    High,
}

impl CaloricPhase {
    pub const LOW_LIMIT: u32 = 800;
    pub const MEDIUM_LIMIT: u32 = 1200;

    pub const ALL: [CaloricPhase; 3] = [CaloricPhase::Low, CaloricPhase::Medium, CaloricPhase::High];

    /// Returns true if a recipe with `calories` belongs to this phase.
    pub fn admits(self, calories: u32) -> bool {
        match self {
            CaloricPhase::Low => calories < Self::LOW_LIMIT,
            CaloricPhase::Medium => calories < Self::MEDIUM_LIMIT,
            CaloricPhase::High => calories >= Self::MEDIUM_LIMIT,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CaloricPhase::Low => "low",
            CaloricPhase::Medium => "medium",
            CaloricPhase::High => "high",
        }
    }

    /// Human readable boundary, used in explanations.
    pub fn boundary(self) -> String {
        match self {
            CaloricPhase::Low => format!("under {} kcal", Self::LOW_LIMIT),
            CaloricPhase::Medium => format!("under {} kcal", Self::MEDIUM_LIMIT),
            CaloricPhase::High => format!("{} kcal or more", Self::MEDIUM_LIMIT),
        }
    }
}

impl fmt::Display for CaloricPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown caloric phase '{0}', expected one of: low, medium, high")]
pub struct ParsePhaseError(pub String);

impl FromStr for CaloricPhase {
    type Err = ParsePhaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(CaloricPhase::Low),
            "medium" => Ok(CaloricPhase::Medium),
            "high" => Ok(CaloricPhase::High),
            _ => Err(ParsePhaseError(s.to_string())),
        }
    }
}

/// The user's combined filter criteria for one plan request.
///
/// A `PreferenceSet` is an immutable value. Build a fresh one for every
/// filter call with [`PreferenceSet::builder`]; blank entries are dropped
/// while building.
///
/// # Examples
///
/// ```
/// use recipe_planner::{CaloricPhase, PreferenceSet};
///
/// let prefs = PreferenceSet::builder()
///     .include("Pollo")
///     .exclude("gluten")
///     .phase(CaloricPhase::Low)
///     .build();
///
/// assert!(prefs.is_included_active());
/// assert_eq!(prefs.phase(), Some(CaloricPhase::Low));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PreferenceRecord")]
pub struct PreferenceSet {
    included: BTreeSet<String>,
    excluded: BTreeSet<String>,
    phase: Option<CaloricPhase>,
}

/// Serialized form of a [`PreferenceSet`]. Decoding goes through the
/// builder so stored preferences get the same cleanup as built ones.
#[derive(Deserialize)]
struct PreferenceRecord {
    #[serde(default)]
    included: Vec<String>,
    #[serde(default)]
    excluded: Vec<String>,
    #[serde(default)]
    phase: Option<CaloricPhase>,
}

impl From<PreferenceRecord> for PreferenceSet {
    fn from(record: PreferenceRecord) -> Self {
        PreferenceSet::builder()
            .include_all(record.included)
            .exclude_all(record.excluded)
            .maybe_phase(record.phase)
            .build()
    }
}

impl PreferenceSet {
    pub fn builder() -> PreferenceSetBuilder {
        PreferenceSetBuilder::default()
    }

    /// Ingredient names the user wants, compared case-insensitively.
    pub fn included(&self) -> &BTreeSet<String> {
        &self.included
    }

    /// Allergen or diet tags the user wants avoided, compared exactly.
    pub fn excluded(&self) -> &BTreeSet<String> {
        &self.excluded
    }

    pub fn phase(&self) -> Option<CaloricPhase> {
        self.phase
    }

    pub fn is_included_active(&self) -> bool {
        !self.included.is_empty()
    }

    pub fn is_excluded_active(&self) -> bool {
        !self.excluded.is_empty()
    }

    /// Returns true when no constraint is set at all.
    pub fn is_unconstrained(&self) -> bool {
        self.included.is_empty() && self.excluded.is_empty() && self.phase.is_none()
    }
}

#[derive(Debug, Default)]
pub struct PreferenceSetBuilder {
    included: BTreeSet<String>,
    excluded: BTreeSet<String>,
    phase: Option<CaloricPhase>,
}

impl PreferenceSetBuilder {
    /// Adds an ingredient token. Surrounding whitespace is trimmed since
    /// tokens are matched as substrings of ingredient names.
    pub fn include(mut self, ingredient: impl Into<String>) -> Self {
        let ingredient = ingredient.into();
        insert_non_blank(&mut self.included, ingredient.trim().to_string());
        self
    }

    pub fn include_all<I, S>(self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ingredients.into_iter().fold(self, |b, i| b.include(i))
    }

    pub fn exclude(mut self, tag: impl Into<String>) -> Self {
        insert_non_blank(&mut self.excluded, tag.into());
        self
    }

    pub fn exclude_all<I, S>(self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        tags.into_iter().fold(self, |b, t| b.exclude(t))
    }

    pub fn phase(mut self, phase: CaloricPhase) -> Self {
        self.phase = Some(phase);
        self
    }

    pub fn maybe_phase(mut self, phase: Option<CaloricPhase>) -> Self {
        self.phase = phase;
        self
    }

    pub fn build(self) -> PreferenceSet {
        PreferenceSet {
            included: self.included,
            excluded: self.excluded,
            phase: self.phase,
        }
    }
}

// Tags are matched exactly, so excluded values are stored untrimmed and
// only wholly blank ones are discarded.
fn insert_non_blank(set: &mut BTreeSet<String>, value: String) {
    if !value.trim().is_empty() {
        set.insert(value);
    }
}
