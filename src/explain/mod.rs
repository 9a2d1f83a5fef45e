//! Explanations for empty plans.
//!
//! The sentence only describes the preferences; it never re-runs the
//! filter. Pass it the same `PreferenceSet` that produced the empty result.

use crate::PreferenceSet;
use std::collections::BTreeSet;

pub const NOTHING_AVAILABLE: &str = "No recipes are available right now.";

/// Builds a sentence naming the active constraints of `prefs`.
///
/// # Examples
///
/// ```
/// use recipe_planner::{explain, PreferenceSet};
///
/// let prefs = PreferenceSet::builder().include("Pollo").exclude("gluten").build();
/// assert_eq!(
///     explain(&prefs),
///     "No recipes match the selected ingredients (Pollo) and the excluded allergens (gluten). \
///      Try relaxing some of your preferences."
/// );
/// ```
pub fn explain(prefs: &PreferenceSet) -> String {
    let phrases = constraint_phrases(prefs);

    match phrases.as_slice() {
        [] => NOTHING_AVAILABLE.to_string(),
        [only] => format!("No recipes match {only}."),
        [init @ .., last] => format!(
            "No recipes match {} and {last}. Try relaxing some of your preferences.",
            init.join(", ")
        ),
    }
}

/// Phrases for the active constraints: ingredients, exclusions, phase.
fn constraint_phrases(prefs: &PreferenceSet) -> Vec<String> {
    let mut phrases = Vec::with_capacity(3);

    if prefs.is_included_active() {
        phrases.push(format!("the selected ingredients ({})", list(prefs.included())));
    }
    if prefs.is_excluded_active() {
        phrases.push(format!("the excluded allergens ({})", list(prefs.excluded())));
    }
    if let Some(phase) = prefs.phase() {
        phrases.push(format!("the {phase} calorie phase ({})", phase.boundary()));
    }

    phrases
}

fn list(values: &BTreeSet<String>) -> String {
    values.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}
