//! Recipe and preference types shared by every stage of the planner.

mod preferences;
mod recipe;

pub use preferences::{CaloricPhase, ParsePhaseError, PreferenceSet, PreferenceSetBuilder};
pub use recipe::{ImageSource, Ingredient, Recipe, RecipeError};
