use crate::Recipe;
use serde::Serialize;

/// One of the three predicate stages, in the order they are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Allergens,
    Ingredients,
    Calories,
}

impl Stage {
    pub const ORDER: [Stage; 3] = [Stage::Allergens, Stage::Ingredients, Stage::Calories];
}

/// Filtered recipes together with how many recipes each stage removed.
///
/// A rejected recipe is counted against the first active stage that
/// rejects it, so the counts always add up to `input - recipes.len()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterReport {
    pub recipes: Vec<Recipe>,
    pub removed_by_allergens: usize,
    pub removed_by_ingredients: usize,
    pub removed_by_calories: usize,
}

impl FilterReport {
    pub(crate) fn new() -> Self {
        FilterReport {
            recipes: Vec::new(),
            removed_by_allergens: 0,
            removed_by_ingredients: 0,
            removed_by_calories: 0,
        }
    }

    pub(crate) fn count_removal(&mut self, stage: Stage) {
        match stage {
            Stage::Allergens => self.removed_by_allergens += 1,
            Stage::Ingredients => self.removed_by_ingredients += 1,
            Stage::Calories => self.removed_by_calories += 1,
        }
    }

    pub fn removed_by(&self, stage: Stage) -> usize {
        match stage {
            Stage::Allergens => self.removed_by_allergens,
            Stage::Ingredients => self.removed_by_ingredients,
            Stage::Calories => self.removed_by_calories,
        }
    }

    pub fn total_removed(&self) -> usize {
        self.removed_by_allergens + self.removed_by_ingredients + self.removed_by_calories
    }
}
