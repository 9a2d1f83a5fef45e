//! Preference filtering.
//!
//! Recipes pass through three stages, each active only when the matching
//! preference is set:
//!
//! 1. allergens: drop recipes carrying an excluded tag (recipes without
//!    allergen data are kept)
//! 2. ingredients: keep recipes with at least one ingredient whose name
//!    contains a selected token, ignoring case (recipes without an
//!    ingredient list are dropped)
//! 3. calories: keep recipes inside the selected phase (recipes without a
//!    calorie count are kept)
//!
//! The result keeps the catalog order and never contains duplicates the
//! input did not have.

use crate::{PreferenceSet, Recipe};
use tracing::debug;

mod model;

pub use model::{FilterReport, Stage};

/// Returns the recipes compatible with `prefs`, in catalog order.
///
/// # Examples
///
/// ```
/// use recipe_planner::{filter, CaloricPhase, PreferenceSet, Recipe};
///
/// let catalog = vec![
///     Recipe::new(1, "Pollo asado", "pollo", 40, 2)?.with_calories(700),
///     Recipe::new(2, "Lasaña", "lasana", 60, 4)?.with_calories(1300),
/// ];
/// let prefs = PreferenceSet::builder().phase(CaloricPhase::Low).build();
///
/// let matched = filter(&catalog, &prefs);
/// assert_eq!(matched.len(), 1);
/// assert_eq!(matched[0].id, 1);
/// # Ok::<(), recipe_planner::RecipeError>(())
/// ```
pub fn filter(recipes: &[Recipe], prefs: &PreferenceSet) -> Vec<Recipe> {
    filter_with_report(recipes, prefs).recipes
}

/// Like [`filter`], but also reports which stage removed how many recipes.
pub fn filter_with_report(recipes: &[Recipe], prefs: &PreferenceSet) -> FilterReport {
    let tokens = lowercase_tokens(prefs);
    let mut report = FilterReport::new();

    for recipe in recipes {
        match rejecting_stage(recipe, prefs, &tokens) {
            Some(stage) => report.count_removal(stage),
            None => report.recipes.push(recipe.clone()),
        }
    }

    debug!(
        input = recipes.len(),
        kept = report.recipes.len(),
        allergens = prefs.is_excluded_active(),
        ingredients = prefs.is_included_active(),
        phase = ?prefs.phase(),
        "Filtered recipe catalog"
    );

    report
}

/// Returns true if `recipe` passes every active stage.
pub fn matches(recipe: &Recipe, prefs: &PreferenceSet) -> bool {
    rejecting_stage(recipe, prefs, &lowercase_tokens(prefs)).is_none()
}

fn lowercase_tokens(prefs: &PreferenceSet) -> Vec<String> {
    prefs.included().iter().map(|t| t.to_lowercase()).collect()
}

/// First active stage that rejects the recipe, if any.
fn rejecting_stage(recipe: &Recipe, prefs: &PreferenceSet, tokens: &[String]) -> Option<Stage> {
    Stage::ORDER.into_iter().find(|stage| match stage {
        Stage::Allergens => !passes_allergens(recipe, prefs),
        Stage::Ingredients => !passes_ingredients(recipe, tokens),
        Stage::Calories => !passes_calories(recipe, prefs),
    })
}

fn passes_allergens(recipe: &Recipe, prefs: &PreferenceSet) -> bool {
    if !prefs.is_excluded_active() {
        return true;
    }
    match &recipe.allergens {
        None => true,
        Some(tags) => tags.iter().all(|tag| !prefs.excluded().contains(tag)),
    }
}

/// `tokens` must already be lowercased.
fn passes_ingredients(recipe: &Recipe, tokens: &[String]) -> bool {
    if tokens.is_empty() {
        return true;
    }
    match &recipe.ingredients {
        None => false,
        Some(ingredients) => ingredients.iter().any(|ingredient| {
            let name = ingredient.name.to_lowercase();
            tokens.iter().any(|token| name.contains(token.as_str()))
        }),
    }
}

fn passes_calories(recipe: &Recipe, prefs: &PreferenceSet) -> bool {
    match (prefs.phase(), recipe.calories) {
        (Some(phase), Some(calories)) => phase.admits(calories),
        _ => true,
    }
}
