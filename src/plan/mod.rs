//! Recipe recommendation: catalog in, matching recipes (or an explanation) out.

use crate::catalog::{load_or_empty, CatalogProvider};
use crate::{explain, filter_with_report, PreferenceSet, Recipe};
use serde::Serialize;
use tracing::info;

/// Result of a plan request.
///
/// `explanation` is set exactly when `recipes` is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealPlan {
    pub recipes: Vec<Recipe>,
    pub explanation: Option<String>,
}

impl MealPlan {
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

/// Filters `catalog` with `prefs` and explains an empty result.
///
/// # Examples
///
/// ```
/// use recipe_planner::{plan, PreferenceSet};
///
/// let prefs = PreferenceSet::builder().exclude("gluten").build();
/// let result = plan(&[], &prefs);
/// assert!(result.recipes.is_empty());
/// assert_eq!(
///     result.explanation.as_deref(),
///     Some("No recipes match the excluded allergens (gluten).")
/// );
/// ```
pub fn plan(catalog: &[Recipe], prefs: &PreferenceSet) -> MealPlan {
    let report = filter_with_report(catalog, prefs);

    let explanation = if report.recipes.is_empty() {
        info!(
            catalog = catalog.len(),
            removed_by_allergens = report.removed_by_allergens,
            removed_by_ingredients = report.removed_by_ingredients,
            removed_by_calories = report.removed_by_calories,
            "No recipe matched the preferences"
        );
        Some(explain(prefs))
    } else {
        None
    };

    MealPlan {
        recipes: report.recipes,
        explanation,
    }
}

/// Loads the catalog from `provider` and plans over it.
///
/// A provider failure is treated as an empty catalog, so the caller still
/// receives an explanation instead of an error.
pub fn plan_from(provider: &dyn CatalogProvider, prefs: &PreferenceSet) -> MealPlan {
    let catalog = load_or_empty(provider);
    plan(&catalog, prefs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogError, LocalCatalog};
    use crate::{CaloricPhase, Ingredient, NOTHING_AVAILABLE};

    fn catalog() -> Vec<Recipe> {
        vec![
            Recipe::new(1, "Pollo al curry", "curry", 35, 2)
                .unwrap()
                .with_allergens(["gluten"])
                .with_ingredients(vec![Ingredient::new("Pollo", "300", "g")])
                .with_calories(700),
            Recipe::new(2, "Atún con arroz", "atun", 20, 2)
                .unwrap()
                .with_allergens(Vec::<String>::new())
                .with_ingredients(vec![Ingredient::new("Atún", "1", "lata")])
                .with_calories(1300),
        ]
    }

    #[test]
    fn test_plan_with_matches_has_no_explanation() {
        let prefs = PreferenceSet::builder().phase(CaloricPhase::Low).build();
        let result = plan(&catalog(), &prefs);

        assert_eq!(result.recipes.len(), 1);
        assert_eq!(result.recipes[0].id, 1);
        assert!(result.explanation.is_none());
    }

    #[test]
    fn test_plan_empty_result_is_explained() {
        let prefs = PreferenceSet::builder().include("Pollo").exclude("gluten").build();
        let result = plan(&catalog(), &prefs);

        assert!(result.is_empty());
        let explanation = result.explanation.unwrap();
        assert!(explanation.contains("selected ingredients (Pollo)"));
        assert!(explanation.contains("excluded allergens (gluten)"));
    }

    #[test]
    fn test_plan_unconstrained_returns_catalog() {
        let result = plan(&catalog(), &PreferenceSet::default());
        assert_eq!(result.recipes, catalog());
    }

    #[test]
    fn test_plan_from_failing_provider() {
        struct Offline;

        impl CatalogProvider for Offline {
            fn load(&self) -> Result<Vec<Recipe>, CatalogError> {
                Err(CatalogError::Transport("offline".to_string()))
            }

            fn describe(&self) -> String {
                "offline".to_string()
            }
        }

        let result = plan_from(&Offline, &PreferenceSet::default());
        assert!(result.recipes.is_empty());
        assert_eq!(result.explanation.as_deref(), Some(NOTHING_AVAILABLE));
    }

    #[test]
    fn test_plan_from_missing_local_catalog() {
        let provider = LocalCatalog::new("/nonexistent/recipes.json");
        let prefs = PreferenceSet::builder().phase(CaloricPhase::High).build();

        let result = plan_from(&provider, &prefs);
        assert!(result.recipes.is_empty());
        assert_eq!(
            result.explanation.as_deref(),
            Some("No recipes match the high calorie phase (1200 kcal or more).")
        );
    }
}
