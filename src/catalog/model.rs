use crate::{Ingredient, Recipe, RecipeError};
use serde::Deserialize;
use std::collections::BTreeSet;

/// A local dataset: `{"recipes": [...]}`.
#[derive(Debug, Deserialize)]
pub(crate) struct CatalogDocument {
    pub recipes: Vec<RecipeRecord>,
}

/// Body of a remote search response. Search endpoints answer with a bare
/// array; dataset mirrors answer with the keyed document.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SearchResponse {
    List(Vec<RecipeRecord>),
    Keyed(CatalogDocument),
}

impl SearchResponse {
    pub fn into_records(self) -> Vec<RecipeRecord> {
        match self {
            SearchResponse::List(records) => records,
            SearchResponse::Keyed(document) => document.recipes,
        }
    }
}

/// A recipe exactly as it appears on the wire.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RecipeRecord {
    pub id: u64,
    pub title: String,
    pub image: String,
    #[serde(default)]
    pub ready_in_minutes: u32,
    /// Search results often omit servings
    #[serde(default = "default_servings")]
    pub servings: u32,
    pub source_url: Option<String>,
    #[serde(alias = "description")]
    pub summary: Option<String>,
    #[serde(alias = "allergies")]
    pub allergens: Option<BTreeSet<String>>,
    #[serde(alias = "extendedIngredients")]
    pub ingredients: Option<Vec<IngredientRecord>>,
    /// Search-by-ingredient results split the ingredient list in two
    pub used_ingredients: Option<Vec<IngredientRecord>>,
    pub missed_ingredients: Option<Vec<IngredientRecord>>,
    #[serde(alias = "preparation")]
    pub instructions: Option<String>,
    pub calories: Option<u32>,
    pub protein: Option<u32>,
    #[serde(alias = "carbs")]
    pub carbohydrates: Option<u32>,
    pub fat: Option<u32>,
}

fn default_servings() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub(crate) struct IngredientRecord {
    pub name: String,
    #[serde(default)]
    pub amount: Amount,
    #[serde(default)]
    pub unit: String,
}

/// Quantities arrive either as text (`"1/2"`) or as a number (`0.5`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Amount {
    Text(String),
    Number(f64),
}

impl Default for Amount {
    fn default() -> Self {
        Amount::Text(String::new())
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        match amount {
            Amount::Text(text) => text,
            Amount::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", n as i64),
            Amount::Number(n) => n.to_string(),
        }
    }
}

impl TryFrom<RecipeRecord> for Recipe {
    type Error = RecipeError;

    fn try_from(record: RecipeRecord) -> Result<Self, Self::Error> {
        let mut recipe = Recipe::new(
            record.id,
            record.title,
            record.image,
            record.ready_in_minutes,
            record.servings,
        )?;

        recipe.source_url = record.source_url;
        recipe.summary = record.summary;
        recipe.allergens = record.allergens;
        recipe.ingredients = merge_ingredients([
            record.ingredients,
            record.used_ingredients,
            record.missed_ingredients,
        ]);
        recipe.instructions = record.instructions;
        recipe.calories = record.calories;
        recipe.protein = record.protein;
        recipe.carbohydrates = record.carbohydrates;
        recipe.fat = record.fat;

        recipe.validate()?;
        Ok(recipe)
    }
}

/// Concatenates every ingredient list that is present. `None` only when
/// the record carries no list at all.
fn merge_ingredients(
    lists: impl IntoIterator<Item = Option<Vec<IngredientRecord>>>,
) -> Option<Vec<Ingredient>> {
    let mut present = lists.into_iter().flatten().peekable();
    present.peek()?;
    Some(
        present
            .flatten()
            .map(|i| Ingredient::new(i.name, i.amount, i.unit))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ImageSource;

    #[test]
    fn test_amount_to_string() {
        assert_eq!(String::from(Amount::Number(2.0)), "2");
        assert_eq!(String::from(Amount::Number(0.5)), "0.5");
        assert_eq!(String::from(Amount::Text("1/2".to_string())), "1/2");
        assert_eq!(String::from(Amount::default()), "");
    }

    #[test]
    fn test_record_conversion() {
        let record: RecipeRecord = serde_json::from_str(
            r#"{
                "id": 716429,
                "title": "Pasta with Garlic",
                "image": "https://img.example.com/716429.jpg",
                "readyInMinutes": 45,
                "servings": 2,
                "extendedIngredients": [
                    {"name": "garlic", "amount": 3, "unit": "cloves"},
                    {"name": "pasta", "amount": "200 g"}
                ],
                "carbs": 80
            }"#,
        )
        .unwrap();

        let recipe = Recipe::try_from(record).unwrap();
        assert_eq!(recipe.id, 716429);
        assert!(matches!(recipe.image, ImageSource::Remote(_)));
        assert_eq!(recipe.ready_in_minutes, 45);
        let ingredients = recipe.ingredients.unwrap();
        assert_eq!(ingredients[0], Ingredient::new("garlic", "3", "cloves"));
        assert_eq!(ingredients[1], Ingredient::new("pasta", "200 g", ""));
        assert_eq!(recipe.carbohydrates, Some(80));
        assert!(recipe.allergens.is_none());
        assert!(recipe.calories.is_none());
    }

    #[test]
    fn test_record_defaults_servings() {
        let record: RecipeRecord =
            serde_json::from_str(r#"{"id": 1, "title": "Gazpacho", "image": "gazpacho"}"#).unwrap();
        let recipe = Recipe::try_from(record).unwrap();
        assert_eq!(recipe.servings, 1);
        assert_eq!(recipe.image, ImageSource::LocalAsset("gazpacho".to_string()));
    }

    #[test]
    fn test_record_conversion_rejects_empty_title() {
        let record: RecipeRecord =
            serde_json::from_str(r#"{"id": 4, "title": "", "image": "x"}"#).unwrap();
        assert_eq!(
            Recipe::try_from(record),
            Err(RecipeError::EmptyTitle { id: 4 })
        );
    }

    #[test]
    fn test_search_response_shapes() {
        let list: SearchResponse =
            serde_json::from_str(r#"[{"id": 1, "title": "A", "image": "a"}]"#).unwrap();
        assert_eq!(list.into_records().len(), 1);

        let keyed: SearchResponse =
            serde_json::from_str(r#"{"recipes": [{"id": 1, "title": "A", "image": "a"}]}"#)
                .unwrap();
        assert_eq!(keyed.into_records().len(), 1);
    }

    #[test]
    fn test_record_merges_used_and_missed_ingredients() {
        let record: RecipeRecord = serde_json::from_str(
            r#"{
                "id": 9,
                "title": "Chicken Rice",
                "image": "https://img.example.com/9.jpg",
                "usedIngredientCount": 1,
                "usedIngredients": [{"name": "chicken breast", "amount": 1, "unit": "lb"}],
                "missedIngredients": [{"name": "rice", "amount": 0.5, "unit": "cup"}]
            }"#,
        )
        .unwrap();

        let recipe = Recipe::try_from(record).unwrap();
        assert_eq!(
            recipe.ingredients,
            Some(vec![
                Ingredient::new("chicken breast", "1", "lb"),
                Ingredient::new("rice", "0.5", "cup"),
            ])
        );
    }

    #[test]
    fn test_record_without_any_ingredient_list() {
        let record: RecipeRecord =
            serde_json::from_str(r#"{"id": 2, "title": "Tea", "image": "tea"}"#).unwrap();
        assert!(Recipe::try_from(record).unwrap().ingredients.is_none());

        let record: RecipeRecord = serde_json::from_str(
            r#"{"id": 3, "title": "Water", "image": "water", "missedIngredients": []}"#,
        )
        .unwrap();
        assert_eq!(Recipe::try_from(record).unwrap().ingredients, Some(vec![]));
    }
}
