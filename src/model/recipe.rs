use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Where a recipe's picture lives.
///
/// The choice is made once, when the recipe is built from its raw image
/// reference: anything starting with `http://` or `https://` is fetched
/// over the network, everything else names an asset bundled with the app.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ImageSource {
    Remote(String),
    LocalAsset(String),
}

impl ImageSource {
    /// Classifies a raw image reference.
    pub fn from_reference(reference: impl Into<String>) -> Self {
        let reference = reference.into();
        if reference.starts_with("http://") || reference.starts_with("https://") {
            ImageSource::Remote(reference)
        } else {
            ImageSource::LocalAsset(reference)
        }
    }

    /// Returns the URL or asset name as written in the catalog.
    pub fn as_str(&self) -> &str {
        match self {
            ImageSource::Remote(url) => url,
            ImageSource::LocalAsset(name) => name,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, ImageSource::Remote(_))
    }
}

impl From<String> for ImageSource {
    fn from(reference: String) -> Self {
        ImageSource::from_reference(reference)
    }
}

impl From<ImageSource> for String {
    fn from(source: ImageSource) -> Self {
        match source {
            ImageSource::Remote(url) => url,
            ImageSource::LocalAsset(name) => name,
        }
    }
}

/// A single line of a recipe's ingredient list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    /// Free-form quantity, e.g. `"1/2"` or `"200 g"`
    pub amount: String,
    /// Unit of the amount; empty when the amount is unitless or carries its own unit
    #[serde(default)]
    pub unit: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, amount: impl Into<String>, unit: impl Into<String>) -> Self {
        Ingredient {
            name: name.into(),
            amount: amount.into(),
            unit: unit.into(),
        }
    }
}

/// A catalog entry describing a dish.
///
/// Every optional field stays `None` when the catalog does not record it.
/// The filter stages decide per field whether a missing value counts as a
/// match (allergens, calories) or not (ingredients).
///
/// # Examples
///
/// ```
/// use recipe_planner::{Ingredient, Recipe};
///
/// let recipe = Recipe::new(1, "Pollo al horno", "pollo.png", 45, 4)?
///     .with_ingredients(vec![Ingredient::new("Pollo", "1", "kg")])
///     .with_calories(700);
///
/// assert!(!recipe.image.is_remote());
/// assert_eq!(recipe.calories, Some(700));
/// # Ok::<(), recipe_planner::RecipeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: u64,
    pub title: String,
    pub image: ImageSource,
    pub ready_in_minutes: u32,
    pub servings: u32,
    pub source_url: Option<String>,
    pub summary: Option<String>,
    pub allergens: Option<BTreeSet<String>>,
    pub ingredients: Option<Vec<Ingredient>>,
    /// Preparation text with step markers such as `1.` embedded inline
    pub instructions: Option<String>,
    pub calories: Option<u32>,
    pub protein: Option<u32>,
    pub carbohydrates: Option<u32>,
    pub fat: Option<u32>,
}

impl Recipe {
    /// Creates a recipe with only its required fields set.
    ///
    /// # Errors
    ///
    /// Returns `RecipeError` if the title is blank or `servings` is zero.
    pub fn new(
        id: u64,
        title: impl Into<String>,
        image: impl Into<String>,
        ready_in_minutes: u32,
        servings: u32,
    ) -> Result<Self, RecipeError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(RecipeError::EmptyTitle { id });
        }
        if servings == 0 {
            return Err(RecipeError::NoServings { id });
        }

        Ok(Recipe {
            id,
            title,
            image: ImageSource::from_reference(image),
            ready_in_minutes,
            servings,
            source_url: None,
            summary: None,
            allergens: None,
            ingredients: None,
            instructions: None,
            calories: None,
            protein: None,
            carbohydrates: None,
            fat: None,
        })
    }

    pub fn with_allergens<I, S>(mut self, allergens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allergens = Some(allergens.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_ingredients(mut self, ingredients: Vec<Ingredient>) -> Self {
        self.ingredients = Some(ingredients);
        self
    }

    pub fn with_calories(mut self, calories: u32) -> Self {
        self.calories = Some(calories);
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Checks the invariants a decoded recipe must satisfy.
    ///
    /// Ingredients, when present, must all carry a name.
    pub fn validate(&self) -> Result<(), RecipeError> {
        if self.title.trim().is_empty() {
            return Err(RecipeError::EmptyTitle { id: self.id });
        }
        if self.servings == 0 {
            return Err(RecipeError::NoServings { id: self.id });
        }
        if let Some(ingredients) = &self.ingredients {
            if let Some(position) = ingredients
                .iter()
                .position(|ingredient| ingredient.name.trim().is_empty())
            {
                return Err(RecipeError::UnnamedIngredient {
                    id: self.id,
                    position,
                });
            }
        }
        Ok(())
    }
}

/// Errors raised when a recipe violates the data model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecipeError {
    #[error("Recipe {id} has an empty title")]
    EmptyTitle { id: u64 },

    #[error("Recipe {id} must serve at least one person")]
    NoServings { id: u64 },

    #[error("Ingredient #{position} of recipe {id} has no name")]
    UnnamedIngredient { id: u64, position: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_source_remote() {
        let image = ImageSource::from_reference("https://img.example.com/716429.jpg");
        assert!(image.is_remote());
        assert_eq!(image.as_str(), "https://img.example.com/716429.jpg");

        let image = ImageSource::from_reference("http://img.example.com/1.png");
        assert!(image.is_remote());
    }

    #[test]
    fn test_image_source_local_asset() {
        let image = ImageSource::from_reference("ensalada_cesar");
        assert_eq!(image, ImageSource::LocalAsset("ensalada_cesar".to_string()));

        // Scheme must be a prefix, not just present somewhere
        let image = ImageSource::from_reference("assets/https_banner.png");
        assert!(!image.is_remote());
    }

    #[test]
    fn test_image_source_serde_as_plain_string() {
        let image: ImageSource = serde_json::from_str(r#""https://x.test/a.jpg""#).unwrap();
        assert_eq!(image, ImageSource::Remote("https://x.test/a.jpg".to_string()));
        assert_eq!(
            serde_json::to_string(&ImageSource::LocalAsset("tacos".to_string())).unwrap(),
            r#""tacos""#
        );
    }

    #[test]
    fn test_recipe_new_rejects_blank_title() {
        assert_eq!(
            Recipe::new(7, "   ", "img", 10, 2),
            Err(RecipeError::EmptyTitle { id: 7 })
        );
    }

    #[test]
    fn test_recipe_new_rejects_zero_servings() {
        assert_eq!(
            Recipe::new(3, "Sopa", "img", 10, 0),
            Err(RecipeError::NoServings { id: 3 })
        );
    }

    #[test]
    fn test_recipe_optional_fields_default_to_none() {
        let recipe = Recipe::new(1, "Arroz", "arroz", 20, 2).unwrap();
        assert!(recipe.allergens.is_none());
        assert!(recipe.ingredients.is_none());
        assert!(recipe.calories.is_none());
        assert!(recipe.instructions.is_none());
    }

    #[test]
    fn test_validate_unnamed_ingredient() {
        let recipe = Recipe::new(9, "Ensalada", "ensalada", 5, 1)
            .unwrap()
            .with_ingredients(vec![
                Ingredient::new("Lechuga", "1", ""),
                Ingredient::new(" ", "2", "cdas"),
            ]);

        assert_eq!(
            recipe.validate(),
            Err(RecipeError::UnnamedIngredient { id: 9, position: 1 })
        );
    }
}
