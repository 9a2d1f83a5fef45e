//! UniFFI bindings for cross-platform support (iOS, Android).
//!
//! This module provides FFI-safe types and functions for use with UniFFI.
//! Sets become lists and enums carrying data are flattened so the types
//! map cleanly onto Swift and Kotlin.

use crate::catalog::{
    decode_response, CatalogError, CatalogProvider, FailureKind, LocalCatalog, RemoteConfig,
    RemoteQuery,
};
use crate::{
    explain, filter, plan, segment, CaloricPhase, Ingredient, PreferenceSet, Recipe, RecipeError,
    Step,
};

/// FFI-safe error type that wraps all possible errors.
#[derive(Debug, uniffi::Error, thiserror::Error)]
pub enum PlannerError {
    #[error("Catalog not found: {message}")]
    NotFound { message: String },

    #[error("Decode error: {message}")]
    DecodeError { message: String },

    #[error("Transport error: {message}")]
    TransportError { message: String },

    #[error("Invalid recipe: {message}")]
    InvalidRecipe { message: String },
}

impl From<CatalogError> for PlannerError {
    fn from(e: CatalogError) -> Self {
        let message = e.to_string();
        match e.kind() {
            FailureKind::NotFound => PlannerError::NotFound { message },
            FailureKind::Decode => PlannerError::DecodeError { message },
            FailureKind::Transport => PlannerError::TransportError { message },
        }
    }
}

impl From<RecipeError> for PlannerError {
    fn from(e: RecipeError) -> Self {
        PlannerError::InvalidRecipe {
            message: e.to_string(),
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiIngredient {
    pub name: String,
    pub amount: String,
    pub unit: String,
}

/// FFI-safe representation of a recipe.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRecipe {
    pub id: u64,
    pub title: String,
    /// URL or bundled asset name
    pub image: String,
    /// Ignored on input; the image kind is derived from `image`
    pub image_is_remote: bool,
    pub ready_in_minutes: u32,
    pub servings: u32,
    pub source_url: Option<String>,
    pub summary: Option<String>,
    pub allergens: Option<Vec<String>>,
    pub ingredients: Option<Vec<FfiIngredient>>,
    pub instructions: Option<String>,
    pub calories: Option<u32>,
    pub protein: Option<u32>,
    pub carbohydrates: Option<u32>,
    pub fat: Option<u32>,
}

impl From<&Recipe> for FfiRecipe {
    fn from(r: &Recipe) -> Self {
        FfiRecipe {
            id: r.id,
            title: r.title.clone(),
            image: r.image.as_str().to_string(),
            image_is_remote: r.image.is_remote(),
            ready_in_minutes: r.ready_in_minutes,
            servings: r.servings,
            source_url: r.source_url.clone(),
            summary: r.summary.clone(),
            allergens: r.allergens.as_ref().map(|tags| tags.iter().cloned().collect()),
            ingredients: r.ingredients.as_ref().map(|ingredients| {
                ingredients
                    .iter()
                    .map(|i| FfiIngredient {
                        name: i.name.clone(),
                        amount: i.amount.clone(),
                        unit: i.unit.clone(),
                    })
                    .collect()
            }),
            instructions: r.instructions.clone(),
            calories: r.calories,
            protein: r.protein,
            carbohydrates: r.carbohydrates,
            fat: r.fat,
        }
    }
}

impl TryFrom<FfiRecipe> for Recipe {
    type Error = RecipeError;

    fn try_from(r: FfiRecipe) -> Result<Self, Self::Error> {
        let mut recipe = Recipe::new(r.id, r.title, r.image, r.ready_in_minutes, r.servings)?;
        recipe.source_url = r.source_url;
        recipe.summary = r.summary;
        recipe.allergens = r.allergens.map(|tags| tags.into_iter().collect());
        recipe.ingredients = r.ingredients.map(|ingredients| {
            ingredients
                .into_iter()
                .map(|i| Ingredient::new(i.name, i.amount, i.unit))
                .collect()
        });
        recipe.instructions = r.instructions;
        recipe.calories = r.calories;
        recipe.protein = r.protein;
        recipe.carbohydrates = r.carbohydrates;
        recipe.fat = r.fat;
        recipe.validate()?;
        Ok(recipe)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiCaloricPhase {
    Low,
    Medium,
    High,
}

impl From<FfiCaloricPhase> for CaloricPhase {
    fn from(p: FfiCaloricPhase) -> Self {
        match p {
            FfiCaloricPhase::Low => CaloricPhase::Low,
            FfiCaloricPhase::Medium => CaloricPhase::Medium,
            FfiCaloricPhase::High => CaloricPhase::High,
        }
    }
}

/// FFI-safe representation of the user's preferences.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPreferences {
    /// Ingredient names, matched case-insensitively
    pub included: Vec<String>,
    /// Allergen or diet tags, matched exactly
    pub excluded: Vec<String>,
    pub phase: Option<FfiCaloricPhase>,
}

impl From<FfiPreferences> for PreferenceSet {
    fn from(p: FfiPreferences) -> Self {
        PreferenceSet::builder()
            .include_all(p.included)
            .exclude_all(p.excluded)
            .maybe_phase(p.phase.map(CaloricPhase::from))
            .build()
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiStep {
    pub number: u32,
    pub instruction: String,
}

impl From<Step> for FfiStep {
    fn from(s: Step) -> Self {
        FfiStep {
            number: s.number,
            instruction: s.instruction,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMealPlan {
    pub recipes: Vec<FfiRecipe>,
    /// Present only when no recipe matched
    pub explanation: Option<String>,
}

/// Connection settings for the recipe search service.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRemoteConfig {
    pub base_url: Option<String>,
    pub api_key: String,
    pub max_results: Option<u32>,
}

impl From<FfiRemoteConfig> for RemoteConfig {
    fn from(c: FfiRemoteConfig) -> Self {
        let defaults = RemoteConfig::default();
        RemoteConfig {
            base_url: c.base_url.unwrap_or(defaults.base_url),
            api_key: c.api_key,
            max_results: c.max_results.unwrap_or(defaults.max_results),
            timeout_secs: defaults.timeout_secs,
        }
    }
}

fn into_catalog(recipes: Vec<FfiRecipe>) -> Result<Vec<Recipe>, PlannerError> {
    recipes
        .into_iter()
        .map(|r| Recipe::try_from(r).map_err(PlannerError::from))
        .collect()
}

fn to_ffi(recipes: &[Recipe]) -> Vec<FfiRecipe> {
    recipes.iter().map(FfiRecipe::from).collect()
}

// ============================================================================
// Exported FFI Functions
// ============================================================================

/// Returns the recipes matching the preferences, in catalog order.
#[uniffi::export]
pub fn filter_recipes(
    recipes: Vec<FfiRecipe>,
    preferences: FfiPreferences,
) -> Result<Vec<FfiRecipe>, PlannerError> {
    let catalog = into_catalog(recipes)?;
    Ok(to_ffi(&filter(&catalog, &preferences.into())))
}

/// Describes why the given preferences matched nothing.
#[uniffi::export]
pub fn explain_preferences(preferences: FfiPreferences) -> String {
    explain(&preferences.into())
}

/// Filters the catalog and, if nothing matched, explains why.
#[uniffi::export]
pub fn plan_meals(
    recipes: Vec<FfiRecipe>,
    preferences: FfiPreferences,
) -> Result<FfiMealPlan, PlannerError> {
    let catalog = into_catalog(recipes)?;
    let result = plan(&catalog, &preferences.into());
    Ok(FfiMealPlan {
        recipes: to_ffi(&result.recipes),
        explanation: result.explanation,
    })
}

/// Splits preparation text into numbered steps.
#[uniffi::export]
pub fn segment_steps(text: String) -> Vec<FfiStep> {
    segment(&text).into_iter().map(FfiStep::from).collect()
}

/// Loads a bundled dataset (a `.json`/`.yaml` file or a directory of them).
#[uniffi::export]
pub fn load_catalog(path: String) -> Result<Vec<FfiRecipe>, PlannerError> {
    let recipes = LocalCatalog::new(path).load()?;
    Ok(to_ffi(&recipes))
}

/// Builds the search URL for hosts that perform the HTTP request themselves.
#[uniffi::export]
pub fn search_request_url(
    config: FfiRemoteConfig,
    ingredients: Vec<String>,
) -> Result<String, PlannerError> {
    let url = RemoteQuery::new(config.into(), ingredients).request_url()?;
    Ok(url.to_string())
}

/// Decodes the body returned by the search service.
#[uniffi::export]
pub fn decode_search_response(body: String) -> Result<Vec<FfiRecipe>, PlannerError> {
    let recipes = decode_response(&body)?;
    Ok(to_ffi(&recipes))
}

/// Returns the library version.
#[uniffi::export]
pub fn library_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
