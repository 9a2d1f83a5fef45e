//! Catalog providers.
//!
//! A provider hands the planner a fully decoded, validated list of recipes
//! or fails as a whole. Recipes come either from a dataset bundled with
//! the application ([`LocalCatalog`]) or from a search-by-ingredient web
//! service ([`RemoteQuery`], plus `RemoteCatalog` with the `remote`
//! feature).

use crate::{Recipe, RecipeError};
use camino::Utf8PathBuf;
use std::collections::HashSet;
use thiserror::Error;
use tracing::warn;

mod local;
mod model;
mod remote;

pub use local::{decode_document, CatalogFormat, LocalCatalog};
#[cfg(feature = "remote")]
pub use remote::RemoteCatalog;
pub use remote::{decode_response, RemoteConfig, RemoteQuery};

/// Errors that can occur while loading a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog not found: {0}")]
    NotFound(String),

    #[error("Failed to read catalog: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to decode JSON catalog: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to decode YAML catalog: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid recipe in catalog: {0}")]
    InvalidRecipe(#[from] RecipeError),

    #[error("Recipe id {0} appears more than once in the catalog")]
    DuplicateId(u64),

    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(Utf8PathBuf),

    #[error("Failed to read directory: {0}")]
    GlobError(#[from] glob::GlobError),

    #[error("Failed to create glob pattern: {0}")]
    PatternError(#[from] glob::PatternError),

    #[error("Invalid catalog URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Catalog request failed: {0}")]
    Transport(String),
}

/// Coarse classification of a [`CatalogError`] for callers that only
/// need to tell the user what went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The catalog exists but its content could not be turned into recipes
    Decode,
    NotFound,
    /// Reading or fetching the catalog failed
    Transport,
}

impl CatalogError {
    pub fn kind(&self) -> FailureKind {
        match self {
            CatalogError::NotFound(_) => FailureKind::NotFound,
            CatalogError::JsonError(_)
            | CatalogError::YamlError(_)
            | CatalogError::InvalidRecipe(_)
            | CatalogError::DuplicateId(_)
            | CatalogError::UnsupportedFormat(_) => FailureKind::Decode,
            CatalogError::IoError(e) if e.kind() == std::io::ErrorKind::NotFound => {
                FailureKind::NotFound
            }
            CatalogError::IoError(_)
            | CatalogError::GlobError(_)
            | CatalogError::PatternError(_)
            | CatalogError::UrlError(_)
            | CatalogError::Transport(_) => FailureKind::Transport,
        }
    }
}

/// Something that can supply an ordered recipe catalog.
pub trait CatalogProvider {
    /// Loads the whole catalog. Never returns a partial list.
    fn load(&self) -> Result<Vec<Recipe>, CatalogError>;

    /// Short human readable description used in log messages.
    fn describe(&self) -> String;
}

impl CatalogProvider for Vec<Recipe> {
    fn load(&self) -> Result<Vec<Recipe>, CatalogError> {
        Ok(self.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory catalog of {} recipes", self.len())
    }
}

/// Loads the catalog, treating any failure as an empty catalog.
pub fn load_or_empty(provider: &dyn CatalogProvider) -> Vec<Recipe> {
    match provider.load() {
        Ok(recipes) => recipes,
        Err(e) => {
            warn!(
                provider = %provider.describe(),
                kind = ?e.kind(),
                "No catalog available: {e}"
            );
            Vec::new()
        }
    }
}

/// Converts wire records into recipes, rejecting the batch if any record
/// is invalid or an id repeats.
pub(crate) fn into_recipes(
    records: Vec<model::RecipeRecord>,
) -> Result<Vec<Recipe>, CatalogError> {
    let recipes = records
        .into_iter()
        .map(Recipe::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    ensure_unique_ids(&recipes)?;
    Ok(recipes)
}

pub(crate) fn ensure_unique_ids(recipes: &[Recipe]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(recipes.len());
    match recipes.iter().find(|r| !seen.insert(r.id)) {
        Some(duplicate) => Err(CatalogError::DuplicateId(duplicate.id)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingProvider;

    impl CatalogProvider for FailingProvider {
        fn load(&self) -> Result<Vec<Recipe>, CatalogError> {
            Err(CatalogError::Transport("connection reset".to_string()))
        }

        fn describe(&self) -> String {
            "failing provider".to_string()
        }
    }

    fn recipe(id: u64) -> Recipe {
        Recipe::new(id, "Crema de calabaza", "crema", 30, 4).unwrap()
    }

    #[test]
    fn test_load_or_empty_on_failure() {
        assert!(load_or_empty(&FailingProvider).is_empty());
    }

    #[test]
    fn test_load_or_empty_passes_catalog_through() {
        let catalog = vec![recipe(1), recipe(2)];
        assert_eq!(load_or_empty(&catalog), catalog);
    }

    #[test]
    fn test_ensure_unique_ids() {
        assert!(ensure_unique_ids(&[recipe(1), recipe(2)]).is_ok());
        assert!(matches!(
            ensure_unique_ids(&[recipe(1), recipe(2), recipe(1)]),
            Err(CatalogError::DuplicateId(1))
        ));
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            CatalogError::NotFound("x".to_string()).kind(),
            FailureKind::NotFound
        );
        assert_eq!(CatalogError::DuplicateId(3).kind(), FailureKind::Decode);
        assert_eq!(
            CatalogError::IoError(std::io::Error::from(std::io::ErrorKind::NotFound)).kind(),
            FailureKind::NotFound
        );
        assert_eq!(
            CatalogError::Transport("timeout".to_string()).kind(),
            FailureKind::Transport
        );

        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(CatalogError::from(json_error).kind(), FailureKind::Decode);
    }
}
