use super::model::CatalogDocument;
use super::{ensure_unique_ids, into_recipes, CatalogError, CatalogProvider};
use crate::Recipe;
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};

/// Serialization of a local dataset, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Yaml,
}

impl CatalogFormat {
    pub fn from_path(path: &Utf8Path) -> Option<Self> {
        match path.extension()?.to_lowercase().as_str() {
            "json" => Some(CatalogFormat::Json),
            "yaml" | "yml" => Some(CatalogFormat::Yaml),
            _ => None,
        }
    }
}

/// Decodes a `{"recipes": [...]}` dataset.
///
/// # Errors
///
/// Fails if the document does not parse, a record is invalid, or two
/// records share an id.
pub fn decode_document(content: &str, format: CatalogFormat) -> Result<Vec<Recipe>, CatalogError> {
    let document: CatalogDocument = match format {
        CatalogFormat::Json => serde_json::from_str(content)?,
        CatalogFormat::Yaml => serde_yaml::from_str(content)?,
    };
    into_recipes(document.recipes)
}

/// A dataset stored on disk.
///
/// The path may point at a single `.json`, `.yaml` or `.yml` document, or
/// at a directory. Directories are searched recursively and their
/// documents are concatenated in path order.
///
/// # Examples
///
/// ```no_run
/// use recipe_planner::{CatalogProvider, LocalCatalog};
///
/// let catalog = LocalCatalog::new("assets/recipes.json");
/// let recipes = catalog.load()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct LocalCatalog {
    path: Utf8PathBuf,
}

impl LocalCatalog {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        LocalCatalog { path: path.into() }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn load_file(path: &Utf8Path) -> Result<Vec<Recipe>, CatalogError> {
        let format = CatalogFormat::from_path(path)
            .ok_or_else(|| CatalogError::UnsupportedFormat(path.to_path_buf()))?;
        let content = std::fs::read_to_string(path)?;
        let recipes = decode_document(&content, format)?;
        debug!(path = %path, count = recipes.len(), "Loaded catalog document");
        Ok(recipes)
    }

    fn load_dir(dir: &Utf8Path) -> Result<Vec<Recipe>, CatalogError> {
        let mut paths = Vec::new();
        for ext in ["json", "yaml", "yml"] {
            let pattern = dir.join(format!("**/*.{ext}"));
            for entry in glob::glob(pattern.as_str())? {
                let path = Utf8PathBuf::from_path_buf(entry?).map_err(|_| {
                    CatalogError::IoError(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        "Path contains invalid UTF-8",
                    ))
                })?;
                paths.push(path);
            }
        }
        paths.sort();

        let mut recipes = Vec::new();
        for path in &paths {
            recipes.extend(Self::load_file(path)?);
        }
        ensure_unique_ids(&recipes)?;
        Ok(recipes)
    }
}

impl CatalogProvider for LocalCatalog {
    fn load(&self) -> Result<Vec<Recipe>, CatalogError> {
        if !self.path.exists() {
            return Err(CatalogError::NotFound(self.path.to_string()));
        }

        let recipes = if self.path.is_dir() {
            Self::load_dir(&self.path)?
        } else {
            Self::load_file(&self.path)?
        };
        info!(path = %self.path, count = recipes.len(), "Loaded local catalog");
        Ok(recipes)
    }

    fn describe(&self) -> String {
        format!("local catalog at {}", self.path)
    }
}
