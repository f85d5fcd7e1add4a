//! Resource categories and their provider query strings.
//!
//! Each category maps to a primary (specific) query and a broader backup
//! query. The backup is only used when a whole search pass comes back empty.
//! Query strings are static configuration: compiled-in defaults, optionally
//! overridden by a YAML file.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A resource type users can search for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchCategory {
    Shelter,
    Food,
    Medical,
}

impl SearchCategory {
    pub const ALL: [SearchCategory; 3] = [
        SearchCategory::Shelter,
        SearchCategory::Food,
        SearchCategory::Medical,
    ];

    /// Human-readable label for display.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SearchCategory::Shelter => "Shelter",
            SearchCategory::Food => "Food Assistance",
            SearchCategory::Medical => "Medical Care",
        }
    }

    /// Parse a category from its lowercase tag.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "shelter" => Some(SearchCategory::Shelter),
            "food" => Some(SearchCategory::Food),
            "medical" => Some(SearchCategory::Medical),
            _ => None,
        }
    }
}

impl std::fmt::Display for SearchCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCategory::Shelter => write!(f, "shelter"),
            SearchCategory::Food => write!(f, "food"),
            SearchCategory::Medical => write!(f, "medical"),
        }
    }
}

/// Provider query strings for one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryQueries {
    pub category: SearchCategory,
    /// Specific query used on the first search pass.
    pub primary_query: String,
    /// Broader query used on the one-shot fallback pass.
    pub backup_query: String,
}

#[derive(Debug, Deserialize)]
pub struct CategoriesFile {
    pub categories: Vec<CategoryQueries>,
}

/// Compiled-in category queries, used when no YAML override is configured.
#[must_use]
pub fn default_categories() -> Vec<CategoryQueries> {
    vec![
        CategoryQueries {
            category: SearchCategory::Shelter,
            primary_query: "homeless shelter".to_string(),
            backup_query: "shelter homeless".to_string(),
        },
        CategoryQueries {
            category: SearchCategory::Food,
            primary_query: "food bank soup kitchen".to_string(),
            backup_query: "food assistance".to_string(),
        },
        CategoryQueries {
            category: SearchCategory::Medical,
            primary_query: "free clinic community health".to_string(),
            backup_query: "medical clinic".to_string(),
        },
    ]
}

/// Load and validate category queries from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation (empty query strings or duplicate categories).
pub fn load_categories(path: &Path) -> Result<Vec<CategoryQueries>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CategoriesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: CategoriesFile =
        serde_yaml::from_str(&content).map_err(ConfigError::CategoriesFileParse)?;

    validate_categories(&file.categories)?;

    Ok(file.categories)
}

fn validate_categories(categories: &[CategoryQueries]) -> Result<(), ConfigError> {
    if categories.is_empty() {
        return Err(ConfigError::Validation(
            "categories file must define at least one category".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for cq in categories {
        if cq.primary_query.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "category '{}' has an empty primary query",
                cq.category
            )));
        }
        if cq.backup_query.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "category '{}' has an empty backup query",
                cq.category
            )));
        }
        if !seen.insert(cq.category) {
            return Err(ConfigError::Validation(format!(
                "duplicate category: '{}'",
                cq.category
            )));
        }
    }

    Ok(())
}
