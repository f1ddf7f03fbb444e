//! Loading and saving region catalogs as JSON.

use std::path::Path;

use super::RegionCatalog;

/// Errors reading or writing a catalog file.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Reading or writing the file failed
    #[error("catalog I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a valid catalog
    #[error("catalog JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The catalog parsed but is unusable
    #[error("invalid catalog: {0}")]
    Invalid(String),
}

/// Load a catalog from a JSON file.
///
/// The catalog must contain at least one region, and every sub-area must
/// name a region of the same catalog as its parent.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<RegionCatalog, CatalogError> {
    let contents = std::fs::read_to_string(path)?;
    let catalog: RegionCatalog = serde_json::from_str(&contents)?;

    if catalog.is_empty() {
        return Err(CatalogError::Invalid("no regions".to_string()));
    }

    if let Some(orphan) = catalog
        .subdivisions()
        .iter()
        .find(|s| catalog.region(&s.parent).is_none())
    {
        return Err(CatalogError::Invalid(format!(
            "sub-area {} has unknown parent {}",
            orphan.name, orphan.parent
        )));
    }

    Ok(catalog)
}

/// Save a catalog as pretty-printed JSON.
///
/// Creates parent directories if they don't exist.
pub fn save_catalog(path: impl AsRef<Path>, catalog: &RegionCatalog) -> Result<(), CatalogError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(catalog)?;
    std::fs::write(path, json)?;

    Ok(())
}
