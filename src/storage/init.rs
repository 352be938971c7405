//! Storage initialization
//!
//! Handles first-run setup: directory creation and the default category seed.

use crate::config::paths::FinTrackPaths;
use crate::error::FinTrackError;
use crate::models::default_categories;

use super::categories::CategoryData;
use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Seeds the default categories unless a categories file already exists.
pub fn initialize_storage(paths: &FinTrackPaths) -> Result<(), FinTrackError> {
    paths.ensure_directories()?;

    if needs_initialization(paths) {
        let data = CategoryData {
            categories: default_categories(),
        };
        write_json_atomic(paths.categories_file(), &data)?;
        tracing::info!(count = data.categories.len(), "seeded default categories");
    }

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &FinTrackPaths) -> bool {
    !paths.categories_file().exists()
}
