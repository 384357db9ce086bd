//! Lookup of models by their registered name.

use std::path::PathBuf;

use crate::scoring::bed::{BedAnnotator, BED_ANNOTATOR_NAME};
use crate::scoring::{ConfigError, ScoreModel};

/// Options models read their configuration from
#[derive(Debug, Clone, Default)]
pub struct ModelOptions {
    /// Comma-separated `name:path` BED sources
    pub bed_sources: Option<String>,

    /// Remap file moving working contigs back to the original genome
    pub remap: Option<PathBuf>,
}

/// Registered model names with a short summary of each
pub const AVAILABLE_MODELS: &[(&str, &str)] = &[(
    BED_ANNOTATOR_NAME,
    "Tag guides with overlapping BED features, optionally remapping contigs first",
)];

/// Build and configure the model registered under `name`
///
/// # Errors
///
/// Returns `ConfigError::UnknownModel` if nothing is registered under `name`,
/// or the model's own `ConfigError` if configuration fails.
pub fn build_model(name: &str, options: &ModelOptions) -> Result<Box<dyn ScoreModel>, ConfigError> {
    let mut model: Box<dyn ScoreModel> = match name.to_lowercase().as_str() {
        BED_ANNOTATOR_NAME => Box::new(BedAnnotator::new(
            options.bed_sources.clone().unwrap_or_default(),
            options.remap.clone(),
        )),
        _ => return Err(ConfigError::UnknownModel(name.to_string())),
    };

    model.configure()?;
    Ok(model)
}
