//! Annotation and scoring models applied to guide records.
//!
//! Every model implements [`ScoreModel`]. A host configures each model once,
//! checks it is usable with the enzyme in play, and then hands it batches of
//! records to annotate in place:
//!
//! ```rust,no_run
//! use guide_annotate::core::params::{EncodingContext, ParameterPack};
//! use guide_annotate::scoring::bed::BedAnnotator;
//! use guide_annotate::scoring::{run_models, ScoreModel};
//!
//! let mut annotator = BedAnnotator::new("exons:exons.bed,repeats:rmsk.bed", None);
//! annotator.configure().unwrap();
//!
//! let params = ParameterPack::default();
//! let encoding = EncodingContext::from_params(&params);
//! let mut records = Vec::new();
//! let models: Vec<Box<dyn ScoreModel>> = vec![Box::new(annotator)];
//! run_models(&models, &mut records, &params, &encoding).unwrap();
//! ```

use thiserror::Error;
use tracing::{debug, warn};

use crate::core::params::{EncodingContext, ParameterPack};
use crate::core::record::OffTargetRecord;
use crate::parsing::ParseError;

pub mod bed;
pub mod registry;

/// Errors raised while configuring a model
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No BED sources given")]
    EmptySpec,

    #[error("Malformed BED source '{0}': expected name:path")]
    MalformedBedSpec(String),

    #[error("BED file for '{name}' does not exist: {path}")]
    MissingFile { name: String, path: String },

    #[error("Annotation name '{0}' is used by more than one BED source")]
    DuplicateName(String),

    #[error("Annotation name '{0}' is reserved")]
    ReservedName(String),

    #[error("Unknown model '{0}'")]
    UnknownModel(String),

    #[error("Failed to load remap file: {0}")]
    Remap(#[source] ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while annotating a batch
#[derive(Error, Debug)]
pub enum AnnotationError {
    #[error("Failed to read annotation source '{name}': {source}")]
    Source {
        name: String,
        #[source]
        source: ParseError,
    },

    #[error("Cannot remap {contig}:{position}: offset {offset_start} overflows")]
    RemapOverflow {
        contig: String,
        position: u64,
        offset_start: u64,
    },
}

/// Contract shared by every guide annotation or scoring model
pub trait ScoreModel {
    /// Stable name used to look the model up
    fn identity(&self) -> &str;

    /// Human-readable summary for output headers
    fn description(&self) -> String;

    /// Whether the model can be used with guides designed under `params`
    fn is_applicable_to_model(&self, params: &ParameterPack) -> bool;

    /// Whether the model can score this particular record
    fn is_applicable_to_guide(&self, params: &ParameterPack, record: &OffTargetRecord) -> bool;

    /// One-time setup. Must be called before [`ScoreModel::annotate`].
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` describing the first invalid input.
    fn configure(&mut self) -> Result<(), ConfigError>;

    /// Annotate a batch of records in place
    ///
    /// # Errors
    ///
    /// Returns an `AnnotationError` if an input can no longer be read.
    fn annotate(
        &self,
        records: &mut [OffTargetRecord],
        encoding: &EncodingContext,
    ) -> Result<(), AnnotationError>;

    /// Output columns this model contributes, in emission order
    fn header_columns(&self) -> Vec<String>;
}

/// Run each model over the records it applies to, preserving record order.
///
/// Models that do not apply to `params` are skipped with a warning.
///
/// # Errors
///
/// Returns the first `AnnotationError` raised by a model.
pub fn run_models(
    models: &[Box<dyn ScoreModel>],
    records: &mut Vec<OffTargetRecord>,
    params: &ParameterPack,
    encoding: &EncodingContext,
) -> Result<(), AnnotationError> {
    for model in models.iter() {
        if !model.is_applicable_to_model(params) {
            warn!(
                "Skipping model '{}': not applicable to {}",
                model.identity(),
                params.enzyme
            );
            continue;
        }

        let all_applicable = records
            .iter()
            .all(|r| model.is_applicable_to_guide(params, r));
        if all_applicable {
            model.annotate(records, encoding)?;
            continue;
        }

        // Annotate only the applicable records, then restore the original order
        let (applicable, rest): (Vec<_>, Vec<_>) = std::mem::take(records)
            .into_iter()
            .enumerate()
            .partition(|(_, r)| model.is_applicable_to_guide(params, r));
        debug!(
            "Model '{}' applies to {} of {} records",
            model.identity(),
            applicable.len(),
            applicable.len() + rest.len()
        );

        let (indices, mut subset): (Vec<usize>, Vec<OffTargetRecord>) =
            applicable.into_iter().unzip();
        let result = model.annotate(&mut subset, encoding);

        let mut merged: Vec<(usize, OffTargetRecord)> =
            indices.into_iter().zip(subset).chain(rest).collect();
        merged.sort_by_key(|(i, _)| *i);
        records.extend(merged.into_iter().map(|(_, r)| r));

        result?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::site::GenomicSite;
    use crate::core::types::{Enzyme, Strand};

    /// Tags every record with context and refuses records without it
    struct ContextTagger {
        cas9_only: bool,
    }

    impl ScoreModel for ContextTagger {
        fn identity(&self) -> &str {
            "context_tagger"
        }

        fn description(&self) -> String {
            "tags records that carry sequence context".to_string()
        }

        fn is_applicable_to_model(&self, params: &ParameterPack) -> bool {
            !self.cas9_only || params.enzyme == Enzyme::SpCas9
        }

        fn is_applicable_to_guide(
            &self,
            _params: &ParameterPack,
            record: &OffTargetRecord,
        ) -> bool {
            record.target.context.is_some()
        }

        fn configure(&mut self) -> Result<(), ConfigError> {
            Ok(())
        }

        fn annotate(
            &self,
            records: &mut [OffTargetRecord],
            _encoding: &EncodingContext,
        ) -> Result<(), AnnotationError> {
            for record in records {
                record.annotations.append("tagged", "yes");
            }
            Ok(())
        }

        fn header_columns(&self) -> Vec<String> {
            vec!["tagged".to_string()]
        }
    }

    fn records() -> Vec<OffTargetRecord> {
        let site = |position: u64, bases: &str| {
            GenomicSite::new("chr1", position, Strand::Forward, bases)
        };
        vec![
            OffTargetRecord::new(site(1, "AAA").with_context("CAAAC")),
            OffTargetRecord::new(site(2, "CCC")),
            OffTargetRecord::new(site(3, "GGG").with_context("TGGGT")),
        ]
    }

    #[test]
    fn test_run_models_only_touches_applicable_guides() {
        let params = ParameterPack::default();
        let encoding = EncodingContext::from_params(&params);
        let models: Vec<Box<dyn ScoreModel>> = vec![Box::new(ContextTagger { cas9_only: false })];
        let mut records = records();

        run_models(&models, &mut records, &params, &encoding).unwrap();

        let positions: Vec<u64> = records.iter().map(|r| r.target.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
        assert!(records[0].annotations.contains("tagged"));
        assert!(!records[1].annotations.contains("tagged"));
        assert!(records[2].annotations.contains("tagged"));
    }

    #[test]
    fn test_run_models_skips_inapplicable_model() {
        let params = ParameterPack::for_enzyme(Enzyme::Cpf1);
        let encoding = EncodingContext::from_params(&params);
        let models: Vec<Box<dyn ScoreModel>> = vec![Box::new(ContextTagger { cas9_only: true })];
        let mut records = records();

        run_models(&models, &mut records, &params, &encoding).unwrap();
        assert!(records.iter().all(|r| r.annotations.is_empty()));
    }
}
