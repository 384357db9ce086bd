//! Annotate guide records with features from BED files.
//!
//! Sources are given as a comma-separated list of `name:path` pairs, e.g.
//! `exons:gencode_exons.bed,repeats:rmsk.bed.gz`. Every BED entry whose
//! interval contains a record's position adds the entry's name to the
//! record's annotations under the source name.
//!
//! An optional remap file moves records off renamed working contigs before
//! overlaps are computed, see [`crate::parsing::remap`].

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::params::{EncodingContext, ParameterPack};
use crate::core::record::OffTargetRecord;
use crate::core::types::BED_INTERVAL_CONVENTION;
use crate::parsing::bed::{open_bed, BedEntry};
use crate::parsing::remap::{IntervalMappingTable, OLD_CONTIG_KEY};
use crate::scoring::{AnnotationError, ConfigError, ScoreModel};

/// Name the BED annotator registers under
pub const BED_ANNOTATOR_NAME: &str = "bedannotator";

/// A named BED file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BedSource {
    pub name: String,
    pub path: PathBuf,
}

/// Parse a `name:path[,name:path...]` list into sources.
///
/// Paths are resolved to absolute paths and must point at existing files.
///
/// # Errors
///
/// Returns `ConfigError::EmptySpec` for a blank list,
/// `ConfigError::MalformedBedSpec` for an item that is not exactly one
/// non-empty name and non-empty path joined by a colon,
/// `ConfigError::MissingFile` if a path is not a file, and
/// `ConfigError::DuplicateName` / `ConfigError::ReservedName` for unusable names.
pub fn parse_bed_sources(spec: &str) -> Result<Vec<BedSource>, ConfigError> {
    if spec.trim().is_empty() {
        return Err(ConfigError::EmptySpec);
    }

    let mut sources = Vec::new();
    let mut seen = HashSet::new();

    for item in spec.split(',') {
        let item = item.trim();
        let parts: Vec<&str> = item.split(':').collect();
        let [name, path] = parts.as_slice() else {
            return Err(ConfigError::MalformedBedSpec(item.to_string()));
        };
        let (name, path) = (name.trim(), path.trim());
        if name.is_empty() || path.is_empty() {
            return Err(ConfigError::MalformedBedSpec(item.to_string()));
        }

        if name == OLD_CONTIG_KEY {
            return Err(ConfigError::ReservedName(name.to_string()));
        }
        if !seen.insert(name.to_string()) {
            return Err(ConfigError::DuplicateName(name.to_string()));
        }

        let path = Path::new(path);
        if !path.is_file() {
            return Err(ConfigError::MissingFile {
                name: name.to_string(),
                path: path.display().to_string(),
            });
        }

        sources.push(BedSource {
            name: name.to_string(),
            path: std::fs::canonicalize(path)?,
        });
    }

    Ok(sources)
}

/// Annotates records with overlapping BED features
#[derive(Debug, Clone)]
pub struct BedAnnotator {
    spec: String,
    remap_path: Option<PathBuf>,
    sources: Vec<BedSource>,
    mapping: Option<IntervalMappingTable>,
}

impl BedAnnotator {
    /// Create an unconfigured annotator from a source list and optional remap file
    pub fn new(spec: impl Into<String>, remap_path: Option<PathBuf>) -> Self {
        Self {
            spec: spec.into(),
            remap_path,
            sources: Vec::new(),
            mapping: None,
        }
    }

    #[must_use]
    pub fn sources(&self) -> &[BedSource] {
        &self.sources
    }

    #[must_use]
    pub fn remapping_enabled(&self) -> bool {
        self.mapping.is_some()
    }

    fn annotate_from_source(
        source: &BedSource,
        records: &mut [OffTargetRecord],
    ) -> Result<(), AnnotationError> {
        let source_error = |e| AnnotationError::Source {
            name: source.name.clone(),
            source: e,
        };

        let mut entries = 0usize;
        let mut hits = 0usize;
        for entry in open_bed(&source.path).map_err(source_error)? {
            let entry = entry.map_err(source_error)?;
            entries += 1;
            for record in records.iter_mut() {
                if overlaps(&entry, record) {
                    record.annotations.append(&source.name, entry.name.clone());
                    hits += 1;
                }
            }
        }

        debug!(
            "BED source '{}': {} entries, {} overlaps",
            source.name, entries, hits
        );
        Ok(())
    }
}

fn overlaps(entry: &BedEntry, record: &OffTargetRecord) -> bool {
    entry.contig == record.target.contig
        && BED_INTERVAL_CONVENTION.contains(entry.start, entry.stop, record.target.position)
}

impl ScoreModel for BedAnnotator {
    fn identity(&self) -> &str {
        BED_ANNOTATOR_NAME
    }

    fn description(&self) -> String {
        self.sources
            .iter()
            .map(|s| s.path.display().to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    fn is_applicable_to_model(&self, _params: &ParameterPack) -> bool {
        true
    }

    fn is_applicable_to_guide(&self, _params: &ParameterPack, _record: &OffTargetRecord) -> bool {
        true
    }

    fn configure(&mut self) -> Result<(), ConfigError> {
        let sources = parse_bed_sources(&self.spec)?;

        let mapping = match &self.remap_path {
            Some(path) => {
                let table = IntervalMappingTable::from_path(path).map_err(ConfigError::Remap)?;
                info!(
                    "Loaded {} contig mappings from {}",
                    table.len(),
                    path.display()
                );
                Some(table)
            }
            None => None,
        };

        for source in &sources {
            debug!("BED source '{}' -> {}", source.name, source.path.display());
        }

        self.sources = sources;
        self.mapping = mapping;
        Ok(())
    }

    fn annotate(
        &self,
        records: &mut [OffTargetRecord],
        _encoding: &EncodingContext,
    ) -> Result<(), AnnotationError> {
        if let Some(table) = &self.mapping {
            let mut remapped = 0usize;
            for record in records.iter_mut() {
                if table.remap(record)? {
                    remapped += 1;
                }
            }
            info!(
                "Remapped {} of {} records to original contigs",
                remapped,
                records.len()
            );
        }

        for source in &self.sources {
            Self::annotate_from_source(source, records)?;
        }

        Ok(())
    }

    fn header_columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = self.sources.iter().map(|s| s.name.clone()).collect();
        if self.remapping_enabled() {
            columns.push(OLD_CONTIG_KEY.to_string());
        }
        columns
    }
}
