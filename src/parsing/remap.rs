//! Contig remapping tables.
//!
//! Guides are sometimes discovered against a reduced reference whose contigs
//! were cut out of the original genome and renamed. A remap file records
//! where each working contig came from:
//!
//! ```text
//! original_contig<TAB>offset_start<TAB>offset_stop<TAB>new_contig_id
//! chrX	1000	5000	scaffold_7
//! ```
//!
//! Positions on a working contig are 1-based relative to its start, so a
//! position `p` on `scaffold_7` maps back to `chrX:(p - 1) + 1000`.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::warn;

use crate::core::record::OffTargetRecord;
use crate::parsing::ParseError;
use crate::scoring::AnnotationError;

/// Annotation name that receives a record's pre-remap contig
pub const OLD_CONTIG_KEY: &str = "oldContig";

/// One row of a remap file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalMapping {
    pub original_contig: String,
    pub offset_start: u64,
    pub offset_stop: u64,
    pub new_contig: String,
}

impl IntervalMapping {
    /// Translate a 1-based position on the working contig to the original
    /// contig's coordinate frame. `None` if the result does not fit in a `u64`.
    #[must_use]
    pub fn original_position(&self, position: u64) -> Option<u64> {
        position.saturating_sub(1).checked_add(self.offset_start)
    }
}

/// Lookup from working contig id to its [`IntervalMapping`]
#[derive(Debug, Clone, Default)]
pub struct IntervalMappingTable {
    mappings: HashMap<String, IntervalMapping>,
}

impl IntervalMappingTable {
    /// Load a remap file
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if the file cannot be read, or
    /// `ParseError::InvalidFormat` for a line without exactly four fields or
    /// with a non-integer offset.
    pub fn from_path(path: &Path) -> Result<Self, ParseError> {
        let reader = File::open(path).map(BufReader::new)?;
        Self::from_reader(reader)
    }

    /// Build a table from any buffered reader
    ///
    /// When two lines share a working contig id the later line wins.
    ///
    /// # Errors
    ///
    /// See [`IntervalMappingTable::from_path`].
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, ParseError> {
        let mut mappings = HashMap::new();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }

            let line_num = i + 1;
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() != 4 {
                return Err(ParseError::InvalidFormat(format!(
                    "Remap line {line_num} has {} fields, expected 4: '{line}'",
                    fields.len()
                )));
            }

            let parse_offset = |value: &str| {
                value.trim().parse::<u64>().map_err(|_| {
                    ParseError::InvalidFormat(format!(
                        "Invalid offset on remap line {line_num}: '{value}'"
                    ))
                })
            };

            let mapping = IntervalMapping {
                original_contig: fields[0].trim().to_string(),
                offset_start: parse_offset(fields[1])?,
                offset_stop: parse_offset(fields[2])?,
                new_contig: fields[3].trim().to_string(),
            };

            if let Some(previous) = mappings.insert(mapping.new_contig.clone(), mapping) {
                warn!(
                    "Remap line {} redefines contig '{}' (was {}:{}), keeping the later entry",
                    line_num,
                    previous.new_contig,
                    previous.original_contig,
                    previous.offset_start
                );
            }
        }

        Ok(Self { mappings })
    }

    #[must_use]
    pub fn get(&self, contig: &str) -> Option<&IntervalMapping> {
        self.mappings.get(contig)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Move a record back to its original contig.
    ///
    /// Records on contigs without a mapping are left untouched. Returns
    /// whether the record was remapped.
    ///
    /// # Errors
    ///
    /// Returns `AnnotationError::RemapOverflow` if the translated position
    /// does not fit in a `u64`. The record is not modified.
    pub fn remap(&self, record: &mut OffTargetRecord) -> Result<bool, AnnotationError> {
        let Some(mapping) = self.mappings.get(&record.target.contig) else {
            return Ok(false);
        };

        let position = mapping
            .original_position(record.target.position)
            .ok_or_else(|| AnnotationError::RemapOverflow {
                contig: record.target.contig.clone(),
                position: record.target.position,
                offset_start: mapping.offset_start,
            })?;

        let relocated = record
            .target
            .relocated(mapping.original_contig.clone(), position);
        record
            .annotations
            .append(OLD_CONTIG_KEY, record.target.contig.clone());
        record.replace_target(relocated);
        Ok(true)
    }
}
