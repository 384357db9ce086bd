//! Reader for guide tables handed to the annotator by an upstream scan.
//!
//! The first non-comment line is a header naming the columns. Required
//! columns are `contig`, `position`, `strand` and `target`; `context` is
//! optional. Extra columns are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::core::record::OffTargetRecord;
use crate::core::site::GenomicSite;
use crate::core::types::Strand;
use crate::parsing::ParseError;

struct Columns {
    contig: usize,
    position: usize,
    strand: usize,
    target: usize,
    context: Option<usize>,
}

impl Columns {
    fn from_header(fields: &[&str]) -> Result<Self, ParseError> {
        let find = |name: &str| {
            fields
                .iter()
                .position(|f| f.trim().eq_ignore_ascii_case(name))
        };
        let require = |name: &str| {
            find(name).ok_or_else(|| {
                ParseError::InvalidFormat(format!("Guide table is missing the '{name}' column"))
            })
        };

        Ok(Self {
            contig: require("contig")?,
            position: require("position")?,
            strand: require("strand")?,
            target: require("target")?,
            context: find("context"),
        })
    }
}

/// Read a guide table from a file
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn read_guides_file(path: &Path) -> Result<Vec<OffTargetRecord>, ParseError> {
    let reader = File::open(path).map(BufReader::new)?;
    read_guides(reader)
}

/// Read a guide table from any buffered reader
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if the header lacks a required column,
/// a row is too short, or a position or strand cannot be parsed.
pub fn read_guides<R: BufRead>(reader: R) -> Result<Vec<OffTargetRecord>, ParseError> {
    let mut columns: Option<Columns> = None;
    let mut records = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        let Some(cols) = &columns else {
            columns = Some(Columns::from_header(&fields)?);
            continue;
        };

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;
        let field = |idx: usize| {
            fields.get(idx).map(|f| f.trim()).ok_or_else(|| {
                ParseError::InvalidFormat(format!(
                    "Line {line_num} has {} fields, expected at least {}",
                    fields.len(),
                    idx + 1
                ))
            })
        };

        let position: u64 = field(cols.position)?.parse().map_err(|_| {
            ParseError::InvalidFormat(format!(
                "Invalid position on line {}: '{}'",
                line_num, fields[cols.position]
            ))
        })?;
        let strand = Strand::parse(field(cols.strand)?).ok_or_else(|| {
            ParseError::InvalidFormat(format!(
                "Invalid strand on line {}: '{}'",
                line_num, fields[cols.strand]
            ))
        })?;

        let mut site = GenomicSite::new(field(cols.contig)?, position, strand, field(cols.target)?);
        if let Some(ctx) = cols.context.and_then(|idx| fields.get(idx)) {
            let ctx = ctx.trim();
            if !ctx.is_empty() {
                site = site.with_context(ctx);
            }
        }

        records.push(OffTargetRecord::new(site));
    }

    if columns.is_none() {
        return Err(ParseError::InvalidFormat(
            "Guide table has no header line".to_string(),
        ));
    }

    Ok(records)
}
