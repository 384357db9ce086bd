//! Parsers for the files the annotator and its host consume.
//!
//! - **BED files**: interval features streamed one entry at a time ([`bed`])
//! - **Remap files**: four-column contig offset tables ([`remap`])
//! - **Guide tables**: TSV of candidate guide targets ([`guides`])
//!
//! ## Example
//!
//! ```rust,no_run
//! use guide_annotate::parsing::bed::open_bed;
//! use std::path::Path;
//!
//! for entry in open_bed(Path::new("exons.bed")).unwrap() {
//!     let entry = entry.unwrap();
//!     println!("{}:{}-{} {}", entry.contig, entry.start, entry.stop, entry.name);
//! }
//! ```

use thiserror::Error;

pub mod bed;
pub mod guides;
pub mod remap;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}
