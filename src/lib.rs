//! # guide-annotate
//!
//! A library for attaching genomic-feature annotations to CRISPR guide and
//! off-target sites.
//!
//! Guide design pipelines find thousands of candidate targets. Before picking
//! guides it is useful to know which of those targets fall in exons, repeats,
//! regulatory elements or any other feature set available as a BED file.
//!
//! `guide-annotate` provides the plugin contract annotation models implement
//! ([`ScoreModel`]) and a BED-backed model ([`BedAnnotator`]) that tags every
//! target with the names of the features overlapping it.
//!
//! ## Features
//!
//! - **Named sources**: each BED file contributes its own annotation column
//! - **Accumulating annotations**: several overlapping features are all kept, in file order
//! - **Contig remapping**: guides found on renamed working contigs are moved back to
//!   original genome coordinates before overlaps are computed
//! - **Streaming**: BED files (plain or gzip) are read one entry at a time
//!
//! ## Example
//!
//! ```rust,no_run
//! use guide_annotate::{
//!     BedAnnotator, EncodingContext, GenomicSite, OffTargetRecord, ParameterPack, ScoreModel,
//!     Strand,
//! };
//!
//! let mut annotator = BedAnnotator::new("exons:exons.bed", None);
//! annotator.configure().unwrap();
//!
//! let mut records = vec![OffTargetRecord::new(GenomicSite::new(
//!     "chr1",
//!     1_500,
//!     Strand::Forward,
//!     "GACGCATAAAGATGAGACGCTGG",
//! ))];
//!
//! let encoding = EncodingContext::from_params(&ParameterPack::default());
//! annotator.annotate(&mut records, &encoding).unwrap();
//!
//! if let Some(exons) = records[0].annotations.get("exons") {
//!     println!("overlaps {}", exons.join(","));
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Guide sites, records, annotations and enzyme parameters
//! - [`parsing`]: BED, remap and guide table readers
//! - [`scoring`]: The model contract, registry and BED annotator
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod parsing;
pub mod scoring;

// Re-export commonly used types for convenience
pub use core::params::{EncodingContext, ParameterPack};
pub use core::record::{Annotations, OffTargetRecord};
pub use core::site::GenomicSite;
pub use core::types::*;
pub use parsing::remap::IntervalMappingTable;
pub use scoring::bed::BedAnnotator;
pub use scoring::ScoreModel;
