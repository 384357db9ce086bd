//! Core data types for guide annotation.
//!
//! - [`GenomicSite`]: contig, position, strand and bases of a guide target
//! - [`OffTargetRecord`]: a target site plus its named [`Annotations`]
//! - [`ParameterPack`], [`EncodingContext`]: enzyme parameters handed to models
//! - [`Strand`], [`Enzyme`], [`IntervalConvention`]: small classification types
//!
//! ## Coordinates
//!
//! Positions are stored as reported by the upstream guide scan. Overlap tests
//! against BED entries use [`BED_INTERVAL_CONVENTION`]:
//!
//! | Position | Entry `[100, 200)` |
//! |----------|--------------------|
//! | 99       | outside            |
//! | 100      | inside             |
//! | 199      | inside             |
//! | 200      | outside            |
//!
//! [`GenomicSite`]: site::GenomicSite
//! [`OffTargetRecord`]: record::OffTargetRecord
//! [`Annotations`]: record::Annotations
//! [`ParameterPack`]: params::ParameterPack
//! [`EncodingContext`]: params::EncodingContext
//! [`Strand`]: types::Strand
//! [`Enzyme`]: types::Enzyme
//! [`IntervalConvention`]: types::IntervalConvention
//! [`BED_INTERVAL_CONVENTION`]: types::BED_INTERVAL_CONVENTION

pub mod params;
pub mod record;
pub mod site;
pub mod types;
