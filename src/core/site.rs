use serde::{Deserialize, Serialize};

use crate::core::types::Strand;

/// Genomic location and sequence of a candidate guide target
///
/// Sites are treated as values: remapping builds a new site with
/// [`GenomicSite::relocated`] instead of editing coordinates in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenomicSite {
    /// Contig the site was found on
    pub contig: String,

    /// Position on the contig
    pub position: u64,

    /// Strand of the target
    pub strand: Strand,

    /// Target bases (protospacer plus PAM)
    pub bases: String,

    /// Flanking sequence context, when the upstream scan kept it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl GenomicSite {
    pub fn new(
        contig: impl Into<String>,
        position: u64,
        strand: Strand,
        bases: impl Into<String>,
    ) -> Self {
        Self {
            contig: contig.into(),
            position,
            strand,
            bases: bases.into(),
            context: None,
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Copy of this site placed on another contig and position, keeping
    /// strand, bases and context.
    #[must_use]
    pub fn relocated(&self, contig: impl Into<String>, position: u64) -> Self {
        Self {
            contig: contig.into(),
            position,
            strand: self.strand,
            bases: self.bases.clone(),
            context: self.context.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relocated_keeps_sequence() {
        let site = GenomicSite::new("scaffold_7", 42, Strand::Reverse, "ACGTACGTACGTACGTACGTAGG")
            .with_context("TTTT");
        let moved = site.relocated("chrX", 1041);

        assert_eq!(moved.contig, "chrX");
        assert_eq!(moved.position, 1041);
        assert_eq!(moved.strand, Strand::Reverse);
        assert_eq!(moved.bases, site.bases);
        assert_eq!(moved.context.as_deref(), Some("TTTT"));
        // Original untouched
        assert_eq!(site.contig, "scaffold_7");
    }
}
