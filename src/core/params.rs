use serde::{Deserialize, Serialize};

use crate::core::types::Enzyme;

/// Enzyme-specific parameters the guides were designed under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterPack {
    pub enzyme: Enzyme,

    /// Protospacer length, excluding the PAM
    pub protospacer_length: usize,

    /// PAM in IUPAC notation
    pub pam: String,

    /// Whether the PAM sits 5' of the protospacer
    pub five_prime_pam: bool,
}

impl ParameterPack {
    #[must_use]
    pub fn for_enzyme(enzyme: Enzyme) -> Self {
        match enzyme {
            Enzyme::SpCas9 => Self {
                enzyme,
                protospacer_length: 20,
                pam: "NGG".to_string(),
                five_prime_pam: false,
            },
            Enzyme::Cpf1 => Self {
                enzyme,
                protospacer_length: 20,
                pam: "TTTN".to_string(),
                five_prime_pam: true,
            },
        }
    }

    /// Protospacer plus PAM
    #[must_use]
    pub fn total_scan_length(&self) -> usize {
        self.protospacer_length + self.pam.len()
    }
}

impl Default for ParameterPack {
    fn default() -> Self {
        Self::for_enzyme(Enzyme::SpCas9)
    }
}

/// Describes how guide sequences were packed by the upstream scan.
///
/// Models that work directly on encoded targets read the layout from here;
/// annotation-only models ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingContext {
    /// Bases packed into each encoded target
    pub target_length: usize,

    /// Bits used per base
    pub bits_per_base: u8,
}

impl EncodingContext {
    #[must_use]
    pub fn from_params(params: &ParameterPack) -> Self {
        Self {
            target_length: params.total_scan_length(),
            bits_per_base: 2,
        }
    }
}
