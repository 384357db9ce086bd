use serde::{Deserialize, Serialize};

/// Strand a guide target was found on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    /// Parse a strand from its tabular representation.
    ///
    /// Accepts `+`/`-` as well as the `FWD`/`RVS` tags used by guide tables.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "+" | "FWD" | "FORWARD" => Some(Self::Forward),
            "-" | "RVS" | "REV" | "REVERSE" => Some(Self::Reverse),
            _ => None,
        }
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forward => write!(f, "+"),
            Self::Reverse => write!(f, "-"),
        }
    }
}

/// Nuclease a set of guides was designed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Enzyme {
    /// S. pyogenes Cas9, 20nt protospacer with a 3' NGG PAM
    SpCas9,
    /// Cas12a (Cpf1), 20nt protospacer with a 5' TTTN PAM
    Cpf1,
}

impl std::fmt::Display for Enzyme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SpCas9 => write!(f, "SpCas9"),
            Self::Cpf1 => write!(f, "Cpf1"),
        }
    }
}

/// Half-open vs closed interval semantics for the stop coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalConvention {
    /// `start <= pos < stop`, the standard BED convention
    HalfOpen,
    /// `start <= pos <= stop`
    Closed,
}

impl IntervalConvention {
    #[must_use]
    pub fn contains(self, start: u64, stop: u64, pos: u64) -> bool {
        match self {
            Self::HalfOpen => start <= pos && pos < stop,
            Self::Closed => start <= pos && pos <= stop,
        }
    }
}

/// Convention used for every overlap test against BED entries
pub const BED_INTERVAL_CONVENTION: IntervalConvention = IntervalConvention::HalfOpen;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strand_parse() {
        assert_eq!(Strand::parse("+"), Some(Strand::Forward));
        assert_eq!(Strand::parse("FWD"), Some(Strand::Forward));
        assert_eq!(Strand::parse("-"), Some(Strand::Reverse));
        assert_eq!(Strand::parse("rvs"), Some(Strand::Reverse));
        assert_eq!(Strand::parse("."), None);
    }

    #[test]
    fn test_half_open_boundaries() {
        let conv = IntervalConvention::HalfOpen;
        assert!(conv.contains(100, 200, 100));
        assert!(conv.contains(100, 200, 199));
        assert!(!conv.contains(100, 200, 200));
        assert!(!conv.contains(100, 200, 99));
    }

    #[test]
    fn test_closed_includes_stop() {
        assert!(IntervalConvention::Closed.contains(100, 200, 200));
    }

    #[test]
    fn test_bed_convention_is_half_open() {
        assert_eq!(BED_INTERVAL_CONVENTION, IntervalConvention::HalfOpen);
    }
}
