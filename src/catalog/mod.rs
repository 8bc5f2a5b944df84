// Sample catalog - leak classes, sample metadata and canned results
//
// The catalog is a static read-only table of selectable demo samples. Each
// sample carries the classification result the pipeline will report for it;
// nothing here is computed at runtime. The engine consumes this table, it
// never builds or mutates it.

mod samples;

pub use samples::SampleCatalog;

use std::fmt;
use std::str::FromStr;

use crate::error::SynthesisError;

/// Leak class of an acoustic sample
///
/// Closed enum driving every synthesis branch: the per-class shaping table,
/// the catalog lookups, and the canned probability tables are all keyed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum LeakClass {
    /// Crack around the pipe circumference (mid frequencies, periodic bursts)
    CircumferentialCrack,
    /// Leaking joint gasket (broad diffuse spectrum)
    GasketLeak,
    /// Crack along the pipe axis (higher frequencies, pulsing)
    LongitudinalCrack,
    /// Normal flow, no leak (low energy, low frequencies)
    NoLeak,
    /// Round orifice leak (highest frequencies, continuous)
    OrificeLeak,
}

impl LeakClass {
    /// All classes in catalog display order
    pub const ALL: [LeakClass; 5] = [
        LeakClass::CircumferentialCrack,
        LeakClass::GasketLeak,
        LeakClass::NoLeak,
        LeakClass::LongitudinalCrack,
        LeakClass::OrificeLeak,
    ];

    /// Get human-readable name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            LeakClass::CircumferentialCrack => "Circumferential Crack",
            LeakClass::GasketLeak => "Gasket Leak",
            LeakClass::LongitudinalCrack => "Longitudinal Crack",
            LeakClass::NoLeak => "No-leak",
            LeakClass::OrificeLeak => "Orifice Leak",
        }
    }
}

impl fmt::Display for LeakClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for LeakClass {
    type Err = SynthesisError;

    /// Parse a catalog display name
    ///
    /// This is the one place an unrecognized label can exist; everywhere else
    /// the closed enum makes the synthesis branches total.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeakClass::ALL
            .iter()
            .copied()
            .find(|class| class.display_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| SynthesisError::InvalidLeakClass {
                label: s.to_string(),
            })
    }
}

/// One entry of a canned probability table
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClassProbability {
    pub class: LeakClass,
    pub probability_percent: f32,
}

/// Canned classification outcome attached to a sample
///
/// Returned verbatim by the ResultResolver when the pipeline reaches its
/// terminal stage. `probabilities` carries one entry per LeakClass, ranked;
/// the source data does not force the entries to sum to exactly 100.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClassificationResult {
    pub predicted: LeakClass,
    pub confidence_percent: f32,
    pub probabilities: Vec<ClassProbability>,
    pub processing_time_label: String,
}

/// Selectable demo sample
///
/// Immutable metadata supplied by the static catalog, looked up by id or by
/// class. `source_file` names the raw hydrophone recording the sample stands
/// in for; it is display text only, never opened.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Sample {
    pub id: u32,
    pub class: LeakClass,
    pub display_name: String,
    pub source_file: String,
    pub canned_result: ClassificationResult,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCode, SynthesisErrorCodes};

    #[test]
    fn test_display_names() {
        assert_eq!(
            LeakClass::CircumferentialCrack.display_name(),
            "Circumferential Crack"
        );
        assert_eq!(LeakClass::NoLeak.display_name(), "No-leak");
        assert_eq!(LeakClass::OrificeLeak.display_name(), "Orifice Leak");
    }

    #[test]
    fn test_from_str_roundtrip() {
        for class in LeakClass::ALL {
            let parsed: LeakClass = class.display_name().parse().unwrap();
            assert_eq!(parsed, class);
        }
    }

    #[test]
    fn test_from_str_case_insensitive() {
        let parsed: LeakClass = "gasket leak".parse().unwrap();
        assert_eq!(parsed, LeakClass::GasketLeak);
    }

    #[test]
    fn test_from_str_unrecognized_label() {
        let result = LeakClass::from_str("Weld Crack");
        let err = result.unwrap_err();
        assert_eq!(err.code(), SynthesisErrorCodes::INVALID_LEAK_CLASS);
        assert!(err.message().contains("Weld Crack"));
    }

    #[test]
    fn test_all_covers_every_class() {
        assert_eq!(LeakClass::ALL.len(), 5);
        // Hash-set dedup to catch accidental duplicates in ALL
        let unique: std::collections::HashSet<_> = LeakClass::ALL.iter().collect();
        assert_eq!(unique.len(), 5);
    }
}
