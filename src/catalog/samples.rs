// Static demo sample table
//
// Ten samples, two per leak class, mirroring the recordings shipped with the
// demo dataset. Confidences and probability tables are the precomputed model
// outputs for those recordings; the pipeline reports them verbatim.

use once_cell::sync::Lazy;

use super::{ClassProbability, ClassificationResult, LeakClass, Sample};

/// Processing time reported with every canned result
const PROCESSING_TIME_LABEL: &str = "1.2s";

fn sample(
    id: u32,
    class: LeakClass,
    display_name: &str,
    source_file: &str,
    confidence_percent: f32,
    probabilities: [(LeakClass, f32); 5],
) -> Sample {
    Sample {
        id,
        class,
        display_name: display_name.to_string(),
        source_file: source_file.to_string(),
        canned_result: ClassificationResult {
            predicted: class,
            confidence_percent,
            probabilities: probabilities
                .into_iter()
                .map(|(class, probability_percent)| ClassProbability {
                    class,
                    probability_percent,
                })
                .collect(),
            processing_time_label: PROCESSING_TIME_LABEL.to_string(),
        },
    }
}

static SAMPLES: Lazy<Vec<Sample>> = Lazy::new(|| {
    use LeakClass::*;
    vec![
        sample(
            1,
            CircumferentialCrack,
            "Sample 1 - 0.18 LPS",
            "BR_CC_0.18 LPS_N_H1.raw",
            97.5,
            [
                (CircumferentialCrack, 97.5),
                (LongitudinalCrack, 1.2),
                (OrificeLeak, 0.8),
                (GasketLeak, 0.3),
                (NoLeak, 0.2),
            ],
        ),
        sample(
            2,
            CircumferentialCrack,
            "Sample 2 - 0.47 LPS",
            "BR_CC_0.47 LPS_N_H1.raw",
            96.8,
            [
                (CircumferentialCrack, 96.8),
                (LongitudinalCrack, 1.5),
                (OrificeLeak, 1.0),
                (GasketLeak, 0.5),
                (NoLeak, 0.2),
            ],
        ),
        sample(
            3,
            GasketLeak,
            "Sample 1 - 0.18 LPS",
            "BR_GL_0.18 LPS_N_H1.raw",
            95.3,
            [
                (GasketLeak, 95.3),
                (OrificeLeak, 2.1),
                (CircumferentialCrack, 1.3),
                (LongitudinalCrack, 0.9),
                (NoLeak, 0.4),
            ],
        ),
        sample(
            4,
            GasketLeak,
            "Sample 2 - 0.47 LPS",
            "BR_GL_0.47 LPS_N_H1.raw",
            94.7,
            [
                (GasketLeak, 94.7),
                (OrificeLeak, 2.5),
                (CircumferentialCrack, 1.5),
                (LongitudinalCrack, 0.8),
                (NoLeak, 0.5),
            ],
        ),
        sample(
            5,
            NoLeak,
            "Sample 1 - Normal Flow",
            "BR_NL_0.18 LPS_N_H1.raw",
            98.9,
            [
                (NoLeak, 98.9),
                (GasketLeak, 0.5),
                (OrificeLeak, 0.3),
                (LongitudinalCrack, 0.2),
                (CircumferentialCrack, 0.1),
            ],
        ),
        sample(
            6,
            NoLeak,
            "Sample 2 - Normal Flow",
            "BR_NL_0.47 LPS_N_H1.raw",
            99.2,
            [
                (NoLeak, 99.2),
                (GasketLeak, 0.4),
                (OrificeLeak, 0.2),
                (LongitudinalCrack, 0.1),
                (CircumferentialCrack, 0.1),
            ],
        ),
        sample(
            7,
            LongitudinalCrack,
            "Sample 1 - 0.18 LPS",
            "BR_LC_0.18 LPS_N_H1.raw",
            96.2,
            [
                (LongitudinalCrack, 96.2),
                (CircumferentialCrack, 2.1),
                (OrificeLeak, 1.0),
                (GasketLeak, 0.5),
                (NoLeak, 0.2),
            ],
        ),
        sample(
            8,
            LongitudinalCrack,
            "Sample 2 - 0.47 LPS",
            "BR_LC_0.47 LPS_N_H1.raw",
            95.8,
            [
                (LongitudinalCrack, 95.8),
                (CircumferentialCrack, 2.3),
                (OrificeLeak, 1.2),
                (GasketLeak, 0.5),
                (NoLeak, 0.2),
            ],
        ),
        sample(
            9,
            OrificeLeak,
            "Sample 1 - 0.18 LPS",
            "BR_OL_0.18 LPS_N_H1.raw",
            97.1,
            [
                (OrificeLeak, 97.1),
                (GasketLeak, 1.5),
                (LongitudinalCrack, 0.8),
                (CircumferentialCrack, 0.4),
                (NoLeak, 0.2),
            ],
        ),
        sample(
            10,
            OrificeLeak,
            "Sample 2 - 0.47 LPS",
            "BR_OL_0.47 LPS_N_H1.raw",
            96.5,
            [
                (OrificeLeak, 96.5),
                (GasketLeak, 1.8),
                (LongitudinalCrack, 1.0),
                (CircumferentialCrack, 0.5),
                (NoLeak, 0.2),
            ],
        ),
    ]
});

/// Read-only view over the static sample table
///
/// Lookups assume a valid catalog; absent ids return None and the caller
/// decides whether that is an UnknownSample contract violation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleCatalog;

impl SampleCatalog {
    pub fn new() -> Self {
        SampleCatalog
    }

    /// All samples in catalog order
    pub fn samples(&self) -> &'static [Sample] {
        &SAMPLES
    }

    /// Look up a sample by id
    pub fn by_id(&self, id: u32) -> Option<&'static Sample> {
        SAMPLES.iter().find(|sample| sample.id == id)
    }

    /// First sample of a class (the default variant when a class is selected)
    pub fn first_of_class(&self, class: LeakClass) -> Option<&'static Sample> {
        SAMPLES.iter().find(|sample| sample.class == class)
    }

    /// All variants of a class, in catalog order
    pub fn variants_of_class(&self, class: LeakClass) -> Vec<&'static Sample> {
        SAMPLES
            .iter()
            .filter(|sample| sample.class == class)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_size_and_ids() {
        let catalog = SampleCatalog::new();
        assert_eq!(catalog.samples().len(), 10);

        // Ids are unique and stable
        for (index, sample) in catalog.samples().iter().enumerate() {
            assert_eq!(sample.id, index as u32 + 1);
        }
    }

    #[test]
    fn test_two_variants_per_class() {
        let catalog = SampleCatalog::new();
        for class in LeakClass::ALL {
            assert_eq!(
                catalog.variants_of_class(class).len(),
                2,
                "class {} should have two variants",
                class
            );
        }
    }

    #[test]
    fn test_by_id() {
        let catalog = SampleCatalog::new();
        let sample = catalog.by_id(5).unwrap();
        assert_eq!(sample.class, LeakClass::NoLeak);
        assert_eq!(sample.source_file, "BR_NL_0.18 LPS_N_H1.raw");
        assert!(catalog.by_id(99).is_none());
    }

    #[test]
    fn test_first_of_class() {
        let catalog = SampleCatalog::new();
        let sample = catalog.first_of_class(LeakClass::GasketLeak).unwrap();
        assert_eq!(sample.id, 3);
    }

    #[test]
    fn test_canned_results_are_consistent() {
        let catalog = SampleCatalog::new();
        for sample in catalog.samples() {
            let result = &sample.canned_result;

            // Prediction matches the sample's own class
            assert_eq!(result.predicted, sample.class);

            // One probability entry per class, ranked descending, top entry
            // equals the reported confidence
            assert_eq!(result.probabilities.len(), LeakClass::ALL.len());
            let unique: std::collections::HashSet<_> = result
                .probabilities
                .iter()
                .map(|entry| entry.class)
                .collect();
            assert_eq!(unique.len(), LeakClass::ALL.len());
            for pair in result.probabilities.windows(2) {
                assert!(pair[0].probability_percent >= pair[1].probability_percent);
            }
            assert_eq!(result.probabilities[0].class, sample.class);
            assert_eq!(
                result.probabilities[0].probability_percent,
                result.confidence_percent
            );
        }
    }

    #[test]
    fn test_noleak_sample_confidence() {
        let catalog = SampleCatalog::new();
        let sample = catalog.first_of_class(LeakClass::NoLeak).unwrap();
        assert_eq!(sample.canned_result.confidence_percent, 98.9);
        assert_eq!(sample.canned_result.processing_time_label, "1.2s");
    }
}
