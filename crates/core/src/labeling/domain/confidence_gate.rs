use crate::shared::constants::DEFAULT_MIN_CONFIDENCE;

use super::raw_sample::RawSample;

/// Decides whether a raw classification enters an identity's history.
///
/// A sample is admitted when both confidences strictly exceed the threshold,
/// or unconditionally while the identity has never committed a label, so a
/// new face is labeled on its first prediction. Confidences outside `[0, 1]`
/// are never admitted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfidenceGate {
    min_confidence: f64,
}

impl ConfidenceGate {
    pub fn new(min_confidence: f64) -> Self {
        Self { min_confidence }
    }

    pub fn min_confidence(&self) -> f64 {
        self.min_confidence
    }

    pub fn should_admit(&self, sample: &RawSample, identity_has_stable_label: bool) -> bool {
        should_admit(sample, identity_has_stable_label, self.min_confidence)
    }
}

impl Default for ConfidenceGate {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_CONFIDENCE)
    }
}

pub fn should_admit(
    sample: &RawSample,
    identity_has_stable_label: bool,
    min_confidence: f64,
) -> bool {
    if !sample.has_valid_confidences() {
        return false;
    }
    if !identity_has_stable_label {
        return true;
    }
    sample.age_confidence > min_confidence && sample.gender_confidence > min_confidence
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::labels::{AgeBucket, Gender};
    use rstest::rstest;

    fn sample(age_conf: f64, gender_conf: f64) -> RawSample {
        RawSample::new(AgeBucket::YoungAdult, Gender::Male, age_conf, gender_conf)
    }

    #[test]
    fn test_bootstrap_admits_any_confidence() {
        let gate = ConfidenceGate::default();
        assert!(gate.should_admit(&sample(0.01, 0.01), false));
        assert!(gate.should_admit(&sample(0.0, 0.0), false));
    }

    #[rstest]
    #[case(0.3, 0.9, false)]
    #[case(0.9, 0.3, false)]
    #[case(0.3, 0.3, false)]
    #[case(0.31, 0.31, true)]
    #[case(1.0, 1.0, true)]
    fn test_threshold_is_strict_for_labeled_identity(
        #[case] age_conf: f64,
        #[case] gender_conf: f64,
        #[case] admitted: bool,
    ) {
        let gate = ConfidenceGate::default();
        assert_eq!(gate.should_admit(&sample(age_conf, gender_conf), true), admitted);
    }

    #[rstest]
    #[case(1.5, 0.9)]
    #[case(0.9, -0.2)]
    #[case(f64::NAN, 0.9)]
    fn test_out_of_range_never_admitted(#[case] age_conf: f64, #[case] gender_conf: f64) {
        assert!(!should_admit(&sample(age_conf, gender_conf), false, 0.3));
        assert!(!should_admit(&sample(age_conf, gender_conf), true, 0.3));
    }

    #[test]
    fn test_custom_threshold() {
        let gate = ConfidenceGate::new(0.8);
        assert!(!gate.should_admit(&sample(0.75, 0.95), true));
        assert!(gate.should_admit(&sample(0.85, 0.95), true));
        assert_eq!(gate.min_confidence(), 0.8);
    }
}
