use serde::{Deserialize, Serialize};

use crate::shared::labels::{AgeBucket, Gender, LabelError};

/// One classifier output for one face in one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    pub age: AgeBucket,
    pub gender: Gender,
    pub age_confidence: f64,
    pub gender_confidence: f64,
}

impl RawSample {
    pub fn new(age: AgeBucket, gender: Gender, age_confidence: f64, gender_confidence: f64) -> Self {
        Self {
            age,
            gender,
            age_confidence,
            gender_confidence,
        }
    }

    /// Builds a sample from classifier label strings.
    pub fn from_labels(
        age: &str,
        gender: &str,
        age_confidence: f64,
        gender_confidence: f64,
    ) -> Result<Self, LabelError> {
        Ok(Self::new(
            age.parse()?,
            gender.parse()?,
            age_confidence,
            gender_confidence,
        ))
    }

    /// True when both confidences are finite and within `[0, 1]`.
    pub fn has_valid_confidences(&self) -> bool {
        [self.age_confidence, self.gender_confidence]
            .iter()
            .all(|c| (0.0..=1.0).contains(c))
    }

    pub fn mean_confidence(&self) -> f64 {
        (self.age_confidence + self.gender_confidence) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_from_labels_parses_both() {
        let s = RawSample::from_labels("(38-43)", "Female", 0.5, 0.7).unwrap();
        assert_eq!(s.age, AgeBucket::Adult);
        assert_eq!(s.gender, Gender::Female);
        assert_relative_eq!(s.mean_confidence(), 0.6);
    }

    #[test]
    fn test_from_labels_rejects_unknown_gender() {
        let err = RawSample::from_labels("(38-43)", "Unknown", 0.5, 0.5).unwrap_err();
        assert!(matches!(err, LabelError::InvalidLabel { kind: "gender", .. }));
    }

    #[rstest]
    #[case(0.0, 1.0, true)]
    #[case(0.5, 0.5, true)]
    #[case(-0.1, 0.5, false)]
    #[case(0.5, 1.01, false)]
    #[case(f64::NAN, 0.5, false)]
    fn test_confidence_range(#[case] age: f64, #[case] gender: f64, #[case] valid: bool) {
        let s = RawSample::new(AgeBucket::Teen, Gender::Male, age, gender);
        assert_eq!(s.has_valid_confidences(), valid);
    }
}
