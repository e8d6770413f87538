use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::classification::domain::face_classifier::FaceClassifier;
use crate::labeling::domain::raw_sample::RawSample;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// A classifier output as recorded, before label validation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordedClassification {
    pub age: String,
    pub gender: String,
    pub age_confidence: f64,
    pub gender_confidence: f64,
}

/// Replays recorded classifications, matched by frame index and the exact
/// detection box they were recorded against.
///
/// Labels are validated on replay, so a recording with an unknown label
/// surfaces as a per-face classification error.
pub struct ReplayFaceClassifier {
    recorded: HashMap<usize, Vec<(Region, RecordedClassification)>>,
}

impl ReplayFaceClassifier {
    pub fn new(recorded: HashMap<usize, Vec<(Region, RecordedClassification)>>) -> Self {
        Self { recorded }
    }
}

impl FaceClassifier for ReplayFaceClassifier {
    fn classify(
        &mut self,
        crop: &Frame,
        detection: &Region,
    ) -> Result<RawSample, Box<dyn std::error::Error>> {
        let recorded = self
            .recorded
            .get(&crop.index())
            .and_then(|faces| faces.iter().find(|(r, _)| r == detection))
            .map(|(_, c)| c)
            .ok_or_else(|| {
                format!(
                    "no classification recorded for frame {} at ({}, {})",
                    crop.index(),
                    detection.x,
                    detection.y
                )
            })?;

        Ok(RawSample::from_labels(
            &recorded.age,
            &recorded.gender,
            recorded.age_confidence,
            recorded.gender_confidence,
        )?)
    }
}
