//! Recorded session traces: per-frame detections, classifier outputs and
//! operator commands, replayable through the labeling loop without a camera
//! or models.
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classification::infrastructure::replay_face_classifier::{
    RecordedClassification, ReplayFaceClassifier,
};
use crate::detection::infrastructure::replay_face_detector::ReplayFaceDetector;
use crate::pipeline::operator_control::{OperatorCommand, ScriptedOperatorControl};
use crate::shared::region::Region;
use crate::video::infrastructure::blank_frame_source::BlankFrameSource;

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to read trace {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid trace JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("trace frame size must be non-zero, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub frames: Vec<TraceFrame>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TraceFrame {
    #[serde(default)]
    pub faces: Vec<TraceFace>,
    /// Operator input received after this frame was shown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<OperatorCommand>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraceFace {
    #[serde(rename = "box")]
    pub detection: Region,
    /// Absent when the classifier was not run or failed on this face.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<RecordedClassification>,
}

/// Collaborators reconstructed from a trace.
pub struct TraceReplay {
    pub source: BlankFrameSource,
    pub detector: ReplayFaceDetector,
    pub classifier: ReplayFaceClassifier,
    pub control: ScriptedOperatorControl,
}

impl Trace {
    pub fn load(path: &Path) -> Result<Self, TraceError> {
        let json = fs::read_to_string(path).map_err(|source| TraceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, TraceError> {
        let trace: Trace = serde_json::from_str(json)?;
        if trace.width == 0 || trace.height == 0 {
            return Err(TraceError::InvalidDimensions {
                width: trace.width,
                height: trace.height,
            });
        }
        Ok(trace)
    }

    pub fn into_replay(self) -> TraceReplay {
        let frame_count = self.frames.len();
        let mut detections = HashMap::new();
        let mut classifications = HashMap::new();
        let mut commands = HashMap::new();

        for (index, frame) in self.frames.into_iter().enumerate() {
            if let Some(command) = frame.command {
                commands.insert(index, command);
            }
            let mut regions = Vec::with_capacity(frame.faces.len());
            let mut recorded = Vec::new();
            for face in frame.faces {
                if let Some(classification) = face.classification {
                    recorded.push((face.detection.clone(), classification));
                }
                regions.push(face.detection);
            }
            detections.insert(index, regions);
            classifications.insert(index, recorded);
        }

        TraceReplay {
            source: BlankFrameSource::new(self.width, self.height, frame_count),
            detector: ReplayFaceDetector::new(detections),
            classifier: ReplayFaceClassifier::new(classifications),
            control: ScriptedOperatorControl::new(commands),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use crate::pipeline::face_renderer::{FaceRenderer, RenderedFace};
    use crate::pipeline::label_faces_use_case::LabelFacesUseCase;
    use crate::pipeline::labeling_config::LabelingConfig;
    use crate::pipeline::pipeline_logger::NullPipelineLogger;
    use crate::shared::frame::Frame;
    use crate::shared::labels::{AgeBucket, Gender};

    const TRACE: &str = r#"{
        "width": 640,
        "height": 480,
        "frames": [
            {"faces": [{"box": {"x": 100, "y": 100, "width": 120, "height": 120, "confidence": 0.95},
                        "classification": {"age": "(25-32)", "gender": "Male",
                                           "age_confidence": 0.2, "gender_confidence": 0.9}}]},
            {"faces": [{"box": {"x": 102, "y": 101, "width": 120, "height": 120, "confidence": 0.95},
                        "classification": {"age": "(bogus)", "gender": "Male",
                                           "age_confidence": 0.9, "gender_confidence": 0.9}}],
             "command": "reset"},
            {"faces": [{"box": {"x": 101, "y": 100, "width": 120, "height": 120, "confidence": 0.95},
                        "classification": {"age": "(8-12)", "gender": "Female",
                                           "age_confidence": 0.1, "gender_confidence": 0.1}}]},
            {}
        ]
    }"#;

    #[derive(Default)]
    struct CollectingRenderer {
        frames: Vec<Vec<RenderedFace>>,
    }

    impl FaceRenderer for CollectingRenderer {
        fn render(
            &mut self,
            _frame: &Frame,
            faces: &[RenderedFace],
        ) -> Result<(), Box<dyn std::error::Error>> {
            self.frames.push(faces.to_vec());
            Ok(())
        }
    }

    #[test]
    fn test_parse_trace() {
        let trace = Trace::from_json(TRACE).unwrap();
        assert_eq!(trace.frames.len(), 4);
        assert_eq!(trace.frames[1].command, Some(OperatorCommand::Reset));
        assert!(trace.frames[3].faces.is_empty());
        assert_eq!(trace.frames[0].faces[0].detection.width, 120);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let err = Trace::from_json(r#"{"width": 0, "height": 480}"#).unwrap_err();
        assert!(matches!(err, TraceError::InvalidDimensions { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{TRACE}").unwrap();
        assert_eq!(Trace::load(file.path()).unwrap().width, 640);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Trace::load(Path::new("/nonexistent/trace.json")).unwrap_err();
        assert!(matches!(err, TraceError::Io { .. }));
    }

    #[test]
    fn test_replay_through_pipeline() {
        let TraceReplay {
            mut source,
            detector,
            classifier,
            mut control,
        } = Trace::from_json(TRACE).unwrap().into_replay();
        let config = LabelingConfig {
            prediction_interval: 1,
            ..LabelingConfig::default()
        };
        let mut use_case = LabelFacesUseCase::new(
            Box::new(detector),
            Box::new(classifier),
            &config,
            Box::new(NullPipelineLogger),
        )
        .unwrap();
        let mut renderer = CollectingRenderer::default();

        let stats = use_case
            .run(&mut source, &mut renderer, &mut control)
            .unwrap();

        // Frame 0 bootstraps despite low age confidence.
        let first = renderer.frames[0][0].label.clone().unwrap();
        assert_eq!((first.age, first.gender), (AgeBucket::YoungAdult, Gender::Male));
        // Frame 1 has an unknown label: sample skipped, label unchanged.
        assert_eq!(renderer.frames[1][0].label, Some(first));
        // Reset after frame 1, so frame 2 bootstraps again.
        let third = renderer.frames[2][0].label.clone().unwrap();
        assert_eq!((third.age, third.gender), (AgeBucket::Child, Gender::Female));
        assert!(renderer.frames[3].is_empty());

        assert_eq!(stats.frames, 4);
        assert_eq!(stats.classifier_errors, 1);
        assert_eq!(stats.resets, 1);
        assert_eq!(stats.admitted, 2);
    }
}
