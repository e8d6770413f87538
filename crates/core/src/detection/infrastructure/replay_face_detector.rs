use std::collections::HashMap;

use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Replays recorded detections by frame index.
///
/// Frames with no entry yield no faces.
pub struct ReplayFaceDetector {
    detections: HashMap<usize, Vec<Region>>,
}

impl ReplayFaceDetector {
    pub fn new(detections: HashMap<usize, Vec<Region>>) -> Self {
        Self { detections }
    }
}

impl FaceDetector for ReplayFaceDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
        Ok(self
            .detections
            .get(&frame.index())
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(index: usize) -> Frame {
        Frame::blank(100, 100, index)
    }

    #[test]
    fn test_returns_recorded_regions_for_frame() {
        let regions = vec![Region::new(10, 20, 50, 50, 0.9), Region::new(60, 20, 30, 30, 0.8)];
        let mut detector = ReplayFaceDetector::new(HashMap::from([(3, regions.clone())]));

        assert_eq!(detector.detect(&frame(3)).unwrap(), regions);
    }

    #[test]
    fn test_unrecorded_frame_is_empty() {
        let mut detector = ReplayFaceDetector::new(HashMap::new());
        assert!(detector.detect(&frame(0)).unwrap().is_empty());
    }

    #[test]
    fn test_replay_is_repeatable() {
        let regions = vec![Region::new(1, 2, 30, 30, 0.9)];
        let mut detector = ReplayFaceDetector::new(HashMap::from([(0, regions.clone())]));

        detector.detect(&frame(0)).unwrap();
        assert_eq!(detector.detect(&frame(0)).unwrap(), regions);
    }
}
