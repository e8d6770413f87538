use crate::labeling::domain::raw_sample::RawSample;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Domain interface for age/gender classification of one face.
///
/// `crop` is the padded face image; `detection` is the unpadded detector box
/// it was cut around, for implementations that key on detector output.
/// Called at most once per face per prediction frame.
pub trait FaceClassifier: Send {
    fn classify(
        &mut self,
        crop: &Frame,
        detection: &Region,
    ) -> Result<RawSample, Box<dyn std::error::Error>>;
}
