use crate::shared::constants::{
    DEFAULT_MIN_FACE_CONFIDENCE, DEFAULT_PAD_HEIGHT_RATIO, DEFAULT_PAD_WIDTH_RATIO,
    MIN_FACE_CROP_SIZE,
};
use crate::shared::region::Region;

/// Turns raw detections into the padded crop boxes that get classified.
///
/// Padding widens the box to capture the whole head (more vertically, to
/// include the forehead). The padded box is clamped to the frame and its
/// top-left corner becomes the position used for identity assignment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceCropper {
    pad_width_ratio: f64,
    pad_height_ratio: f64,
    min_face_confidence: f64,
    min_crop_size: i32,
}

impl FaceCropper {
    pub fn new(pad_width_ratio: f64, pad_height_ratio: f64, min_face_confidence: f64) -> Self {
        Self {
            pad_width_ratio,
            pad_height_ratio,
            min_face_confidence,
            min_crop_size: MIN_FACE_CROP_SIZE,
        }
    }

    /// Padded, clamped crop box for `detection`, or `None` if the detection
    /// is below the confidence floor or the crop is `min_crop_size` pixels or
    /// smaller on either axis.
    pub fn prepare(&self, detection: &Region, frame_w: u32, frame_h: u32) -> Option<Region> {
        if detection.confidence < self.min_face_confidence {
            return None;
        }

        let pad_w = (detection.width as f64 * self.pad_width_ratio) as i32;
        let pad_h = (detection.height as f64 * self.pad_height_ratio) as i32;
        let padded = Region::new(
            detection.x.saturating_sub(pad_w),
            detection.y.saturating_sub(pad_h),
            detection.width.saturating_add(pad_w.saturating_mul(2)),
            detection.height.saturating_add(pad_h.saturating_mul(2)),
            detection.confidence,
        )
        .clamp_to(frame_w, frame_h);

        if padded.width <= self.min_crop_size || padded.height <= self.min_crop_size {
            log::debug!(
                "Skipping {}x{} crop at ({}, {})",
                padded.width,
                padded.height,
                padded.x,
                padded.y
            );
            return None;
        }
        Some(padded)
    }
}

impl Default for FaceCropper {
    fn default() -> Self {
        Self::new(
            DEFAULT_PAD_WIDTH_RATIO,
            DEFAULT_PAD_HEIGHT_RATIO,
            DEFAULT_MIN_FACE_CONFIDENCE,
        )
    }
}
