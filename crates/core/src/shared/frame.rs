use ndarray::ArrayView3;

use crate::shared::region::Region;

/// A single captured frame: contiguous pixel bytes in row-major order.
///
/// Channel order is whatever the capture source produced; the labeling core
/// never inspects pixels, only the classifier adapter does.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    /// All-black 3-channel frame, used when replaying traces without pixels.
    pub fn blank(width: u32, height: u32, index: usize) -> Self {
        Self::new(
            vec![0u8; width as usize * height as usize * 3],
            width,
            height,
            3,
            index,
        )
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    /// Copies out the pixels under `region`, clamped to the frame bounds.
    ///
    /// The crop keeps this frame's index so downstream collaborators can
    /// correlate it with the frame it came from.
    pub fn crop(&self, region: &Region) -> Frame {
        let clamped = region.clamp_to(self.width, self.height);
        let (x1, y1) = (clamped.x as usize, clamped.y as usize);
        let (crop_w, crop_h) = (clamped.width as usize, clamped.height as usize);
        let channels = self.channels as usize;

        let src = self.as_ndarray();
        let mut data = Vec::with_capacity(crop_w * crop_h * channels);
        for row in y1..y1 + crop_h {
            for col in x1..x1 + crop_w {
                for c in 0..channels {
                    data.push(src[[row, col, c]]);
                }
            }
        }

        Frame::new(
            data,
            crop_w as u32,
            crop_h as u32,
            self.channels,
            self.index,
        )
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2x3
        let frame = Frame::new(data.clone(), 2, 2, 3, 5);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.index(), 5);
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    fn test_blank_frame_is_zeroed() {
        let frame = Frame::blank(4, 3, 7);
        assert_eq!(frame.data().len(), 36);
        assert!(frame.data().iter().all(|&b| b == 0));
        assert_eq!(frame.index(), 7);
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * channels")]
    fn test_mismatched_data_length_panics_in_debug() {
        Frame::new(vec![0u8; 10], 2, 2, 3, 0);
    }

    #[test]
    fn test_crop_extracts_pixels() {
        // 3x3 single channel, values 0..9
        let frame = Frame::new((0u8..9).collect(), 3, 3, 1, 2);
        let crop = frame.crop(&Region::new(1, 1, 2, 2, 1.0));
        assert_eq!(crop.width(), 2);
        assert_eq!(crop.height(), 2);
        assert_eq!(crop.data(), &[4, 5, 7, 8]);
        assert_eq!(crop.index(), 2);
    }

    #[test]
    fn test_crop_clamps_to_frame() {
        let frame = Frame::new((0u8..9).collect(), 3, 3, 1, 0);
        let crop = frame.crop(&Region::new(-5, 2, 10, 10, 1.0));
        assert_eq!(crop.width(), 3);
        assert_eq!(crop.height(), 1);
        assert_eq!(crop.data(), &[6, 7, 8]);
    }
}
