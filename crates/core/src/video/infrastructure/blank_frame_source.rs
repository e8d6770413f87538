use crate::shared::frame::Frame;
use crate::video::domain::frame_source::FrameSource;

/// Produces a fixed number of black frames of one size.
///
/// Drives replays where detections and classifications are recorded and
/// pixel data is irrelevant.
pub struct BlankFrameSource {
    width: u32,
    height: u32,
    count: usize,
}

impl BlankFrameSource {
    pub fn new(width: u32, height: u32, count: usize) -> Self {
        Self {
            width,
            height,
            count,
        }
    }
}

impl FrameSource for BlankFrameSource {
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
        let (w, h) = (self.width, self.height);
        Box::new((0..self.count).map(move |i| Ok(Frame::blank(w, h, i))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yields_indexed_frames() {
        let mut source = BlankFrameSource::new(8, 4, 3);
        let frames: Vec<Frame> = source.frames().collect::<Result<_, _>>().unwrap();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[2].index(), 2);
        assert_eq!((frames[0].width(), frames[0].height()), (8, 4));
    }

    #[test]
    fn test_zero_count_is_empty() {
        let mut source = BlankFrameSource::new(8, 4, 0);
        assert_eq!(source.frames().count(), 0);
    }
}
