use crate::shared::frame::Frame;

/// Supplies frames to the labeling loop in capture order.
///
/// A read error ends the run; an exhausted iterator ends it normally.
pub trait FrameSource: Send {
    fn frames(&mut self)
        -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_>;

    /// Releases any resources held by the source.
    fn close(&mut self) {}
}
