use serde::Serialize;

use crate::identity::domain::identity_key::IdentityKey;
use crate::labeling::domain::identity_state::StableLabel;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// One face as handed to the renderer: its padded box, identity, and the
/// identity's committed label.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderedFace {
    pub region: Region,
    pub key: IdentityKey,
    /// `None` until the identity has an admitted sample; draw no label then.
    pub label: Option<StableLabel>,
}

/// Presents each processed frame. Called once per frame, including frames
/// with no faces.
pub trait FaceRenderer {
    fn render(
        &mut self,
        frame: &Frame,
        faces: &[RenderedFace],
    ) -> Result<(), Box<dyn std::error::Error>>;
}
