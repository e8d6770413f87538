use std::fs;
use std::path::{Path, PathBuf};

use crate::shared::frame::Frame;
use crate::video::domain::frame_source::FrameSource;

const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// Decodes a sequence of still images into RGB frames, one per file.
///
/// Frame `i` is the `i`-th path, so recorded detections keyed by frame index
/// line up with the images. Files are decoded lazily as the loop pulls them;
/// a file that fails to decode ends the run.
pub struct ImageSequenceFrameSource {
    paths: Vec<PathBuf>,
}

impl ImageSequenceFrameSource {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    /// All image files directly inside `dir`, sorted by file name.
    pub fn from_dir(dir: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && is_image(&path) {
                paths.push(path);
            }
        }
        if paths.is_empty() {
            return Err(format!("no frame images found in {}", dir.display()).into());
        }
        paths.sort();
        log::info!("Found {} frame images in {}", paths.len(), dir.display());
        Ok(Self::new(paths))
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

fn load_frame(path: &Path, index: usize) -> Result<Frame, Box<dyn std::error::Error>> {
    let rgb = image::open(path)
        .map_err(|e| format!("failed to decode {}: {e}", path.display()))?
        .to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(Frame::new(rgb.into_raw(), width, height, 3, index))
}

impl FrameSource for ImageSequenceFrameSource {
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
        Box::new(
            self.paths
                .iter()
                .enumerate()
                .map(|(index, path)| load_frame(path, index)),
        )
    }
}
