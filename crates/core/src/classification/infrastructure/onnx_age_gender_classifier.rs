//! Age and gender networks (Levi & Hassner style, exported to ONNX) run
//! through ONNX Runtime.
//!
//! Both networks take the same 227x227 BGR mean-subtracted input and emit a
//! softmax over their label list; the winning class and its probability form
//! the sample.
use std::path::Path;

use crate::classification::domain::face_classifier::FaceClassifier;
use crate::labeling::domain::raw_sample::RawSample;
use crate::shared::constants::{CLASSIFIER_INPUT_SIZE, CLASSIFIER_MEAN_BGR};
use crate::shared::frame::Frame;
use crate::shared::labels::{AgeBucket, Gender};
use crate::shared::region::Region;

pub struct OnnxAgeGenderClassifier {
    age_session: ort::session::Session,
    gender_session: ort::session::Session,
}

impl OnnxAgeGenderClassifier {
    pub fn new(age_model: &Path, gender_model: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            age_session: load_session(age_model)?,
            gender_session: load_session(gender_model)?,
        })
    }
}

fn load_session(model_path: &Path) -> Result<ort::session::Session, Box<dyn std::error::Error>> {
    log::info!("Loading classifier model {}", model_path.display());
    let session = ort::session::Session::builder()?
        .with_optimization_level(ort::session::builder::GraphOptimizationLevel::Level3)?
        .with_intra_threads(1)?
        .with_execution_providers(execution_providers())?
        .commit_from_file(model_path)?;
    Ok(session)
}

/// Hardware providers enabled for this target in Cargo.toml. ONNX Runtime
/// falls back to CPU when a provider fails to register.
fn execution_providers() -> Vec<ort::execution_providers::ExecutionProviderDispatch> {
    #[cfg(target_os = "macos")]
    {
        vec![ort::execution_providers::CoreMLExecutionProvider::default().build()]
    }
    #[cfg(target_os = "windows")]
    {
        vec![ort::execution_providers::DirectMLExecutionProvider::default().build()]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        Vec::new()
    }
}

fn run_softmax(
    session: &mut ort::session::Session,
    input: ndarray::Array4<f32>,
) -> Result<(usize, f64), Box<dyn std::error::Error>> {
    let input_value = ort::value::Tensor::from_array(input)?;
    let outputs = session.run(ort::inputs![input_value])?;
    if outputs.len() == 0 {
        return Err("classifier model produced no outputs".into());
    }
    let probs = outputs[0].try_extract_array::<f32>()?;
    let slice = probs.as_slice().ok_or("Cannot get probability slice")?;
    argmax(slice).ok_or_else(|| "classifier produced an empty distribution".into())
}

impl FaceClassifier for OnnxAgeGenderClassifier {
    fn classify(
        &mut self,
        crop: &Frame,
        _detection: &Region,
    ) -> Result<RawSample, Box<dyn std::error::Error>> {
        if crop.width() == 0 || crop.height() == 0 {
            return Err("cannot classify an empty crop".into());
        }
        let input = preprocess(crop);

        let (gender_idx, gender_conf) = run_softmax(&mut self.gender_session, input.clone())?;
        let (age_idx, age_conf) = run_softmax(&mut self.age_session, input)?;

        Ok(RawSample::new(
            AgeBucket::from_index(age_idx)?,
            Gender::from_index(gender_idx)?,
            age_conf,
            gender_conf,
        ))
    }
}

/// Nearest-neighbour resize to the network input, RGB to BGR, mean
/// subtraction, NCHW layout. Grayscale crops are replicated across channels.
fn preprocess(crop: &Frame) -> ndarray::Array4<f32> {
    let size = CLASSIFIER_INPUT_SIZE;
    let src_w = crop.width() as usize;
    let src_h = crop.height() as usize;
    let channels = crop.channels() as usize;
    let src = crop.as_ndarray();

    let mut tensor = ndarray::Array4::<f32>::zeros((1, 3, size, size));
    for y in 0..size {
        let src_y = (((y as f64 + 0.5) * src_h as f64 / size as f64) as usize).min(src_h - 1);
        for x in 0..size {
            let src_x = (((x as f64 + 0.5) * src_w as f64 / size as f64) as usize).min(src_w - 1);
            for (c, mean) in CLASSIFIER_MEAN_BGR.iter().enumerate() {
                let src_c = if channels >= 3 { 2 - c } else { 0 };
                tensor[[0, c, y, x]] = src[[src_y, src_x, src_c]] as f32 - mean;
            }
        }
    }
    tensor
}

/// Index and value of the largest finite entry.
fn argmax(values: &[f32]) -> Option<(usize, f64)> {
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .fold(None, |best: Option<(usize, f32)>, (i, &v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, v)| (i, v as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_execution_providers_match_target() {
        let providers = execution_providers();
        if cfg!(any(target_os = "macos", target_os = "windows")) {
            assert_eq!(providers.len(), 1);
        } else {
            assert!(providers.is_empty());
        }
    }

    #[test]
    fn test_argmax_picks_largest() {
        let (idx, conf) = argmax(&[0.1, 0.7, 0.2]).unwrap();
        assert_eq!(idx, 1);
        assert_relative_eq!(conf, 0.7, epsilon = 1e-6);
    }

    #[test]
    fn test_argmax_first_wins_ties() {
        assert_eq!(argmax(&[0.5, 0.5]).unwrap().0, 0);
    }

    #[test]
    fn test_argmax_skips_nan_and_empty() {
        assert_eq!(argmax(&[f32::NAN, 0.3]).unwrap().0, 1);
        assert!(argmax(&[]).is_none());
    }

    #[test]
    fn test_preprocess_shape() {
        let crop = Frame::new(vec![128u8; 40 * 30 * 3], 40, 30, 3, 0);
        let tensor = preprocess(&crop);
        assert_eq!(tensor.shape(), &[1, 3, 227, 227]);
    }

    #[test]
    fn test_preprocess_swaps_to_bgr_and_subtracts_mean() {
        // Pure red RGB pixel: R=255 lands in the last (R) plane of BGR.
        let crop = Frame::new(vec![255, 0, 0], 1, 1, 3, 0);
        let tensor = preprocess(&crop);
        assert_relative_eq!(tensor[[0, 0, 5, 5]], 0.0 - CLASSIFIER_MEAN_BGR[0]);
        assert_relative_eq!(tensor[[0, 2, 5, 5]], 255.0 - CLASSIFIER_MEAN_BGR[2]);
    }

    #[test]
    fn test_preprocess_grayscale_replicates() {
        let crop = Frame::new(vec![100u8; 4], 2, 2, 1, 0);
        let tensor = preprocess(&crop);
        for c in 0..3 {
            assert_relative_eq!(tensor[[0, c, 0, 0]], 100.0 - CLASSIFIER_MEAN_BGR[c]);
        }
    }
}
