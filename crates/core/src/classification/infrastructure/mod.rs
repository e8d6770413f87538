pub mod onnx_age_gender_classifier;
pub mod replay_face_classifier;
