pub mod face_renderer;
pub mod infrastructure;
pub mod label_faces_use_case;
pub mod labeling_config;
pub mod operator_control;
pub mod pipeline_logger;
pub mod prediction_schedule;
