pub mod blank_frame_source;
pub mod image_sequence_frame_source;
