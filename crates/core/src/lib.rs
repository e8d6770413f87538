pub mod classification;
pub mod detection;
pub mod identity;
pub mod labeling;
pub mod pipeline;
pub mod shared;
pub mod video;
