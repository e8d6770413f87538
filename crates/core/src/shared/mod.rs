pub mod constants;
pub mod frame;
pub mod labels;
pub mod region;
