pub mod bounded_history;
pub mod confidence_gate;
pub mod identity_state;
pub mod identity_store;
pub mod raw_sample;
pub mod temporal_smoother;
