pub mod identity_assigner;
pub mod identity_key;
