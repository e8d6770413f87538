use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse, position-derived token grouping consecutive detections of what is
/// assumed to be the same face.
///
/// Keys carry no biometric meaning: two faces in one grid cell share a key,
/// and one face crossing a cell boundary gets a new one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IdentityKey {
    pub col: i32,
    pub row: i32,
}

impl IdentityKey {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.col, self.row)
    }
}
