use crate::shared::constants::DEFAULT_CELL_SIZE;

use super::identity_key::IdentityKey;

/// Maps a detection's top-left corner to an identity key.
///
/// The labeling pipeline only depends on this trait, so a real tracker
/// (IoU matching, Kalman) can replace the grid without touching smoothing.
pub trait IdentityAssigner: Send {
    fn assign(&self, x: i32, y: i32) -> IdentityKey;
}

/// Quantizes positions onto a fixed square grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridIdentityAssigner {
    cell_size: i32,
}

impl GridIdentityAssigner {
    pub fn new(cell_size: i32) -> Result<Self, &'static str> {
        if cell_size < 1 {
            return Err("cell_size must be >= 1");
        }
        Ok(Self { cell_size })
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }
}

impl Default for GridIdentityAssigner {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

impl IdentityAssigner for GridIdentityAssigner {
    fn assign(&self, x: i32, y: i32) -> IdentityKey {
        assign(x, y, self.cell_size)
    }
}

/// Floor-divides a position by `cell_size` on each axis.
///
/// Negative coordinates floor toward negative infinity so cells stay
/// `cell_size` wide across the origin. `cell_size` must be positive.
pub fn assign(x: i32, y: i32, cell_size: i32) -> IdentityKey {
    IdentityKey::new(x.div_euclid(cell_size), y.div_euclid(cell_size))
}
