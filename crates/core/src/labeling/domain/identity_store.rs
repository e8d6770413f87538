use std::collections::HashMap;

use crate::identity::domain::identity_key::IdentityKey;
use crate::shared::constants::DEFAULT_BUFFER_SIZE;
use crate::shared::labels::{AgeBucket, Gender};

use super::identity_state::{IdentityState, StableLabel};

/// Per-identity history and committed labels for one run of the frame loop.
///
/// Identities are never expired individually; they accumulate until
/// [`IdentityStore::reset_all`]. Mutation goes through `&mut self`, so
/// resets cannot interleave with a frame's lookups.
pub struct IdentityStore {
    states: HashMap<IdentityKey, IdentityState>,
    buffer_size: usize,
}

impl IdentityStore {
    pub fn new(buffer_size: usize) -> Self {
        Self {
            states: HashMap::new(),
            buffer_size,
        }
    }

    pub fn get_or_create(&mut self, key: IdentityKey) -> &mut IdentityState {
        let buffer_size = self.buffer_size;
        self.states.entry(key).or_insert_with(|| {
            log::debug!("New identity {key}");
            IdentityState::new(buffer_size)
        })
    }

    pub fn get(&self, key: &IdentityKey) -> Option<&IdentityState> {
        self.states.get(key)
    }

    pub fn contains(&self, key: &IdentityKey) -> bool {
        self.states.contains_key(key)
    }

    /// Overwrites the committed label for `key`.
    ///
    /// `key` must already exist via [`IdentityStore::get_or_create`]; release
    /// builds create it rather than drop the label.
    pub fn commit(&mut self, key: IdentityKey, age: AgeBucket, gender: Gender, confidence: f64) {
        debug_assert!(self.contains(&key), "commit for unknown identity {key}");
        self.get_or_create(key).commit(StableLabel {
            age,
            gender,
            confidence,
        });
    }

    /// Drops every identity; the next detection at any key starts fresh.
    pub fn reset_all(&mut self) {
        let dropped = self.states.len();
        self.states.clear();
        log::info!("Tracking reset ({dropped} identities cleared)");
    }

    /// The committed label for `key`, or `None` if nothing has been admitted
    /// yet (or the key was never seen).
    pub fn render(&self, key: &IdentityKey) -> Option<StableLabel> {
        self.states.get(key).and_then(|s| s.stable().cloned())
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }
}

impl Default for IdentityStore {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_SIZE)
    }
}
