use serde::{Deserialize, Serialize};

use crate::shared::constants::{
    AGE_SMOOTHING_MIN_SAMPLES, AGE_WINDOW, DEFAULT_GENDER_CONSENSUS, GENDER_SMOOTHING_MIN_SAMPLES,
};
use crate::shared::labels::{AgeBucket, Gender};

use super::identity_state::IdentityState;

/// What the gender policy returns when neither gender reaches consensus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoConsensusPolicy {
    /// Return the sample just admitted.
    #[default]
    Passthrough,
    /// Keep the previously committed gender, falling back to the new sample
    /// if nothing has been committed yet.
    HoldPrevious,
}

/// Domain interface for turning admitted samples into a stable label pair.
pub trait LabelSmoother: Send {
    /// Appends the sample to `state`'s histories and returns the label pair
    /// to commit. Does not commit.
    fn update(&self, state: &mut IdentityState, age: AgeBucket, gender: Gender)
        -> (AgeBucket, Gender);
}

/// Mode-of-recent-window for age, consensus with hysteresis for gender.
///
/// Age: with at least 3 samples, the most frequent bucket among the newest 5
/// wins; ties go to the bucket seen most recently.
/// Gender: with at least 5 samples, a gender whose share of the whole history
/// exceeds the consensus threshold wins; otherwise [`NoConsensusPolicy`] applies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TemporalSmoother {
    gender_consensus: f64,
    no_consensus: NoConsensusPolicy,
}

impl TemporalSmoother {
    pub fn new(gender_consensus: f64, no_consensus: NoConsensusPolicy) -> Self {
        Self {
            gender_consensus,
            no_consensus,
        }
    }

    fn smooth_age(&self, state: &IdentityState, newest: AgeBucket) -> AgeBucket {
        let history = state.age_history();
        if history.len() < AGE_SMOOTHING_MIN_SAMPLES {
            return newest;
        }
        let window: Vec<AgeBucket> = history.recent(AGE_WINDOW).copied().collect();
        mode_preferring_recent(&window).unwrap_or(newest)
    }

    fn smooth_gender(
        &self,
        state: &IdentityState,
        previous: Option<Gender>,
        newest: Gender,
    ) -> Gender {
        let history = state.gender_history();
        if history.len() < GENDER_SMOOTHING_MIN_SAMPLES {
            return newest;
        }
        let total = history.len() as f64;
        let male_ratio = history.count(&Gender::Male) as f64 / total;
        let female_ratio = history.count(&Gender::Female) as f64 / total;

        if male_ratio > self.gender_consensus {
            Gender::Male
        } else if female_ratio > self.gender_consensus {
            Gender::Female
        } else {
            match self.no_consensus {
                NoConsensusPolicy::Passthrough => history.last().copied().unwrap_or(newest),
                NoConsensusPolicy::HoldPrevious => previous.unwrap_or(newest),
            }
        }
    }
}

impl Default for TemporalSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_GENDER_CONSENSUS, NoConsensusPolicy::default())
    }
}

impl LabelSmoother for TemporalSmoother {
    fn update(
        &self,
        state: &mut IdentityState,
        age: AgeBucket,
        gender: Gender,
    ) -> (AgeBucket, Gender) {
        let previous_gender = state.stable().map(|s| s.gender);
        state.record(age, gender);
        (
            self.smooth_age(state, age),
            self.smooth_gender(state, previous_gender, gender),
        )
    }
}

/// Most frequent item; among equally frequent items, the one whose last
/// occurrence is latest.
fn mode_preferring_recent<T: Copy + PartialEq>(window: &[T]) -> Option<T> {
    let mut best: Option<(T, usize)> = None;
    for &candidate in window.iter().rev() {
        let count = window.iter().filter(|&&v| v == candidate).count();
        match best {
            Some((_, best_count)) if best_count >= count => {}
            _ => best = Some((candidate, count)),
        }
    }
    best.map(|(item, _)| item)
}
