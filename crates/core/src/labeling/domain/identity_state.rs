use serde::Serialize;

use crate::shared::labels::{AgeBucket, Gender};

use super::bounded_history::BoundedHistory;

/// The label pair last committed for an identity, plus the mean classifier
/// confidence of the sample that produced it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StableLabel {
    pub age: AgeBucket,
    pub gender: Gender,
    pub confidence: f64,
}

impl StableLabel {
    /// Overlay text, e.g. `Male | (25-32) [74%]`.
    ///
    /// The confidence suffix is omitted when it is zero.
    pub fn caption(&self) -> String {
        let mut text = format!("{} | {}", self.gender, self.age);
        if self.confidence > 0.0 {
            text.push_str(&format!(" [{:.0}%]", self.confidence * 100.0));
        }
        text
    }
}

/// Buffered history and committed label for one identity.
///
/// Both histories are only ever appended together, so their lengths match.
#[derive(Clone, Debug)]
pub struct IdentityState {
    age_history: BoundedHistory<AgeBucket>,
    gender_history: BoundedHistory<Gender>,
    stable: Option<StableLabel>,
}

impl IdentityState {
    pub fn new(buffer_size: usize) -> Self {
        Self {
            age_history: BoundedHistory::new(buffer_size),
            gender_history: BoundedHistory::new(buffer_size),
            stable: None,
        }
    }

    pub fn age_history(&self) -> &BoundedHistory<AgeBucket> {
        &self.age_history
    }

    pub fn gender_history(&self) -> &BoundedHistory<Gender> {
        &self.gender_history
    }

    pub fn stable(&self) -> Option<&StableLabel> {
        self.stable.as_ref()
    }

    pub fn has_stable_label(&self) -> bool {
        self.stable.is_some()
    }

    /// Appends one admitted sample to both histories.
    pub(crate) fn record(&mut self, age: AgeBucket, gender: Gender) {
        self.age_history.push(age);
        self.gender_history.push(gender);
    }

    pub(crate) fn commit(&mut self, label: StableLabel) {
        self.stable = Some(label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_empty_and_unset() {
        let state = IdentityState::new(8);
        assert!(state.age_history().is_empty());
        assert!(state.gender_history().is_empty());
        assert!(!state.has_stable_label());
        assert!(state.stable().is_none());
    }

    #[test]
    fn test_record_keeps_histories_in_lockstep() {
        let mut state = IdentityState::new(3);
        for _ in 0..5 {
            state.record(AgeBucket::Teen, Gender::Female);
            assert_eq!(state.age_history().len(), state.gender_history().len());
        }
        assert_eq!(state.age_history().len(), 3);
    }

    #[test]
    fn test_caption_formats_label() {
        let label = StableLabel {
            age: AgeBucket::YoungAdult,
            gender: Gender::Male,
            confidence: 0.736,
        };
        assert_eq!(label.caption(), "Male | (25-32) [74%]");
    }

    #[test]
    fn test_caption_omits_zero_confidence() {
        let label = StableLabel {
            age: AgeBucket::Child,
            gender: Gender::Female,
            confidence: 0.0,
        };
        assert_eq!(label.caption(), "Female | (8-12)");
    }
}
