use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::demographics::Profile;
use crate::inventory::ResponseSet;

/// Locally persisted participant identity and in-progress questionnaire
/// state. Survives interruption: answers and the current page are restored
/// on the next run and cleared on submission, while the participant id is
/// kept so the stored result stays retrievable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub version: u32,
    /// Opaque participant identifier (UUID v4), generated locally once.
    pub participant_id: String,
    /// Demographics already collected and stored, if any.
    #[serde(default)]
    pub profile: Option<Profile>,
    /// Answers recorded so far, keyed by item id.
    #[serde(default)]
    pub answers: ResponseSet,
    /// Zero-based page the participant last worked on.
    #[serde(default)]
    pub page: usize,
    /// When the questionnaire was first started, for the result's duration.
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// Create a fresh state with a newly generated participant identity.
    pub fn new() -> Self {
        SessionState {
            version: 1,
            participant_id: uuid::Uuid::new_v4().to_string(),
            profile: None,
            answers: ResponseSet::new(),
            page: 0,
            started_at: None,
        }
    }

    /// Record an answer, stamping the start time on the first one.
    pub fn record_answer(&mut self, item_id: u64, value: u8) {
        if self.started_at.is_none() {
            self.started_at = Some(Utc::now());
        }
        self.answers.insert(item_id, value);
    }

    /// Seconds since the questionnaire was started, if it was.
    pub fn elapsed_secs(&self) -> Option<i64> {
        self.started_at.map(|t| (Utc::now() - t).num_seconds())
    }

    /// Drop the in-progress answers after submission. The participant id
    /// and profile are kept so `enneamind result` keeps working.
    pub fn clear_progress(&mut self) {
        self.answers.clear();
        self.page = 0;
        self.started_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_has_identity() {
        let state = SessionState::new();
        assert_eq!(state.version, 1);
        assert!(!state.participant_id.is_empty());
        assert!(state.answers.is_empty());
        assert!(state.started_at.is_none());
    }

    #[test]
    fn test_identities_are_unique() {
        assert_ne!(
            SessionState::new().participant_id,
            SessionState::new().participant_id
        );
    }

    #[test]
    fn test_first_answer_stamps_start_time() {
        let mut state = SessionState::new();
        state.record_answer(1, 3);
        let started = state.started_at;
        assert!(started.is_some());

        state.record_answer(2, 4);
        assert_eq!(state.started_at, started);
    }

    #[test]
    fn test_record_answer_overwrites() {
        let mut state = SessionState::new();
        state.record_answer(1, 3);
        state.record_answer(1, 4);
        assert_eq!(state.answers.get(&1), Some(&4));
        assert_eq!(state.answers.len(), 1);
    }

    #[test]
    fn test_clear_progress_keeps_identity() {
        let mut state = SessionState::new();
        let id = state.participant_id.clone();
        state.record_answer(1, 2);
        state.page = 3;

        state.clear_progress();
        assert!(state.answers.is_empty());
        assert_eq!(state.page, 0);
        assert!(state.started_at.is_none());
        assert_eq!(state.participant_id, id);
    }
}
