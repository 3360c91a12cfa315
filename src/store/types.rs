use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::demographics::Profile;
use crate::inventory::Item;
use crate::scoring::{Category, Outcome, ScoreMap, ScoringError};

/// One row of the read-only `items` table.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemRow {
    pub id: u64,
    pub text: String,
    pub category: u8,
    pub position: u32,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item {
            id: row.id,
            text: row.text,
            category: row.category,
            position: row.position,
        }
    }
}

/// One row of the `participants` table, keyed by the locally generated
/// opaque identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantRow {
    pub id: String,
    pub age: u32,
    pub gender: String,
    pub region: String,
    pub province: String,
    pub locality: String,
    pub education: String,
}

impl ParticipantRow {
    pub fn new(id: String, profile: &Profile) -> Self {
        ParticipantRow {
            id,
            age: profile.age,
            gender: profile.gender.clone(),
            region: profile.region.clone(),
            province: profile.province.clone(),
            locality: profile.locality.clone(),
            education: profile.education.clone(),
        }
    }
}

/// One answered item, written in a single batch on submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseRow {
    pub participant_id: String,
    pub item_id: u64,
    pub value: u8,
}

/// The computed result: one row per participant, overwritten on
/// resubmission. `scores` keeps the full accumulated map so the profile
/// chart can be rendered without re-fetching responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRow {
    pub participant_id: String,
    pub dominant: u8,
    pub wing: u8,
    pub confidence: u32,
    pub scores: BTreeMap<u8, u32>,
    pub duration_secs: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ResultRow {
    pub fn new(
        participant_id: String,
        outcome: &Outcome,
        scores: &ScoreMap,
        duration_secs: Option<i64>,
    ) -> Self {
        ResultRow {
            participant_id,
            dominant: outcome.dominant.get(),
            wing: outcome.wing.get(),
            confidence: outcome.confidence,
            scores: scores.iter().map(|(c, &s)| (c.get(), s)).collect(),
            duration_secs,
            created_at: None,
        }
    }

    /// Rebuild the typed outcome from a stored row. Fails if the row holds
    /// a category outside 1..=9, which means the stored data is corrupt.
    pub fn outcome(&self) -> Result<Outcome, ScoringError> {
        Ok(Outcome {
            dominant: Category::new(self.dominant)?,
            wing: Category::new(self.wing)?,
            confidence: self.confidence,
        })
    }

    /// Rebuild the typed score map from a stored row.
    pub fn score_map(&self) -> Result<ScoreMap, ScoringError> {
        self.scores
            .iter()
            .map(|(&c, &s)| Ok((Category::new(c)?, s)))
            .collect()
    }
}
