pub mod engine;
pub mod error;
pub mod types;
pub mod validation;

pub use engine::{accumulate, resolve_dominant};
pub use error::ScoringError;
pub use types::{Category, Outcome, ScoreMap, CATEGORY_COUNT};
pub use validation::validate_responses;
