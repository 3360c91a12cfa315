pub mod types;

pub use types::{AnswerScale, Item, ResponseSet};
