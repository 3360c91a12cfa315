pub mod client;
pub mod types;

pub use client::StoreClient;
pub use types::{ParticipantRow, ResponseRow, ResultRow};
