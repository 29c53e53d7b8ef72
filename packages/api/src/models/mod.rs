//! Data models exchanged with the backend.

mod activity;
mod recommendation;

pub use activity::{Activity, ActivityRecord, ActivityType};
pub use recommendation::Recommendation;
