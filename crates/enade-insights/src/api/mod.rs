mod params;
mod router;
mod service;

pub use params::{InsightsQuery, DEFAULT_LIMIT, MAX_LIMIT};
pub use router::insights_router;
pub use service::{CourseDetail, InsightsService, QuestionInsight, DEFAULT_PEER_CATEGORY};
