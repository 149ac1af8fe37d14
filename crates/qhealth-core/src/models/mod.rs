//! Wire models for the payloads the engine consumes.
//!
//! All deserialization here is tolerant: the upstream helpdesk API is
//! inconsistent about field shapes (tags as bare strings or objects,
//! assignees as names or records, ids as strings or numbers), and missing
//! fields must degrade to safe defaults rather than fail the whole batch.

pub mod conversation;
pub mod response_time;
pub mod roster;
pub mod snapshot;

pub use conversation::{Assignee, Conversation, ConversationState, Tag};
pub use response_time::{ResponseTimeMetric, SlowConversation};
pub use roster::TeamMember;
pub use snapshot::{AgentSummary, DailySnapshot};
