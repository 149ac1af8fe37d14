//! Conversation payload from the helpdesk API.

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{AgentId, UnixSeconds};

/// Lifecycle state of a conversation.
///
/// The upstream API is not consistent about casing (`"snoozed"` vs
/// `"Snoozed"` have both been observed), so deserialization lowercases
/// before matching and maps anything unrecognized to `Unknown` instead of
/// rejecting the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationState {
    Open,
    Snoozed,
    Closed,
    Unknown,
}

impl<'de> Deserialize<'de> for ConversationState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.to_ascii_lowercase().as_str() {
            "open" => ConversationState::Open,
            "snoozed" => ConversationState::Snoozed,
            "closed" => ConversationState::Closed,
            _ => ConversationState::Unknown,
        })
    }
}

/// A conversation tag: either a bare string or a `{name}` object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tag {
    Bare(String),
    Named { name: String },
}

impl Tag {
    /// The tag name regardless of wire shape.
    pub fn name(&self) -> &str {
        match self {
            Tag::Bare(name) => name,
            Tag::Named { name } => name,
        }
    }
}

/// The assignee field: either a bare display name or a partial admin record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Assignee {
    Details(AssigneeDetails),
    Name(String),
}

/// Partial admin record embedded in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AssigneeDetails {
    #[serde(default)]
    pub id: Option<AgentId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Assignee {
    /// Agent id, when the wire shape carries one.
    pub fn id(&self) -> Option<AgentId> {
        match self {
            Assignee::Details(d) => d.id,
            Assignee::Name(_) => None,
        }
    }

    /// Display name, when present.
    pub fn name(&self) -> Option<&str> {
        match self {
            Assignee::Details(d) => d.name.as_deref(),
            Assignee::Name(name) => Some(name),
        }
    }

    /// Email, when present (object shape only).
    pub fn email(&self) -> Option<&str> {
        match self {
            Assignee::Details(d) => d.email.as_deref(),
            Assignee::Name(_) => None,
        }
    }

    /// Whether this value actually identifies someone. A bare string always
    /// does; an object must carry an id or a name.
    pub fn is_usable(&self) -> bool {
        match self {
            Assignee::Name(_) => true,
            Assignee::Details(d) => d.id.is_some() || d.name.is_some(),
        }
    }
}

/// Reply-latency statistics embedded in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ConversationStatistics {
    pub state: Option<ConversationState>,
    pub first_admin_reply_at: Option<UnixSeconds>,
    pub time_to_admin_reply: Option<i64>,
}

/// A support conversation as fetched from the helpdesk API.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Conversation {
    #[serde(deserialize_with = "de_opt_string_or_number")]
    pub id: Option<String>,
    pub state: Option<ConversationState>,
    pub snoozed_until: Option<UnixSeconds>,
    pub admin_assignee_id: Option<AgentId>,
    pub admin_assignee: Option<Assignee>,
    pub created_at: Option<UnixSeconds>,
    pub updated_at: Option<UnixSeconds>,
    pub last_contacted_at: Option<UnixSeconds>,
    pub closed_at: Option<UnixSeconds>,
    pub statistics: Option<ConversationStatistics>,
    pub tags: Vec<Tag>,
}

impl Conversation {
    /// Whether this conversation is snoozed.
    ///
    /// Invariant from the upstream API: a conversation is snoozed if its
    /// state says so OR a snooze-until timestamp is present OR the nested
    /// statistics state says so. All sources must be checked, not just
    /// `state`.
    pub fn is_snoozed(&self) -> bool {
        self.state == Some(ConversationState::Snoozed)
            || self.snoozed_until.is_some()
            || self
                .statistics
                .as_ref()
                .is_some_and(|s| s.state == Some(ConversationState::Snoozed))
    }

    /// Whether this conversation counts as open: state `open` and not
    /// snoozed by any source.
    pub fn is_open(&self) -> bool {
        self.state == Some(ConversationState::Open) && !self.is_snoozed()
    }

    /// Resolved assignee id: the top-level field first, then the embedded
    /// assignee record.
    pub fn assignee_id(&self) -> Option<AgentId> {
        self.admin_assignee_id
            .or_else(|| self.admin_assignee.as_ref().and_then(Assignee::id))
    }

    /// Resolved assignee display name, from whichever wire shape carries it.
    pub fn assignee_name(&self) -> Option<&str> {
        self.admin_assignee.as_ref().and_then(Assignee::name)
    }

    /// Iterate tag names.
    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(Tag::name)
    }

    /// First-reply latency in seconds, when computable.
    ///
    /// Prefers the precomputed `time_to_admin_reply`, falling back to
    /// `first_admin_reply_at − created_at`. Negative values (clock skew in
    /// upstream data) yield `None`.
    pub fn first_reply_seconds(&self) -> Option<i64> {
        let stats = self.statistics.as_ref()?;
        let latency = match stats.time_to_admin_reply {
            Some(seconds) => seconds,
            None => stats.first_admin_reply_at? - self.created_at?,
        };
        (latency >= 0).then_some(latency)
    }
}

/// Accept conversation ids as either JSON strings or numbers.
fn de_opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        Str(String),
        Num(i64),
    }

    Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(|v| match v {
        StringOrNumber::Str(s) => s,
        StringOrNumber::Num(n) => n.to_string(),
    }))
}
