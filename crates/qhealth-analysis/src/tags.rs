//! Snooze-workflow tag classification.
//!
//! Conversations are routed through three snooze workflows, marked by tag.
//! A conversation mistakenly carrying more than one workflow tag resolves
//! deterministically by priority order, not as an error.

use qhealth_core::models::Conversation;

/// The workflow category a conversation's tag set resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnoozeCategory {
    /// `snooze.waiting-on-customer-resolved` — fix shipped, customer confirming.
    WaitingOnCustomerResolved,
    /// `snooze.waiting-on-customer-unresolved` — waiting on customer input.
    WaitingOnCustomerUnresolved,
    /// `snooze.waiting-on-tse` — the agent owes the next action.
    WaitingOnAgent,
    /// No recognized workflow tag (or the conversation is not snoozed).
    None,
}

/// Workflow tags in priority order: the first tag present wins.
const SNOOZE_TAG_PRIORITY: [(&str, SnoozeCategory); 3] = [
    (
        "snooze.waiting-on-customer-resolved",
        SnoozeCategory::WaitingOnCustomerResolved,
    ),
    (
        "snooze.waiting-on-customer-unresolved",
        SnoozeCategory::WaitingOnCustomerUnresolved,
    ),
    ("snooze.waiting-on-tse", SnoozeCategory::WaitingOnAgent),
];

/// Resolve a conversation's tag set to its workflow category.
///
/// Matching is case-insensitive string equality. Open (non-snoozed)
/// conversations always classify as `None` regardless of tags.
pub fn classify_tags(conversation: &Conversation) -> SnoozeCategory {
    if !conversation.is_snoozed() {
        return SnoozeCategory::None;
    }

    for (tag, category) in SNOOZE_TAG_PRIORITY {
        if conversation
            .tag_names()
            .any(|name| name.eq_ignore_ascii_case(tag))
        {
            return category;
        }
    }

    SnoozeCategory::None
}
