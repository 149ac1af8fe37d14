//! Team roster payload.

use serde::{Deserialize, Serialize};

use crate::types::AgentId;

/// A team member (agent / TSE) from the helpdesk admin roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: AgentId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub away_mode_enabled: bool,
}

impl TeamMember {
    /// Display name with the standard fallback chain:
    /// name → email local-part → `"TSE {id}"`.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        if let Some(local) = self
            .email
            .as_deref()
            .and_then(|e| e.split('@').next())
            .filter(|l| !l.is_empty())
        {
            return local.to_string();
        }
        format!("TSE {}", self.id)
    }
}
