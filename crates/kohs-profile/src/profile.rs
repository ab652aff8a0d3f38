use chrono::Utc;
use kohs_engine::SessionRecord;
use serde::{Deserialize, Serialize};

/// The stored profile of the local player.
///
/// `user_id` is empty until the recorder assigns a temporary id. Sessions are
/// kept in completion order and only ever appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub user_id: String,
    pub sessions: Vec<SessionRecord>,
    /// Creation time in milliseconds since the Unix epoch.
    pub created_at: i64,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            user_id: String::new(),
            sessions: Vec::new(),
            created_at: Utc::now().timestamp_millis(),
        }
    }
}

impl UserProfile {
    #[must_use]
    pub fn has_user_id(&self) -> bool {
        !self.user_id.is_empty()
    }
}
