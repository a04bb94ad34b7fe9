use serde::{Deserialize, Serialize};

/// Display projection of a user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub name: String,
    pub username: Option<String>,
}
