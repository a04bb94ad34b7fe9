use serde::{Deserialize, Serialize};

/// Organizer contact details copied onto an event when it is submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organizer {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub college_name: String,
    pub website: Option<String>,
    pub social_media: Option<SocialMedia>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialMedia {
    pub instagram: Option<String>,
    pub twitter: Option<String>,
}
