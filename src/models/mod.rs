use thiserror::Error;

pub mod event;
pub mod organizer;
pub mod user;

pub use event::{
    Event, EventFormat, EventStatus, EventType, EventView, NewEvent, Prize, RegistrationStatus,
    Schedule, Venue,
};
pub use organizer::{Organizer, SocialMedia};
pub use user::UserSummary;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
