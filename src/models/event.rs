use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::organizer::Organizer;
use super::user::UserSummary;
use super::UnknownVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    Hackathon,
    Workshop,
    TechTalk,
    Networking,
    Conference,
    Other,
}

impl EventType {
    pub const ALL: [EventType; 6] = [
        EventType::Hackathon,
        EventType::Workshop,
        EventType::TechTalk,
        EventType::Networking,
        EventType::Conference,
        EventType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Hackathon => "hackathon",
            EventType::Workshop => "workshop",
            EventType::TechTalk => "tech-talk",
            EventType::Networking => "networking",
            EventType::Conference => "conference",
            EventType::Other => "other",
        }
    }
}

impl FromStr for EventType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("eventType", s))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventStatus {
    #[default]
    Draft,
    Published,
    Cancelled,
}

impl EventStatus {
    pub const ALL: [EventStatus; 3] = [
        EventStatus::Draft,
        EventStatus::Published,
        EventStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Draft => "draft",
            EventStatus::Published => "published",
            EventStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for EventStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("status", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventFormat {
    InPerson,
    Virtual,
    Hybrid,
}

impl EventFormat {
    pub const ALL: [EventFormat; 3] = [
        EventFormat::InPerson,
        EventFormat::Virtual,
        EventFormat::Hybrid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventFormat::InPerson => "in-person",
            EventFormat::Virtual => "virtual",
            EventFormat::Hybrid => "hybrid",
        }
    }
}

impl FromStr for EventFormat {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("format", s))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegistrationStatus {
    #[default]
    Open,
    Closed,
    ComingSoon,
}

impl RegistrationStatus {
    pub const ALL: [RegistrationStatus; 3] = [
        RegistrationStatus::Open,
        RegistrationStatus::Closed,
        RegistrationStatus::ComingSoon,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Open => "open",
            RegistrationStatus::Closed => "closed",
            RegistrationStatus::ComingSoon => "coming-soon",
        }
    }
}

impl FromStr for RegistrationStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("registrationStatus", s))
    }
}

/// Physical location. Events without a venue are virtual.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub start_time: String,
    pub end_time: String,
    pub timezone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prize {
    pub position: String,
    pub amount: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub event_type: EventType,
    pub description: String,
    pub format: EventFormat,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub venue: Option<Venue>,
    pub schedule: Schedule,
    pub capacity: Option<i32>,
    pub prizes: Vec<Prize>,
    pub eligibility: Option<String>,
    pub team_size: Option<String>,
    pub organizer: Organizer,
    pub additional_info: Option<String>,
    /// Weak reference to the submitting user, rendered through [`EventView`].
    #[serde(skip)]
    pub created_by: Uuid,
    pub registration_status: RegistrationStatus,
    pub status: EventStatus,
    pub scraped_from: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An event together with its resolved creator. `created_by` is `None` when
/// the referenced user no longer exists.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventView {
    #[serde(flatten)]
    pub event: Event,
    pub created_by: Option<UserSummary>,
}

/// A validated submission, ready to be persisted.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub event_type: EventType,
    pub description: String,
    pub format: EventFormat,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub venue: Option<Venue>,
    pub schedule: Schedule,
    pub capacity: Option<i32>,
    pub prizes: Vec<Prize>,
    pub eligibility: Option<String>,
    pub team_size: Option<String>,
    pub organizer: Organizer,
    pub additional_info: Option<String>,
    pub created_by: Uuid,
    pub registration_status: RegistrationStatus,
    pub status: EventStatus,
    pub scraped_from: Option<String>,
}

impl NewEvent {
    pub fn into_event(self, id: Uuid, now: DateTime<Utc>) -> Event {
        Event {
            id,
            title: self.title,
            event_type: self.event_type,
            description: self.description,
            format: self.format,
            image_url: self.image_url,
            tags: self.tags,
            venue: self.venue,
            schedule: self.schedule,
            capacity: self.capacity,
            prizes: self.prizes,
            eligibility: self.eligibility,
            team_size: self.team_size,
            organizer: self.organizer,
            additional_info: self.additional_info,
            created_by: self.created_by,
            registration_status: self.registration_status,
            status: self.status,
            scraped_from: self.scraped_from,
            created_at: now,
            updated_at: now,
        }
    }
}
