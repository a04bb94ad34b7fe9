use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    EventFormat, EventStatus, EventType, EventView, NewEvent, Organizer, Prize,
    RegistrationStatus, Schedule, SocialMedia, Venue,
};
use crate::query::{self, params::EventListParams};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, success};

/// `GET /api/events`
pub async fn list_events(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(pairs) = pairs?;
    let filters = EventListParams::from_pairs(pairs).normalize(state.listing.max_page_limit);

    let page = query::execute(state.store.as_ref(), &filters, state.listing.now()).await?;

    Ok(success(page).into_response())
}

#[derive(Serialize)]
struct EventDetail {
    event: EventView,
}

/// `GET /api/events/:id`
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let not_found = || AppError::NotFound("Event not found".to_string());

    let id = Uuid::parse_str(&id).map_err(|_| not_found())?;
    let event = state.store.find_event(id).await?.ok_or_else(not_found)?;

    Ok(success(EventDetail { event }).into_response())
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: Option<String>,
    pub event_type: Option<EventType>,
    pub description: Option<String>,
    pub format: Option<EventFormat>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub venue: Option<Venue>,
    pub schedule: Option<ScheduleInput>,
    pub capacity: Option<i32>,
    #[serde(default)]
    pub prizes: Vec<Prize>,
    pub eligibility: Option<String>,
    pub team_size: Option<String>,
    pub organizer: Option<OrganizerInput>,
    pub additional_info: Option<String>,
    pub created_by: Option<Uuid>,
    pub registration_status: Option<RegistrationStatus>,
    pub status: Option<EventStatus>,
    pub scraped_from: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleInput {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub timezone: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizerInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub college_name: Option<String>,
    pub website: Option<String>,
    pub social_media: Option<SocialMedia>,
}

impl CreateEventRequest {
    pub fn validate(self) -> Result<NewEvent, AppError> {
        let invalid = |msg: &str| AppError::ValidationError(msg.to_string());

        let (Some(title), Some(event_type), Some(description), Some(format)) = (
            filled(self.title),
            self.event_type,
            filled(self.description),
            self.format,
        ) else {
            return Err(invalid(
                "Title, event type, description, and format are required",
            ));
        };

        let organizer = self.organizer.unwrap_or_default();
        let (Some(name), Some(email), Some(college_name)) = (
            filled(organizer.name),
            filled(organizer.email),
            filled(organizer.college_name),
        ) else {
            return Err(invalid(
                "Organizer name, email, and college name are required",
            ));
        };

        let schedule = self.schedule.unwrap_or_default();
        let (Some(start_date), Some(end_date), Some(start_time), Some(end_time), Some(timezone)) = (
            schedule.start_date,
            schedule.end_date,
            filled(schedule.start_time),
            filled(schedule.end_time),
            filled(schedule.timezone),
        ) else {
            return Err(invalid("Complete schedule information is required"));
        };

        if start_date > end_date {
            return Err(invalid("Event cannot end before it starts"));
        }

        if self.capacity.is_some_and(|c| c < 0) {
            return Err(invalid("Capacity cannot be negative"));
        }

        let Some(created_by) = self.created_by else {
            return Err(invalid("Submitting user is required"));
        };

        Ok(NewEvent {
            title,
            event_type,
            description,
            format,
            image_url: filled(self.image_url),
            tags: self.tags,
            venue: self.venue,
            schedule: Schedule {
                start_date,
                end_date,
                start_time,
                end_time,
                timezone,
            },
            capacity: self.capacity,
            prizes: self.prizes,
            eligibility: filled(self.eligibility),
            team_size: filled(self.team_size),
            organizer: Organizer {
                name,
                email,
                phone: filled(organizer.phone),
                college_name,
                website: filled(organizer.website),
                social_media: organizer.social_media,
            },
            additional_info: filled(self.additional_info),
            created_by,
            registration_status: self.registration_status.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            scraped_from: filled(self.scraped_from),
        })
    }
}

/// Trimmed value, or `None` when missing or blank.
fn filled(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatedEvent {
    #[serde(rename = "_id")]
    id: Uuid,
    title: String,
    event_type: EventType,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
}

#[derive(Serialize)]
struct CreateEventResponse {
    event: CreatedEvent,
}

/// `POST /api/events`
pub async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<CreateEventRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload?;
    let new_event = request.validate()?;

    let event = state.store.insert_event(new_event).await?;

    let body = CreateEventResponse {
        event: CreatedEvent {
            id: event.id,
            title: event.title,
            event_type: event.event_type,
            start_date: event.schedule.start_date,
            end_date: event.schedule.end_date,
        },
    };

    Ok(created(body, "Event created successfully").into_response())
}
