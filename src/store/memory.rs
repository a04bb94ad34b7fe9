//! In-memory [`EventStore`] used by the test suite.
//!
//! Evaluates predicates directly against [`Event`] values. Text search is a
//! plain word match without stemming.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{
    Event, EventFormat, EventStatus, EventType, EventView, NewEvent, Organizer,
    RegistrationStatus, Schedule, UserSummary, Venue,
};
use crate::query::filter::EventPredicate;
use crate::query::params::PageRequest;
use crate::query::sort::{SortDirection, SortField, SortSpec};
use crate::utils::error::AppError;

use super::EventStore;

#[derive(Default)]
pub struct MemoryEventStore {
    events: Mutex<Vec<Event>>,
    users: Mutex<HashMap<Uuid, UserSummary>>,
    unavailable: AtomicBool,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, id: Uuid, name: &str, username: Option<&str>) {
        self.users.lock().unwrap().insert(
            id,
            UserSummary {
                name: name.to_string(),
                username: username.map(str::to_string),
            },
        );
    }

    pub fn add_event(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }

    /// Makes every subsequent call fail like a dropped connection pool.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, AtomicOrdering::SeqCst);
    }

    fn check_available(&self) -> Result<(), AppError> {
        if self.unavailable.load(AtomicOrdering::SeqCst) {
            return Err(AppError::DatabaseError(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn view(&self, event: Event) -> EventView {
        let created_by = self.users.lock().unwrap().get(&event.created_by).cloned();
        EventView { event, created_by }
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn find_events(
        &self,
        predicate: &EventPredicate,
        sort: SortSpec,
        page: PageRequest,
    ) -> Result<Vec<EventView>, AppError> {
        self.check_available()?;

        let mut matching: Vec<Event> = self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| matches(predicate, e))
            .cloned()
            .collect();

        // Stable sort: ties keep insertion order.
        if let SortSpec::By { field, direction } = sort {
            matching.sort_by(|a, b| {
                let ordering = compare(field, a, b);
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }

        Ok(matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .map(|e| self.view(e))
            .collect())
    }

    async fn count_events(&self, predicate: &EventPredicate) -> Result<u64, AppError> {
        self.check_available()?;

        let events = self.events.lock().unwrap();
        Ok(events.iter().filter(|e| matches(predicate, e)).count() as u64)
    }

    async fn find_event(&self, id: Uuid) -> Result<Option<EventView>, AppError> {
        self.check_available()?;

        let event = self
            .events
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned();
        Ok(event.map(|e| self.view(e)))
    }

    async fn insert_event(&self, event: NewEvent) -> Result<Event, AppError> {
        self.check_available()?;

        let event = event.into_event(Uuid::new_v4(), Utc::now());
        self.add_event(event.clone());
        Ok(event)
    }
}

fn matches(predicate: &EventPredicate, event: &Event) -> bool {
    if let Some(status) = predicate.status {
        if event.status != status {
            return false;
        }
    }
    if let Some(clause) = &predicate.event_type {
        if !clause.matches(event.event_type) {
            return false;
        }
    }
    if let Some(city) = &predicate.city {
        let event_city = event.venue.as_ref().and_then(|v| v.city.as_deref());
        if event_city != Some(city.as_str()) {
            return false;
        }
    }
    if let Some(window) = &predicate.start_window {
        if !window.contains(&event.schedule.start_date) {
            return false;
        }
    }
    if let Some(search) = &predicate.search {
        let mut text = format!("{} {}", event.title, event.description);
        for tag in &event.tags {
            text.push(' ');
            text.push_str(tag);
        }
        text.push(' ');
        text.push_str(&event.organizer.college_name);

        let text = text.to_lowercase();
        let found = text
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| search.words().iter().any(|w| w == word));
        if !found {
            return false;
        }
    }
    true
}

/// `None` ranks below any value.
fn compare(field: SortField, a: &Event, b: &Event) -> Ordering {
    match field {
        SortField::StartDate => a.schedule.start_date.cmp(&b.schedule.start_date),
        SortField::EndDate => a.schedule.end_date.cmp(&b.schedule.end_date),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        SortField::Capacity => a.capacity.cmp(&b.capacity),
        SortField::Title => a.title.cmp(&b.title),
        SortField::EventType => a.event_type.as_str().cmp(b.event_type.as_str()),
        SortField::Status => a.status.as_str().cmp(b.status.as_str()),
    }
}

/// A published in-person event with sensible defaults for tests.
pub fn sample_event(title: &str, event_type: EventType, start: DateTime<Utc>) -> Event {
    NewEvent {
        title: title.to_string(),
        event_type,
        description: format!("{title} on campus"),
        format: EventFormat::InPerson,
        image_url: None,
        tags: Vec::new(),
        venue: Some(Venue {
            name: Some("Student Union".to_string()),
            city: Some("Boston".to_string()),
            ..Default::default()
        }),
        schedule: Schedule {
            start_date: start,
            end_date: start + chrono::Duration::hours(3),
            start_time: "10:00".to_string(),
            end_time: "13:00".to_string(),
            timezone: "UTC".to_string(),
        },
        capacity: None,
        prizes: Vec::new(),
        eligibility: None,
        team_size: None,
        organizer: Organizer {
            name: "Events Office".to_string(),
            email: "events@example.edu".to_string(),
            phone: None,
            college_name: "Northeastern".to_string(),
            website: None,
            social_media: None,
        },
        additional_info: None,
        created_by: Uuid::new_v4(),
        registration_status: RegistrationStatus::Open,
        status: EventStatus::Published,
        scraped_from: None,
    }
    .into_event(Uuid::new_v4(), Utc::now())
}
