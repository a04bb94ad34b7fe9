use chrono::{DateTime, FixedOffset};

use crate::models::{EventStatus, EventType};

use super::dates::DateWindow;
use super::params::{FilterSpec, SearchTerms};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventTypeClause {
    Equals(EventType),
    OneOf(Vec<EventType>),
}

impl EventTypeClause {
    pub fn matches(&self, event_type: EventType) -> bool {
        match self {
            EventTypeClause::Equals(t) => *t == event_type,
            EventTypeClause::OneOf(types) => types.contains(&event_type),
        }
    }
}

/// Conjunction of the clauses a listing request applies. Every populated
/// field must hold for an event to match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPredicate {
    pub status: Option<EventStatus>,
    pub event_type: Option<EventTypeClause>,
    pub city: Option<String>,
    pub start_window: Option<DateWindow>,
    pub search: Option<SearchTerms>,
}

impl EventPredicate {
    pub fn assemble(filters: &FilterSpec, now: DateTime<FixedOffset>) -> Self {
        let event_type = filters.event_types.as_ref().and_then(|types| {
            let mut types: Vec<EventType> = types.iter().copied().collect();
            match types.len() {
                0 => None,
                1 => types.pop().map(EventTypeClause::Equals),
                _ => Some(EventTypeClause::OneOf(types)),
            }
        });

        let start_window = filters.date_bucket.and_then(|bucket| {
            let window = bucket.window(now);
            if window.is_none() {
                tracing::warn!(?bucket, %now, "Date bucket out of calendar range");
            }
            window
        });

        Self {
            status: filters.status,
            event_type,
            city: filters.city.clone(),
            start_window,
            search: filters.search.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::dates::DateBucket;
    use crate::query::params::EventListParams;

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2026-10-15T10:00:00+00:00").unwrap()
    }

    fn assemble(params: EventListParams) -> EventPredicate {
        EventPredicate::assemble(&params.normalize(100), now())
    }

    #[test]
    fn test_absent_dimensions_contribute_nothing() {
        let predicate = assemble(EventListParams {
            status: Some("all".into()),
            location: Some("all".into()),
            ..Default::default()
        });
        assert!(predicate.is_empty());
    }

    #[test]
    fn test_single_type_is_equality() {
        let predicate = assemble(EventListParams {
            event_type: Some("workshop".into()),
            ..Default::default()
        });
        assert_eq!(
            predicate.event_type,
            Some(EventTypeClause::Equals(EventType::Workshop))
        );
    }

    #[test]
    fn test_multiple_types_are_set_membership() {
        let predicate = assemble(EventListParams {
            event_type: Some("workshop,hackathon".into()),
            ..Default::default()
        });

        let clause = predicate.event_type.unwrap();
        assert_eq!(
            clause,
            EventTypeClause::OneOf(vec![EventType::Hackathon, EventType::Workshop])
        );
        assert!(clause.matches(EventType::Hackathon));
        assert!(!clause.matches(EventType::Conference));
    }

    #[test]
    fn test_every_dimension_is_populated() {
        let predicate = assemble(EventListParams {
            status: Some("published".into()),
            event_type: Some("conference".into()),
            location: Some("Austin".into()),
            date_filter: Some("today".into()),
            search: Some("robotics club".into()),
            ..Default::default()
        });

        assert_eq!(predicate.status, Some(EventStatus::Published));
        assert_eq!(predicate.city.as_deref(), Some("Austin"));
        assert_eq!(
            predicate.start_window,
            DateBucket::Today.window(now())
        );
        assert_eq!(
            predicate.search.map(|s| s.to_tsquery()).as_deref(),
            Some("robotics | club")
        );
    }
}
