//! Persistence seam for events.
//!
//! The listing path only needs four primitives: filtered, sorted and paged
//! reads with the creator resolved, a count over the same predicate, a
//! lookup by id and an insert. [`PgEventStore`] is the production backend.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Event, EventView, NewEvent};
use crate::query::filter::EventPredicate;
use crate::query::params::PageRequest;
use crate::query::sort::SortSpec;
use crate::utils::error::AppError;

pub mod postgres;

#[cfg(test)]
pub mod memory;

pub use postgres::PgEventStore;

#[async_trait]
pub trait EventStore: Send + Sync {
    /// One page of matching events. A creator reference that no longer
    /// resolves yields `created_by: None` rather than an error.
    async fn find_events(
        &self,
        predicate: &EventPredicate,
        sort: SortSpec,
        page: PageRequest,
    ) -> Result<Vec<EventView>, AppError>;

    /// Number of events matching `predicate`, ignoring paging.
    async fn count_events(&self, predicate: &EventPredicate) -> Result<u64, AppError>;

    async fn find_event(&self, id: Uuid) -> Result<Option<EventView>, AppError>;

    async fn insert_event(&self, event: NewEvent) -> Result<Event, AppError>;
}
