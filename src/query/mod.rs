//! Event listing query builder.
//!
//! A request flows through four stages:
//!
//! 1. [`params::EventListParams::normalize`] turns the raw query string into
//!    a typed [`params::FilterSpec`]. Sentinels, blanks and unknown tokens
//!    become `None` instead of errors.
//! 2. [`filter::EventPredicate::assemble`] converts that filter into a
//!    conjunction of clauses, resolving date buckets against the clock.
//! 3. [`execute`] runs the page read and the count against an
//!    [`EventStore`] concurrently.
//! 4. The result is shaped into an [`EventPage`] with pagination metadata.
//!
//! Pagination is offset based, so rows inserted or removed between two page
//! requests can shift results across pages.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use tracing::{debug, info};

use crate::models::EventView;
use crate::store::EventStore;
use crate::utils::error::AppError;

pub mod dates;
pub mod filter;
pub mod params;
pub mod sort;

use filter::EventPredicate;
use params::{FilterSpec, PageRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub pages: u64,
}

impl Pagination {
    pub fn new(total: u64, request: PageRequest) -> Self {
        Self {
            total,
            page: request.page,
            limit: request.limit,
            pages: total.div_ceil(u64::from(request.limit.max(1))),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EventPage {
    pub events: Vec<EventView>,
    pub pagination: Pagination,
}

pub async fn execute(
    store: &dyn EventStore,
    filters: &FilterSpec,
    now: DateTime<FixedOffset>,
) -> Result<EventPage, AppError> {
    let predicate = EventPredicate::assemble(filters, now);
    debug!(?predicate, sort = ?filters.sort, page = ?filters.page, "Fetching events");

    let (events, total) = tokio::try_join!(
        store.find_events(&predicate, filters.sort, filters.page),
        store.count_events(&predicate),
    )?;

    info!(
        returned = events.len(),
        total,
        page = filters.page.page,
        "Found events"
    );

    Ok(EventPage {
        events,
        pagination: Pagination::new(total, filters.page),
    })
}
