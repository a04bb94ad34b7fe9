use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPool;
use sqlx::types::Json;
use sqlx::{FromRow, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::{
    Event, EventView, NewEvent, Organizer, Prize, Schedule, UnknownVariant, UserSummary, Venue,
};
use crate::query::filter::{EventPredicate, EventTypeClause};
use crate::query::params::PageRequest;
use crate::query::sort::{SortDirection, SortField, SortSpec};
use crate::utils::error::AppError;

use super::EventStore;

const EVENT_COLUMNS: &str = "SELECT e.id, e.title, e.event_type, e.description, e.format, \
     e.image_url, e.tags, e.venue, e.start_date, e.end_date, e.start_time, e.end_time, \
     e.timezone, e.capacity, e.prizes, e.eligibility, e.team_size, e.organizer, \
     e.additional_info, e.created_by, e.registration_status, e.status, e.scraped_from, \
     e.created_at, e.updated_at, u.name AS creator_name, u.username AS creator_username \
     FROM events e LEFT JOIN users u ON u.id = e.created_by";

const INSERT_EVENT: &str = "INSERT INTO events (id, title, event_type, description, format, \
     image_url, tags, venue, start_date, end_date, start_time, end_time, timezone, capacity, \
     prizes, eligibility, team_size, organizer, additional_info, created_by, \
     registration_status, status, scraped_from) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, \
     $18, $19, $20, $21, $22, $23) \
     RETURNING created_at";

/// Final ORDER BY key; keeps paging stable when the requested key ties.
const NATURAL_ORDER: &str = "e.created_at ASC, e.id ASC";

#[derive(Clone)]
pub struct PgEventStore {
    pool: PgPool,
}

impl PgEventStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn find_events(
        &self,
        predicate: &EventPredicate,
        sort: SortSpec,
        page: PageRequest,
    ) -> Result<Vec<EventView>, AppError> {
        let mut query = page_query(predicate, sort, page);
        let rows = query
            .build_query_as::<EventRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(EventView::try_from).collect()
    }

    async fn count_events(&self, predicate: &EventPredicate) -> Result<u64, AppError> {
        let mut query = count_query(predicate);
        let (total,) = query
            .build_query_as::<(i64,)>()
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(total).unwrap_or_default())
    }

    async fn find_event(&self, id: Uuid) -> Result<Option<EventView>, AppError> {
        let sql = format!("{EVENT_COLUMNS} WHERE e.id = $1");
        let row = sqlx::query_as::<_, EventRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(EventView::try_from).transpose()
    }

    async fn insert_event(&self, event: NewEvent) -> Result<Event, AppError> {
        let id = Uuid::new_v4();
        let (created_at,): (DateTime<Utc>,) = sqlx::query_as(INSERT_EVENT)
            .bind(id)
            .bind(&event.title)
            .bind(event.event_type.as_str())
            .bind(&event.description)
            .bind(event.format.as_str())
            .bind(&event.image_url)
            .bind(&event.tags)
            .bind(event.venue.as_ref().map(Json))
            .bind(event.schedule.start_date)
            .bind(event.schedule.end_date)
            .bind(&event.schedule.start_time)
            .bind(&event.schedule.end_time)
            .bind(&event.schedule.timezone)
            .bind(event.capacity)
            .bind(Json(&event.prizes))
            .bind(&event.eligibility)
            .bind(&event.team_size)
            .bind(Json(&event.organizer))
            .bind(&event.additional_info)
            .bind(event.created_by)
            .bind(event.registration_status.as_str())
            .bind(event.status.as_str())
            .bind(&event.scraped_from)
            .fetch_one(&self.pool)
            .await?;

        tracing::info!(event_id = %id, title = %event.title, "Event stored");

        Ok(event.into_event(id, created_at))
    }
}

fn page_query(
    predicate: &EventPredicate,
    sort: SortSpec,
    page: PageRequest,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(EVENT_COLUMNS);
    push_predicate(&mut builder, predicate);
    push_order(&mut builder, sort);

    builder
        .push(" LIMIT ")
        .push_bind(i64::from(page.limit))
        .push(" OFFSET ")
        .push_bind(i64::try_from(page.offset()).unwrap_or(i64::MAX));

    builder
}

fn count_query(predicate: &EventPredicate) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM events e");
    push_predicate(&mut builder, predicate);
    builder
}

fn push_predicate(builder: &mut QueryBuilder<'static, Postgres>, predicate: &EventPredicate) {
    let mut has_clause = false;

    if let Some(status) = predicate.status {
        push_keyword(builder, &mut has_clause);
        builder.push("e.status = ").push_bind(status.as_str());
    }

    match &predicate.event_type {
        Some(EventTypeClause::Equals(event_type)) => {
            push_keyword(builder, &mut has_clause);
            builder.push("e.event_type = ").push_bind(event_type.as_str());
        }
        Some(EventTypeClause::OneOf(types)) => {
            let tokens: Vec<String> = types.iter().map(|t| t.as_str().to_string()).collect();
            push_keyword(builder, &mut has_clause);
            builder
                .push("e.event_type = ANY(")
                .push_bind(tokens)
                .push(")");
        }
        None => {}
    }

    if let Some(city) = &predicate.city {
        push_keyword(builder, &mut has_clause);
        builder.push("e.venue ->> 'city' = ").push_bind(city.clone());
    }

    if let Some(window) = &predicate.start_window {
        push_keyword(builder, &mut has_clause);
        builder
            .push("e.start_date >= ")
            .push_bind(window.start)
            .push(if window.end_inclusive {
                " AND e.start_date <= "
            } else {
                " AND e.start_date < "
            })
            .push_bind(window.end);
    }

    if let Some(search) = &predicate.search {
        push_keyword(builder, &mut has_clause);
        builder
            .push("e.search_document @@ to_tsquery('english', ")
            .push_bind(search.to_tsquery())
            .push(")");
    }
}

fn push_keyword(builder: &mut QueryBuilder<'static, Postgres>, has_clause: &mut bool) {
    builder.push(if *has_clause { " AND " } else { " WHERE " });
    *has_clause = true;
}

/// Missing values rank lowest in both directions.
fn push_order(builder: &mut QueryBuilder<'static, Postgres>, sort: SortSpec) {
    builder.push(" ORDER BY ");
    if let SortSpec::By { field, direction } = sort {
        builder.push(sort_column(field)).push(match direction {
            SortDirection::Ascending => " ASC NULLS FIRST, ",
            SortDirection::Descending => " DESC NULLS LAST, ",
        });
    }
    builder.push(NATURAL_ORDER);
}

fn sort_column(field: SortField) -> &'static str {
    match field {
        SortField::StartDate => "e.start_date",
        SortField::EndDate => "e.end_date",
        SortField::CreatedAt => "e.created_at",
        SortField::UpdatedAt => "e.updated_at",
        SortField::Capacity => "e.capacity",
        SortField::Title => "e.title",
        SortField::EventType => "e.event_type",
        SortField::Status => "e.status",
    }
}

#[derive(FromRow)]
struct EventRow {
    id: Uuid,
    title: String,
    event_type: String,
    description: String,
    format: String,
    image_url: Option<String>,
    tags: Vec<String>,
    venue: Option<Json<Venue>>,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    start_time: String,
    end_time: String,
    timezone: String,
    capacity: Option<i32>,
    prizes: Json<Vec<Prize>>,
    eligibility: Option<String>,
    team_size: Option<String>,
    organizer: Json<Organizer>,
    additional_info: Option<String>,
    created_by: Uuid,
    registration_status: String,
    status: String,
    scraped_from: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    creator_name: Option<String>,
    creator_username: Option<String>,
}

fn decode<T>(value: &str) -> Result<T, AppError>
where
    T: FromStr<Err = UnknownVariant>,
{
    value
        .parse()
        .map_err(|e: UnknownVariant| AppError::InternalServerError(format!("stored row has {e}")))
}

impl TryFrom<EventRow> for EventView {
    type Error = AppError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let created_by = row.creator_name.map(|name| UserSummary {
            name,
            username: row.creator_username,
        });

        let event = Event {
            id: row.id,
            title: row.title,
            event_type: decode(&row.event_type)?,
            description: row.description,
            format: decode(&row.format)?,
            image_url: row.image_url,
            tags: row.tags,
            venue: row.venue.map(|Json(venue)| venue),
            schedule: Schedule {
                start_date: row.start_date,
                end_date: row.end_date,
                start_time: row.start_time,
                end_time: row.end_time,
                timezone: row.timezone,
            },
            capacity: row.capacity,
            prizes: row.prizes.0,
            eligibility: row.eligibility,
            team_size: row.team_size,
            organizer: row.organizer.0,
            additional_info: row.additional_info,
            created_by: row.created_by,
            registration_status: decode(&row.registration_status)?,
            status: decode(&row.status)?,
            scraped_from: row.scraped_from,
            created_at: row.created_at,
            updated_at: row.updated_at,
        };

        Ok(EventView { event, created_by })
    }
}
