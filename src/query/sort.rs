//! Sort keys accepted by the listing endpoint.
//!
//! `sortBy` is either one of the presets (`date-asc`, `date-desc`, `popular`,
//! `recent`) or the name of a field from a fixed whitelist, in which case
//! `sortOrder` picks the direction. Anything else leaves the natural
//! (insertion) order in place.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("desc") => SortDirection::Descending,
            _ => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    StartDate,
    EndDate,
    CreatedAt,
    UpdatedAt,
    Capacity,
    Title,
    EventType,
    Status,
}

impl SortField {
    fn from_param(value: &str) -> Option<Self> {
        let field = match value {
            "schedule.startDate" | "startDate" => SortField::StartDate,
            "schedule.endDate" | "endDate" => SortField::EndDate,
            "createdAt" => SortField::CreatedAt,
            "updatedAt" => SortField::UpdatedAt,
            "capacity" => SortField::Capacity,
            "title" => SortField::Title,
            "eventType" => SortField::EventType,
            "status" => SortField::Status,
            _ => return None,
        };
        Some(field)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortSpec {
    /// Insertion order.
    Natural,
    By {
        field: SortField,
        direction: SortDirection,
    },
}

impl Default for SortSpec {
    fn default() -> Self {
        SortSpec::By {
            field: SortField::StartDate,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortSpec {
    pub fn from_params(sort_by: Option<&str>, sort_order: Option<&str>) -> Self {
        let sort_by = match sort_by.map(str::trim) {
            Some(s) if !s.is_empty() => s,
            _ => return SortSpec::default(),
        };

        let (field, direction) = match sort_by {
            "date-asc" => (SortField::StartDate, SortDirection::Ascending),
            "date-desc" => (SortField::StartDate, SortDirection::Descending),
            "popular" => (SortField::Capacity, SortDirection::Descending),
            "recent" => (SortField::CreatedAt, SortDirection::Descending),
            other => match SortField::from_param(other) {
                Some(field) => (field, SortDirection::from_param(sort_order)),
                None => {
                    tracing::debug!(sort_by = other, "Ignoring unsupported sort field");
                    return SortSpec::Natural;
                }
            },
        };

        SortSpec::By { field, direction }
    }
}
