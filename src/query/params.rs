use std::collections::BTreeSet;

use crate::models::{EventStatus, EventType};

use super::dates::DateBucket;
use super::sort::SortSpec;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 12;

/// Sentinel meaning "do not filter on this dimension".
const ALL: &str = "all";

/// Raw query string of `GET /api/events`. Every field is kept as text so a
/// malformed value can never reject the request.
#[derive(Debug, Clone, Default)]
pub struct EventListParams {
    pub status: Option<String>,
    pub event_type: Option<String>,
    pub search: Option<String>,
    pub location: Option<String>,
    pub date_filter: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Normalized listing request. `None` means the dimension is not applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub status: Option<EventStatus>,
    pub event_types: Option<BTreeSet<EventType>>,
    pub search: Option<SearchTerms>,
    pub city: Option<String>,
    pub date_bucket: Option<DateBucket>,
    pub sort: SortSpec,
    pub page: PageRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

/// Lowercased words of a free-text search, deduplicated in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerms(Vec<String>);

impl SearchTerms {
    pub fn parse(input: &str) -> Option<Self> {
        let mut words: Vec<String> = Vec::new();
        for word in input
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let word = word.to_lowercase();
            if !words.contains(&word) {
                words.push(word);
            }
        }

        if words.is_empty() {
            None
        } else {
            Some(Self(words))
        }
    }

    pub fn words(&self) -> &[String] {
        &self.0
    }

    /// Disjunctive `tsquery` source: a document matches any of the words.
    /// Words are alphanumeric only, so no tsquery syntax can leak through.
    pub fn to_tsquery(&self) -> String {
        self.0.join(" | ")
    }
}

impl EventListParams {
    /// Builds the parameters from decoded query pairs. A repeated key keeps
    /// its first value and unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "status" => &mut params.status,
                "eventType" => &mut params.event_type,
                "search" => &mut params.search,
                "location" => &mut params.location,
                "dateFilter" => &mut params.date_filter,
                "sortBy" => &mut params.sort_by,
                "sortOrder" => &mut params.sort_order,
                "page" => &mut params.page,
                "limit" => &mut params.limit,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        params
    }

    pub fn normalize(&self, max_limit: u32) -> FilterSpec {
        let status = present(&self.status).and_then(|s| match s.parse::<EventStatus>() {
            Ok(status) => Some(status),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring status filter");
                None
            }
        });

        FilterSpec {
            status,
            event_types: present(&self.event_type).and_then(parse_event_types),
            search: self.search.as_deref().and_then(SearchTerms::parse),
            city: present(&self.location).map(str::to_string),
            date_bucket: present(&self.date_filter).and_then(DateBucket::from_param),
            sort: SortSpec::from_params(self.sort_by.as_deref(), self.sort_order.as_deref()),
            page: PageRequest {
                page: positive(&self.page).unwrap_or(DEFAULT_PAGE),
                limit: positive(&self.limit)
                    .unwrap_or(DEFAULT_LIMIT)
                    .min(max_limit.max(1)),
            },
        }
    }
}

/// Trimmed value, or `None` when blank or the `all` sentinel.
fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(ALL))
}

fn positive(value: &Option<String>) -> Option<u32> {
    value
        .as_deref()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|v| *v > 0)
}

fn parse_event_types(raw: &str) -> Option<BTreeSet<EventType>> {
    let types: BTreeSet<EventType> = raw
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(|token| match token.parse::<EventType>() {
            Ok(t) => Some(t),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring event type token");
                None
            }
        })
        .collect();

    if types.is_empty() {
        None
    } else {
        Some(types)
    }
}
