use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};

use crate::config::Config;
use crate::store::EventStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EventStore>,
    pub listing: ListingSettings,
}

impl AppState {
    pub fn new(store: Arc<dyn EventStore>, config: &Config) -> Self {
        Self {
            store,
            listing: ListingSettings {
                calendar_offset: config.calendar_offset,
                max_page_limit: config.max_page_limit,
            },
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ListingSettings {
    pub calendar_offset: FixedOffset,
    pub max_page_limit: u32,
}

impl ListingSettings {
    /// Current instant in the configured calendar.
    pub fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.calendar_offset)
    }
}
