//! HTTP backend for a college event aggregator.
//!
//! Serves event listings with search, faceted filters, sorting and
//! pagination, plus event detail and submission, backed by PostgreSQL.

pub mod config;
pub mod handlers;
pub mod models;
pub mod query;
pub mod routes;
pub mod state;
pub mod store;
pub mod utils;
