#![forbid(unsafe_code)]

//! Core domain model and business logic for the Wayly washroom finder.
//!
//! This crate provides:
//! - Domain types (facilities, movement profiles, routes, views)
//! - The facility catalog
//! - The filter engine and route scoring engine
//! - The advisory cache and debounced fetch trigger
//! - Session state coordination
//!
//! Map rendering, marker display, and the real advisory backend live
//! outside this crate; the CLI (or any other display layer) drives the
//! session with intents and renders what the queries return.

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod filter;
pub mod engine;
pub mod advisory;
pub mod trigger;
pub mod session;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog, Catalog};
pub use config::Config;
pub use filter::filter_facilities;
pub use engine::{compute_routes, estimate_duration_minutes};
pub use advisory::{
    advisory_cache_key, AdvisoryCache, AdvisoryError, AdvisoryGenerator, NotesAdvisor,
};
pub use trigger::{AdvisoryTrigger, DEFAULT_DEBOUNCE};
pub use session::{Intent, SessionState};
