#![forbid(unsafe_code)]

//! Core domain model and scheduling logic for the Tengan ICL eye-drop
//! reminder.
//!
//! This crate provides:
//! - Domain types (medicines, surgery info, persisted schedule state)
//! - The fixed three-medicine catalog
//! - The schedule derivation engine (status, due medicines, next drop)
//! - The lifestyle precaution rule table
//! - Persistence, countdown helpers and deep-link builders

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod state;
pub mod engine;
pub mod precautions;
pub mod countdown;
pub mod links;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{catalog, ROTATION_ORDER};
pub use config::Config;
pub use engine::{
    derive_schedule, derive_status, mark_complete, reset_all_data, reset_today,
    set_surgery_info,
};
pub use precautions::precautions_for;
pub use countdown::{format_countdown, remaining_seconds};
pub use links::{google_calendar_link, timer_link, Platform};
