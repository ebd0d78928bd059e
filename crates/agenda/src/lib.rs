//! # Tutoría Agenda
//!
//! Scheduling logic for a tutoring marketplace. Tutors publish recurring
//! weekly availability, students turn those blocks into concrete class
//! requests, and tutors settle the requests. This crate owns the two pieces
//! that are easy to get wrong: building the timezone-correct weekly teaching
//! grid, and rejecting every request that collides with a newly accepted one.
//!
//! ## Architecture
//!
//! The crate is a pure service layer:
//!
//! - **Grid**: folds a reservation list into the fixed ten-row weekly grid,
//!   plus the "classes today" and "next class" dashboard summaries
//! - **Conflict**: detects same-instant collisions and runs the rejection
//!   cascade against the store
//! - **Requests**: tutor-side accept/reject lifecycle and status partitions
//! - **Booking**: student-side materialization of recurring blocks into
//!   concrete requests, and tutor-side block publishing
//! - **Config**: environment-driven settings such as the reference timezone
//!
//! All inputs arrive as arguments: the caller supplies the reservation
//! working set, the acting user's ids, the clock, and a store
//! implementation. Nothing here reads ambient session state.

/// Student-side booking flow and tutor-side availability publishing
pub mod booking;
/// Configuration from environment variables
pub mod config;
/// Same-instant conflict detection and the rejection cascade
pub mod conflict;
/// Weekly grid construction and dashboard summaries
pub mod grid;
/// Tutor-side request lifecycle
pub mod requests;

use eyre::Result;
use tracing_subscriber::FmtSubscriber;

pub use config::AgendaConfig;
pub use conflict::CascadeOutcome;
pub use grid::{WeeklyAgenda, build_agenda, build_agenda_now};

/// Installs the global tracing subscriber at the configured level.
///
/// Call once at startup; calling again returns an error because the global
/// subscriber can only be set once per process.
pub fn init_tracing(config: &AgendaConfig) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
