//! # Agenda Configuration Module
//!
//! This module loads configuration for the scheduling layer from
//! environment variables, providing defaults where appropriate.
//!
//! ## Environment Variables
//!
//! - `AGENDA_TIMEZONE`: IANA name of the reference timezone all wall-clock
//!   scheduling happens in (default: "America/Santiago")
//! - `LOG_LEVEL`: Logging level (default: "info")

use std::env;

use chrono_tz::Tz;
use eyre::{Result, eyre};
use tracing::Level;

/// Reference timezone used when none is configured. The institution
/// schedules in Chilean wall-clock time.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Santiago;

/// Configuration for the scheduling layer.
///
/// The reference timezone is deliberately a single global setting rather
/// than a per-user one: the grid rows and block hours are wall-clock
/// agreements in the institution's timezone, and everyone sees the same
/// grid.
#[derive(Debug, Clone)]
pub struct AgendaConfig {
    /// Timezone all grid placement and block materialization happens in
    pub reference_timezone: Tz,

    /// Log level for the application
    pub log_level: Level,
}

impl AgendaConfig {
    /// Creates an AgendaConfig from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `AGENDA_TIMEZONE` is set to something that is
    /// not a valid IANA timezone name. An unparseable `LOG_LEVEL` falls
    /// back to "info" instead of failing.
    pub fn from_env() -> Result<Self> {
        let reference_timezone = match env::var("AGENDA_TIMEZONE") {
            Ok(name) => name
                .parse::<Tz>()
                .map_err(|_| eyre!("Invalid AGENDA_TIMEZONE value: {name}"))?,
            Err(_) => DEFAULT_TIMEZONE,
        };

        let log_level = env::var("LOG_LEVEL")
            .unwrap_or_else(|_| "info".to_string())
            .parse::<Level>()
            .unwrap_or(Level::INFO);

        Ok(Self {
            reference_timezone,
            log_level,
        })
    }
}

impl Default for AgendaConfig {
    fn default() -> Self {
        Self {
            reference_timezone: DEFAULT_TIMEZONE,
            log_level: Level::INFO,
        }
    }
}
