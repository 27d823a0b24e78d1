//! # Cityclock Library
//!
//! Internal library for the cityclock binary: a small world-clock web service
//! serving per-city local time, a coarse day-phase label, and a synthetic
//! sunrise/sunset window over HTML and JSON.
//!
//! ## Architecture
//!
//! - **Registry**: `registry` holds the immutable city table, built and
//!   validated once at startup
//! - **Core**: `clock` resolves wall-clock fields per city, `phase`
//!   classifies the local hour, `sun` produces the synthetic sun window
//! - **HTTP**: `server` dispatches the three routes and owns the accept loop;
//!   `server::page` renders the index page
//! - **Infrastructure**: `config` for TOML settings, `args` for CLI parsing,
//!   `time_source` for the injectable clock, `logger` for structured output

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod args;
pub mod clock;
pub mod config;
pub mod phase;
pub mod registry;
pub mod server;
pub mod sun;
pub mod time_source;
