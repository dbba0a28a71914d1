//! Logbook — Journal bounded context.
//!
//! Responsible for event source registration, log writing, read
//! projections, pruning, and source deletion.

pub mod application;
pub mod domain;
