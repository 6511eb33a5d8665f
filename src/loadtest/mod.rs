//! Loadtest command handlers.
//!
//! This module contains handlers for the populate and lifecycle commands.

pub mod lifecycle;
pub mod populate;

pub use lifecycle::run_lifecycle;
pub use populate::run_populate;
