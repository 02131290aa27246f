//! Domain services used by HTTP routes and the CLI.
//!
//! ARCHITECTURE
//! ============
//! Service modules own loading and session logic so route handlers can stay
//! focused on protocol translation.

pub mod catalog;
pub mod survey;
