//! Backend test support utilities
//!
//! Shared by the backend's unit and integration tests: one logging
//! initializer and assertions for the Problem Details error contract.

pub mod logging;
pub mod problem_details;
