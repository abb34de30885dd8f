//! Backend test support utilities
//!
//! Shared by the backend's unit and integration tests: one-time logging
//! initialization and Problem Details response assertions.

pub mod logging;
pub mod problem_details;
