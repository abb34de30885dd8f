//! Error handling for the Éclaireur Public backend.

pub mod error_code;

pub use error_code::ErrorCode;
