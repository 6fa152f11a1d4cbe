//! Utility functions
//!
//! [`format_user_error`] turns fatal errors into a terminal message with
//! troubleshooting hints for the common broker and config failures.

pub mod errors;

pub use errors::format_user_error;
