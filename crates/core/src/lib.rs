//! Core library for taskdeck
//!
//! This crate contains the task store:
//! - Task model and list operations
//! - Display ordering of the two category lists
//! - File-backed snapshot persistence

pub mod error;
pub mod task;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
