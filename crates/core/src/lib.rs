//! Core business logic for lectureboard.

pub mod services;

pub use services::*;
