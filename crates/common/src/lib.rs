//! Common utilities and shared types for lectureboard.
//!
//! This crate provides foundational components used across all lectureboard
//! crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **ID Generation**: ULID-based unique identifiers via [`IdGenerator`]
//!
//! # Example
//!
//! ```no_run
//! use lectureboard_common::{Config, IdGenerator, AppResult};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     let id_gen = IdGenerator::new();
//!     let id = id_gen.generate();
//!     println!("Generated ID: {}", id);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod id;

pub use config::{
    AdminConfig, Config, DatabaseConfig, SchedulerConfig, ServerConfig, SummarizerConfig,
};
pub use error::{AppError, AppResult};
pub use id::IdGenerator;
