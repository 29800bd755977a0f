//! SQLite storage implementation for the MiltonTV backend.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `miltontv-core` and contains:
//! - Database connection pooling and management
//! - Embedded Diesel migrations
//! - A single-writer actor that serializes all writes
//! - Repository implementations for channels and videos
//!
//! # Architecture
//!
//! This crate is the only place in the workspace where Diesel dependencies exist.
//!
//! ```text
//!        core (domain traits)
//!                  │
//!                  ▼
//!          storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod channels;
pub mod videos;

// Re-export database utilities
pub use db::{create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool, WriteHandle};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use channels::ChannelRepository;
pub use videos::VideoRepository;

// Re-export from miltontv-core for convenience
pub use miltontv_core::errors::{DatabaseError, Error, Result};
