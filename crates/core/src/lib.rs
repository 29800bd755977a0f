//! MiltonTV Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic of the backend: the channel
//! registry, the quote cache, and the video freshness and ranking
//! subsystem. It is database-agnostic and defines repository traits that
//! are implemented by the `storage-sqlite` crate; external APIs are reached
//! through the traits of the `providers` crate.

pub mod channels;
pub mod constants;
pub mod errors;
pub mod quotes;
pub mod videos;

#[cfg(test)]
mod test_support;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
