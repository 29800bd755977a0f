//! SQLite storage implementation for the channel registry.

mod model;
mod repository;

pub use model::{ChannelDB, NewChannelDB};
pub use repository::ChannelRepository;
