//! SQLite storage implementation for cached videos.

mod model;
mod repository;

pub use model::VideoDB;
pub use repository::VideoRepository;
