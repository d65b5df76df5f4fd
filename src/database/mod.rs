pub mod manager;
pub mod models;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager, DbPool};
pub use repository::MovieRepository;
