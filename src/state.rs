use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::{DatabaseManager, MovieRepository};

/// Application context shared by all handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference counted and the config is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub database: DatabaseManager,
    pub movies: MovieRepository,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(database: DatabaseManager, config: AppConfig) -> Self {
        let movies = MovieRepository::new(database.pool().clone());
        Self {
            database,
            movies,
            config: Arc::new(config),
        }
    }
}
