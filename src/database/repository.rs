use tracing::debug;

use crate::database::manager::{with_pool, DatabaseError, DbPool};
use crate::database::models::{Movie, NewMovie};
use crate::types::MovieId;

const MOVIE_COLUMNS: &str = "id, name, description, price, inventory_quantity, image";

/// Row-level access to the `movie` table. Every method is a single statement.
#[derive(Clone)]
pub struct MovieRepository {
    pool: DbPool,
}

impl MovieRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn select_all(&self) -> Result<Vec<Movie>, DatabaseError> {
        let sql = format!("SELECT {MOVIE_COLUMNS} FROM movie ORDER BY id");
        let rows = with_pool!(&self.pool, pool => {
            sqlx::query_as::<_, Movie>(&sql).fetch_all(pool).await
        })?;
        debug!("Selected {} movies", rows.len());
        Ok(rows)
    }

    pub async fn select_one(&self, id: MovieId) -> Result<Option<Movie>, DatabaseError> {
        let sql = format!("SELECT {MOVIE_COLUMNS} FROM movie WHERE id = $1");
        let row = with_pool!(&self.pool, pool => {
            sqlx::query_as::<_, Movie>(&sql).bind(id).fetch_optional(pool).await
        })?;
        Ok(row)
    }

    pub async fn select_404(&self, id: MovieId) -> Result<Movie, DatabaseError> {
        self.select_one(id).await?.ok_or_else(|| not_found(id))
    }

    pub async fn insert(&self, movie: &NewMovie) -> Result<Movie, DatabaseError> {
        let sql = format!(
            "INSERT INTO movie (name, description, price, inventory_quantity, image) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {MOVIE_COLUMNS}"
        );
        let row = with_pool!(&self.pool, pool => {
            sqlx::query_as::<_, Movie>(&sql)
                .bind(movie.name.as_str())
                .bind(movie.description.as_deref())
                .bind(movie.price)
                .bind(movie.inventory_quantity)
                .bind(movie.image.as_deref())
                .fetch_one(pool)
                .await
        })?;
        debug!("Inserted movie {}", row);
        Ok(row)
    }

    /// Write every mutable column of `movie` back to its row.
    pub async fn update(&self, movie: &Movie) -> Result<Movie, DatabaseError> {
        let sql = format!(
            "UPDATE movie SET name = $1, description = $2, price = $3, inventory_quantity = $4, image = $5 \
             WHERE id = $6 RETURNING {MOVIE_COLUMNS}"
        );
        let row = with_pool!(&self.pool, pool => {
            sqlx::query_as::<_, Movie>(&sql)
                .bind(movie.name.as_str())
                .bind(movie.description.as_deref())
                .bind(movie.price)
                .bind(movie.inventory_quantity)
                .bind(movie.image.as_deref())
                .bind(movie.id)
                .fetch_optional(pool)
                .await
        })?
        .ok_or_else(|| not_found(movie.id))?;
        debug!("Updated movie {}", row);
        Ok(row)
    }

    pub async fn delete(&self, id: MovieId) -> Result<(), DatabaseError> {
        let rows_affected = with_pool!(&self.pool, pool => {
            sqlx::query("DELETE FROM movie WHERE id = $1")
                .bind(id)
                .execute(pool)
                .await
                .map(|result| result.rows_affected())
        })?;
        if rows_affected == 0 {
            return Err(not_found(id));
        }
        debug!("Deleted movie #{}", id);
        Ok(())
    }
}

fn not_found(id: MovieId) -> DatabaseError {
    DatabaseError::NotFound(format!("movie {} not found", id))
}
