// Shared types used across the codebase

/// Primary key of a movie row, assigned by the store
pub type MovieId = i64;

/// Upper bound for every string column of the `movie` table
pub const MAX_STRING_LENGTH: usize = 255;
