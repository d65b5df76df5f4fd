pub mod extract;
pub mod schema;

pub use extract::{JsonBody, ProductId};
pub use schema::{describe, load_new_movie, load_patch, FieldErrors};
