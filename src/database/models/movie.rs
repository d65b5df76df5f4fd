use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::types::MovieId;

/// A persisted row of the `movie` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Movie {
    pub id: MovieId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub inventory_quantity: i64,
    pub image: Option<String>,
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} @ {:.2} ({} in stock)", self.id, self.name, self.price, self.inventory_quantity)
    }
}

/// A validated movie that has not been stored yet (no id)
#[derive(Debug, Clone, PartialEq)]
pub struct NewMovie {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub inventory_quantity: i64,
    pub image: Option<String>,
}

/// Field overwrites for an existing movie.
///
/// `None` means "key absent, keep the stored value". For the nullable columns
/// `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoviePatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub price: Option<f64>,
    pub inventory_quantity: Option<i64>,
    pub image: Option<Option<String>>,
}

impl MoviePatch {
    pub fn is_empty(&self) -> bool {
        *self == MoviePatch::default()
    }

    /// Overwrite each field of `movie` that this patch carries.
    pub fn apply(self, movie: &mut Movie) {
        if let Some(name) = self.name {
            movie.name = name;
        }
        if let Some(description) = self.description {
            movie.description = description;
        }
        if let Some(price) = self.price {
            movie.price = price;
        }
        if let Some(inventory_quantity) = self.inventory_quantity {
            movie.inventory_quantity = inventory_quantity;
        }
        if let Some(image) = self.image {
            movie.image = image;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alien() -> Movie {
        Movie {
            id: 1,
            name: "Alien".into(),
            description: Some("In space no one can hear you scream".into()),
            price: 12.5,
            inventory_quantity: 3,
            image: None,
        }
    }

    #[test]
    fn price_only_patch_leaves_other_fields() {
        let patch = MoviePatch {
            price: Some(9.99),
            ..Default::default()
        };
        let mut movie = alien();
        patch.apply(&mut movie);

        assert_eq!(movie.price, 9.99);
        assert_eq!(movie.name, "Alien");
        assert_eq!(movie.description.as_deref(), Some("In space no one can hear you scream"));
        assert_eq!(movie.inventory_quantity, 3);
        assert_eq!(movie.image, None);
    }

    #[test]
    fn explicit_none_clears_nullable_fields() {
        let patch = MoviePatch {
            description: Some(None),
            image: Some(Some("/img/alien.jpg".into())),
            ..Default::default()
        };
        let mut movie = alien();
        patch.apply(&mut movie);

        assert_eq!(movie.description, None);
        assert_eq!(movie.image.as_deref(), Some("/img/alien.jpg"));
    }

    #[test]
    fn default_patch_is_empty() {
        assert!(MoviePatch::default().is_empty());
        assert!(!MoviePatch {
            inventory_quantity: Some(0),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn display_is_human_readable() {
        assert_eq!(alien().to_string(), "#1 Alien @ 12.50 (3 in stock)");
    }
}
