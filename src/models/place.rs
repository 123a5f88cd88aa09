use serde::{Deserialize, Serialize};

/// A named attraction at a destination
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlaceOfInterest {
    pub name: String,
    /// Category tag such as "temple" or "museum"
    pub category: String,
    /// Rating between 0 and 5
    pub rating: f32,
}

impl PlaceOfInterest {
    #[must_use]
    pub fn new<S: Into<String>, C: Into<String>>(name: S, category: C, rating: f32) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            rating,
        }
    }

    /// One star per whole rating point
    #[must_use]
    pub fn stars(&self) -> String {
        stars(self.rating)
    }
}

/// Render a rating as a row of stars, truncating fractional points
#[must_use]
pub fn stars(rating: f32) -> String {
    let count = rating.clamp(0.0, 5.0).trunc() as usize;
    "⭐".repeat(count)
}
