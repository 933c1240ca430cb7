use serde::{Deserialize, Serialize};

use crate::serde_util::null_as_default;

/// Provider-assigned movie identifier, stable for the lifetime of the provider.
pub type MovieId = u64;

/// Summary of a movie as it appears in list and search results.
///
/// Identity is the `id`; two summaries with the same id describe the same movie
/// even if other fields differ between responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    /// ISO date (`YYYY-MM-DD`) or empty when the provider has none
    #[serde(default, deserialize_with = "null_as_default")]
    pub release_date: String,
    /// Average rating on the provider's 0-10 scale
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_average: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_count: u64,
}

impl Movie {
    /// Release year parsed from `release_date`, if present
    pub fn release_year(&self) -> Option<u32> {
        self.release_date.get(..4)?.parse().ok()
    }
}

/// One page of a list endpoint (`search`, `trending`, `popular`, ...).
///
/// Result order is the provider's order. Duplicated ids are kept as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MoviePage {
    #[serde(default)]
    pub page: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<Movie>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}
