use serde::{Deserialize, Serialize};

use crate::credits::{CastMember, Credits};
use crate::movie::{Movie, MovieId};
use crate::serde_util::null_as_default;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Extended metadata for a single movie.
///
/// A superset of [`Movie`]: the summary fields are flattened in, so the same
/// provider payload deserializes into both. Zero means "unknown" for
/// `runtime`, `budget` and `revenue`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetail {
    #[serde(flatten)]
    pub movie: Movie,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub runtime: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<Genre>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub budget: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub revenue: u64,
    /// Release status as reported by the provider (e.g. "Released")
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    /// ISO 639-1 language code
    #[serde(default, deserialize_with = "null_as_default")]
    pub original_language: String,
}

impl MovieDetail {
    pub fn id(&self) -> MovieId {
        self.movie.id
    }

    /// Tagline with empty strings treated as absent
    pub fn tagline(&self) -> Option<&str> {
        self.tagline.as_deref().filter(|t| !t.trim().is_empty())
    }
}

/// A movie's detail joined with its cast.
///
/// Only ever built from a complete detail/credits pair; there is no way to
/// construct one with either half missing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AggregateDetail {
    pub movie_id: MovieId,
    pub detail: MovieDetail,
    /// Billing order, as returned by the provider
    pub cast: Vec<CastMember>,
}

impl AggregateDetail {
    pub fn new(detail: MovieDetail, credits: Credits) -> Self {
        Self {
            movie_id: detail.id(),
            detail,
            cast: credits.cast,
        }
    }
}
