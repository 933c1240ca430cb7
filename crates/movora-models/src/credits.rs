use serde::{Deserialize, Serialize};

use crate::movie::MovieId;
use crate::serde_util::null_as_default;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CastMember {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Character played (may be empty for uncredited roles)
    #[serde(default, deserialize_with = "null_as_default")]
    pub character: String,
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// Cast-bearing payload of the credits endpoint.
///
/// `cast` is in the provider's billing order. Crew is not modelled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credits {
    pub id: MovieId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cast: Vec<CastMember>,
}
