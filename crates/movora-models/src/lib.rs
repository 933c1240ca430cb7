pub mod credits;
pub mod detail;
pub mod intent;
pub mod movie;

mod serde_util;

pub use credits::{CastMember, Credits};
pub use detail::{AggregateDetail, Genre, MovieDetail};
pub use intent::{Category, ParseIntentError, QueryIntent, TrendingWindow};
pub use movie::{Movie, MovieId, MoviePage};
