use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Curated list a user can browse when not searching
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    Trending,
    Popular,
    TopRated,
    Upcoming,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Trending => "trending",
            Category::Popular => "popular",
            Category::TopRated => "top_rated",
            Category::Upcoming => "upcoming",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseIntentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "trending" => Ok(Category::Trending),
            "popular" => Ok(Category::Popular),
            "top_rated" | "toprated" => Ok(Category::TopRated),
            "upcoming" => Ok(Category::Upcoming),
            _ => Err(ParseIntentError::new("category", s)),
        }
    }
}

/// Time window of the trending list
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TrendingWindow {
    #[default]
    Day,
    Week,
}

impl TrendingWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendingWindow::Day => "day",
            TrendingWindow::Week => "week",
        }
    }
}

impl fmt::Display for TrendingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrendingWindow {
    type Err = ParseIntentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "today" => Ok(TrendingWindow::Day),
            "week" => Ok(TrendingWindow::Week),
            _ => Err(ParseIntentError::new("trending window", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIntentError {
    kind: &'static str,
    value: String,
}

impl ParseIntentError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for ParseIntentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.kind, self.value)
    }
}

impl std::error::Error for ParseIntentError {}

/// What the user is currently asking to see.
///
/// The trending window is only carried for [`Category::Trending`]; every
/// other category has `window: None`, so two intents compare equal exactly
/// when they would hit the same endpoint with the same parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryIntent {
    Search {
        text: String,
    },
    Category {
        category: Category,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        window: Option<TrendingWindow>,
    },
}

impl QueryIntent {
    pub fn search(text: impl Into<String>) -> Self {
        QueryIntent::Search { text: text.into() }
    }

    pub fn category(category: Category, window: TrendingWindow) -> Self {
        let window = match category {
            Category::Trending => Some(window),
            _ => None,
        };
        QueryIntent::Category { category, window }
    }

    /// Resolve the active intent from the raw UI state.
    ///
    /// Non-blank search text wins over the category selection; the category
    /// and window are kept by the caller so they apply again once the text is
    /// cleared.
    pub fn effective(search_text: &str, category: Category, window: TrendingWindow) -> Self {
        let trimmed = search_text.trim();
        if trimmed.is_empty() {
            Self::category(category, window)
        } else {
            Self::search(trimmed)
        }
    }

    pub fn is_search(&self) -> bool {
        matches!(self, QueryIntent::Search { .. })
    }
}

impl Default for QueryIntent {
    fn default() -> Self {
        Self::category(Category::Trending, TrendingWindow::Day)
    }
}
