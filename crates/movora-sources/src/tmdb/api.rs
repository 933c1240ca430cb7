use movora_models::{MovieId, TrendingWindow};

/// Provider endpoints consumed by the client, with their parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint<'a> {
    Search { query: &'a str, page: u32 },
    Trending(TrendingWindow),
    Popular { page: u32 },
    TopRated { page: u32 },
    Upcoming { page: u32 },
    Details(MovieId),
    Credits(MovieId),
}

impl Endpoint<'_> {
    /// Path relative to the API base URL
    pub fn path(&self) -> String {
        match self {
            Endpoint::Search { .. } => "/search/movie".to_string(),
            Endpoint::Trending(window) => format!("/trending/movie/{}", window.as_str()),
            Endpoint::Popular { .. } => "/movie/popular".to_string(),
            Endpoint::TopRated { .. } => "/movie/top_rated".to_string(),
            Endpoint::Upcoming { .. } => "/movie/upcoming".to_string(),
            Endpoint::Details(id) => format!("/movie/{}", id),
            Endpoint::Credits(id) => format!("/movie/{}/credits", id),
        }
    }

    /// Endpoint-specific query parameters (the API key is added by the client)
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Endpoint::Search { query, page } => {
                vec![("query", query.to_string()), ("page", page.to_string())]
            }
            Endpoint::Popular { page } | Endpoint::TopRated { page } | Endpoint::Upcoming { page } => {
                vec![("page", page.to_string())]
            }
            Endpoint::Trending(_) | Endpoint::Details(_) | Endpoint::Credits(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::Search { query: "dune", page: 1 }.path(), "/search/movie");
        assert_eq!(Endpoint::Trending(TrendingWindow::Day).path(), "/trending/movie/day");
        assert_eq!(Endpoint::Trending(TrendingWindow::Week).path(), "/trending/movie/week");
        assert_eq!(Endpoint::Popular { page: 1 }.path(), "/movie/popular");
        assert_eq!(Endpoint::TopRated { page: 1 }.path(), "/movie/top_rated");
        assert_eq!(Endpoint::Upcoming { page: 1 }.path(), "/movie/upcoming");
        assert_eq!(Endpoint::Details(550).path(), "/movie/550");
        assert_eq!(Endpoint::Credits(550).path(), "/movie/550/credits");
    }

    #[test]
    fn test_endpoint_query_params() {
        assert_eq!(
            Endpoint::Search { query: "blade runner", page: 2 }.query(),
            vec![("query", "blade runner".to_string()), ("page", "2".to_string())]
        );
        assert_eq!(Endpoint::Upcoming { page: 1 }.query(), vec![("page", "1".to_string())]);
        assert!(Endpoint::Trending(TrendingWindow::Week).query().is_empty());
        assert!(Endpoint::Credits(1).query().is_empty());
    }
}
