//! Presentation helpers shared by every front end.
//!
//! Zero is the provider's "unknown" value for runtime, budget and revenue, so
//! the formatters return `None` for it rather than printing "0".

use chrono::NaiveDate;
use movora_models::{CastMember, Category, QueryIntent, TrendingWindow};
use serde::Serialize;

/// Heading for the list produced by `intent`
pub fn list_title(intent: &QueryIntent) -> String {
    match intent {
        QueryIntent::Search { text } => format!("Search Results for \"{}\"", text),
        QueryIntent::Category { category, window } => match category {
            Category::Trending => match window.unwrap_or_default() {
                TrendingWindow::Day => "Trending Today".to_string(),
                TrendingWindow::Week => "Trending This Week".to_string(),
            },
            Category::Popular => "Popular Movies".to_string(),
            Category::TopRated => "Top Rated Movies".to_string(),
            Category::Upcoming => "Upcoming Movies".to_string(),
        },
    }
}

/// Subheading under the list title; only shown for a settled, non-empty list
pub fn results_found(count: usize, loading: bool) -> Option<String> {
    if loading || count == 0 {
        return None;
    }
    Some(format!("{} movies found", count))
}

pub fn format_runtime(minutes: u32) -> Option<String> {
    match (minutes / 60, minutes % 60) {
        (0, 0) => None,
        (0, m) => Some(format!("{}m", m)),
        (h, m) => Some(format!("{}h {}m", h, m)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingTier {
    High,
    Medium,
    Low,
}

pub fn rating_tier(vote_average: f64) -> RatingTier {
    if vote_average >= 8.0 {
        RatingTier::High
    } else if vote_average >= 6.0 {
        RatingTier::Medium
    } else {
        RatingTier::Low
    }
}

/// "2024-01-05" becomes "January 5, 2024". Unparseable input is returned as is.
pub fn format_release_date(date: &str) -> Option<String> {
    let date = date.trim();
    if date.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => Some(parsed.format("%B %-d, %Y").to_string()),
        Err(_) => Some(date.to_string()),
    }
}

/// Whole US dollars with thousands separators
pub fn format_money(amount: u64) -> Option<String> {
    if amount == 0 {
        return None;
    }

    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    Some(out)
}

pub fn top_billed(cast: &[CastMember], limit: usize) -> &[CastMember] {
    &cast[..cast.len().min(limit)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: u64) -> CastMember {
        CastMember {
            id,
            name: format!("Actor {}", id),
            character: String::new(),
            profile_path: None,
        }
    }

    #[test]
    fn test_list_titles() {
        assert_eq!(list_title(&QueryIntent::search("dune")), "Search Results for \"dune\"");
        assert_eq!(
            list_title(&QueryIntent::category(Category::Trending, TrendingWindow::Day)),
            "Trending Today"
        );
        assert_eq!(
            list_title(&QueryIntent::category(Category::Trending, TrendingWindow::Week)),
            "Trending This Week"
        );
        assert_eq!(
            list_title(&QueryIntent::category(Category::TopRated, TrendingWindow::Week)),
            "Top Rated Movies"
        );
    }

    #[test]
    fn test_results_found() {
        assert_eq!(results_found(20, false).as_deref(), Some("20 movies found"));
        assert_eq!(results_found(20, true), None);
        assert_eq!(results_found(0, false), None);
    }

    #[test]
    fn test_format_runtime() {
        assert_eq!(format_runtime(125).as_deref(), Some("2h 5m"));
        assert_eq!(format_runtime(120).as_deref(), Some("2h 0m"));
        assert_eq!(format_runtime(45).as_deref(), Some("45m"));
        assert_eq!(format_runtime(0), None);
    }

    #[test]
    fn test_rating_tier_boundaries() {
        assert_eq!(rating_tier(8.0), RatingTier::High);
        assert_eq!(rating_tier(7.99), RatingTier::Medium);
        assert_eq!(rating_tier(6.0), RatingTier::Medium);
        assert_eq!(rating_tier(5.9), RatingTier::Low);
        assert_eq!(rating_tier(0.0), RatingTier::Low);
    }

    #[test]
    fn test_format_release_date() {
        assert_eq!(format_release_date("2024-01-05").as_deref(), Some("January 5, 2024"));
        assert_eq!(format_release_date("2021-10-22").as_deref(), Some("October 22, 2021"));
        assert_eq!(format_release_date("2024").as_deref(), Some("2024"));
        assert_eq!(format_release_date("  "), None);
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1_234_567).as_deref(), Some("$1,234,567"));
        assert_eq!(format_money(165_000_000).as_deref(), Some("$165,000,000"));
        assert_eq!(format_money(999).as_deref(), Some("$999"));
        assert_eq!(format_money(1000).as_deref(), Some("$1,000"));
        assert_eq!(format_money(0), None);
    }

    #[test]
    fn test_top_billed_keeps_order() {
        let cast: Vec<_> = (1..=10).map(member).collect();
        let top: Vec<u64> = top_billed(&cast, 8).iter().map(|c| c.id).collect();
        assert_eq!(top, (1..=8).collect::<Vec<_>>());
        assert_eq!(top_billed(&cast[..3], 8).len(), 3);
    }
}
