use movora_config::ImageConfig;

/// Turns provider image paths into absolute CDN URLs.
///
/// Missing paths resolve to a placeholder; posters and people have different
/// placeholder assets, so the caller picks [`ImageResolver::poster`] or
/// [`ImageResolver::profile`]. Size tags are passed through unvalidated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResolver {
    base_url: String,
    poster_size: String,
    profile_size: String,
    poster_placeholder: String,
    profile_placeholder: String,
}

impl ImageResolver {
    pub fn new(base_url: impl Into<String>) -> Self {
        let defaults = ImageConfig::default();
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            poster_size: defaults.poster_size,
            profile_size: defaults.profile_size,
            poster_placeholder: defaults.poster_placeholder,
            profile_placeholder: defaults.profile_placeholder,
        }
    }

    pub fn from_config(config: &ImageConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            poster_size: config.poster_size.clone(),
            profile_size: config.profile_size.clone(),
            poster_placeholder: config.poster_placeholder.clone(),
            profile_placeholder: config.profile_placeholder.clone(),
        }
    }

    pub fn poster(&self, path: Option<&str>, size: &str) -> String {
        self.resolve(path, size).unwrap_or_else(|| self.poster_placeholder.clone())
    }

    /// Poster at the configured list size
    pub fn poster_default(&self, path: Option<&str>) -> String {
        self.poster(path, &self.poster_size)
    }

    pub fn profile(&self, path: Option<&str>, size: &str) -> String {
        self.resolve(path, size).unwrap_or_else(|| self.profile_placeholder.clone())
    }

    pub fn profile_default(&self, path: Option<&str>) -> String {
        self.profile(path, &self.profile_size)
    }

    fn resolve(&self, path: Option<&str>, size: &str) -> Option<String> {
        // Provider paths carry a leading slash ("/abc.jpg")
        let path = path?.trim().trim_start_matches('/');
        if path.is_empty() {
            return None;
        }
        Some(format!("{}/{}/{}", self.base_url, size, path))
    }
}

impl Default for ImageResolver {
    fn default() -> Self {
        Self::from_config(&ImageConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://image.tmdb.org/t/p";

    #[test]
    fn test_missing_path_uses_placeholder() {
        let resolver = ImageResolver::new(BASE);
        assert_eq!(resolver.poster(None, "w342"), "/placeholder-movie.jpg");
        assert_eq!(resolver.poster(Some(""), "w342"), "/placeholder-movie.jpg");
        assert_eq!(resolver.profile(None, "w185"), "/placeholder-person.jpg");
    }

    #[test]
    fn test_path_is_joined_with_size() {
        let resolver = ImageResolver::new(BASE);
        assert_eq!(
            resolver.poster(Some("/abc.jpg"), "w342"),
            "https://image.tmdb.org/t/p/w342/abc.jpg"
        );
        assert_eq!(
            resolver.profile(Some("/face.png"), "w185"),
            "https://image.tmdb.org/t/p/w185/face.png"
        );
    }

    #[test]
    fn test_path_without_leading_slash() {
        let resolver = ImageResolver::new(format!("{}/", BASE));
        assert_eq!(
            resolver.poster(Some("abc.jpg"), "original"),
            "https://image.tmdb.org/t/p/original/abc.jpg"
        );
    }

    #[test]
    fn test_default_sizes() {
        let resolver = ImageResolver::default();
        assert_eq!(
            resolver.poster_default(Some("/p.jpg")),
            "https://image.tmdb.org/t/p/w500/p.jpg"
        );
        assert_eq!(
            resolver.profile_default(Some("/f.jpg")),
            "https://image.tmdb.org/t/p/w185/f.jpg"
        );
    }

    #[test]
    fn test_configured_sizes() {
        let config = ImageConfig {
            poster_size: "w342".to_string(),
            profile_size: "w45".to_string(),
            ..ImageConfig::default()
        };
        let resolver = ImageResolver::from_config(&config);
        assert_eq!(
            resolver.poster_default(Some("/p.jpg")),
            "https://image.tmdb.org/t/p/w342/p.jpg"
        );
        assert_eq!(
            resolver.profile_default(Some("/f.jpg")),
            "https://image.tmdb.org/t/p/w45/f.jpg"
        );
        assert_eq!(resolver.poster_default(None), "/placeholder-movie.jpg");
    }

    #[test]
    fn test_configured_placeholders() {
        let config = ImageConfig {
            poster_placeholder: "https://cdn.example/none.png".to_string(),
            ..ImageConfig::default()
        };
        let resolver = ImageResolver::from_config(&config);
        assert_eq!(resolver.poster(None, "w500"), "https://cdn.example/none.png");
        assert_eq!(resolver.profile(None, "w185"), "/placeholder-person.jpg");
    }
}
