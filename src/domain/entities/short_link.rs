//! Short link entity representing a code-to-URL mapping.

/// A short code paired with the URL it resolves to.
///
/// Instances are only produced by
/// [`LinkStore::create`](crate::application::services::LinkStore::create);
/// once issued, a mapping is never changed or removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub code: String,
    pub target: String,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(code: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            target: target.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_link_creation() {
        let link = ShortLink::new("1a2b3c4d", "https://example.com");

        assert_eq!(link.code, "1a2b3c4d");
        assert_eq!(link.target, "https://example.com");
    }
}
