//! In-memory short link store.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::config::Config;
use crate::domain::entities::ShortLink;
use crate::utils::code_generator::{CodeGenerator, RandomHexGenerator};
use crate::utils::url_validator::{InvalidUrl, PatternValidator, UrlValidator};

/// Default cap on consecutive code collisions before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Errors produced by [`LinkStore`] operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    InvalidUrl(#[from] InvalidUrl),

    #[error("Record with code '{0}' does not exist")]
    NotFound(String),

    #[error("Failed to generate a unique code after {attempts} attempts")]
    CodeSpaceExhausted { attempts: usize },

    #[error("Link store lock poisoned")]
    LockPoisoned,
}

/// Owner of every code-to-URL mapping in the process.
///
/// Lookups share a read lock. [`create`](Self::create) holds the write lock
/// across the whole generate-check-insert sequence, so two creates can never
/// observe the same free code.
pub struct LinkStore {
    links: RwLock<HashMap<String, String>>,
    generator: Box<dyn CodeGenerator>,
    validator: Box<dyn UrlValidator>,
    max_attempts: usize,
}

impl LinkStore {
    /// Creates an empty store.
    pub fn new(generator: Box<dyn CodeGenerator>, validator: Box<dyn UrlValidator>) -> Self {
        Self {
            links: RwLock::new(HashMap::new()),
            generator,
            validator,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Builds the store described by the service configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Box::new(RandomHexGenerator::new(config.code_length)),
            config.url_validation.validator(),
        )
        .with_max_attempts(config.max_generation_attempts)
    }

    /// Overrides the collision retry cap (at least one attempt is always made).
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Length of the codes this store hands out.
    pub fn code_length(&self) -> usize {
        self.generator.code_length()
    }

    /// Validates `target` and maps it to a freshly generated code.
    ///
    /// # Collisions
    ///
    /// A candidate code that is already mapped is logged and replaced with a
    /// new one, up to `max_attempts` candidates in total.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidUrl`] if the validator rejects `target`
    /// - [`StoreError::CodeSpaceExhausted`] if every candidate collided
    /// - [`StoreError::LockPoisoned`] if a writer panicked while holding the lock
    ///
    /// Nothing is inserted on error.
    pub fn create(&self, target: &str) -> Result<ShortLink, StoreError> {
        self.validator.validate(target)?;

        let mut links = self.links.write().map_err(|_| {
            tracing::error!("Link store write lock poisoned");
            StoreError::LockPoisoned
        })?;

        for attempt in 1..=self.max_attempts {
            let code = self.generator.generate();

            if links.contains_key(&code) {
                tracing::warn!(
                    code = %code,
                    attempt,
                    stored = links.len(),
                    "Short code collision, consider raising CODE_LENGTH"
                );
                continue;
            }

            links.insert(code.clone(), target.to_string());
            return Ok(ShortLink::new(code, target));
        }

        tracing::error!(
            attempts = self.max_attempts,
            stored = links.len(),
            "Gave up generating a unique short code"
        );

        Err(StoreError::CodeSpaceExhausted {
            attempts: self.max_attempts,
        })
    }

    /// Returns the target stored under `code`.
    ///
    /// Matching is exact and case-sensitive; the target is returned verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no mapping exists.
    pub fn resolve(&self, code: &str) -> Result<String, StoreError> {
        let links = self.links.read().map_err(|_| {
            tracing::error!("Link store read lock poisoned");
            StoreError::LockPoisoned
        })?;

        links
            .get(code)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(code.to_string()))
    }

    /// Number of stored mappings.
    ///
    /// Counting is still meaningful after a writer panicked, so a poisoned
    /// lock is logged and its guard recovered.
    pub fn len(&self) -> usize {
        let links = self.links.read().unwrap_or_else(|poisoned| {
            tracing::error!("Link store read lock poisoned");
            poisoned.into_inner()
        });
        links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for LinkStore {
    fn default() -> Self {
        Self::new(
            Box::new(RandomHexGenerator::default()),
            Box::new(PatternValidator),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::code_generator::MockCodeGenerator;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Generator that replays `codes` in order, then repeats the last one.
    fn scripted_generator(codes: &'static [&'static str]) -> MockCodeGenerator {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut generator = MockCodeGenerator::new();
        generator.expect_generate().returning(move || {
            let i = calls.fetch_add(1, Ordering::SeqCst);
            codes[i.min(codes.len() - 1)].to_string()
        });
        generator.expect_code_length().return_const(8usize);
        generator
    }

    #[test]
    fn test_create_then_resolve_round_trip() {
        let store = LinkStore::default();

        for url in [
            "http://example.com",
            "https://google.com/search?q=test",
            "http://localhost:8080/a/b",
        ] {
            let link = store.create(url).unwrap();
            assert_eq!(link.target, url);
            assert_eq!(link.code.len(), 8);
            assert_eq!(store.resolve(&link.code).unwrap(), url);
        }

        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_create_rejects_invalid_urls() {
        let store = LinkStore::default();

        for url in ["", "not-a-url", "example.com", "http://bad_host.com"] {
            let result = store.create(url);
            assert!(
                matches!(result, Err(StoreError::InvalidUrl(_))),
                "'{}' should be rejected",
                url
            );
        }

        assert!(store.is_empty());
    }

    #[test]
    fn test_resolve_unknown_code() {
        let store = LinkStore::default();

        let result = store.resolve("deadbeef");
        assert!(matches!(result, Err(StoreError::NotFound(code)) if code == "deadbeef"));
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let store = LinkStore::new(
            Box::new(scripted_generator(&["abcdef12"])),
            Box::new(PatternValidator),
        );

        let link = store.create("http://example.com").unwrap();
        assert_eq!(link.code, "abcdef12");

        let result = store.resolve(&link.code.to_uppercase());
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_resolve_is_repeatable() {
        let store = LinkStore::default();
        let link = store.create("https://example.com/page").unwrap();

        let first = store.resolve(&link.code).unwrap();
        let second = store.resolve(&link.code).unwrap();

        assert_eq!(first, second);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_create_retries_on_collision() {
        let store = LinkStore::new(
            Box::new(scripted_generator(&["aaaaaaaa", "aaaaaaaa", "aaaaaaaa", "bbbbbbbb"])),
            Box::new(PatternValidator),
        );

        let first = store.create("http://one.example.com").unwrap();
        let second = store.create("http://two.example.com").unwrap();

        assert_eq!(first.code, "aaaaaaaa");
        assert_eq!(second.code, "bbbbbbbb");
        assert_eq!(store.resolve("aaaaaaaa").unwrap(), "http://one.example.com");
        assert_eq!(store.resolve("bbbbbbbb").unwrap(), "http://two.example.com");
    }

    #[test]
    fn test_create_gives_up_after_max_attempts() {
        let store = LinkStore::new(
            Box::new(scripted_generator(&["aaaaaaaa"])),
            Box::new(PatternValidator),
        )
        .with_max_attempts(3);

        store.create("http://one.example.com").unwrap();
        let result = store.create("http://two.example.com");

        assert!(matches!(
            result,
            Err(StoreError::CodeSpaceExhausted { attempts: 3 })
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_invalid_url_does_not_consume_generator() {
        let mut generator = MockCodeGenerator::new();
        generator.expect_generate().times(0);

        let store = LinkStore::new(Box::new(generator), Box::new(PatternValidator));

        assert!(store.create("ftp://example.com").is_err());
    }

    #[test]
    fn test_len_survives_poisoned_lock() {
        let store = Arc::new(LinkStore::default());
        store.create("http://example.com").unwrap();

        let poisoner = Arc::clone(&store);
        let result = std::thread::spawn(move || {
            let _guard = poisoner.links.write().unwrap();
            panic!("writer panicked");
        })
        .join();
        assert!(result.is_err());

        assert_eq!(store.len(), 1);
        assert!(!store.is_empty());
        assert!(matches!(
            store.create("http://other.example.com"),
            Err(StoreError::LockPoisoned)
        ));
    }

    #[test]
    fn test_concurrent_creates_produce_distinct_codes() {
        let store = Arc::new(LinkStore::default());

        let handles: Vec<_> = (0..128)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    store
                        .create(&format!("https://example.com/{}", i))
                        .unwrap()
                        .code
                })
            })
            .collect();

        let codes: HashSet<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(codes.len(), 128);
        assert_eq!(store.len(), 128);
    }
}
