//! Short code generation.
//!
//! Codes are drawn from the operating system CSPRNG and hex-encoded, so every
//! code uses the lowercase alphabet `[0-9a-f]`.

/// Default number of characters in a generated short code.
pub const DEFAULT_CODE_LENGTH: usize = 8;

/// Produces candidate short codes.
///
/// Implementations are pure generators: uniqueness is checked by the
/// [`LinkStore`](crate::application::services::LinkStore), not here.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Returns a fresh candidate code.
    fn generate(&self) -> String;

    /// Number of characters in every code this generator returns.
    fn code_length(&self) -> usize;
}

/// Cryptographically secure generator of fixed-length hex codes.
#[derive(Debug, Clone)]
pub struct RandomHexGenerator {
    length: usize,
}

impl RandomHexGenerator {
    /// Creates a generator producing codes of exactly `length` characters.
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Default for RandomHexGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

impl CodeGenerator for RandomHexGenerator {
    /// Generates a random hex code.
    ///
    /// Draws `ceil(length / 2)` bytes from `getrandom`, hex-encodes them and
    /// truncates to `length` characters.
    ///
    /// # Panics
    ///
    /// Panics if the system random number generator fails (extremely rare).
    fn generate(&self) -> String {
        let mut buffer = vec![0u8; self.length.div_ceil(2)];

        getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

        let mut code = hex::encode(buffer);
        code.truncate(self.length);
        code
    }

    fn code_length(&self) -> usize {
        self.length
    }
}
