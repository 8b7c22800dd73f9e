use core::fmt;

use rand::{Rng, rng};

/// The alphabet codes are drawn from: base62, in ASCII order.
pub const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Number of characters in every generated code.
///
/// 62^7 (~3.5e12) candidates make random collisions against a store holding
/// even millions of records astronomically unlikely, which is what lets the
/// oracle retry unboundedly instead of carrying a retry budget.
pub const CODE_LENGTH: usize = 7;

/// A fixed-length identifier that maps to a redirect target.
///
/// `ShortCode` is an opaque token: the crate never inspects its characters
/// after generation, so codes read back from an existing store are accepted
/// as-is even if they predate the current alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShortCode(String);

impl ShortCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ShortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ShortCode {
    fn from(code: &str) -> Self {
        Self(code.to_owned())
    }
}

impl From<String> for ShortCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

/// A source of candidate codes.
///
/// Implementations only produce well-formed candidates; uniqueness is the
/// oracle's concern. Keeping the draw behind a trait lets tests script exact
/// candidate sequences (including deliberate collisions).
pub trait CodeSource: Send + Sync + 'static {
    /// Draws one candidate code.
    fn draw(&self) -> ShortCode;
}

/// A `CodeSource` backed by the thread-local RNG (`rand::rng()`).
///
/// Each OS thread has its own RNG instance, so calls from multiple threads
/// are contention-free. This type does not store the RNG itself; it simply
/// accesses the thread-local generator on each call, which keeps it `Send`
/// and `Sync` even though `ThreadRng` is neither.
#[derive(Default, Clone, Debug)]
pub struct ThreadRandomCodes;

impl CodeSource for ThreadRandomCodes {
    fn draw(&self) -> ShortCode {
        let mut rng = rng();
        let code: String = (0..CODE_LENGTH)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();
        ShortCode(code)
    }
}
