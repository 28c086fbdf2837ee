//! Error types for the lfukit library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when cache configuration parameters are
//!   invalid (zero capacity).
//! - [`DuplicateKeyError`]: Returned by `insert` when the key is already
//!   present; this cache does not update through `insert`.
//! - [`KeyNotFoundError`]: Returned by `get` when the key is absent.
//!
//! Both precondition errors are signaled before any state is mutated, so a
//! failed operation leaves the cache untouched.
//!
//! ## Example Usage
//!
//! ```
//! use lfukit::error::ConfigError;
//! use lfukit::policy::lfu::LfuCache;
//!
//! let cache: Result<LfuCache<u64, u64>, ConfigError> = LfuCache::new(100);
//! assert!(cache.is_ok());
//!
//! // Zero capacity is caught without panicking.
//! let bad = LfuCache::<u64, u64>::new(0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by [`LfuCache::new`](crate::policy::lfu::LfuCache::new) when
/// `capacity == 0`. Carries a human-readable description of which parameter
/// failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// DuplicateKeyError
// ---------------------------------------------------------------------------

/// Error returned by `insert` when the key is already present.
///
/// Updating an existing key's value is out of scope for this cache; callers
/// that need upsert semantics check [`contains`](crate::policy::lfu::LfuCache::contains)
/// first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateKeyError;

impl fmt::Display for DuplicateKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("key already exists")
    }
}

impl std::error::Error for DuplicateKeyError {}

// ---------------------------------------------------------------------------
// KeyNotFoundError
// ---------------------------------------------------------------------------

/// Error returned by `get` when the key is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyNotFoundError;

impl fmt::Display for KeyNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("key not found")
    }
}

impl std::error::Error for KeyNotFoundError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("capacity must be > 0");
        assert_eq!(err.to_string(), "capacity must be > 0");
    }

    #[test]
    fn config_message_accessor() {
        let err = ConfigError::new("test");
        assert_eq!(err.message(), "test");
    }

    #[test]
    fn config_clone_and_eq() {
        let a = ConfigError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    // -- DuplicateKeyError ------------------------------------------------

    #[test]
    fn duplicate_display() {
        assert_eq!(DuplicateKeyError.to_string(), "key already exists");
    }

    #[test]
    fn duplicate_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<DuplicateKeyError>();
    }

    // -- KeyNotFoundError -------------------------------------------------

    #[test]
    fn not_found_display() {
        assert_eq!(KeyNotFoundError.to_string(), "key not found");
    }

    #[test]
    fn not_found_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<KeyNotFoundError>();
    }
}
