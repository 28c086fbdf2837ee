//! Convenience re-exports for the common case.

pub use crate::error::{ConfigError, DuplicateKeyError, KeyNotFoundError};
pub use crate::policy::lfu::LfuCache;
pub use crate::traits::{CoreCache, LfuCacheTrait, ReadOnlyCache};
