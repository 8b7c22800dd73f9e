//! Frequency-ranked cache overlay for code→target lookups.
//!
//! The overlay pairs two structures behind one coordinator:
//!
//! - [`CacheFrontend`] - a TTL'd code→target store (the fast path before the
//!   persistent store)
//! - [`FrequencyTracker`] - an access-score index used to pick
//!   least-frequently-used eviction victims under capacity pressure
//!
//! A cache slot and its frequency entry are created and destroyed together;
//! [`CacheCoordinator`] owns both under a single lock so the capacity bound
//! holds at every point an observer can see.

mod coordinator;
mod frontend;
mod hits;
mod tracker;

pub use coordinator::*;
pub use frontend::*;
pub use hits::*;
pub use tracker::*;

use core::time::Duration;

/// Default number of code→target pairs the overlay retains.
pub const DEFAULT_CACHE_CAPACITY: usize = 10;

/// Default slot lifetime: 24 hours.
pub const DEFAULT_TTL: Duration = Duration::from_secs(86_400);
