//! Cache module for holding API responses in memory
//!
//! This module provides a response cache keyed by logical resource name with a
//! fixed time-to-live. Expired entries are treated as absent but are never
//! evicted; the next `set` for the same key simply overwrites them.

mod clock;
mod manager;

pub use clock::{Clock, ManualClock, SystemClock};
pub use manager::{ResponseCache, CACHE_TTL};
