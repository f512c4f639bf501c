//! Cache module for persisting the last known facts to disk
//!
//! The cache holds exactly one `Facts` record. It is replaced after every
//! successful fetch and read back only when the classifier is unavailable.

mod manager;

pub use manager::{CacheError, FactsCache};
