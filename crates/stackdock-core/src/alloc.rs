//! Hash collections used across the engine.
//!
//! Re-exports of AHash-backed maps and sets; panel and station lookups go
//! through these.

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};
