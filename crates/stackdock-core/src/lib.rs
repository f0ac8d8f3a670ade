//! Stackdock Core
//!
//! Shared utilities for the stackdock docking engine: geometry, math
//! re-exports, hash collections, logging and profiling setup.

pub mod alloc;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;
