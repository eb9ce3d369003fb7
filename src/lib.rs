//! Autonomous pilots for grid-based light-cycle matches: a per-tick decision
//! engine, pluggable strategies, a deterministic local arena, and a multi-seed
//! benchmark harness.

pub mod arena;
pub mod benchmark;
pub mod grid;
pub mod runner;
pub mod space;
pub mod strategy;
pub mod util;
