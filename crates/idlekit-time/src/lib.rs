//! idlekit Time - Wall clock abstraction and offline progress
//!
//! This crate supplies the engine's only two time-dependent pieces:
//! - `Clock`: the single source of "now" (system-backed or manual)
//! - `resolve_offline`: currency credit for real time elapsed between
//!   checkpoints, clamped and floored

pub mod clock;
pub mod offline;

pub use clock::*;
pub use offline::*;
