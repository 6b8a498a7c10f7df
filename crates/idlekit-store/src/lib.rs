//! idlekit Store - Persistence collaborator boundary
//!
//! This crate defines the contract the engine needs from whatever holds
//! durable state, and ships an in-process reference implementation:
//! - `PlayerStore`: async trait over player rows, ownership rows and the
//!   upgrade table
//! - `MemoryStore`: HashMap-backed store for tests, benchmarks and demos
//!
//! The collaborator is responsible for durability only; it never applies
//! game rules.

pub mod store;
pub mod memory;

pub use store::*;
pub use memory::*;
