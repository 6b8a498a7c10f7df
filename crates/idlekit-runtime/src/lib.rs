//! idlekit Runtime - Service orchestration and session reconciliation
//!
//! This crate ties the engines to the outside world:
//! - `GameService`: the request/response surface (login, checkpoint save,
//!   shop listing, purchase, prestige, leaderboard), each operation one
//!   atomic pass over the persistence collaborator under a per-player lock
//! - `ClientSession`: the client-side currency cache with its defined
//!   invalidation points
//! - `PlayerLocks`: per-key mutual exclusion; cross-player operations run
//!   fully in parallel

pub mod locks;
pub mod service;
pub mod session;

pub use locks::*;
pub use service::*;
pub use session::*;
