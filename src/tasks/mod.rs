//! Background Tasks Module
//!
//! Contains the long-lived tasks owned by the server process.
//!
//! # Tasks
//! - Expiry sweep: purges expired fallback-cache entries on a fixed interval

mod sweep;

pub use sweep::{spawn_sweep_task, SweepTask};
