//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to origin:
//!     → retries.rs (invoke, sleep fixed delay on failure, re-invoke)
//!     → last error surfaces to the dispatcher after the bound
//! ```
//!
//! # Design Decisions
//! - Only GET requests reach the origin, so every attempt is safe to repeat
//! - The retry wrapper is generic over the operation and knows nothing of HTTP

pub mod retries;

pub use retries::{retry, RetryPolicy};
