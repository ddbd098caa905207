//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Outgoing response:
//!     → headers.rs (nosniff, frame options, referrer policy, CSP)
//!     → Send to client
//! ```
//!
//! Target validation lives with the handlers; this module only hardens
//! what the browser receives.

pub mod headers;

pub use headers::apply_security_headers;
