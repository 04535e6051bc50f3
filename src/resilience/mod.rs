//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Remote API call (nonce, login, user info, miner status, start mining):
//!     → retries.rs (attempt, sleep fixed delay, attempt again)
//!     → Ok(value) or RetryError { attempts, last }
//! ```
//!
//! # Design Decisions
//! - Transport adapters never retry; the workflow wraps each call
//! - Exhaustion is a typed value the caller must match on

pub mod retries;

pub use retries::{retry, RetryError, RetryPolicy};
