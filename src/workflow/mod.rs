//! Wallet workflow subsystem.
//!
//! # Data Flow
//! ```text
//! Runner (static wallet list, strictly sequential)
//!     → SessionFactory (fresh ApiClient + signer + activator per wallet)
//!     → WalletWorkflow::process
//!         → nonce → sign → login → user info → miner status
//!         → eligibility.rs (now > last + 24h)
//!         → startMining → on-chain activation
//!     → CycleSummary
//!     → sleep cycle_interval, repeat
//! ```
//!
//! Nothing but the wallet list outlives one pass of the outer loop.

pub mod clock;
pub mod driver;
pub mod eligibility;
pub mod runner;

#[cfg(test)]
pub(crate) mod testing;

pub use clock::{Clock, FixedClock, SystemClock};
pub use driver::{
    ActivationOutcome, CycleOutcome, Session, WalletWorkflow, WorkflowError, WorkflowSettings,
};
pub use eligibility::{is_eligible, next_eligible_at, MINING_COOLDOWN_SECS};
pub use runner::{CycleSummary, LiveSessionFactory, Runner, SessionFactory, SetupError};
