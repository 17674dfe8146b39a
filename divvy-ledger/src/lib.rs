//! Divvy Ledger Core
//!
//! Group-expense ledger: members, multi-payer/multi-split expenses, direct
//! settlements, and the snapshot interchange format.
//!
//! # Architecture
//!
//! - **Whole-state mutations**: the store applies every change
//!   synchronously to one owned snapshot; no derived state is cached
//! - **History outlives membership**: deleting a member never touches
//!   transactions; stale references resolve to a defined sentinel
//! - **Lenient amounts**: unparseable amount input coerces to zero by
//!   policy, not by accident
//!
//! # Invariants
//!
//! - Entity ids are assigned once and never mutated or reused
//! - Import replaces the whole snapshot or nothing
//! - Allocation validation (0.05) and settled detection (0.01) use
//!   separate tolerances

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod amount;
pub mod error;
pub mod snapshot;
pub mod split;
pub mod store;
pub mod types;

// Re-exports
pub use amount::{parse_amount_or_zero, ALLOCATION_TOLERANCE, BALANCE_EPSILON};
pub use error::{Error, Result};
pub use snapshot::{Snapshot, SnapshotDocument};
pub use store::LedgerStore;
pub use types::{Currency, Member, MemberId, Share, Transaction, TransactionId};
