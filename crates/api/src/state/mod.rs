// Path: crates/api/src/state/mod.rs
//! Key-value state access for the shared ledger.
//!
//! - `StateAccess`: the dyn-safe key-value interface every component reads and
//!   writes through.
//! - `StateOverlay`: a copy-on-write layer that stages writes so they can be
//!   committed in one atomic `batch_apply`, or dropped.
//! - `MemoryState`: an ordered in-memory ledger.

mod accessor;
mod memory;
mod overlay;

pub use accessor::*;
pub use memory::*;
pub use overlay::*;

#[cfg(test)]
mod tests;
