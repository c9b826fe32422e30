//! Storage contracts and the in-memory reference store.
//!
//! # Responsibility
//! - Define the data access contract services depend on.
//! - Provide the seeded in-process store used by the CLI and FFI surfaces.
//!
//! # Invariants
//! - Repositories hand out snapshots; callers never mutate stored records.

pub mod feedback_repo;
pub mod seed;
