// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dispatch-store: the Job Store.
//!
//! Source of truth for every job and its audit history. All mutations go
//! through one atomic conditional-write primitive, so claim races, lock
//! gating, and status preconditions are decided inside a single critical
//! section. Mutations publish change signals for the realtime notifier and
//! the whole store can be snapshotted to disk.

pub mod snapshot;
pub mod store;

pub use snapshot::{Snapshot, SnapshotError};
pub use store::{JobFilter, JobStore, StoreChange};
