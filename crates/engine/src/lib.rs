// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dispatch-engine: the job lifecycle and scheduling engine.
//!
//! The components that sit in front of the job store: the claim protocol,
//! the scheduling conflict checker, the lock manager, the calendar
//! scheduler, and the realtime notifier. [`JobService`] ties them together
//! into the operation surface UI/API callers use.

pub mod claim;
pub mod conflict;
pub mod env;
pub mod lock;
pub mod notifier;
pub mod scheduler;
pub mod service;

#[cfg(test)]
mod test_helpers;

pub use claim::ClaimProtocol;
pub use conflict::{ConflictChecker, ConflictPolicy};
pub use lock::{LockManager, LockStatus};
pub use notifier::{
    BroadcastTransport, NoopTransport, NotifyError, PushTransport, RealtimeNotifier, Refetch, View,
};
pub use scheduler::CalendarScheduler;
pub use service::JobService;
