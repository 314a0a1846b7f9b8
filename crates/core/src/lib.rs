// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dispatch-core: domain model for the Dispatch job lifecycle engine.
//!
//! Jobs, the job status state machine, time windows, audit events, and the
//! error taxonomy shared by every other crate in the workspace. This crate
//! performs no I/O.

pub mod actor;
pub mod clock;
pub mod error;
pub mod event;
pub mod id;
pub mod job;
pub mod window;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use actor::{Actor, WorkerId};
pub use clock::{Clock, FakeClock, SystemClock};
pub use error::JobError;
pub use event::{JobEvent, JobEventKind};
pub use id::{IdGen, SequentialIdGen, UuidIdGen};
pub use job::{Job, JobId, JobStatus, NewJob, Pricing};
pub use window::TimeWindow;
