// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy for job lifecycle operations.
//!
//! Every business-rule rejection is a distinct variant so callers can
//! surface the specific conflict and revert optimistic state. None of
//! these are retried automatically; each represents a legitimate state
//! conflict requiring a new human decision. Only [`JobError::Store`] is
//! transient and eligible for caller-initiated retry.

use crate::job::{JobId, JobStatus};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JobError {
    /// Malformed input (inverted window, empty reason, unknown status, ...)
    #[error("invalid input: {0}")]
    Validation(String),

    /// Lost a claim race: the job left the pool before this call's write.
    #[error("job already claimed: {0}")]
    AlreadyClaimed(JobId),

    /// Mutation blocked by an administrative lock.
    #[error("job {job_id} is locked{}", reason.as_deref().map(|r| format!(": {r}")).unwrap_or_default())]
    LockedJob {
        job_id: JobId,
        reason: Option<String>,
    },

    /// The proposed window overlaps another job on the same schedule.
    #[error("job {job_id} window conflicts with job {conflicting_job_id}")]
    SchedulingConflict {
        job_id: JobId,
        conflicting_job_id: JobId,
    },

    /// The version guard failed: someone else wrote the job after we read it.
    #[error("job {0} was modified concurrently, re-fetch and retry the decision")]
    ConcurrentEdit(JobId),

    #[error("job not found: {0}")]
    NotFound(JobId),

    /// Actor lacks the role or ownership for the requested operation.
    #[error("not authorized: {0}")]
    Authorization(String),

    /// Illegal state machine transition.
    #[error("cannot transition job {job_id} from {from} to {to}")]
    IllegalTransition {
        job_id: JobId,
        from: JobStatus,
        to: JobStatus,
    },

    /// Transient infrastructure failure (snapshot I/O, closed channels).
    #[error("store error: {0}")]
    Store(String),
}
