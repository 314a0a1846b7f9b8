// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job record and status state machine.

use crate::actor::WorkerId;
use crate::clock::Clock;
use crate::error::JobError;
use crate::window::TimeWindow;
use serde::{Deserialize, Serialize};
use std::fmt;

crate::define_id! {
    /// Unique identifier for a job.
    ///
    /// Assigned at creation (quote acceptance) and used to reference the
    /// job in events, logs, and every operation in the engine.
    #[derive(Default)]
    pub struct JobId;
}

/// How the customer is billed for a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Pricing {
    Fixed { price_cents: i64 },
    Hourly { rate_cents: i64 },
}

/// Lifecycle status of a job.
///
/// `pool → assigned → in_progress ⇄ paused → completed → approved`, with
/// `cancelled` reachable from any non-terminal state. Returning a job to
/// the pool is an operation, not a status: it re-enters `Pool` and the
/// reason lives on the audit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Unassigned, awaiting a claim
    Pool,
    /// Owned by a worker, not yet started
    Assigned,
    /// Worker is on the job
    InProgress,
    /// Work interrupted, may resume
    Paused,
    /// Worker reports the job done, awaiting admin sign-off
    Completed,
    /// Admin signed off (terminal)
    Approved,
    /// Abandoned by an admin (terminal)
    Cancelled,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Approved | JobStatus::Cancelled)
    }

    /// Whether the state machine permits `self → next` at all.
    ///
    /// This is the full transition table; worker-initiated requests are
    /// further restricted by [`JobStatus::worker_may`].
    pub fn can_transition_to(self, next: JobStatus) -> bool {
        use JobStatus::*;
        match (self, next) {
            (Pool, Assigned) => true,
            (Assigned, InProgress) => true,
            (InProgress, Paused) | (Paused, InProgress) => true,
            (InProgress, Completed) => true,
            (Completed, Approved) => true,
            (from, Cancelled) => !from.is_terminal(),
            _ => false,
        }
    }

    /// Whether a worker may request `self → next` on a job they own.
    ///
    /// Everything else (approval, cancellation, forced reassignment) is
    /// administrative.
    pub fn worker_may(self, next: JobStatus) -> bool {
        use JobStatus::*;
        matches!(
            (self, next),
            (Assigned, InProgress)
                | (InProgress, Paused)
                | (Paused, InProgress)
                | (InProgress, Completed)
        )
    }

    /// Whether a worker may relinquish a job in this state back to the pool.
    pub fn worker_may_return(self) -> bool {
        matches!(self, JobStatus::Assigned | JobStatus::InProgress)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Pool => write!(f, "pool"),
            JobStatus::Assigned => write!(f, "assigned"),
            JobStatus::InProgress => write!(f, "in_progress"),
            JobStatus::Paused => write!(f, "paused"),
            JobStatus::Completed => write!(f, "completed"),
            JobStatus::Approved => write!(f, "approved"),
            JobStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Input for creating a job. Jobs always arrive in the pool: unassigned,
/// unlocked, unscheduled. The booking subsystem builds one of these when a
/// quote is accepted.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub pricing: Pricing,
    pub bonus_cents: Option<i64>,
    pub due_at_ms: Option<u64>,
}

/// The central entity: one unit of work moving through the lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub status: JobStatus,
    /// Non-null iff status is not `Pool`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_worker_id: Option<WorkerId>,
    #[serde(flatten)]
    pub pricing: Pricing,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus_cents: Option<i64>,
    /// Admin price override, set during review.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_set_price_cents: Option<i64>,
    /// Scheduled window; `None` until the job is placed on the calendar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<TimeWindow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_at_ms: Option<u64>,
    /// Administrative freeze against worker-initiated mutation.
    #[serde(default)]
    pub locked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_reason: Option<String>,
    pub created_at_ms: u64,
    pub updated_at_ms: u64,
    /// Bumped by every successful write; the compare-and-swap guard for
    /// schedule updates.
    #[serde(default)]
    pub version: u64,
}

impl Job {
    /// Create a pool job. Validates the descriptive fields the booking
    /// boundary is responsible for.
    pub fn new(id: JobId, new: NewJob, clock: &impl Clock) -> Result<Self, JobError> {
        if new.title.trim().is_empty() {
            return Err(JobError::Validation("job title must not be empty".into()));
        }
        let now = clock.epoch_ms();
        Ok(Self {
            id,
            title: new.title,
            description: new.description,
            address: new.address,
            city: new.city,
            status: JobStatus::Pool,
            assigned_worker_id: None,
            pricing: new.pricing,
            bonus_cents: new.bonus_cents,
            admin_set_price_cents: None,
            window: None,
            due_at_ms: new.due_at_ms,
            locked: false,
            lock_reason: None,
            created_at_ms: now,
            updated_at_ms: now,
            version: 0,
        })
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// The pool invariant: pool jobs are unassigned, active jobs have an
    /// owner. Cancelled jobs keep whatever assignee they had for audit
    /// purposes (a job cancelled straight out of the pool never had one).
    pub fn ownership_consistent(&self) -> bool {
        match self.status {
            JobStatus::Pool => self.assigned_worker_id.is_none(),
            JobStatus::Cancelled => true,
            _ => self.assigned_worker_id.is_some(),
        }
    }

    pub fn owned_by(&self, worker_id: &WorkerId) -> bool {
        self.assigned_worker_id.as_ref() == Some(worker_id)
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
