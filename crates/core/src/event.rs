// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Audit events for the job lifecycle.
//!
//! Every successful state-changing operation appends exactly one
//! [`JobEvent`] to the store's append-only log. External collaborators
//! (notification, payroll) observe history through this log instead of
//! re-deriving it from job diffs.

use crate::actor::{Actor, WorkerId};
use crate::job::{JobId, JobStatus};
use crate::window::TimeWindow;
use serde::{Deserialize, Serialize};

/// What happened to a job.
///
/// Serializes with `{"type": "job:verb", ...fields}` format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum JobEventKind {
    #[serde(rename = "job:claimed")]
    Claimed { worker_id: WorkerId },

    #[serde(rename = "job:locked")]
    Locked { reason: String },

    #[serde(rename = "job:unlocked")]
    Unlocked,

    #[serde(rename = "job:status_changed")]
    StatusChanged { from: JobStatus, to: JobStatus },

    #[serde(rename = "job:rescheduled")]
    Rescheduled {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        from: Option<TimeWindow>,
        to: TimeWindow,
    },

    #[serde(rename = "job:returned_to_pool")]
    ReturnedToPool { reason: String },

    /// Administrative forced reassignment.
    #[serde(rename = "job:reassigned")]
    Reassigned {
        from: Option<WorkerId>,
        to: WorkerId,
    },
}

/// Immutable audit record of one state-changing action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobEvent {
    pub job_id: JobId,
    #[serde(flatten)]
    pub kind: JobEventKind,
    pub actor: Actor,
    pub at_ms: u64,
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
