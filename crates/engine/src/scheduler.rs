// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Calendar scheduler: reschedule requests gated by the conflict checker.
//!
//! The conflict check is read-then-decide and accepts a small consistency
//! window; the final write is still guarded by the version observed at
//! load, so a concurrent edit fails with `ConcurrentEdit` instead of being
//! silently clobbered.

use crate::conflict::ConflictChecker;
use dispatch_core::{Actor, Clock, IdGen, Job, JobError, JobEventKind, JobId, TimeWindow};
use dispatch_store::JobStore;
use std::sync::Arc;
use tracing::warn;

pub struct CalendarScheduler<C: Clock, G: IdGen> {
    store: Arc<JobStore<C, G>>,
    checker: ConflictChecker<C, G>,
}

impl<C: Clock, G: IdGen> CalendarScheduler<C, G> {
    pub fn new(store: Arc<JobStore<C, G>>, checker: ConflictChecker<C, G>) -> Self {
        Self { store, checker }
    }

    /// Move a job to a new window, refusing overlaps with the assigned
    /// worker's other jobs (the job's own prior window is excluded).
    ///
    /// Locked jobs cannot be the target of a reschedule for any actor —
    /// they still occupy time, but moving them requires an unlock first.
    /// On conflict nothing is written; the caller reverts any optimistic
    /// UI state.
    pub fn update_schedule(
        &self,
        job_id: &JobId,
        window: TimeWindow,
        actor: &Actor,
    ) -> Result<Job, JobError> {
        let job = self.store.get(job_id)?;

        if job.locked {
            return Err(JobError::LockedJob {
                job_id: job.id.clone(),
                reason: job.lock_reason.clone(),
            });
        }
        if let Some(worker_id) = actor.as_worker() {
            if !job.owned_by(worker_id) {
                return Err(JobError::Authorization(format!(
                    "worker {worker_id} does not own job {job_id}"
                )));
            }
        }
        if job.is_terminal() {
            return Err(JobError::Validation(format!(
                "job {job_id} is {} and cannot be rescheduled",
                job.status
            )));
        }
        let Some(worker_id) = job.assigned_worker_id.clone() else {
            return Err(JobError::Validation(format!(
                "job {job_id} has no assigned worker to schedule against"
            )));
        };

        if let Some(conflicting) = self.checker.first_conflict(&worker_id, &window, Some(job_id)) {
            warn!(
                job_id = %job_id,
                worker_id = %worker_id,
                conflicting_job_id = %conflicting.id,
                window = %window,
                "reschedule rejected: window overlaps",
            );
            return Err(JobError::SchedulingConflict {
                job_id: job_id.clone(),
                conflicting_job_id: conflicting.id,
            });
        }

        let expected_version = job.version;
        let previous = job.window;
        self.store.update_where(
            job_id,
            actor,
            move |current| {
                if current.version != expected_version {
                    return Err(JobError::ConcurrentEdit(current.id.clone()));
                }
                Ok(())
            },
            move |current| {
                current.window = Some(window);
                JobEventKind::Rescheduled {
                    from: previous,
                    to: window,
                }
            },
        )
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
