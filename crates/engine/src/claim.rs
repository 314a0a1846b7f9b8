// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The claim protocol: pool job to owned-by-exactly-one-worker.
//!
//! The precondition (still in the pool, not locked) and the ownership
//! write are one conditional update through [`JobStore::update_where`].
//! A separate check-then-write would let two workers both pass the check
//! before either writes; here the loser of a race observes the row
//! already changed and gets [`JobError::AlreadyClaimed`].

use dispatch_core::{Actor, Clock, IdGen, Job, JobError, JobEventKind, JobId, JobStatus, WorkerId};
use dispatch_store::JobStore;
use std::sync::Arc;
use tracing::info;

pub struct ClaimProtocol<C: Clock, G: IdGen> {
    store: Arc<JobStore<C, G>>,
}

impl<C: Clock, G: IdGen> ClaimProtocol<C, G> {
    pub fn new(store: Arc<JobStore<C, G>>) -> Self {
        Self { store }
    }

    /// Atomically move a pool job to `Assigned` under `worker_id`.
    ///
    /// Exactly one of any concurrently racing calls succeeds; the rest
    /// fail with `AlreadyClaimed`. Locked pool jobs reject the claim with
    /// `LockedJob` before any write; a job that already left the pool
    /// reports `AlreadyClaimed` whether or not it is also locked.
    pub fn claim(&self, job_id: &JobId, worker_id: &WorkerId) -> Result<Job, JobError> {
        let actor = Actor::Worker {
            id: worker_id.clone(),
        };
        let updated = self.store.update_where(
            job_id,
            &actor,
            |job| {
                if job.status != JobStatus::Pool {
                    return Err(JobError::AlreadyClaimed(job.id.clone()));
                }
                if job.locked {
                    return Err(JobError::LockedJob {
                        job_id: job.id.clone(),
                        reason: job.lock_reason.clone(),
                    });
                }
                Ok(())
            },
            |job| {
                job.status = JobStatus::Assigned;
                job.assigned_worker_id = Some(worker_id.clone());
                JobEventKind::Claimed {
                    worker_id: worker_id.clone(),
                }
            },
        )?;
        info!(job_id = %job_id, worker_id = %worker_id, "job claimed");
        Ok(updated)
    }
}

#[cfg(test)]
#[path = "claim_tests.rs"]
mod tests;
