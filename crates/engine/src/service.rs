// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The operation surface UI/API callers use.
//!
//! One method per verb. Each validates input, applies role and ownership
//! gates, then routes to a single conditional write; business rejections
//! come back as typed [`JobError`] values and are never retried here.

use crate::claim::ClaimProtocol;
use crate::conflict::{ConflictChecker, ConflictPolicy};
use crate::lock::{LockManager, LockStatus};
use crate::scheduler::CalendarScheduler;
use dispatch_core::{
    Actor, Clock, IdGen, Job, JobError, JobEventKind, JobId, JobStatus, NewJob, TimeWindow,
    WorkerId,
};
use dispatch_store::{JobFilter, JobStore};
use std::sync::Arc;
use tracing::info;

pub struct JobService<C: Clock, G: IdGen> {
    store: Arc<JobStore<C, G>>,
    claims: ClaimProtocol<C, G>,
    locks: LockManager<C, G>,
    scheduler: CalendarScheduler<C, G>,
    checker: ConflictChecker<C, G>,
}

impl<C: Clock, G: IdGen> JobService<C, G> {
    /// Build a service with the booking-time conflict policy taken from
    /// the environment.
    pub fn new(store: Arc<JobStore<C, G>>) -> Self {
        Self::with_policy(store, ConflictPolicy::from_env())
    }

    pub fn with_policy(store: Arc<JobStore<C, G>>, policy: ConflictPolicy) -> Self {
        let checker = ConflictChecker::with_policy(Arc::clone(&store), policy);
        let scheduler = CalendarScheduler::new(
            Arc::clone(&store),
            ConflictChecker::with_policy(Arc::clone(&store), policy),
        );
        Self {
            claims: ClaimProtocol::new(Arc::clone(&store)),
            locks: LockManager::new(Arc::clone(&store)),
            scheduler,
            checker,
            store,
        }
    }

    pub fn store(&self) -> &Arc<JobStore<C, G>> {
        &self.store
    }

    /// Boundary the booking subsystem calls after quote acceptance. Jobs
    /// always arrive in the pool: unassigned, unlocked, unscheduled.
    pub fn create_job(&self, new: NewJob) -> Result<Job, JobError> {
        self.store.insert(new)
    }

    /// The job blocking a requested booking slot, per the configured
    /// policy. `None` under the per-worker policy (nobody owns the booking
    /// yet) or when the slot is free.
    pub fn booking_slot_blocker(&self, window: &TimeWindow) -> Option<Job> {
        self.checker.booking_blocker(window)
    }

    pub fn fetch_jobs(&self, filter: &JobFilter) -> Vec<Job> {
        self.store.fetch(filter)
    }

    /// Claim a pool job for the calling worker. Admins reassign instead.
    pub fn claim_job(&self, job_id: &JobId, actor: &Actor) -> Result<Job, JobError> {
        let Some(worker_id) = actor.as_worker() else {
            return Err(JobError::Authorization(
                "claims are worker-initiated; use reassign_job to assign as admin".into(),
            ));
        };
        self.claims.claim(job_id, worker_id)
    }

    pub fn update_job_schedule(
        &self,
        job_id: &JobId,
        start_ms: u64,
        end_ms: u64,
        actor: &Actor,
    ) -> Result<Job, JobError> {
        let window = TimeWindow::new(start_ms, end_ms)?;
        self.scheduler.update_schedule(job_id, window, actor)
    }

    pub fn lock_job(&self, job_id: &JobId, reason: &str, actor: &Actor) -> Result<Job, JobError> {
        self.locks.lock(job_id, reason, actor)
    }

    pub fn unlock_job(&self, job_id: &JobId, actor: &Actor) -> Result<Job, JobError> {
        self.locks.unlock(job_id, actor)
    }

    pub fn check_job_locked(&self, job_id: &JobId) -> Result<LockStatus, JobError> {
        self.locks.check(job_id)
    }

    /// Request a status transition.
    ///
    /// Workers are held to the whitelist (`assigned→in_progress`,
    /// `in_progress⇄paused`, `in_progress→completed`) on jobs they own,
    /// and locked jobs short-circuit with `LockedJob`. Admin transitions
    /// skip those gates but the transition table still applies; all of it
    /// is evaluated inside the conditional write.
    ///
    /// `Assigned` is never a direct target: setting it without also
    /// recording an owner would leave an assigned job with no worker, so
    /// ownership changes go through `claim_job` or `reassign_job`.
    pub fn set_job_status(
        &self,
        job_id: &JobId,
        next: JobStatus,
        actor: &Actor,
    ) -> Result<Job, JobError> {
        let updated = self.store.update_where(
            job_id,
            actor,
            |job| {
                if let Some(worker_id) = actor.as_worker() {
                    if job.locked {
                        return Err(JobError::LockedJob {
                            job_id: job.id.clone(),
                            reason: job.lock_reason.clone(),
                        });
                    }
                    if !job.owned_by(worker_id) {
                        return Err(JobError::Authorization(format!(
                            "worker {worker_id} does not own job {}",
                            job.id
                        )));
                    }
                    if !job.status.worker_may(next) {
                        return Err(JobError::Authorization(format!(
                            "workers may not move a job from {} to {next}",
                            job.status
                        )));
                    }
                }
                if !job.status.can_transition_to(next) {
                    return Err(JobError::IllegalTransition {
                        job_id: job.id.clone(),
                        from: job.status,
                        to: next,
                    });
                }
                if next == JobStatus::Assigned {
                    return Err(JobError::Validation(
                        "assignment is not a direct status change; claim or reassign the job"
                            .into(),
                    ));
                }
                Ok(())
            },
            |job| {
                let from = job.status;
                job.status = next;
                JobEventKind::StatusChanged { from, to: next }
            },
        )?;
        info!(job_id = %job_id, actor = %actor, status = %next, "job status changed");
        Ok(updated)
    }

    /// Relinquish a job back to the pool with a mandatory reason.
    ///
    /// Re-enters `Pool`, clears the owner and the scheduled window; the
    /// reason lives on the `ReturnedToPool` audit event.
    pub fn return_job_to_pool(
        &self,
        job_id: &JobId,
        reason: &str,
        actor: &Actor,
    ) -> Result<Job, JobError> {
        if reason.trim().is_empty() {
            return Err(JobError::Validation(
                "returning a job to the pool requires a reason".into(),
            ));
        }
        let reason = reason.to_string();
        let updated = self.store.update_where(
            job_id,
            actor,
            |job| {
                if let Some(worker_id) = actor.as_worker() {
                    if job.locked {
                        return Err(JobError::LockedJob {
                            job_id: job.id.clone(),
                            reason: job.lock_reason.clone(),
                        });
                    }
                    if !job.owned_by(worker_id) {
                        return Err(JobError::Authorization(format!(
                            "worker {worker_id} does not own job {}",
                            job.id
                        )));
                    }
                }
                if !job.status.worker_may_return() {
                    return Err(JobError::Validation(format!(
                        "a {} job cannot be returned to the pool",
                        job.status
                    )));
                }
                Ok(())
            },
            |job| {
                job.status = JobStatus::Pool;
                job.assigned_worker_id = None;
                job.window = None;
                JobEventKind::ReturnedToPool {
                    reason: reason.clone(),
                }
            },
        )?;
        info!(job_id = %job_id, actor = %actor, "job returned to pool");
        Ok(updated)
    }

    /// Administrative forced reassignment to a different worker.
    pub fn reassign_job(
        &self,
        job_id: &JobId,
        new_worker: &WorkerId,
        actor: &Actor,
    ) -> Result<Job, JobError> {
        if !actor.is_admin() {
            return Err(JobError::Authorization(
                "only admins may reassign jobs".into(),
            ));
        }
        let updated = self.store.update_where(
            job_id,
            actor,
            |job| {
                if job.status == JobStatus::Pool {
                    return Err(JobError::Validation(format!(
                        "job {} is in the pool; workers claim it themselves",
                        job.id
                    )));
                }
                if job.is_terminal() {
                    return Err(JobError::Validation(format!(
                        "job {} is {} and cannot be reassigned",
                        job.id, job.status
                    )));
                }
                Ok(())
            },
            |job| {
                let from = job.assigned_worker_id.replace(new_worker.clone());
                JobEventKind::Reassigned {
                    from,
                    to: new_worker.clone(),
                }
            },
        )?;
        info!(job_id = %job_id, worker_id = %new_worker, "job reassigned");
        Ok(updated)
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
