// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Administrative lock manager.
//!
//! A locked job rejects every worker-initiated mutation before it reaches
//! the store; administrative status transitions bypass the gate but still
//! flow through the same conditional writes.

use dispatch_core::{Actor, Clock, IdGen, Job, JobError, JobEventKind, JobId};
use dispatch_store::JobStore;
use std::sync::Arc;
use tracing::info;

/// Answer to `check_job_locked`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockStatus {
    pub locked: bool,
    pub reason: Option<String>,
}

pub struct LockManager<C: Clock, G: IdGen> {
    store: Arc<JobStore<C, G>>,
}

impl<C: Clock, G: IdGen> LockManager<C, G> {
    pub fn new(store: Arc<JobStore<C, G>>) -> Self {
        Self { store }
    }

    /// Freeze a job. Admin-only; re-locking an already-locked job is
    /// rejected so a second admin notices the existing freeze.
    pub fn lock(&self, job_id: &JobId, reason: &str, actor: &Actor) -> Result<Job, JobError> {
        if !actor.is_admin() {
            return Err(JobError::Authorization(
                "only admins may lock jobs".into(),
            ));
        }
        if reason.trim().is_empty() {
            return Err(JobError::Validation("a lock reason is required".into()));
        }
        let reason = reason.to_string();
        let updated = self.store.update_where(
            job_id,
            actor,
            |job| {
                if job.locked {
                    return Err(JobError::LockedJob {
                        job_id: job.id.clone(),
                        reason: job.lock_reason.clone(),
                    });
                }
                Ok(())
            },
            |job| {
                job.locked = true;
                job.lock_reason = Some(reason.clone());
                JobEventKind::Locked { reason }
            },
        )?;
        info!(job_id = %job_id, actor = %actor, "job locked");
        Ok(updated)
    }

    /// Release a freeze. Admin-only; unlocking an unlocked job is a
    /// validation error rather than a silent no-op.
    pub fn unlock(&self, job_id: &JobId, actor: &Actor) -> Result<Job, JobError> {
        if !actor.is_admin() {
            return Err(JobError::Authorization(
                "only admins may unlock jobs".into(),
            ));
        }
        let updated = self.store.update_where(
            job_id,
            actor,
            |job| {
                if !job.locked {
                    return Err(JobError::Validation(format!(
                        "job {} is not locked",
                        job.id
                    )));
                }
                Ok(())
            },
            |job| {
                job.locked = false;
                job.lock_reason = None;
                JobEventKind::Unlocked
            },
        )?;
        info!(job_id = %job_id, actor = %actor, "job unlocked");
        Ok(updated)
    }

    pub fn check(&self, job_id: &JobId) -> Result<LockStatus, JobError> {
        let job = self.store.get(job_id)?;
        Ok(LockStatus {
            locked: job.locked,
            reason: job.lock_reason,
        })
    }
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
