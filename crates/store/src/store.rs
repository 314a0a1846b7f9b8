// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process job store with atomic conditional writes.
//!
//! The mutex around [`StoreState`] is the transaction boundary: a
//! precondition check and the mutation it guards always execute under one
//! lock acquisition. That is what makes claim and lock/unlock race-free —
//! there is no window between "status is still pool" and "status becomes
//! assigned" where a second writer can slip in.

use crate::snapshot::{Snapshot, SnapshotError};
use dispatch_core::{
    Actor, Clock, IdGen, Job, JobError, JobEvent, JobEventKind, JobId, JobStatus, NewJob, WorkerId,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::Path;
use tokio::sync::broadcast;
use tracing::debug;

/// Buffered change signals per subscriber. Lagging subscribers skip to the
/// newest signal, which is harmless: the signal only means "refetch".
const CHANGE_BUFFER: usize = 64;

/// Change signal published after every successful mutation.
///
/// Carries enough for the notifier to route the hint to affected views,
/// never a delta payload to be trusted.
#[derive(Debug, Clone)]
pub enum StoreChange {
    /// A new job arrived in the pool.
    Inserted { job_id: JobId },
    /// An existing job changed; `event` is the audit record kind appended.
    Updated { job_id: JobId, event: JobEventKind },
}

/// Filter for [`JobStore::fetch`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    /// Only jobs awaiting a claim.
    pub pool_only: bool,
    /// Only jobs assigned to this worker.
    pub worker_id: Option<WorkerId>,
    /// Cancelled jobs are hidden unless requested.
    pub include_cancelled: bool,
}

impl JobFilter {
    pub fn pool() -> Self {
        Self {
            pool_only: true,
            ..Self::default()
        }
    }

    pub fn for_worker(worker_id: impl Into<WorkerId>) -> Self {
        Self {
            worker_id: Some(worker_id.into()),
            ..Self::default()
        }
    }

    fn matches(&self, job: &Job) -> bool {
        if job.status == JobStatus::Cancelled && !self.include_cancelled {
            return false;
        }
        if self.pool_only && job.status != JobStatus::Pool {
            return false;
        }
        if let Some(worker_id) = &self.worker_id {
            if !job.owned_by(worker_id) {
                return false;
            }
        }
        true
    }
}

#[derive(Default)]
struct StoreState {
    jobs: HashMap<JobId, Job>,
    events: Vec<JobEvent>,
}

/// The durable record of every job and its audit log.
pub struct JobStore<C: Clock, G: IdGen> {
    clock: C,
    id_gen: G,
    inner: Mutex<StoreState>,
    change_tx: broadcast::Sender<StoreChange>,
}

impl<C: Clock, G: IdGen> JobStore<C, G> {
    pub fn new(clock: C, id_gen: G) -> Self {
        let (change_tx, _) = broadcast::channel(CHANGE_BUFFER);
        Self {
            clock,
            id_gen,
            inner: Mutex::new(StoreState::default()),
            change_tx,
        }
    }

    /// Subscribe to change signals. Receivers created before a mutation
    /// observe it; delivery is at-least-once and unordered relative to
    /// other subscribers.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.change_tx.subscribe()
    }

    /// Insert a job arriving from quote acceptance. Jobs always enter in
    /// `Pool`, unassigned and unlocked; [`Job::new`] enforces that shape.
    pub fn insert(&self, new: NewJob) -> Result<Job, JobError> {
        let job = Job::new(JobId::new(self.id_gen.next()), new, &self.clock)?;
        {
            let mut state = self.inner.lock();
            state.jobs.insert(job.id.clone(), job.clone());
        }
        debug!(job_id = %job.id, title = %job.title, "job inserted into pool");
        let _ = self.change_tx.send(StoreChange::Inserted {
            job_id: job.id.clone(),
        });
        Ok(job)
    }

    pub fn get(&self, job_id: &JobId) -> Result<Job, JobError> {
        let state = self.inner.lock();
        state
            .jobs
            .get(job_id)
            .cloned()
            .ok_or_else(|| JobError::NotFound(job_id.clone()))
    }

    /// Fetch jobs matching the filter, oldest first.
    pub fn fetch(&self, filter: &JobFilter) -> Vec<Job> {
        let state = self.inner.lock();
        let mut jobs: Vec<Job> = state
            .jobs
            .values()
            .filter(|job| filter.matches(job))
            .cloned()
            .collect();
        jobs.sort_by(|a, b| {
            a.created_at_ms
                .cmp(&b.created_at_ms)
                .then_with(|| a.id.as_str().cmp(b.id.as_str()))
        });
        jobs
    }

    /// The atomic conditional-write primitive every mutation routes through.
    ///
    /// Looks up the job, runs `precondition` against its *current* state,
    /// and only if that passes applies `mutation` — all under one lock
    /// acquisition. The mutation returns the audit event kind to append;
    /// the store stamps `updated_at_ms`, bumps `version`, appends the
    /// [`JobEvent`], and publishes a change signal.
    ///
    /// Of any concurrently racing calls against the same precondition,
    /// exactly one observes it as true.
    pub fn update_where<P, M>(
        &self,
        job_id: &JobId,
        actor: &Actor,
        precondition: P,
        mutation: M,
    ) -> Result<Job, JobError>
    where
        P: FnOnce(&Job) -> Result<(), JobError>,
        M: FnOnce(&mut Job) -> JobEventKind,
    {
        let now = self.clock.epoch_ms();
        let (updated, kind) = {
            let mut state = self.inner.lock();
            let job = state
                .jobs
                .get_mut(job_id)
                .ok_or_else(|| JobError::NotFound(job_id.clone()))?;
            precondition(job)?;
            let kind = mutation(job);
            job.updated_at_ms = now;
            job.version += 1;
            let updated = job.clone();
            state.events.push(JobEvent {
                job_id: job_id.clone(),
                kind: kind.clone(),
                actor: actor.clone(),
                at_ms: now,
            });
            (updated, kind)
        };
        debug!(job_id = %job_id, actor = %actor, event = ?kind, "job updated");
        let _ = self.change_tx.send(StoreChange::Updated {
            job_id: job_id.clone(),
            event: kind,
        });
        Ok(updated)
    }

    /// Full audit log, in append order.
    pub fn events(&self) -> Vec<JobEvent> {
        self.inner.lock().events.clone()
    }

    /// Audit log entries for one job, in append order.
    pub fn events_for(&self, job_id: &JobId) -> Vec<JobEvent> {
        self.inner
            .lock()
            .events
            .iter()
            .filter(|event| &event.job_id == job_id)
            .cloned()
            .collect()
    }

    /// Persist the current state as an atomic JSON snapshot.
    pub fn save_to(&self, path: &Path) -> Result<(), SnapshotError> {
        let snapshot = {
            let state = self.inner.lock();
            Snapshot::new(
                state.jobs.values().cloned().collect(),
                state.events.clone(),
            )
        };
        snapshot.save(path)
    }

    /// Restore state from a snapshot, replacing whatever is loaded now.
    /// Missing or corrupt snapshot files leave the store empty.
    pub fn load_from(&self, path: &Path) -> Result<(), SnapshotError> {
        let Some(snapshot) = Snapshot::load(path)? else {
            return Ok(());
        };
        let mut state = self.inner.lock();
        state.jobs = snapshot
            .jobs
            .into_iter()
            .map(|job| (job.id.clone(), job))
            .collect();
        state.events = snapshot.events;
        Ok(())
    }
}

impl From<SnapshotError> for JobError {
    fn from(e: SnapshotError) -> Self {
        JobError::Store(e.to_string())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
