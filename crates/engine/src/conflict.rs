// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduling conflict detection.
//!
//! Reschedules always check per-worker: a worker's non-cancelled jobs must
//! occupy pairwise disjoint windows. Booking creation may instead use a
//! coarser global reservation ([`ConflictPolicy::GlobalSlot`]) that treats
//! the whole calendar as one resource; which policy applies is explicit
//! configuration, not an accident of the call site.
//!
//! Locked jobs still occupy time and count as conflict sources.

use crate::env;
use dispatch_core::{Clock, IdGen, Job, JobId, TimeWindow, WorkerId};
use dispatch_store::{JobFilter, JobStore};
use std::sync::Arc;

/// Which jobs a booking-time slot check scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    /// Only jobs on the same worker's schedule conflict (default).
    #[default]
    PerWorker,
    /// Any scheduled, not-cancelled job reserves its slot globally.
    GlobalSlot,
}

impl ConflictPolicy {
    pub fn from_env() -> Self {
        if env::global_slot_check_enabled() {
            ConflictPolicy::GlobalSlot
        } else {
            ConflictPolicy::PerWorker
        }
    }
}

pub struct ConflictChecker<C: Clock, G: IdGen> {
    store: Arc<JobStore<C, G>>,
    policy: ConflictPolicy,
}

impl<C: Clock, G: IdGen> ConflictChecker<C, G> {
    pub fn new(store: Arc<JobStore<C, G>>) -> Self {
        Self::with_policy(store, ConflictPolicy::default())
    }

    pub fn with_policy(store: Arc<JobStore<C, G>>, policy: ConflictPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> ConflictPolicy {
        self.policy
    }

    /// First job on `worker_id`'s schedule whose window overlaps the
    /// proposal, excluding `exclude` (the job being rescheduled).
    /// Cancelled jobs never conflict; unscheduled jobs occupy no time.
    pub fn first_conflict(
        &self,
        worker_id: &WorkerId,
        proposed: &TimeWindow,
        exclude: Option<&JobId>,
    ) -> Option<Job> {
        self.store
            .fetch(&JobFilter::for_worker(worker_id.clone()))
            .into_iter()
            .filter(|job| Some(&job.id) != exclude)
            .find(|job| job.window.is_some_and(|w| w.overlaps(proposed)))
    }

    /// Whether the proposed window overlaps any of the worker's other
    /// active windows.
    pub fn has_conflict(
        &self,
        worker_id: &WorkerId,
        proposed: &TimeWindow,
        exclude: Option<&JobId>,
    ) -> bool {
        self.first_conflict(worker_id, proposed, exclude).is_some()
    }

    /// The coarser reservation check used at booking creation: any
    /// not-cancelled job, regardless of worker, whose window overlaps.
    pub fn slot_blocker(&self, proposed: &TimeWindow) -> Option<Job> {
        self.store
            .fetch(&JobFilter::default())
            .into_iter()
            .find(|job| job.window.is_some_and(|w| w.overlaps(proposed)))
    }

    /// Policy-dispatched booking-time check. Under `PerWorker` an
    /// unassigned booking can never conflict, so this returns `None`.
    pub fn booking_blocker(&self, proposed: &TimeWindow) -> Option<Job> {
        match self.policy {
            ConflictPolicy::PerWorker => None,
            ConflictPolicy::GlobalSlot => self.slot_blocker(proposed),
        }
    }
}

#[cfg(test)]
#[path = "conflict_tests.rs"]
mod tests;
