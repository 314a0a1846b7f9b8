// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for engine tests.

use crate::claim::ClaimProtocol;
use crate::conflict::ConflictPolicy;
use crate::service::JobService;
use dispatch_core::{
    Actor, FakeClock, Job, JobId, NewJob, Pricing, SequentialIdGen, WorkerId,
};
use dispatch_store::JobStore;
use std::sync::Arc;

pub type TestStore = JobStore<FakeClock, SequentialIdGen>;

pub fn test_store() -> Arc<TestStore> {
    Arc::new(JobStore::new(FakeClock::at(1_000), SequentialIdGen::new("job")))
}

pub fn test_service(store: &Arc<TestStore>) -> JobService<FakeClock, SequentialIdGen> {
    JobService::with_policy(Arc::clone(store), ConflictPolicy::PerWorker)
}

pub fn admin() -> Actor {
    Actor::admin("ops")
}

pub fn new_job(title: &str) -> NewJob {
    NewJob {
        title: title.into(),
        description: "".into(),
        address: "12 Elm St".into(),
        city: "Springfield".into(),
        pricing: Pricing::Fixed { price_cents: 10_000 },
        bonus_cents: None,
        due_at_ms: None,
    }
}

/// Insert a pool job.
#[allow(clippy::unwrap_used)]
pub fn pool_job(store: &Arc<TestStore>, title: &str) -> Job {
    store.insert(new_job(title)).unwrap()
}

/// Insert a job and claim it for `worker`.
#[allow(clippy::unwrap_used)]
pub fn claimed_job(store: &Arc<TestStore>, title: &str, worker: &str) -> Job {
    let job = pool_job(store, title);
    ClaimProtocol::new(Arc::clone(store))
        .claim(&job.id, &WorkerId::new(worker))
        .unwrap()
}

/// Claim and schedule a job into `[start_ms, end_ms)` as admin.
#[allow(clippy::unwrap_used)]
pub fn scheduled_job(
    store: &Arc<TestStore>,
    title: &str,
    worker: &str,
    start_ms: u64,
    end_ms: u64,
) -> Job {
    let job = claimed_job(store, title, worker);
    test_service(store)
        .update_job_schedule(&job.id, start_ms, end_ms, &admin())
        .unwrap()
}

pub fn job_id(s: &str) -> JobId {
    JobId::new(s)
}
