//! Shared harness for the behavioral test suite.

use dispatch_core::{Actor, FakeClock, Job, NewJob, Pricing, SequentialIdGen};
use dispatch_engine::{ConflictPolicy, JobService};
use dispatch_store::JobStore;
use std::sync::Arc;

pub type SpecStore = JobStore<FakeClock, SequentialIdGen>;
pub type SpecService = JobService<FakeClock, SequentialIdGen>;

pub fn harness() -> (Arc<SpecStore>, SpecService) {
    let store = Arc::new(JobStore::new(
        FakeClock::at(1_000),
        SequentialIdGen::new("job"),
    ));
    let service = JobService::with_policy(Arc::clone(&store), ConflictPolicy::PerWorker);
    (store, service)
}

pub fn admin() -> Actor {
    Actor::admin("ops")
}

pub fn worker(id: &str) -> Actor {
    Actor::worker(id)
}

pub fn booking(title: &str) -> NewJob {
    NewJob {
        title: title.into(),
        description: "from an accepted quote".into(),
        address: "12 Elm St".into(),
        city: "Springfield".into(),
        pricing: Pricing::Fixed {
            price_cents: 15_000,
        },
        bonus_cents: None,
        due_at_ms: None,
    }
}

/// Assert the pool/ownership invariant over every job in the store.
pub fn assert_ownership_invariant(jobs: &[Job]) {
    for job in jobs {
        assert!(
            job.ownership_consistent(),
            "job {} violates the pool/ownership invariant: status={} worker={:?}",
            job.id,
            job.status,
            job.assigned_worker_id,
        );
    }
}
