//! Claim protocol: exactly-once ownership under contention.

use crate::prelude::*;
use dispatch_core::{JobError, JobStatus, WorkerId};
use dispatch_store::JobFilter;
use std::sync::Arc;

#[test]
fn first_claim_wins_second_gets_already_claimed() {
    // Scenario A
    let (store, service) = harness();
    let job = service.create_job(booking("Lawn mowing")).unwrap();

    let claimed = service.claim_job(&job.id, &worker("w-1")).unwrap();
    assert_eq!(claimed.status, JobStatus::Assigned);
    assert_eq!(claimed.assigned_worker_id, Some(WorkerId::new("w-1")));

    let second = service.claim_job(&job.id, &worker("w-2"));
    assert!(matches!(second, Err(JobError::AlreadyClaimed(_))));

    let current = store.get(&job.id).unwrap();
    assert_eq!(current.assigned_worker_id, Some(WorkerId::new("w-1")));
    assert_ownership_invariant(&store.fetch(&JobFilter::default()));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_claims_have_exactly_one_winner() {
    let (store, service) = harness();
    let service = Arc::new(service);
    let job = service.create_job(booking("Contested job")).unwrap();

    let mut handles = Vec::new();
    for i in 0..16 {
        let service = Arc::clone(&service);
        let job_id = job.id.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            service.claim_job(&job_id, &worker(&format!("w-{i}")))
        }));
    }

    let mut winners = Vec::new();
    let mut losses = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(job) => winners.push(job),
            Err(JobError::AlreadyClaimed(_)) => losses += 1,
            Err(other) => panic!("unexpected claim failure: {other}"),
        }
    }

    assert_eq!(winners.len(), 1, "exactly one racing claim may succeed");
    assert_eq!(losses, 15);

    // the stored job belongs to the winner, and was claimed exactly once
    let current = store.get(&job.id).unwrap();
    assert_eq!(current.assigned_worker_id, winners[0].assigned_worker_id);
    assert_eq!(store.events_for(&job.id).len(), 1);
}

#[test]
fn claim_response_is_authoritative_for_the_caller() {
    // no notification round-trip needed: the direct result carries the
    // post-mutation state
    let (_store, service) = harness();
    let job = service.create_job(booking("Lawn mowing")).unwrap();

    let claimed = service.claim_job(&job.id, &worker("w-1")).unwrap();
    assert_eq!(claimed.status, JobStatus::Assigned);
    assert_eq!(claimed.version, job.version + 1);
}

#[test]
fn pool_listing_shrinks_as_jobs_are_claimed() {
    let (_store, service) = harness();
    let a = service.create_job(booking("A")).unwrap();
    let b = service.create_job(booking("B")).unwrap();

    assert_eq!(service.fetch_jobs(&JobFilter::pool()).len(), 2);

    service.claim_job(&a.id, &worker("w-1")).unwrap();
    let pool = service.fetch_jobs(&JobFilter::pool());
    assert_eq!(pool.len(), 1);
    assert_eq!(pool[0].id, b.id);

    let mine = service.fetch_jobs(&JobFilter::for_worker("w-1"));
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, a.id);
}
