//! Snapshot persistence: state survives a restart.

use crate::prelude::*;
use dispatch_core::{JobStatus, WorkerId};
use dispatch_store::JobFilter;

#[test]
fn engine_resumes_from_a_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dispatch.json");

    let job_id = {
        let (store, service) = harness();
        let job = service.create_job(booking("Deck staining")).unwrap();
        service.claim_job(&job.id, &worker("w-1")).unwrap();
        service
            .update_job_schedule(&job.id, 9_000_000, 12_000_000, &worker("w-1"))
            .unwrap();
        store.save_to(&path).unwrap();
        job.id
    };

    // a fresh store and service pick up where the old one stopped
    let (store, service) = harness();
    store.load_from(&path).unwrap();

    let job = store.get(&job_id).unwrap();
    assert_eq!(job.status, JobStatus::Assigned);
    assert_eq!(job.assigned_worker_id, Some(WorkerId::new("w-1")));
    assert!(job.window.is_some());
    assert_eq!(store.events_for(&job_id).len(), 2);

    service
        .set_job_status(&job_id, JobStatus::InProgress, &worker("w-1"))
        .unwrap();
    assert_eq!(store.events_for(&job_id).len(), 3);
}

#[test]
fn missing_snapshot_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let (store, _service) = harness();
    store.load_from(&dir.path().join("absent.json")).unwrap();
    assert!(store.fetch(&JobFilter::default()).is_empty());
}
