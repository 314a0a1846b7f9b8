//! Realtime notifier: push hints reach the affected views.

use crate::prelude::*;
use dispatch_core::JobStatus;
use dispatch_engine::{BroadcastTransport, RealtimeNotifier, View};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(2);

#[tokio::test]
async fn pool_viewers_hear_about_new_and_claimed_jobs() {
    let (store, service) = harness();
    let transport = Arc::new(BroadcastTransport::new());
    let mut pool_rx = transport.subscribe(View::JobPool);
    let _task = RealtimeNotifier::spawn(store.subscribe(), transport.clone());

    let job = service.create_job(booking("J")).unwrap();
    timeout(WAIT, pool_rx.recv()).await.unwrap().unwrap();

    service.claim_job(&job.id, &worker("w-1")).unwrap();
    timeout(WAIT, pool_rx.recv()).await.unwrap().unwrap();
}

#[tokio::test]
async fn calendar_viewers_hear_about_lock_and_status_changes() {
    let (store, service) = harness();
    let job = service.create_job(booking("J")).unwrap();
    service.claim_job(&job.id, &worker("w-1")).unwrap();

    let transport = Arc::new(BroadcastTransport::new());
    let mut cal_rx = transport.subscribe(View::Calendar);
    let _task = RealtimeNotifier::spawn(store.subscribe(), transport.clone());

    service.lock_job(&job.id, "dispute", &admin()).unwrap();
    timeout(WAIT, cal_rx.recv()).await.unwrap().unwrap();

    service.unlock_job(&job.id, &admin()).unwrap();
    timeout(WAIT, cal_rx.recv()).await.unwrap().unwrap();

    service
        .set_job_status(&job.id, JobStatus::InProgress, &worker("w-1"))
        .unwrap();
    timeout(WAIT, cal_rx.recv()).await.unwrap().unwrap();
}

#[tokio::test]
async fn late_subscribers_only_see_later_changes() {
    let (store, service) = harness();
    let job = service.create_job(booking("J")).unwrap();

    // subscribe after the insert: only the claim should arrive
    let transport = Arc::new(BroadcastTransport::new());
    let mut pool_rx = transport.subscribe(View::JobPool);
    let _task = RealtimeNotifier::spawn(store.subscribe(), transport.clone());

    service.claim_job(&job.id, &worker("w-1")).unwrap();

    timeout(WAIT, pool_rx.recv()).await.unwrap().unwrap();
    assert!(timeout(Duration::from_millis(100), pool_rx.recv())
        .await
        .is_err());
}

#[tokio::test]
async fn rejected_mutations_push_nothing() {
    let (store, service) = harness();
    let job = service.create_job(booking("J")).unwrap();
    service.claim_job(&job.id, &worker("w-1")).unwrap();

    let transport = Arc::new(BroadcastTransport::new());
    let mut pool_rx = transport.subscribe(View::JobPool);
    let mut cal_rx = transport.subscribe(View::Calendar);
    let _task = RealtimeNotifier::spawn(store.subscribe(), transport.clone());

    // loses the ownership check, so no write and no signal
    let _ = service.set_job_status(&job.id, JobStatus::InProgress, &worker("w-2"));

    assert!(timeout(Duration::from_millis(100), pool_rx.recv())
        .await
        .is_err());
    assert!(timeout(Duration::from_millis(100), cal_rx.recv())
        .await
        .is_err());
}
