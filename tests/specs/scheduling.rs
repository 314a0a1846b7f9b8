//! Calendar scheduling: overlap rejection and the no-overlap invariant.

use crate::prelude::*;
use dispatch_core::{JobError, TimeWindow};
use dispatch_store::JobFilter;

#[test]
fn overlapping_reschedule_is_rejected_and_window_unchanged() {
    // Scenario B: W1 owns K at [11:00, 13:00); J to [10:00, 12:00) fails
    let (store, service) = harness();
    let w1 = worker("w-1");

    let k = service.create_job(booking("Job K")).unwrap();
    service.claim_job(&k.id, &w1).unwrap();
    service
        .update_job_schedule(&k.id, hour(11), hour(13), &w1)
        .unwrap();

    let j = service.create_job(booking("Job J")).unwrap();
    service.claim_job(&j.id, &w1).unwrap();

    let result = service.update_job_schedule(&j.id, hour(10), hour(12), &w1);
    match result {
        Err(JobError::SchedulingConflict {
            conflicting_job_id, ..
        }) => assert_eq!(conflicting_job_id, k.id),
        other => panic!("expected a scheduling conflict, got {other:?}"),
    }

    assert_eq!(store.get(&j.id).unwrap().window, None);
    assert_eq!(
        store.get(&k.id).unwrap().window,
        Some(window(hour(11), hour(13)))
    );
}

#[test]
fn adjacent_windows_are_allowed() {
    let (_store, service) = harness();
    let w1 = worker("w-1");

    let k = service.create_job(booking("Job K")).unwrap();
    service.claim_job(&k.id, &w1).unwrap();
    service
        .update_job_schedule(&k.id, hour(11), hour(13), &w1)
        .unwrap();

    let j = service.create_job(booking("Job J")).unwrap();
    service.claim_job(&j.id, &w1).unwrap();
    let scheduled = service
        .update_job_schedule(&j.id, hour(13), hour(15), &w1)
        .unwrap();

    assert_eq!(scheduled.window, Some(window(hour(13), hour(15))));
}

#[test]
fn no_overlap_invariant_survives_any_reschedule_sequence() {
    let (store, service) = harness();
    let w1 = worker("w-1");

    // three jobs, some reschedules succeed and some fail
    let mut ids = Vec::new();
    for title in ["A", "B", "C"] {
        let job = service.create_job(booking(title)).unwrap();
        service.claim_job(&job.id, &w1).unwrap();
        ids.push(job.id);
    }

    let attempts: &[(usize, u64, u64)] = &[
        (0, hour(9), hour(11)),
        (1, hour(10), hour(12)), // overlaps A
        (1, hour(11), hour(12)),
        (2, hour(11), hour(13)), // overlaps B
        (2, hour(12), hour(14)),
        (0, hour(13), hour(15)), // overlaps C
        (0, hour(8), hour(10)),
    ];
    for &(idx, start, end) in attempts {
        let _ = service.update_job_schedule(&ids[idx], start, end, &w1);
    }

    let jobs = store.fetch(&JobFilter::for_worker("w-1"));
    let windows: Vec<TimeWindow> = jobs.iter().filter_map(|j| j.window).collect();
    for (i, a) in windows.iter().enumerate() {
        for b in windows.iter().skip(i + 1) {
            assert!(!a.overlaps(b), "windows {a} and {b} overlap");
        }
    }
}

#[test]
fn different_workers_may_share_a_time_slot() {
    let (_store, service) = harness();

    let a = service.create_job(booking("A")).unwrap();
    service.claim_job(&a.id, &worker("w-1")).unwrap();
    service
        .update_job_schedule(&a.id, hour(9), hour(11), &worker("w-1"))
        .unwrap();

    let b = service.create_job(booking("B")).unwrap();
    service.claim_job(&b.id, &worker("w-2")).unwrap();
    let scheduled = service
        .update_job_schedule(&b.id, hour(9), hour(11), &worker("w-2"))
        .unwrap();

    assert!(scheduled.window.is_some());
}

fn hour(h: u64) -> u64 {
    h * 3_600_000
}

fn window(start: u64, end: u64) -> TimeWindow {
    TimeWindow::new(start, end).unwrap()
}
