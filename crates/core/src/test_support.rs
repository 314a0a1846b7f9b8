// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builders and fixtures shared by this crate's tests and (via the
//! `test-support` feature) by other crates' tests.

use crate::actor::WorkerId;
use crate::job::{Job, JobId, JobStatus, Pricing};
use crate::window::TimeWindow;

/// Build jobs in arbitrary (but invariant-respecting) states without going
/// through the engine's operations.
#[derive(Debug, Clone)]
pub struct JobBuilder {
    job: Job,
}

impl JobBuilder {
    pub fn pool(id: impl Into<JobId>) -> Self {
        Self {
            job: Job {
                id: id.into(),
                title: "Gutter cleaning".into(),
                description: "Clear and flush gutters".into(),
                address: "12 Elm St".into(),
                city: "Springfield".into(),
                status: JobStatus::Pool,
                assigned_worker_id: None,
                pricing: Pricing::Fixed { price_cents: 12_000 },
                bonus_cents: None,
                admin_set_price_cents: None,
                window: None,
                due_at_ms: None,
                locked: false,
                lock_reason: None,
                created_at_ms: 1_000,
                updated_at_ms: 1_000,
                version: 0,
            },
        }
    }

    /// A job already claimed by the given worker.
    pub fn assigned_to(id: impl Into<JobId>, worker: impl Into<WorkerId>) -> Self {
        let mut b = Self::pool(id);
        b.job.status = JobStatus::Assigned;
        b.job.assigned_worker_id = Some(worker.into());
        b
    }

    pub fn status(mut self, status: JobStatus) -> Self {
        self.job.status = status;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.job.title = title.into();
        self
    }

    pub fn window(mut self, window: TimeWindow) -> Self {
        self.job.window = Some(window);
        self
    }

    pub fn locked(mut self, reason: impl Into<String>) -> Self {
        self.job.locked = true;
        self.job.lock_reason = Some(reason.into());
        self
    }

    pub fn hourly(mut self, rate_cents: i64) -> Self {
        self.job.pricing = Pricing::Hourly { rate_cents };
        self
    }

    pub fn build(self) -> Job {
        self.job
    }
}

/// Shorthand for a window that must be valid.
#[allow(clippy::unwrap_used)]
pub fn window(start_ms: u64, end_ms: u64) -> TimeWindow {
    TimeWindow::new(start_ms, end_ms).unwrap()
}
