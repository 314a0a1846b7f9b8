// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Half-open scheduling windows.

use crate::error::JobError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A half-open time interval `[start_ms, end_ms)` in epoch milliseconds.
///
/// The constructor rejects empty and inverted intervals, so a `TimeWindow`
/// held anywhere in the system is always well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    start_ms: u64,
    end_ms: u64,
}

impl TimeWindow {
    pub fn new(start_ms: u64, end_ms: u64) -> Result<Self, JobError> {
        if start_ms >= end_ms {
            return Err(JobError::Validation(format!(
                "scheduled window must have start < end (got [{start_ms}, {end_ms}))"
            )));
        }
        Ok(Self { start_ms, end_ms })
    }

    pub fn start_ms(&self) -> u64 {
        self.start_ms
    }

    pub fn end_ms(&self) -> u64 {
        self.end_ms
    }

    pub fn duration_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }

    /// Half-open overlap: `[s1,e1)` and `[s2,e2)` conflict iff
    /// `s1 < e2 && s2 < e1`. Windows that merely touch do not overlap.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start_ms < other.end_ms && other.start_ms < self.end_ms
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start_ms, self.end_ms)
    }
}

#[cfg(test)]
#[path = "window_tests.rs"]
mod tests;
