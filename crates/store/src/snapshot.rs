// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Snapshot persistence for the job store.
//!
//! A snapshot is the complete store contents (jobs plus the audit log) as
//! one JSON document, written atomically so a crash mid-save never leaves
//! a torn file behind.

use chrono::{DateTime, Utc};
use dispatch_core::{Job, JobEvent};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur in snapshot operations
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Complete store contents at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub jobs: Vec<Job>,
    pub events: Vec<JobEvent>,
    /// When this snapshot was created
    pub created_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(jobs: Vec<Job>, events: Vec<JobEvent>) -> Self {
        Self {
            jobs,
            events,
            created_at: Utc::now(),
        }
    }

    /// Save atomically (write to .tmp, sync, then rename).
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("tmp");
        {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer(&mut writer, self)?;
            let file = writer.into_inner().map_err(|e| e.into_error())?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, path)?;

        Ok(())
    }

    /// Load a snapshot if one exists.
    ///
    /// Returns `Ok(None)` if the file doesn't exist or is corrupt. A
    /// corrupt snapshot is moved to a `.bak` file so the store can start
    /// empty instead of refusing to boot.
    pub fn load(path: &Path) -> Result<Option<Self>, SnapshotError> {
        if !path.exists() {
            return Ok(None);
        }

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        match serde_json::from_reader(reader) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(e) => {
                let bak_path = path.with_extension("bak");
                warn!(
                    error = %e,
                    path = %path.display(),
                    bak = %bak_path.display(),
                    "corrupt snapshot, moving to .bak and starting empty",
                );
                fs::rename(path, &bak_path)?;
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
