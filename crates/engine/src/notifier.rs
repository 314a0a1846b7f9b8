// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Realtime notifier: store changes to "refetch" hints.
//!
//! Observes the store's change stream and pushes an opaque signal to the
//! views a change affects (job pool list, admin calendar). The signal is a
//! hint to re-query, never a delta payload: delivery is at-least-once and
//! unordered relative to other subscribers. A caller's own mutation result
//! is authoritative without waiting for the hint — this channel exists for
//! *other* observers.

use async_trait::async_trait;
use dispatch_core::JobEventKind;
use dispatch_store::StoreChange;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Buffered hints per viewer. A lagging viewer skips straight to the
/// newest hint, which collapses to the same outcome: refetch.
const HINT_BUFFER: usize = 16;

/// Views a client can watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// The unclaimed-jobs list workers watch.
    JobPool,
    /// The admin scheduling calendar.
    Calendar,
}

const ALL_VIEWS: [View; 2] = [View::JobPool, View::Calendar];

/// The opaque "something changed, refetch" signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Refetch;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("push transport failed: {0}")]
    Transport(String),
}

/// Seam for delivering hints to connected viewers.
#[async_trait]
pub trait PushTransport: Send + Sync {
    async fn push(&self, view: View) -> Result<(), NotifyError>;
}

/// In-process transport: one broadcast channel per view.
pub struct BroadcastTransport {
    pool_tx: broadcast::Sender<Refetch>,
    calendar_tx: broadcast::Sender<Refetch>,
}

impl Default for BroadcastTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl BroadcastTransport {
    pub fn new() -> Self {
        let (pool_tx, _) = broadcast::channel(HINT_BUFFER);
        let (calendar_tx, _) = broadcast::channel(HINT_BUFFER);
        Self {
            pool_tx,
            calendar_tx,
        }
    }

    pub fn subscribe(&self, view: View) -> broadcast::Receiver<Refetch> {
        match view {
            View::JobPool => self.pool_tx.subscribe(),
            View::Calendar => self.calendar_tx.subscribe(),
        }
    }
}

#[async_trait]
impl PushTransport for BroadcastTransport {
    async fn push(&self, view: View) -> Result<(), NotifyError> {
        // send() errs only when nobody is watching the view, which is fine
        let _ = match view {
            View::JobPool => self.pool_tx.send(Refetch),
            View::Calendar => self.calendar_tx.send(Refetch),
        };
        Ok(())
    }
}

/// Transport that drops every hint (headless deployments, tests).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTransport;

#[async_trait]
impl PushTransport for NoopTransport {
    async fn push(&self, _view: View) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Which views a change invalidates.
fn affected_views(change: &StoreChange) -> &'static [View] {
    match change {
        StoreChange::Inserted { .. } => &[View::JobPool],
        StoreChange::Updated { event, .. } => match event {
            JobEventKind::Rescheduled { .. } => &[View::Calendar],
            JobEventKind::Claimed { .. }
            | JobEventKind::ReturnedToPool { .. }
            | JobEventKind::Locked { .. }
            | JobEventKind::Unlocked
            | JobEventKind::StatusChanged { .. }
            | JobEventKind::Reassigned { .. } => &ALL_VIEWS,
        },
    }
}

/// Bridges the store's change stream to a push transport.
pub struct RealtimeNotifier;

impl RealtimeNotifier {
    /// Spawn the bridge task. It runs until the store (and every other
    /// change sender) is dropped.
    pub fn spawn(
        mut changes: broadcast::Receiver<StoreChange>,
        transport: Arc<dyn PushTransport>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                match changes.recv().await {
                    Ok(change) => {
                        debug!(change = ?change, "routing store change");
                        for view in affected_views(&change) {
                            if let Err(e) = transport.push(*view).await {
                                warn!(error = %e, view = ?view, "push failed, viewers will poll stale data");
                            }
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        // Missed signals collapse into one refetch-everything hint
                        warn!(skipped, "change stream lagged");
                        for view in ALL_VIEWS {
                            if let Err(e) = transport.push(view).await {
                                warn!(error = %e, view = ?view, "push failed after lag");
                            }
                        }
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }
}

#[cfg(test)]
#[path = "notifier_tests.rs"]
mod tests;
