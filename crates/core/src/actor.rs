// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Actors: who is asking for a mutation.
//!
//! Worker-initiated operations are permission-gated (ownership, the worker
//! transition whitelist, lock gating). Admin operations bypass those gates
//! but still flow through the same conditional writes.

use serde::{Deserialize, Serialize};
use std::fmt;

crate::define_id! {
    /// Unique identifier for a worker.
    pub struct WorkerId;
}

/// The identity behind a request, used for permission checks and audit
/// attribution on [`crate::JobEvent`] records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Actor {
    Worker { id: WorkerId },
    Admin { id: String },
}

impl Actor {
    pub fn worker(id: impl Into<WorkerId>) -> Self {
        Actor::Worker { id: id.into() }
    }

    pub fn admin(id: impl Into<String>) -> Self {
        Actor::Admin { id: id.into() }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Actor::Admin { .. })
    }

    /// The worker behind this actor, if it is one.
    pub fn as_worker(&self) -> Option<&WorkerId> {
        match self {
            Actor::Worker { id } => Some(id),
            Actor::Admin { .. } => None,
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Actor::Worker { id } => write!(f, "worker:{id}"),
            Actor::Admin { id } => write!(f, "admin:{id}"),
        }
    }
}

#[cfg(test)]
#[path = "actor_tests.rs"]
mod tests;
