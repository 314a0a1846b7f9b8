// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Environment-variable policy knobs for the engine.

/// When set to `"1"`, booking-time slot checks scan every scheduled job
/// instead of only the target worker's (see `ConflictPolicy::GlobalSlot`).
pub const GLOBAL_SLOT_CHECK: &str = "DISPATCH_GLOBAL_SLOT_CHECK";

pub fn global_slot_check_enabled() -> bool {
    std::env::var(GLOBAL_SLOT_CHECK)
        .map(|v| v == "1")
        .unwrap_or(false)
}
