// SPDX-License-Identifier: MIT
// Copyright (c) 2026 trk contributors

//! Replay helpers over the append-only event log.
//!
//! The timeline is the audit trail: replaying an issue's events in
//! order must reconstruct a status history whose final entry matches
//! the issue's current status.

use chrono::{DateTime, Utc};

use crate::issue::{EventType, Status, TimelineEvent};

/// Reconstructs the status history of an issue from its ordered event
/// sequence. The creation event contributes the initial status;
/// status_changed events contribute each transition. Events with a
/// missing or unparseable status value are skipped rather than
/// aborting the replay.
pub fn status_history(events: &[TimelineEvent]) -> Vec<(DateTime<Utc>, Status)> {
    events
        .iter()
        .filter(|e| matches!(e.event_type, EventType::Created | EventType::StatusChanged))
        .filter_map(|e| {
            let status: Status = e.new_value.as_deref()?.parse().ok()?;
            Some((e.created_at, status))
        })
        .collect()
}

/// The status an issue ends up in after replaying `events` in order,
/// or None for an empty (or status-free) log.
pub fn replay_status(events: &[TimelineEvent]) -> Option<Status> {
    status_history(events).last().map(|(_, status)| *status)
}

#[cfg(test)]
#[path = "timeline_tests.rs"]
mod tests;
