// SPDX-License-Identifier: MIT
// Copyright (c) 2026 trk contributors

#![allow(clippy::unwrap_used)]

use super::*;

fn event(event_type: EventType, new_value: Option<&str>) -> TimelineEvent {
    TimelineEvent::new(1, event_type, "test").with_values(None, new_value.map(String::from))
}

#[test]
fn replay_of_empty_log_is_none() {
    assert_eq!(replay_status(&[]), None);
}

#[test]
fn creation_event_sets_initial_status() {
    let events = vec![event(EventType::Created, Some("open"))];
    assert_eq!(replay_status(&events), Some(Status::Open));
}

#[test]
fn replay_follows_status_transitions_in_order() {
    let events = vec![
        event(EventType::Created, Some("open")),
        event(EventType::StatusChanged, Some("in_progress")),
        event(EventType::CommentAdded, None),
        event(EventType::StatusChanged, Some("closed")),
    ];

    let history = status_history(&events);
    let statuses: Vec<Status> = history.iter().map(|(_, s)| *s).collect();
    assert_eq!(
        statuses,
        vec![Status::Open, Status::InProgress, Status::Closed]
    );
    assert_eq!(replay_status(&events), Some(Status::Closed));
}

#[test]
fn non_status_events_are_ignored() {
    let events = vec![
        event(EventType::Created, Some("open")),
        event(EventType::AssigneeChanged, Some("3")),
        event(EventType::LabelChanged, Some("1,2")),
        event(EventType::Edited, Some("New title")),
    ];
    assert_eq!(replay_status(&events), Some(Status::Open));
}

#[test]
fn unparseable_status_values_are_skipped() {
    let events = vec![
        event(EventType::Created, Some("open")),
        event(EventType::StatusChanged, None),
        event(EventType::StatusChanged, Some("bogus")),
    ];
    assert_eq!(replay_status(&events), Some(Status::Open));
}
