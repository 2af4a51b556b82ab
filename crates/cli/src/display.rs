// SPDX-License-Identifier: MIT
// Copyright (c) 2026 trk contributors

use chrono::Duration;
use trk_core::{Issue, TimelineEvent};

/// Format a single issue line for list output.
pub fn format_issue_line(issue: &Issue) -> String {
    let assignee = match issue.assignee_id {
        Some(id) => format!(", @{}", id),
        None => String::new(),
    };
    format!(
        "#{} [{}{}] v{} {}",
        issue.id, issue.status, assignee, issue.version, issue.title
    )
}

/// Format issue details for the show command.
pub fn format_issue_details(issue: &Issue, labels: &[String]) -> String {
    let mut output = Vec::new();

    output.push(format!("Issue #{}", issue.id));
    output.push(format!("Title: {}", issue.title));
    output.push(format!("Status: {}", issue.status));
    if let Some(assignee) = issue.assignee_id {
        output.push(format!("Assignee: {}", assignee));
    }
    if !labels.is_empty() {
        output.push(format!("Labels: {}", labels.join(", ")));
    }
    output.push(format!("Version: {}", issue.version));
    output.push(format!(
        "Created: {}",
        issue.created_at.format("%Y-%m-%d %H:%M")
    ));
    if let Some(resolved) = issue.resolved_at {
        output.push(format!("Resolved: {}", resolved.format("%Y-%m-%d %H:%M")));
    }
    if let Some(description) = &issue.description {
        output.push(String::new());
        output.push(description.clone());
    }

    output.join("\n")
}

/// Format a single timeline event for log output.
pub fn format_event(event: &TimelineEvent) -> String {
    let timestamp = event.created_at.format("%Y-%m-%d %H:%M");
    format!("  {}  {}  {}", timestamp, event.event_type, event.details)
}

/// Render a duration as a compact human-readable string.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.num_seconds();
    if secs < 60 {
        return format!("{}s", secs);
    }
    let mins = secs / 60;
    if mins < 60 {
        return format!("{}m {}s", mins, secs % 60);
    }
    let hours = mins / 60;
    if hours < 24 {
        return format!("{}h {}m", hours, mins % 60);
    }
    format!("{}d {}h", hours / 24, hours % 24)
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
