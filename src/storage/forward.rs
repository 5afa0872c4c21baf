use std::fs;
use std::path::{Path, PathBuf};

use bytes::BytesMut;
use chrono::{DateTime, Utc};
use tokio_util::codec::{Encoder, LinesCodec};

use super::error::StorageError;
use crate::model::{CALL_TIME_FORMAT, Report, User};

// Narratives are wrapped to this width before encoding; the codec only
// enforces its max length when decoding.
const MAX_LINE: usize = 998;

/// Addresses of active accounts subscribed to the report's category.
pub fn recipients(report: &Report, users: &[User]) -> Vec<String> {
    users
        .iter()
        .filter(|u| u.active && !u.deleted && u.forward_categories.contains(&report.category))
        .map(|u| u.email.clone())
        .collect()
}

/// Formats the plain-text forward message for a report, one line per field.
pub fn format_forward(report: &Report, recipients: &[String]) -> Result<String, StorageError> {
    let mut codec = LinesCodec::new_with_max_length(MAX_LINE);
    let mut buf = BytesMut::new();

    let to = if recipients.is_empty() {
        "(no subscribers)".to_string()
    } else {
        recipients.join(", ")
    };
    let departments = report
        .departments
        .iter()
        .map(|d| d.label())
        .collect::<Vec<_>>()
        .join(", ");

    let mut lines = vec![
        format!("To: {to}"),
        format!("Subject: [{}] Report #{} {}", report.priority, report.id, report.summary),
        String::new(),
        format!("Caller: {}", report.caller_name),
        format!("Phone: {}", report.caller_phone),
        format!(
            "Received: {}",
            report.call_received.format(CALL_TIME_FORMAT)
        ),
        format!("Location: {}", report.location),
        format!("Category: {}", report.category),
        format!("Priority: {}", report.priority),
        format!("Departments: {departments}"),
        format!(
            "Emergency services dispatched: {}",
            yes_no(report.emergency_dispatched)
        ),
        format!("Follow-up required: {}", yes_no(report.follow_up)),
        String::new(),
    ];
    for line in report.narrative.lines() {
        lines.extend(wrap(line, MAX_LINE));
    }

    for line in lines {
        codec.encode(line, &mut buf)?;
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Writes the forward message into `outbox` and returns the file path.
pub fn write_forward(
    outbox: &Path,
    report: &Report,
    recipients: &[String],
    at: DateTime<Utc>,
) -> Result<PathBuf, StorageError> {
    let body = format_forward(report, recipients)?;
    fs::create_dir_all(outbox)?;
    let path = outbox.join(format!(
        "report-{}-{}.txt",
        report.id,
        at.format("%Y%m%dT%H%M%SZ")
    ));
    fs::write(&path, body)?;
    Ok(path)
}

fn yes_no(b: bool) -> &'static str {
    if b { "yes" } else { "no" }
}

// Splits a line into chunks of at most `max` characters.
fn wrap(line: &str, max: usize) -> Vec<String> {
    if line.is_empty() {
        return vec![String::new()];
    }
    let chars: Vec<char> = line.chars().collect();
    chars.chunks(max).map(|c| c.iter().collect()).collect()
}
