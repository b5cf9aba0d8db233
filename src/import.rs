//! Bulk task import from tabular text.
//!
//! The payload is CSV-like: a header row naming the columns, then one
//! task per line. Recognized columns (case-insensitive): title,
//! category, priority, owner, duedate. Rows are untrusted and never
//! rejected; unrecognized values fall back to defaults.

use chrono::NaiveDate;
use std::path::Path;

use crate::core::task::{Category, Priority, Task};
use crate::{dlog_debug, Result};

/// Owner used when a row has no owner and the workspace has no team.
const FALLBACK_OWNER: &str = "Unknown";

/// Parse a tabular payload into new Pending tasks.
///
/// Every produced task starts Pending with empty comments,
/// dependencies, and history. A missing or empty owner column falls
/// back to the first team member, then to "Unknown". Short rows leave
/// their remaining fields at defaults.
pub fn parse_tasks(text: &str, team: &[String]) -> Vec<Task> {
    let mut lines = text.lines();
    let headers: Vec<String> = match lines.next() {
        Some(header) => header
            .split(',')
            .map(|h| h.trim().to_lowercase())
            .collect(),
        None => return Vec::new(),
    };
    let fallback_owner = team
        .first()
        .cloned()
        .unwrap_or_else(|| FALLBACK_OWNER.to_string());

    lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let values: Vec<&str> = line.split(',').map(|v| v.trim()).collect();
            let field = |name: &str| -> Option<&str> {
                headers
                    .iter()
                    .position(|h| h == name)
                    .and_then(|i| values.get(i))
                    .copied()
                    .filter(|v| !v.is_empty())
            };

            let title = field("title").unwrap_or("Untitled");
            let category = Category::parse_lossy(field("category").unwrap_or(""));
            let priority = Priority::parse_lossy(field("priority").unwrap_or(""));
            let owner = field("owner")
                .map(str::to_string)
                .unwrap_or_else(|| fallback_owner.clone());

            let mut task = Task::new(title, category, priority, &owner);
            task.due_date =
                field("duedate").and_then(|v| NaiveDate::parse_from_str(v, "%Y-%m-%d").ok());
            task
        })
        .collect()
}

/// Read and parse an import file from disk.
pub fn load_file(path: &Path, team: &[String]) -> Result<Vec<Task>> {
    let text = std::fs::read_to_string(path)?;
    let tasks = parse_tasks(&text, team);
    dlog_debug!("import: {} tasks from {}", tasks.len(), path.display());
    Ok(tasks)
}
