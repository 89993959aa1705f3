use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

/// Global output format setting
static OUTPUT_JSON: AtomicBool = AtomicBool::new(false);

pub fn set_json_output(json: bool) {
    OUTPUT_JSON.store(json, Ordering::Relaxed);
}

pub fn is_json_output() -> bool {
    OUTPUT_JSON.load(Ordering::Relaxed)
}

/// Print a table or JSON depending on output mode
pub fn print_table<T, R, F>(items: &[T], to_row: F)
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if is_json_output() {
        println!("{}", serde_json::to_string_pretty(items).unwrap_or_default());
    } else {
        let rows: Vec<R> = items.iter().map(|item| to_row(item)).collect();
        let table = Table::new(rows).with(Style::rounded()).to_string();
        println!("{table}");
    }
}

/// Print a message (prints a simple object in JSON mode)
pub fn print_message(message: &str) {
    if is_json_output() {
        println!(r#"{{"message": "{}"}}"#, message.replace('"', "\\\""));
    } else {
        println!("{message}");
    }
}

/// Print an error line to stderr (prints a simple object in JSON mode)
pub fn print_error(message: &str) {
    if is_json_output() {
        eprintln!(r#"{{"error": "{}"}}"#, message.replace('"', "\\\""));
    } else {
        eprintln!("{message}");
    }
}

/// Format a timestamp relative to now (e.g., "2 days ago")
pub fn format_relative(at: &DateTime<Utc>) -> String {
    let diff = Utc::now().signed_duration_since(at);

    if diff.num_seconds() < 60 {
        "just now".to_string()
    } else if diff.num_minutes() < 60 {
        let mins = diff.num_minutes();
        format!("{} min{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if diff.num_hours() < 24 {
        let hours = diff.num_hours();
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else if diff.num_days() < 30 {
        let days = diff.num_days();
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    } else {
        at.format("%Y-%m-%d").to_string()
    }
}

/// Truncate a string with ellipsis
pub fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}...", &s[..max - 3])
    }
}
