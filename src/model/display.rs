// File: ./src/model/display.rs
use crate::model::item::Task;
use chrono::NaiveDate;

/// Human-readable age of `created` as seen from `today`.
pub fn relative_date(created: NaiveDate, today: NaiveDate) -> String {
    let days = (today - created).num_days();
    if days <= 0 {
        return "today".to_string();
    }
    if days == 1 {
        return "1 day ago".to_string();
    }
    if days < 30 {
        return format!("{} days ago", days);
    }
    let months = days / 30;
    if months < 12 {
        return if months == 1 {
            "1 month ago".to_string()
        } else {
            format!("{} months ago", months)
        };
    }
    let years = days / 365;
    if years <= 1 {
        "1 year ago".to_string()
    } else {
        format!("{} years ago", years)
    }
}

/// Everything a list row shows for one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: usize,
    pub priority_label: String,
    pub age_label: Option<String>,
    pub text: String,
    pub completed: bool,
}

impl TaskRow {
    pub fn new(task: &Task, today: NaiveDate, show_date: bool) -> Self {
        Self {
            id: task.id(),
            priority_label: task.priority().to_string(),
            age_label: if show_date {
                task.relative_age(today)
            } else {
                None
            },
            text: task.in_screen_format(),
            completed: task.is_completed(),
        }
    }

    /// Single-line terminal rendering: `  3 (A) text  [2 days ago]`.
    pub fn to_line(&self) -> String {
        let mut s = format!("{:>3} ", self.id);
        if self.priority_label.is_empty() {
            s.push_str("    ");
        } else {
            s.push_str(&format!("({}) ", self.priority_label));
        }
        s.push_str(&self.text);
        if let Some(age) = &self.age_label {
            s.push_str(&format!("  [{}]", age));
        }
        s
    }
}
