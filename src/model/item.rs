// File: ./src/model/item.rs
use super::parser::{self, TagSet};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use strum::{EnumIter, IntoEnumIterator};

/// Task priority. Declaration order is sort order: `A` first, `None` last.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
)]
pub enum Priority {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    #[default]
    None,
}

impl Priority {
    /// Maps `'A'..='Z'` to its priority; any other char yields `None`.
    pub fn from_letter(c: char) -> Self {
        if !c.is_ascii_uppercase() {
            return Priority::None;
        }
        Priority::iter()
            .nth((c as u8 - b'A') as usize)
            .unwrap_or(Priority::None)
    }

    pub fn letter(self) -> Option<char> {
        match self {
            Priority::None => None,
            p => Some((b'A' + p as u8) as char),
        }
    }

    pub fn is_set(self) -> bool {
        self != Priority::None
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.letter() {
            Some(c) => write!(f, "{}", c),
            None => Ok(()),
        }
    }
}

impl FromStr for Priority {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("none") || trimmed == "-" {
            return Ok(Priority::None);
        }
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => {
                Ok(Priority::from_letter(c.to_ascii_uppercase()))
            }
            _ => Err(anyhow::anyhow!("Invalid priority '{}': expected A-Z or none", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Task {
    id: usize,
    original_text: String,
    original_priority: Priority,
    priority: Priority,
    /// Priority held when the task was completed, restored by `mark_incomplete`.
    stashed_priority: Option<Priority>,
    completed: bool,
    deleted: bool,
    completion_date: Option<NaiveDate>,
    prepended_date: Option<NaiveDate>,
    text: String,
    contexts: TagSet,
    projects: TagSet,
}

impl Task {
    pub fn new(id: usize, raw: &str) -> Self {
        Self::build(id, raw, None)
    }

    /// Like `new`, but stamps `default_date` as the creation date when the
    /// line has none.
    pub fn with_default_date(id: usize, raw: &str, default_date: NaiveDate) -> Self {
        Self::build(id, raw, Some(default_date))
    }

    fn build(id: usize, raw: &str, default_date: Option<NaiveDate>) -> Self {
        let mut task = Self {
            id,
            original_text: String::new(),
            original_priority: Priority::None,
            priority: Priority::None,
            stashed_priority: None,
            completed: false,
            deleted: false,
            completion_date: None,
            prepended_date: None,
            text: String::new(),
            contexts: TagSet::new(),
            projects: TagSet::new(),
        };
        task.apply_line(raw);
        if task.prepended_date.is_none() {
            task.prepended_date = default_date;
        }
        task
    }

    fn apply_line(&mut self, raw: &str) {
        let parsed = parser::parse_line(raw);
        self.original_text = raw.to_string();
        self.original_priority = parsed.priority;
        self.priority = parsed.priority;
        self.stashed_priority = None;
        self.completed = parsed.completed;
        self.completion_date = parsed.completion_date;
        self.prepended_date = parsed.prepended_date;
        self.text = parsed.text;
        self.contexts = parsed.contexts;
        self.projects = parsed.projects;
    }

    // --- ACCESSORS ---

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    pub fn original_priority(&self) -> Priority {
        self.original_priority
    }

    /// Wire priority: always `None` while the task is completed.
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Priority that `mark_incomplete` will restore, if any.
    pub fn stashed_priority(&self) -> Option<Priority> {
        self.stashed_priority
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn completion_date(&self) -> Option<NaiveDate> {
        self.completion_date
    }

    pub fn prepended_date(&self) -> Option<NaiveDate> {
        self.prepended_date
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn contexts(&self) -> &TagSet {
        &self.contexts
    }

    pub fn projects(&self) -> &TagSet {
        &self.projects
    }

    pub fn relative_age(&self, today: NaiveDate) -> Option<String> {
        self.prepended_date
            .map(|created| super::display::relative_date(created, today))
    }

    pub fn priority_changed(&self) -> bool {
        self.priority != self.original_priority
    }

    // --- MUTATION ---

    /// Re-parses `raw` into this task. The id is kept and no default
    /// creation date is stamped.
    pub fn update(&mut self, raw: &str) {
        self.apply_line(raw);
    }

    pub fn mark_complete(&mut self, date: NaiveDate) {
        if self.completed {
            return;
        }
        self.completed = true;
        self.completion_date = Some(date);
        if self.priority.is_set() {
            self.stashed_priority = Some(self.priority);
        }
        self.priority = Priority::None;
    }

    pub fn mark_incomplete(&mut self) {
        if !self.completed {
            return;
        }
        self.completed = false;
        self.completion_date = None;
        if let Some(p) = self.stashed_priority.take() {
            self.priority = p;
        }
    }

    /// On a completed task only the stashed priority changes.
    pub fn set_priority(&mut self, priority: Priority) {
        if self.completed {
            self.stashed_priority = priority.is_set().then_some(priority);
        } else {
            self.priority = priority;
        }
    }

    pub fn delete_task(&mut self) {
        self.deleted = true;
    }

    /// Copies every field except `id` into `destination`.
    pub fn copy_into(&self, destination: &mut Task) {
        let id = destination.id;
        *destination = self.clone();
        destination.id = id;
    }

    // --- SERIALIZATION ---

    /// Canonical todo.txt line. `today` fills in a missing completion date.
    ///
    /// The format has no escaping: an open, unprioritized, undated task whose
    /// text starts with `x `, `(X) ` or a date reads back with that prefix taken
    /// as a marker.
    pub fn in_file_format(&self, today: NaiveDate) -> String {
        let mut s = String::new();
        if self.completed {
            let done = self.completion_date.unwrap_or(today);
            s.push_str(&format!("x {} ", parser::format_date(done)));
        } else if let Some(c) = self.priority.letter() {
            s.push_str(&format!("({}) ", c));
        }
        if let Some(created) = self.prepended_date {
            s.push_str(&parser::format_date(created));
            s.push(' ');
        }
        s.push_str(&self.text);
        s
    }

    /// Inline text for list rows. Priority and age are rendered by the row
    /// itself (see `display::TaskRow`).
    pub fn in_screen_format(&self) -> String {
        if !self.completed {
            return self.text.clone();
        }
        match self.completion_date {
            Some(d) => format!("x {} {}", parser::format_date(d), self.text),
            None => format!("x {}", self.text),
        }
    }

    // --- ORDERING ---

    pub fn compare_by_id_ascending(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }

    pub fn compare_by_id_descending(&self, other: &Self) -> Ordering {
        other.id.cmp(&self.id)
    }

    /// `A` < … < `Z` < `None`. Ties are left to a stable sort.
    pub fn compare_by_priority(&self, other: &Self) -> Ordering {
        self.priority.cmp(&other.priority)
    }

    /// Case-sensitive, by `str` ordering.
    pub fn compare_by_text_ascending(&self, other: &Self) -> Ordering {
        self.text.cmp(&other.text)
    }
}
