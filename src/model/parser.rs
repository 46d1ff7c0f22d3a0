// File: src/model/parser.rs
use crate::model::Priority;
use chrono::NaiveDate;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_LEN: usize = 10;

/// Insertion-ordered set of tag tokens (`@ctx` or `+proj`).
#[derive(Debug, Clone, Default)]
pub struct TagSet {
    items: Vec<String>,
    index: HashSet<String>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the tag was already present.
    pub fn insert(&mut self, tag: &str) -> bool {
        if self.index.contains(tag) {
            return false;
        }
        self.index.insert(tag.to_string());
        self.items.push(tag.to_string());
        true
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.index.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.items.clone()
    }
}

// The index mirrors `items`, so only the ordered sequence takes part.
impl PartialEq for TagSet {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Eq for TagSet {}

impl Hash for TagSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.items.hash(state);
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Structured result of scanning one todo.txt line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub completed: bool,
    pub completion_date: Option<NaiveDate>,
    pub priority: Priority,
    pub prepended_date: Option<NaiveDate>,
    pub text: String,
    pub contexts: TagSet,
    pub projects: TagSet,
}

/// Scans a raw line left to right: completion marker and dates, priority,
/// creation date, then the body. Never fails; anything unrecognized stays in
/// the body.
pub fn parse_line(raw: &str) -> ParsedLine {
    let mut rest = raw;
    let mut completed = false;
    let mut completion_date = None;
    let mut prepended_date = None;
    let mut priority = Priority::None;

    if let Some(after) = rest.strip_prefix("x ") {
        completed = true;
        rest = after;
        if let Some((date, after)) = strip_date(rest) {
            completion_date = Some(date);
            rest = after;
            if let Some((date, after)) = strip_date(rest) {
                prepended_date = Some(date);
                rest = after;
            }
        }
    }

    if let Some((p, after)) = strip_priority(rest) {
        // Completed lines carry no priority on the wire; a stray marker is dropped.
        if !completed {
            priority = p;
        }
        rest = after;
    }

    if prepended_date.is_none()
        && let Some((date, after)) = strip_date(rest)
    {
        prepended_date = Some(date);
        rest = after;
    }

    let text = rest.to_string();
    let (contexts, projects) = extract_tags(&text);

    ParsedLine {
        completed,
        completion_date,
        priority,
        prepended_date,
        text,
        contexts,
        projects,
    }
}

/// Collects `@context` and `+project` tokens in order of first appearance.
pub fn extract_tags(text: &str) -> (TagSet, TagSet) {
    let mut contexts = TagSet::new();
    let mut projects = TagSet::new();

    for word in text.split_whitespace() {
        let target = match word.chars().next() {
            Some('@') => &mut contexts,
            Some('+') => &mut projects,
            _ => continue,
        };
        if let Some(tag) = normalize_tag(word) {
            target.insert(tag);
        }
    }
    (contexts, projects)
}

/// Drops trailing ASCII punctuation ("@home," -> "@home"). Returns None for a
/// bare sigil.
fn normalize_tag(word: &str) -> Option<&str> {
    let body = word[1..].trim_end_matches(|c: char| c.is_ascii_punctuation());
    if body.is_empty() {
        return None;
    }
    Some(&word[..1 + body.len()])
}

/// Parses a strict `YYYY-MM-DD` token.
pub fn parse_date(token: &str) -> Option<NaiveDate> {
    let bytes = token.as_bytes();
    if bytes.len() != DATE_LEN {
        return None;
    }
    let shape_ok = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    if !shape_ok {
        return None;
    }
    NaiveDate::parse_from_str(token, DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Consumes a date token that is followed by a space or ends the line.
fn strip_date(s: &str) -> Option<(NaiveDate, &str)> {
    let token = s.get(..DATE_LEN)?;
    let date = parse_date(token)?;
    let after = &s[DATE_LEN..];
    if after.is_empty() {
        return Some((date, after));
    }
    after.strip_prefix(' ').map(|rest| (date, rest))
}

/// Consumes `(X) ` with `X` in `A..=Z`.
fn strip_priority(s: &str) -> Option<(Priority, &str)> {
    let bytes = s.as_bytes();
    if bytes.len() < 4 || bytes[0] != b'(' || bytes[2] != b')' || bytes[3] != b' ' {
        return None;
    }
    let letter = bytes[1] as char;
    if !letter.is_ascii_uppercase() {
        return None;
    }
    Some((Priority::from_letter(letter), &s[4..]))
}
