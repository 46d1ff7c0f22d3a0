// File: ./src/model/sort.rs
use crate::model::Task;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use strum::{EnumIter, IntoEnumIterator};

/// Sort modes offered by the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "kebab-case")]
pub enum Sort {
    #[default]
    Priority,
    #[serde(alias = "id")]
    IdAscending,
    #[serde(alias = "id-desc")]
    IdDescending,
    #[serde(alias = "text")]
    TextAscending,
}

impl Sort {
    pub fn compare(self, a: &Task, b: &Task) -> Ordering {
        match self {
            Sort::Priority => a.compare_by_priority(b),
            Sort::IdAscending => a.compare_by_id_ascending(b),
            Sort::IdDescending => a.compare_by_id_descending(b),
            Sort::TextAscending => a.compare_by_text_ascending(b),
        }
    }

    /// Short name used on the command line and in the config file.
    pub fn key(self) -> &'static str {
        match self {
            Sort::Priority => "priority",
            Sort::IdAscending => "id",
            Sort::IdDescending => "id-desc",
            Sort::TextAscending => "text",
        }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sort::Priority => write!(f, "Priority"),
            Sort::IdAscending => write!(f, "Oldest first"),
            Sort::IdDescending => write!(f, "Newest first"),
            Sort::TextAscending => write!(f, "Alphabetical"),
        }
    }
}

impl FromStr for Sort {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Sort::iter()
            .find(|mode| mode.key() == lower)
            .or(match lower.as_str() {
                "id-ascending" => Some(Sort::IdAscending),
                "id-descending" => Some(Sort::IdDescending),
                "text-ascending" => Some(Sort::TextAscending),
                _ => None,
            })
            .ok_or_else(|| {
                let keys: Vec<&str> = Sort::iter().map(Sort::key).collect();
                anyhow::anyhow!("Unknown sort '{}'. Expected one of: {}", s, keys.join(", "))
            })
    }
}
