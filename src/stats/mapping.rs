use std::{cmp::Ordering, collections::HashMap};

use serde::Serialize;

use super::pitch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    /// Lexicographic by label, ties by count ascending.
    Label,
    /// By count, ties by label ascending.
    Value,
    /// By position in the pitch class table. Unknown labels go last.
    PitchClass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub by: SortBy,
    pub descending: bool,
}

impl Sort {
    pub fn ascending(by: SortBy) -> Self {
        Self {
            by,
            descending: false,
        }
    }

    pub fn descending(by: SortBy) -> Self {
        Self {
            by,
            descending: true,
        }
    }
}

/// Sort first, then truncate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderOptions {
    pub sort: Option<Sort>,
    pub truncate: Option<usize>,
}

impl OrderOptions {
    pub fn sorted(sort: Sort) -> Self {
        Self {
            sort: Some(sort),
            truncate: None,
        }
    }

    pub fn truncate(mut self, len: usize) -> Self {
        self.truncate = Some(len);
        self
    }
}

/// Parallel label/count lists, the shape charting clients expect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrderedPairs {
    pub keys: Vec<String>,
    pub values: Vec<u64>,
}

impl OrderedPairs {
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Occurrence counts per label.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    counts: HashMap<String, u64>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds `labels` with a zero count so they show up even when never pushed.
    pub fn with_defaults<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            counts: labels.into_iter().map(|l| (l.into(), 0)).collect(),
        }
    }

    pub fn push(&mut self, label: impl Into<String>) {
        *self.counts.entry(label.into()).or_insert(0) += 1;
    }

    pub fn get(&self, label: &str) -> u64 {
        self.counts.get(label).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn to_ordered(&self, options: OrderOptions) -> OrderedPairs {
        let mut entries: Vec<(&str, u64)> = self
            .counts
            .iter()
            .map(|(label, count)| (label.as_str(), *count))
            .collect();

        if let Some(sort) = options.sort {
            entries.sort_by(|a, b| compare(sort, a, b));
        }
        if let Some(len) = options.truncate {
            entries.truncate(len);
        }

        let (keys, values): (Vec<String>, Vec<u64>) = entries
            .into_iter()
            .map(|(label, count)| (label.to_string(), count))
            .unzip();
        OrderedPairs { keys, values }
    }
}

fn compare(sort: Sort, a: &(&str, u64), b: &(&str, u64)) -> Ordering {
    let directed = |ord: Ordering| if sort.descending { ord.reverse() } else { ord };

    match sort.by {
        SortBy::Label => directed(a.0.cmp(b.0).then(a.1.cmp(&b.1))),
        SortBy::Value => directed(a.1.cmp(&b.1)).then_with(|| a.0.cmp(b.0)),
        SortBy::PitchClass => {
            let rank = |label: &str| pitch::pitch_index(label).unwrap_or(pitch::PITCH_CLASSES.len());
            directed(rank(a.0).cmp(&rank(b.0))).then_with(|| a.0.cmp(b.0))
        }
    }
}
