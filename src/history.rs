use crate::activity::{ActivityResult, ERROR_LABEL, NO_ACTIVITY_LABEL};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityFrequency {
    pub label: String,
    pub count: usize,
}

/// Newest-first log of successful classifications, bounded to `cap` entries.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    entries: VecDeque<ActivityResult>,
    cap: usize,
}

impl HistoryStore {
    pub fn new(cap: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(cap),
            cap,
        }
    }

    /// Error results are never kept.
    pub fn record(&mut self, result: ActivityResult) {
        if result.is_error() {
            return;
        }
        self.entries.push_front(result);
        self.entries.truncate(self.cap);
    }

    pub fn entries(&self) -> impl Iterator<Item = &ActivityResult> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Label counts, most frequent first, ignoring "Error" and "No Activity".
    /// Equal counts keep the order in which labels were first seen.
    pub fn aggregate(&self, top_n: usize) -> Vec<ActivityFrequency> {
        let mut frequencies: Vec<ActivityFrequency> = Vec::new();

        for entry in &self.entries {
            if entry.activity == ERROR_LABEL || entry.activity == NO_ACTIVITY_LABEL {
                continue;
            }
            match frequencies.iter_mut().find(|f| f.label == entry.activity) {
                Some(existing) => existing.count += 1,
                None => frequencies.push(ActivityFrequency {
                    label: entry.activity.clone(),
                    count: 1,
                }),
            }
        }

        frequencies.sort_by(|a, b| b.count.cmp(&a.count));
        frequencies.truncate(top_n);
        frequencies
    }
}
