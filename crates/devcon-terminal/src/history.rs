//! Submission history for the input line.

use std::collections::VecDeque;

/// Recently submitted lines, newest first, with an up/down recall cursor.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<String>,
    limit: usize,
    cursor: Option<usize>,
    draft: String,
}

impl History {
    /// Create an empty history that keeps at most `limit` lines.
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit),
            limit,
            cursor: None,
            draft: String::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Change the limit, dropping the oldest entries that no longer fit.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
        self.entries.truncate(limit);
        if self.cursor.is_some_and(|c| c >= limit) {
            self.cursor = None;
        }
    }

    /// Entry `index` places back (0 = newest).
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Record a submitted line. Blank lines and repeats of the newest entry
    /// are ignored. Recall starts over afterwards.
    pub fn push(&mut self, line: &str) {
        self.cursor = None;
        self.draft.clear();
        if line.trim().is_empty() || self.limit == 0 {
            return;
        }
        if self.entries.front().is_some_and(|newest| newest == line) {
            return;
        }
        self.entries.push_front(line.to_string());
        self.entries.truncate(self.limit);
    }

    /// The user edited the input line: keep it as the draft and stop
    /// recalling.
    pub fn set_draft(&mut self, text: &str) {
        self.draft = text.to_string();
        self.cursor = None;
    }

    /// Whether a history entry is currently recalled into the input.
    pub fn is_recalling(&self) -> bool {
        self.cursor.is_some()
    }

    /// Recall the next older entry.
    pub fn older(&mut self) -> Option<&str> {
        let next = self.cursor.map_or(0, |c| c + 1);
        if next >= self.entries.len() {
            return None;
        }
        self.cursor = Some(next);
        self.get(next)
    }

    /// Recall the next newer entry. Stepping past the newest returns the
    /// draft the user was typing.
    pub fn newer(&mut self) -> Option<&str> {
        match self.cursor? {
            0 => {
                self.cursor = None;
                Some(self.draft.as_str())
            },
            c => {
                self.cursor = Some(c - 1);
                self.get(c - 1)
            },
        }
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(32)
    }
}
