use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub url: String,
    pub state: Value,
}

impl HistoryEntry {
    pub fn new(url: impl Into<String>, state: Value) -> Self {
        Self {
            url: url.into(),
            state,
        }
    }
}

/// An in-memory history stack mirroring browser session history: a list of
/// entries and a cursor. `push` truncates any forward entries.
#[derive(Debug)]
pub struct MemoryHistory {
    entries: Vec<HistoryEntry>,
    index: usize,
}

impl MemoryHistory {
    pub fn new(initial_url: &str) -> Self {
        Self {
            entries: vec![HistoryEntry::new(initial_url, Value::Null)],
            index: 0,
        }
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.index]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, url: String, state: Value) {
        self.entries.truncate(self.index + 1);
        self.entries.push(HistoryEntry { url, state });
        self.index += 1;
    }

    pub fn replace(&mut self, url: String, state: Value) {
        self.entries[self.index] = HistoryEntry { url, state };
    }

    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        true
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}
