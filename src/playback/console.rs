// Console output produced by playback

use std::collections::VecDeque;

/// Bounded log of console messages
#[derive(Debug, Clone)]
pub struct ConsoleLog {
    lines: VecDeque<String>,
    capacity: usize,
}

impl ConsoleLog {
    pub fn new(capacity: usize) -> Self {
        ConsoleLog {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a line, dropping the oldest once full
    pub fn push(&mut self, text: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        while self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(text.into());
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ConsoleLog {
    fn default() -> Self {
        Self::new(7)
    }
}
