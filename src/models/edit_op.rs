use std::fmt;
use std::sync::atomic::{AtomicU16, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpId {
    pub timestamp: u64,
    pub counter: u16,
}

impl OpId {
    pub fn new() -> Self {
        static COUNTER: AtomicU16 = AtomicU16::new(1);
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(1);
        let counter = COUNTER.fetch_add(1, Ordering::Relaxed);
        Self { timestamp, counter }
    }

    pub fn root() -> Self {
        Self {
            timestamp: 0,
            counter: 0,
        }
    }

    pub fn is_root(&self) -> bool {
        self.timestamp == 0 && self.counter == 0
    }
}

impl Default for OpId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OpId({:x}:{:04x})", self.timestamp, self.counter)
    }
}

impl fmt::Display for OpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}:{:04x}", self.timestamp, self.counter)
    }
}

/// 单个已应用的替换：`start` 处的 `deleted` 被换成 `inserted`（字符偏移）
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Change {
    pub start: usize,
    pub deleted: String,
    pub inserted: String,
}

impl Change {
    pub fn new(start: usize, deleted: String, inserted: String) -> Self {
        Self {
            start,
            deleted,
            inserted,
        }
    }

    pub fn deleted_end(&self) -> usize {
        self.start + self.deleted.chars().count()
    }

    pub fn inserted_end(&self) -> usize {
        self.start + self.inserted.chars().count()
    }

    pub fn inverse(&self) -> Change {
        Change {
            start: self.start,
            deleted: self.inserted.clone(),
            inserted: self.deleted.clone(),
        }
    }

    pub fn apply(&self, rope: &mut ropey::Rope) {
        if !self.deleted.is_empty() {
            rope.remove(self.start..self.deleted_end());
        }
        if !self.inserted.is_empty() {
            rope.insert(self.start, &self.inserted);
        }
    }
}

/// 一次可撤销的编辑：一批按顺序应用的 Change
#[derive(Clone, Debug)]
pub struct EditOp {
    pub id: OpId,
    pub parent: OpId,
    pub changes: Vec<Change>,
    pub cursor_before: usize,
    pub cursor_after: usize,
}

impl EditOp {
    pub fn new(
        parent: OpId,
        changes: Vec<Change>,
        cursor_before: usize,
        cursor_after: usize,
    ) -> Self {
        Self {
            id: OpId::new(),
            parent,
            changes,
            cursor_before,
            cursor_after,
        }
    }

    pub fn insert(parent: OpId, char_offset: usize, text: String, cursor_before: usize) -> Self {
        let cursor_after = char_offset + text.chars().count();
        Self::new(
            parent,
            vec![Change::new(char_offset, String::new(), text)],
            cursor_before,
            cursor_after,
        )
    }

    pub fn delete(parent: OpId, start: usize, deleted: String, cursor_before: usize) -> Self {
        Self::new(
            parent,
            vec![Change::new(start, deleted, String::new())],
            cursor_before,
            start,
        )
    }

    /// 逆操作：倒序应用每个 Change 的逆
    pub fn inverse(&self) -> Vec<Change> {
        self.changes.iter().rev().map(Change::inverse).collect()
    }

    pub fn cursor_after(&self) -> usize {
        self.cursor_after
    }

    pub fn cursor_before(&self) -> usize {
        self.cursor_before
    }

    pub fn apply(&self, rope: &mut ropey::Rope) {
        for change in &self.changes {
            change.apply(rope);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/edit_op.rs"]
mod tests;
