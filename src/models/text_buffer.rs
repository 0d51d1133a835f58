//! 文本缓冲区模型
//!
//! 职责：
//! - 文本存储（Rope）
//! - 光标和选区管理（字符偏移）
//! - 批量编辑 + Undo/Redo
//! - 作为 `TextSurface` 供查找替换内核使用

use super::edit_history::{EditHistory, EditHistoryConfig};
use super::edit_op::{Change, EditOp};
use super::selection::Selection;
use crate::kernel::services::ports::surface::{self, TextEdit, TextSurface};
use ropey::{Rope, RopeSlice};
use std::borrow::Cow;
use unicode_segmentation::UnicodeSegmentation;

/// 从 RopeSlice 获取字符串，优先零拷贝
pub fn slice_to_cow(slice: RopeSlice<'_>) -> Cow<'_, str> {
    match slice.as_str() {
        Some(s) => Cow::Borrowed(s),
        None => Cow::Owned(slice.to_string()),
    }
}

pub struct TextBuffer {
    rope: Rope,
    cursor: usize,
    selection: Option<Selection>,
    /// 最近一次请求滚动到可见区域的行（0-based）
    scroll_target: Option<usize>,
    history: EditHistory,
    version: u64,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::from_text("")
    }

    pub fn from_text(text: &str) -> Self {
        let rope = Rope::from_str(text);
        let history = EditHistory::new(rope.clone());
        Self {
            rope,
            cursor: 0,
            selection: None,
            scroll_target: None,
            history,
            version: 0,
        }
    }

    pub fn with_history_config(mut self, config: EditHistoryConfig) -> Self {
        self.history = EditHistory::new(self.rope.clone()).with_config(config);
        self
    }

    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    pub fn line(&self, row: usize) -> Option<Cow<'_, str>> {
        if row < self.rope.len_lines() {
            Some(slice_to_cow(self.rope.line(row)))
        } else {
            None
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_cursor(&mut self, char_offset: usize) {
        self.cursor = char_offset.min(self.rope.len_chars());
        self.selection = None;
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn selected_text(&self) -> Option<String> {
        let (start, end) = self.selection?.range();
        Some(self.rope.slice(start..end).to_string())
    }

    pub fn scroll_target(&self) -> Option<usize> {
        self.scroll_target
    }

    /// 1-based (line, col)，col 以字素簇计数
    pub fn cursor_position(&self) -> (usize, usize) {
        let row = self.rope.char_to_line(self.cursor);
        let line_start = self.rope.line_to_char(row);
        let before = slice_to_cow(self.rope.slice(line_start..self.cursor));
        (row + 1, before.graphemes(true).count() + 1)
    }

    pub fn word_count(&self) -> usize {
        slice_to_cow(self.rope.slice(..)).split_whitespace().count()
    }

    /// 光标移到指定行（1-based，越界时截断）行首并请求滚动
    pub fn scroll_to_line(&mut self, line: usize) {
        let row = line.clamp(1, self.rope.len_lines()) - 1;
        self.cursor = self.rope.line_to_char(row);
        self.selection = None;
        self.scroll_target = Some(row);
    }

    /// 在光标处插入文本（有选区时替换选区）
    pub fn insert_text(&mut self, text: &str) -> surface::Result<()> {
        let (from, to) = match self.selection {
            Some(sel) => sel.range(),
            None => (self.cursor, self.cursor),
        };
        self.apply_edits(&[TextEdit::new(from, to, text)])
    }

    /// 替换整行内容（不含换行符）；行号 1-based，越界返回 false
    pub fn replace_line(&mut self, line: usize, content: &str) -> surface::Result<bool> {
        if line == 0 || line > self.rope.len_lines() {
            return Ok(false);
        }
        let row = line - 1;
        let from = self.rope.line_to_char(row);
        let to = {
            let text = slice_to_cow(self.rope.line(row));
            let body = text.strip_suffix('\n').unwrap_or(&text);
            let body = body.strip_suffix('\r').unwrap_or(body);
            from + body.chars().count()
        };
        self.apply_edits(&[TextEdit::new(from, to, content)])?;
        Ok(true)
    }

    // ==================== Undo/Redo ====================

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some((rope, cursor)) => {
                self.restore(rope, cursor);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some((rope, cursor)) => {
                self.restore(rope, cursor);
                true
            }
            None => false,
        }
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    fn restore(&mut self, rope: Rope, cursor: usize) {
        self.rope = rope;
        self.cursor = cursor.min(self.rope.len_chars());
        self.selection = None;
        self.version += 1;
    }

    /// 先整体校验，再逐个应用；任一编辑越界则不做任何修改
    fn validate_batch(&self, edits: &[TextEdit]) -> surface::Result<()> {
        let mut len = self.rope.len_chars();
        for edit in edits {
            edit.validate(len)?;
            len = len - (edit.to - edit.from) + edit.insert.chars().count();
        }
        Ok(())
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSurface for TextBuffer {
    fn text(&self) -> Cow<'_, str> {
        slice_to_cow(self.rope.slice(..))
    }

    fn set_selection(&mut self, from: usize, to: usize) {
        let len = self.rope.len_chars();
        let (from, to) = (from.min(len), to.min(len));
        self.selection = Some(Selection::new(from, to));
        self.cursor = to;
        self.scroll_target = Some(self.rope.char_to_line(from));
    }

    fn apply_edits(&mut self, edits: &[TextEdit]) -> surface::Result<()> {
        if edits.is_empty() {
            return Ok(());
        }
        self.validate_batch(edits)?;

        let cursor_before = self.cursor;
        let mut cursor_after = cursor_before;
        let mut changes = Vec::with_capacity(edits.len());
        for edit in edits {
            let deleted = self.rope.slice(edit.from..edit.to).to_string();
            let change = Change::new(edit.from, deleted, edit.insert.clone());
            change.apply(&mut self.rope);
            cursor_after = change.inserted_end();
            changes.push(change);
        }

        let op = EditOp::new(self.history.head(), changes, cursor_before, cursor_after);
        self.history.push(op, &self.rope);

        self.cursor = cursor_after;
        self.selection = None;
        self.version += 1;
        Ok(())
    }

    fn cursor_offset(&self) -> usize {
        self.cursor
    }

    fn version(&self) -> u64 {
        self.version
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/text_buffer.rs"]
mod tests;
