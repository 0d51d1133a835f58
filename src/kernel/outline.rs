//! Document outline: Markdown ATX headings as a nested tree.
//!
//! The tree is a derived value. It is rebuilt wholesale from the text on every
//! change and never patched in place.

use rustc_hash::FxHashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingNode {
    pub level: u8,
    pub text: String,
    /// 1-based line number.
    pub line: usize,
    /// `"{level}-{text}-{line}"`; keys expand/collapse state.
    pub id: String,
    pub children: Vec<HeadingNode>,
}

impl HeadingNode {
    pub fn new(level: u8, text: &str, line: usize) -> Self {
        Self {
            level,
            text: text.to_string(),
            line,
            id: format!("{}-{}-{}", level, text, line),
            children: Vec::new(),
        }
    }
}

/// Extracts every heading of `text`, nested by level.
///
/// A child always has a deeper level than its parent: a `##` nests under the
/// nearest preceding `#`, a `###` under the nearest preceding heading of level
/// 2 or less, and so on.
pub fn extract_headings(text: &str) -> Vec<HeadingNode> {
    let mut roots = Vec::new();
    // open ancestors, innermost last; a node is attached once it is popped
    let mut stack: Vec<HeadingNode> = Vec::new();

    for (index, line) in text.split('\n').enumerate() {
        let Some((level, heading)) = parse_heading(line) else {
            continue;
        };
        let node = HeadingNode::new(level, heading, index + 1);

        while stack.last().is_some_and(|top| top.level >= node.level) {
            if let Some(done) = stack.pop() {
                attach(&mut stack, &mut roots, done);
            }
        }
        stack.push(node);
    }

    while let Some(done) = stack.pop() {
        attach(&mut stack, &mut roots, done);
    }

    roots
}

/// Pre-order `(depth, node)` pairs; roots have depth 0.
pub fn flatten_headings(roots: &[HeadingNode]) -> Vec<(usize, &HeadingNode)> {
    fn walk<'a>(nodes: &'a [HeadingNode], depth: usize, out: &mut Vec<(usize, &'a HeadingNode)>) {
        for node in nodes {
            out.push((depth, node));
            walk(&node.children, depth + 1, out);
        }
    }

    let mut out = Vec::new();
    walk(roots, 0, &mut out);
    out
}

fn attach(stack: &mut [HeadingNode], roots: &mut Vec<HeadingNode>, node: HeadingNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}

/// `#{1,6}`, one whitespace char, then at least one more char of any kind.
/// The title is trimmed and may end up empty (`"#   "`).
fn parse_heading(line: &str) -> Option<(u8, &str)> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let rest = line.trim_start_matches('#');
    let hashes = line.len() - rest.len();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let mut chars = rest.chars();
    if !chars.next().is_some_and(char::is_whitespace) {
        return None;
    }
    if chars.as_str().is_empty() {
        return None;
    }
    Some((hashes as u8, rest.trim()))
}

/// One visible line of the outline panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineRow {
    pub depth: usize,
    pub level: u8,
    pub text: String,
    pub line: usize,
    pub id: String,
    pub has_children: bool,
    pub collapsed: bool,
}

/// Outline panel state: heading tree, collapsed ids and selected row.
#[derive(Debug, Default)]
pub struct OutlineState {
    headings: Vec<HeadingNode>,
    collapsed: FxHashSet<String>,
    selected_index: usize,
}

impl OutlineState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn headings(&self) -> &[HeadingNode] {
        &self.headings
    }

    pub fn is_empty(&self) -> bool {
        self.headings.is_empty()
    }

    pub fn refresh(&mut self, text: &str) -> bool {
        self.set_headings(extract_headings(text))
    }

    pub fn set_headings(&mut self, headings: Vec<HeadingNode>) -> bool {
        if self.headings == headings {
            return false;
        }
        self.headings = headings;

        let live: FxHashSet<&str> = flatten_headings(&self.headings)
            .into_iter()
            .map(|(_, node)| node.id.as_str())
            .collect();
        self.collapsed.retain(|id| live.contains(id.as_str()));

        self.clamp_selection();
        true
    }

    pub fn is_collapsed(&self, id: &str) -> bool {
        self.collapsed.contains(id)
    }

    /// Returns false for ids not in the current tree.
    pub fn toggle_collapse(&mut self, id: &str) -> bool {
        let known = flatten_headings(&self.headings)
            .iter()
            .any(|(_, node)| node.id == id);
        if !known {
            return false;
        }
        if !self.collapsed.remove(id) {
            self.collapsed.insert(id.to_string());
        }
        self.clamp_selection();
        true
    }

    pub fn visible_rows(&self) -> Vec<OutlineRow> {
        let mut rows = Vec::new();
        self.collect_rows(&self.headings, 0, &mut rows);
        rows
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected_row(&self) -> Option<OutlineRow> {
        self.visible_rows().into_iter().nth(self.selected_index)
    }

    /// Line to reveal in the editor for the selected heading.
    pub fn selected_line(&self) -> Option<usize> {
        self.selected_row().map(|row| row.line)
    }

    pub fn move_selection(&mut self, delta: isize) -> bool {
        let len = self.visible_rows().len();
        if len == 0 || delta == 0 {
            return false;
        }

        let prev = self.selected_index;
        if delta < 0 {
            if self.selected_index > 0 {
                self.selected_index -= 1;
            } else {
                self.selected_index = len - 1;
            }
        } else if self.selected_index + 1 < len {
            self.selected_index += 1;
        } else {
            self.selected_index = 0;
        }
        self.selected_index != prev
    }

    pub fn click_row(&mut self, row: usize) -> Option<usize> {
        let line = self.visible_rows().get(row)?.line;
        self.selected_index = row;
        Some(line)
    }

    fn collect_rows(&self, nodes: &[HeadingNode], depth: usize, rows: &mut Vec<OutlineRow>) {
        for node in nodes {
            let collapsed = self.collapsed.contains(&node.id);
            rows.push(OutlineRow {
                depth,
                level: node.level,
                text: node.text.clone(),
                line: node.line,
                id: node.id.clone(),
                has_children: !node.children.is_empty(),
                collapsed,
            });
            if !collapsed {
                self.collect_rows(&node.children, depth + 1, rows);
            }
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_rows().len();
        self.selected_index = self.selected_index.min(len.saturating_sub(1));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/outline.rs"]
mod tests;
