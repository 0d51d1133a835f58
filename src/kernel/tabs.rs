//! Open documents. Each tab owns its buffer and its own search session, so
//! switching tabs never leaks matches from one document into another.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::kernel::outline::{extract_headings, HeadingNode};
use crate::kernel::search::SearchSession;
use crate::kernel::services::ports::surface::TextSurface;
use crate::models::{EditHistoryConfig, TextBuffer};

pub const DEFAULT_TAB_TITLE: &str = "Untitled";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabId(u64);

impl TabId {
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab-{}", self.0)
    }
}

pub struct Tab {
    id: TabId,
    title: String,
    path: Option<PathBuf>,
    buffer: TextBuffer,
    search: SearchSession,
    saved_version: u64,
}

impl Tab {
    pub fn id(&self) -> TabId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut TextBuffer {
        &mut self.buffer
    }

    pub fn search(&self) -> &SearchSession {
        &self.search
    }

    /// Disjoint access for driving the session against this tab's buffer.
    pub fn search_mut(&mut self) -> (&mut SearchSession, &mut TextBuffer) {
        (&mut self.search, &mut self.buffer)
    }

    pub fn is_modified(&self) -> bool {
        self.buffer.version() != self.saved_version
    }

    pub fn outline(&self) -> Vec<HeadingNode> {
        extract_headings(&self.buffer.text())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed,
    /// Unsaved changes; close again with `force` once the user agreed.
    NeedsConfirmation,
    NotFound,
}

#[derive(Default)]
pub struct Tabs {
    tabs: Vec<Tab>,
    active: Option<TabId>,
    counter: u64,
    history_config: EditHistoryConfig,
}

impl Tabs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history_config(mut self, config: EditHistoryConfig) -> Self {
        self.history_config = config;
        self
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Opens a new tab and makes it active.
    pub fn create_tab(
        &mut self,
        title: Option<&str>,
        path: Option<PathBuf>,
        content: &str,
    ) -> TabId {
        self.counter += 1;
        let id = TabId(self.counter);
        let buffer =
            TextBuffer::from_text(content).with_history_config(self.history_config.clone());
        let saved_version = buffer.version();
        self.tabs.push(Tab {
            id,
            title: title.unwrap_or(DEFAULT_TAB_TITLE).to_string(),
            path,
            buffer,
            search: SearchSession::new(),
            saved_version,
        });
        self.active = Some(id);
        tracing::debug!(tab = %id, "tab created");
        id
    }

    pub fn close_tab(&mut self, id: TabId, force: bool) -> CloseOutcome {
        let Some(index) = self.position(id) else {
            return CloseOutcome::NotFound;
        };
        if self.tabs[index].is_modified() && !force {
            return CloseOutcome::NeedsConfirmation;
        }

        self.tabs.remove(index);
        tracing::debug!(tab = %id, "tab closed");

        if self.active == Some(id) {
            self.active = self.tabs.last().map(Tab::id);
        }
        if self.tabs.is_empty() {
            self.create_tab(None, None, "");
        }
        CloseOutcome::Closed
    }

    pub fn set_active(&mut self, id: TabId) -> bool {
        if self.position(id).is_none() {
            return false;
        }
        self.active = Some(id);
        true
    }

    pub fn active_id(&self) -> Option<TabId> {
        self.active
    }

    pub fn active(&self) -> Option<&Tab> {
        self.get(self.active?)
    }

    pub fn active_mut(&mut self) -> Option<&mut Tab> {
        let id = self.active?;
        self.get_mut(id)
    }

    pub fn get(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn get_mut(&mut self, id: TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.id == id)
    }

    pub fn find_by_path(&self, path: &Path) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.path.as_deref() == Some(path))
    }

    /// Records a save; `path`/`title` replace the old values when given.
    pub fn mark_saved(&mut self, id: TabId, path: Option<PathBuf>, title: Option<&str>) -> bool {
        let Some(tab) = self.get_mut(id) else {
            return false;
        };
        tab.saved_version = tab.buffer.version();
        if let Some(path) = path {
            tab.path = Some(path);
        }
        if let Some(title) = title {
            tab.title = title.to_string();
        }
        true
    }

    fn position(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/tabs.rs"]
mod tests;
