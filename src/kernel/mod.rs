//! Headless editor core: outline extraction, in-document search/replace, tabs.

pub mod outline;
pub mod search;
pub mod services;
pub mod tabs;

pub use outline::{extract_headings, flatten_headings, HeadingNode, OutlineRow, OutlineState};
pub use search::{find, pick_current, PendingRefresh, SearchConfig, SearchSession};
pub use tabs::{CloseOutcome, Tab, TabId, Tabs};
