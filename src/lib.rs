//! mdpad - Markdown 编辑器核心库
//!
//! 模块结构：
//! - models: 数据模型（TextBuffer, EditOp, EditHistory）
//! - kernel: 编辑器内核（大纲提取、查找替换、标签页）
//! - logging: tracing 初始化

pub mod kernel;
pub mod logging;
pub mod models;

pub use kernel::outline::{extract_headings, HeadingNode, OutlineRow, OutlineState};
pub use kernel::search::{find, SearchResult, SearchSession};
pub use kernel::services::ports::{EditError, Match, SearchError, TextEdit, TextSurface};
pub use kernel::tabs::{CloseOutcome, Tab, TabId, Tabs};
pub use models::TextBuffer;
