//! Service ports: traits + data contracts.

pub mod config;
pub mod search;
pub mod surface;

pub use config::{HistorySettings, LogConfig, SearchSettings, Settings};
pub use search::{Match, SearchError, SearchQuery, SearchResult};
pub use surface::{EditError, TextEdit, TextSurface};
