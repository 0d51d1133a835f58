//! In-document search/replace.
//!
//! - finder: pure match finding (literal via memchr, regex via `regex`)
//! - session: per-document query state + navigation
//! - replace: single/bulk replacement through a `TextSurface`

mod finder;
mod replace;
mod session;

pub use crate::kernel::services::ports::search::{Match, SearchQuery, SearchResult};
pub use finder::{find, pick_current, SearchConfig};
pub use replace::PendingRefresh;
pub use session::SearchSession;
