//! 数据模型层

pub mod edit_history;
pub mod edit_op;
pub mod selection;
pub mod text_buffer;

pub use edit_history::{EditHistory, EditHistoryConfig};
pub use edit_op::{Change, EditOp, OpId};
pub use selection::Selection;
pub use text_buffer::{slice_to_cow, TextBuffer};
