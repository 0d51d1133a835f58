//! Editing-surface contract.
//!
//! The search/replace core only talks to the document through this trait, so
//! any text component offering equivalent primitives can host it.

use std::borrow::Cow;
use std::fmt;

pub type Result<T> = std::result::Result<T, EditError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    OutOfRange { from: usize, to: usize, len: usize },
    Inverted { from: usize, to: usize },
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::OutOfRange { from, to, len } => {
                write!(f, "Edit range {}..{} out of bounds (len {})", from, to, len)
            }
            EditError::Inverted { from, to } => {
                write!(f, "Edit range {}..{} is inverted", from, to)
            }
        }
    }
}

impl std::error::Error for EditError {}

/// Replace chars `from..to` with `insert`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub from: usize,
    pub to: usize,
    pub insert: String,
}

impl TextEdit {
    pub fn new(from: usize, to: usize, insert: impl Into<String>) -> Self {
        Self {
            from,
            to,
            insert: insert.into(),
        }
    }

    /// Checks the edit against a document of `len` chars.
    pub fn validate(&self, len: usize) -> Result<()> {
        if self.from > self.to {
            return Err(EditError::Inverted {
                from: self.from,
                to: self.to,
            });
        }
        if self.to > len {
            return Err(EditError::OutOfRange {
                from: self.from,
                to: self.to,
                len,
            });
        }
        Ok(())
    }
}

pub trait TextSurface {
    /// Snapshot of the whole document.
    fn text(&self) -> Cow<'_, str>;

    /// Select chars `from..to` and scroll them into view.
    fn set_selection(&mut self, from: usize, to: usize);

    /// Apply `edits` in order as one atomic mutation (one undo step).
    /// Offsets of each edit refer to the text after the previous edits.
    /// On error nothing is applied.
    fn apply_edits(&mut self, edits: &[TextEdit]) -> Result<()>;

    fn cursor_offset(&self) -> usize;

    /// Bumped on every committed mutation.
    fn version(&self) -> u64;
}
