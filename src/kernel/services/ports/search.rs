use std::fmt;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Debug)]
pub enum SearchError {
    InvalidRegex(regex::Error),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::InvalidRegex(e) => write!(f, "Invalid regex: {}", e),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SearchError::InvalidRegex(e) => Some(e),
        }
    }
}

impl From<regex::Error> for SearchError {
    fn from(e: regex::Error) -> Self {
        SearchError::InvalidRegex(e)
    }
}

/// One search hit: `start..end` is a half-open char range into the document.
/// `line`/`col` (0-based, chars) locate `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub col: usize,
}

impl Match {
    pub fn new(start: usize, end: usize, line: usize, col: usize) -> Self {
        Self {
            start,
            end,
            line,
            col,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub case_sensitive: bool,
    pub use_regex: bool,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, case_sensitive: bool, use_regex: bool) -> Self {
        Self {
            text: text.into(),
            case_sensitive,
            use_regex,
        }
    }
}

/// `current` is 1-based; 0 when `total` is 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub total: usize,
    pub current: usize,
}

impl SearchResult {
    pub const EMPTY: SearchResult = SearchResult {
        total: 0,
        current: 0,
    };

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
