//! Match finding over a document snapshot.
//!
//! Matching runs on UTF-8 bytes; spans are converted to char offsets (plus
//! line/col) in a single forward pass, since they come out ascending.

use crate::kernel::services::ports::search::{Match, Result, SearchQuery};
use memchr::memmem::Finder;

/// Compiled search engine for one query.
#[derive(Clone)]
pub enum SearchConfig {
    Literal {
        pattern: String,
        case_sensitive: bool,
        finder: Finder<'static>,
    },
    Regex {
        regex: regex::Regex,
    },
}

impl SearchConfig {
    pub fn new(query: &SearchQuery) -> Result<Self> {
        if query.use_regex {
            Self::regex(&query.text, query.case_sensitive)
        } else {
            Ok(Self::literal(&query.text, query.case_sensitive))
        }
    }

    pub fn literal(pattern: &str, case_sensitive: bool) -> Self {
        let pattern = if case_sensitive {
            pattern.to_string()
        } else {
            pattern.chars().flat_map(fold_char).collect()
        };
        let finder = Finder::new(pattern.as_bytes()).into_owned();
        Self::Literal {
            pattern,
            case_sensitive,
            finder,
        }
    }

    pub fn regex(pattern: &str, case_sensitive: bool) -> Result<Self> {
        let regex = regex::RegexBuilder::new(pattern)
            .case_insensitive(!case_sensitive)
            .build()?;
        Ok(Self::Regex { regex })
    }

    pub fn is_regex(&self) -> bool {
        matches!(self, Self::Regex { .. })
    }

    /// All matches in `text`, ascending and non-overlapping.
    pub fn find_all(&self, text: &str) -> Vec<Match> {
        let spans = match self {
            Self::Literal {
                pattern,
                case_sensitive,
                finder,
            } => {
                if pattern.is_empty() {
                    return Vec::new();
                }
                if *case_sensitive {
                    literal_spans(text.as_bytes(), finder, pattern.len())
                } else {
                    let folded = FoldedText::new(text);
                    let mut last_end = 0usize;
                    literal_spans(folded.text.as_bytes(), finder, pattern.len())
                        .into_iter()
                        .filter_map(|(start, end)| {
                            // two hits inside one expanded char would overlap in the source
                            let (start, end) = folded.original_span(text, start, end);
                            if start < last_end {
                                return None;
                            }
                            last_end = end;
                            Some((start, end))
                        })
                        .collect()
                }
            }
            Self::Regex { regex } => regex_spans(text, regex),
        };

        let mut mapper = OffsetMapper::new(text);
        spans
            .into_iter()
            .map(|(start, end)| {
                let (start_char, line, col) = mapper.advance_to(start);
                let (end_char, _, _) = mapper.advance_to(end);
                Match::new(start_char, end_char, line, col)
            })
            .collect()
    }
}

/// Find all matches of `query` in `text`. An empty query yields no matches.
pub fn find(text: &str, query: &str, case_sensitive: bool, use_regex: bool) -> Result<Vec<Match>> {
    if query.is_empty() {
        return Ok(Vec::new());
    }
    let config = SearchConfig::new(&SearchQuery::new(query, case_sensitive, use_regex))?;
    Ok(config.find_all(text))
}

/// First match starting at or after `reference`, else the last match.
pub fn pick_current(matches: &[Match], reference: usize) -> Option<usize> {
    if matches.is_empty() {
        return None;
    }
    let idx = matches.partition_point(|m| m.start < reference);
    Some(idx.min(matches.len() - 1))
}

/// Non-overlapping byte spans; the scan resumes past each hit.
fn literal_spans(haystack: &[u8], finder: &Finder<'_>, pattern_len: usize) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut pos = 0usize;
    while pos < haystack.len() {
        let Some(found) = finder.find(&haystack[pos..]) else {
            break;
        };
        let start = pos + found;
        let end = start + pattern_len;
        spans.push((start, end));
        pos = end;
    }
    spans
}

fn regex_spans(text: &str, regex: &regex::Regex) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut pos = 0usize;
    while pos <= text.len() {
        let Some(mat) = regex.find_at(text, pos) else {
            break;
        };
        spans.push((mat.start(), mat.end()));
        pos = if mat.is_empty() {
            // zero-length: step one char so the scan terminates
            mat.end() + text[mat.end()..].chars().next().map_or(1, char::len_utf8)
        } else {
            mat.end()
        };
    }
    spans
}

/// Per-char lowercase; final sigma folds to `σ` so it matches regardless of position.
fn fold_char(ch: char) -> impl Iterator<Item = char> {
    ch.to_lowercase().map(|c| if c == 'ς' { 'σ' } else { c })
}

/// Lower-cased copy of a text with a byte map back to the source.
struct FoldedText {
    text: String,
    /// folded byte -> byte offset of the source char it came from
    origin: Vec<usize>,
}

impl FoldedText {
    fn new(source: &str) -> Self {
        let mut text = String::with_capacity(source.len());
        let mut origin = Vec::with_capacity(source.len());
        for (offset, ch) in source.char_indices() {
            for lower in fold_char(ch) {
                text.push(lower);
                origin.extend(std::iter::repeat(offset).take(lower.len_utf8()));
            }
        }
        Self { text, origin }
    }

    /// Map a non-empty folded span to the source chars it covers.
    fn original_span(&self, source: &str, start: usize, end: usize) -> (usize, usize) {
        let first = self.origin[start];
        let last = self.origin[end - 1];
        let last_len = source[last..].chars().next().map_or(0, char::len_utf8);
        (first, last + last_len)
    }
}

/// Converts ascending byte offsets to (char offset, line, col).
struct OffsetMapper<'a> {
    text: &'a str,
    byte: usize,
    char_idx: usize,
    line: usize,
    line_start: usize,
}

impl<'a> OffsetMapper<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            byte: 0,
            char_idx: 0,
            line: 0,
            line_start: 0,
        }
    }

    fn advance_to(&mut self, byte: usize) -> (usize, usize, usize) {
        if byte > self.byte {
            for ch in self.text[self.byte..byte].chars() {
                self.char_idx += 1;
                if ch == '\n' {
                    self.line += 1;
                    self.line_start = self.char_idx;
                }
            }
            self.byte = byte;
        }
        (self.char_idx, self.line, self.char_idx - self.line_start)
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/search/finder.rs"]
mod tests;
