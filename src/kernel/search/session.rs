use crate::kernel::services::ports::search::{Match, SearchQuery, SearchResult};
use crate::kernel::services::ports::surface::TextSurface;

use super::finder::{pick_current, SearchConfig};

#[derive(Debug, Clone)]
struct ActiveSearch {
    query: SearchQuery,
    matches: Vec<Match>,
    /// `None` iff `matches` is empty.
    current: Option<usize>,
}

impl ActiveSearch {
    fn result(&self) -> SearchResult {
        SearchResult {
            total: self.matches.len(),
            current: self.current.map_or(0, |i| i + 1),
        }
    }

    fn current_match(&self) -> Option<Match> {
        self.matches.get(self.current?).copied()
    }
}

/// Search state of one document.
///
/// Every replacement of the state (search, clear, replace-all) bumps
/// `generation`, which deferred refreshes use to detect that they are stale.
#[derive(Debug, Default)]
pub struct SearchSession {
    active: Option<ActiveSearch>,
    generation: u64,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a fresh search against the surface's current text and selects the
    /// first match at or after the cursor (wrapping to the last match).
    pub fn search<S: TextSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        query: &str,
        case_sensitive: bool,
        use_regex: bool,
    ) -> SearchResult {
        self.search_query(surface, SearchQuery::new(query, case_sensitive, use_regex))
    }

    pub fn search_query<S: TextSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        query: SearchQuery,
    ) -> SearchResult {
        if query.text.is_empty() {
            self.clear();
            return SearchResult::EMPTY;
        }

        let config = match SearchConfig::new(&query) {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!(query = %query.text, error = %e, "invalid search pattern");
                self.clear();
                return SearchResult::EMPTY;
            }
        };

        let matches = config.find_all(&surface.text());
        let current = pick_current(&matches, surface.cursor_offset());
        tracing::debug!(
            query = %query.text,
            case_sensitive = query.case_sensitive,
            use_regex = query.use_regex,
            total = matches.len(),
            "search"
        );

        let active = ActiveSearch {
            query,
            matches,
            current,
        };
        if let Some(m) = active.current_match() {
            surface.set_selection(m.start, m.end);
        }
        let result = active.result();
        self.set_active(Some(active));
        result
    }

    pub fn next<S: TextSurface + ?Sized>(&mut self, surface: &mut S) -> SearchResult {
        self.step(surface, true)
    }

    pub fn prev<S: TextSurface + ?Sized>(&mut self, surface: &mut S) -> SearchResult {
        self.step(surface, false)
    }

    pub fn clear(&mut self) {
        self.set_active(None);
    }

    pub fn result(&self) -> SearchResult {
        self.active
            .as_ref()
            .map_or(SearchResult::EMPTY, ActiveSearch::result)
    }

    pub fn matches(&self) -> &[Match] {
        self.active
            .as_ref()
            .map(|a| a.matches.as_slice())
            .unwrap_or(&[])
    }

    pub fn current_index(&self) -> Option<usize> {
        self.active.as_ref().and_then(|a| a.current)
    }

    pub fn current_match(&self) -> Option<Match> {
        self.active.as_ref().and_then(ActiveSearch::current_match)
    }

    pub fn query(&self) -> Option<&SearchQuery> {
        self.active.as_ref().map(|a| &a.query)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn set_active(&mut self, active: Option<ActiveSearch>) {
        self.active = active;
        self.generation = self.generation.wrapping_add(1);
    }

    fn step<S: TextSurface + ?Sized>(&mut self, surface: &mut S, forward: bool) -> SearchResult {
        let Some(active) = self.active.as_mut() else {
            return SearchResult::EMPTY;
        };
        let len = active.matches.len();
        if len == 0 {
            return active.result();
        }

        let next = match active.current {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        active.current = Some(next);

        let m = active.matches[next];
        surface.set_selection(m.start, m.end);
        active.result()
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/search/session.rs"]
mod tests;
