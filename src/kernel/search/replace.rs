use crate::kernel::services::ports::search::{SearchQuery, SearchResult};
use crate::kernel::services::ports::surface::{TextEdit, TextSurface};

use super::session::SearchSession;

/// Continuation for a re-search scheduled after `replace_deferred`.
///
/// Only valid while the session generation and the surface version are the
/// ones captured right after the replacement was committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRefresh {
    generation: u64,
    version: u64,
    query: SearchQuery,
}

impl PendingRefresh {
    pub fn query(&self) -> &SearchQuery {
        &self.query
    }
}

impl SearchSession {
    /// Replaces the current match and re-runs the same search on the new text.
    pub fn replace<S: TextSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        replacement: &str,
    ) -> SearchResult {
        match self.replace_current(surface, replacement) {
            Some(query) => self.search_query(surface, query),
            None => self.result(),
        }
    }

    /// Replaces the current match; the re-search is left to the caller via
    /// [`SearchSession::complete_refresh`].
    pub fn replace_deferred<S: TextSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        replacement: &str,
    ) -> Option<PendingRefresh> {
        let query = self.replace_current(surface, replacement)?;
        Some(PendingRefresh {
            generation: self.generation(),
            version: surface.version(),
            query,
        })
    }

    /// Applies a deferred refresh unless the session was superseded (new
    /// search, clear) or the text changed since the replacement.
    pub fn complete_refresh<S: TextSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        pending: PendingRefresh,
    ) -> SearchResult {
        if pending.generation != self.generation() || pending.version != surface.version() {
            tracing::debug!(
                generation = pending.generation,
                current_generation = self.generation(),
                "stale search refresh discarded"
            );
            return self.result();
        }
        self.search_query(surface, pending.query)
    }

    /// Replaces every match in one atomic batch and clears the session.
    /// Returns the number of replaced spans.
    pub fn replace_all<S: TextSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        replacement: &str,
    ) -> usize {
        let matches = self.matches();
        if matches.is_empty() {
            return 0;
        }

        // last match first, so earlier offsets stay valid
        let edits: Vec<TextEdit> = matches
            .iter()
            .rev()
            .map(|m| TextEdit::new(m.start, m.end, replacement))
            .collect();
        let count = edits.len();

        let outcome = surface.apply_edits(&edits);
        self.clear();
        match outcome {
            Ok(()) => {
                tracing::debug!(count, "replace all");
                count
            }
            Err(e) => {
                tracing::warn!(error = %e, "replace all failed");
                0
            }
        }
    }

    /// Substitutes the current match; returns the query to re-run on success.
    fn replace_current<S: TextSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        replacement: &str,
    ) -> Option<SearchQuery> {
        let target = self.current_match()?;
        let query = self.query()?.clone();

        if let Err(e) = surface.apply_edits(&[TextEdit::new(target.start, target.end, replacement)]) {
            tracing::warn!(error = %e, "replace failed");
            self.clear();
            return None;
        }
        Some(query)
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/search/replace.rs"]
mod tests;
