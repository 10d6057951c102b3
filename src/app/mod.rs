use tracing::{debug, warn};

use crate::error::{AppError, Result};
use crate::models::{Book, HistoryEntry, ResultSet, SearchQuery};
use crate::services::{FavoritesStore, OpenLibraryClient, SearchHistory};

/// Which collection the result grid renders from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Search,
    Favorites,
}

/// Lifecycle of the current search, orthogonal to the selected view.
#[derive(Debug)]
pub enum SearchState {
    Idle,
    Loading,
    Success(ResultSet),
    Error(String),
}

impl SearchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading)
    }
}

/// Top-level controller: owns the view state and wires user actions to the
/// gateway and the persistent collections. The repositories are injected
/// once at construction rather than living in ambient globals.
pub struct Controller {
    gateway: OpenLibraryClient,
    favorites: FavoritesStore,
    history: SearchHistory,
    state: SearchState,
    view: View,
    last_query: Option<SearchQuery>,
    // Monotonic ticket per search; a response holding a stale ticket is
    // dropped instead of overwriting newer state.
    seq: u64,
}

impl Controller {
    pub fn new(
        gateway: OpenLibraryClient,
        favorites: FavoritesStore,
        history: SearchHistory,
    ) -> Self {
        Controller {
            gateway,
            favorites,
            history,
            state: SearchState::Idle,
            view: View::Search,
            last_query: None,
            seq: 0,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn last_query(&self) -> Option<&SearchQuery> {
        self.last_query.as_ref()
    }

    /// Submits a search end to end: guard, request, state transition.
    pub async fn submit(&mut self, query: SearchQuery) -> Result<()> {
        let seq = self.begin(query.clone())?;
        let result = self.gateway.search(&query).await;
        self.finish(seq, result);
        Ok(())
    }

    /// Reruns the last submitted query through the normal transition path.
    pub async fn retry(&mut self) -> Result<()> {
        match self.last_query.clone() {
            Some(query) => self.submit(query).await,
            None => Ok(()),
        }
    }

    /// Starts a search: rejects blank text before any request is issued,
    /// then moves to `Loading` and hands back the request ticket.
    pub fn begin(&mut self, query: SearchQuery) -> Result<u64> {
        if query.text.trim().is_empty() {
            return Err(AppError::EmptyQuery);
        }
        self.seq += 1;
        self.state = SearchState::Loading;
        self.last_query = Some(query);
        Ok(self.seq)
    }

    /// Applies a gateway response. Success records a history entry and
    /// switches to the search view; failure discards prior results and
    /// surfaces the message. Stale tickets are ignored.
    pub fn finish(&mut self, seq: u64, result: Result<ResultSet>) {
        if seq != self.seq {
            debug!("dropping stale search response (ticket {})", seq);
            return;
        }

        match result {
            Ok(results) => {
                if let Some(query) = &self.last_query {
                    if let Err(err) = self.history.add(&query.text, query.search_type) {
                        warn!("failed to persist search history: {}", err);
                    }
                }
                self.state = SearchState::Success(results);
                self.view = View::Search;
            }
            Err(err) => {
                self.state = SearchState::Error(err.to_string());
            }
        }
    }

    /// Switches the rendered collection without touching the search state.
    pub fn select_view(&mut self, view: View) {
        self.view = view;
    }

    pub fn toggle_favorite(&mut self, book: &Book) -> Result<bool> {
        self.favorites.toggle(book)
    }

    pub fn is_favorite(&self, key: &str) -> bool {
        self.favorites.is_favorite(key)
    }

    pub fn favorites(&self) -> &[Book] {
        self.favorites.books()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    pub fn gateway(&self) -> &OpenLibraryClient {
        &self.gateway
    }

    /// Books the current view renders: stored results for the search view,
    /// the favorites collection otherwise.
    pub fn visible_books(&self) -> &[Book] {
        match self.view {
            View::Favorites => self.favorites.books(),
            View::Search => match &self.state {
                SearchState::Success(results) => &results.docs,
                _ => &[],
            },
        }
    }
}
