//! Application controller
//!
//! Owns the favorites store and the navigation state, issues lookups on
//! worker threads, and reports outcomes through a `Notifier`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use log::{debug, warn};

use crate::data::storage::KeyValueStore;
use crate::data::types::{Category, FavoriteRecord, HistoryData, HistoryEvent};
use crate::data::FavoritesStore;
use crate::date::{DateQuery, RouteKey};
use crate::error::Result;
use crate::providers::HistoryLookupClient;
use crate::share::{share_event, ShareOutcome, ShareTarget};

use super::state::{
    AppEvent, DetailPayload, DetailView, LookupState, Notice, Notifier, ResultsView, Route,
};

pub struct AppController<S: KeyValueStore> {
    lookup: Arc<dyn HistoryLookupClient>,
    favorites: FavoritesStore<S>,
    notifier: Box<dyn Notifier>,
    route: Route,
    /// Where "back" from the details view leads
    details_origin: Route,
    results: Option<ResultsView>,
    detail: Option<DetailView>,
    /// Monotonically increasing counter to discard stale lookup results
    lookup_generation: u64,
    event_tx: Sender<AppEvent>,
    event_rx: Receiver<AppEvent>,
}

impl<S: KeyValueStore> AppController<S> {
    pub fn new(
        lookup: Arc<dyn HistoryLookupClient>,
        favorites: FavoritesStore<S>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        let (event_tx, event_rx) = crossbeam_channel::unbounded();
        Self {
            lookup,
            favorites,
            notifier,
            route: Route::Home,
            details_origin: Route::Home,
            results: None,
            detail: None,
            lookup_generation: 0,
            event_tx,
            event_rx,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn results(&self) -> Option<&ResultsView> {
        self.results.as_ref()
    }

    pub fn detail(&self) -> Option<&DetailView> {
        self.detail.as_ref()
    }

    pub fn favorites_store(&mut self) -> &mut FavoritesStore<S> {
        &mut self.favorites
    }

    // =========================================================================
    // Home / search
    // =========================================================================

    /// Validate the home-view input and open its results view
    ///
    /// Returns false (after a notice) when the input is empty or invalid.
    pub fn search(&mut self, input: &str) -> bool {
        if input.trim().is_empty() {
            self.notifier.notify(Notice::EmptyDate);
            return false;
        }

        let Some(route) = DateQuery::to_route_key(input) else {
            debug!("rejected date input {input:?}");
            self.notifier.notify(Notice::InvalidDate);
            return false;
        };

        self.open_results(route);
        true
    }

    /// Navigate to the results view for a day and start its lookup
    ///
    /// Returns the generation the new view is waiting on.
    pub fn open_results(&mut self, route: RouteKey) -> u64 {
        // Bump generation so any in-flight lookup becomes stale
        self.lookup_generation = self.lookup_generation.wrapping_add(1);
        let generation = self.lookup_generation;

        debug!("lookup {} started (generation {generation})", route.path());
        self.results = Some(ResultsView {
            date_label: route.date_label(),
            route: route.clone(),
            generation,
            state: LookupState::Loading,
        });
        self.detail = None;
        self.route = Route::Results(route.clone());

        let client = Arc::clone(&self.lookup);
        let event_tx = self.event_tx.clone();
        let spawned = std::thread::Builder::new()
            .name("history-lookup".into())
            .spawn(move || {
                let result = client
                    .fetch(&route.month, &route.day)
                    .map_err(|e| e.to_string());
                let _ = event_tx.send(AppEvent::LookupResolved { generation, result });
            });

        if let Err(e) = spawned {
            self.handle_event(AppEvent::LookupResolved {
                generation,
                result: Err(format!("could not start lookup: {e}")),
            });
        }

        generation
    }

    /// Apply any lookup results that have arrived, without blocking
    ///
    /// Returns the number of events processed.
    pub fn poll(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
            processed += 1;
        }
        processed
    }

    /// Block until the visible results view stops loading or `timeout` passes
    ///
    /// Returns true when the view has settled (loaded or failed).
    pub fn wait_for_lookup(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            match &self.results {
                Some(view) if view.is_loading() => {}
                Some(_) => return true,
                None => return false,
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.event_rx.recv_timeout(remaining) {
                Ok(event) => self.handle_event(event),
                Err(RecvTimeoutError::Timeout) => return false,
                Err(RecvTimeoutError::Disconnected) => return false,
            }
        }
    }

    /// Handle a worker event.
    ///
    /// Lookup results for a view that is no longer visible are discarded.
    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::LookupResolved { generation, result } => {
                self.handle_lookup_resolved(generation, result)
            }
        }
    }

    fn handle_lookup_resolved(
        &mut self,
        generation: u64,
        result: std::result::Result<HistoryData, String>,
    ) {
        let Some(view) = self.results.as_mut() else {
            debug!("discarding lookup generation {generation}: results view closed");
            return;
        };
        if view.generation != generation || !view.is_loading() {
            debug!(
                "discarding stale lookup generation {generation} (visible {})",
                view.generation
            );
            return;
        }

        match result {
            Ok(data) => {
                debug!("lookup {} loaded", view.route.path());
                view.state = LookupState::Loaded(data);
            }
            Err(e) => {
                warn!("lookup {} failed: {e}", view.route.path());
                view.state = LookupState::Failed(e);
                self.notifier.notify(Notice::LookupFailed);
            }
        }
    }

    // =========================================================================
    // Results -> details hand-off
    // =========================================================================

    /// Pick one item of the loaded results and open it in the details view
    pub fn select_event(&mut self, category: &Category, index: usize) -> Option<DetailPayload> {
        let view = self.results.as_ref()?;
        let event = view.items(category).get(index)?.clone();
        let payload = DetailPayload::new(event, category.clone(), &view.date_label);

        self.open_details(Some(payload.clone()));
        Some(payload)
    }

    /// Open the details view
    ///
    /// Without a payload there is nothing to show, so the user is sent home.
    pub fn open_details(&mut self, payload: Option<DetailPayload>) -> bool {
        let Some(payload) = payload else {
            debug!("details opened without payload, redirecting home");
            self.go_home();
            return false;
        };

        let is_favorited = self.favorites.is_favorited(&payload.event);
        if !matches!(self.route, Route::EventDetails(_)) {
            self.details_origin = self.route.clone();
        }
        self.route = Route::EventDetails(payload.clone());
        self.detail = Some(DetailView {
            payload,
            is_favorited,
        });
        true
    }

    /// Favorite or unfavorite the event on the details view
    ///
    /// Returns the new favorited state, or `None` when no details are open.
    pub fn toggle_favorite(&mut self) -> Option<bool> {
        let detail = self.detail.as_mut()?;
        let payload = &detail.payload;

        match self
            .favorites
            .toggle(&payload.event, &payload.category, &payload.date)
        {
            Ok(true) => self.notifier.notify(Notice::FavoriteAdded),
            Ok(false) => self.notifier.notify(Notice::FavoriteRemoved),
            Err(e) => {
                warn!("favorite toggle not persisted: {e}");
                self.notifier.notify(Notice::SaveFailed);
            }
        }

        detail.is_favorited = self.favorites.is_favorited(&detail.payload.event);
        Some(detail.is_favorited)
    }

    /// Share the event on the details view
    pub fn share(
        &self,
        primary: Option<&dyn ShareTarget>,
        fallback: &dyn ShareTarget,
    ) -> Option<ShareOutcome> {
        let detail = self.detail.as_ref()?;
        let outcome = share_event(primary, fallback, &detail.payload.date, &detail.payload.event);

        match outcome {
            ShareOutcome::Copied => self.notifier.notify(Notice::Copied),
            ShareOutcome::Failed => self.notifier.notify(Notice::ShareFailed),
            ShareOutcome::Shared | ShareOutcome::Cancelled => {}
        }
        Some(outcome)
    }

    // =========================================================================
    // Favorites page
    // =========================================================================

    /// Navigate to the favorites page and return its list, newest first
    pub fn open_favorites(&mut self) -> Vec<FavoriteRecord> {
        self.results = None;
        self.detail = None;
        self.route = Route::Favorites;
        self.favorites.load_all()
    }

    /// Current favorites, newest first
    pub fn favorites(&mut self) -> Vec<FavoriteRecord> {
        self.favorites.load_all()
    }

    /// Delete a favorite from the favorites page
    ///
    /// `Ok(false)` when nothing matched. A failed write is returned after
    /// `Notice::SaveFailed`.
    pub fn remove_favorite(&mut self, event: &HistoryEvent) -> Result<bool> {
        match self.favorites.remove(event) {
            Ok(removed) => {
                if removed.is_some() {
                    self.notifier.notify(Notice::FavoriteRemovedFromList);
                }
                Ok(removed.is_some())
            }
            Err(e) => {
                warn!("favorite removal not persisted: {e}");
                self.notifier.notify(Notice::SaveFailed);
                Err(e)
            }
        }
    }

    /// Open a saved favorite in the details view
    pub fn open_favorite(&mut self, record: &FavoriteRecord) -> bool {
        self.open_details(Some(DetailPayload::from_record(record)))
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Return to the home view, abandoning any pending lookup
    pub fn go_home(&mut self) {
        self.results = None;
        self.detail = None;
        self.route = Route::Home;
        self.details_origin = Route::Home;
    }

    /// Leave the current view
    ///
    /// Details go back to the view they were opened from; every other view
    /// goes home.
    pub fn go_back(&mut self) {
        match self.route {
            Route::EventDetails(_) => {
                self.detail = None;
                self.route = std::mem::replace(&mut self.details_origin, Route::Home);
                if matches!(self.route, Route::Home) {
                    self.results = None;
                }
            }
            _ => self.go_home(),
        }
    }
}
