//! Favorites management
//!
//! The favorites list lives under one key of a `KeyValueStore` as a JSON
//! array in insertion order (oldest first). It is loaded lazily, kept in
//! memory for the session, and written back whole after every mutation.
//! `load_all` hands out the newest-first view and never writes it back.

use crate::config::storage::FAVORITES_KEY;
use crate::data::storage::KeyValueStore;
use crate::data::types::{same_event, Category, FavoriteRecord, HistoryEvent};
use crate::error::{HistoriaError, Result};
use log::{debug, info, warn};

/// Owner of the favorites collection
///
/// At most one record exists per distinct event.
pub struct FavoritesStore<S: KeyValueStore> {
    backend: S,
    key: String,
    /// Records in storage order, `None` until first access
    records: Option<Vec<FavoriteRecord>>,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Create a store over the default `historyFavorites` key
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, FAVORITES_KEY)
    }

    /// Create a store over a custom key
    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            records: None,
        }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Re-read the durable entry and return the favorites newest first
    ///
    /// Never fails: an absent or malformed entry reads as empty. When the
    /// backend cannot be read, the records already in memory are kept.
    pub fn load_all(&mut self) -> Vec<FavoriteRecord> {
        match read_records(&self.backend, &self.key) {
            Ok(loaded) => self.records = Some(loaded),
            Err(e) => warn!("favorites re-read failed, keeping session list: {e}"),
        }
        self.records().iter().rev().cloned().collect()
    }

    /// Whether an equal event is already stored
    pub fn is_favorited(&mut self, event: &HistoryEvent) -> bool {
        self.records()
            .iter()
            .any(|record| same_event(&record.event, event))
    }

    /// Find the record for an event
    pub fn get(&mut self, event: &HistoryEvent) -> Option<&FavoriteRecord> {
        self.records()
            .iter()
            .find(|record| same_event(&record.event, event))
    }

    /// Append a record and flush
    ///
    /// Rejects a record whose event is already stored.
    pub fn add(&mut self, record: FavoriteRecord) -> Result<()> {
        if self.is_favorited(&record.event) {
            return Err(HistoriaError::AlreadyFavorited(record.event.to_string()));
        }

        info!(
            "favorite added: year={} category={}",
            record.event.year, record.category
        );
        self.records().push(record);
        self.flush()
    }

    /// Remove the record for an event and flush
    ///
    /// Returns `Ok(None)` without touching storage when nothing matches.
    pub fn remove(&mut self, event: &HistoryEvent) -> Result<Option<FavoriteRecord>> {
        let records = self.records();
        let Some(index) = records
            .iter()
            .position(|record| same_event(&record.event, event))
        else {
            debug!("favorite remove: no match for year={}", event.year);
            return Ok(None);
        };

        let removed = records.remove(index);
        info!(
            "favorite removed: year={} category={}",
            removed.event.year, removed.category
        );
        self.flush()?;
        Ok(Some(removed))
    }

    /// Add the event if absent, remove it if present
    ///
    /// Returns whether the event is favorited afterwards.
    pub fn toggle(
        &mut self,
        event: &HistoryEvent,
        category: &Category,
        date: &str,
    ) -> Result<bool> {
        if self.is_favorited(event) {
            self.remove(event)?;
            Ok(false)
        } else {
            self.add(FavoriteRecord::new(event.clone(), category.clone(), date))?;
            Ok(true)
        }
    }

    /// Drop every favorite and delete the durable entry
    pub fn clear(&mut self) -> Result<()> {
        self.records = Some(Vec::new());
        info!("favorites cleared");
        self.backend.remove(&self.key)
    }

    /// Number of favorites
    pub fn count(&mut self) -> usize {
        self.records().len()
    }

    /// Check if empty
    pub fn is_empty(&mut self) -> bool {
        self.records().is_empty()
    }

    /// In-memory records in storage order, loading them on first use
    fn records(&mut self) -> &mut Vec<FavoriteRecord> {
        self.records.get_or_insert_with(|| {
            read_records(&self.backend, &self.key).unwrap_or_else(|e| {
                warn!("favorites read failed, treating as empty: {e}");
                Vec::new()
            })
        })
    }

    /// Write the whole list back in storage order
    fn flush(&mut self) -> Result<()> {
        let records = self.records.as_deref().unwrap_or(&[]);
        let json = serde_json::to_string(records)
            .map_err(|e| HistoriaError::Storage(format!("Failed to serialize favorites: {e}")))?;

        if let Err(e) = self.backend.set(&self.key, &json) {
            warn!("favorites write failed, keeping in-memory state: {e}");
            return Err(e);
        }
        Ok(())
    }
}

/// Read and decode the durable entry
///
/// Only a backend read error is returned; an absent, blank or malformed
/// entry decodes to an empty list.
fn read_records<S: KeyValueStore>(backend: &S, key: &str) -> Result<Vec<FavoriteRecord>> {
    let Some(raw) = backend.get(key)? else {
        return Ok(Vec::new());
    };

    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let parsed: Vec<FavoriteRecord> = match serde_json::from_str(&raw) {
        Ok(records) => records,
        Err(e) => {
            warn!("favorites entry is malformed, treating as empty: {e}");
            return Ok(Vec::new());
        }
    };

    let mut records: Vec<FavoriteRecord> = Vec::with_capacity(parsed.len());
    for record in parsed {
        if records.iter().any(|kept| same_event(&kept.event, &record.event)) {
            debug!("dropping duplicate favorite: year={}", record.event.year);
            continue;
        }
        records.push(record);
    }
    Ok(records)
}
