use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::api::types::FilterParams;
use crate::models::Property;

const SNAPSHOT_FILE: &str = "listing-scout-store.json";

/// Preferred listing layout. Presentation-only, but remembered across runs.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

/// The persisted subset of the store. Everything else (loaded listings,
/// filters, loading flag, error) lives only for the current session.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreSnapshot {
    favorites: Vec<String>,
    view_mode: ViewMode,
}

/// Token identifying one issued fetch. Only the most recently issued
/// generation may commit its result, so a slow stale response can never
/// overwrite newer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchGeneration(u64);

/// Client-side state for the listing browser: the loaded page of listings,
/// the active filters, and the two persisted user preferences (favorites and
/// view mode). Constructed explicitly and passed to consumers; all mutation
/// is synchronous.
pub struct PropertyStore {
    properties: Vec<Property>,
    favorites: Vec<String>,
    filters: FilterParams,
    view_mode: ViewMode,
    is_loading: bool,
    error: Option<String>,
    generation: u64,
    snapshot_path: Option<PathBuf>,
}

impl PropertyStore {
    /// Ephemeral store with nothing persisted.
    pub fn new() -> Self {
        Self::from_snapshot(StoreSnapshot::default(), None)
    }

    /// Store persisting favorites and view mode to a snapshot file under
    /// `dir`. A missing or unreadable snapshot just yields defaults.
    pub fn open(dir: impl AsRef<Path>) -> Self {
        let path = dir.as_ref().join(SNAPSHOT_FILE);
        let snapshot = match read_snapshot(&path) {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => StoreSnapshot::default(),
            Err(err) => {
                warn!("Ignoring unreadable store snapshot {}: {err:#}", path.display());
                StoreSnapshot::default()
            }
        };
        Self::from_snapshot(snapshot, Some(path))
    }

    fn from_snapshot(snapshot: StoreSnapshot, snapshot_path: Option<PathBuf>) -> Self {
        Self {
            properties: Vec::new(),
            favorites: snapshot.favorites,
            filters: FilterParams::default(),
            view_mode: snapshot.view_mode,
            is_loading: false,
            error: None,
            generation: 0,
            snapshot_path,
        }
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn set_properties(&mut self, properties: Vec<Property>) {
        self.properties = properties;
    }

    /// Flip favorite membership for one listing id. Toggling twice restores
    /// the original state.
    pub fn toggle_favorite(&mut self, property_id: &str) {
        match self.favorites.iter().position(|id| id == property_id) {
            Some(index) => {
                self.favorites.remove(index);
            }
            None => self.favorites.push(property_id.to_string()),
        }
        self.persist();
    }

    pub fn is_favorited(&self, property_id: &str) -> bool {
        self.favorites.iter().any(|id| id == property_id)
    }

    /// Favorited ids in insertion order. Ids with no loaded listing are
    /// kept; they simply yield no card.
    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    /// Currently loaded listings that are favorited, in listing order.
    pub fn favorite_properties(&self) -> Vec<&Property> {
        self.properties
            .iter()
            .filter(|p| self.is_favorited(&p.id))
            .collect()
    }

    pub fn filters(&self) -> &FilterParams {
        &self.filters
    }

    /// Mutate the active filters through the `FilterParams` setters, which
    /// enforce the page-reset rule.
    pub fn update_filters(&mut self, apply: impl FnOnce(&mut FilterParams)) {
        apply(&mut self.filters);
    }

    pub fn reset_filters(&mut self) {
        self.filters = FilterParams::default();
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
        self.persist();
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    /// Mark the start of a fetch: raises the loading flag, clears any stale
    /// error, and returns the token the result must present to commit.
    pub fn begin_fetch(&mut self) -> FetchGeneration {
        self.generation += 1;
        self.is_loading = true;
        self.error = None;
        FetchGeneration(self.generation)
    }

    /// Commit a fetch outcome. A successful fetch replaces the loaded
    /// listings wholesale; a failed one leaves an empty set plus the error
    /// message. Results from superseded generations are dropped.
    pub fn commit_fetch(
        &mut self,
        generation: FetchGeneration,
        outcome: Result<Vec<Property>, String>,
    ) -> bool {
        if generation.0 != self.generation {
            debug!(
                "Dropping stale fetch result (generation {} < {})",
                generation.0, self.generation
            );
            return false;
        }
        self.is_loading = false;
        match outcome {
            Ok(properties) => {
                self.properties = properties;
                self.error = None;
            }
            Err(message) => {
                self.properties.clear();
                self.error = Some(message);
            }
        }
        true
    }

    fn persist(&self) {
        let Some(path) = &self.snapshot_path else {
            return;
        };
        let snapshot = StoreSnapshot {
            favorites: self.favorites.clone(),
            view_mode: self.view_mode,
        };
        let result = serde_json::to_string_pretty(&snapshot)
            .map_err(anyhow::Error::from)
            .and_then(|json| std::fs::write(path, json).map_err(anyhow::Error::from));
        if let Err(err) = result {
            warn!("Failed to write store snapshot {}: {err:#}", path.display());
        }
    }
}

impl Default for PropertyStore {
    fn default() -> Self {
        Self::new()
    }
}

fn read_snapshot(path: &Path) -> anyhow::Result<Option<StoreSnapshot>> {
    if !path.exists() {
        return Ok(None);
    }
    let json = std::fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&json)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PropertyStatus, PropertyType};
    use chrono::Utc;

    fn listing(id: &str) -> Property {
        Property {
            id: id.to_string(),
            title: format!("Listing {id}"),
            description: String::new(),
            price: 100_000,
            location: "Downtown".to_string(),
            address: None,
            bedrooms: 2,
            bathrooms: 1,
            area: 80.0,
            property_type: PropertyType::Apartment,
            status: PropertyStatus::Available,
            features: vec![],
            images: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn toggling_a_favorite_twice_round_trips() {
        let mut store = PropertyStore::new();
        assert!(!store.is_favorited("3"));

        store.toggle_favorite("3");
        assert!(store.is_favorited("3"));

        store.toggle_favorite("3");
        assert!(!store.is_favorited("3"));
        assert!(store.favorites().is_empty());
    }

    #[test]
    fn favorite_properties_intersects_loaded_listings() {
        let mut store = PropertyStore::new();
        store.set_properties(vec![listing("1"), listing("2"), listing("3")]);
        store.toggle_favorite("3");
        store.toggle_favorite("1");
        store.toggle_favorite("missing");

        let ids: Vec<&str> = store
            .favorite_properties()
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        // Listing order, not toggle order; unknown ids yield nothing
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn snapshot_round_trips_favorites_and_view_mode_only() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = PropertyStore::open(dir.path());
        store.set_properties(vec![listing("1")]);
        store.update_filters(|f| f.set_search(Some("villa".to_string())));
        store.set_loading(true);
        store.set_error(Some("boom".to_string()));
        store.toggle_favorite("1");
        store.set_view_mode(ViewMode::List);
        drop(store);

        let reopened = PropertyStore::open(dir.path());
        assert_eq!(reopened.favorites(), ["1".to_string()]);
        assert_eq!(reopened.view_mode(), ViewMode::List);

        // Transient state does not survive a restart
        assert!(reopened.properties().is_empty());
        assert_eq!(reopened.filters(), &FilterParams::default());
        assert!(!reopened.is_loading());
        assert!(reopened.error().is_none());
    }

    #[test]
    fn corrupt_snapshot_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SNAPSHOT_FILE), "{not json").unwrap();

        let store = PropertyStore::open(dir.path());
        assert!(store.favorites().is_empty());
        assert_eq!(store.view_mode(), ViewMode::Grid);
    }

    #[test]
    fn stale_fetch_generations_cannot_commit() {
        let mut store = PropertyStore::new();

        let first = store.begin_fetch();
        let second = store.begin_fetch();

        // The superseded fetch resolves late; its result is dropped
        assert!(!store.commit_fetch(first, Ok(vec![listing("stale")])));
        assert!(store.properties().is_empty());
        assert!(store.is_loading());

        assert!(store.commit_fetch(second, Ok(vec![listing("fresh")])));
        assert_eq!(store.properties()[0].id, "fresh");
        assert!(!store.is_loading());
    }

    #[test]
    fn failed_fetch_commits_empty_set_plus_error() {
        let mut store = PropertyStore::new();
        store.set_properties(vec![listing("1")]);

        let generation = store.begin_fetch();
        assert!(store.error().is_none());
        assert!(store.commit_fetch(generation, Err("listings request failed".to_string())));

        assert!(store.properties().is_empty());
        assert_eq!(store.error(), Some("listings request failed"));
        assert!(!store.is_loading());
    }

    #[test]
    fn reset_filters_restores_defaults() {
        let mut store = PropertyStore::new();
        store.update_filters(|f| {
            f.set_search(Some("penthouse".to_string()));
            f.set_page(3);
        });
        assert_ne!(store.filters(), &FilterParams::default());

        store.reset_filters();
        assert_eq!(store.filters(), &FilterParams::default());
    }
}
