//! The store: single owner of the campaign state and sole user of its storage slot.
//!
//! Every mutation saves synchronously. Storage failures are logged and
//! swallowed; the in-memory state stays authoritative, it just may not
//! survive a restart.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::error::CrystalResult;
use crate::merge::{Merged, merge_document};
use crate::record::{Draft, Record, RecordId};
use crate::state::{CampaignField, CampaignState, NoteField};
use crate::storage::{FileStorage, Storage};

/// Owns the campaign state and keeps it persisted.
#[derive(Debug)]
pub struct Store<S: Storage> {
    storage: S,
    key: String,
    state: CampaignState,
}

impl Store<FileStorage> {
    /// Open the file-backed store described by `config`.
    pub fn open_with(config: &StoreConfig) -> Self {
        Self::open(FileStorage::new(&config.data_dir), config.key.clone())
    }
}

impl<S: Storage> Store<S> {
    /// Open a store over `storage`, loading whatever is saved under `key`.
    ///
    /// Records saved without an id are given one, and the document is saved
    /// straight away so those ids stay stable across runs.
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let merged = load_state(&storage, &key);
        let needs_save = merged.needs_save();
        let assigned = merged.assigned_ids;

        let mut store = Self {
            storage,
            key,
            state: merged.state,
        };
        if needs_save {
            info!(key = %store.key, assigned, "assigned ids to stored records");
            store.save();
        }
        store
    }

    /// The current state. Mutation goes through the store's methods.
    pub fn state(&self) -> &CampaignState {
        &self.state
    }

    /// The storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutable access to the storage backend.
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Write the whole state to storage.
    ///
    /// Returns whether the write landed. A failed write is logged and the
    /// program carries on with the in-memory state.
    pub fn save(&mut self) -> bool {
        let text = match serde_json::to_string(&self.state) {
            Ok(text) => text,
            Err(e) => {
                warn!(key = %self.key, error = %e, "unable to serialize campaign");
                return false;
            }
        };
        match self.storage.write(&self.key, &text) {
            Ok(()) => {
                debug!(key = %self.key, bytes = text.len(), "campaign saved");
                true
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "unable to save campaign data");
                false
            }
        }
    }

    /// Replace everything with a fresh default state and persist it.
    pub fn reset(&mut self) {
        self.state = CampaignState::default();
        self.save();
    }

    /// Edit a campaign metadata field.
    pub fn set_campaign_field(&mut self, field: CampaignField, value: impl Into<String>) {
        *self.state.campaign_field_mut(field) = value.into();
        self.save();
    }

    /// Edit a scratch note.
    pub fn set_note(&mut self, field: NoteField, value: impl Into<String>) {
        *self.state.note_mut(field) = value.into();
        self.save();
    }

    /// Add a record from a submitted form.
    ///
    /// The new record gets an id distinct from every id in its collection.
    ///
    /// # Errors
    /// [`CrystalError::MissingField`](crate::CrystalError::MissingField) when
    /// the required field is blank; nothing changes in that case.
    pub fn add<D: Draft>(&mut self, draft: D) -> CrystalResult<RecordId> {
        let id = RecordId::unique(
            D::Record::collection(&self.state)
                .iter()
                .map(Record::id),
        );
        let record = draft.into_record(id.clone())?;
        D::Record::collection_mut(&mut self.state).push(record);
        let kind = D::Record::KIND;
        debug!(%kind, %id, "record added");
        self.save();
        Ok(id)
    }

    /// Remove a record by id. Returns true if it was present.
    ///
    /// An unknown id is not an error.
    pub fn remove<R: Record>(&mut self, id: &RecordId) -> bool {
        let records = R::collection_mut(&mut self.state);
        let before = records.len();
        records.retain(|r| r.id() != id);
        let removed = records.len() < before;
        let kind = R::KIND;
        debug!(%kind, %id, removed, "record remove");
        self.save();
        removed
    }

    /// Look a record up by id.
    pub fn get<R: Record>(&self, id: &RecordId) -> Option<&R> {
        R::collection(&self.state).iter().find(|r| r.id() == id)
    }
}

/// Load the state saved under `key`, falling back to the default on any failure.
pub fn load_state<S: Storage>(storage: &S, key: &str) -> Merged {
    let fresh = || Merged {
        state: CampaignState::default(),
        assigned_ids: 0,
    };
    let text = match storage.read(key) {
        Ok(Some(text)) if !text.trim().is_empty() => text,
        Ok(_) => {
            debug!(key, "no saved campaign, starting fresh");
            return fresh();
        }
        Err(e) => {
            warn!(key, error = %e, "could not read saved data, starting fresh");
            return fresh();
        }
    };

    match serde_json::from_str::<Value>(&text) {
        Ok(doc) => merge_document(&doc),
        Err(e) => {
            warn!(key, error = %e, "could not load saved data, starting fresh");
            fresh()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CrystalError;
    use crate::merge::STORAGE_KEY;
    use crate::record::{BeatDraft, LocationDraft, Npc, NpcDraft, Session, SessionDraft};
    use crate::storage::MemoryStorage;
    use tempfile::TempDir;

    fn empty_store() -> Store<MemoryStorage> {
        Store::open(MemoryStorage::new(), STORAGE_KEY)
    }

    fn saved(store: &Store<MemoryStorage>) -> Value {
        serde_json::from_str(store.storage().get(STORAGE_KEY).unwrap()).unwrap()
    }

    fn session(title: &str) -> SessionDraft {
        SessionDraft {
            title: title.into(),
            ..Default::default()
        }
    }

    #[test]
    fn load_without_data_is_default() {
        let store = empty_store();
        assert_eq!(*store.state(), CampaignState::default());
    }

    #[test]
    fn load_blank_slot_is_default() {
        let store = Store::open(MemoryStorage::with_slot(STORAGE_KEY, "  "), STORAGE_KEY);
        assert_eq!(*store.state(), CampaignState::default());
    }

    #[test]
    fn load_corrupt_data_is_default() {
        let store = Store::open(
            MemoryStorage::with_slot(STORAGE_KEY, "{\"campaign\": {"),
            STORAGE_KEY,
        );
        assert_eq!(*store.state(), CampaignState::default());
    }

    #[test]
    fn load_unreadable_storage_is_default() {
        let mut storage = MemoryStorage::with_slot(STORAGE_KEY, "{}");
        storage.set_failing(true);
        let store = Store::open(storage, STORAGE_KEY);
        assert_eq!(*store.state(), CampaignState::default());
    }

    #[test]
    fn load_backfills_missing_fields() {
        let old = r#"{"campaign":{"title":"Isles"},"sessions":[{"id":"s1","title":"Landfall"}]}"#;
        let store = Store::open(MemoryStorage::with_slot(STORAGE_KEY, old), STORAGE_KEY);
        let state = store.state();
        assert_eq!(state.campaign.title, "Isles");
        assert_eq!(state.campaign.hook, "");
        assert_eq!(state.sessions.len(), 1);
        assert!(state.npcs.is_empty());
        assert_eq!(state.lore_notes, "");
    }

    #[test]
    fn load_drops_unknown_top_level_key() {
        let doc = r#"{"campaign":{"title":"Isles"},"darkMode":true}"#;
        let mut store = Store::open(MemoryStorage::with_slot(STORAGE_KEY, doc), STORAGE_KEY);
        store.save();
        assert!(saved(&store).get("darkMode").is_none());
        assert_eq!(saved(&store)["campaign"]["title"], "Isles");
    }

    #[test]
    fn add_appends_and_saves() {
        let mut store = empty_store();
        let id = store.add(session("Landfall")).unwrap();
        assert_eq!(store.state().sessions.len(), 1);
        assert_eq!(store.state().sessions[0].id, id);
        assert_eq!(saved(&store)["sessions"][0]["id"], id.as_str());
        assert_eq!(saved(&store)["sessions"][0]["status"], "Upcoming");
    }

    #[test]
    fn add_ids_are_distinct() {
        let mut store = empty_store();
        let ids: Vec<RecordId> = (0..20)
            .map(|i| store.add(session(&format!("Session {i}"))).unwrap())
            .collect();
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn add_blank_required_field_is_rejected() {
        let mut store = empty_store();
        store.add(session("Landfall")).unwrap();
        let before = store.state().clone();

        let err = store
            .add(NpcDraft {
                name: "  ".into(),
                role: "Smuggler".into(),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, CrystalError::MissingField { field: "name", .. }));
        assert_eq!(*store.state(), before);
    }

    #[test]
    fn add_each_collection() {
        let mut store = empty_store();
        store
            .add(NpcDraft {
                name: "Vex".into(),
                ..Default::default()
            })
            .unwrap();
        store
            .add(LocationDraft {
                name: "Saltmarsh".into(),
                ..Default::default()
            })
            .unwrap();
        store
            .add(BeatDraft {
                title: "Omen".into(),
                ..Default::default()
            })
            .unwrap();
        let doc = saved(&store);
        assert_eq!(doc["npcs"][0]["name"], "Vex");
        assert_eq!(doc["locations"][0]["name"], "Saltmarsh");
        assert_eq!(doc["beats"][0]["title"], "Omen");
    }

    #[test]
    fn remove_existing() {
        let mut store = empty_store();
        let keep = store.add(session("Keep")).unwrap();
        let drop = store.add(session("Drop")).unwrap();
        assert!(store.remove::<Session>(&drop));
        assert_eq!(store.state().sessions.len(), 1);
        assert!(store.get::<Session>(&keep).is_some());
        assert_eq!(saved(&store)["sessions"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn remove_unknown_is_noop() {
        let mut store = empty_store();
        store.add(session("Keep")).unwrap();
        let before = store.state().clone();
        assert!(!store.remove::<Session>(&RecordId::from("missing")));
        assert!(!store.remove::<Npc>(&RecordId::from("missing")));
        assert_eq!(*store.state(), before);
    }

    #[test]
    fn failing_storage_never_blocks_edits() {
        let mut store = empty_store();
        store.storage_mut().set_failing(true);
        let id = store.add(session("Offline")).unwrap();
        store.set_campaign_field(CampaignField::Title, "Isles");
        assert!(!store.save());
        assert_eq!(store.state().sessions[0].id, id);
        assert_eq!(store.state().campaign.title, "Isles");
    }

    #[test]
    fn field_edits_persist() {
        let mut store = empty_store();
        store.set_campaign_field(CampaignField::Genre, "Nautical horror");
        store.set_note(NoteField::WorldTruths, "The gods are drowned.");
        let doc = saved(&store);
        assert_eq!(doc["campaign"]["genre"], "Nautical horror");
        assert_eq!(doc["worldTruths"], "The gods are drowned.");
    }

    #[test]
    fn reset_persists_default() {
        let mut store = empty_store();
        store.set_campaign_field(CampaignField::Title, "Isles");
        store.add(session("Landfall")).unwrap();
        store.reset();
        assert_eq!(*store.state(), CampaignState::default());
        let reloaded = Store::open(store.storage().clone(), STORAGE_KEY);
        assert_eq!(*reloaded.state(), CampaignState::default());
    }

    #[test]
    fn open_persists_assigned_ids() {
        let doc = r#"{"npcs":[{"name":"Vex"}]}"#;
        let store = Store::open(MemoryStorage::with_slot(STORAGE_KEY, doc), STORAGE_KEY);
        let id = store.state().npcs[0].id.clone();
        assert!(!id.as_str().is_empty());
        assert_eq!(saved(&store)["npcs"][0]["id"], id.as_str());

        let mut reopened = Store::open(store.storage().clone(), STORAGE_KEY);
        assert_eq!(reopened.state().npcs[0].id, id);
        assert!(reopened.remove::<Npc>(&id));
        assert!(reopened.state().npcs.is_empty());
    }

    #[test]
    fn open_complete_document_does_not_write() {
        let doc = r#"{"npcs":[{"id":"n1","name":"Vex"}],"darkMode":true}"#;
        let store = Store::open(MemoryStorage::with_slot(STORAGE_KEY, doc), STORAGE_KEY);
        assert_eq!(store.storage().get(STORAGE_KEY), Some(doc));
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let config = StoreConfig::default().with_data_dir(dir.path());

        let mut store = Store::open_with(&config);
        store.set_campaign_field(CampaignField::Title, "The Sundered Isles");
        let id = store
            .add(NpcDraft {
                name: "Vex".into(),
                faction: "Tide Court".into(),
                ..Default::default()
            })
            .unwrap();

        let reopened = Store::open_with(&config);
        assert_eq!(reopened.state().campaign.title, "The Sundered Isles");
        let npc: &Npc = reopened.get(&id).unwrap();
        assert_eq!(npc.faction, "Tide Court");
    }
}
