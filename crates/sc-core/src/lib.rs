//! Core types for Story Crystal: campaign state, record collections, and persistence.
//!
//! This crate holds everything a campaign notebook needs except the screen.
//! A [`Store`] owns the single [`CampaignState`], reads and writes it through a
//! [`Storage`] slot, and exposes the add/remove/edit operations. Display order,
//! status badges and the "next session" label are computed in [`derive`], and
//! any front end plugs in through the [`render::View`] trait.

/// Bound display text with fallbacks (campaign header, next session).
pub mod binding;
/// Store configuration.
pub mod config;
/// Derived view logic: sort orders, status classes, dates, next session.
pub mod derive;
/// Error types used throughout the crate.
pub mod error;
/// JSON export of the campaign and its download filename.
pub mod export;
/// Schema-walking defaulting routine for loaded documents.
pub mod merge;
/// Sessions, NPCs, locations, story beats and their form drafts.
pub mod record;
/// Presentation seam: sections and the `View` trait.
pub mod render;
/// The root campaign aggregate and its editable fields.
pub mod state;
/// Key-value persistence backends.
pub mod storage;
/// The store that owns and persists the campaign state.
pub mod store;

/// Re-export binding types.
pub use binding::{Binding, Bindings};
/// Re-export configuration.
pub use config::StoreConfig;
/// Re-export derived view helpers.
pub use derive::StatusClass;
/// Re-export error types.
pub use error::{CrystalError, CrystalResult, StorageError};
/// Re-export record types.
pub use record::{
    Beat, BeatDraft, Draft, Location, LocationDraft, Npc, NpcDraft, Record, RecordId, RecordKind,
    Session, SessionDraft,
};
/// Re-export presentation seam types.
pub use render::{Section, View};
/// Re-export state types.
pub use state::{Campaign, CampaignField, CampaignState, NoteField};
/// Re-export storage backends.
pub use storage::{FileStorage, MemoryStorage, Storage};
/// Re-export the store.
pub use store::Store;
