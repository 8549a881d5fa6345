//! Shared state: the subtitle repository and the language-preference store.

pub mod preference;
pub mod repository;

pub use preference::{JsonPreferenceStore, MemoryPreferenceStore, PreferenceStore};
pub use repository::SubtitleStore;
