//! Pure translation logic. Nothing here performs I/O or logs.
//!
//! - `json`: parsing with explicit fallback, flattening, field insertion
//! - `gaps`: missing translation and missing/empty field analysis
//! - `state`: the session's translation set with derived gap maps
//! - `types`: shared data model

pub mod gaps;
pub mod json;
pub mod state;
pub mod types;

pub use gaps::{GapReport, analyze};
pub use state::{Action, StateError, TranslationStore};
pub use types::{LanguageFiles, SelectedTranslation, TranslationKey, TranslationSet};
