pub mod controller;
pub mod keymap;
pub mod logging;
pub mod options;
pub mod snapshot;

pub use controller::{BackendController, BackendError, BackendResult, SaveResponse};
pub use keymap::{KeyConversionError, KeySequencePayload, KeyStrokePayload};
pub use logging::DebugLogger;
pub use options::BackendOptions;
pub use snapshot::{BufferSnapshot, EditorSnapshot, LanguageSelectorSnapshot, StatusSnapshot};
