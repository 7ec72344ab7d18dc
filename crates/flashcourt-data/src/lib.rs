//! flashcourt-data: player dataset loading.
//!
//! Fetches the roster CSV over HTTP or from disk, normalizes it into a
//! `Dataset`, caches it for the life of the process, and reads the
//! `flashcourt.toml` configuration.

pub mod config;
pub mod error;
pub mod loader;
pub mod mock;
pub mod parser;
pub mod source;

pub use config::{load_config, load_config_from, FlashcourtConfig};
pub use error::DataLoadError;
pub use loader::{load, try_load, DatasetCache, LoadedDataset};
pub use parser::{parse_dataset, validate_dataset, DatasetWarning, LoadReport};
pub use source::{source_for, DatasetSource, FileSource, HttpSource};
