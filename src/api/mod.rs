//! Resource holder shared by editing sessions.

mod engine;
mod resources;


pub use engine::Engine;
pub use resources::load_settings;

use std::path::PathBuf;

use awe_core::dict::DictError;
use awe_core::settings::SettingsError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("dictionary error: {0}")]
    Dict(#[from] DictError),
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("IO error: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
