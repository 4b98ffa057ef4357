use std::path::Path;
use std::sync::Arc;

use awe_core::dict::BinaryDictionary;
use awe_core::settings::{parse_settings_toml, Settings};
use awe_core::user_dict::UserDictionary;
use tracing::{debug, warn};

use super::EngineError;

/// Read and validate a settings file.
pub fn load_settings(path: &Path) -> Result<Settings, EngineError> {
    let content = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let settings = parse_settings_toml(&content)?;
    debug!(path = %path.display(), "loaded settings");
    Ok(settings)
}

/// Open the main dictionary. A missing or unreadable file leaves the engine
/// without one; suggestions then come from the learned sources only.
pub(super) fn open_main_dictionary(path: &Path) -> Option<Arc<BinaryDictionary>> {
    match BinaryDictionary::open(path) {
        Ok(dict) => Some(Arc::new(dict)),
        Err(e) => {
            warn!(path = %path.display(), "main dictionary unavailable: {e}");
            None
        }
    }
}

pub(super) fn open_user_dictionary(path: Option<&Path>) -> Result<Arc<UserDictionary>, EngineError> {
    let dict = match path {
        Some(p) => UserDictionary::open(p)?,
        None => UserDictionary::new(),
    };
    debug!(words = dict.len(), "opened user dictionary");
    Ok(Arc::new(dict))
}
