use std::path::{Path, PathBuf};
use std::sync::Arc;

use awe_core::dict::{AutoDictionary, BinaryDictionary, Dictionary};
use awe_core::settings::Settings;
use awe_core::user_dict::UserDictionary;
use awe_session::{EditorConnection, InputSession};

use super::resources::{open_main_dictionary, open_user_dictionary};
use super::EngineError;

pub struct Engine {
    main: Option<Arc<BinaryDictionary>>,
    user: Arc<UserDictionary>,
    user_path: Option<PathBuf>,
    auto: Arc<AutoDictionary>,
    settings: Settings,
}

impl Engine {
    /// Open the engine's dictionaries.
    ///
    /// The main dictionary is optional: failing to open it is logged and the
    /// engine runs without it. A user dictionary that exists but cannot be
    /// read is an error.
    pub fn open(
        main_dict: Option<&Path>,
        user_dict: Option<&Path>,
        settings: Settings,
    ) -> Result<Self, EngineError> {
        let main = main_dict.and_then(open_main_dictionary);
        let user = open_user_dictionary(user_dict)?;
        let auto = Arc::new(AutoDictionary::new(
            settings.learning_policy(),
            Some(Arc::clone(&user)),
        ));
        Ok(Self {
            main,
            user,
            user_path: user_dict.map(Path::to_path_buf),
            auto,
            settings,
        })
    }

    pub fn create_session<E: EditorConnection>(&self) -> InputSession<E> {
        let main = self
            .main
            .as_ref()
            .map(|d| Arc::clone(d) as Arc<dyn Dictionary>);
        InputSession::new(
            main,
            Some(Arc::clone(&self.user)),
            Arc::clone(&self.auto),
            self.settings.clone(),
        )
    }

    /// Settings handed to sessions created from now on.
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn has_main_dictionary(&self) -> bool {
        self.main.as_ref().is_some_and(|d| !d.is_closed())
    }

    pub fn user_dictionary(&self) -> &Arc<UserDictionary> {
        &self.user
    }

    pub fn auto_dictionary(&self) -> &Arc<AutoDictionary> {
        &self.auto
    }

    /// Write the user dictionary back to the file it was opened from.
    pub fn save_user_dictionary(&self) -> Result<(), EngineError> {
        match &self.user_path {
            Some(path) => Ok(self.user.save(path)?),
            None => Ok(()),
        }
    }

    /// Release the main dictionary. Sessions still holding it get no
    /// candidates from it afterwards.
    pub fn close(&self) {
        if let Some(main) = &self.main {
            main.close();
        }
    }
}
