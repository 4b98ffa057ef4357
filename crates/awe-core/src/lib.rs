pub mod composer;
pub mod dict;
pub mod settings;
pub mod suggest;
pub mod text;
pub mod user_dict;
