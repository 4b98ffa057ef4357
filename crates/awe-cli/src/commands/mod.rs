pub mod config_ops;
pub mod dict_ops;
pub mod type_ops;
pub mod user_dict_ops;
