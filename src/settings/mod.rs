//! Settings module
//!
//! Runtime configuration loaded from a YAML or TOML file. Every field has a
//! default, so an empty file or no file at all is valid.

pub mod settings_struct;

pub use settings_struct::{Settings, SettingsError};
