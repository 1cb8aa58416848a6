use clap::ValueEnum;
use serde::Deserialize;

/// How much of a native Clash config is read back
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NativeFidelity {
    /// Line scan emitting one placeholder node per entry
    #[default]
    Shallow,
    /// Deserialize every supported entry of the `proxies` list
    Full,
}

/// Controls the behavior of the parsing functions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseSettings {
    /// Reject links whose optional fields fail to decode instead of
    /// falling back to defaults
    pub strict: bool,

    pub native_fidelity: NativeFidelity,
}

impl ParseSettings {
    pub fn strict() -> Self {
        ParseSettings {
            strict: true,
            ..Default::default()
        }
    }
}
