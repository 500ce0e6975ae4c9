// Copyright (c) 2026 The pintan Developers

/// Default bound on dialog initialisation repeats
pub const DEFAULT_MAX_RESTARTS: usize = 3;

/// Passport and dialog driver configuration
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Config {
    /// Highest `HITANS` segment version considered when building the method
    /// catalog, `None` for no limit
    pub max_tan_segment_version: Option<u32>,

    /// Request a TAN for the identification segment of the next dialog
    pub verify_tan_mode: bool,

    /// Maximum number of dialog initialisation repeats before the driver gives up
    pub max_restarts: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_tan_segment_version: None,
            verify_tan_mode: false,
            max_restarts: DEFAULT_MAX_RESTARTS,
        }
    }
}
