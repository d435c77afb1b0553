//! # Settings Module
//!
//! ## Purpose
//! Configuration of the balancer: how the raw equation text is normalized, how large
//! a system may get before the permutation search is refused, and how the final
//! coefficients are scaled.
//!
//! ## Configuration Format
//! ```json
//! {
//!   "max_dimension": 10,
//!   "scaling": "Lowest",
//!   "accept_arrows": true,
//!   "strip_phase_marks": true,
//!   "log_level": "info"
//! }
//! ```
//! Missing keys take their default values, a missing file gives the default settings.

use crate::errors::BalanceError;
use log::{LevelFilter, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// default name of the settings file
pub const SETTINGS_FILE: &str = "balance_settings.json";

/// How the solved unknowns are turned into integer coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScalingMode {
    /// smallest integer ratio: multiply out the denominators and divide by the gcd
    #[default]
    Lowest,
    /// scale by the largest pivot magnitude of the eliminated system, no gcd reduction
    LargestPivot,
}

/// Settings of the balancer.
///
/// # Fields
/// * `max_dimension` - largest number of unknown coefficients accepted; the pivot search is factorial in it
/// * `scaling` - scaling of the final coefficients
/// * `accept_arrows` - treat `->`, `=>` and `→` as the `=` separator
/// * `strip_phase_marks` - remove `(g)`, `(l)`, `(s)`, `(aq)` after species
/// * `log_level` - level of the terminal logger ("off", "error", "warn", "info", "debug", "trace")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub max_dimension: usize,
    pub scaling: ScalingMode,
    pub accept_arrows: bool,
    pub strip_phase_marks: bool,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_dimension: 10,
            scaling: ScalingMode::Lowest,
            accept_arrows: true,
            strip_phase_marks: true,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from a JSON file. If the file does not exist the default settings are returned,
    /// a file that exists but cannot be parsed is an error.
    pub fn load(file_name: &str) -> Result<Self, BalanceError> {
        if !Path::new(file_name).exists() {
            info!("settings file '{}' not found, using defaults", file_name);
            return Ok(Self::default());
        }
        let content = fs::read_to_string(file_name)?;
        let settings: Settings = serde_json::from_str(&content)?;
        info!("settings loaded from '{}'", file_name);
        Ok(settings)
    }

    /// Writes settings to a JSON file
    pub fn save(&self, file_name: &str) -> Result<(), BalanceError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(file_name, content)?;
        Ok(())
    }

    /// Level of the terminal logger; unknown names fall back to `Info`
    pub fn level_filter(&self) -> LevelFilter {
        match LevelFilter::from_str(&self.log_level) {
            Ok(level) => level,
            Err(_) => {
                warn!("unknown log level '{}', using info", self.log_level);
                LevelFilter::Info
            }
        }
    }
}
