// Copyright 2024 Adobe. All rights reserved.
// This file is licensed to you under the Apache License,
// Version 2.0 (http://www.apache.org/licenses/LICENSE-2.0)
// or the MIT license (http://opensource.org/licenses/MIT),
// at your option.

// Unless required by applicable law or agreed to in writing,
// this software is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR REPRESENTATIONS OF ANY KIND, either express or
// implied. See the LICENSE-MIT and LICENSE-APACHE files for the
// specific language governing permissions and limitations under
// each license.

//! Settings for time-stamp resolution.
//!
//! Default values are loaded lazily on first use. Values can be replaced
//! from a JSON or TOML document, or set one at a time by dotted path (for
//! example `"timestamps.max_counter_signature_depth"`). Partial documents
//! only override the keys they name.
//!
//! Settings are kept per thread. [`resolve_signatures`] takes a snapshot on
//! the calling thread and hands it to its workers.
//!
//! [`resolve_signatures`]: crate::resolve_signatures

use std::cell::RefCell;

use ades_status_tracker::{ErrorBehavior, StatusTracker};
use config::{Config, FileFormat};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{Error, Result};

/// Token encoding URI accepted when no other is configured.
pub const DER_ENCODING_URI: &str = "http://uri.etsi.org/01903/v1.2.2#DER";

thread_local!(
    static SETTINGS: RefCell<Config> =
        RefCell::new(Config::try_from(&Settings::default()).unwrap_or_default());
);

// trait used to validate user input to make sure user supplied configurations are valid
pub(crate) trait SettingsValidate {
    // returns error if settings are invalid
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Settings that control how time-stamp evidence is resolved.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TimestampSettings {
    /// Abort resolution on the first malformed item instead of skipping it.
    pub stop_on_first_error: bool,

    /// Maximum nesting of counter signatures.
    pub max_counter_signature_depth: usize,

    /// Token `encoding` URIs accepted in addition to an absent one.
    pub accepted_token_encodings: Vec<String>,

    /// Accept `etsiU` components that are base64url-encoded JSON.
    pub decode_base64url_components: bool,
}

impl Default for TimestampSettings {
    fn default() -> Self {
        Self {
            stop_on_first_error: false,
            max_counter_signature_depth: 16,
            accepted_token_encodings: vec![DER_ENCODING_URI.to_owned()],
            decode_base64url_components: true,
        }
    }
}

impl TimestampSettings {
    /// Returns the [`ErrorBehavior`] these settings ask for.
    pub fn error_behavior(&self) -> ErrorBehavior {
        if self.stop_on_first_error {
            ErrorBehavior::StopOnFirstError
        } else {
            ErrorBehavior::ContinueWhenPossible
        }
    }

    /// Returns an empty [`StatusTracker`] configured per these settings.
    pub fn status_tracker(&self) -> StatusTracker {
        StatusTracker::with_error_behavior(self.error_behavior())
    }
}

impl SettingsValidate for TimestampSettings {
    fn validate(&self) -> Result<()> {
        if self.max_counter_signature_depth == 0 {
            return Err(Error::BadParam(
                "max_counter_signature_depth must be at least 1".into(),
            ));
        }

        if self.accepted_token_encodings.iter().any(|e| e.trim().is_empty()) {
            return Err(Error::BadParam(
                "accepted_token_encodings must not contain empty URIs".into(),
            ));
        }

        Ok(())
    }
}

const MAJOR_VERSION: usize = 1;
const MINOR_VERSION: usize = 0;

/// All settings of this crate.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default = "default_major")]
    version_major: usize,
    #[serde(default = "default_minor")]
    version_minor: usize,
    timestamps: TimestampSettings,
}

fn default_major() -> usize {
    MAJOR_VERSION
}

fn default_minor() -> usize {
    MINOR_VERSION
}

impl Settings {
    /// Parses `settings_str` (`"json"` or `"toml"`), merges it over the
    /// current settings of this thread and makes the result current.
    pub fn from_string(settings_str: &str, format: &str) -> Result<Self> {
        let f = match format.to_lowercase().as_str() {
            "json" => FileFormat::Json,
            "toml" => FileFormat::Toml,
            _ => return Err(Error::UnsupportedType),
        };

        let new_config = Config::builder()
            .add_source(config::File::from_str(settings_str, f))
            .build()
            .map_err(|_e| Error::BadParam("could not parse configuration file".into()))?;

        let update_config = SETTINGS.with_borrow(|current_settings| {
            Config::builder()
                .add_source(current_settings.clone())
                .add_source(new_config)
                .build() // merge overrides, allows for partial changes
        });

        match update_config {
            Ok(update_config) => {
                // sanity check the values before committing
                let settings = update_config
                    .clone()
                    .try_deserialize::<Settings>()
                    .map_err(|_e| {
                        Error::BadParam("configuration file contains unrecognized param".into())
                    })?;

                settings.validate()?;

                SETTINGS.set(update_config);

                Ok(settings)
            }
            Err(_) => Err(Error::BadParam("could not update configuration".into())),
        }
    }

    /// Same as [`Settings::from_string`] with a TOML document.
    pub fn from_toml(toml: &str) -> Result<Self> {
        Self::from_string(toml, "toml")
    }

    /// Same as [`Settings::from_string`] with a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_string(json, "json")
    }

    pub fn timestamps(&self) -> &TimestampSettings {
        &self.timestamps
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version_major: MAJOR_VERSION,
            version_minor: MINOR_VERSION,
            timestamps: Default::default(),
        }
    }
}

impl SettingsValidate for Settings {
    fn validate(&self) -> Result<()> {
        if self.version_major > MAJOR_VERSION {
            return Err(Error::VersionCompatibility(
                "settings version too new".into(),
            ));
        }
        self.timestamps.validate()
    }
}

/// Snapshot of the current settings of this thread. Returns `None` if the
/// stored configuration cannot be deserialized.
pub fn get_settings() -> Option<Settings> {
    SETTINGS.with_borrow(|config| config.clone().try_deserialize::<Settings>().ok())
}

/// Snapshot of the `timestamps` section, falling back to defaults.
pub fn timestamp_settings() -> TimestampSettings {
    get_settings()
        .map(|s| s.timestamps)
        .unwrap_or_default()
}

/// Loads settings from a TOML document.
pub fn load_settings(toml: &str) -> Result<()> {
    Settings::from_toml(toml).map(|_| ())
}

// Set a Settings value by path reference. The path is nested names of the Settings objects
// separated by "." notation. For example "timestamps.stop_on_first_error".
pub fn set_settings_value<T: Into<config::Value>>(value_path: &str, value: T) -> Result<()> {
    let c = SETTINGS.take();

    let update_config = Config::builder()
        .add_source(c.clone())
        .set_override(value_path, value);

    if let Ok(updated) = update_config {
        let update_config = match updated.build() {
            Ok(update_config) => update_config,
            Err(_) => {
                SETTINGS.set(c);
                return Err(Error::BadParam("could not update configuration".into()));
            }
        };

        let settings = match update_config.clone().try_deserialize::<Settings>() {
            Ok(settings) => settings,
            Err(_) => {
                SETTINGS.set(c);
                return Err(Error::BadParam(
                    "configuration contains unrecognized param".into(),
                ));
            }
        };

        if let Err(e) = settings.validate() {
            SETTINGS.set(c);
            return Err(e);
        }

        SETTINGS.set(update_config);

        Ok(())
    } else {
        SETTINGS.set(c);
        Err(Error::BadParam("could not save settings".into()))
    }
}

// Get a Settings value by path reference.
pub fn get_settings_value<T: DeserializeOwned>(value_path: &str) -> Result<T> {
    SETTINGS.with_borrow(|current_settings| {
        current_settings
            .get::<T>(value_path)
            .map_err(|_| Error::NotFound)
    })
}

// Set settings back to the default values. Current use case is for testing.
pub fn reset_default_settings() -> Result<()> {
    if let Ok(default_settings) = Config::try_from(&Settings::default()) {
        SETTINGS.set(default_settings);
        Ok(())
    } else {
        Err(Error::BadParam("could not save settings".into()))
    }
}
