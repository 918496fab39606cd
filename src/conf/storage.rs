//! Durable settings storage options.

use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

/// Durable settings storage options.
#[derive(Clone, Debug, Deserialize, Serialize, SmartDefault)]
#[serde(default)]
pub struct Storage {
    /// Key the settings are stored under. Defaults to `settings`.
    #[default = "settings"]
    pub key: String,
}
