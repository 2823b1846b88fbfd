use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::FORMAT_VERSION;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Export", inline)]
#[serde(default)]
/// Fixed-interval export settings.
pub struct ExportOptions {
    /// Spacing between exported keyframes in milliseconds.
    #[schemars(title = "Keyframe Interval (ms)", range(min = 100, max = 10000))]
    pub keyframe_interval_ms: u64,
    /// Version string written into exported files.
    #[schemars(skip)]
    pub format_version: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            keyframe_interval_ms: 2000,
            format_version: FORMAT_VERSION.to_owned(),
        }
    }
}
