use super::keyframe::Keyframe;
use crate::error::ChemxError;

/// Format version written by this crate.
pub const FORMAT_VERSION: &str = "1.0";

/// Descriptive document metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Metadata {
    /// Short title.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Creation time, milliseconds since the Unix epoch.
    pub created: u64,
}

/// A full animation: metadata, duration and ordered keyframes.
///
/// Keyframes are expected in non-decreasing timestamp order; nothing here
/// reorders them.
#[derive(Debug, Clone, PartialEq)]
pub struct ChemxDocument {
    /// Format version string.
    pub version: String,
    /// Descriptive metadata.
    pub metadata: Metadata,
    /// Total playback length. Should be at least the last timestamp.
    pub duration: u64,
    /// Ordered keyframes.
    pub keyframes: Vec<Keyframe>,
}

impl ChemxDocument {
    /// Document at the current format version.
    pub fn new(
        metadata: Metadata,
        duration: u64,
        keyframes: Vec<Keyframe>,
    ) -> Self {
        Self {
            version: FORMAT_VERSION.to_owned(),
            metadata,
            duration,
            keyframes,
        }
    }

    /// Timestamp of the last keyframe, or 0 for an empty document.
    pub fn last_timestamp(&self) -> u64 {
        self.keyframes.last().map_or(0, |k| k.timestamp)
    }

    /// Reject documents the animation engine cannot play.
    pub fn ensure_playable(&self) -> Result<(), ChemxError> {
        if self.keyframes.is_empty() {
            return Err(ChemxError::Format("document has no keyframes".into()));
        }
        Ok(())
    }
}
