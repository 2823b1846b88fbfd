use web_time::{SystemTime, UNIX_EPOCH};

use super::validation::{validate_keyframes, ValidationReport};
use crate::codec;
use crate::error::{ChemxError, ConstraintViolation};
use crate::model::{AtomMap, BondState, ChemxDocument, Keyframe, Metadata};
use crate::options::ExportOptions;

/// Maximum number of keyframes one store holds.
pub const MAX_KEYFRAMES: usize = 20;

/// Result of moving the cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwitchTarget<'a> {
    /// The cursor is on a stored keyframe; load a copy into the live buffer.
    Existing(&'a Keyframe),
    /// The cursor is one past the end; the caller should clear its buffer.
    NewFrame,
}

/// Ordered keyframes being authored plus a cursor in `0..=len`.
///
/// The cursor at `len` means "next save appends"; anywhere else it means
/// "next save overwrites this keyframe".
#[derive(Debug, Clone, Default)]
pub struct KeyframeStore {
    keyframes: Vec<Keyframe>,
    cursor: usize,
}

/// Wall-clock milliseconds since the Unix epoch.
fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}

impl KeyframeStore {
    /// Empty store with the cursor at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot `atoms` and `bonds` at the cursor, stamped with the current
    /// wall-clock time when appending.
    ///
    /// Returns the index written.
    pub fn save(
        &mut self,
        atoms: &AtomMap,
        bonds: &[BondState],
    ) -> Result<usize, ConstraintViolation> {
        self.save_at(atoms, bonds, now_millis())
    }

    /// [`save`](Self::save) with an explicit timestamp for appends.
    ///
    /// Appending moves the cursor to the new end so consecutive saves build
    /// a sequence. Overwriting keeps both the cursor and the stored
    /// timestamp. Appended timestamps never go below the previous last one.
    pub fn save_at(
        &mut self,
        atoms: &AtomMap,
        bonds: &[BondState],
        timestamp: u64,
    ) -> Result<usize, ConstraintViolation> {
        if atoms.is_empty() && bonds.is_empty() {
            return Err(ConstraintViolation::EmptyKeyframe);
        }
        if self.cursor < self.keyframes.len() {
            let slot = &mut self.keyframes[self.cursor];
            slot.atoms = atoms.clone();
            slot.bonds = bonds.to_vec();
            log::debug!("overwrote keyframe {}", self.cursor);
            return Ok(self.cursor);
        }
        if self.keyframes.len() >= MAX_KEYFRAMES {
            log::warn!("keyframe limit of {MAX_KEYFRAMES} reached");
            return Err(ConstraintViolation::KeyframeLimit {
                max: MAX_KEYFRAMES,
            });
        }
        let floor = self.keyframes.last().map_or(0, |k| k.timestamp);
        self.keyframes.push(Keyframe::new(
            timestamp.max(floor),
            atoms.clone(),
            bonds.to_vec(),
        ));
        let index = self.keyframes.len() - 1;
        self.cursor = self.keyframes.len();
        log::debug!("appended keyframe {index}");
        Ok(index)
    }

    /// Move the cursor to `index` in `0..=len`.
    pub fn switch_to(
        &mut self,
        index: usize,
    ) -> Result<SwitchTarget<'_>, ConstraintViolation> {
        let len = self.keyframes.len();
        if index > len {
            return Err(ConstraintViolation::KeyframeOutOfRange { index, len });
        }
        self.cursor = index;
        Ok(self
            .keyframes
            .get(index)
            .map_or(SwitchTarget::NewFrame, SwitchTarget::Existing))
    }

    /// Delete the keyframe at `index`. The cursor stays in range.
    pub fn remove(
        &mut self,
        index: usize,
    ) -> Result<Keyframe, ConstraintViolation> {
        let len = self.keyframes.len();
        if index >= len {
            return Err(ConstraintViolation::KeyframeOutOfRange { index, len });
        }
        let removed = self.keyframes.remove(index);
        if self.cursor > index {
            self.cursor -= 1;
        }
        Ok(removed)
    }

    /// Check every keyframe and report all violations.
    #[must_use]
    pub fn validate_all(&self) -> ValidationReport {
        validate_keyframes(&self.keyframes)
    }

    /// Every stored keyframe, in order.
    pub fn get_all(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Keyframe under the cursor, if the cursor is not at the end.
    pub fn get_current(&self) -> Option<&Keyframe> {
        self.keyframes.get(self.cursor)
    }

    /// Cursor position in `0..=len`.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of stored keyframes.
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    /// Whether no keyframe is stored.
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// Replace the contents with a parsed document's keyframes.
    ///
    /// The cursor is placed on the first keyframe.
    pub fn load_document(
        &mut self,
        doc: ChemxDocument,
    ) -> Result<(), ChemxError> {
        if doc.keyframes.len() > MAX_KEYFRAMES {
            let limit = ConstraintViolation::KeyframeLimit {
                max: MAX_KEYFRAMES,
            };
            return Err(limit.into());
        }
        self.keyframes = doc.keyframes;
        self.cursor = 0;
        Ok(())
    }

    /// Validate and convert the stored keyframes into an exchange document.
    pub fn to_document(
        &self,
        metadata: Metadata,
        options: &ExportOptions,
    ) -> Result<ChemxDocument, ChemxError> {
        codec::export(&self.keyframes, metadata, options)
    }
}
