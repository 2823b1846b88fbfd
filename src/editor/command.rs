//! The editor's complete interactive vocabulary.
//!
//! Pointer events from the scene layer, toolbar picks and the position
//! editor all arrive as an [`EditorCommand`] passed to
//! [`EditorController::execute`](super::EditorController::execute).

use glam::Vec3;

use crate::error::ConstraintViolation;
use crate::model::{BondType, MoleculeTemplate};

/// Active editing tool. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// Clicking an atom selects it for the position editor.
    #[default]
    Select,
    /// Clicking the scene places an atom of the selected element.
    AddAtom,
    /// Clicking an atom deletes it and its bonds.
    DeleteAtom,
    /// Clicking two atoms in turn bonds them.
    AddBond,
    /// Clicking a bond removes it.
    BreakBond,
}

/// A discrete operation the editor can perform.
///
/// ```ignore
/// editor.execute(EditorCommand::SetMode(EditMode::AddAtom));
/// editor.execute(EditorCommand::ClickScene { point: Vec3::ZERO });
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    // ── Tools ───────────────────────────────────────────────────────
    /// Switch the active tool. Clears any pending bond start.
    SetMode(EditMode),

    /// Pick the element placed by [`EditMode::AddAtom`].
    SelectElement {
        /// Element symbol, any case.
        symbol: String,
    },

    /// Pick the bond type created by [`EditMode::AddBond`].
    SelectBondType(BondType),

    // ── Pointer ─────────────────────────────────────────────────────
    /// Click on empty space at a 3D point.
    ClickScene {
        /// Picked world-space point.
        point: Vec3,
    },

    /// Click on an atom.
    ClickAtom {
        /// Id of the clicked atom.
        atom_id: String,
    },

    /// Click on a bond.
    ClickBond {
        /// Id of the clicked bond.
        bond_id: String,
    },

    /// Drop any atom selection and pending bond start.
    ClearSelection,

    // ── Position editor ─────────────────────────────────────────────
    /// Move an atom to an absolute position.
    MoveAtom {
        /// Atom to move.
        atom_id: String,
        /// New position.
        position: Vec3,
    },

    /// Set or clear an atom's charge.
    SetCharge {
        /// Atom to charge.
        atom_id: String,
        /// New charge; `None` makes it neutral.
        charge: Option<f32>,
    },

    // ── Templates ───────────────────────────────────────────────────
    /// Stamp a rigid molecule template as one undoable edit.
    PlaceMolecule {
        /// Template to place.
        template: MoleculeTemplate,
        /// Where its origin lands.
        center: Vec3,
        /// XYZ Euler rotation in radians.
        rotation: Vec3,
    },

    // ── History ─────────────────────────────────────────────────────
    /// Revert the live buffer to its previous snapshot.
    Undo,
}

/// What a command did.
///
/// None of these are errors: rejected edits leave the live buffer untouched
/// and carry the reason for user-facing feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The command took effect.
    Applied,
    /// Nothing to do in the current state.
    NoOp,
    /// A pending bond start was cleared by clicking it again.
    Deselected,
    /// The edit would break a constraint.
    Rejected(ConstraintViolation),
}

impl EditOutcome {
    /// Whether the command took effect.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}
