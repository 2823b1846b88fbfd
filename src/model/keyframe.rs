use std::collections::BTreeMap;

use super::atom::AtomState;
use super::bond::BondState;

/// Atoms of one keyframe keyed by atom id.
///
/// Ordered so that serialization is deterministic; lookups by key are what
/// matter, insertion order carries no meaning.
pub type AtomMap = BTreeMap<String, AtomState>;

/// A timestamped, complete snapshot of every atom and bond at one instant.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Keyframe {
    /// Time of this snapshot (milliseconds by convention).
    pub timestamp: u64,
    /// Atoms by id.
    pub atoms: AtomMap,
    /// Bonds in authoring order.
    pub bonds: Vec<BondState>,
}

impl Keyframe {
    /// Keyframe from its parts.
    pub fn new(timestamp: u64, atoms: AtomMap, bonds: Vec<BondState>) -> Self {
        Self {
            timestamp,
            atoms,
            bonds,
        }
    }

    /// Whether the keyframe has neither atoms nor bonds.
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty() && self.bonds.is_empty()
    }

    /// Bond with the given id.
    pub fn bond(&self, id: &str) -> Option<&BondState> {
        self.bonds.iter().find(|b| b.id == id)
    }

    /// Recompute every atom's `current_bonds` from the bond list.
    ///
    /// Counts saturate at `u8::MAX`; dangling bond endpoints are ignored.
    pub fn recount_bonds(&mut self) {
        for atom in self.atoms.values_mut() {
            atom.current_bonds = 0;
        }
        for bond in &self.bonds {
            for id in &bond.atom_ids {
                if let Some(atom) = self.atoms.get_mut(id) {
                    atom.current_bonds = atom.current_bonds.saturating_add(1);
                }
            }
        }
    }
}
