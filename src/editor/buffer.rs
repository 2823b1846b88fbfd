use crate::model::{AtomMap, AtomState, BondState, Keyframe};

/// The atom map and bond list currently being authored.
///
/// Mutators keep every atom's `current_bonds` in step with the bond list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LiveBuffer {
    /// Atoms by id.
    pub atoms: AtomMap,
    /// Bonds in creation order.
    pub bonds: Vec<BondState>,
}

impl LiveBuffer {
    /// Deep copy of a stored keyframe.
    pub fn from_keyframe(keyframe: &Keyframe) -> Self {
        Self {
            atoms: keyframe.atoms.clone(),
            bonds: keyframe.bonds.clone(),
        }
    }

    /// Whether the buffer has neither atoms nor bonds.
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty() && self.bonds.is_empty()
    }

    /// Bond joining `a` and `b` in either order.
    pub fn bond_between(&self, a: &str, b: &str) -> Option<&BondState> {
        self.bonds.iter().find(|bond| bond.connects(a, b))
    }

    /// Insert or replace an atom under its own id.
    pub fn insert_atom(&mut self, atom: AtomState) {
        let _ = self.atoms.insert(atom.id.clone(), atom);
    }

    /// Append a bond and count it on both endpoints.
    pub fn push_bond(&mut self, bond: BondState) {
        for id in &bond.atom_ids {
            if let Some(atom) = self.atoms.get_mut(id) {
                atom.current_bonds = atom.current_bonds.saturating_add(1);
            }
        }
        self.bonds.push(bond);
    }

    /// Remove an atom and every bond referencing it.
    ///
    /// Surviving neighbours lose one bond count per removed bond. Returns the
    /// removed atom and bonds, or `None` if `id` is unknown.
    pub fn remove_atom_cascade(
        &mut self,
        id: &str,
    ) -> Option<(AtomState, Vec<BondState>)> {
        let atom = self.atoms.remove(id)?;
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.bonds)
            .into_iter()
            .partition(|b| b.references(id));
        self.bonds = kept;
        for bond in &removed {
            self.release_endpoints(bond);
        }
        Some((atom, removed))
    }

    /// Remove one bond by id and release its endpoints.
    pub fn remove_bond(&mut self, id: &str) -> Option<BondState> {
        let index = self.bonds.iter().position(|b| b.id == id)?;
        let bond = self.bonds.remove(index);
        self.release_endpoints(&bond);
        Some(bond)
    }

    fn release_endpoints(&mut self, bond: &BondState) {
        for id in &bond.atom_ids {
            if let Some(atom) = self.atoms.get_mut(id) {
                atom.current_bonds = atom.current_bonds.saturating_sub(1);
            }
        }
    }
}
