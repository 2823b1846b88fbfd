use glam::Vec3;

use super::element::{self, Element};

/// One atom at one instant.
///
/// Element-derived fields are copied out of the static table at construction
/// so a keyframe stays self-contained. `current_bonds <= max_bonds` holds for
/// every atom the editor produces; parsed atoms are taken as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomState {
    /// Key unique within a keyframe.
    pub id: String,
    /// Element symbol.
    pub symbol: String,
    /// Atomic number.
    pub atomic_number: u8,
    /// Atomic mass in daltons.
    pub atomic_mass: f32,
    /// Proton count.
    pub protons: u32,
    /// Neutron count.
    pub neutrons: u32,
    /// Electron count (protons minus charge for ions).
    pub electrons: u32,
    /// First ionization energy in eV.
    pub ionization_energy: f32,
    /// Atomic radius in picometres.
    pub atomic_radius: f32,
    /// Display color, linear RGB.
    pub color: [f32; 3],
    /// Maximum bond count.
    pub max_bonds: u8,
    /// Bonds currently attached to this atom.
    pub current_bonds: u8,
    /// Position in Angstroms.
    pub position: Vec3,
    /// Signed formal charge, if any.
    pub charge: Option<f32>,
}

impl AtomState {
    /// Build an atom of `symbol` at `position` with zero bonds and no charge.
    ///
    /// Symbols missing from the element table get [`Element::UNKNOWN`]'s
    /// properties but keep their original spelling.
    pub fn from_element(
        id: impl Into<String>,
        symbol: &str,
        position: Vec3,
    ) -> Self {
        let (symbol, el) = match element::lookup(symbol) {
            Some(el) => (el.symbol.to_owned(), el),
            None => (symbol.trim().to_owned(), &Element::UNKNOWN),
        };
        Self {
            id: id.into(),
            symbol,
            atomic_number: el.atomic_number,
            atomic_mass: el.atomic_mass,
            protons: el.protons(),
            neutrons: el.neutrons(),
            electrons: el.protons(),
            ionization_energy: el.ionization_energy,
            atomic_radius: el.atomic_radius,
            color: el.color_rgb(),
            max_bonds: el.max_bonds,
            current_bonds: 0,
            position,
            charge: None,
        }
    }

    /// Set the charge and keep the electron count consistent with it.
    pub fn set_charge(&mut self, charge: Option<f32>) {
        self.charge = charge;
        let q = charge.unwrap_or(0.0).round() as i64;
        self.electrons = (i64::from(self.protons) - q).max(0) as u32;
    }

    /// Whether another bond may be attached.
    #[inline]
    pub fn can_bond(&self) -> bool {
        self.current_bonds < self.max_bonds
    }

    /// Charge with `None` read as neutral.
    #[inline]
    pub fn charge_or_zero(&self) -> f32 {
        self.charge.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_copies_table_values() {
        let o = AtomState::from_element("o1", "O", Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(o.symbol, "O");
        assert_eq!(o.atomic_number, 8);
        assert_eq!(o.electrons, 8);
        assert_eq!(o.max_bonds, 2);
        assert_eq!(o.current_bonds, 0);
        assert_eq!(o.position, Vec3::new(1.0, 2.0, 3.0));
        assert!(o.charge.is_none());
    }

    #[test]
    fn factory_normalizes_symbol_case() {
        let na = AtomState::from_element("a", "na", Vec3::ZERO);
        assert_eq!(na.symbol, "Na");
    }

    #[test]
    fn unknown_symbol_gets_placeholder() {
        let x = AtomState::from_element("x", "Uuo", Vec3::ZERO);
        assert_eq!(x.symbol, "Uuo");
        assert_eq!(x.atomic_number, 0);
        assert!(!x.can_bond());
    }

    #[test]
    fn charge_adjusts_electrons() {
        let mut na = AtomState::from_element("na", "Na", Vec3::ZERO);
        na.set_charge(Some(1.0));
        assert_eq!(na.electrons, 10);
        let mut cl = AtomState::from_element("cl", "Cl", Vec3::ZERO);
        cl.set_charge(Some(-1.0));
        assert_eq!(cl.electrons, 18);
        cl.set_charge(None);
        assert_eq!(cl.electrons, 17);
    }
}
