//! Rigid molecule templates.
//!
//! A template is a list of element symbols with local offsets plus bonds by
//! index. Instantiating one produces ordinary [`AtomState`] / [`BondState`]
//! records, so placed molecules edit and animate like hand-built ones.

use glam::{EulerRot, Quat, Vec3};

use super::atom::AtomState;
use super::bond::{BondState, BondType};

/// One atom of a template, relative to the molecule origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemplateAtom {
    /// Element symbol.
    pub symbol: &'static str,
    /// Offset from the molecule origin in Angstroms.
    pub offset: Vec3,
}

/// One bond of a template, by atom index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateBond {
    /// Index of the first atom.
    pub a: usize,
    /// Index of the second atom.
    pub b: usize,
    /// Bond order.
    pub order: u8,
    /// Bond category.
    pub bond_type: BondType,
}

/// A rigid molecule that can be stamped into a keyframe.
#[derive(Debug, Clone, PartialEq)]
pub struct MoleculeTemplate {
    /// Display name (also accepted by [`MoleculeTemplate::by_name`]).
    pub name: &'static str,
    /// Atoms with local offsets.
    pub atoms: Vec<TemplateAtom>,
    /// Bonds by atom index.
    pub bonds: Vec<TemplateBond>,
}

/// Rotate atoms about `pivot` by XYZ Euler angles (radians).
pub fn rotate_atoms(atoms: &mut [AtomState], pivot: Vec3, rotation: Vec3) {
    if rotation == Vec3::ZERO {
        return;
    }
    let q = Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z);
    for atom in atoms {
        atom.position = pivot + q * (atom.position - pivot);
    }
}

fn atom(symbol: &'static str, offset: Vec3) -> TemplateAtom {
    TemplateAtom { symbol, offset }
}

fn covalent(a: usize, b: usize, order: u8) -> TemplateBond {
    TemplateBond {
        a,
        b,
        order,
        bond_type: BondType::Covalent,
    }
}

impl MoleculeTemplate {
    /// H2O: 0.96 Å O-H, 104.5° H-O-H, in the XY plane.
    pub fn water() -> Self {
        let half = 104.5_f32.to_radians() / 2.0;
        let r = 0.96;
        Self {
            name: "water",
            atoms: vec![
                atom("O", Vec3::ZERO),
                atom("H", Vec3::new(r * half.sin(), -r * half.cos(), 0.0)),
                atom("H", Vec3::new(-r * half.sin(), -r * half.cos(), 0.0)),
            ],
            bonds: vec![covalent(0, 1, 1), covalent(0, 2, 1)],
        }
    }

    /// CO2: linear, 1.16 Å C=O double bonds.
    pub fn carbon_dioxide() -> Self {
        Self {
            name: "carbon_dioxide",
            atoms: vec![
                atom("C", Vec3::ZERO),
                atom("O", Vec3::new(1.16, 0.0, 0.0)),
                atom("O", Vec3::new(-1.16, 0.0, 0.0)),
            ],
            bonds: vec![covalent(0, 1, 2), covalent(0, 2, 2)],
        }
    }

    /// CH4: tetrahedral, 1.09 Å C-H.
    pub fn methane() -> Self {
        let r = 1.09;
        let corners = [
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(-1.0, -1.0, 1.0),
        ];
        let mut atoms = vec![atom("C", Vec3::ZERO)];
        atoms.extend(corners.iter().map(|c| atom("H", c.normalize() * r)));
        Self {
            name: "methane",
            atoms,
            bonds: (1..=4).map(|i| covalent(0, i, 1)).collect(),
        }
    }

    /// NH3: trigonal pyramid, 1.01 Å N-H, 106.7° H-N-H.
    pub fn ammonia() -> Self {
        let r = 1.01;
        // Polar angle from -Y so neighbouring N-H vectors meet at 106.7°.
        let cos_b: f32 = 0.3765;
        let sin_b = (1.0 - cos_b * cos_b).sqrt();
        let mut atoms = vec![atom("N", Vec3::ZERO)];
        for k in 0..3 {
            let phi = (k as f32) * std::f32::consts::TAU / 3.0;
            let dir = Vec3::new(sin_b * phi.cos(), -cos_b, sin_b * phi.sin());
            atoms.push(atom("H", dir * r));
        }
        Self {
            name: "ammonia",
            atoms,
            bonds: (1..=3).map(|i| covalent(0, i, 1)).collect(),
        }
    }

    /// HCl: 1.27 Å H-Cl.
    pub fn hydrogen_chloride() -> Self {
        Self {
            name: "hydrogen_chloride",
            atoms: vec![
                atom("Cl", Vec3::ZERO),
                atom("H", Vec3::new(1.27, 0.0, 0.0)),
            ],
            bonds: vec![covalent(0, 1, 1)],
        }
    }

    /// Built-in template by name.
    #[must_use]
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "water" | "h2o" => Some(Self::water()),
            "carbon_dioxide" | "co2" => Some(Self::carbon_dioxide()),
            "methane" | "ch4" => Some(Self::methane()),
            "ammonia" | "nh3" => Some(Self::ammonia()),
            "hydrogen_chloride" | "hcl" => Some(Self::hydrogen_chloride()),
            _ => None,
        }
    }

    /// Stamp the template at `center`, rotated by `rotation` (XYZ Euler,
    /// radians). Atom ids are `{prefix}_a{i}`, bond ids `{prefix}_b{i}`.
    ///
    /// Bond counts on the returned atoms reflect the template bonds.
    pub fn instantiate(
        &self,
        prefix: &str,
        center: Vec3,
        rotation: Vec3,
    ) -> (Vec<AtomState>, Vec<BondState>) {
        let mut atoms: Vec<AtomState> = self
            .atoms
            .iter()
            .enumerate()
            .map(|(i, a)| {
                AtomState::from_element(
                    format!("{prefix}_a{i}"),
                    a.symbol,
                    center + a.offset,
                )
            })
            .collect();
        rotate_atoms(&mut atoms, center, rotation);

        let mut bonds = Vec::with_capacity(self.bonds.len());
        for (i, tb) in self.bonds.iter().enumerate() {
            if tb.a >= atoms.len() || tb.b >= atoms.len() || tb.a == tb.b {
                continue;
            }
            let mut bond = BondState::new(
                format!("{prefix}_b{i}"),
                atoms[tb.a].id.clone(),
                atoms[tb.b].id.clone(),
                tb.bond_type,
            );
            bond.order = tb.order;
            for idx in [tb.a, tb.b] {
                let count = &mut atoms[idx].current_bonds;
                *count = count.saturating_add(1);
            }
            bonds.push(bond);
        }
        (atoms, bonds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn water_geometry() {
        let water = MoleculeTemplate::water();
        let o = water.atoms[0].offset;
        let h1 = water.atoms[1].offset - o;
        let h2 = water.atoms[2].offset - o;
        assert!((h1.length() - 0.96).abs() < 1e-5);
        assert!((h2.length() - 0.96).abs() < 1e-5);
        let angle = h1.angle_between(h2).to_degrees();
        assert!((angle - 104.5).abs() < 1e-3);
    }

    #[test]
    fn ammonia_angle() {
        let nh3 = MoleculeTemplate::ammonia();
        let a = nh3.atoms[1].offset;
        let b = nh3.atoms[2].offset;
        assert!((a.angle_between(b).to_degrees() - 106.7).abs() < 0.1);
    }

    #[test]
    fn instantiate_sets_ids_and_bond_counts() {
        let (atoms, bonds) = MoleculeTemplate::methane().instantiate(
            "m1",
            Vec3::new(5.0, 0.0, 0.0),
            Vec3::ZERO,
        );
        assert_eq!(atoms.len(), 5);
        assert_eq!(bonds.len(), 4);
        assert_eq!(atoms[0].id, "m1_a0");
        assert_eq!(atoms[0].current_bonds, 4);
        assert!(atoms[1..].iter().all(|a| a.current_bonds == 1));
        assert_eq!(atoms[0].position, Vec3::new(5.0, 0.0, 0.0));
        assert!(bonds.iter().all(|b| b.references("m1_a0")));
    }

    #[test]
    fn rotation_preserves_distances() {
        let (mut atoms, _) =
            MoleculeTemplate::carbon_dioxide().instantiate("c", Vec3::ZERO, Vec3::ZERO);
        rotate_atoms(
            &mut atoms,
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, std::f32::consts::FRAC_PI_2),
        );
        assert!((atoms[1].position - Vec3::new(0.0, 1.16, 0.0)).length() < 1e-5);
        assert!((atoms[1].position.length() - 1.16).abs() < 1e-5);
    }

    #[test]
    fn lookup_by_formula() {
        assert_eq!(MoleculeTemplate::by_name("H2O").map(|m| m.name), Some("water"));
        assert!(MoleculeTemplate::by_name("benzene").is_none());
    }
}
