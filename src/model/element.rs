//! Static per-element property table.
//!
//! Every atom is built from one of these records through
//! [`AtomState::from_element`](super::AtomState::from_element); there is no
//! per-element type.

/// Physical and display properties of one chemical element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    /// Element symbol as written in files (`"Na"`, `"O"`).
    pub symbol: &'static str,
    /// Atomic number (proton count).
    pub atomic_number: u8,
    /// Standard atomic mass in daltons.
    pub atomic_mass: f32,
    /// First ionization energy in eV.
    pub ionization_energy: f32,
    /// Calculated atomic radius in picometres.
    pub atomic_radius: f32,
    /// CPK display color as `0xRRGGBB`.
    pub color: u32,
    /// Maximum number of bonds an atom of this element may carry.
    pub max_bonds: u8,
}

impl Element {
    /// Placeholder record for symbols missing from the table.
    pub const UNKNOWN: Element = Element {
        symbol: "?",
        atomic_number: 0,
        atomic_mass: 0.0,
        ionization_energy: 0.0,
        atomic_radius: 100.0,
        color: 0xFF_14_93,
        max_bonds: 0,
    };

    /// Proton count.
    #[inline]
    pub fn protons(&self) -> u32 {
        u32::from(self.atomic_number)
    }

    /// Neutron count of the most common isotope, estimated from the
    /// rounded standard mass.
    pub fn neutrons(&self) -> u32 {
        let nucleons = self.atomic_mass.round() as u32;
        nucleons.saturating_sub(self.protons())
    }

    /// Display color as linear `[r, g, b]` in 0..=1.
    pub fn color_rgb(&self) -> [f32; 3] {
        let channel =
            |shift: u32| ((self.color >> shift) & 0xFF) as f32 / 255.0;
        [channel(16), channel(8), channel(0)]
    }
}

/// Look up an element by symbol (ASCII case-insensitive).
#[must_use]
pub fn lookup(symbol: &str) -> Option<&'static Element> {
    let symbol = symbol.trim();
    ELEMENTS
        .iter()
        .find(|e| e.symbol.eq_ignore_ascii_case(symbol))
}

/// All elements available to the editor palette, in atomic-number order.
#[must_use]
pub fn all() -> &'static [Element] {
    ELEMENTS
}

const fn el(
    symbol: &'static str,
    atomic_number: u8,
    atomic_mass: f32,
    ionization_energy: f32,
    atomic_radius: f32,
    color: u32,
    max_bonds: u8,
) -> Element {
    Element {
        symbol,
        atomic_number,
        atomic_mass,
        ionization_energy,
        atomic_radius,
        color,
        max_bonds,
    }
}

// Z, mass (Da), first ionization (eV), radius (pm), CPK color, max bonds
const ELEMENTS: &[Element] = &[
    el("H", 1, 1.008, 13.598, 53.0, 0xFF_FF_FF, 1),
    el("He", 2, 4.0026, 24.587, 31.0, 0xD9_FF_FF, 0),
    el("Li", 3, 6.94, 5.392, 167.0, 0xCC_80_FF, 1),
    el("Be", 4, 9.0122, 9.323, 112.0, 0xC2_FF_00, 2),
    el("B", 5, 10.81, 8.298, 87.0, 0xFF_B5_B5, 3),
    el("C", 6, 12.011, 11.260, 67.0, 0x90_90_90, 4),
    el("N", 7, 14.007, 14.534, 56.0, 0x30_50_F8, 3),
    el("O", 8, 15.999, 13.618, 48.0, 0xFF_0D_0D, 2),
    el("F", 9, 18.998, 17.423, 42.0, 0x90_E0_50, 1),
    el("Ne", 10, 20.180, 21.565, 38.0, 0xB3_E3_F5, 0),
    el("Na", 11, 22.990, 5.139, 190.0, 0xAB_5C_F2, 1),
    el("Mg", 12, 24.305, 7.646, 145.0, 0x8A_FF_00, 2),
    el("Al", 13, 26.982, 5.986, 118.0, 0xBF_A6_A6, 3),
    el("Si", 14, 28.085, 8.152, 111.0, 0xF0_C8_A0, 4),
    el("P", 15, 30.974, 10.487, 98.0, 0xFF_80_00, 5),
    el("S", 16, 32.06, 10.360, 88.0, 0xFF_FF_30, 6),
    el("Cl", 17, 35.45, 12.968, 79.0, 0x1F_F0_1F, 1),
    el("Ar", 18, 39.948, 15.760, 71.0, 0x80_D1_E3, 0),
    el("K", 19, 39.098, 4.341, 243.0, 0x8F_40_D4, 1),
    el("Ca", 20, 40.078, 6.113, 194.0, 0x3D_FF_00, 2),
    el("Fe", 26, 55.845, 7.902, 156.0, 0xE0_66_33, 6),
    el("Cu", 29, 63.546, 7.726, 145.0, 0xC8_80_33, 4),
    el("Zn", 30, 65.38, 9.394, 142.0, 0x7D_80_B0, 2),
    el("Br", 35, 79.904, 11.814, 94.0, 0xA6_29_29, 1),
    el("I", 53, 126.90, 10.451, 115.0, 0x94_00_94, 1),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(lookup("cl").map(|e| e.atomic_number), Some(17));
        assert_eq!(lookup(" Na ").map(|e| e.symbol), Some("Na"));
        assert!(lookup("Xx").is_none());
    }

    #[test]
    fn neutron_counts_from_mass() {
        let carbon = lookup("C").unwrap();
        assert_eq!(carbon.protons(), 6);
        assert_eq!(carbon.neutrons(), 6);
        let hydrogen = lookup("H").unwrap();
        assert_eq!(hydrogen.neutrons(), 0);
        let chlorine = lookup("Cl").unwrap();
        assert_eq!(chlorine.neutrons(), 18);
    }

    #[test]
    fn color_channels_are_normalized() {
        let oxygen = lookup("O").unwrap();
        let [r, g, b] = oxygen.color_rgb();
        assert_eq!(r, 1.0);
        assert!((g - 13.0 / 255.0).abs() < 1e-6);
        assert!((b - 13.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn table_is_sorted_by_atomic_number() {
        assert!(all()
            .windows(2)
            .all(|w| w[0].atomic_number < w[1].atomic_number));
    }
}
