//! Centralized interpolation utilities for keyframe playback.

use glam::Vec3;
use rustc_hash::FxHashMap;

use crate::model::{AtomMap, BondState, Keyframe};
use crate::options::BondFade;

/// Interpolation progress computed once per frame and shared by every atom
/// and bond so they stay in step.
#[derive(Debug, Clone, Copy)]
pub struct InterpolationContext {
    /// Raw fraction (0.0 to 1.0) between the bracketing keyframes.
    pub raw_t: f32,
    /// Fraction after easing; what interpolation actually uses.
    pub eased_t: f32,
}

impl InterpolationContext {
    /// Context with raw and eased values.
    pub fn simple(raw_t: f32, eased_t: f32) -> Self {
        Self { raw_t, eased_t }
    }

    /// Linear context (no easing).
    pub fn linear(raw_t: f32) -> Self {
        Self::simple(raw_t, raw_t)
    }

    /// Unified progress value for interpolation.
    #[inline]
    pub fn unified_t(&self) -> f32 {
        self.eased_t
    }
}

/// Lerp two positions using the context's unified progress.
#[inline]
pub fn lerp_position(
    ctx: &InterpolationContext,
    start: Vec3,
    end: Vec3,
) -> Vec3 {
    let t = ctx.unified_t();
    start + (end - start) * t
}

/// Lerp two f32 values using the context's unified progress.
#[inline]
pub fn lerp_f32(ctx: &InterpolationContext, start: f32, end: f32) -> f32 {
    let t = ctx.unified_t();
    start + (end - start) * t
}

/// Atom and bond state handed to the frame callback.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameState {
    /// Atoms visible in this frame.
    pub atoms: AtomMap,
    /// Bonds visible in this frame.
    pub bonds: Vec<BondState>,
}

impl FrameState {
    /// Verbatim copy of a keyframe.
    pub fn from_keyframe(keyframe: &Keyframe) -> Self {
        Self {
            atoms: keyframe.atoms.clone(),
            bonds: keyframe.bonds.clone(),
        }
    }
}

/// Blend two keyframes.
///
/// Only atoms present in both keyframes are emitted: position and charge are
/// lerped, bond count is lerped and rounded, everything else comes from
/// `from`. Every bond of `from` is emitted; its strength is lerped toward the
/// same-id bond in `to`, or handled per `fade` if `to` lacks it. Bonds that
/// only exist in `to` are not emitted.
pub fn interpolate_keyframes(
    from: &Keyframe,
    to: &Keyframe,
    ctx: &InterpolationContext,
    fade: BondFade,
) -> FrameState {
    let mut atoms = AtomMap::new();
    for (id, start) in &from.atoms {
        let Some(end) = to.atoms.get(id) else {
            continue;
        };
        let mut atom = start.clone();
        atom.position = lerp_position(ctx, start.position, end.position);
        atom.charge = match (start.charge, end.charge) {
            (None, None) => None,
            _ => Some(lerp_f32(
                ctx,
                start.charge_or_zero(),
                end.charge_or_zero(),
            )),
        };
        atom.current_bonds = lerp_f32(
            ctx,
            f32::from(start.current_bonds),
            f32::from(end.current_bonds),
        )
        .round() as u8;
        let _ = atoms.insert(id.clone(), atom);
    }

    let next_bonds: FxHashMap<&str, &BondState> =
        to.bonds.iter().map(|b| (b.id.as_str(), b)).collect();
    let bonds = from
        .bonds
        .iter()
        .map(|start| {
            let mut bond = start.clone();
            match (next_bonds.get(start.id.as_str()), fade) {
                (Some(end), _) => {
                    bond.strength = lerp_f32(ctx, start.strength, end.strength);
                }
                (None, BondFade::Hold) => {}
                (None, BondFade::FadeOut) => {
                    bond.strength = lerp_f32(ctx, start.strength, 0.0);
                }
            }
            bond
        })
        .collect();

    FrameState { atoms, bonds }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AtomState, BondType};

    fn keyframe(timestamp: u64, atoms: &[(&str, &str, Vec3)], bonds: &[BondState]) -> Keyframe {
        let mut map = AtomMap::new();
        for (id, symbol, pos) in atoms {
            let _ = map.insert((*id).to_owned(), AtomState::from_element(*id, symbol, *pos));
        }
        let mut kf = Keyframe::new(timestamp, map, bonds.to_vec());
        kf.recount_bonds();
        kf
    }

    #[test]
    fn test_lerp_position() {
        let ctx = InterpolationContext::simple(0.5, 0.5);
        let result = lerp_position(&ctx, Vec3::ZERO, Vec3::new(10.0, 20.0, 30.0));
        assert!((result - Vec3::new(5.0, 10.0, 15.0)).length() < 0.001);
    }

    #[test]
    fn test_lerp_f32_uses_eased_value() {
        let ctx = InterpolationContext::simple(0.5, 0.25);
        assert!((lerp_f32(&ctx, 0.0, 100.0) - 25.0).abs() < 0.001);
        assert_eq!(ctx.raw_t, 0.5);
    }

    #[test]
    fn midpoint_between_keyframes() {
        let a = keyframe(0, &[("c", "C", Vec3::ZERO)], &[]);
        let b = keyframe(1000, &[("c", "C", Vec3::new(10.0, 0.0, 0.0))], &[]);
        let frame = interpolate_keyframes(&a, &b, &InterpolationContext::linear(0.5), BondFade::Hold);
        assert_eq!(frame.atoms["c"].position, Vec3::new(5.0, 0.0, 0.0));

        let start = interpolate_keyframes(&a, &b, &InterpolationContext::linear(0.0), BondFade::Hold);
        assert_eq!(start.atoms["c"].position, Vec3::ZERO);

        let near_end = interpolate_keyframes(&a, &b, &InterpolationContext::linear(0.999), BondFade::Hold);
        assert!((near_end.atoms["c"].position.x - 10.0).abs() < 0.02);
    }

    #[test]
    fn atoms_missing_from_either_side_are_dropped() {
        let a = keyframe(0, &[("c", "C", Vec3::ZERO), ("gone", "O", Vec3::ONE)], &[]);
        let b = keyframe(1000, &[("c", "C", Vec3::ONE), ("new", "N", Vec3::ONE)], &[]);
        let frame = interpolate_keyframes(&a, &b, &InterpolationContext::linear(0.3), BondFade::Hold);
        assert_eq!(frame.atoms.len(), 1);
        assert!(frame.atoms.contains_key("c"));
    }

    #[test]
    fn charge_and_bond_count_interpolate() {
        let mut a = keyframe(0, &[("na", "Na", Vec3::ZERO), ("cl", "Cl", Vec3::X)], &[]);
        let b = keyframe(
            1000,
            &[("na", "Na", Vec3::ZERO), ("cl", "Cl", Vec3::X)],
            &[BondState::new("b", "na", "cl", BondType::Ionic)],
        );
        a.atoms.get_mut("na").unwrap().set_charge(Some(1.0));
        let early = interpolate_keyframes(&a, &b, &InterpolationContext::linear(0.25), BondFade::Hold);
        assert_eq!(early.atoms["na"].charge, Some(0.75));
        assert_eq!(early.atoms["na"].current_bonds, 0);
        assert_eq!(early.atoms["cl"].charge, None);
        let late = interpolate_keyframes(&a, &b, &InterpolationContext::linear(0.75), BondFade::Hold);
        assert_eq!(late.atoms["na"].current_bonds, 1);
    }

    #[test]
    fn bond_strength_and_fade() {
        let mut strong = BondState::new("b1", "o", "h", BondType::Covalent);
        strong.strength = 0.5;
        let kept_a = BondState::new("b2", "o", "h2", BondType::Covalent);
        let atoms = [("o", "O", Vec3::ZERO), ("h", "H", Vec3::X), ("h2", "H", Vec3::Y)];
        let a = keyframe(0, &atoms, &[strong.clone(), kept_a]);
        let mut kept_b = BondState::new("b2", "o", "h2", BondType::Covalent);
        kept_b.strength = 0.0;
        let late_only = BondState::new("b3", "h", "h2", BondType::Covalent);
        let b = keyframe(1000, &atoms, &[kept_b, late_only]);

        let ctx = InterpolationContext::linear(0.5);
        let held = interpolate_keyframes(&a, &b, &ctx, BondFade::Hold);
        assert_eq!(held.bonds.len(), 2);
        assert_eq!(held.bonds[0].strength, 0.5);
        assert_eq!(held.bonds[1].strength, 0.5);

        let faded = interpolate_keyframes(&a, &b, &ctx, BondFade::FadeOut);
        assert_eq!(faded.bonds[0].strength, 0.25);
        assert!(faded.bonds.iter().all(|b| b.id != "b3"));
    }
}
