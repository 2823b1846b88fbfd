//! Fixed-interval export of authored keyframes.
//!
//! Authoring uses wall-clock timestamps and whatever ids the editor
//! generated. Export rewrites both into the compact exchange convention:
//! atoms become `<symbol><n>`, bonds `bond_NNN`, and keyframes are spaced
//! `keyframe_interval_ms` apart starting at 0.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::ChemxError;
use crate::keyframes::validate_keyframes;
use crate::model::{AtomMap, ChemxDocument, Keyframe, Metadata};
use crate::options::ExportOptions;

/// Renames ids consistently across every keyframe of one export.
///
/// The same internal id always maps to the same exported id, so atoms and
/// bonds keep their identity between keyframes and still interpolate after
/// a round trip through a file.
#[derive(Debug, Default)]
struct IdRenamer {
    atoms: FxHashMap<String, String>,
    per_symbol: FxHashMap<String, usize>,
    taken: FxHashSet<String>,
    bonds: FxHashMap<String, String>,
}

impl IdRenamer {
    fn atom(&mut self, id: &str, symbol: &str) -> String {
        if let Some(new_id) = self.atoms.get(id) {
            return new_id.clone();
        }
        // `H1` + 1 and `H` + 11 both spell `H11`; skip numbers already used.
        let counter = self.per_symbol.entry(symbol.to_owned()).or_insert(0);
        let new_id = loop {
            *counter += 1;
            let candidate = format!("{symbol}{counter}");
            if !self.taken.contains(&candidate) {
                break candidate;
            }
        };
        let _ = self.taken.insert(new_id.clone());
        let _ = self.atoms.insert(id.to_owned(), new_id.clone());
        new_id
    }

    fn mapped_atom(&self, id: &str) -> String {
        self.atoms.get(id).cloned().unwrap_or_else(|| id.to_owned())
    }

    fn bond(&mut self, id: &str) -> String {
        if let Some(new_id) = self.bonds.get(id) {
            return new_id.clone();
        }
        let new_id = format!("bond_{:03}", self.bonds.len() + 1);
        let _ = self.bonds.insert(id.to_owned(), new_id.clone());
        new_id
    }
}

/// Build an exchange document from authored keyframes.
///
/// Every keyframe is validated first; on failure the full report is
/// returned and nothing is exported.
pub fn export(
    keyframes: &[Keyframe],
    metadata: Metadata,
    options: &ExportOptions,
) -> Result<ChemxDocument, ChemxError> {
    if keyframes.is_empty() {
        return Err(ChemxError::Format("no keyframes to export".into()));
    }
    let report = validate_keyframes(keyframes);
    if !report.is_valid() {
        log::warn!(
            "export blocked by {} validation issue(s)",
            report.issues().len()
        );
        return Err(ChemxError::Validation(report));
    }

    let step = options.keyframe_interval_ms;
    let mut renamer = IdRenamer::default();
    let exported: Vec<Keyframe> = keyframes
        .iter()
        .enumerate()
        .map(|(index, kf)| {
            let mut atoms = AtomMap::new();
            for atom in kf.atoms.values() {
                let mut atom = atom.clone();
                atom.id = renamer.atom(&atom.id, &atom.symbol);
                let _ = atoms.insert(atom.id.clone(), atom);
            }
            let bonds = kf
                .bonds
                .iter()
                .map(|bond| {
                    let mut bond = bond.clone();
                    bond.id = renamer.bond(&bond.id);
                    bond.atom_ids = [
                        renamer.mapped_atom(&bond.atom_ids[0]),
                        renamer.mapped_atom(&bond.atom_ids[1]),
                    ];
                    bond
                })
                .collect();
            Keyframe::new(index as u64 * step, atoms, bonds)
        })
        .collect();

    let duration = (exported.len() as u64 - 1) * step;
    log::info!(
        "exported {} keyframe(s), duration {duration} ms",
        exported.len()
    );
    Ok(ChemxDocument {
        version: options.format_version.clone(),
        metadata,
        duration,
        keyframes: exported,
    })
}
