//! Referential-integrity checks over a keyframe set.
//!
//! Unlike parsing, validation never stops at the first problem: the report
//! lists every violation so a user can fix them all before exporting again.

use std::fmt;

use rustc_hash::FxHashSet;

use crate::model::Keyframe;

/// What is wrong with one atom or bond.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// Atom with an empty id.
    MissingAtomId,
    /// Atom whose map key differs from its own id.
    AtomKeyMismatch {
        /// Key the atom is stored under.
        key: String,
    },
    /// Atom with an empty element symbol.
    MissingSymbol,
    /// Atom whose position has a NaN or infinite component.
    InvalidPosition,
    /// Bond with an empty id.
    MissingBondId,
    /// Bond endpoint that is not an atom of the same keyframe.
    DanglingReference {
        /// The unresolved atom id.
        atom_id: String,
    },
    /// Bond whose two endpoints are the same atom.
    SelfBond,
    /// Second bond over an already bonded atom pair.
    DuplicatePair {
        /// Id of the earlier bond over the same pair.
        first: String,
    },
}

/// One violation, located by keyframe index and entity id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Index of the offending keyframe.
    pub keyframe: usize,
    /// Id of the offending atom or bond (may be empty).
    pub entity_id: String,
    /// The violation.
    pub kind: IssueKind,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (kf, id) = (self.keyframe, &self.entity_id);
        match &self.kind {
            IssueKind::MissingAtomId => {
                write!(f, "keyframe {kf}: atom has no id")
            }
            IssueKind::AtomKeyMismatch { key } => {
                write!(f, "keyframe {kf}: atom `{id}` stored under key `{key}`")
            }
            IssueKind::MissingSymbol => {
                write!(f, "keyframe {kf}: atom `{id}` has no element symbol")
            }
            IssueKind::InvalidPosition => {
                write!(
                    f,
                    "keyframe {kf}: atom `{id}` has a non-finite position"
                )
            }
            IssueKind::MissingBondId => {
                write!(f, "keyframe {kf}: bond has no id")
            }
            IssueKind::DanglingReference { atom_id } => write!(
                f,
                "keyframe {kf}: bond `{id}` references missing atom `{atom_id}`"
            ),
            IssueKind::SelfBond => {
                write!(f, "keyframe {kf}: bond `{id}` joins an atom to itself")
            }
            IssueKind::DuplicatePair { first } => write!(
                f,
                "keyframe {kf}: bond `{id}` duplicates bond `{first}`"
            ),
        }
    }
}

/// Aggregate result of validating a keyframe set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Whether no violation was found.
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Every violation, in keyframe then entity order.
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    fn push(&mut self, keyframe: usize, entity_id: &str, kind: IssueKind) {
        self.issues.push(ValidationIssue {
            keyframe,
            entity_id: entity_id.to_owned(),
            kind,
        });
    }
}

/// Validate every keyframe, collecting all violations.
#[must_use]
pub fn validate_keyframes(keyframes: &[Keyframe]) -> ValidationReport {
    let mut report = ValidationReport::default();
    for (index, keyframe) in keyframes.iter().enumerate() {
        validate_atoms(index, keyframe, &mut report);
        validate_bonds(index, keyframe, &mut report);
    }
    report
}

fn validate_atoms(
    index: usize,
    keyframe: &Keyframe,
    report: &mut ValidationReport,
) {
    for (key, atom) in &keyframe.atoms {
        if atom.id.is_empty() {
            report.push(index, &atom.id, IssueKind::MissingAtomId);
        } else if *key != atom.id {
            let mismatch = IssueKind::AtomKeyMismatch { key: key.clone() };
            report.push(index, &atom.id, mismatch);
        }
        if atom.symbol.trim().is_empty() {
            report.push(index, &atom.id, IssueKind::MissingSymbol);
        }
        if !atom.position.is_finite() {
            report.push(index, &atom.id, IssueKind::InvalidPosition);
        }
    }
}

fn validate_bonds(
    index: usize,
    keyframe: &Keyframe,
    report: &mut ValidationReport,
) {
    let mut seen_pairs: FxHashSet<(&str, &str)> = FxHashSet::default();
    for bond in &keyframe.bonds {
        if bond.id.is_empty() {
            report.push(index, &bond.id, IssueKind::MissingBondId);
        }
        let mut resolved = true;
        for atom_id in &bond.atom_ids {
            if !keyframe.atoms.contains_key(atom_id) {
                resolved = false;
                report.push(
                    index,
                    &bond.id,
                    IssueKind::DanglingReference {
                        atom_id: atom_id.clone(),
                    },
                );
            }
        }
        if bond.atom_ids[0] == bond.atom_ids[1] {
            report.push(index, &bond.id, IssueKind::SelfBond);
            continue;
        }
        if resolved && !seen_pairs.insert(bond.pair_key()) {
            let first = keyframe
                .bonds
                .iter()
                .find(|b| b.pair_key() == bond.pair_key())
                .map(|b| b.id.clone())
                .unwrap_or_default();
            report.push(index, &bond.id, IssueKind::DuplicatePair { first });
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::model::{AtomMap, AtomState, BondState, BondType};

    fn atoms(ids: &[&str]) -> AtomMap {
        ids.iter()
            .map(|id| ((*id).to_owned(), AtomState::from_element(*id, "C", Vec3::ZERO)))
            .collect()
    }

    #[test]
    fn clean_keyframes_pass() {
        let kf = Keyframe::new(
            0,
            atoms(&["a", "b"]),
            vec![BondState::new("ab", "a", "b", BondType::Covalent)],
        );
        let report = validate_keyframes(&[kf.clone(), kf]);
        assert!(report.is_valid());
    }

    #[test]
    fn reports_every_violation_across_keyframes() {
        let mut first = atoms(&["a", "b"]);
        if let Some(b) = first.get_mut("b") {
            b.symbol.clear();
        }
        let kf0 = Keyframe::new(
            0,
            first,
            vec![
                BondState::new("ab", "a", "b", BondType::Covalent),
                BondState::new("ba", "b", "a", BondType::Covalent),
                BondState::new("ax", "a", "x", BondType::Covalent),
            ],
        );
        let mut second = atoms(&["a"]);
        if let Some(a) = second.get_mut("a") {
            a.position = Vec3::new(f32::NAN, 0.0, 0.0);
        }
        let kf1 = Keyframe::new(
            1,
            second,
            vec![
                BondState::new("aa", "a", "a", BondType::Covalent),
                BondState::new("", "y", "z", BondType::Covalent),
            ],
        );

        let report = validate_keyframes(&[kf0, kf1]);
        assert!(!report.is_valid());
        let summary: Vec<(usize, &str, &IssueKind)> = report
            .issues()
            .iter()
            .map(|i| (i.keyframe, i.entity_id.as_str(), &i.kind))
            .collect();
        assert_eq!(summary.len(), 8);
        assert_eq!(summary[0], (0, "b", &IssueKind::MissingSymbol));
        assert_eq!(
            summary[1],
            (0, "ba", &IssueKind::DuplicatePair { first: "ab".into() })
        );
        assert_eq!(
            summary[2],
            (0, "ax", &IssueKind::DanglingReference { atom_id: "x".into() })
        );
        assert_eq!(summary[3], (1, "a", &IssueKind::InvalidPosition));
        assert_eq!(summary[4], (1, "aa", &IssueKind::SelfBond));
        assert_eq!(summary[5], (1, "", &IssueKind::MissingBondId));
        assert_eq!(summary[6].2, &IssueKind::DanglingReference { atom_id: "y".into() });
        assert_eq!(summary[7].2, &IssueKind::DanglingReference { atom_id: "z".into() });
    }

    #[test]
    fn key_mismatch_and_empty_id() {
        let mut map = atoms(&["a"]);
        let _ = map.insert("k".into(), AtomState::from_element("other", "H", Vec3::ZERO));
        let _ = map.insert("".into(), AtomState::from_element("", "H", Vec3::ZERO));
        let report = validate_keyframes(&[Keyframe::new(0, map, Vec::new())]);
        let kinds: Vec<&IssueKind> = report.issues().iter().map(|i| &i.kind).collect();
        assert_eq!(
            kinds,
            [
                &IssueKind::MissingAtomId,
                &IssueKind::AtomKeyMismatch { key: "k".into() }
            ]
        );
        assert!(report.issues()[1].to_string().contains("`other`"));
    }
}
