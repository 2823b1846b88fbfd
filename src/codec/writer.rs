//! [`ChemxDocument`] -> pretty-printed Chemx text.

use std::io::Write;

use serde::Serialize;

use crate::error::ChemxError;
use crate::model::{AtomState, BondState, BondType, ChemxDocument, Keyframe};

#[derive(Serialize)]
struct DocumentRecord<'a> {
    version: &'a str,
    metadata: MetadataRecord<'a>,
    duration: u64,
    keyframes: Vec<KeyframeRecord<'a>>,
}

#[derive(Serialize)]
struct MetadataRecord<'a> {
    name: &'a str,
    description: &'a str,
    created: u64,
}

#[derive(Serialize)]
struct KeyframeRecord<'a> {
    timestamp: u64,
    atoms: Vec<AtomRecord<'a>>,
    bonds: Vec<BondRecord<'a>>,
}

#[derive(Serialize)]
struct PositionRecord {
    x: f32,
    y: f32,
    z: f32,
}

#[derive(Serialize)]
struct AtomRecord<'a> {
    id: &'a str,
    symbol: &'a str,
    position: PositionRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    charge: Option<f32>,
    electrons: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BondRecord<'a> {
    id: &'a str,
    atom_ids: [&'a str; 2],
    order: u8,
    strength: f32,
    bond_type: BondType,
}

impl<'a> From<&'a AtomState> for AtomRecord<'a> {
    fn from(atom: &'a AtomState) -> Self {
        Self {
            id: &atom.id,
            symbol: &atom.symbol,
            position: PositionRecord {
                x: atom.position.x,
                y: atom.position.y,
                z: atom.position.z,
            },
            charge: atom.charge,
            electrons: atom.electrons,
        }
    }
}

impl<'a> From<&'a BondState> for BondRecord<'a> {
    fn from(bond: &'a BondState) -> Self {
        let [a, b] = &bond.atom_ids;
        Self {
            id: &bond.id,
            atom_ids: [a, b],
            order: bond.order,
            strength: bond.strength,
            bond_type: bond.bond_type,
        }
    }
}

impl<'a> From<&'a Keyframe> for KeyframeRecord<'a> {
    fn from(kf: &'a Keyframe) -> Self {
        Self {
            timestamp: kf.timestamp,
            atoms: kf.atoms.values().map(AtomRecord::from).collect(),
            bonds: kf.bonds.iter().map(BondRecord::from).collect(),
        }
    }
}

impl<'a> From<&'a ChemxDocument> for DocumentRecord<'a> {
    fn from(doc: &'a ChemxDocument) -> Self {
        Self {
            version: &doc.version,
            metadata: MetadataRecord {
                name: &doc.metadata.name,
                description: &doc.metadata.description,
                created: doc.metadata.created,
            },
            duration: doc.duration,
            keyframes: doc.keyframes.iter().map(KeyframeRecord::from).collect(),
        }
    }
}

/// Serialize a document to pretty-printed JSON.
///
/// Atoms are written in id order and bonds in stored order, so the output is
/// deterministic for a given document. Bond types are always lower-case.
pub fn serialize(doc: &ChemxDocument) -> Result<String, ChemxError> {
    serde_json::to_string_pretty(&DocumentRecord::from(doc))
        .map_err(|e| ChemxError::Format(e.to_string()))
}

/// Serialize a document into a writer.
pub fn write<W: Write>(
    mut writer: W,
    doc: &ChemxDocument,
) -> Result<(), ChemxError> {
    let text = serialize(doc)?;
    writer.write_all(text.as_bytes())?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
