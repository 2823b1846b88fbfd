//! Plain data describing atoms, bonds, keyframes and whole documents.

mod atom;
mod bond;
mod document;
pub mod element;
mod keyframe;
pub mod molecule;

pub use atom::AtomState;
pub use bond::{BondState, BondType};
pub use document::{ChemxDocument, Metadata, FORMAT_VERSION};
pub use element::Element;
pub use keyframe::{AtomMap, Keyframe};
pub use molecule::MoleculeTemplate;
