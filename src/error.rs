//! Crate-level error types.

use std::fmt;

use crate::keyframes::ValidationReport;

/// An edit that would break a keyframe or live-buffer limit.
///
/// Interactive editing recovers from these locally (the buffer is left
/// untouched); they only surface as hard errors through the keyframe store
/// and import APIs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintViolation {
    /// A keyframe save with no atoms and no bonds.
    EmptyKeyframe,
    /// The store already holds its maximum number of keyframes.
    KeyframeLimit {
        /// Maximum number of keyframes a store may hold.
        max: usize,
    },
    /// A keyframe index outside `0..=len`.
    KeyframeOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of stored keyframes.
        len: usize,
    },
    /// A bond from an atom to itself.
    SelfBond {
        /// The atom clicked twice.
        atom_id: String,
    },
    /// A second bond between an already bonded atom pair.
    DuplicateBond {
        /// First endpoint.
        a: String,
        /// Second endpoint.
        b: String,
    },
    /// An endpoint already carries its maximum bond count.
    ValenceExceeded {
        /// The saturated atom.
        atom_id: String,
        /// Its maximum bond count.
        max_bonds: u8,
    },
    /// The referenced atom does not exist in the live buffer.
    UnknownAtom(String),
    /// The referenced bond does not exist in the live buffer.
    UnknownBond(String),
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyKeyframe => {
                write!(f, "keyframe has no atoms and no bonds")
            }
            Self::KeyframeLimit { max } => {
                write!(f, "keyframe limit reached ({max} keyframes)")
            }
            Self::KeyframeOutOfRange { index, len } => {
                write!(f, "keyframe index {index} out of range 0..={len}")
            }
            Self::SelfBond { atom_id } => {
                write!(f, "cannot bond atom {atom_id} to itself")
            }
            Self::DuplicateBond { a, b } => {
                write!(f, "atoms {a} and {b} are already bonded")
            }
            Self::ValenceExceeded { atom_id, max_bonds } => write!(
                f,
                "atom {atom_id} already has its maximum of {max_bonds} bonds"
            ),
            Self::UnknownAtom(id) => write!(f, "no atom with id {id}"),
            Self::UnknownBond(id) => write!(f, "no bond with id {id}"),
        }
    }
}

/// Errors produced by the chemx crate.
#[derive(Debug)]
pub enum ChemxError {
    /// Input is not parseable JSON.
    Syntax(String),
    /// Parseable, but not a well-formed Chemx document.
    Format(String),
    /// Structurally valid, but referentially broken keyframes.
    Validation(ValidationReport),
    /// An edit or store operation exceeded a limit.
    Constraint(ConstraintViolation),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for ChemxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax(msg) => write!(f, "syntax error: {msg}"),
            Self::Format(msg) => {
                write!(f, "invalid chemx format: {msg}")
            }
            Self::Validation(report) => write!(
                f,
                "validation failed with {} issue(s)",
                report.issues().len()
            ),
            Self::Constraint(v) => write!(f, "constraint violation: {v}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for ChemxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ChemxError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ConstraintViolation> for ChemxError {
    fn from(v: ConstraintViolation) -> Self {
        Self::Constraint(v)
    }
}

impl From<ValidationReport> for ChemxError {
    fn from(report: ValidationReport) -> Self {
        Self::Validation(report)
    }
}
