use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Categorical nature of a bond. Affects rendering only.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum BondType {
    /// Electrostatic attraction between ions.
    Ionic,
    /// Delocalized metallic bonding.
    Metallic,
    /// Shared electron pair.
    #[default]
    Covalent,
    /// Hydrogen bond.
    Hydrogen,
    /// Pi bond.
    Pi,
}

impl BondType {
    /// All bond types, in palette order.
    pub const ALL: [BondType; 5] = [
        BondType::Ionic,
        BondType::Metallic,
        BondType::Covalent,
        BondType::Hydrogen,
        BondType::Pi,
    ];

    /// Lower-case name used by the file format.
    pub fn as_str(self) -> &'static str {
        match self {
            BondType::Ionic => "ionic",
            BondType::Metallic => "metallic",
            BondType::Covalent => "covalent",
            BondType::Hydrogen => "hydrogen",
            BondType::Pi => "pi",
        }
    }

    /// Parse a bond type name, ignoring ASCII case.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for BondType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One bond at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct BondState {
    /// Key unique within a keyframe.
    pub id: String,
    /// The two bonded atom keys. Order carries no meaning.
    pub atom_ids: [String; 2],
    /// Bond order (1, 2 or 3).
    pub order: u8,
    /// Continuous, animatable strength.
    pub strength: f32,
    /// Bond category.
    pub bond_type: BondType,
}

impl BondState {
    /// Single bond of full strength between `a` and `b`.
    pub fn new(
        id: impl Into<String>,
        a: impl Into<String>,
        b: impl Into<String>,
        bond_type: BondType,
    ) -> Self {
        Self {
            id: id.into(),
            atom_ids: [a.into(), b.into()],
            order: 1,
            strength: 1.0,
            bond_type,
        }
    }

    /// Whether this bond joins `a` and `b`, in either order.
    pub fn connects(&self, a: &str, b: &str) -> bool {
        let [x, y] = &self.atom_ids;
        (x == a && y == b) || (x == b && y == a)
    }

    /// Whether `atom_id` is one of the endpoints.
    pub fn references(&self, atom_id: &str) -> bool {
        self.atom_ids.iter().any(|id| id == atom_id)
    }

    /// Endpoints as an order-independent key.
    pub fn pair_key(&self) -> (&str, &str) {
        let [x, y] = &self.atom_ids;
        if x <= y {
            (x.as_str(), y.as_str())
        } else {
            (y.as_str(), x.as_str())
        }
    }
}
