use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::BondType;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Editor", inline)]
#[serde(default)]
/// Defaults and limits for interactive editing.
pub struct EditorOptions {
    /// Element placed by the add-atom tool until another is picked.
    #[schemars(title = "Default Element")]
    pub default_element: String,
    /// Bond type created by the add-bond tool until another is picked.
    #[schemars(title = "Default Bond Type")]
    pub default_bond_type: BondType,
    /// When set, placed atoms snap to this Y coordinate.
    #[schemars(title = "Working Plane Y")]
    pub working_plane_y: Option<f32>,
    /// Undo entries retained per keyframe (oldest dropped first).
    #[schemars(skip)]
    pub history_limit: usize,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            default_element: "C".into(),
            default_bond_type: BondType::Covalent,
            working_plane_y: None,
            history_limit: 100,
        }
    }
}
