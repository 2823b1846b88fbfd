//! Centralized configuration with TOML preset support.
//!
//! Playback, editing and export settings plus persisted UI flags live in one
//! [`Options`] value. Options serialize to/from TOML; every section uses
//! `#[serde(default)]` so partial files work.

mod animation;
mod editor;
mod export;
mod ui;

use std::path::Path;

pub use animation::{AnimationOptions, BondFade};
pub use editor::EditorOptions;
pub use export::ExportOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use ui::UiOptions;

use crate::error::ChemxError;

/// Top-level options container.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Animation playback parameters.
    pub animation: AnimationOptions,
    /// Editor defaults and limits.
    pub editor: EditorOptions,
    /// Export conventions.
    pub export: ExportOptions,
    /// Persisted UI flags.
    #[schemars(skip)]
    pub ui: UiOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, ChemxError> {
        let content = std::fs::read_to_string(path).map_err(ChemxError::Io)?;
        toml::from_str(&content)
            .map_err(|e| ChemxError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), ChemxError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ChemxError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ChemxError::Io)?;
        }
        std::fs::write(path, content).map_err(ChemxError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::EasingFunction;
    use crate::model::BondType;

    #[test]
    fn default_round_trips_through_toml() {
        let mut opts = Options::default();
        opts.editor.working_plane_y = Some(0.0);
        let _ = opts.ui.dismiss("welcome");
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[animation]
bond_fade = "fade_out"
easing = "quadratic_out"

[editor]
default_bond_type = "ionic"
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.animation.bond_fade, BondFade::FadeOut);
        assert_eq!(opts.animation.easing, EasingFunction::QuadraticOut);
        assert_eq!(opts.animation.playback_speed, 1.0);
        assert_eq!(opts.editor.default_bond_type, BondType::Ionic);
        assert_eq!(opts.editor.default_element, "C");
        assert_eq!(opts.export.keyframe_interval_ms, 2000);
    }

    #[test]
    fn dismiss_flags() {
        let mut ui = UiOptions::default();
        assert!(ui.dismiss("bond-tutorial"));
        assert!(!ui.dismiss("bond-tutorial"));
        assert!(ui.is_dismissed("bond-tutorial"));
        assert!(!ui.is_dismissed("other"));
    }

    #[test]
    fn save_and_load() {
        let path = std::env::temp_dir()
            .join(format!("chemx-options-{}", std::process::id()))
            .join("preset.toml");
        let mut opts = Options::default();
        opts.export.keyframe_interval_ms = 500;
        opts.save(&path).unwrap();
        assert_eq!(Options::load(&path).unwrap(), opts);
        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("animation"));
        assert!(props.contains_key("editor"));
        assert!(props.contains_key("export"));
        assert!(!props.contains_key("ui"));

        let editor = &props["editor"]["properties"];
        assert!(editor.get("default_element").is_some());
        assert!(editor.get("history_limit").is_none());
    }
}
