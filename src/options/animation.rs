use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::EasingFunction;

/// What happens to a bond that exists in one keyframe but not the next.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum BondFade {
    /// Keep the earlier keyframe's strength until the interval ends.
    #[default]
    Hold,
    /// Ramp strength linearly to zero across the interval.
    FadeOut,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Animation", inline)]
#[serde(default)]
/// Playback parameters for the animation engine.
pub struct AnimationOptions {
    /// Curve applied to the interpolation fraction between keyframes.
    #[schemars(title = "Easing")]
    pub easing: EasingFunction,
    /// Treatment of bonds that disappear between keyframes.
    #[schemars(title = "Bond Fade")]
    pub bond_fade: BondFade,
    /// Playback rate multiplier (1.0 = real time).
    #[schemars(
        title = "Speed",
        range(min = 0.1, max = 4.0),
        extend("step" = 0.1)
    )]
    pub playback_speed: f32,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            easing: EasingFunction::Linear,
            bond_fade: BondFade::Hold,
            playback_speed: 1.0,
        }
    }
}
