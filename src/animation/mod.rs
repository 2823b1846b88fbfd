//! Keyframe playback: clock, bracketing and interpolation.

mod easing;
mod engine;
mod interpolation;

pub use easing::EasingFunction;
pub use engine::{AnimationEngine, FrameCallback};
pub use interpolation::{
    interpolate_keyframes, lerp_f32, lerp_position, FrameState,
    InterpolationContext,
};
