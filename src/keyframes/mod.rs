//! Keyframe authoring: the ordered store and its integrity checks.

mod store;
mod validation;

pub use store::{KeyframeStore, SwitchTarget, MAX_KEYFRAMES};
pub use validation::{
    validate_keyframes, IssueKind, ValidationIssue, ValidationReport,
};
