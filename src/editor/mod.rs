//! Interactive keyframe authoring.
//!
//! [`EditorController`] owns the live buffer (behind a [`History`] so every
//! edit is undoable) and the [`KeyframeStore`](crate::keyframes::KeyframeStore)
//! the buffer is saved into. Scene and toolbar input arrives as
//! [`EditorCommand`]s.

mod buffer;
mod command;
mod controller;
mod history;

pub use buffer::LiveBuffer;
pub use command::{EditMode, EditOutcome, EditorCommand};
pub use controller::EditorController;
pub use history::History;
