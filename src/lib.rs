// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Keyframe authoring, exchange and playback for chemical-reaction
//! animations.
//!
//! A reaction is authored as a short sequence of keyframes, each a complete
//! snapshot of atom positions, charges and bonds. The crate covers the three
//! pieces that have to agree on that data:
//!
//! - [`codec`] - the `.chemx` JSON exchange format (`parse`, `serialize`,
//!   fixed-interval `export`)
//! - [`editor::EditorController`] - the interactive edit state machine with
//!   undo, backed by a [`keyframes::KeyframeStore`]
//! - [`animation::AnimationEngine`] - the looping playback clock that
//!   interpolates between bracketing keyframes
//!
//! Supporting modules: [`model`] (atoms, bonds, element table, molecule
//! templates), [`options`] (TOML configuration), [`error`] and [`util`].
//!
//! Rendering and input are left to the host: it feeds pointer events into
//! the editor as [`editor::EditorCommand`]s and draws the
//! [`animation::FrameState`]s the engine emits.

pub mod animation;
pub mod codec;
pub mod editor;
pub mod error;
pub mod keyframes;
pub mod model;
pub mod options;
pub mod util;

pub use error::{ChemxError, ConstraintViolation};
pub use model::{AtomState, BondState, BondType, ChemxDocument, Keyframe};
