//! The `.chemx` exchange format.
//!
//! A Chemx file is pretty-printed JSON holding a version string, metadata, a
//! total duration and an ordered keyframe array. [`parse`] and [`serialize`]
//! are pure and round-trip; [`export`] converts authored keyframes into the
//! fixed-interval exchange convention.

mod export;
mod reader;
mod writer;

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

pub use export::export;
pub use reader::{parse, read};
pub use writer::{serialize, write};

use crate::error::ChemxError;
use crate::model::ChemxDocument;

/// File extension for Chemx documents.
pub const EXTENSION: &str = "chemx";

/// Largest file [`read_file`] accepts.
pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Read and parse a Chemx file.
pub fn read_file(path: &Path) -> Result<ChemxDocument, ChemxError> {
    let file = File::open(path)?;
    let size = file.metadata()?.len();
    if size > MAX_FILE_BYTES {
        return Err(ChemxError::Format(format!(
            "{} is {size} bytes, limit is {MAX_FILE_BYTES}",
            path.display()
        )));
    }
    let doc = read(BufReader::new(file))?;
    log::info!(
        "loaded {} ({} keyframes, {} ms)",
        path.display(),
        doc.keyframes.len(),
        doc.duration
    );
    Ok(doc)
}

/// Serialize a document to a file, creating parent directories.
pub fn write_file(path: &Path, doc: &ChemxDocument) -> Result<(), ChemxError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    write(BufWriter::new(File::create(path)?), doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Keyframe, Metadata};

    #[test]
    fn file_round_trip() {
        let dir = std::env::temp_dir().join(format!(
            "chemx-codec-test-{}",
            std::process::id()
        ));
        let path = dir.join("nested").join("empty.chemx");
        let doc = ChemxDocument::new(
            Metadata {
                name: "blank".into(),
                ..Metadata::default()
            },
            0,
            vec![Keyframe::default()],
        );
        write_file(&path, &doc).unwrap();
        let back = read_file(&path).unwrap();
        assert_eq!(back, doc);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = Path::new("/definitely/not/here.chemx");
        assert!(matches!(read_file(path), Err(ChemxError::Io(_))));
    }
}
