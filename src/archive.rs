//! Reading markdown entries out of the zipped documentation export.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use tracing::{debug, error, info};

use crate::error::ArchiveError;

/// File extension of the entries that are considered for import.
pub const MARKDOWN_EXTENSION: &str = ".md";

/// A single file taken from the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    /// Path of the entry inside the archive.
    pub name: String,
    pub content: Vec<u8>,
}

impl RawEntry {
    /// Entry content decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }
}

/// Opens the archive at `path` and returns its markdown entries in archive order.
pub fn read_markdown_entries<P: AsRef<Path>>(path: P) -> Result<Vec<RawEntry>, ArchiveError> {
    let path = path.as_ref();
    info!(archive = %path.display(), "Opening documentation archive");
    let file = File::open(path).map_err(|e| {
        error!(error = ?e, archive = %path.display(), "Failed to open archive");
        e
    })?;
    markdown_entries_from_reader(BufReader::new(file))
}

/// Same as [`read_markdown_entries`] over any seekable reader.
///
/// An entry that cannot be decompressed is logged and skipped; only a broken
/// central directory fails the whole read.
pub fn markdown_entries_from_reader<R: Read + Seek>(
    reader: R,
) -> Result<Vec<RawEntry>, ArchiveError> {
    let mut archive = zip::ZipArchive::new(reader).map_err(|e| {
        error!(error = ?e, "Failed to read zip central directory");
        e
    })?;

    let mut entries = Vec::new();
    for index in 0..archive.len() {
        let mut file = match archive.by_index(index) {
            Ok(file) => file,
            Err(e) => {
                error!(error = ?e, index, "Failed to open archive entry");
                continue;
            }
        };
        if file.is_dir() || !file.name().ends_with(MARKDOWN_EXTENSION) {
            continue;
        }
        let name = file.name().to_string();
        let mut content = Vec::with_capacity(file.size() as usize);
        if let Err(e) = file.read_to_end(&mut content) {
            error!(error = ?e, file = %name, "Failed to read archive entry");
            continue;
        }
        debug!(file = %name, size = content.len(), "Read markdown entry");
        entries.push(RawEntry { name, content });
    }

    info!(count = entries.len(), "Collected markdown entries from archive");
    Ok(entries)
}
