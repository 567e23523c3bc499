#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Writes a zip archive holding `files` (name, content) in the given order.
pub fn write_archive(files: &[(&str, &str)]) -> NamedTempFile {
    let mut tmp = NamedTempFile::new().expect("temp archive");
    {
        let mut writer = ZipWriter::new(tmp.as_file_mut());
        for (name, content) in files {
            let options =
                SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
            if name.ends_with('/') {
                writer.add_directory(*name, options).expect("add directory");
                continue;
            }
            writer.start_file(*name, options).expect("start file");
            writer.write_all(content.as_bytes()).expect("write file");
        }
        writer.finish().expect("finish archive");
    }
    tmp
}

pub const PAGE_A: &str = "---\ntype: page\nslug: a\ntitle: A\n---published\n# A\n\nBody of A.\n";
pub const NAV_NODE: &str = "---\ntype: nav\nslug: nav\ntitle: Navigation\n---published\n";
pub const NO_FRONT_MATTER: &str = "# Loose notes\n\nNo metadata here.\n";
