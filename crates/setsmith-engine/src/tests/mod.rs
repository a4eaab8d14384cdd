use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// A small but complete setfile exercising every line shape the parser knows.
pub const THISTLEDOWN: &str = include_str!("../../tests/fixtures/thistledown.set");

/// Creates a temp dir holding one plain setfile named `set`.
pub fn create_setfile_dir(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("set");
    fs::write(&path, content).expect("Failed to write setfile");
    (dir, path)
}

/// Zips `content` as `member_name` inside a fresh archive at `dir/file_name`.
pub fn create_package(dir: &Path, file_name: &str, member_name: &str, content: &str) -> PathBuf {
    let path = dir.join(file_name);
    let file = File::create(&path).expect("Failed to create package file");
    let mut writer = ZipWriter::new(file);
    writer
        .start_file(member_name, SimpleFileOptions::default())
        .expect("Failed to start package member");
    writer
        .write_all(content.as_bytes())
        .expect("Failed to write package member");
    writer.finish().expect("Failed to finish package");
    path
}
