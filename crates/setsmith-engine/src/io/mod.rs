use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::models::set::Set;
use crate::parsing::ParseError;

/// Byte order mark the desktop editor writes at the front of its setfiles.
const BOM: &str = "\u{feff}";

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Package archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("No set member in package: {}", .0.display())]
    MissingSetMember(PathBuf),
}

/// Reads setfile text from disk, dropping any leading byte order mark.
pub fn read_setfile_text(path: &Path) -> Result<String, LoadError> {
    let text = fs::read_to_string(path)?;
    match text.strip_prefix(BOM) {
        Some(stripped) => Ok(stripped.to_string()),
        None => Ok(text),
    }
}

/// Writes setfile text to disk with a leading byte order mark.
pub fn write_setfile_text(path: &Path, text: &str) -> Result<(), LoadError> {
    fs::write(path, format!("{BOM}{text}"))?;
    Ok(())
}

/// Loads and parses a plain setfile.
pub fn load_setfile(path: &Path) -> Result<Set, LoadError> {
    debug!("loading setfile from {path:?}");
    let text = read_setfile_text(path)?;
    Ok(Set::from_text(&text)?)
}

/// Serializes a set to a plain setfile.
pub fn save_setfile(set: &Set, path: &Path) -> Result<(), LoadError> {
    write_setfile_text(path, &set.to_text())
}

/// Loads a zipped package by extracting it next to itself and parsing the
/// `set` member.
///
/// The extraction directory is the package path minus its extension and may
/// already exist from an earlier run. With `delete_temporaries` the
/// directory is removed again after a successful parse; on failure it is
/// left in place for inspection.
pub fn load_package(path: &Path, delete_temporaries: bool) -> Result<Set, LoadError> {
    let file = fs::File::open(path)?;
    let mut archive = zip::ZipArchive::new(file)?;
    if !archive.file_names().any(|name| name == "set") {
        return Err(LoadError::MissingSetMember(path.to_path_buf()));
    }
    let work_dir = path.with_extension("");
    info!("extracting package {path:?} to {work_dir:?}");
    archive.extract(&work_dir)?;
    let set = load_setfile(&work_dir.join("set"))?;
    if delete_temporaries {
        fs::remove_dir_all(&work_dir)?;
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{THISTLEDOWN, create_package, create_setfile_dir};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_load_setfile_parses_cards() {
        let (_dir, path) = create_setfile_dir(THISTLEDOWN);
        let set = load_setfile(&path).unwrap();
        assert_eq!(set.cards.len(), 7);
    }

    #[test]
    fn test_read_setfile_text_strips_byte_order_mark() {
        let (_dir, path) = create_setfile_dir("\u{feff}game: Thistledown\n");
        let text = read_setfile_text(&path).unwrap();
        assert_eq!(text, "game: Thistledown\n");
    }

    #[test]
    fn test_write_setfile_text_prepends_byte_order_mark() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("set");
        write_setfile_text(&path, "game: Thistledown\n").unwrap();
        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..3], [0xEF, 0xBB, 0xBF]);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("set");
        let set = Set::from_text(THISTLEDOWN).unwrap();
        save_setfile(&set, &path).unwrap();
        let reloaded = load_setfile(&path).unwrap();
        assert_eq!(reloaded.to_text(), THISTLEDOWN);
    }

    #[test]
    fn test_bom_file_bytes_survive_save() {
        let dir = TempDir::new().unwrap();
        let original = dir.path().join("set");
        fs::write(&original, format!("\u{feff}{THISTLEDOWN}")).unwrap();
        let set = load_setfile(&original).unwrap();
        let copy = dir.path().join("set-copy");
        save_setfile(&set, &copy).unwrap();
        assert_eq!(fs::read(&copy).unwrap(), fs::read(&original).unwrap());
    }

    #[test]
    fn test_load_package_extracts_and_cleans_up() {
        let dir = TempDir::new().unwrap();
        let path = create_package(dir.path(), "flock.mse-set", "set", THISTLEDOWN);
        let set = load_package(&path, true).unwrap();
        assert_eq!(set.cards.len(), 7);
        // Same set as loading the bare file
        assert_eq!(set.to_text(), THISTLEDOWN);
        assert!(!dir.path().join("flock").exists());
    }

    #[test]
    fn test_load_package_can_keep_temporaries() {
        let dir = TempDir::new().unwrap();
        let path = create_package(dir.path(), "flock.mse-set", "set", THISTLEDOWN);
        load_package(&path, false).unwrap();
        assert!(dir.path().join("flock").join("set").exists());
    }

    #[test]
    fn test_load_package_rejects_missing_set_member() {
        let dir = TempDir::new().unwrap();
        let path = create_package(dir.path(), "bad.mse-set", "readme", "not a setfile");
        let err = load_package(&path, true).unwrap_err();
        assert!(matches!(err, LoadError::MissingSetMember(_)));
        assert!(!dir.path().join("bad").exists());
    }
}
