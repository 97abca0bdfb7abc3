// Rollcall - platform/fs.rs
//
// Filesystem helpers: atomic whole-file replacement and image file listing.

use crate::util::constants::IMAGE_EXTENSIONS;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Replace `path` with `bytes` atomically (write temp → rename).
///
/// Creates parent directories as needed. A crash between write and rename
/// loses the new content but never corrupts the previous file. Not safe
/// against concurrent writers: the last rename wins.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);

    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp);
        e
    })
}

/// True when the file name ends in .jpg, .jpeg or .png (any case).
pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Image files directly inside `dir` (no recursion), sorted by file name.
pub fn list_image_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.file_type().is_file() && has_image_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_creates_parents_and_replaces() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("log.json");

        write_atomic(&path, b"[]").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"[]");

        // A leftover temp file from an earlier crash must not get in the way.
        std::fs::write(dir.path().join("nested").join("log.json.tmp"), b"garbage").unwrap();
        write_atomic(&path, b"[1]").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"[1]");
        assert!(!dir.path().join("nested").join("log.json.tmp").exists());
    }

    #[test]
    fn test_image_extension_case_insensitive() {
        assert!(has_image_extension(Path::new("a.JPG")));
        assert!(has_image_extension(Path::new("b.jpeg")));
        assert!(has_image_extension(Path::new("c.Png")));
        assert!(!has_image_extension(Path::new("d.gif")));
        assert!(!has_image_extension(Path::new("png")));
    }

    #[test]
    fn test_list_image_files_is_flat_and_filtered() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("b.png"), b"x").unwrap();
        std::fs::write(dir.path().join("a.JPG"), b"x").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub").join("c.png"), b"x").unwrap();

        let names: Vec<String> = list_image_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.JPG", "b.png"]);
    }

    #[test]
    fn test_list_missing_dir_errors() {
        let dir = TempDir::new().unwrap();
        assert!(list_image_files(&dir.path().join("missing")).is_err());
    }
}
