use crate::error::Error;
use faccess::{AccessMode, PathExt};
use glob::Pattern;
use std::fs;
use std::io;
use std::path::Path;
use tracing::warn;
use walkdir::WalkDir;

/// Filenames directly inside `dir` matching `*.<extension>`, sorted by name.
/// Subdirectories are not descended into.
pub fn scan_local_files(dir: &Path, extension: &str) -> Result<Vec<String>, Error> {
    let pattern = Pattern::new(&format!("*.{}", Pattern::escape(extension)))
        .map_err(|e| Error::Other(format!("Invalid extension '{}': {}", extension, e)))?;

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        match entry.file_name().to_str() {
            Some(name) if pattern.matches(name) => files.push(name.to_string()),
            Some(_) => {}
            None => warn!(
                "Skipping file with non UTF-8 name: {}",
                entry.path().display()
            ),
        }
    }

    Ok(files)
}

/// Fail before any work starts when the current user can't create files in
/// `dir`. Asks the OS (`access(2)` on Unix) rather than reading mode bits.
pub fn ensure_writable(dir: &Path) -> Result<(), Error> {
    let is_dir = fs::metadata(dir).map(|m| m.is_dir()).unwrap_or(false);
    if is_dir && dir.access(AccessMode::WRITE).is_ok() {
        Ok(())
    } else {
        Err(Error::DestinationNotWritable(dir.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_scan_filters_and_sorts() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::write(root.join("b song.mp3"), "b").unwrap();
        fs::write(root.join("A song.mp3"), "a").unwrap();
        fs::write(root.join("cover.jpg"), "jpg").unwrap();
        fs::write(root.join("partial.mp3.part"), "x").unwrap();
        fs::create_dir(root.join("nested.mp3")).unwrap();
        fs::write(root.join("nested.mp3").join("deep.mp3"), "d").unwrap();

        let files = scan_local_files(root, "mp3").unwrap();
        assert_eq!(files, vec!["A song.mp3", "b song.mp3"]);
    }

    #[test]
    fn test_scan_missing_dir_is_error() {
        let tmp = tempdir().unwrap();
        assert!(scan_local_files(&tmp.path().join("missing"), "mp3").is_err());
    }

    #[test]
    fn test_ensure_writable() {
        let tmp = tempdir().unwrap();
        assert!(ensure_writable(tmp.path()).is_ok());

        let missing = tmp.path().join("missing");
        assert!(matches!(
            ensure_writable(&missing),
            Err(Error::DestinationNotWritable(p)) if p == missing
        ));

        let file = tmp.path().join("file.mp3");
        fs::write(&file, "x").unwrap();
        assert!(ensure_writable(&file).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_ensure_writable_follows_real_access() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempdir().unwrap();
        let locked = tmp.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

        // root can still write here, anyone else can't
        let can_create = fs::write(locked.join("canary.mp3"), "x").is_ok();
        let _ = fs::remove_file(locked.join("canary.mp3"));
        let checked = ensure_writable(&locked);

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        assert_eq!(checked.is_ok(), can_create, "{:?}", checked);
    }
}
