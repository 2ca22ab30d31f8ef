use std::fs;
use std::io;
use std::path::Path;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionReport {
    pub deleted: Vec<String>,
    /// Already gone when we got to them.
    pub missing: Vec<String>,
    pub failed: Vec<(String, String)>,
}

/// Delete `filenames` from `dir` one at a time. No failure stops the loop.
pub fn delete_files(dir: &Path, filenames: &[String]) -> DeletionReport {
    let mut report = DeletionReport::default();

    for filename in filenames {
        let path = dir.join(filename);
        match fs::remove_file(&path) {
            Ok(()) => {
                info!("Deleted {}", filename);
                report.deleted.push(filename.clone());
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                warn!("File not found: {}. Was it deleted by someone else?", filename);
                report.missing.push(filename.clone());
            }
            Err(err) => {
                error!("Error deleting {}: {}", path.display(), err);
                report.failed.push((filename.clone(), err.to_string()));
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_does_not_stop_deletion() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("one.mp3"), "1").unwrap();
        fs::write(tmp.path().join("three.mp3"), "3").unwrap();

        let names: Vec<String> = ["one.mp3", "two.mp3", "three.mp3"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let report = delete_files(tmp.path(), &names);

        assert_eq!(report.deleted, vec!["one.mp3", "three.mp3"]);
        assert_eq!(report.missing, vec!["two.mp3"]);
        assert!(report.failed.is_empty());
        assert!(!tmp.path().join("one.mp3").exists());
        assert!(!tmp.path().join("three.mp3").exists());
    }
}
