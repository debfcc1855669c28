use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{Context, Result};

/// A saved export surfaced in the exports modal.
#[derive(Clone, Debug)]
pub struct FileEntry {
    pub name: String,
    pub modified: SystemTime,
    pub size: u64,
}

pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }
    Ok(())
}

/// CSV files in `dir`, newest first. A missing directory yields an empty list.
pub fn list_csv_files(dir: impl AsRef<Path>) -> Vec<FileEntry> {
    let Ok(read_dir) = fs::read_dir(dir.as_ref()) else {
        return Vec::new();
    };

    let mut entries: Vec<FileEntry> = read_dir
        .flatten()
        .filter_map(|entry| {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("csv") {
                return None;
            }
            let metadata = entry.metadata().ok()?;
            if !metadata.is_file() {
                return None;
            }
            let name = path.file_name()?.to_str()?.to_string();
            Some(FileEntry {
                name,
                modified: metadata.modified().unwrap_or(UNIX_EPOCH),
                size: metadata.len(),
            })
        })
        .collect();

    entries.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| a.name.cmp(&b.name)));
    entries
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn lists_only_csv_files() {
        let tmp = TempDir::new().expect("temp dir");
        let dir = tmp.path().join("exports");
        ensure_dir(&dir).expect("create dir");
        fs::write(dir.join("a.csv"), "id\n1\n").expect("write");
        fs::write(dir.join("notes.txt"), "ignore").expect("write");
        fs::create_dir_all(dir.join("nested.csv")).expect("mkdir");

        let entries = list_csv_files(&dir);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "a.csv");
        assert_eq!(entries[0].size, 5);
    }

    #[test]
    fn missing_directory_is_empty() {
        let tmp = TempDir::new().expect("temp dir");
        assert!(list_csv_files(tmp.path().join("missing")).is_empty());
    }
}
