use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::PathBuf;

/// Writes export archives under a local output directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    output_dir: PathBuf,
}

impl LocalStorage {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

impl Storage for LocalStorage {
    /// The bytes land in a `.part` sibling first and are renamed into place, so a
    /// failed write never leaves a truncated archive under the final name.
    async fn write_file(&self, name: &str, data: &[u8]) -> Result<()> {
        let target = self.output_dir.join(name);
        if let Some(dir) = target.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }

        let mut staging = target.clone().into_os_string();
        staging.push(".part");
        tokio::fs::write(&staging, data).await?;
        tokio::fs::rename(&staging, &target).await?;

        tracing::debug!("Wrote {} bytes to {}", data.len(), target.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_missing_directories() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().join("nested"));

        storage.write_file("exports/a.zip", b"abc").await.unwrap();

        let written = std::fs::read(temp_dir.path().join("nested/exports/a.zip")).unwrap();
        assert_eq!(written, b"abc");
        assert!(!temp_dir.path().join("nested/exports/a.zip.part").exists());
    }

    #[tokio::test]
    async fn test_write_replaces_previous_archive() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        storage.write_file("covid_export.zip", b"old contents").await.unwrap();
        storage.write_file("covid_export.zip", b"new").await.unwrap();

        let written = std::fs::read(temp_dir.path().join("covid_export.zip")).unwrap();
        assert_eq!(written, b"new");
    }

    #[tokio::test]
    async fn test_write_into_a_file_path_fails() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let storage = LocalStorage::new(blocker);

        assert!(storage.write_file("covid_export.zip", b"abc").await.is_err());
    }
}
