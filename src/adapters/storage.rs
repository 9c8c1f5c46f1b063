use crate::core::report::render_result;
use crate::domain::model::LookupResult;
use crate::domain::ports::ResultStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

pub const DEFAULT_RESULTS_FILE: &str = "phonenumber_results.txt";

/// Appends rendered records to a plain-text file, opening it for every write.
#[derive(Debug, Clone)]
pub struct FileResultStore {
    path: PathBuf,
}

impl FileResultStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ResultStore for FileResultStore {
    async fn append(&self, result: &LookupResult) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(render_result(result).as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn lookup(input: &str, region: &str) -> LookupResult {
        LookupResult {
            input: input.to_string(),
            number: phonenumber::parse(None, input).unwrap(),
            time_zones: vec!["Europe/London".to_string()],
            carrier: String::new(),
            region: region.to_string(),
        }
    }

    #[tokio::test]
    async fn test_append_keeps_previous_records() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("results.txt");
        let store = FileResultStore::new(&path);

        store.append(&lookup("+44 20 8765 4321", "London")).await.unwrap();
        store.append(&lookup("+44 161 496 0000", "Manchester")).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("Phone Number: ").count(), 2);
        assert_eq!(content.lines().count(), 10);
        assert!(content.contains("Region: London\n\nPhone Number: "));
        assert!(content.ends_with("Region: Manchester\n\n"));
    }
}
