use crate::store::TokenStore;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Token storage backed by a plain file under the app data directory.
///
/// Login and signup write the file, logout removes it. Reads happen on every
/// request so an external change takes effect immediately.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("token"),
        }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            debug!("No token file at {}", self.path.display());
            return Ok(None);
        }
        let token = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read token file: {}", self.path.display()))?;
        let token = token.trim();
        if token.is_empty() {
            return Ok(None);
        }
        Ok(Some(token.to_string()))
    }

    fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(&self.path, token)
            .with_context(|| format!("Failed to write token file: {}", self.path.display()))?;
        debug!("Saved token to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove token file: {}", self.path.display()))?;
            debug!("Removed token file {}", self.path.display());
        }
        Ok(())
    }
}
