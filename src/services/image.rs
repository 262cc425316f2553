use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

use crate::config::UploadConfig;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to save image")]
    Write(#[source] io::Error),

    #[error("Failed to remove stored image")]
    Remove(#[source] io::Error),
}

/// Stores uploaded product images under the public uploads directory.
///
/// Files are named with random hex plus the original extension; products
/// reference them by URL (`{public_prefix}/{filename}`).
pub struct ImageStore {
    root: PathBuf,
    public_prefix: String,
}

impl ImageStore {
    #[must_use]
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            root: PathBuf::from(&config.uploads_path),
            public_prefix: config.public_prefix.trim_end_matches('/').to_string(),
        }
    }

    /// Write an uploaded image and return the URL it will be served under.
    pub async fn save(&self, original_filename: &str, bytes: &[u8]) -> Result<String, StorageError> {
        let filename = format!(
            "{}.{}",
            random_hex_name(),
            extension_of(original_filename)
        );

        fs::create_dir_all(&self.root)
            .await
            .map_err(StorageError::Write)?;

        let path = self.root.join(&filename);
        fs::write(&path, bytes).await.map_err(StorageError::Write)?;

        info!(path = %path.display(), "Stored uploaded image");

        Ok(format!("{}/{}", self.public_prefix, filename))
    }

    /// Best-effort removal of a stored image by its public URL.
    /// A missing file is treated as success; other I/O errors propagate.
    pub async fn remove(&self, url: &str) -> Result<(), StorageError> {
        let Some(filename) = self.filename_from_url(url) else {
            warn!(url, "Ignoring image URL outside the uploads prefix");
            return Ok(());
        };

        let path = self.root.join(filename);
        match fs::remove_file(&path).await {
            Ok(()) => {
                info!(path = %path.display(), "Removed stored image");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Remove(e)),
        }
    }

    /// Map a public URL back to a bare filename under the uploads root.
    /// Rejects anything not directly under the prefix.
    fn filename_from_url<'a>(&self, url: &'a str) -> Option<&'a str> {
        let rest = url.strip_prefix(&self.public_prefix)?.strip_prefix('/')?;

        if rest.is_empty() || rest.contains('/') || rest.contains("..") {
            return None;
        }

        Some(rest)
    }
}

/// Random 16-byte hex filename stem
fn random_hex_name() -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    let bytes: [u8; 16] = rng.random();

    bytes.iter().fold(String::with_capacity(32), |mut acc, b| {
        use std::fmt::Write;
        let _ = write!(acc, "{b:02x}");
        acc
    })
}

/// Lowercased alphanumeric extension of the original upload, "jpg" if absent
fn extension_of(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.len() <= 8 && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map_or_else(|| "jpg".to_string(), str::to_lowercase)
}
