//! Local copies of imported files.

use anyhow::{Context, Result};
use flightbook_core::CoreError;
use std::path::{Path, PathBuf};

/// The application's own directory of imported flight files.
#[derive(Debug, Clone)]
pub struct LocalFiles {
    root: PathBuf,
}

impl LocalFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// First `flight_<stamp>` name, counting up from `stamp`, for which
    /// none of `extensions` exists yet.
    pub async fn unused_stem(&self, mut stamp: i64, extensions: &[&str]) -> Result<String> {
        loop {
            let stem = format!("flight_{stamp}");
            let mut taken = false;
            for ext in extensions {
                if tokio::fs::try_exists(self.root.join(format!("{stem}.{ext}"))).await? {
                    taken = true;
                    break;
                }
            }
            if !taken {
                return Ok(stem);
            }
            stamp += 1;
        }
    }

    /// Copy `source` into the data directory as `file_name`.
    ///
    /// Falls back to read + write when a plain copy is refused, e.g. for
    /// sources that are not regular files.
    pub async fn save(&self, source: &Path, file_name: &str) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .with_context(|| format!("creating {}", self.root.display()))?;

        let destination = self.root.join(file_name);
        if let Err(err) = tokio::fs::copy(source, &destination).await {
            tracing::debug!("copy of {} failed ({}), rewriting instead", source.display(), err);
            let content = tokio::fs::read(source)
                .await
                .with_context(|| format!("reading {}", source.display()))?;
            tokio::fs::write(&destination, content)
                .await
                .with_context(|| format!("writing {}", destination.display()))?;
        }

        Ok(destination)
    }

    /// Remove copies made by [`LocalFiles::save`] that no record will
    /// point to. Failures are logged, not returned.
    pub async fn discard(&self, saved: &[&Path]) {
        for path in saved {
            if let Err(err) = tokio::fs::remove_file(path).await {
                tracing::warn!("could not remove {}: {}", path.display(), err);
            }
        }
    }
}

/// Read a file as UTF-8 text.
pub async fn read_text(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    String::from_utf8(bytes)
        .map_err(|err| CoreError::from(err.utf8_error()))
        .with_context(|| format!("decoding {}", path.display()))
}
