use std::path::PathBuf;

use guidegate_util::{resolve_within, validate_filename, FilenameError, PathError, SanitizedFilename};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GuideError {
    #[error(transparent)]
    Filename(#[from] FilenameError),
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("internal error: {0}")]
    Internal(String),
}

/// A user guide that passed validation and containment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedGuide {
    /// Canonical absolute path inside the base directory.
    pub path: PathBuf,
    pub filename: SanitizedFilename,
}

/// Validates and locates the configured user guide.
///
/// Holds no mutable state. Each call re-checks the filesystem.
#[derive(Debug, Clone)]
pub struct GuideService {
    base_dir: PathBuf,
    filename: String,
}

impl GuideService {
    pub fn new(base_dir: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            filename: filename.into(),
        }
    }

    /// Run the full pipeline. Blocks on filesystem calls.
    ///
    /// Every rejection is logged here with its reason; callers only need to
    /// map the error to a response.
    pub fn locate(&self) -> Result<ResolvedGuide, GuideError> {
        self.check().inspect_err(|e| {
            tracing::warn!(
                filename = %self.filename,
                base_dir = %self.base_dir.display(),
                "User guide rejected: {}",
                e
            )
        })
    }

    fn check(&self) -> Result<ResolvedGuide, GuideError> {
        let filename = validate_filename(&self.filename)?;
        let path = resolve_within(&filename, &self.base_dir)?;
        Ok(ResolvedGuide { path, filename })
    }

    /// [`locate`](Self::locate) on the blocking pool.
    pub async fn resolve(&self) -> Result<ResolvedGuide, GuideError> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || service.locate())
            .await
            .map_err(|e| GuideError::Internal(e.to_string()))?
    }
}
