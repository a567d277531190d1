use crate::domain::error::{HotloadError, HotloadResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub const ARCHIVE_RELEASE_ERROR: &str = "It is unnecessary to package releases in a .zip or binary file. Please specify the direct path to the update content's directory (e.g. /platforms/ios/www) or file (e.g. main.jsbundle).";

/// Extensions of containers that wrap update content instead of being it
const RESERVED_EXTENSIONS: [&str; 3] = ["zip", "ipa", "apk"];

/// Reject release paths that point at an archive or app binary.
///
/// Only the extension is inspected; the path need not exist.
pub fn validate_release_path(package: &str) -> HotloadResult<()> {
    let extension = Path::new(package)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension {
        Some(ext) if RESERVED_EXTENSIONS.contains(&ext.as_str()) => {
            Err(HotloadError::Validation(ARCHIVE_RELEASE_ERROR.to_string()))
        }
        _ => Ok(()),
    }
}

/// Stages update content before upload
#[async_trait]
pub trait Packager: Send + Sync {
    /// Prepare `content` for release and return the path to upload
    async fn stage(&self, content: &Path) -> HotloadResult<PathBuf>;
}

/// Uploads content exactly as given
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPackager;

#[async_trait]
impl Packager for NoopPackager {
    async fn stage(&self, content: &Path) -> HotloadResult<PathBuf> {
        Ok(content.to_path_buf())
    }
}
