//! Directory provisioning for file-backed stores.
//!
//! [`ensure_dir`] walks up from the requested path until it finds an existing
//! ancestor, then creates the missing levels top-down. The walk stops at the
//! filesystem root and is capped at [`MAX_PROVISION_DEPTH`] missing levels.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Maximum number of missing directory levels [`ensure_dir`] will create.
pub const MAX_PROVISION_DEPTH: usize = 64;

/// Make sure `path` exists as a directory.
///
/// Returns the directories that were created, outermost first. An existing
/// path is a no-op and yields an empty list. The first failure stops
/// provisioning; directories created before it are left in place.
pub async fn ensure_dir(path: impl AsRef<Path>) -> StoreResult<Vec<PathBuf>> {
    let path = path.as_ref();

    let mut missing = Vec::new();
    let mut cursor = Some(path);
    while let Some(dir) = cursor {
        if exists(dir).await? {
            break;
        }
        if missing.len() == MAX_PROVISION_DEPTH {
            return Err(provision_error(
                path,
                io::Error::other(format!(
                    "more than {MAX_PROVISION_DEPTH} missing directory levels"
                )),
            ));
        }
        missing.push(dir.to_path_buf());
        cursor = dir.parent();
    }

    // `missing` runs innermost-first; create from the outside in.
    missing.reverse();
    for dir in &missing {
        tokio::fs::create_dir(dir)
            .await
            .map_err(|e| provision_error(dir, e))?;
        debug!(path = %dir.display(), "created directory");
    }

    Ok(missing)
}

/// Existence check that only treats `NotFound` as "absent".
async fn exists(dir: &Path) -> StoreResult<bool> {
    // `Path::parent` of a bare relative name yields "", the working directory.
    if dir.as_os_str().is_empty() {
        return Ok(true);
    }
    match tokio::fs::metadata(dir).await {
        Ok(meta) if meta.is_dir() => Ok(true),
        Ok(_) => Err(provision_error(
            dir,
            io::Error::other("path exists and is not a directory"),
        )),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(provision_error(dir, e)),
    }
}

fn provision_error(path: &Path, source: io::Error) -> StoreError {
    StoreError::Provision {
        path: path.to_path_buf(),
        source,
    }
}
