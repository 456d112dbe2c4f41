use sha2::{Digest, Sha256};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{map_io_err, SpliceError, SpliceResult};

/// Read a file and decode it as UTF-8
pub fn read_text(path: impl AsRef<Path>) -> SpliceResult<String> {
    let path = path.as_ref();
    debug!("Reading file: {}", path.display());

    let bytes = fs::read(path).map_err(map_io_err(path))?;
    String::from_utf8(bytes).map_err(|e| SpliceError::encoding_error(e, path))
}

/// Overwrite a file by writing a temporary sibling and renaming it into place.
///
/// Symlinks are followed so the file they point to is updated and the link
/// itself stays. The existing file's permissions are carried over. On
/// failure the original file is untouched and the temporary file is removed.
pub fn write_atomic(path: impl AsRef<Path>, content: &str) -> SpliceResult<()> {
    let path = path.as_ref();
    let resolved = match fs::canonicalize(path) {
        Ok(resolved) => resolved,
        Err(e) if e.kind() == ErrorKind::NotFound => path.to_path_buf(),
        Err(e) => return Err(SpliceError::io_error(e, Some(path))),
    };
    debug!(
        "Writing file atomically: {} (resolved to {})",
        path.display(),
        resolved.display()
    );

    let dir = match resolved.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(map_io_err(dir))?;
    temp.write_all(content.as_bytes())
        .map_err(map_io_err(temp.path()))?;
    temp.as_file().sync_all().map_err(map_io_err(temp.path()))?;

    match fs::metadata(&resolved) {
        Ok(metadata) => {
            if let Err(e) = temp.as_file().set_permissions(metadata.permissions()) {
                warn!(
                    "Could not copy permissions of {}: {}",
                    resolved.display(),
                    e
                );
            }
        }
        Err(e) => debug!("No existing metadata for {}: {}", resolved.display(), e),
    }

    // Dropping the PersistError removes the temporary file
    temp.persist(&resolved)
        .map_err(|e| SpliceError::io_error(e.error, Some(path)))?;
    Ok(())
}

/// Overwrite a file in place; a crash mid-write can leave it truncated
pub fn write_in_place(path: impl AsRef<Path>, content: &str) -> SpliceResult<()> {
    let path = path.as_ref();
    debug!("Writing file in place: {}", path.display());

    fs::write(path, content).map_err(map_io_err(path))
}

/// Hex-encoded SHA-256 of a byte slice
pub fn sha256_hex(bytes: impl AsRef<[u8]>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes.as_ref());
    format!("{:x}", hasher.finalize())
}
