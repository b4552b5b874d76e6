//! Input resolution: read a user-supplied path into a UTF-8 document.
//!
//! The error taxonomy is deliberately finer than `io::Error`: a missing
//! file, a permission problem, and a non-UTF-8 file each get their own
//! [`ConvertError`] variant so the CLI can print an actionable message
//! instead of a bare OS error string.

use crate::error::ConvertError;
use std::path::Path;
use tracing::debug;

/// Read the document at `path`, validating existence and encoding.
pub fn read_document(path: &Path) -> Result<String, ConvertError> {
    if !path.exists() {
        return Err(ConvertError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(ConvertError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(ConvertError::ReadFailed {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let text = String::from_utf8(bytes).map_err(|_| ConvertError::InvalidEncoding {
        path: path.to_path_buf(),
    })?;

    debug!("Read {} bytes from {}", text.len(), path.display());
    Ok(text)
}
