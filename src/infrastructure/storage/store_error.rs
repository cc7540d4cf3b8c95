use object_store::path::Path as StorePath;

use crate::application::ports::FetchError;

pub(super) fn map_get_error(error: object_store::Error) -> FetchError {
    match error {
        object_store::Error::NotFound { path, .. } => FetchError::NotFound(path),
        object_store::Error::PermissionDenied { path, .. }
        | object_store::Error::Unauthenticated { path, .. } => FetchError::AccessDenied(path),
        object_store::Error::InvalidPath { source } => {
            FetchError::InvalidLocation(source.to_string())
        }
        other => FetchError::Transport(other.to_string()),
    }
}

/// Store path that addresses exactly `raw`.
///
/// `StorePath::from` re-encodes and normalizes, which would fetch a different
/// object. Keys that cannot be expressed verbatim are rejected instead.
pub(super) fn exact_store_path(raw: &str) -> Result<StorePath, FetchError> {
    let path = StorePath::parse(raw)
        .map_err(|e| FetchError::InvalidLocation(format!("{}: {}", raw, e)))?;
    if path.as_ref() != raw {
        return Err(FetchError::InvalidLocation(format!(
            "{} is not addressable verbatim (normalizes to {})",
            raw, path
        )));
    }
    Ok(path)
}
