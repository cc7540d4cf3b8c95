use std::fmt;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use super::ObjectLocation;

/// How transient artifacts are laid out under the scratch root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArtifactNaming {
    /// `<root>/<request id>/<file name>`. Concurrent requests never collide.
    #[default]
    PerRequest,
    /// `<root>/<file name>`. Two in-flight requests whose keys end in the same
    /// segment share a path.
    Flat,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("object key has no usable file name: {0:?}")]
pub struct InvalidArtifactName(pub String);

/// Local path of the transient copy of a remote object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPath(PathBuf);

impl ArtifactPath {
    pub fn derive(
        root: &Path,
        location: &ObjectLocation,
        naming: ArtifactNaming,
        request_id: Uuid,
    ) -> Result<Self, InvalidArtifactName> {
        let file_name = location.file_name();
        if file_name.is_empty() || file_name == "." || file_name == ".." {
            return Err(InvalidArtifactName(location.key().to_string()));
        }

        let path = match naming {
            ArtifactNaming::Flat => root.join(file_name),
            ArtifactNaming::PerRequest => root.join(request_id.to_string()).join(file_name),
        };
        Ok(Self(path))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for ArtifactPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ArtifactPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
