//! Shader sources, served either from the embedded table or from a directory
//! on disk.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Vertex stage: `projection * view * model * position`, colour passed through.
pub const BODY_VERTEX: &str = "body.vert.wgsl";
/// Fragment stage: interpolated colour, unlit.
pub const BODY_FRAGMENT: &str = "body.frag.wgsl";

static EMBEDDED: &[(&str, &str)] = &[
    (BODY_VERTEX, include_str!("../shaders/body.vert.wgsl")),
    (BODY_FRAGMENT, include_str!("../shaders/body.frag.wgsl")),
];

/// Errors from loading shader sources.
#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("no embedded shader named {0:?}")]
    UnknownShader(String),
    #[error("failed to read shader {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where shader text comes from.
#[derive(Debug, Clone, Default)]
pub enum ShaderLibrary {
    /// Sources compiled into the binary.
    #[default]
    Embedded,
    /// `<dir>/<name>` on disk, read at load time.
    Directory(PathBuf),
}

impl ShaderLibrary {
    pub fn embedded() -> Self {
        Self::Embedded
    }

    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        Self::Directory(dir.as_ref().to_path_buf())
    }

    /// Names available in the embedded table.
    pub fn embedded_names() -> impl Iterator<Item = &'static str> {
        EMBEDDED.iter().map(|(name, _)| *name)
    }

    /// Load the source text of shader `name`.
    pub fn load(&self, name: &str) -> Result<Cow<'static, str>, ShaderError> {
        match self {
            Self::Embedded => EMBEDDED
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, src)| Cow::Borrowed(*src))
                .ok_or_else(|| ShaderError::UnknownShader(name.to_string())),
            Self::Directory(dir) => {
                let path = dir.join(name);
                let source = std::fs::read_to_string(&path)
                    .map_err(|source| ShaderError::Io { path, source })?;
                Ok(Cow::Owned(source))
            }
        }
    }

    /// Short description of the source, for logs.
    pub fn origin(&self) -> String {
        match self {
            Self::Embedded => "embedded".into(),
            Self::Directory(dir) => dir.display().to_string(),
        }
    }
}
