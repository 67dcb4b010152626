//! Normalized document paths

use std::path::{Path, PathBuf};

/// A document path stored with forward slashes.
///
/// Conversion to the platform-native form happens only at I/O boundaries,
/// so reports print the same path on every platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let inner = path.as_ref().to_string_lossy().replace('\\', "/");
        Self { inner }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// True for `/abs`, `//server/share` and `C:/...` style paths.
    pub fn is_absolute(&self) -> bool {
        let bytes = self.inner.as_bytes();
        self.inner.starts_with('/')
            || (bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic())
    }

    /// Join this path with a relative segment.
    pub fn join(&self, segment: &str) -> Self {
        let segment = segment.replace('\\', "/");
        if self.inner.is_empty() {
            return Self { inner: segment };
        }
        let inner = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment)
        } else {
            format!("{}/{}", self.inner, segment)
        };
        Self { inner }
    }

    /// Resolve a path relative to `base`, leaving absolute paths untouched.
    ///
    /// Manifests list documents relative to their own directory.
    pub fn resolve_against(path: &str, base: Option<&NormalizedPath>) -> Self {
        let candidate = Self::new(path);
        match base {
            Some(base) if !candidate.is_absolute() && !base.as_str().is_empty() => {
                base.join(candidate.as_str().trim_start_matches("./"))
            }
            _ => candidate,
        }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            Some(idx) => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            None => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        self.inner
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
    }

    /// Get the extension if present. Dotfiles have no extension.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 { None } else { Some(&name[idx + 1..]) }
        })
    }

    /// Sibling lock file guarding writes to this document.
    pub fn lock_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.lock", self.inner))
    }

    /// Hidden sibling used as the staging file for an atomic write.
    pub fn temp_sibling(&self) -> PathBuf {
        let name = self.file_name().unwrap_or("document");
        let temp_name = format!(".{}.{}.tmp", name, std::process::id());
        self.to_native().with_file_name(temp_name)
    }

    /// The resolved form of this path, for telling whether two spellings
    /// name the same document.
    ///
    /// Symlinks, `.` and `..` are resolved through the filesystem. A path
    /// that cannot be resolved, such as a file that does not exist yet, is
    /// returned unchanged.
    pub fn canonical(&self) -> Self {
        match dunce::canonicalize(self.to_native()) {
            Ok(resolved) => Self::new(resolved),
            Err(_) => self.clone(),
        }
    }

    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
