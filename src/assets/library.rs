use std::path::{Path, PathBuf};

use anyhow::Context as _;
use rand::{Rng, seq::IndexedRandom};

use crate::foundation::error::{PixrevealError, PixrevealResult};

const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// Candidate landscape photos; one is drawn at random per session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LandscapeLibrary {
    paths: Vec<PathBuf>,
}

impl LandscapeLibrary {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    /// Image files directly inside `dir`, sorted by path.
    pub fn scan(dir: &Path) -> PixrevealResult<Self> {
        let entries =
            std::fs::read_dir(dir).with_context(|| format!("read dir '{}'", dir.display()))?;
        let mut paths = Vec::new();
        for entry in entries {
            let path = entry
                .with_context(|| format!("read entry in '{}'", dir.display()))?
                .path();
            if path.is_file() && is_image_path(&path) {
                paths.push(path);
            }
        }
        paths.sort();
        tracing::debug!(dir = %dir.display(), count = paths.len(), "scanned landscapes");
        Ok(Self { paths })
    }

    /// A single file, or every image in a directory.
    pub fn resolve(path: &Path) -> PixrevealResult<Self> {
        if path.is_dir() {
            Self::scan(path)
        } else {
            Ok(Self::new(vec![path.to_path_buf()]))
        }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> PixrevealResult<&Path> {
        self.paths
            .choose(rng)
            .map(PathBuf::as_path)
            .ok_or_else(|| PixrevealError::asset("landscape library is empty"))
    }
}

fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/library.rs"]
mod tests;
