use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::backend::{Backend, DesignSnapshot};

/// Backend for designs described by a JSON snapshot next to already
/// existing HDL sources. "Conversion" copies the sources.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotBackend {
    #[serde(default)]
    pub sources: Vec<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    design: DesignSnapshot,
    #[serde(default)]
    sources: Vec<PathBuf>,
}

impl SnapshotBackend {
    pub fn new(sources: Vec<PathBuf>) -> Self {
        Self { sources }
    }

    /// Load `{"design": ..., "sources": [...]}`; relative source paths are
    /// taken relative to the snapshot file
    pub fn load(path: &Path) -> Result<(Self, DesignSnapshot)> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read design snapshot: {:?}", path))?;
        let file: SnapshotFile = serde_json::from_str(&content)
            .context(format!("Failed to parse design snapshot: {:?}", path))?;

        let base = path.parent().unwrap_or(Path::new("."));
        let sources = file
            .sources
            .into_iter()
            .map(|s| if s.is_absolute() { s } else { base.join(s) })
            .collect();

        Ok((Self::new(sources), file.design))
    }
}

impl Backend for SnapshotBackend {
    fn to_hdl(&self, design: &DesignSnapshot, save_to: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for src in &self.sources {
            let file_name = src
                .file_name()
                .context(format!("Source path has no file name: {:?}", src))?;
            let dst = save_to.join(file_name);
            fs::copy(src, &dst)
                .context(format!("Failed to stage {:?} for {}", src, design.name))?;
            tracing::debug!("Staged source: {:?}", dst);
            files.push(dst);
        }

        Ok(files)
    }
}
