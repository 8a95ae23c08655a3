use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;

use stg_core::manifest::ManifestSection;

/// Loads a manifest section one file per call so progress can be shown
/// between frames. Failed files still count toward progress.
pub struct PackLoader {
    pending: VecDeque<PathBuf>,
    total: usize,
    loaded_bytes: u64,
    failed: usize,
}

impl PackLoader {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        let total = paths.len();
        Self {
            pending: paths.into(),
            total,
            loaded_bytes: 0,
            failed: 0,
        }
    }

    pub fn from_section(section: &ManifestSection, base_dir: &std::path::Path) -> Self {
        Self::new(section.resolved_paths(base_dir))
    }

    pub fn is_complete(&self) -> bool {
        self.pending.is_empty()
    }

    /// Fraction of files processed, `1.0` for an empty pack.
    pub fn progress(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        (self.total - self.pending.len()) as f64 / self.total as f64
    }

    pub fn load_next(&mut self) -> Option<Result<PathBuf, String>> {
        let path = self.pending.pop_front()?;
        match fs::read(&path) {
            Ok(bytes) => {
                self.loaded_bytes += bytes.len() as u64;
                log::debug!("Loaded asset {} ({} bytes)", path.display(), bytes.len());
                Some(Ok(path))
            }
            Err(err) => {
                self.failed += 1;
                Some(Err(format!("Failed to load asset {}: {err}", path.display())))
            }
        }
    }

    pub fn loaded_bytes(&self) -> u64 {
        self.loaded_bytes
    }

    pub fn failed(&self) -> usize {
        self.failed
    }
}
