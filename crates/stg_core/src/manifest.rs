use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Asset pack manifest: named sections, each listing files to preload.
#[derive(Debug, Deserialize, Clone)]
#[serde(transparent)]
pub struct AssetManifest {
    pub sections: BTreeMap<String, ManifestSection>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ManifestSection {
    /// Prefix joined onto every relative file url in the section.
    #[serde(default)]
    pub path: Option<String>,
    pub files: Vec<ManifestFile>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ManifestFile {
    #[serde(rename = "type")]
    pub kind: String,
    pub key: String,
    pub url: String,
}

impl AssetManifest {
    pub fn section(&self, name: &str) -> Option<&ManifestSection> {
        self.sections.get(name)
    }

    pub fn file_count(&self) -> usize {
        self.sections.values().map(|s| s.files.len()).sum()
    }
}

impl ManifestSection {
    /// Resolve each file's url against the section path and `base_dir`.
    pub fn resolved_paths(&self, base_dir: &Path) -> Vec<PathBuf> {
        let prefix = self.path.as_deref().map(Path::new);
        self.files
            .iter()
            .map(|file| match prefix {
                Some(prefix) => base_dir.join(prefix).join(&file.url),
                None => base_dir.join(&file.url),
            })
            .collect()
    }
}

pub fn load_manifest_from_path(path: &Path) -> Result<AssetManifest, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read manifest {}: {e}", path.display()))?;
    let manifest: AssetManifest = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse manifest JSON {}: {e}", path.display()))?;
    validate_manifest(&manifest)?;
    Ok(manifest)
}

fn validate_manifest(manifest: &AssetManifest) -> Result<(), String> {
    if manifest.sections.is_empty() {
        return Err("Manifest validation failed: no sections".to_string());
    }

    for (name, section) in &manifest.sections {
        if section.files.is_empty() {
            log::warn!("Manifest section '{}' lists no files.", name);
        }
        let mut keys = HashSet::new();
        for file in &section.files {
            if file.key.trim().is_empty() {
                return Err(format!(
                    "Manifest validation failed: section '{name}' has a file with an empty key"
                ));
            }
            if file.url.trim().is_empty() {
                return Err(format!(
                    "Manifest validation failed: file '{}' in section '{name}' has an empty url",
                    file.key
                ));
            }
            if !keys.insert(file.key.as_str()) {
                return Err(format!(
                    "Manifest validation failed: duplicate key '{}' in section '{name}'",
                    file.key
                ));
            }
        }
    }
    Ok(())
}
