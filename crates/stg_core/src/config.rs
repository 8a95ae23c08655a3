use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMode {
    /// Scale to fill the window while keeping the aspect ratio.
    #[default]
    Fit,
    /// Always present at the base resolution.
    None,
}

/// Game instance configuration. Every field has a default so a config file
/// only needs to name what it changes.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GameConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_width")]
    pub min_width: u32,
    #[serde(default = "default_height")]
    pub min_height: u32,
    #[serde(default = "default_snap_width")]
    pub snap_width: u32,
    #[serde(default = "default_snap_height")]
    pub snap_height: u32,
    #[serde(default = "default_true")]
    pub pixel_art: bool,
    #[serde(default = "default_true")]
    pub transparent: bool,
    #[serde(default)]
    pub scale_mode: ScaleMode,
    #[serde(default = "default_true")]
    pub auto_center: bool,
    #[serde(default = "default_manifest_path")]
    pub manifest_path: String,
    #[serde(default)]
    pub bindings_path: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_width(),
            height: default_height(),
            min_width: default_width(),
            min_height: default_height(),
            snap_width: default_snap_width(),
            snap_height: default_snap_height(),
            pixel_art: true,
            transparent: true,
            scale_mode: ScaleMode::Fit,
            auto_center: true,
            manifest_path: default_manifest_path(),
            bindings_path: None,
        }
    }
}

impl GameConfig {
    /// Presentation size for a window of the given size.
    ///
    /// Fit mode keeps the base aspect ratio and, when snapping is enabled,
    /// only grows in whole snap steps so pixel art scales cleanly. The
    /// result never drops below the minimum size.
    pub fn fit_size(&self, window_w: u32, window_h: u32) -> (u32, u32) {
        let (w, h) = match self.scale_mode {
            ScaleMode::None => (self.width, self.height),
            ScaleMode::Fit if self.snap_width > 0 && self.snap_height > 0 => {
                let steps = (window_w / self.snap_width).min(window_h / self.snap_height);
                (steps * self.snap_width, steps * self.snap_height)
            }
            ScaleMode::Fit => {
                let scale = (window_w as f64 / self.width as f64)
                    .min(window_h as f64 / self.height as f64);
                (
                    (self.width as f64 * scale).floor() as u32,
                    (self.height as f64 * scale).floor() as u32,
                )
            }
        };

        if w < self.min_width || h < self.min_height {
            (self.min_width, self.min_height)
        } else {
            (w, h)
        }
    }

    /// Top-left offset that centers `size` inside the window. Negative when
    /// the presentation is larger than the window.
    pub fn center_offset(&self, window: (u32, u32), size: (u32, u32)) -> (i64, i64) {
        if !self.auto_center {
            return (0, 0);
        }
        (
            (window.0 as i64 - size.0 as i64) / 2,
            (window.1 as i64 - size.1 as i64) / 2,
        )
    }
}

pub fn load_config_from_path(path: &Path) -> Result<GameConfig, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: GameConfig = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse config JSON {}: {e}", path.display()))?;
    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &GameConfig) -> Result<(), String> {
    if config.width == 0 || config.height == 0 {
        return Err("Config validation failed: width and height must be > 0".to_string());
    }
    if config.min_width > config.width || config.min_height > config.height {
        return Err(format!(
            "Config validation failed: minimum size {}x{} exceeds base size {}x{}",
            config.min_width, config.min_height, config.width, config.height
        ));
    }
    let snapping = config.snap_width > 0 || config.snap_height > 0;
    if snapping
        && u64::from(config.snap_width) * u64::from(config.height)
            != u64::from(config.snap_height) * u64::from(config.width)
    {
        return Err(format!(
            "Config validation failed: snap size {}x{} does not match the {}x{} aspect ratio",
            config.snap_width, config.snap_height, config.width, config.height
        ));
    }
    if config.manifest_path.trim().is_empty() {
        return Err("Config validation failed: manifest_path is empty".to_string());
    }
    Ok(())
}

fn default_title() -> String {
    "Stage".to_string()
}

const fn default_width() -> u32 {
    640
}

const fn default_height() -> u32 {
    360
}

const fn default_snap_width() -> u32 {
    320
}

const fn default_snap_height() -> u32 {
    180
}

const fn default_true() -> bool {
    true
}

fn default_manifest_path() -> String {
    "assets/manifest.json".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipping_config() {
        let c = GameConfig::default();
        assert_eq!((c.width, c.height), (640, 360));
        assert_eq!((c.min_width, c.min_height), (640, 360));
        assert_eq!((c.snap_width, c.snap_height), (320, 180));
        assert!(c.pixel_art && c.transparent && c.auto_center);
        assert_eq!(c.scale_mode, ScaleMode::Fit);
        assert!(validate_config(&c).is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let c: GameConfig = serde_json::from_str(r#"{ "title": "Demo", "pixel_art": false }"#)
            .expect("config should parse");
        assert_eq!(c.title, "Demo");
        assert!(!c.pixel_art);
        assert_eq!(c.width, 640);
        assert_eq!(c.manifest_path, "assets/manifest.json");
    }

    #[test]
    fn fit_snaps_to_whole_steps() {
        let c = GameConfig::default();
        assert_eq!(c.fit_size(1920, 1080), (1920, 1080));
        assert_eq!(c.fit_size(1900, 1080), (1600, 900));
        assert_eq!(c.fit_size(2560, 1000), (1600, 900));
        assert_eq!(c.fit_size(1000, 700), (960, 540));
    }

    #[test]
    fn fit_never_goes_below_minimum() {
        let c = GameConfig::default();
        assert_eq!(c.fit_size(300, 200), (640, 360));
        assert_eq!(c.fit_size(900, 400), (640, 360));
    }

    #[test]
    fn fit_without_snap_scales_continuously() {
        let c = GameConfig {
            snap_width: 0,
            snap_height: 0,
            ..GameConfig::default()
        };
        assert_eq!(c.fit_size(1000, 1000), (1000, 562));
    }

    #[test]
    fn no_scale_mode_keeps_base_size() {
        let c = GameConfig {
            scale_mode: ScaleMode::None,
            ..GameConfig::default()
        };
        assert_eq!(c.fit_size(1920, 1080), (640, 360));
    }

    #[test]
    fn center_offset_splits_slack() {
        let c = GameConfig::default();
        assert_eq!(c.center_offset((1900, 1080), (1600, 900)), (150, 90));
        let off = GameConfig {
            auto_center: false,
            ..GameConfig::default()
        };
        assert_eq!(off.center_offset((1900, 1080), (1600, 900)), (0, 0));
    }

    #[test]
    fn validation_rejects_bad_sizes() {
        let zero = GameConfig {
            width: 0,
            ..GameConfig::default()
        };
        assert!(validate_config(&zero).is_err());

        let min_too_big = GameConfig {
            min_width: 800,
            ..GameConfig::default()
        };
        assert!(validate_config(&min_too_big)
            .unwrap_err()
            .contains("exceeds base size"));

        let skewed_snap = GameConfig {
            snap_width: 300,
            ..GameConfig::default()
        };
        assert!(validate_config(&skewed_snap)
            .unwrap_err()
            .contains("aspect ratio"));
    }
}
