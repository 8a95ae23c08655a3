use std::sync::Arc;
use stg_core::GameConfig;
use winit::dpi::LogicalSize;
use winit::error::OsError;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

#[derive(Debug, Clone, PartialEq)]
pub struct PlatformConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub min_width: u32,
    pub min_height: u32,
    pub transparent: bool,
    /// Nearest-neighbour scaling for the presented frame.
    pub pixel_art: bool,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self::from_game_config(&GameConfig::default())
    }
}

impl PlatformConfig {
    pub fn from_game_config(config: &GameConfig) -> Self {
        Self {
            title: config.title.clone(),
            width: config.width,
            height: config.height,
            min_width: config.min_width,
            min_height: config.min_height,
            transparent: config.transparent,
            pixel_art: config.pixel_art,
        }
    }

    pub fn window_attributes(&self) -> WindowAttributes {
        WindowAttributes::default()
            .with_title(&self.title)
            .with_inner_size(LogicalSize::new(self.width, self.height))
            .with_min_inner_size(LogicalSize::new(self.min_width, self.min_height))
            .with_transparent(self.transparent)
    }

    pub fn texture_filter(&self) -> &'static str {
        if self.pixel_art {
            "nearest"
        } else {
            "linear"
        }
    }
}

pub fn create_window(
    event_loop: &ActiveEventLoop,
    config: &PlatformConfig,
) -> Result<Arc<Window>, OsError> {
    let window = event_loop.create_window(config.window_attributes())?;
    log::info!(
        "Window created: {}x{} (min {}x{}), {} filtering",
        config.width,
        config.height,
        config.min_width,
        config.min_height,
        config.texture_filter()
    );
    Ok(Arc::new(window))
}
