//! Loading overlay shown while the stage preloads its asset pack.
//!
//! The overlay is a plain state model: the host feeds it loader progress and
//! frame timestamps and copies [`Splash::opacity`], [`Splash::progress_value`]
//! and [`Splash::progress_text`] onto whatever element it renders with.

/// Element ids of the overlay in the host page.
pub const SPLASH_ID: &str = "splash";
pub const PRELOAD_PROGRESS_ID: &str = "preloadProgress";
pub const PRELOAD_TEXT_ID: &str = "preloadText";

pub const PROGRESS_MAX: u32 = 100;
pub const DEFAULT_FADE_DURATION_MS: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Hidden,
    Loading,
    /// Loader finished; fade begins once `timestamp >= delay_until`.
    Waiting { delay_until: Option<f64> },
    Fading { start: f64 },
}

#[derive(Debug, Clone)]
pub struct Splash {
    phase: Phase,
    opacity: f64,
    progress_value: u32,
    fade_duration_ms: f64,
    fade_delay_ms: f64,
    listening: bool,
}

impl Splash {
    pub fn new() -> Self {
        Self {
            phase: Phase::Hidden,
            opacity: 0.0,
            progress_value: 0,
            fade_duration_ms: DEFAULT_FADE_DURATION_MS,
            fade_delay_ms: 0.0,
            listening: false,
        }
    }

    /// Show the overlay fully opaque with an empty progress bar and start
    /// listening for loader progress.
    pub fn run(&mut self, fade_duration_ms: f64, fade_delay_ms: f64) {
        self.phase = Phase::Loading;
        self.opacity = 1.0;
        self.progress_value = 0;
        self.fade_duration_ms = fade_duration_ms.max(0.0);
        self.fade_delay_ms = fade_delay_ms.max(0.0);
        self.listening = true;
    }

    /// Loader progress in `0.0..=1.0`. Completion schedules the fade.
    pub fn on_progress(&mut self, progress: f64) {
        if !self.listening {
            return;
        }
        let clamped = progress.clamp(0.0, 1.0);
        self.progress_value = (clamped * PROGRESS_MAX as f64).floor() as u32;

        if clamped >= 1.0 && self.phase == Phase::Loading {
            log::debug!("Preload complete, fading splash in {}ms", self.fade_delay_ms);
            self.phase = Phase::Waiting { delay_until: None };
        }
    }

    /// Advance the fade to the animation-frame `timestamp` (ms).
    pub fn tick(&mut self, timestamp: f64) {
        match self.phase {
            Phase::Waiting { delay_until: None } => {
                self.phase = Phase::Waiting {
                    delay_until: Some(timestamp + self.fade_delay_ms),
                };
                if self.fade_delay_ms <= 0.0 {
                    self.tick(timestamp);
                }
            }
            Phase::Waiting {
                delay_until: Some(until),
            } if timestamp >= until => {
                self.phase = Phase::Fading { start: timestamp };
                self.tick(timestamp);
            }
            Phase::Fading { start } => {
                let elapsed = timestamp - start;
                self.opacity = if self.fade_duration_ms > 0.0 {
                    (1.0 - elapsed / self.fade_duration_ms).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                if self.opacity == 0.0 {
                    self.phase = Phase::Hidden;
                    self.listening = false;
                    log::debug!("Splash hidden");
                }
            }
            _ => {}
        }
    }

    pub fn is_visible(&self) -> bool {
        self.phase != Phase::Hidden
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn is_fading(&self) -> bool {
        matches!(self.phase, Phase::Fading { .. })
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn progress_value(&self) -> u32 {
        self.progress_value
    }

    pub fn progress_text(&self) -> String {
        format!("{}%", self.progress_value)
    }

    /// Current state of each overlay element, keyed by element id.
    pub fn elements(&self) -> [(&'static str, String); 3] {
        let display = if self.is_visible() { "flex" } else { "none" };
        [
            (
                SPLASH_ID,
                format!("display={display} opacity={:.3}", self.opacity),
            ),
            (
                PRELOAD_PROGRESS_ID,
                format!("{}/{}", self.progress_value, PROGRESS_MAX),
            ),
            (PRELOAD_TEXT_ID, self.progress_text()),
        ]
    }
}

impl Default for Splash {
    fn default() -> Self {
        Self::new()
    }
}
