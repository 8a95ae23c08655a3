//! The initial scene: preloads the `core` asset pack behind the splash overlay
//! and reacts to a couple of normalized inputs.

use std::path::{Path, PathBuf};

use stg_core::manifest::load_manifest_from_path;
use stg_core::splash::DEFAULT_FADE_DURATION_MS;
use stg_core::{InputEventHub, InputState, NormalizedInput, Splash};

use crate::loader::PackLoader;
use crate::plugin::NormalizedInputPlugin;

const CORE_SECTION: &str = "core";
const SPLASH_FADE_DELAY_MS: f64 = 2000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageAction {
    Continue,
    Exit,
}

pub struct Stage {
    input: NormalizedInputPlugin,
    splash: Splash,
    loader: PackLoader,
    manifest_path: PathBuf,
    paused: bool,
}

impl Stage {
    pub fn new(input: NormalizedInputPlugin, manifest_path: PathBuf) -> Self {
        Self {
            input,
            splash: Splash::new(),
            loader: PackLoader::new(Vec::new()),
            manifest_path,
            paused: false,
        }
    }

    pub fn start(&mut self, hub: &mut InputEventHub) {
        self.input.start(hub);
        self.preload();
    }

    pub fn destroy(&mut self, hub: &mut InputEventHub) {
        self.input.destroy(hub);
    }

    fn preload(&mut self) {
        self.splash.run(DEFAULT_FADE_DURATION_MS, SPLASH_FADE_DELAY_MS);

        match load_manifest_from_path(&self.manifest_path) {
            Ok(manifest) => {
                let base_dir = self.manifest_path.parent().unwrap_or(Path::new("."));
                match manifest.section(CORE_SECTION) {
                    Some(section) => {
                        self.loader = PackLoader::from_section(section, base_dir);
                        log::info!(
                            "Preloading {} '{}' assets from {}",
                            section.files.len(),
                            CORE_SECTION,
                            self.manifest_path.display()
                        );
                    }
                    None => log::warn!(
                        "Manifest {} has no '{}' section, nothing to preload",
                        self.manifest_path.display(),
                        CORE_SECTION
                    ),
                }
            }
            Err(err) => log::error!("{err}"),
        }

        self.splash.on_progress(self.loader.progress());
    }

    /// Run one frame. `frame_ms` is how far the clock moved since the previous
    /// frame and doubles as the forgiveness window: input events are stamped
    /// with the previous frame's `now`, so each transition is seen by exactly
    /// one frame. Frames where the clock did not move skip edge queries.
    pub fn update(&mut self, now: f64, frame_ms: f64) -> StageAction {
        if !self.loader.is_complete() {
            if let Some(Err(err)) = self.loader.load_next() {
                log::warn!("{err}");
            }
            self.splash.on_progress(self.loader.progress());
            if self.loader.is_complete() {
                log::info!(
                    "Preload finished: {} bytes, {} failed",
                    self.loader.loaded_bytes(),
                    self.loader.failed()
                );
            }
        }
        self.splash.tick(now);

        if frame_ms <= 0.0 {
            return StageAction::Continue;
        }

        if self
            .input
            .query(NormalizedInput::Pause, InputState::JustPressed, frame_ms)
        {
            self.paused = !self.paused;
            log::info!("Paused: {}", self.paused);
        }
        if self.paused
            && self
                .input
                .query(NormalizedInput::Cancel, InputState::JustPressed, frame_ms)
        {
            log::info!("Cancel while paused, leaving stage");
            return StageAction::Exit;
        }

        StageAction::Continue
    }

    pub fn splash(&self) -> &Splash {
        &self.splash
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;
    use std::rc::Rc;
    use std::time::{SystemTime, UNIX_EPOCH};
    use stg_core::{GamepadButton, InputNormalizer, PhysicalInput, RawInputEvent, SceneClock};

    fn temp_dir(name_hint: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "stg_stage_test_{}_{}_{}",
            name_hint,
            std::process::id(),
            nanos
        ));
        fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    fn stage_for(manifest_path: PathBuf) -> (Stage, SceneClock, InputEventHub) {
        let store = Rc::new(RefCell::new(InputNormalizer::new()));
        let clock = SceneClock::new();
        let plugin = NormalizedInputPlugin::new(store, clock.handle());
        (Stage::new(plugin, manifest_path), clock, InputEventHub::new())
    }

    #[test]
    fn preload_drives_splash_to_hidden() {
        let dir = temp_dir("preload");
        fs::write(dir.join("a.txt"), b"a").expect("write asset");
        fs::write(dir.join("b.txt"), b"bb").expect("write asset");
        let manifest = dir.join("manifest.json");
        fs::write(
            &manifest,
            r#"{ "core": { "files": [
                { "type": "text", "key": "a", "url": "a.txt" },
                { "type": "text", "key": "b", "url": "b.txt" }
            ] } }"#,
        )
        .expect("write manifest");

        let (mut stage, mut clock, mut hub) = stage_for(manifest);
        stage.start(&mut hub);
        assert_eq!(stage.splash().progress_text(), "0%");

        stage.update(clock.now(), 16.0);
        assert_eq!(stage.splash().progress_text(), "50%");
        clock.advance(16.0);
        stage.update(clock.now(), 16.0);
        assert_eq!(stage.splash().progress_text(), "100%");

        for _ in 0..250 {
            clock.advance(16.0);
            stage.update(clock.now(), 16.0);
        }
        assert!(!stage.splash().is_visible());

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn missing_manifest_completes_immediately() {
        let dir = temp_dir("missing");
        let (mut stage, clock, mut hub) = stage_for(dir.join("nope.json"));
        stage.start(&mut hub);
        assert_eq!(stage.splash().progress_text(), "100%");
        assert_eq!(stage.update(clock.now(), 16.0), StageAction::Continue);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn pause_then_cancel_exits() {
        let dir = temp_dir("input");
        let (mut stage, mut clock, mut hub) = stage_for(dir.join("nope.json"));
        stage.start(&mut hub);

        hub.dispatch(&RawInputEvent::down(PhysicalInput::key("KeyP")));
        clock.advance(16.0);
        assert_eq!(stage.update(clock.now(), 16.0), StageAction::Continue);
        assert!(stage.is_paused());

        // Held key is not "just pressed" on the next frame.
        clock.advance(16.0);
        stage.update(clock.now(), 16.0);
        assert!(stage.is_paused());

        hub.dispatch(&RawInputEvent::down(PhysicalInput::key("Backspace")));
        clock.advance(16.0);
        assert_eq!(stage.update(clock.now(), 16.0), StageAction::Exit);

        stage.destroy(&mut hub);
        assert_eq!(hub.subscriber_count(), 0);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn gamepad_press_toggles_pause_once() {
        let dir = temp_dir("gamepad");
        let (mut stage, mut clock, mut hub) = stage_for(dir.join("nope.json"));
        stage.start(&mut hub);

        clock.step_frame(16.0);
        stage.update(clock.now(), clock.frame_ms);

        hub.dispatch(&RawInputEvent::down(PhysicalInput::button(GamepadButton::Start)));
        clock.step_frame(16.0);
        stage.update(clock.now(), clock.frame_ms);
        assert!(stage.is_paused());

        clock.step_frame(16.0);
        stage.update(clock.now(), clock.frame_ms);
        assert!(stage.is_paused());
        clock.step_frame(16.0);
        stage.update(clock.now(), clock.frame_ms);
        assert!(stage.is_paused());

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn every_key_press_is_seen_with_uneven_frames() {
        let dir = temp_dir("uneven");
        let (mut stage, mut clock, mut hub) = stage_for(dir.join("nope.json"));
        stage.start(&mut hub);

        for i in 0..200 {
            clock.step_frame(16.0 + i as f64 * 0.0137);
            stage.update(clock.now(), clock.frame_ms);
            let was_paused = stage.is_paused();

            hub.dispatch(&RawInputEvent::down(PhysicalInput::key("KeyP")));
            clock.step_frame(16.6667 + i as f64 * 0.0071);
            stage.update(clock.now(), clock.frame_ms);
            assert_ne!(stage.is_paused(), was_paused, "press {i} was lost");

            hub.dispatch(&RawInputEvent::up(PhysicalInput::key("KeyP")));
            clock.step_frame(16.6667);
            stage.update(clock.now(), clock.frame_ms);
            assert_ne!(stage.is_paused(), was_paused, "press {i} was seen twice");
        }

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn press_during_stalled_frame_is_seen_on_next_frame() {
        let dir = temp_dir("stalled");
        let (mut stage, mut clock, mut hub) = stage_for(dir.join("nope.json"));
        stage.start(&mut hub);

        clock.step_frame(16.0);
        stage.update(clock.now(), clock.frame_ms);
        hub.dispatch(&RawInputEvent::down(PhysicalInput::key("KeyP")));

        clock.step_frame(0.3);
        assert_eq!(clock.frame_ms, 0.0);
        stage.update(clock.now(), clock.frame_ms);
        assert!(!stage.is_paused());

        clock.step_frame(16.0);
        stage.update(clock.now(), clock.frame_ms);
        assert!(stage.is_paused());
        clock.step_frame(16.0);
        stage.update(clock.now(), clock.frame_ms);
        assert!(stage.is_paused());

        let _ = fs::remove_dir_all(dir);
    }
}
