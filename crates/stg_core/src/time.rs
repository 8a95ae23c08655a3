use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Per-scene monotonic clock.
///
/// Elapsed time is accumulated in whole microseconds and `now` is published in
/// whole milliseconds, so every `now` value is an integral `f64` and
/// `now - frame_ms` reproduces the previous frame's `now` exactly. Edge
/// timestamps and query `now` values must both be read from here, so `now` is
/// shared through [`ClockHandle`]s instead of being re-measured.
pub struct SceneClock {
    now: Rc<Cell<f64>>,
    elapsed_us: u64,
    pub max_frame_ms: f64,
    pub frame_count: u64,
    /// Measured wall-clock duration of the last frame, after capping.
    pub real_dt_ms: f64,
    /// How far `now` moved during the last frame. Zero when the frame was
    /// shorter than a millisecond.
    pub frame_ms: f64,
    last_instant: Instant,
}

/// Read-only view of a [`SceneClock`]'s current time.
#[derive(Debug, Clone)]
pub struct ClockHandle(Rc<Cell<f64>>);

impl ClockHandle {
    pub fn now(&self) -> f64 {
        self.0.get()
    }
}

impl SceneClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(0.0)),
            elapsed_us: 0,
            max_frame_ms: 250.0,
            frame_count: 0,
            real_dt_ms: 0.0,
            frame_ms: 0.0,
            last_instant: Instant::now(),
        }
    }

    pub fn now(&self) -> f64 {
        self.now.get()
    }

    pub fn handle(&self) -> ClockHandle {
        ClockHandle(self.now.clone())
    }

    /// Measure wall-clock time since the previous frame and start a new frame.
    pub fn begin_frame(&mut self) {
        let instant = Instant::now();
        let mut dt_ms = instant.duration_since(self.last_instant).as_secs_f64() * 1000.0;
        self.last_instant = instant;

        // A stalled frame (debugger, window drag) should not look like a
        // multi-second hold to edge queries.
        if dt_ms > self.max_frame_ms {
            log::warn!(
                "Frame took {:.1}ms, capping clock advance to {}ms",
                dt_ms,
                self.max_frame_ms
            );
            dt_ms = self.max_frame_ms;
        }

        self.real_dt_ms = dt_ms;
        self.step_frame(dt_ms);
    }

    /// Start a new frame `dt_ms` after the previous one.
    pub fn step_frame(&mut self, dt_ms: f64) {
        let before = self.now();
        self.advance(dt_ms);
        self.frame_ms = self.now() - before;
        self.frame_count += 1;
    }

    /// Move the clock forward without starting a frame. Negative steps are
    /// ignored.
    pub fn advance(&mut self, dt_ms: f64) {
        if dt_ms > 0.0 {
            self.elapsed_us += (dt_ms * 1000.0).round() as u64;
            self.now.set((self.elapsed_us / 1000) as f64);
        }
    }
}

impl Default for SceneClock {
    fn default() -> Self {
        Self::new()
    }
}
