//! Two-loop cooperative scheduler.
//!
//! - think loop: fixed rate, self-correcting. `next_tick` advances by exactly
//!   `tick_rate_ms` per cycle, so time spent inside a tick is absorbed; under
//!   overload the wait clamps to zero and ticks run back to back.
//! - render loop: aligned to a vsync grid of `vsync_hz`. With a frame cap the
//!   next frame waits `round(1000 / fps)` ms and then for the next vsync
//!   boundary; uncapped it renders on every boundary.
//!
//! Both loops run on the caller's thread, one cycle at a time, so a cycle
//! never overlaps another. Times are milliseconds on the [`Clock`]; the
//! scene sees them relative to [`Scheduler::start`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use log::{info, warn};

use crate::resources::sceneconfig::SceneConfig;
use crate::scene::Scene;

pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin. Never decreases.
    fn now_ms(&self) -> u64;

    fn sleep_ms(&self, ms: u64);
}

/// Monotonic wall clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    fn sleep_ms(&self, ms: u64) {
        if ms > 0 {
            std::thread::sleep(Duration::from_millis(ms));
        }
    }
}

/// Clock that only moves when told to. Sleeping advances it instantly.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: AtomicU64::new(start_ms),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }

    pub fn set(&self, ms: u64) {
        self.now.fetch_max(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }

    fn sleep_ms(&self, ms: u64) {
        self.advance(ms);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Running {
    start_ms: u64,
    next_tick_ms: u64,
    next_frame_ms: u64,
}

#[derive(Debug, Clone)]
pub struct Scheduler {
    tick_rate_ms: u64,
    /// 0 when uncapped.
    frame_interval_ms: u64,
    vsync_hz: u64,
    running: Option<Running>,
}

impl Scheduler {
    pub fn new(config: &SceneConfig) -> Self {
        let frame_interval_ms = match config.target_fps {
            0 => 0,
            fps => (1000.0 / fps as f64).round() as u64,
        };
        Self {
            tick_rate_ms: config.tick_rate_ms.max(1),
            frame_interval_ms,
            vsync_hz: u64::from(config.vsync_hz.max(1)),
            running: None,
        }
    }

    pub fn is_started(&self) -> bool {
        self.running.is_some()
    }

    /// Start both loops at `now_ms`: the first tick and frame are due
    /// immediately. Returns `false` and keeps the current schedule if
    /// already started.
    pub fn start(&mut self, now_ms: u64) -> bool {
        if self.running.is_some() {
            warn!("scheduler already started");
            return false;
        }
        self.running = Some(Running {
            start_ms: now_ms,
            next_tick_ms: now_ms,
            next_frame_ms: now_ms,
        });
        info!(
            "scheduler started: tick {}ms, frame interval {}ms, vsync {}Hz",
            self.tick_rate_ms, self.frame_interval_ms, self.vsync_hz
        );
        true
    }

    /// Absolute time of the next think tick.
    pub fn next_tick_ms(&self) -> Option<u64> {
        self.running.map(|r| r.next_tick_ms)
    }

    /// Absolute time of the next render frame.
    pub fn next_frame_ms(&self) -> Option<u64> {
        self.running.map(|r| r.next_frame_ms)
    }

    /// First vsync boundary at or after `at_ms`, on the grid anchored at
    /// `start_ms`.
    fn vsync_at_or_after(&self, start_ms: u64, at_ms: u64) -> u64 {
        let rel = at_ms.saturating_sub(start_ms);
        if rel == 0 {
            return start_ms;
        }
        // boundary k sits at ceil(k * 1000 / hz)
        let k = (rel - 1) * self.vsync_hz / 1000 + 1;
        start_ms + (k * 1000).div_ceil(self.vsync_hz)
    }

    /// Run whichever cycles are due at `now_ms` (think before render) and
    /// return the wait until the next one. `None` if not started.
    pub fn step(&mut self, scene: &mut Scene, now_ms: u64) -> Option<u64> {
        let mut r = self.running?;
        let scene_ms = now_ms.saturating_sub(r.start_ms);

        if now_ms >= r.next_tick_ms {
            scene.think_tick(scene_ms);
            r.next_tick_ms += self.tick_rate_ms;
        }

        if now_ms >= r.next_frame_ms {
            scene.render_frame(scene_ms);
            r.next_frame_ms = if self.frame_interval_ms == 0 {
                self.vsync_at_or_after(r.start_ms, now_ms + 1)
            } else {
                self.vsync_at_or_after(r.start_ms, now_ms + self.frame_interval_ms)
            };
        }

        self.running = Some(r);
        Some(r.next_tick_ms.min(r.next_frame_ms).saturating_sub(now_ms))
    }

    /// Blocking driver: start (if needed) and run until `duration_ms` of
    /// scene time have passed.
    pub fn run(&mut self, scene: &mut Scene, clock: &impl Clock, duration_ms: u64) {
        self.start(clock.now_ms());
        let Some(start_ms) = self.running.map(|r| r.start_ms) else {
            return;
        };
        loop {
            let now = clock.now_ms();
            if now.saturating_sub(start_ms) >= duration_ms {
                break;
            }
            let Some(wait) = self.step(scene, now) else {
                break;
            };
            clock.sleep_ms(wait);
        }
        let time = scene.time();
        info!(
            "scheduler stopped after {}ms: {} ticks, {} frames",
            duration_ms, time.tick_count, time.frame_count
        );
    }
}
