use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::engine::step::Family;
use crate::{Error, Result};

/// UI speed assumed when nothing else was requested
pub const DEFAULT_SPEED: u8 = 50;

/// Maps a 0-100 UI speed to a per-step delay:
/// `delay = max(min_ms, base_ms - speed * per_percent_ms)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedProfile {
    pub base_ms: u64,
    pub min_ms: u64,
    pub per_percent_ms: u64,
}

impl SpeedProfile {
    pub const SORTING: SpeedProfile = SpeedProfile {
        base_ms: 1000,
        min_ms: 10,
        per_percent_ms: 10,
    };

    pub const SEARCHING: SpeedProfile = SpeedProfile {
        base_ms: 1000,
        min_ms: 50,
        per_percent_ms: 9,
    };

    pub const TRAVERSAL: SpeedProfile = SpeedProfile {
        base_ms: 1500,
        min_ms: 100,
        per_percent_ms: 14,
    };

    pub const PATHFINDING: SpeedProfile = SpeedProfile {
        base_ms: 200,
        min_ms: 10,
        per_percent_ms: 2,
    };

    pub fn for_family(family: Family) -> Self {
        match family {
            Family::Sorting => Self::SORTING,
            Family::Searching => Self::SEARCHING,
            Family::Traversal => Self::TRAVERSAL,
            Family::Pathfinding => Self::PATHFINDING,
        }
    }

    /// Per-step delay at `speed` (values above 100 are clamped)
    pub fn delay_for(&self, speed: u8) -> Duration {
        let speed = u64::from(speed.min(100));
        let ms = self
            .base_ms
            .saturating_sub(speed * self.per_percent_ms)
            .max(self.min_ms);
        Duration::from_millis(ms)
    }
}

/// Tunables shared by every run of a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// How often a paused run re-checks its flags
    pub pause_poll_interval: Duration,
    /// Speed a fresh controller starts at; delay hints play verbatim here
    pub default_speed: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pause_poll_interval: Duration::from_millis(100),
            default_speed: DEFAULT_SPEED,
        }
    }
}

/// Point-in-time view of a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    pub is_running: bool,
    pub is_paused: bool,
    pub step_delay_ms: u64,
    pub cancel_requested: bool,
    pub speed: u8,
}

/// Owns run/pause/stop/speed state for one visualizer instance.
///
/// The control methods only flip flags; the scheduler reads them once per
/// step boundary, so changes take effect on the next step.
#[derive(Debug)]
pub struct RunController {
    profile: SpeedProfile,
    config: EngineConfig,
    running: AtomicBool,
    paused: AtomicBool,
    cancel_requested: AtomicBool,
    speed: AtomicU8,
    /// Bumped by every accepted start; a run whose generation is stale is cancelled
    generation: AtomicU64,
}

impl RunController {
    pub fn new(profile: SpeedProfile) -> Self {
        Self::with_config(profile, EngineConfig::default())
    }

    pub fn with_config(profile: SpeedProfile, config: EngineConfig) -> Self {
        RunController {
            profile,
            config,
            running: AtomicBool::new(false),
            paused: AtomicBool::new(false),
            cancel_requested: AtomicBool::new(false),
            speed: AtomicU8::new(config.default_speed.min(100)),
            generation: AtomicU64::new(0),
        }
    }

    pub fn for_family(family: Family) -> Self {
        Self::new(SpeedProfile::for_family(family))
    }

    pub fn profile(&self) -> SpeedProfile {
        self.profile
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Claim the controller for a new run.
    ///
    /// Fails with [`Error::RunInProgress`] while another run holds it.
    pub fn begin(self: &Arc<Self>) -> Result<RunTicket> {
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("start rejected: a run is already active");
            return Err(Error::RunInProgress);
        }

        self.cancel_requested.store(false, Ordering::SeqCst);
        self.paused.store(false, Ordering::SeqCst);
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        Ok(RunTicket {
            controller: Arc::clone(self),
            generation,
        })
    }

    /// Pause the active run; returns false when nothing is running
    pub fn pause(&self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.paused.store(true, Ordering::SeqCst);
        info!("run paused");
        true
    }

    pub fn resume(&self) -> bool {
        let was_paused = self.paused.swap(false, Ordering::SeqCst);
        if was_paused {
            info!("run resumed");
        }
        was_paused
    }

    /// Flip between paused and running; returns the new paused flag
    pub fn toggle_pause(&self) -> bool {
        if self.is_paused() {
            self.resume();
            false
        } else {
            self.pause()
        }
    }

    /// Request cancellation; the run stops at its next step boundary
    pub fn stop(&self) {
        self.cancel_requested.store(true, Ordering::SeqCst);
        self.paused.store(false, Ordering::SeqCst);
        if self.running.swap(false, Ordering::SeqCst) {
            info!("run stop requested");
        }
    }

    /// Set the UI speed (0-100) and return the resulting per-step delay
    pub fn set_speed(&self, percent: u8) -> Duration {
        let percent = percent.min(100);
        self.speed.store(percent, Ordering::SeqCst);
        let delay = self.profile.delay_for(percent);
        debug!("speed set to {} ({} ms per step)", percent, delay.as_millis());
        delay
    }

    pub fn speed(&self) -> u8 {
        self.speed.load(Ordering::SeqCst)
    }

    pub fn step_delay(&self) -> Duration {
        self.profile.delay_for(self.speed())
    }

    /// Delay to sleep after a step.
    ///
    /// Without a hint this is the step delay. A hint is scaled by
    /// `step_delay / delay_at(default_speed)`, so at the default speed hints
    /// are used as given.
    pub fn scaled_delay(&self, hint: Option<Duration>) -> Duration {
        let current = self.step_delay();
        match hint {
            None => current,
            Some(hint) => {
                let reference = self.profile.delay_for(self.config.default_speed);
                if reference.is_zero() {
                    hint
                } else {
                    hint.mul_f64(current.as_secs_f64() / reference.as_secs_f64())
                }
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    pub fn is_cancel_requested(&self) -> bool {
        self.cancel_requested.load(Ordering::SeqCst)
    }

    pub fn state(&self) -> RunState {
        RunState {
            is_running: self.is_running(),
            is_paused: self.is_paused(),
            step_delay_ms: self.step_delay().as_millis() as u64,
            cancel_requested: self.is_cancel_requested(),
            speed: self.speed(),
        }
    }
}

/// Exclusive claim on a controller for the duration of one run.
///
/// Dropping the ticket returns the controller to idle unless a newer run
/// has already claimed it.
#[derive(Debug)]
pub struct RunTicket {
    controller: Arc<RunController>,
    generation: u64,
}

impl RunTicket {
    pub fn controller(&self) -> &RunController {
        &self.controller
    }

    pub fn is_cancelled(&self) -> bool {
        self.controller.is_cancel_requested()
            || self.controller.generation.load(Ordering::SeqCst) != self.generation
    }

    pub fn is_paused(&self) -> bool {
        self.controller.is_paused()
    }
}

impl Drop for RunTicket {
    fn drop(&mut self) {
        if self.controller.generation.load(Ordering::SeqCst) == self.generation {
            self.controller.paused.store(false, Ordering::SeqCst);
            self.controller.running.store(false, Ordering::SeqCst);
        }
    }
}
