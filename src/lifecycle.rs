//! Host lifecycle
//!
//! Owns the app phase, the run, and the input mapper. The host calls
//! [`Host::frame`] once per display refresh; ticks only happen while playing.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::input::{InputMapper, Key};
use crate::renderer::{Frame, RenderPass};
use crate::sim::{RaceState, RaceStats, SpawnRng, TickInput, TickOutcome, tick};
use crate::tuning::Tuning;

/// Frames the boot screen stays up unless a key skips it
pub const BOOT_FRAMES: u32 = 150;

/// Top-level app phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppPhase {
    /// Power-on animation
    Boot,
    /// Title screen, waiting for start
    Menu,
    /// A run is in progress
    Playing,
    /// Run ended, showing stats
    GameOver,
}

/// Things that move the app between phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    BootComplete,
    Start,
    Crashed,
    Retry,
}

impl AppPhase {
    /// Transition table; `None` means the event is ignored in this phase
    pub fn next(self, event: AppEvent) -> Option<AppPhase> {
        use AppEvent::*;
        use AppPhase::*;
        match (self, event) {
            (Boot, BootComplete) => Some(Menu),
            (Menu, Start) => Some(Playing),
            (Playing, Crashed) => Some(GameOver),
            (GameOver, Retry) => Some(Playing),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AppPhase::Boot => "Boot",
            AppPhase::Menu => "Menu",
            AppPhase::Playing => "Playing",
            AppPhase::GameOver => "GameOver",
        }
    }
}

/// Drives one session: phase machine, run state, input, stats hand-off
#[derive(Debug)]
pub struct Host<R = Pcg32> {
    phase: AppPhase,
    race: RaceState<R>,
    input: InputMapper,
    last_stats: Option<RaceStats>,
    boot_frames: u32,
    runs_started: u32,
}

impl Host<Pcg32> {
    /// New session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(Tuning::default(), seed)
    }

    pub fn with_tuning(tuning: Tuning, seed: u64) -> Self {
        Self::with_race(RaceState::with_rng(tuning, seed, Pcg32::seed_from_u64(seed)))
    }
}

impl<R: SpawnRng> Host<R> {
    /// Wrap an existing run (e.g. one with a scripted RNG)
    pub fn with_race(race: RaceState<R>) -> Self {
        let input = InputMapper::new(&race.tuning);
        Self {
            phase: AppPhase::Boot,
            race,
            input,
            last_stats: None,
            boot_frames: 0,
            runs_started: 0,
        }
    }

    pub fn phase(&self) -> AppPhase {
        self.phase
    }

    pub fn race(&self) -> &RaceState<R> {
        &self.race
    }

    /// Mutable run access for scripted setups
    pub fn race_mut(&mut self) -> &mut RaceState<R> {
        &mut self.race
    }

    pub fn input(&self) -> &InputMapper {
        &self.input
    }

    /// Stats of the most recent finished run
    pub fn last_stats(&self) -> Option<&RaceStats> {
        self.last_stats.as_ref()
    }

    pub fn runs_started(&self) -> u32 {
        self.runs_started
    }

    /// Apply an event through the transition table. Returns true if it moved.
    pub fn handle(&mut self, event: AppEvent) -> bool {
        let Some(next) = self.phase.next(event) else {
            log::debug!("ignored {:?} in {}", event, self.phase.as_str());
            return false;
        };

        log::info!("{} -> {}", self.phase.as_str(), next.as_str());
        self.phase = next;
        if next == AppPhase::Playing {
            self.start_run();
        }
        true
    }

    fn start_run(&mut self) {
        self.race.reset();
        self.input.reset();
        self.runs_started += 1;
        log::info!("run {} started (seed {})", self.runs_started, self.race.seed);
    }

    /// Start from the menu or retry after a crash
    pub fn confirm(&mut self) -> bool {
        match self.phase {
            AppPhase::Boot => self.handle(AppEvent::BootComplete),
            AppPhase::Menu => self.handle(AppEvent::Start),
            AppPhase::GameOver => self.handle(AppEvent::Retry),
            AppPhase::Playing => false,
        }
    }

    /// Keyboard input. Steering only counts while playing.
    pub fn key_down(&mut self, key: Key) {
        match (self.phase, key) {
            (AppPhase::Playing, Key::Left | Key::Right) => {
                self.input.key_down(key);
            }
            (AppPhase::Boot, _) => {
                self.handle(AppEvent::BootComplete);
            }
            (AppPhase::Menu | AppPhase::GameOver, Key::Confirm) => {
                self.confirm();
            }
            _ => {}
        }
    }

    pub fn touch_start(&mut self, x: f32) {
        if self.phase == AppPhase::Playing {
            self.input.pointer_down(x);
        }
    }

    pub fn touch_move(&mut self, x: f32) {
        if self.phase == AppPhase::Playing {
            self.input.pointer_move(x);
        }
    }

    pub fn touch_end(&mut self) {
        self.input.pointer_up();
    }

    /// One display refresh. Returns the run's stats on the frame it ends.
    ///
    /// If the renderer can't take a frame, nothing is ticked or drawn.
    pub fn frame<P: RenderPass + ?Sized>(&mut self, renderer: &mut P) -> Option<RaceStats> {
        if !renderer.begin_frame() {
            log::trace!("surface unavailable, frame skipped");
            return None;
        }

        let mut finished = None;
        match self.phase {
            AppPhase::Boot => {
                self.boot_frames += 1;
                if self.boot_frames >= BOOT_FRAMES {
                    self.handle(AppEvent::BootComplete);
                }
            }
            AppPhase::Playing => {
                let input = TickInput {
                    lane: self.input.desired_lane(),
                };
                if let TickOutcome::Finished(stats) = tick(&mut self.race, &input) {
                    log::info!(
                        "run over: score {} distance {:.0} speed {:.2} ({})",
                        stats.score,
                        stats.distance,
                        stats.top_speed,
                        stats.cause_of_death
                    );
                    self.last_stats = Some(stats.clone());
                    self.input.pointer_up();
                    self.handle(AppEvent::Crashed);
                    finished = Some(stats);
                }
            }
            AppPhase::Menu | AppPhase::GameOver => {}
        }

        renderer.draw(&Frame::new(self.phase, &self.race));
        finished
    }
}
