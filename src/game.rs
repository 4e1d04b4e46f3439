//! The game capability interface and its one concrete implementation
//!
//! Hosts drive a game through three calls: `start` once, `update` every
//! frame, `on_click` per pointer press. `MathfallGame` wires the sim to the
//! announcer and render-intent producer; platform glue (asset loading,
//! speech, the control socket) stays outside.

use glam::Vec2;

use crate::announce::{self, Announcer};
use crate::render::{self, Scene};
use crate::settings::Settings;
use crate::sim::{self, GameEvent, GameState, Time};

/// A per-frame game the host can drive
pub trait Game {
    /// First-frame setup
    fn start(&mut self);
    /// Advance one frame
    fn update(&mut self, time: Time);
    /// Pointer press in canvas coordinates, already resize-corrected
    fn on_click(&mut self, x: f32, y: f32);
}

/// The falling-digits addition game
pub struct MathfallGame {
    state: GameState,
    settings: Settings,
    announcer: Box<dyn Announcer>,
    background_loaded: bool,
    /// Events drained on the last update, kept for host-side effects
    last_events: Vec<GameEvent>,
}

impl MathfallGame {
    pub fn new(seed: u64, settings: Settings, announcer: Box<dyn Announcer>) -> Self {
        Self {
            state: GameState::new(seed),
            settings,
            announcer,
            background_loaded: false,
            last_events: Vec::new(),
        }
    }

    /// Host callback once the background asset finished loading. Until then
    /// frames render with a flat fill.
    pub fn set_background_loaded(&mut self, loaded: bool) {
        self.background_loaded = loaded;
    }

    pub fn set_playfield(&mut self, width: f32, height: f32) {
        self.state.set_playfield(width, height);
    }

    /// Remote-control entry: begin a session of `rounds` rounds, from any phase
    pub fn external_start(&mut self, rounds: u32) {
        self.state.external_start(rounds);
        self.forward_events();
    }

    /// Remote-control entry: abort to Idle, from any phase
    pub fn external_stop(&mut self) {
        self.state.external_stop();
        self.forward_events();
    }

    /// Describe the current frame for the rasterizer
    pub fn scene(&self) -> Scene {
        render::compose(
            &self.state,
            self.background_loaded && self.settings.background_art,
        )
    }

    /// Events drained on the most recent state change, oldest first
    pub fn last_events(&self) -> &[GameEvent] {
        &self.last_events
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn forward_events(&mut self) {
        self.last_events = self.state.drain_events();
        if self.settings.speech {
            announce::announce_all(self.announcer.as_mut(), &self.last_events);
        }
    }
}

impl Game for MathfallGame {
    fn start(&mut self) {
        self.state.reset_game();
        log::info!("game ready, waiting for start");
    }

    fn update(&mut self, time: Time) {
        sim::tick(&mut self.state, time.delta_time);
        self.forward_events();
    }

    fn on_click(&mut self, x: f32, y: f32) {
        sim::on_click(&mut self.state, Vec2::new(x, y));
        self.forward_events();
    }
}
