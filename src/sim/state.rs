//! Game state and core types
//!
//! All round/session state lives here, owned by one `GameState`. Mutation
//! happens only through the state machine in `tick`; everything else
//! (rendering, announcements) reads or consumes events.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::lanes::LaneLayout;
use super::problem::Problem;
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the operator to start a session
    Idle,
    /// Active gameplay: digits falling, clicks resolved against them
    Playing,
    /// Brief hold after a correct answer, before the next round
    FeedbackCorrect,
    /// Brief hold after a wrong answer, before resuming the same round
    FeedbackWrong,
    /// Session finished; a click dismisses back to Idle
    GameOver,
}

/// A falling digit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Digit {
    /// Displayed value, `1..=9`
    pub value: u8,
    /// Center of the square hit box; `x` is fixed at a lane center for life
    pub pos: Vec2,
    /// Fall speed in units/second, constant after spawn
    pub speed: f32,
    /// Hit box side length
    pub size: f32,
}

impl Digit {
    /// Axis-aligned containment test against the digit's square hit box
    pub fn contains(&self, point: Vec2) -> bool {
        let half = self.size / 2.0;
        point.x >= self.pos.x - half
            && point.x <= self.pos.x + half
            && point.y >= self.pos.y - half
            && point.y <= self.pos.y + half
    }
}

/// Side effects requested by the state machine, drained by the host each
/// frame. The sim itself never talks to speech or the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A new round began with this problem; hosts read it aloud
    AnnounceProblem { a: u8, b: u8 },
    /// The player clicked the right digit
    AnnounceCorrect { a: u8, b: u8, answer: u8 },
    /// The player clicked a wrong digit
    AnnounceWrong,
    /// All rounds have been played
    SessionEnded { score: u32 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Canvas-space playfield size (width, height)
    pub playfield: Vec2,
    pub lanes: LaneLayout,
    /// The live problem; `None` only outside a session
    pub problem: Option<Problem>,
    /// Falling digits in spawn order
    pub digits: Vec<Digit>,
    pub score: u32,
    pub rounds_played: u32,
    pub max_rounds: u32,
    /// Accumulated play time since the last spawn attempt
    pub spawn_timer: f32,
    /// Remaining feedback hold, counts down while in a feedback phase
    pub feedback_timer: f32,
    /// Pending side effects, oldest first
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            playfield: Vec2::ZERO,
            lanes: LaneLayout::new(),
            problem: None,
            digits: Vec::new(),
            score: 0,
            rounds_played: 0,
            max_rounds: DEFAULT_MAX_ROUNDS,
            spawn_timer: 0.0,
            feedback_timer: 0.0,
            events: Vec::new(),
        }
    }

    pub fn set_playfield(&mut self, width: f32, height: f32) {
        self.playfield = Vec2::new(width, height);
    }

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Full reset back to Idle: score, round counter and digits all cleared
    pub fn reset_game(&mut self) {
        self.phase = GamePhase::Idle;
        self.score = 0;
        self.rounds_played = 0;
        self.digits.clear();
        self.problem = None;
        self.spawn_timer = 0.0;
        self.feedback_timer = 0.0;
    }

    /// Begin a fresh round: new problem, cleared field, back to Playing
    pub fn start_round(&mut self) {
        let problem = Problem::generate(&mut self.rng);
        self.problem = Some(problem);
        self.digits.clear();
        self.spawn_timer = 0.0;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::AnnounceProblem {
            a: problem.a,
            b: problem.b,
        });
    }

    /// Remote start: valid from any phase, replaces the session outright
    pub fn external_start(&mut self, rounds: u32) {
        self.max_rounds = rounds.max(1);
        self.score = 0;
        self.rounds_played = 0;
        self.digits.clear();
        self.start_round();
        log::info!("session started, {} rounds", self.max_rounds);
    }

    /// Remote stop: valid from any phase
    pub fn external_stop(&mut self) {
        self.reset_game();
        log::info!("session stopped");
    }
}
