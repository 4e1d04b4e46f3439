//! Deterministic game logic
//!
//! Everything gameplay lives here and must stay pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies; side effects leave the
//!   sim as queued [`GameEvent`]s

pub mod clock;
pub mod lanes;
pub mod problem;
pub mod state;
pub mod tick;

pub use clock::{Clock, Time};
pub use lanes::LaneLayout;
pub use problem::Problem;
pub use state::{Digit, GameEvent, GamePhase, GameState};
pub use tick::{on_click, tick};
