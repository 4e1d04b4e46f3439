//! Draw-intent production
//!
//! `compose` turns the current game state into a [`Scene`]: an ordered list
//! of drawables in canvas space. It is a pure read of the state; the actual
//! rasterizer (Canvas 2D on wasm) just executes the ops back to front.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

use glam::Vec2;

use crate::sim::{GamePhase, GameState};

pub type Color = [f32; 4];

pub const COLOR_MENU_BG: Color = [0.13, 0.13, 0.13, 1.0];
pub const COLOR_BLACK: Color = [0.0, 0.0, 0.0, 1.0];
pub const COLOR_WHITE: Color = [1.0, 1.0, 1.0, 1.0];
pub const COLOR_BG_DIM: Color = [0.0, 0.0, 0.0, 0.25];
pub const COLOR_WRONG_FLASH: Color = [1.0, 0.0, 0.0, 0.3];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// One drawable element
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Full-screen flat fill
    Fill { color: Color },
    /// Full-screen background art, stretched to fit
    BackgroundImage,
    /// Solid rectangle, `pos` is the top-left corner
    Panel { pos: Vec2, size: Vec2, color: Color },
    /// Text anchored at `pos` per `align`
    Text {
        text: String,
        pos: Vec2,
        size_px: f32,
        color: Color,
        align: Align,
    },
    /// A falling digit glyph centered at `pos`
    Glyph { value: u8, pos: Vec2, size: f32 },
    /// Translucent full-screen tint over everything drawn so far
    Overlay { color: Color },
}

/// An ordered frame description, first op drawn first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub ops: Vec<DrawOp>,
}

/// Describe the current frame. `background_loaded` selects between the
/// background art and a flat fill while the asset is still in flight.
pub fn compose(state: &GameState, background_loaded: bool) -> Scene {
    let mut scene = Scene::default();
    match state.phase {
        GamePhase::Idle => compose_waiting(state, &mut scene),
        GamePhase::Playing | GamePhase::FeedbackCorrect | GamePhase::FeedbackWrong => {
            compose_game(state, background_loaded, &mut scene);
        }
        GamePhase::GameOver => compose_game_over(state, &mut scene),
    }
    scene
}

fn compose_waiting(state: &GameState, scene: &mut Scene) {
    let center = state.playfield / 2.0;
    scene.ops.push(DrawOp::Fill { color: COLOR_MENU_BG });
    scene.ops.push(DrawOp::Text {
        text: "Waiting for start".to_string(),
        pos: center,
        size_px: 48.0,
        color: COLOR_WHITE,
        align: Align::Center,
    });
}

fn compose_game(state: &GameState, background_loaded: bool, scene: &mut Scene) {
    let Vec2 { x: width, .. } = state.playfield;

    if background_loaded {
        scene.ops.push(DrawOp::BackgroundImage);
        scene.ops.push(DrawOp::Overlay { color: COLOR_BG_DIM });
    } else {
        scene.ops.push(DrawOp::Fill { color: COLOR_BLACK });
    }

    // Problem banner, top center
    if let Some(problem) = state.problem {
        scene.ops.push(DrawOp::Panel {
            pos: Vec2::new(width / 2.0 - 150.0, 20.0),
            size: Vec2::new(300.0, 80.0),
            color: COLOR_WHITE,
        });
        scene.ops.push(DrawOp::Text {
            text: format!("{} + {}", problem.a, problem.b),
            pos: Vec2::new(width / 2.0, 70.0),
            size_px: 36.0,
            color: COLOR_BLACK,
            align: Align::Center,
        });
    }

    for d in &state.digits {
        scene.ops.push(DrawOp::Glyph {
            value: d.value,
            pos: d.pos,
            size: d.size,
        });
    }

    scene.ops.push(DrawOp::Text {
        text: format!("Score: {}", state.score),
        pos: Vec2::new(20.0, 20.0),
        size_px: 24.0,
        color: COLOR_WHITE,
        align: Align::Left,
    });

    if state.phase == GamePhase::FeedbackWrong {
        scene.ops.push(DrawOp::Overlay {
            color: COLOR_WRONG_FLASH,
        });
    }
}

fn compose_game_over(state: &GameState, scene: &mut Scene) {
    let center = state.playfield / 2.0;
    scene.ops.push(DrawOp::Fill { color: COLOR_BLACK });
    scene.ops.push(DrawOp::Text {
        text: "Game Over".to_string(),
        pos: center,
        size_px: 48.0,
        color: COLOR_WHITE,
        align: Align::Center,
    });
    scene.ops.push(DrawOp::Text {
        text: format!("Score: {}", state.score),
        pos: center + Vec2::new(0.0, 60.0),
        size_px: 32.0,
        color: COLOR_WHITE,
        align: Align::Center,
    });
}
