//! Per-frame update and click resolution
//!
//! The round state machine lives here. One `tick` call advances the
//! simulation by the frame's delta; `on_click` resolves a pointer press
//! synchronously between ticks.

use glam::Vec2;
use rand::Rng;

use super::state::{Digit, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Advance the session by one frame
pub fn tick(state: &mut GameState, dt: f32) {
    state.lanes.reconcile(state.playfield.x);

    match state.phase {
        GamePhase::Idle | GamePhase::GameOver => {}
        GamePhase::Playing => {
            state.spawn_timer += dt;
            if state.spawn_timer > SPAWN_INTERVAL {
                state.spawn_timer = 0.0;
                spawn_digit(state);
            }
            advance_digits(state, dt);
        }
        GamePhase::FeedbackCorrect | GamePhase::FeedbackWrong => {
            // Digits keep falling during feedback, but nothing new spawns
            advance_digits(state, dt);
            update_feedback(state, dt);
        }
    }
}

/// Resolve a click at canvas-space `point`
pub fn on_click(state: &mut GameState, point: Vec2) {
    match state.phase {
        GamePhase::Playing => resolve_hit(state, point),
        GamePhase::GameOver => state.reset_game(),
        // Idle and feedback holds ignore input
        _ => {}
    }
}

/// One spawn attempt. Lane-local and single-shot: a blocked lane skips the
/// whole cycle rather than retrying elsewhere, trading spawn regularity for
/// visual non-overlap near the top of the screen.
fn spawn_digit(state: &mut GameState) {
    if state.lanes.is_empty() {
        return;
    }

    let lane = state.rng.random_range(0..state.lanes.len());
    let x = state.lanes.centers()[lane];

    let blocked = state
        .digits
        .iter()
        .any(|d| (d.pos.x - x).abs() < STACK_TOLERANCE && d.pos.y < STACK_CLEARANCE);
    if blocked {
        return;
    }

    let value: u8 = state.rng.random_range(1..=9);
    let speed = FALL_SPEED_BASE + state.rng.random_range(0.0..FALL_SPEED_SPREAD);
    state.digits.push(Digit {
        value,
        pos: Vec2::new(x, -DIGIT_SIZE / 2.0),
        speed,
        size: DIGIT_SIZE,
    });
}

/// Move every digit down, then cull those fully past the bottom edge.
/// Retain keeps survivor order stable for the hit tester.
fn advance_digits(state: &mut GameState, dt: f32) {
    for d in &mut state.digits {
        d.pos.y += d.speed * dt;
    }
    let floor = state.playfield.y + CULL_MARGIN;
    state.digits.retain(|d| d.pos.y < floor);
}

fn update_feedback(state: &mut GameState, dt: f32) {
    state.feedback_timer -= dt;
    if state.feedback_timer > 0.0 {
        return;
    }

    match state.phase {
        GamePhase::FeedbackCorrect => {
            state.rounds_played += 1;
            if state.rounds_played >= state.max_rounds {
                state.phase = GamePhase::GameOver;
                state.events.push(GameEvent::SessionEnded { score: state.score });
            } else {
                state.start_round();
            }
        }
        // A wrong answer costs nothing but the clicked digit: same problem,
        // same round, unlimited retries
        GamePhase::FeedbackWrong => state.phase = GamePhase::Playing,
        _ => {}
    }
}

/// First-match hit test in spawn order; at most one digit per click
fn resolve_hit(state: &mut GameState, point: Vec2) {
    let Some(problem) = state.problem else { return };
    let Some(idx) = state.digits.iter().position(|d| d.contains(point)) else {
        return;
    };

    if state.digits[idx].value == problem.answer {
        state.score += 1;
        state.digits.clear();
        state.phase = GamePhase::FeedbackCorrect;
        state.feedback_timer = FEEDBACK_CORRECT_SECS;
        state.events.push(GameEvent::AnnounceCorrect {
            a: problem.a,
            b: problem.b,
            answer: problem.answer,
        });
    } else {
        state.digits.remove(idx);
        state.phase = GamePhase::FeedbackWrong;
        state.feedback_timer = FEEDBACK_WRONG_SECS;
        state.events.push(GameEvent::AnnounceWrong);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A started session on a 1920x1080 playfield
    fn playing_state(seed: u64, rounds: u32) -> GameState {
        let mut state = GameState::new(seed);
        state.set_playfield(1920.0, 1080.0);
        state.external_start(rounds);
        state.drain_events();
        state
    }

    fn push_digit(state: &mut GameState, value: u8, x: f32, y: f32) {
        state.digits.push(Digit {
            value,
            pos: Vec2::new(x, y),
            speed: 100.0,
            size: DIGIT_SIZE,
        });
    }

    /// A value in `1..=9` that is not the current answer
    fn wrong_value(state: &GameState) -> u8 {
        let answer = state.problem.unwrap().answer;
        if answer == 5 { 6 } else { 5 }
    }

    #[test]
    fn test_spawn_cadence() {
        let mut state = playing_state(1, 10);
        tick(&mut state, 0.5);
        assert!(state.digits.is_empty(), "nothing before the interval");
        tick(&mut state, 0.3);
        assert_eq!(state.digits.len(), 1);
        assert_eq!(state.spawn_timer, 0.0, "timer resets on fire");
        let d = state.digits[0];
        assert!((1..=9).contains(&d.value));
        assert_eq!(d.pos.y, -DIGIT_SIZE / 2.0);
        assert!(d.speed >= FALL_SPEED_BASE && d.speed < FALL_SPEED_BASE + FALL_SPEED_SPREAD);
        assert!(state.lanes.centers().contains(&d.pos.x));
    }

    #[test]
    fn test_spawn_skipped_when_lane_blocked() {
        // Width fits exactly one lane, so the spawner has no alternative
        let mut state = playing_state(2, 10);
        state.set_playfield(200.0, 1080.0);
        state.lanes = crate::sim::LaneLayout::new();

        tick(&mut state, 0.8);
        assert_eq!(state.lanes.len(), 1);
        assert_eq!(state.digits.len(), 1);

        // Fresh digit still within the clearance zone: next cycle skips
        tick(&mut state, 0.8);
        assert_eq!(state.digits.len(), 1, "blocked lane skips the cycle");
    }

    #[test]
    fn test_spawn_noop_without_lanes() {
        let mut state = playing_state(3, 10);
        state.set_playfield(50.0, 1080.0);
        state.lanes = crate::sim::LaneLayout::new();
        for _ in 0..10 {
            tick(&mut state, 0.8);
        }
        assert!(state.digits.is_empty());
    }

    #[test]
    fn test_motion_and_culling() {
        let mut state = playing_state(4, 10);
        push_digit(&mut state, 3, 76.0, 0.0);
        push_digit(&mut state, 7, 76.0, 1125.0);
        let survivor = state.digits[0];

        tick(&mut state, 0.1);
        // Second digit crossed height + 50, first one advanced
        assert_eq!(state.digits.len(), 1);
        assert_eq!(state.digits[0].value, survivor.value);
        assert!((state.digits[0].pos.y - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_correct_hit_to_game_over() {
        // Scenario A: one round, correct click, 1.5s of feedback, game over
        let mut state = playing_state(5, 1);
        let answer = state.problem.unwrap().answer.max(1);
        state.problem.as_mut().unwrap().answer = answer;
        push_digit(&mut state, answer, 300.0, 400.0);

        on_click(&mut state, Vec2::new(300.0, 400.0));
        assert_eq!(state.score, 1);
        assert_eq!(state.phase, GamePhase::FeedbackCorrect);
        assert!(state.digits.is_empty(), "field clears on a correct answer");
        assert!(matches!(
            state.drain_events().as_slice(),
            [GameEvent::AnnounceCorrect { .. }]
        ));

        for _ in 0..16 {
            tick(&mut state, 0.1);
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.rounds_played, 1);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::SessionEnded { score: 1 }]
        );
    }

    #[test]
    fn test_miss_is_a_noop() {
        // Scenario B
        let mut state = playing_state(6, 10);
        push_digit(&mut state, 4, 300.0, 400.0);
        on_click(&mut state, Vec2::new(900.0, 900.0));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.digits.len(), 1);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_wrong_hit_removes_only_that_digit() {
        let mut state = playing_state(7, 10);
        let wrong = wrong_value(&state);
        push_digit(&mut state, wrong, 300.0, 400.0);
        push_digit(&mut state, 2, 600.0, 400.0);

        on_click(&mut state, Vec2::new(300.0, 400.0));
        assert_eq!(state.phase, GamePhase::FeedbackWrong);
        assert_eq!(state.score, 0);
        assert_eq!(state.digits.len(), 1);
        assert_eq!(state.digits[0].value, 2);
        assert_eq!(state.drain_events(), vec![GameEvent::AnnounceWrong]);
    }

    #[test]
    fn test_wrong_feedback_keeps_problem_and_counter() {
        let mut state = playing_state(8, 10);
        let problem = state.problem.unwrap();
        let wrong = wrong_value(&state);
        push_digit(&mut state, wrong, 300.0, 400.0);
        on_click(&mut state, Vec2::new(300.0, 400.0));

        // 0.5s hold, then straight back to the same round
        for _ in 0..6 {
            tick(&mut state, 0.1);
        }
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.rounds_played, 0, "wrong answers never advance rounds");
        assert_eq!(state.problem, Some(problem), "same problem persists");
    }

    #[test]
    fn test_correct_feedback_starts_next_round() {
        let mut state = playing_state(9, 3);
        let answer = state.problem.unwrap().answer.max(1);
        state.problem.as_mut().unwrap().answer = answer;
        push_digit(&mut state, answer, 300.0, 400.0);
        on_click(&mut state, Vec2::new(300.0, 400.0));
        state.drain_events();

        for _ in 0..16 {
            tick(&mut state, 0.1);
        }
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.rounds_played, 1);
        assert_eq!(state.score, 1, "score carries across rounds");
        assert!(state.problem.is_some());
        assert!(matches!(
            state.drain_events().as_slice(),
            [GameEvent::AnnounceProblem { .. }]
        ));
    }

    #[test]
    fn test_overlapping_digits_resolve_to_first_spawned() {
        let mut state = playing_state(10, 10);
        let answer = state.problem.unwrap().answer.max(1);
        state.problem.as_mut().unwrap().answer = answer;
        let wrong = wrong_value(&state);
        // Same spot, wrong one spawned first
        push_digit(&mut state, wrong, 300.0, 400.0);
        push_digit(&mut state, answer, 300.0, 400.0);

        on_click(&mut state, Vec2::new(300.0, 400.0));
        assert_eq!(state.phase, GamePhase::FeedbackWrong);
        assert_eq!(state.digits.len(), 1, "exactly one digit consumed");
    }

    #[test]
    fn test_game_over_click_resets_to_idle() {
        let mut state = playing_state(11, 10);
        state.phase = GamePhase::GameOver;
        state.score = 4;
        state.rounds_played = 10;
        on_click(&mut state, Vec2::new(10.0, 10.0));
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.rounds_played, 0);
        assert!(state.digits.is_empty());
    }

    #[test]
    fn test_clicks_ignored_outside_interactive_phases() {
        for phase in [
            GamePhase::Idle,
            GamePhase::FeedbackCorrect,
            GamePhase::FeedbackWrong,
        ] {
            let mut state = playing_state(12, 10);
            push_digit(&mut state, 5, 300.0, 400.0);
            state.phase = phase;
            state.feedback_timer = 1.0;
            on_click(&mut state, Vec2::new(300.0, 400.0));
            assert_eq!(state.phase, phase);
            assert_eq!(state.digits.len(), 1);
        }
    }

    #[test]
    fn test_idle_ticks_do_nothing() {
        let mut state = GameState::new(13);
        state.set_playfield(1920.0, 1080.0);
        for _ in 0..20 {
            tick(&mut state, 0.7);
        }
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(state.digits.is_empty());
        assert!(state.problem.is_none());
    }
}
