//! Spoken-feedback capability
//!
//! The sim queues [`GameEvent`]s; the host drains them and forwards any
//! spoken lines through an [`Announcer`]. Lines are fire-and-forget: the
//! state machine never waits on speech, and a line that goes stale mid-round
//! is simply allowed to finish.

use crate::sim::GameEvent;

/// Something that can speak a line to the player
pub trait Announcer {
    fn say(&mut self, line: &str);
}

/// Discards everything; used in tests and headless runs
#[derive(Debug, Default)]
pub struct NullAnnouncer;

impl Announcer for NullAnnouncer {
    fn say(&mut self, _line: &str) {}
}

/// Logs lines instead of speaking them (native builds)
#[derive(Debug, Default)]
pub struct LogAnnouncer;

impl Announcer for LogAnnouncer {
    fn say(&mut self, line: &str) {
        log::info!("announce: {line}");
    }
}

/// The spoken line for an event, if it has one
pub fn phrase_for(event: &GameEvent) -> Option<String> {
    match event {
        GameEvent::AnnounceProblem { a, b } => Some(format!("{a} plus {b}")),
        GameEvent::AnnounceCorrect { a, b, answer } => {
            Some(format!("{a} plus {b} is {answer}. Good job!"))
        }
        GameEvent::AnnounceWrong => Some("Wrong, try again".to_string()),
        GameEvent::SessionEnded { .. } => None,
    }
}

/// Forward every spoken event to the announcer, in order
pub fn announce_all(announcer: &mut dyn Announcer, events: &[GameEvent]) {
    for event in events {
        if let Some(line) = phrase_for(event) {
            announcer.say(&line);
        }
    }
}
