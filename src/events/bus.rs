//! Event Bus - match events emitted by the simulation systems
//!
//! The step and scoring systems emit, metrics and scenario assertions
//! consume. Drained events move to a history so a finished match can still
//! be inspected.

use bevy::prelude::*;

use super::types::GameEvent;

/// Event stamped with match time
#[derive(Debug, Clone, PartialEq)]
pub struct BusEvent {
    /// Milliseconds of match time
    pub time_ms: u32,
    pub event: GameEvent,
}

#[derive(Resource, Debug, Default)]
pub struct EventBus {
    /// Emitted this frame, not yet consumed
    pending: Vec<BusEvent>,
    /// Already consumed, in emission order
    consumed: Vec<BusEvent>,
    now_ms: u32,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timestamp for events emitted from now on
    pub fn update_time(&mut self, elapsed_secs: f32) {
        self.now_ms = (elapsed_secs * 1000.0).round() as u32;
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.pending.push(BusEvent {
            time_ms: self.now_ms,
            event,
        });
    }

    pub fn emit_all(&mut self, events: impl IntoIterator<Item = GameEvent>) {
        for event in events {
            self.emit(event);
        }
    }

    /// Take the pending events; they stay visible through `history`
    pub fn drain(&mut self) -> Vec<BusEvent> {
        let events = std::mem::take(&mut self.pending);
        self.consumed.extend(events.iter().cloned());
        events
    }

    /// Consumed then pending events
    pub fn history(&self) -> impl Iterator<Item = &BusEvent> {
        self.consumed.iter().chain(self.pending.iter())
    }

    /// Drop consumed events (long batch runs)
    pub fn clear_history(&mut self) {
        self.consumed.clear();
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
