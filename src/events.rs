//! Event module - outbound notifications for UI/audio collaborators
//!
//! The engine publishes state changes over plain mpsc channels; consumers
//! subscribe for a `Receiver` they own and drain at their own pace. Events
//! are informational only, the engine never depends on them for
//! correctness. Senders whose receiver has been dropped are pruned on the
//! next publish.

use std::sync::mpsc;

use crate::types::Vec2;

/// Notifications crossing the engine boundary
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The selection grew, shrank or was cleared; carries the new length
    SelectionChanged { count: usize },
    /// A despawn completed; carries how many elements were removed
    ElementsDespawned { count: usize },
    /// Score moved; carries the old and new totals
    ScoreChanged { old: u32, new: u32 },
    /// A score popup may fly from these world positions toward the counter
    ScoreAnimationRequested { score: u32, positions: Vec<Vec2> },
    /// Published by the popup collaborator when its animation lands on the
    /// counter (the engine defines the vocabulary, the UI the timing)
    ScoreReachedCounter,
}

/// Fan-out publisher for [`GameEvent`]
#[derive(Debug, Default)]
pub struct EventBus {
    senders: Vec<mpsc::Sender<GameEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            senders: Vec::new(),
        }
    }

    /// Open a subscription; drop the receiver to unsubscribe
    pub fn subscribe(&mut self) -> mpsc::Receiver<GameEvent> {
        let (tx, rx) = mpsc::channel();
        self.senders.push(tx);
        rx
    }

    /// Send an event to every live subscriber
    pub fn publish(&mut self, event: GameEvent) {
        self.senders.retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Number of live subscriptions (after the last publish pruned)
    pub fn subscriber_count(&self) -> usize {
        self.senders.len()
    }
}
