//! Encounter event queue.
//!
//! The encounter pushes what happened, in order; a combat log or UI drains
//! it afterwards. Nothing in the core reads events back.

use crate::components::Item;
use crate::systems::combat::SwingResult;

/// Who swung
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combatant {
    Player,
    Monster,
}

/// Events the encounter emits for whoever is listening
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// One swing was resolved and applied
    SwingResolved {
        attacker: Combatant,
        swing: SwingResult,
        defender_hp: i32,
    },
    /// A monster's hp reached zero
    MonsterDefeated {
        level: u32,
        is_boss: bool,
        xp_awarded: u32,
    },
    /// The kill produced an item
    LootDropped { item: Item },
    /// Player leveled up
    LevelUp { new_level: u32, levels_gained: u32 },
    /// Player's hp reached zero
    PlayerDefeated { damage_taken: i32 },
}

/// Simple event queue - events are pushed during an exchange, drained by the caller
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event to be processed later
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain all events for processing
    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
