use super::game_state::GameStateView;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Notification points a caller can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameEvent {
    StartGame,
    PieceMoved,
    SuccessfulTurn,
}

pub type Listener = Box<dyn FnMut(GameEvent, &GameStateView)>;

/// Synchronous listener lists, one per event, run in registration order.
#[derive(Default)]
pub struct EventHub {
    listeners: HashMap<GameEvent, Vec<Listener>>,
}

impl EventHub {
    pub fn subscribe(&mut self, event: GameEvent, listener: Listener) {
        self.listeners.entry(event).or_default().push(listener);
    }

    pub fn emit(&mut self, event: GameEvent, view: &GameStateView) {
        if let Some(listeners) = self.listeners.get_mut(&event) {
            for listener in listeners.iter_mut() {
                listener(event, view);
            }
        }
    }

    pub fn listener_count(&self, event: GameEvent) -> usize {
        self.listeners.get(&event).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for EventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHub")
            .field("start_game", &self.listener_count(GameEvent::StartGame))
            .field("piece_moved", &self.listener_count(GameEvent::PieceMoved))
            .field("successful_turn", &self.listener_count(GameEvent::SuccessfulTurn))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::game_state::GameState;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_registration_order() {
        let seen: Rc<RefCell<Vec<&str>>> = Rc::new(RefCell::new(Vec::new()));
        let mut hub = EventHub::default();
        let first = Rc::clone(&seen);
        hub.subscribe(GameEvent::PieceMoved, Box::new(move |_: GameEvent, _: &GameStateView| first.borrow_mut().push("first")));
        let second = Rc::clone(&seen);
        hub.subscribe(GameEvent::PieceMoved, Box::new(move |_: GameEvent, _: &GameStateView| second.borrow_mut().push("second")));

        let view = GameState::new("g1", "standard").view();
        hub.emit(GameEvent::PieceMoved, &view);
        hub.emit(GameEvent::StartGame, &view);
        assert_eq!(*seen.borrow(), vec!["first", "second"]);
        assert_eq!(hub.listener_count(GameEvent::StartGame), 0);
    }
}
