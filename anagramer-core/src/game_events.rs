#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    RoundStarted {
        main_letters: String,
        word_count: usize,
    },
    GuessAccepted {
        word: String,
        index: usize,
    },
    HintRevealed {
        letter: char,
        hints_available: u32,
    },
    HintAwarded {
        hints_available: u32,
    },
    LettersShuffled {
        main_letters: String,
    },
    RoundFinished {
        final_score: u32,
        earned_hint: bool,
    },
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::RoundStarted { .. } => "round_started",
            GameEvent::GuessAccepted { .. } => "guess_accepted",
            GameEvent::HintRevealed { .. } => "hint_revealed",
            GameEvent::HintAwarded { .. } => "hint_awarded",
            GameEvent::LettersShuffled { .. } => "letters_shuffled",
            GameEvent::RoundFinished { .. } => "round_finished",
        }
    }
}

/// Event handler trait for processing game events
pub trait GameEventHandler: Send {
    fn handle_event(&mut self, event: GameEvent);
}

/// Simple event bus for distributing game events
pub struct GameEventBus {
    handlers: Vec<Box<dyn GameEventHandler>>,
}

impl GameEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    pub fn publish(&mut self, event: GameEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }
}

impl Default for GameEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GameEventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEventBus")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct TestHandler {
        events: Arc<Mutex<Vec<GameEvent>>>,
    }

    impl GameEventHandler for TestHandler {
        fn handle_event(&mut self, event: GameEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    #[test]
    fn test_event_bus_reaches_every_handler() {
        let mut bus = GameEventBus::new();
        let first = Arc::new(Mutex::new(Vec::new()));
        let second = Arc::new(Mutex::new(Vec::new()));

        bus.add_handler(Box::new(TestHandler {
            events: first.clone(),
        }));
        bus.add_handler(Box::new(TestHandler {
            events: second.clone(),
        }));
        assert_eq!(bus.handler_count(), 2);

        let event = GameEvent::LettersShuffled {
            main_letters: "SRETTEL".to_string(),
        };
        bus.publish(event.clone());

        assert_eq!(first.lock().unwrap().as_slice(), &[event.clone()]);
        assert_eq!(second.lock().unwrap().as_slice(), &[event]);
    }

    #[test]
    fn test_event_names() {
        let event = GameEvent::HintAwarded { hints_available: 1 };
        assert_eq!(event.name(), "hint_awarded");
    }
}
