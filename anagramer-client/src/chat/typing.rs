use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Default)]
struct TypingState {
    typing: bool,
    /// Bumped on every keystroke and send; a stop timer only fires for the
    /// generation it was armed in
    generation: u64,
}

/// Turns a stream of keystrokes into typing-start / typing-stop updates.
///
/// A start goes out once per burst of keystrokes. The stop follows after
/// `quiet_period` without a keystroke, or immediately when the message is
/// sent. At most one stop timer is alive at a time. State changes and the
/// updates they emit happen under one lock, so updates leave in the order
/// the state changed.
pub struct TypingDebouncer {
    quiet_period: Duration,
    state: Arc<Mutex<TypingState>>,
    stop_timer: Option<JoinHandle<()>>,
    updates: mpsc::UnboundedSender<bool>,
}

impl TypingDebouncer {
    pub fn new(quiet_period: Duration, updates: mpsc::UnboundedSender<bool>) -> Self {
        Self {
            quiet_period,
            state: Arc::new(Mutex::new(TypingState::default())),
            stop_timer: None,
            updates,
        }
    }

    pub fn is_typing(&self) -> bool {
        lock(&self.state).typing
    }

    /// Draft changed. An empty draft does not count as typing.
    pub fn keystroke(&mut self, has_text: bool) {
        self.cancel_timer();

        let generation = {
            let mut state = lock(&self.state);
            state.generation += 1;

            if !has_text {
                stop(&mut state, &self.updates);
                return;
            }
            if !state.typing {
                debug!("Typing started");
                state.typing = true;
                let _ = self.updates.send(true);
            }
            state.generation
        };

        let state = self.state.clone();
        let updates = self.updates.clone();
        let quiet_period = self.quiet_period;
        self.stop_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            if stop_if_current(&state, &updates, generation) {
                debug!("Typing stopped after {:?} idle", quiet_period);
            }
        }));
    }

    pub fn message_sent(&mut self) {
        self.cancel_timer();
        let mut state = lock(&self.state);
        state.generation += 1;
        stop(&mut state, &self.updates);
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.stop_timer.take() {
            timer.abort();
        }
    }
}

impl Drop for TypingDebouncer {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

fn lock(state: &Mutex<TypingState>) -> MutexGuard<'_, TypingState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn stop(state: &mut TypingState, updates: &mpsc::UnboundedSender<bool>) {
    if state.typing {
        state.typing = false;
        let _ = updates.send(false);
    }
}

/// Stop typing if no keystroke or send happened since `generation`
fn stop_if_current(
    state: &Mutex<TypingState>,
    updates: &mpsc::UnboundedSender<bool>,
    generation: u64,
) -> bool {
    let mut state = lock(state);
    if state.generation != generation || !state.typing {
        return false;
    }
    stop(&mut state, updates);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(rx: &mut mpsc::UnboundedReceiver<bool>) -> Vec<bool> {
        let mut seen = Vec::new();
        while let Ok(update) = rx.try_recv() {
            seen.push(update);
        }
        seen
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_sends_one_start_and_one_stop() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = TypingDebouncer::new(Duration::from_millis(2500), tx);

        for _ in 0..5 {
            debouncer.keystroke(true);
            tokio::time::sleep(Duration::from_millis(1000)).await;
        }
        assert_eq!(drain(&mut rx), vec![true]);
        assert!(debouncer.is_typing());

        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(drain(&mut rx), vec![false]);
        assert!(!debouncer.is_typing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_stops_immediately() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = TypingDebouncer::new(Duration::from_millis(2500), tx);

        debouncer.keystroke(true);
        debouncer.message_sent();
        assert_eq!(drain(&mut rx), vec![true, false]);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cleared_draft_stops_typing() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = TypingDebouncer::new(Duration::from_millis(2500), tx);

        debouncer.keystroke(false);
        assert!(drain(&mut rx).is_empty());

        debouncer.keystroke(true);
        debouncer.keystroke(false);
        assert_eq!(drain(&mut rx), vec![true, false]);
    }

    #[tokio::test]
    async fn test_outdated_timer_cannot_stop_newer_burst() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = TypingDebouncer::new(Duration::from_secs(60), tx.clone());

        debouncer.keystroke(true);
        let armed_for = lock(&debouncer.state).generation;
        debouncer.keystroke(true);

        // A timer from the first keystroke that slipped past abort()
        assert!(!stop_if_current(&debouncer.state, &tx, armed_for));
        assert!(debouncer.is_typing());
        assert_eq!(drain(&mut rx), vec![true]);

        let current = lock(&debouncer.state).generation;
        assert!(stop_if_current(&debouncer.state, &tx, current));
        assert!(!debouncer.is_typing());
        assert_eq!(drain(&mut rx), vec![false]);
    }

    #[tokio::test]
    async fn test_restart_after_timer_stop_sends_new_start() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = TypingDebouncer::new(Duration::from_secs(60), tx.clone());

        debouncer.keystroke(true);
        let current = lock(&debouncer.state).generation;
        assert!(stop_if_current(&debouncer.state, &tx, current));

        debouncer.keystroke(true);
        assert_eq!(drain(&mut rx), vec![true, false, true]);
        assert!(debouncer.is_typing());
    }
}
