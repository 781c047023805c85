use anagramer_core::GameSession;
use anagramer_types::{Definition, GameSnapshot, GuessOutcome, Word};
use std::sync::Arc;
use tokio::sync::{Mutex, watch};
use tracing::{info, warn};

use crate::{ClientError, DefinitionCache, WordSource};

/// Owns a [`GameSession`] and serialises every command against it.
///
/// After each command the controller publishes a fresh [`GameSnapshot`] on a
/// watch channel. Failed commands publish the snapshot with `error` set to
/// the player-facing message; the next successful command clears it.
pub struct GameController {
    session: Arc<Mutex<GameSession>>,
    words: Arc<dyn WordSource>,
    definitions: DefinitionCache,
    snapshots: Arc<watch::Sender<GameSnapshot>>,
}

impl GameController {
    pub fn new(
        session: GameSession,
        words: Arc<dyn WordSource>,
        definitions: DefinitionCache,
    ) -> Self {
        let (snapshots, _) = watch::channel(session.snapshot());
        Self {
            session: Arc::new(Mutex::new(session)),
            words,
            definitions,
            snapshots: Arc::new(snapshots),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshots.subscribe()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Fetch a word and start the next round. The session lock is released
    /// while the word source works, so the loading state is observable.
    ///
    /// The fetch runs on its own task, which always either installs the
    /// round or clears the loading flag, even if this future is dropped.
    pub async fn new_round(&self) -> Result<(), ClientError> {
        {
            let mut session = self.session.lock().await;
            if let Err(e) = session.begin_loading() {
                return Err(fail(&self.snapshots, &session, e.into()));
            }
            publish(&self.snapshots, &session);
        }

        let session = self.session.clone();
        let words = self.words.clone();
        let snapshots = self.snapshots.clone();
        tokio::spawn(async move {
            let fetched = words.next_round().await;
            install_round(&session, &snapshots, fetched).await
        })
        .await?
    }

    /// Submit a guess. Finding the last word ends the round.
    pub async fn guess(&self, word: &str) -> Result<GuessOutcome, ClientError> {
        let mut session = self.session.lock().await;
        let outcome = match session.submit_guess(word) {
            Ok(outcome) => outcome,
            Err(e) => return Err(fail(&self.snapshots, &session, e.into())),
        };

        if outcome.is_accepted() && session.is_complete() {
            let final_score = session.finish_round(false)?;
            info!("Every word found, round closed at {} points", final_score);
        }
        publish(&self.snapshots, &session);
        Ok(outcome)
    }

    pub async fn submit_buffer(&self) -> Result<GuessOutcome, ClientError> {
        let word = self.session.lock().await.guess_buffer().to_string();
        self.guess(&word).await
    }

    pub async fn update_guess(&self, candidate: &str) -> bool {
        let mut session = self.session.lock().await;
        let accepted = session.update_guess_buffer(candidate);
        if accepted {
            publish(&self.snapshots, &session);
        }
        accepted
    }

    pub async fn clear_guess(&self) {
        let mut session = self.session.lock().await;
        session.clear_guess_buffer();
        publish(&self.snapshots, &session);
    }

    pub async fn bring_back_word(&self) {
        let mut session = self.session.lock().await;
        session.bring_back_word();
        publish(&self.snapshots, &session);
    }

    pub async fn use_hint(&self) -> Option<char> {
        let mut session = self.session.lock().await;
        let letter = session.use_hint();
        if letter.is_some() {
            publish(&self.snapshots, &session);
        }
        letter
    }

    pub async fn shuffle(&self) {
        let mut session = self.session.lock().await;
        session.shuffle();
        publish(&self.snapshots, &session);
    }

    /// Player pressed "finish". Returns the final score.
    pub async fn finish(&self) -> Result<u32, ClientError> {
        let mut session = self.session.lock().await;
        match session.finish_round(true) {
            Ok(score) => {
                publish(&self.snapshots, &session);
                Ok(score)
            }
            Err(e) => Err(fail(&self.snapshots, &session, e.into())),
        }
    }

    pub async fn acknowledge_new_hint(&self) {
        let mut session = self.session.lock().await;
        session.acknowledge_new_hint();
        publish(&self.snapshots, &session);
    }

    /// Look a word up through the definition cache
    pub async fn define(&self, word: &str) -> Result<Definition, ClientError> {
        match self.definitions.lookup(word).await {
            Ok(definition) => Ok(definition),
            Err(e) => {
                let session = self.session.lock().await;
                Err(fail(&self.snapshots, &session, e))
            }
        }
    }
}

/// Start the fetched round, or clear the loading flag on any failure
async fn install_round(
    session: &Mutex<GameSession>,
    snapshots: &watch::Sender<GameSnapshot>,
    fetched: Result<Word, ClientError>,
) -> Result<(), ClientError> {
    let mut session = session.lock().await;
    let started = fetched.and_then(|word| session.start_round(word).map_err(ClientError::from));

    match started {
        Ok(()) => {
            publish(snapshots, &session);
            Ok(())
        }
        Err(e) => {
            session.cancel_loading();
            Err(fail(snapshots, &session, e))
        }
    }
}

fn publish(snapshots: &watch::Sender<GameSnapshot>, session: &GameSession) {
    snapshots.send_replace(session.snapshot());
}

fn fail(
    snapshots: &watch::Sender<GameSnapshot>,
    session: &GameSession,
    error: ClientError,
) -> ClientError {
    warn!("Game command failed: {}", error);
    let mut snapshot = session.snapshot();
    snapshot.error = Some(error.user_message());
    snapshots.send_replace(snapshot);
    error
}
