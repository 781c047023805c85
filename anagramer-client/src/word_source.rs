use anagramer_core::Dictionary;
use anagramer_types::Word;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::{ApiClient, ClientError};

/// Where a round's seed word and anagram pool come from
#[async_trait]
pub trait WordSource: Send + Sync {
    async fn next_round(&self) -> Result<Word, ClientError>;
}

/// Rounds drawn from an in-memory dictionary
pub struct LocalWordSource {
    dictionary: Arc<Dictionary>,
    rng: Mutex<StdRng>,
    seed_length: usize,
    minimum_size: usize,
}

impl LocalWordSource {
    pub fn new(dictionary: Arc<Dictionary>, seed_length: usize, minimum_size: usize) -> Self {
        Self::with_rng(dictionary, seed_length, minimum_size, StdRng::from_entropy())
    }

    pub fn with_rng(
        dictionary: Arc<Dictionary>,
        seed_length: usize,
        minimum_size: usize,
        rng: StdRng,
    ) -> Self {
        Self {
            dictionary,
            rng: Mutex::new(rng),
            seed_length,
            minimum_size,
        }
    }
}

#[async_trait]
impl WordSource for LocalWordSource {
    async fn next_round(&self) -> Result<Word, ClientError> {
        let mut rng = {
            let mut shared = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            StdRng::seed_from_u64(shared.r#gen())
        };
        let dictionary = self.dictionary.clone();
        let (seed_length, minimum_size) = (self.seed_length, self.minimum_size);

        // Matching walks the whole dictionary; keep it off the async workers
        let word = tokio::task::spawn_blocking(move || {
            dictionary.random_round(&mut rng, seed_length, minimum_size)
        })
        .await??;

        debug!("Local round ready with {} anagrams", word.anagrams.len());
        Ok(word)
    }
}

/// Rounds fetched from the backend's `/randomWord` endpoint
pub struct RemoteWordSource {
    api: ApiClient,
    seed_length: usize,
    minimum_size: usize,
}

impl RemoteWordSource {
    pub fn new(api: ApiClient, seed_length: usize, minimum_size: usize) -> Self {
        Self {
            api,
            seed_length,
            minimum_size,
        }
    }
}

#[async_trait]
impl WordSource for RemoteWordSource {
    async fn next_round(&self) -> Result<Word, ClientError> {
        self.api
            .random_word(self.seed_length, self.minimum_size)
            .await
    }
}
