use anagramer_types::{Definition, PostMessage, Scores, Word};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::ClientError;

/// Typed client for the backend's REST endpoints
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::Endpoint(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Endpoint(base_url.to_string()));
        }

        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    /// `GET /randomWord/{length}?minimumSize={n}`
    pub async fn random_word(
        &self,
        length: usize,
        minimum_size: usize,
    ) -> Result<Word, ClientError> {
        let url = self.endpoint(&["randomWord", &length.to_string()])?;
        let request = self
            .client
            .get(url)
            .query(&[("minimumSize", minimum_size)]);
        self.fetch(request).await
    }

    /// `GET /wordDefinition/{word}`
    pub async fn word_definition(&self, word: &str) -> Result<Definition, ClientError> {
        let url = self.endpoint(&["wordDefinition", word])?;
        self.fetch(self.client.get(url)).await
    }

    /// `GET /highScores`
    pub async fn high_scores(&self) -> Result<Scores, ClientError> {
        let url = self.endpoint(&["highScores"])?;
        self.fetch(self.client.get(url)).await
    }

    /// `POST /highScore/{name}/{score}`, answered with the updated table
    pub async fn post_high_score(&self, name: &str, score: i32) -> Result<Scores, ClientError> {
        let url = self.endpoint(&["highScore", name, &score.to_string()])?;
        self.fetch(self.client.post(url)).await
    }

    /// `POST /message` with a chat line
    pub async fn post_message(&self, message: &PostMessage) -> Result<(), ClientError> {
        let url = self.endpoint(&["message"])?;
        let response = self.client.post(url).json(message).send().await?;
        response.error_for_status()?;
        Ok(())
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Endpoint(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request.send().await.map_err(|e| {
            warn!("Request failed: {}", e);
            e
        })?;
        debug!("{} {}", response.status(), response.url());
        Ok(response.error_for_status()?.json::<T>().await?)
    }
}
