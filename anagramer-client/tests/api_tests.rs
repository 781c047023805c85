
use anagramer_client::{
    ApiClient, ClientError, DefinitionCache, RemoteWordSource, WordSource,
};
use anagramer_types::PostMessage;
use std::sync::Arc;
use std::time::Duration;
use test_helpers::*;

#[tokio::test]
async fn test_random_word_sends_minimum_size() {
    let backend = MockBackend::start().await;
    let api = ApiClient::new(&backend.api_url()).unwrap();

    let word = api.random_word(7, 3).await.unwrap();

    assert_eq!(word, letters_word());
    let queries = backend.record.random_word_queries.lock().unwrap().clone();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].0, 7);
    assert_eq!(queries[0].1.get("minimumSize").map(String::as_str), Some("3"));
}

#[tokio::test]
async fn test_remote_word_source() {
    let backend = MockBackend::start().await;
    let api = ApiClient::new(&backend.api_url()).unwrap();
    let source = RemoteWordSource::new(api, 7, 4);

    let word = source.next_round().await.unwrap();

    assert_eq!(word.seed, "letters");
    let queries = backend.record.random_word_queries.lock().unwrap().clone();
    assert_eq!(queries[0].1.get("minimumSize").map(String::as_str), Some("4"));
}

#[tokio::test]
async fn test_high_score_round_trip() {
    let backend = MockBackend::start().await;
    let api = ApiClient::new(&backend.api_url()).unwrap();

    let before = api.high_scores().await.unwrap();
    assert_eq!(before.list.len(), 1);

    let after = api.post_high_score("bo", 300).await.unwrap();
    assert_eq!(after.list.len(), 2);
    assert_eq!(after.list[0].name, "bo");
    assert_eq!(after.list[0].score, 300);
}

#[tokio::test]
async fn test_post_message() {
    let backend = MockBackend::start().await;
    let api = ApiClient::new(&backend.api_url()).unwrap();
    let message = PostMessage {
        name: "guest-7".to_string(),
        message: "hello".to_string(),
    };

    api.post_message(&message).await.unwrap();

    assert_eq!(backend.record.posted_messages(), vec![message]);
}

#[tokio::test]
async fn test_missing_definition_is_generic_failure() {
    let backend = MockBackend::start().await;
    let api = ApiClient::new(&backend.api_url()).unwrap();

    let err = api.word_definition("missing").await.unwrap_err();

    assert!(matches!(err, ClientError::Network(_)));
    assert_eq!(err.user_message(), "Something went wrong");
}

#[tokio::test]
async fn test_definition_cache_hits_backend_once() {
    let backend = MockBackend::start().await;
    let api = ApiClient::new(&backend.api_url()).unwrap();
    let cache = DefinitionCache::new(Arc::new(api), Duration::from_secs(5));

    let first = cache.lookup("tree").await.unwrap();
    let second = cache.lookup("TREE").await.unwrap();

    assert_eq!(first.text, "tree: a word");
    assert_eq!(first, second);
    assert_eq!(backend.record.definition_calls(), 1);
}

#[tokio::test]
async fn test_definition_cache_bounded_wait() {
    let backend = MockBackend::start().await;
    let api = ApiClient::new(&backend.api_url()).unwrap();
    let cache = DefinitionCache::new(Arc::new(api), Duration::from_millis(200));

    let err = cache.lookup("slow").await.unwrap_err();

    assert!(matches!(err, ClientError::Timeout(_)));
    assert!(cache.cached("slow").await.is_none());
}

#[tokio::test]
async fn test_unreachable_backend() {
    let api = ApiClient::new("http://127.0.0.1:9").unwrap();

    let err = api.high_scores().await.unwrap_err();
    assert_eq!(err.user_message(), "Something went wrong");
}
