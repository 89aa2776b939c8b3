//! End-to-end pipeline tests against mock collaborators and an in-memory
//! store.

mod test_utils;

use anyhow::Result;
use scrivano_core::{GenerationRequest, RequestId};
use scrivano_pipeline::{AudioFetch, Pipeline, Retrieval, RetryPolicy};
use scrivano_store::MemoryStore;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;
use test_utils::{MockContentDriver, MockSpeechDriver};
use tokio::sync::Semaphore;

fn request() -> GenerationRequest {
    GenerationRequest {
        topic: "Rust pipelines".to_string(),
        keywords: vec!["alpha".to_string(), "beta".to_string()],
        target_audience: Some("developers".to_string()),
        additional_context: None,
        options: None,
    }
}

/// A fast policy so transient-retry tests finish in milliseconds.
fn fast_policy() -> RetryPolicy {
    RetryPolicy::new(
        3,
        Duration::from_millis(1),
        vec!["overloaded".to_string(), "rate limit".to_string()],
    )
}

fn start(content: MockContentDriver, speech: MockSpeechDriver) -> Pipeline {
    Pipeline::start(
        Arc::new(content),
        Arc::new(speech),
        Arc::new(MemoryStore::new()),
        fast_policy(),
    )
}

/// Poll until the closure yields Some, or give up.
async fn poll_until<T, F, Fut>(mut probe: F) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<T>>,
{
    for _ in 0..200 {
        if let Some(value) = probe().await {
            return Some(value);
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    None
}

async fn wait_for_content(retrieval: &Retrieval, id: &RequestId) -> Option<serde_json::Value> {
    let retrieval = retrieval.clone();
    let id = id.clone();
    poll_until(|| {
        let retrieval = retrieval.clone();
        let id = id.clone();
        async move { retrieval.fetch_content(&id).await.unwrap() }
    })
    .await
}

async fn wait_for_audio(retrieval: &Retrieval, id: &RequestId) -> Option<AudioFetch> {
    let retrieval = retrieval.clone();
    let id = id.clone();
    poll_until(|| {
        let retrieval = retrieval.clone();
        let id = id.clone();
        async move {
            match retrieval.fetch_audio(&id).await.unwrap() {
                AudioFetch::Absent => None,
                other => Some(other),
            }
        }
    })
    .await
}

#[tokio::test]
async fn test_full_run_produces_article_and_audio() -> Result<()> {
    let pipeline = start(MockContentDriver::happy(), MockSpeechDriver::happy());

    let ack = pipeline.intake().submit(request()).await?;
    let content = wait_for_content(pipeline.retrieval(), &ack.id)
        .await
        .expect("article never appeared");

    assert_eq!(content["article"]["title"], "Mock Article Title");
    assert_eq!(content["article"]["sections"].as_array().unwrap().len(), 2);
    assert_eq!(content["status"], "completed");

    let audio = wait_for_audio(pipeline.retrieval(), &ack.id)
        .await
        .expect("audio never appeared");
    let AudioFetch::Ready(clip) = audio else {
        panic!("expected ready audio, got {:?}", audio);
    };
    assert_eq!(clip.article_title, "Mock Article Title");
    assert_eq!(clip.sample_rate, 24_000);

    // With audio present, fetch_content merges it in
    let merged = pipeline.retrieval().fetch_content(&ack.id).await?.unwrap();
    assert!(merged["audio"]["audioData"].is_string());

    pipeline.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn test_intake_acknowledges_immediately_with_unique_ids() -> Result<()> {
    let pipeline = start(MockContentDriver::happy(), MockSpeechDriver::happy());

    let a = pipeline.intake().submit(request()).await?;
    let b = pipeline.intake().submit(request()).await?;
    assert_ne!(a.id, b.id);
    assert_eq!(a.status, "accepted");

    // Both runs complete independently
    assert!(wait_for_content(pipeline.retrieval(), &a.id).await.is_some());
    assert!(wait_for_content(pipeline.retrieval(), &b.id).await.is_some());

    pipeline.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn test_validation_failure_is_synchronous() {
    let pipeline = start(MockContentDriver::happy(), MockSpeechDriver::happy());

    let mut bad = request();
    bad.keywords.clear();
    assert!(pipeline.intake().submit(bad).await.is_err());
    pipeline.shutdown().await;
}

#[tokio::test]
async fn test_enhancement_failure_preserves_original_keywords() -> Result<()> {
    let content = MockContentDriver::new(
        Err("enhancement exploded".to_string()),
        Ok(test_utils::article_markdown()),
    );
    let pipeline = start(content, MockSpeechDriver::happy());

    let ack = pipeline.intake().submit(request()).await?;
    let stored = wait_for_content(pipeline.retrieval(), &ack.id)
        .await
        .expect("article never appeared");

    let keywords = stored["article"]["metadata"]["keywords"].as_array().unwrap();
    let keywords: Vec<&str> = keywords.iter().filter_map(|k| k.as_str()).collect();
    assert!(keywords.contains(&"alpha"));
    assert!(keywords.contains(&"beta"));

    pipeline.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn test_generation_failure_leaves_no_artifacts() -> Result<()> {
    let content = MockContentDriver::new(
        Ok(test_utils::brief_json()),
        Err("generation exploded".to_string()),
    );
    let pipeline = start(content, MockSpeechDriver::happy());

    let ack = pipeline.intake().submit(request()).await?;
    // Give the pipeline time to (not) produce anything
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert!(pipeline.retrieval().fetch_content(&ack.id).await?.is_none());
    assert!(matches!(
        pipeline.retrieval().fetch_audio(&ack.id).await?,
        AudioFetch::Absent
    ));

    pipeline.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn test_synthesis_failure_yields_article_without_audio() -> Result<()> {
    // Permanent failure: no marker matches, so no retries
    let speech = MockSpeechDriver::failing("invalid voice", 1);
    let pipeline = start(MockContentDriver::happy(), speech);

    let ack = pipeline.intake().submit(request()).await?;
    let content = wait_for_content(pipeline.retrieval(), &ack.id)
        .await
        .expect("article never appeared");
    assert_eq!(content["article"]["title"], "Mock Article Title");

    let audio = wait_for_audio(pipeline.retrieval(), &ack.id)
        .await
        .expect("failure artifact never appeared");
    let AudioFetch::Failed(failure) = audio else {
        panic!("expected failed audio, got {:?}", audio);
    };
    assert!(failure.error.contains("invalid voice"));

    // The article payload omits the audio field rather than erroring
    let merged = pipeline.retrieval().fetch_content(&ack.id).await?.unwrap();
    assert!(merged.get("audio").is_none());

    pipeline.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn test_transient_synthesis_retries_to_exact_bound() -> Result<()> {
    // Three transient failures exhaust a three-attempt policy
    let speech = MockSpeechDriver::failing("model is overloaded", 5);
    let content = MockContentDriver::happy();
    let store = Arc::new(MemoryStore::new());
    let speech = Arc::new(speech);
    let pipeline = Pipeline::start(
        Arc::new(content),
        speech.clone(),
        store,
        fast_policy(),
    );

    let ack = pipeline.intake().submit(request()).await?;
    let audio = wait_for_audio(pipeline.retrieval(), &ack.id)
        .await
        .expect("failure artifact never appeared");

    assert!(matches!(audio, AudioFetch::Failed(_)));
    assert_eq!(speech.calls.load(Ordering::SeqCst), 3);

    pipeline.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn test_transient_failures_then_success() -> Result<()> {
    let speech = MockSpeechDriver::scripted(vec![
        Err("rate limit hit".to_string()),
        Err("model is overloaded".to_string()),
        Ok(test_utils::mock_audio()),
    ]);
    let speech = Arc::new(speech);
    let pipeline = Pipeline::start(
        Arc::new(MockContentDriver::happy()),
        speech.clone(),
        Arc::new(MemoryStore::new()),
        fast_policy(),
    );

    let ack = pipeline.intake().submit(request()).await?;
    let audio = wait_for_audio(pipeline.retrieval(), &ack.id)
        .await
        .expect("audio never appeared");
    assert!(matches!(audio, AudioFetch::Ready(_)));
    assert_eq!(speech.calls.load(Ordering::SeqCst), 3);

    pipeline.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn test_retrieval_is_idempotent() -> Result<()> {
    let pipeline = start(MockContentDriver::happy(), MockSpeechDriver::happy());

    let ack = pipeline.intake().submit(request()).await?;
    wait_for_audio(pipeline.retrieval(), &ack.id).await.unwrap();

    let first = pipeline.retrieval().fetch_content(&ack.id).await?.unwrap();
    let second = pipeline.retrieval().fetch_content(&ack.id).await?.unwrap();
    assert_eq!(first, second);

    pipeline.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn test_section_order_is_contiguous() -> Result<()> {
    let pipeline = start(MockContentDriver::happy(), MockSpeechDriver::happy());

    let ack = pipeline.intake().submit(request()).await?;
    let stored = wait_for_content(pipeline.retrieval(), &ack.id)
        .await
        .expect("article never appeared");

    let orders: Vec<u64> = stored["article"]["sections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["order"].as_u64().unwrap())
        .collect();
    assert_eq!(orders, vec![0, 1]);

    pipeline.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn test_audio_implies_article() -> Result<()> {
    let pipeline = start(MockContentDriver::happy(), MockSpeechDriver::happy());

    let ack = pipeline.intake().submit(request()).await?;
    wait_for_audio(pipeline.retrieval(), &ack.id).await.unwrap();

    // Whenever a ready audio artifact exists, its article must too
    assert!(pipeline.retrieval().fetch_content(&ack.id).await?.is_some());
    assert!(pipeline.retrieval().fetch_article(&ack.id).await?.is_some());

    pipeline.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn test_progressive_completion_three_states() -> Result<()> {
    // Gate synthesis so the article-only window is observable
    let gate = Arc::new(Semaphore::new(0));
    let speech = MockSpeechDriver::gated(gate.clone());
    let pipeline = start(MockContentDriver::happy(), speech);
    let retrieval = pipeline.retrieval().clone();

    let unknown = RequestId::mint();
    assert!(retrieval.fetch_content(&unknown).await?.is_none());

    let ack = pipeline.intake().submit(request()).await?;

    // State 1 -> 2: article appears while synthesis is held
    let content = wait_for_content(&retrieval, &ack.id)
        .await
        .expect("article never appeared");
    assert!(content.get("audio").is_none());
    assert!(matches!(
        retrieval.fetch_audio(&ack.id).await?,
        AudioFetch::Absent
    ));

    // State 2 -> 3: release synthesis, audio joins the payload
    gate.add_permits(1);
    let audio = wait_for_audio(&retrieval, &ack.id)
        .await
        .expect("audio never appeared");
    assert!(matches!(audio, AudioFetch::Ready(_)));
    let merged = retrieval.fetch_content(&ack.id).await?.unwrap();
    assert!(merged["audio"]["audioData"].is_string());

    pipeline.shutdown().await;
    Ok(())
}
