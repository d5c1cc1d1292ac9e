mod common;

use common::{MockBackend, model};
use courtside_base::Tensor;
use courtside_infer::{InferError, ModelSource, PoseSession};
use std::time::Duration;

const SIDE: usize = 4;

fn input() -> Tensor<f32> {
    Tensor::zeros(vec![3 * SIDE * SIDE]).unwrap()
}

#[tokio::test]
async fn test_run_before_load_fails() {
    let session = PoseSession::new(MockBackend::new());
    assert!(matches!(
        session.run_inference(input(), SIDE).await,
        Err(InferError::ModelNotLoaded)
    ));
}

#[tokio::test]
async fn test_load_is_idempotent() {
    let backend = MockBackend::new();
    let session = PoseSession::new(backend.clone());

    session.load_model(&model()).await.unwrap();
    session.load_model(&model()).await.unwrap();
    assert_eq!(backend.loads(), 1);
    assert!(session.is_loaded().await);
}

#[tokio::test]
async fn test_concurrent_loads_collapse() {
    let backend = MockBackend::new();
    let session = PoseSession::new(backend.clone());
    let other = session.clone();

    let src = model();
    let (a, b) = tokio::join!(session.load_model(&src), other.load_model(&src));
    a.unwrap();
    b.unwrap();
    assert_eq!(backend.loads(), 1);
}

#[tokio::test]
async fn test_new_source_replaces_session() {
    let backend = MockBackend::new();
    let session = PoseSession::new(backend.clone());

    session.load_model(&model()).await.unwrap();
    session
        .load_model(&ModelSource::Memory(vec![1, 2, 3]))
        .await
        .unwrap();
    assert_eq!(backend.loads(), 2);
}

#[tokio::test]
async fn test_failed_load_can_be_retried() {
    let backend = MockBackend::new();
    backend.set_fail_load(true);
    let session = PoseSession::new(backend.clone());

    assert!(matches!(
        session.load_model(&model()).await,
        Err(InferError::ModelLoad(_))
    ));
    assert!(!session.is_loaded().await);

    backend.set_fail_load(false);
    session.load_model(&model()).await.unwrap();
    assert!(session.is_loaded().await);
}

#[tokio::test]
async fn test_output_is_returned() {
    let backend = MockBackend::new();
    let session = PoseSession::new(backend.clone());
    session.load_model(&model()).await.unwrap();

    let output = session.run_inference(input(), SIDE).await.unwrap();
    assert_eq!(output.shape, vec![1, 56, 1]);
    assert_eq!(backend.runs(), 1);
}

#[tokio::test]
async fn test_wrong_input_length() {
    let session = PoseSession::new(MockBackend::new());
    session.load_model(&model()).await.unwrap();

    let short = Tensor::zeros(vec![10]).unwrap();
    assert!(matches!(
        session.run_inference(short, SIDE).await,
        Err(InferError::ShapeMismatch { .. })
    ));
}

#[tokio::test]
async fn test_session_fault_retries_once() {
    let backend = MockBackend::new();
    let session = PoseSession::new(backend.clone());
    session.load_model(&model()).await.unwrap();

    backend.fail_next_runs(1);
    session.run_inference(input(), SIDE).await.unwrap();
    assert_eq!(backend.loads(), 2);
    assert_eq!(backend.runs(), 2);
}

#[tokio::test]
async fn test_second_fault_is_returned() {
    let backend = MockBackend::new();
    let session = PoseSession::new(backend.clone());
    session.load_model(&model()).await.unwrap();

    backend.fail_next_runs(2);
    assert!(matches!(
        session.run_inference(input(), SIDE).await,
        Err(InferError::Session(_))
    ));
    assert_eq!(backend.runs(), 2);

    // the recreated session stays usable
    session.run_inference(input(), SIDE).await.unwrap();
}

#[tokio::test]
async fn test_overlapping_inference_is_busy() {
    let backend = MockBackend::new().with_delay(Duration::from_millis(300));
    let session = PoseSession::new(backend.clone());
    session.load_model(&model()).await.unwrap();

    let first = {
        let session = session.clone();
        tokio::spawn(async move { session.run_inference(input(), SIDE).await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(matches!(
        session.run_inference(input(), SIDE).await,
        Err(InferError::Busy)
    ));
    first.await.unwrap().unwrap();
    assert_eq!(backend.runs(), 1);
}

#[tokio::test]
async fn test_unload() {
    let session = PoseSession::new(MockBackend::new());
    session.load_model(&model()).await.unwrap();
    session.unload().await;
    assert!(!session.is_loaded().await);
    assert_eq!(session.backend_name(), "mock");
}
