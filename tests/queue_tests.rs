//! Integration tests for the trigger queue against the in-memory API.

#![cfg(feature = "mock-client")]

use std::sync::Arc;

use too_rust::client::{ApiResponse, MockTriggerApi, QueueEntry};
use too_rust::{ApiError, TargetOptions, TriggerQueue};

fn error_response(message: &str) -> ApiResponse {
    ApiResponse {
        status: "error".to_string(),
        message: Some(message.to_string()),
        data: None,
    }
}

fn entry(queue_name: &str, is_too: bool) -> QueueEntry {
    QueueEntry {
        queue_name: queue_name.to_string(),
        is_too,
        validity_window_mjd: [59754.0, 59754.02],
        queue: String::new(),
    }
}

async fn queue_with(api: &MockTriggerApi) -> TriggerQueue {
    TriggerQueue::with_client("DESY", Arc::new(api.clone()))
        .await
        .unwrap()
}

fn add_triggers(queue: &mut TriggerQueue, n: u32) {
    for _ in 0..n {
        queue
            .add_trigger(
                "ToO_IC220624A",
                59754.0,
                59754.02,
                vec![593],
                vec![1],
                TargetOptions::default(),
            )
            .unwrap();
    }
}

#[tokio::test]
async fn construction_fails_when_ping_fails() {
    let api = MockTriggerApi::new();
    api.set_healthy(false);

    let result = TriggerQueue::with_client("DESY", Arc::new(api.clone())).await;

    assert!(matches!(result, Err(ApiError::Connection(_))));
    assert_eq!(api.ping_count(), 1);
}

#[tokio::test]
async fn too_filter_returns_only_flagged_entries() {
    let api = MockTriggerApi::new();
    api.set_entries(vec![
        entry("ToO_IC220624A_0", true),
        entry("nightly_survey", false),
    ]);
    let queue = queue_with(&api).await;

    let names = queue.list_too_queue_names().await.unwrap();

    assert_eq!(names, vec!["ToO_IC220624A_0"]);

    let all = queue.list_all_queue_names().await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn listing_surfaces_remote_error_envelope() {
    let api = MockTriggerApi::new();
    let queue = queue_with(&api).await;
    api.set_get_response(error_response("token expired"));

    let result = queue.list_all_queues().await;

    match result {
        Err(ApiError::RemoteApi { status, message }) => {
            assert_eq!(status, "error");
            assert_eq!(message, "token expired");
        }
        other => panic!("expected RemoteApi, got {:?}", other),
    }
    assert_eq!(api.get_count(), 1);
}

#[tokio::test]
async fn submit_stops_at_first_failure_with_partial_results() {
    let api = MockTriggerApi::new();
    api.script_put_responses(vec![
        ApiResponse::success(),
        error_response("queue already exists"),
        ApiResponse::success(),
    ]);
    let mut queue = queue_with(&api).await;
    add_triggers(&mut queue, 3);

    let result = queue.submit_queue().await;

    match result {
        Err(ApiError::PartialSubmit {
            status,
            message,
            completed,
        }) => {
            assert_eq!(status, "error");
            assert_eq!(message, "queue already exists");
            assert_eq!(completed.len(), 1);
            assert!(completed[0].is_success());
        }
        other => panic!("expected PartialSubmit, got {:?}", other),
    }

    // Third trigger never sent; local queue untouched
    assert_eq!(api.put_count(), 2);
    assert_eq!(queue.len(), 3);
}

#[tokio::test]
async fn submit_sends_triggers_in_insertion_order() {
    let api = MockTriggerApi::new();
    let mut queue = queue_with(&api).await;
    add_triggers(&mut queue, 3);

    let results = queue.submit_queue().await.unwrap();

    assert_eq!(results.len(), 3);
    let sent: Vec<_> = api
        .put_requests()
        .into_iter()
        .map(|r| r.queue_name)
        .collect();
    assert_eq!(
        sent,
        vec!["ToO_IC220624A_0", "ToO_IC220624A_1", "ToO_IC220624A_2"]
    );

    // Submission does not clear the local queue
    assert_eq!(queue.len(), 3);
}

#[tokio::test]
async fn delete_queue_attempts_all_deletes_before_reporting() {
    let api = MockTriggerApi::new();
    api.script_delete_responses(vec![
        error_response("unknown queue"),
        error_response("unknown queue"),
    ]);
    let mut queue = queue_with(&api).await;
    add_triggers(&mut queue, 2);

    let result = queue.delete_queue().await;

    match result {
        Err(ApiError::RemoteApi { message, .. }) => {
            assert!(message.contains("ToO_IC220624A_0"), "got: {}", message);
        }
        other => panic!("expected RemoteApi, got {:?}", other),
    }

    // Both DELETE calls were attempted despite the first failure
    assert_eq!(api.delete_count(), 2);
    assert_eq!(queue.len(), 2);
}

#[tokio::test]
async fn delete_queue_succeeds_silently() {
    let api = MockTriggerApi::new();
    let mut queue = queue_with(&api).await;
    add_triggers(&mut queue, 2);

    queue.delete_queue().await.unwrap();

    let deleted: Vec<_> = api
        .delete_requests()
        .into_iter()
        .map(|r| r.queue_name)
        .collect();
    assert_eq!(deleted, vec!["ToO_IC220624A_0", "ToO_IC220624A_1"]);
}

#[tokio::test]
async fn delete_single_trigger_by_name() {
    let api = MockTriggerApi::new();
    let queue = queue_with(&api).await;

    let response = queue.delete_trigger("ToO_IC220624A_0").await.unwrap();
    assert!(response.is_success());

    let requests = api.delete_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].queue_name, "ToO_IC220624A_0");
    assert_eq!(requests[0].user, "DESY");
}

#[tokio::test]
async fn delete_single_trigger_surfaces_failure() {
    let api = MockTriggerApi::new();
    api.script_delete_responses(vec![error_response("unknown queue")]);
    let queue = queue_with(&api).await;

    let result = queue.delete_trigger("ToO_IC220624A_0").await;

    match result {
        Err(ApiError::RemoteApi { status, message }) => {
            assert_eq!(status, "error");
            assert_eq!(message, "unknown queue");
        }
        other => panic!("expected RemoteApi, got {:?}", other),
    }
}

#[tokio::test]
async fn summaries_combine_window_and_target_payload() {
    let api = MockTriggerApi::new();
    api.set_entries(vec![
        QueueEntry {
            queue_name: "ToO_IC220624A_0".to_string(),
            is_too: true,
            validity_window_mjd: [59580.0, 59580.5],
            queue: r#"[{"exposure_time": 30, "field_id": [593]}]"#.to_string(),
        },
        QueueEntry {
            queue_name: "ToO_IC220501A_0".to_string(),
            is_too: true,
            validity_window_mjd: [59580.0, 59580.02],
            queue: String::new(),
        },
    ]);
    let queue = queue_with(&api).await;

    let summaries = queue.list_too_queue_summaries().await.unwrap();

    assert_eq!(summaries.len(), 2);
    assert_eq!(
        summaries[0],
        "ToO_IC220624A_0: 2022-01-01 00:00 UT / window length: 720 min / exp: 30s / field: [593])"
    );
    assert_eq!(
        summaries[1],
        "ToO_IC220501A_0: 2022-01-01 00:00 UT / window length: 28 min / \
         exp: *not available* / field: *not available*)"
    );
}
