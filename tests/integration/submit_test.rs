//! Integration tests for job submission.

mod helpers;

use helpers::{ConverterMode, TestApp};
use http::StatusCode;

#[tokio::test]
async fn test_submit_reachable_input_is_accepted() {
    let app = TestApp::new(ConverterMode::Succeed).await;
    let job_id = "9f1c2b1e-5d0e-4c3a-8a53-6f1f4b1d2c01";

    let response = app
        .request("POST", "/process", Some(app.job_body(job_id, "sample_audio.mp3")))
        .await;

    assert_eq!(response.status, StatusCode::ACCEPTED);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["jobId"], job_id);
    assert_eq!(response.body["message"], "Job accepted for processing");

    app.backend.wait_for_terminal(job_id).await;
}

#[tokio::test]
async fn test_submit_unreachable_input_is_rejected() {
    let app = TestApp::new(ConverterMode::Succeed).await;

    let response = app
        .request("POST", "/process", Some(app.job_body("job-404", "missing.mp3")))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["error"], "BAD_REQUEST");
    assert!(
        response.body["message"].as_str().unwrap().contains("404"),
        "{}",
        response.body
    );

    // No background job: nothing ever calls back.
    tokio::time::sleep(std::time::Duration::from_millis(300)).await;
    assert!(app.backend.callbacks_for("job-404").is_empty());
    assert_eq!(app.backend.downloads(), 0);
}

#[tokio::test]
async fn test_submit_malformed_json_is_422() {
    let app = TestApp::new(ConverterMode::Succeed).await;

    let response = app
        .raw_request("POST", "/process", "{\"jobId\": ".to_string())
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_submit_missing_field_is_422() {
    let app = TestApp::new(ConverterMode::Succeed).await;
    let mut body = app.job_body("job-x", "sample_audio.mp3");
    body.as_object_mut().unwrap().remove("outputFileUrl");

    let response = app.request("POST", "/process", Some(body)).await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["success"], false);
}

#[tokio::test]
async fn test_submit_wrong_processing_type_is_422() {
    let app = TestApp::new(ConverterMode::Succeed).await;
    let mut body = app.job_body("job-y", "sample_audio.mp3");
    body["processingType"] = serde_json::json!("MIDI2AUDIO");

    let response = app.request("POST", "/process", Some(body)).await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_submit_non_http_url_is_422() {
    let app = TestApp::new(ConverterMode::Succeed).await;
    let mut body = app.job_body("job-z", "sample_audio.mp3");
    body["inputFileUrl"] = serde_json::json!("file:///etc/passwd");

    let response = app.request("POST", "/process", Some(body)).await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert_eq!(app.backend.downloads(), 0);
}
