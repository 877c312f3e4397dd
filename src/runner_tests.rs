// Runner tests against an in-process stub of the spam detection service
use crate::{
    client::ServiceClient,
    config::TesterConfig,
    models::SamplePost,
    runner::{RunOutcome, TestRunner},
    samples::SAMPLE_POSTS,
};

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

#[derive(Default)]
struct Stub {
    health_status: Option<StatusCode>,
    health_plain_text: bool,
    without_ai_status: bool,
    hits: Mutex<Vec<String>>,
    posted: Mutex<Vec<Value>>,
    user_agents: Mutex<Vec<String>>,
}

impl Stub {
    fn hit(&self, path: &str) {
        self.hits.lock().unwrap().push(path.to_string());
    }

    fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }
}

async fn health(State(stub): State<Arc<Stub>>) -> Response {
    stub.hit("/health");
    let status = stub.health_status.unwrap_or(StatusCode::OK);
    if stub.health_plain_text {
        return (status, "OK").into_response();
    }
    (status, Json(json!({ "status": "ok" }))).into_response()
}

async fn ai_status(State(stub): State<Arc<Stub>>) -> Response {
    stub.hit("/ai-status");
    if stub.without_ai_status {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(json!({
        "ai_enabled": true,
        "ai_configured": true,
        "connection_status": true,
        "model_info": { "model": "stub-model" }
    }))
    .into_response()
}

// Verdict keyed on the sample text so one stub covers every response branch
async fn validate_post(
    State(stub): State<Arc<Stub>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    stub.hit("/validate-post");
    if let Some(agent) = headers.get(header::USER_AGENT).and_then(|v| v.to_str().ok()) {
        stub.user_agents.lock().unwrap().push(agent.to_string());
    }
    stub.posted.lock().unwrap().push(body.clone());

    let text = body["text"].as_str().unwrap_or_default();
    if text == "1234567890" {
        Json(json!({
            "detection": { "action": "flag", "isSpam": true, "confidence": 0.82 }
        }))
        .into_response()
    } else if text.starts_with("FREE MONEY") {
        (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "Forbidden", "reason": "IP temporarily blocked" })),
        )
            .into_response()
    } else if text.starts_with("Beautiful sunset") {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": true, "message": "classifier crashed" })),
        )
            .into_response()
    } else if text.contains("TypeScript") {
        (StatusCode::OK, "definitely not json").into_response()
    } else if text.starts_with("Make money fast") {
        Json(json!({
            "detection": {
                "action": "reject",
                "isSpam": true,
                "confidence": 0.99,
                "reasons": ["spam keywords"],
                "aiAnalysis": {
                    "isSpam": true,
                    "severity": "high",
                    "reasoning": "Work-from-home income scheme",
                    "categories": ["scam"]
                }
            }
        }))
        .into_response()
    } else {
        Json(json!({
            "detection": { "action": "allow", "isSpam": false, "confidence": 0.1 }
        }))
        .into_response()
    }
}

async fn service_config(State(stub): State<Arc<Stub>>) -> Json<Value> {
    stub.hit("/config");
    Json(json!({ "spamThreshold": 0.7, "aiEnabled": true }))
}

async fn blocked_ips(State(stub): State<Arc<Stub>>) -> Json<Value> {
    stub.hit("/blocked-ips");
    Json(json!({ "blockedIPs": ["10.0.0.9"] }))
}

async fn slow(State(stub): State<Arc<Stub>>) -> Json<Value> {
    stub.hit("/slow");
    tokio::time::sleep(Duration::from_secs(3)).await;
    Json(json!({ "status": "late" }))
}

async fn start_stub(stub: Arc<Stub>) -> SocketAddr {
    let app = Router::new()
        .route("/health", get(health))
        .route("/ai-status", get(ai_status))
        .route("/validate-post", post(validate_post))
        .route("/config", get(service_config))
        .route("/blocked-ips", get(blocked_ips))
        .route("/slow", get(slow))
        .with_state(stub);

    let server =
        axum::Server::bind(&"127.0.0.1:0".parse().unwrap()).serve(app.into_make_service());
    let addr = server.local_addr();
    tokio::spawn(async move {
        server.await.unwrap();
    });
    addr
}

fn config_for(addr: SocketAddr) -> TesterConfig {
    TesterConfig::default()
        .with_base_url(&format!("http://{}", addr))
        .unwrap()
        .with_delay_ms(0)
        .with_timeout_secs(5)
}

async fn run(config: TesterConfig, posts: &'static [SamplePost]) -> (RunOutcome, String) {
    colored::control::set_override(false);
    let mut runner = TestRunner::new(config, Vec::new()).unwrap().with_posts(posts);
    let outcome = runner.run_all().await.unwrap();
    let output = String::from_utf8(runner.into_output()).unwrap();
    (outcome, output)
}

#[tokio::test]
async fn test_full_run_reports_every_sample_in_order() {
    let stub = Arc::new(Stub::default());
    let addr = start_stub(stub.clone()).await;

    let (outcome, output) = run(config_for(addr), SAMPLE_POSTS).await;

    assert_eq!(outcome, RunOutcome::Completed { tested: 12 });
    assert_eq!(outcome.exit_code(), 0);

    let mut expected_hits = vec!["/health".to_string(), "/ai-status".to_string()];
    expected_hits.extend(std::iter::repeat("/validate-post".to_string()).take(12));
    assert_eq!(stub.hits(), expected_hits);

    // One block per sample, in input order
    let blocks: Vec<&str> = output.split("📝 Test ").skip(1).collect();
    assert_eq!(blocks.len(), SAMPLE_POSTS.len());
    for (index, (block, post)) in blocks.iter().zip(SAMPLE_POSTS).enumerate() {
        let header = format!("{}: {}", index + 1, post.category);
        assert!(block.starts_with(&header), "block {} was {:?}", index, block);
        assert!(block.contains(&format!("Text: \"{}\"", post.text)));
    }

    assert!(output.contains("AI Enabled: YES"));
    assert!(output.contains("Connection Status: CONNECTED"));
    assert!(output.contains("Model: stub-model"));
    assert!(output.contains(&format!("   curl http://{}/blocked-ips", addr)));
    assert!(output.trim_end().ends_with("✨ Test completed!"));
}

#[tokio::test]
async fn test_flag_verdict_for_all_numbers_sample() {
    let stub = Arc::new(Stub::default());
    let addr = start_stub(stub.clone()).await;

    let (_, output) = run(config_for(addr), SAMPLE_POSTS).await;

    let last_block = output.split("📝 Test ").last().unwrap();
    assert!(last_block.starts_with("12: Spam (All numbers)"));
    assert!(last_block.contains("Result: ⚠️ FLAG"));
    assert!(last_block.contains("Spam: YES (confidence: 82.0%)"));
}

#[tokio::test]
async fn test_non_success_responses_do_not_stop_the_run() {
    let stub = Arc::new(Stub::default());
    let addr = start_stub(stub.clone()).await;

    let (outcome, output) = run(config_for(addr), SAMPLE_POSTS).await;
    assert_eq!(outcome, RunOutcome::Completed { tested: 12 });

    let blocks: Vec<&str> = output.split("📝 Test ").skip(1).collect();

    // sample 2: 200 with a body that is not JSON
    assert!(blocks[1].contains("❌ Request error: Failed to parse JSON response"));
    // sample 3: 500 with an error payload
    assert!(blocks[2].contains("❌ Request failed (status: 500)"));
    assert!(blocks[2].contains("Error: classifier crashed"));
    // sample 5: blocked, and sample 6 still ran
    assert!(blocks[4].contains("❌ Request blocked (IP may be blocked)"));
    assert!(blocks[4].contains("Reason: IP temporarily blocked"));
    assert!(blocks[5].contains("Result: ✅ ALLOW"));
    // sample 11: AI analysis details
    assert!(blocks[10].contains("Reasons: spam keywords"));
    assert!(blocks[10].contains("AI Analysis: SPAM (high severity)"));
    assert!(blocks[10].contains("AI Categories: scam"));
}

#[tokio::test]
async fn test_validation_request_body_and_headers() {
    let stub = Arc::new(Stub::default());
    let addr = start_stub(stub.clone()).await;

    run(config_for(addr), SAMPLE_POSTS).await;

    let posted = stub.posted.lock().unwrap().clone();
    assert_eq!(posted.len(), 12);
    for (index, body) in posted.iter().enumerate() {
        assert_eq!(body["text"], SAMPLE_POSTS[index].text);
        assert_eq!(body["username"], format!("testuser{}", index));
        let timestamp = body["timestamp"].as_str().unwrap();
        assert!(timestamp.ends_with(".000Z"), "timestamp {}", timestamp);
        assert_eq!(timestamp.len(), "2024-01-01T00:00:00.000Z".len());
    }

    let agents = stub.user_agents.lock().unwrap().clone();
    assert!(agents.iter().all(|a| a == "SpamDetectionTester/1.0"));
}

#[tokio::test]
async fn test_unhealthy_service_aborts_before_other_calls() {
    let stub = Arc::new(Stub {
        health_status: Some(StatusCode::SERVICE_UNAVAILABLE),
        ..Default::default()
    });
    let addr = start_stub(stub.clone()).await;

    let (outcome, output) = run(config_for(addr), SAMPLE_POSTS).await;

    assert_eq!(outcome, RunOutcome::ServiceUnavailable);
    assert_eq!(outcome.exit_code(), 1);
    assert_eq!(stub.hits(), vec!["/health".to_string()]);
    assert!(output.contains("❌ Service unhealthy (status: 503)"));
    assert!(output.contains("Service is not available"));
    assert!(!output.contains("Checking AI status"));
    assert!(!output.contains("📝 Test"));
}

#[tokio::test]
async fn test_plain_text_health_is_a_parse_failure() {
    let stub = Arc::new(Stub {
        health_plain_text: true,
        ..Default::default()
    });
    let addr = start_stub(stub.clone()).await;

    let (outcome, output) = run(config_for(addr), SAMPLE_POSTS).await;

    assert_eq!(outcome, RunOutcome::ServiceUnavailable);
    assert_eq!(stub.hits(), vec!["/health".to_string()]);
    assert!(output.contains("❌ Service unreachable: Failed to parse JSON response"));
    assert!(!output.contains("✅ Service is healthy"));
    assert!(!output.contains("📝 Test"));
}

#[tokio::test]
async fn test_timeout_reports_configured_limit() {
    let stub = Arc::new(Stub::default());
    let addr = start_stub(stub.clone()).await;

    let client = ServiceClient::new(config_for(addr).with_timeout_secs(1)).unwrap();
    let result = client.get("/slow").await;

    assert_eq!(result.status, 0);
    assert_eq!(
        result.error.as_deref(),
        Some("Timeout: request took longer than 1s")
    );
}

#[tokio::test]
async fn test_unreachable_service_aborts() {
    // Grab a free port and release it so nothing is listening there
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };

    let (outcome, output) = run(config_for(addr), SAMPLE_POSTS).await;

    assert_eq!(outcome, RunOutcome::ServiceUnavailable);
    assert!(output.contains("❌ Service unreachable:"));
    assert!(output.contains(&format!("running at http://{}", addr)));
}

#[tokio::test]
async fn test_missing_ai_status_is_not_fatal() {
    let stub = Arc::new(Stub {
        without_ai_status: true,
        ..Default::default()
    });
    let addr = start_stub(stub.clone()).await;

    static ONE: &[SamplePost] = &[SamplePost {
        text: "Just a normal post",
        category: "Normal",
    }];
    let (outcome, output) = run(config_for(addr), ONE).await;

    assert_eq!(outcome, RunOutcome::Completed { tested: 1 });
    assert!(output.contains("❌ Request failed (status: 404)"));
    assert!(output.contains("📝 Test 1: Normal"));
}

#[tokio::test]
async fn test_delay_between_posts_but_not_after_last() {
    let stub = Arc::new(Stub::default());
    let addr = start_stub(stub.clone()).await;

    static TWO: &[SamplePost] = &[
        SamplePost {
            text: "first",
            category: "Normal",
        },
        SamplePost {
            text: "1234567890",
            category: "Spam (All numbers)",
        },
    ];
    let config = config_for(addr).with_delay_ms(300);

    let started = Instant::now();
    let (outcome, output) = run(config, TWO).await;
    let elapsed = started.elapsed();

    assert_eq!(outcome, RunOutcome::Completed { tested: 2 });
    assert!(output.contains("82.0%"));
    assert!(elapsed >= Duration::from_millis(300), "elapsed {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(600), "elapsed {:?}", elapsed);
}

#[tokio::test]
async fn test_inspect_dumps_config_and_blocked_ips() {
    let stub = Arc::new(Stub::default());
    let addr = start_stub(stub.clone()).await;

    static ONE: &[SamplePost] = &[SamplePost {
        text: "hello",
        category: "Normal",
    }];
    let (_, output) = run(config_for(addr).with_inspect(true), ONE).await;

    let hits = stub.hits();
    assert_eq!(&hits[hits.len() - 2..], &["/config", "/blocked-ips"]);
    assert!(output.contains("🔍 GET /config"));
    assert!(output.contains("\"spamThreshold\": 0.7"));
    assert!(output.contains("10.0.0.9"));
    assert!(output.trim_end().ends_with("✨ Test completed!"));
}
