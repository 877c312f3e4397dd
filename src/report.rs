//! Console report formatting
//!
//! Each function renders one block of the report as lines. Nothing here
//! performs I/O, the runner decides where the lines go.

use colored::*;

use crate::models::{
    AiAnalysis, AiStatus, Detection, ErrorBody, RequestResult, ResponseBody, SamplePost,
    ValidationResponse,
};

pub const RULE_WIDTH: usize = 50;

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "YES"
    } else {
        "NO"
    }
}

/// Fraction in `0..=1` rendered as a percentage with one decimal
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}

pub fn banner() -> Vec<String> {
    vec![
        format!("{}", "🚀 Starting Twitter Spam Detection Service Test".bold()),
        String::new(),
        rule(),
    ]
}

pub fn health_checking() -> String {
    "🏥 Testing service health...".to_string()
}

/// Lines for the health probe outcome; a body that fails to parse counts as
/// unreachable, same as a transport failure
pub fn health(result: &RequestResult) -> Vec<String> {
    if let Some(error) = &result.error {
        vec![format!("{} {}", "❌ Service unreachable:".red(), error)]
    } else if result.is_ok() {
        vec![format!("{}", "✅ Service is healthy".green())]
    } else {
        vec![format!(
            "{}",
            format!("❌ Service unhealthy (status: {})", result.status).red()
        )]
    }
}

pub fn health_abort(base_url: &str) -> Vec<String> {
    vec![
        String::new(),
        format!(
            "{}",
            format!(
                "❌ Service is not available. Make sure the server is running at {}.",
                base_url
            )
            .red()
        ),
        "Run: npm run dev".to_string(),
    ]
}

pub fn ai_status_checking() -> Vec<String> {
    vec![String::new(), "🤖 Checking AI status...".to_string()]
}

pub fn ai_status(result: &RequestResult) -> Vec<String> {
    if let Some(error) = &result.error {
        return vec![format!("{} {}", "❌ Failed to check AI status:".red(), error)];
    }

    if !result.is_ok() {
        return vec![request_failed(result.status)];
    }

    match result.parse::<AiStatus>() {
        Ok(status) => ai_status_fields(&status),
        Err(e) => vec![format!("{} {}", "❌ Failed to check AI status:".red(), e)],
    }
}

fn ai_status_fields(status: &AiStatus) -> Vec<String> {
    let mut lines = vec![
        format!("AI Enabled: {}", yes_no(status.ai_enabled)),
        format!("AI Configured: {}", yes_no(status.ai_configured)),
        format!(
            "Connection Status: {}",
            if status.connection_status {
                "CONNECTED"
            } else {
                "DISCONNECTED"
            }
        ),
    ];
    if let Some(model_info) = &status.model_info {
        lines.push(format!("Model: {}", model_info.model));
    }
    lines
}

pub fn run_header(count: usize) -> Vec<String> {
    vec![
        String::new(),
        format!("📊 Testing {} posts...", count),
        String::new(),
        rule(),
    ]
}

/// Header printed before each sample is sent; `index` is 0-based
pub fn post_header(post: &SamplePost, index: usize) -> Vec<String> {
    vec![
        String::new(),
        format!(
            "{}",
            format!("📝 Test {}: {}", index + 1, post.category).bold()
        ),
        format!("Text: \"{}\"", post.text),
    ]
}

/// Lines for a `POST /validate-post` outcome
pub fn validation(result: &RequestResult) -> Vec<String> {
    if let Some(error) = &result.error {
        return vec![request_error(error)];
    }

    match result.status {
        200 => match result.parse::<ValidationResponse>() {
            Ok(response) => detection(&response.detection),
            Err(e) => vec![request_error(&e.to_string())],
        },
        403 => {
            let mut lines = vec![format!("{}", "❌ Request blocked (IP may be blocked)".red())];
            if let Some(reason) = ErrorBody::from_result(result).reason() {
                lines.push(format!("Reason: {}", reason));
            }
            lines
        }
        status => {
            let mut lines = vec![request_failed(status)];
            let body = ErrorBody::from_result(result);
            if body.has_error() {
                lines.push(format!(
                    "Error: {}",
                    body.message.as_deref().unwrap_or("Unknown error")
                ));
            }
            lines
        }
    }
}

pub fn detection(detection: &Detection) -> Vec<String> {
    let mut lines = vec![
        format!("Result: {} {}", detection.action.emoji(), detection.action),
        format!(
            "Spam: {} (confidence: {})",
            yes_no(detection.is_spam),
            format_confidence(detection.confidence)
        ),
    ];

    if !detection.reasons.is_empty() {
        lines.push(format!("Reasons: {}", detection.reasons.join(", ")));
    }

    if let Some(ai) = &detection.ai_analysis {
        lines.extend(ai_analysis(ai));
    }

    lines
}

fn ai_analysis(ai: &AiAnalysis) -> Vec<String> {
    let mut lines = vec![
        format!(
            "AI Analysis: {} ({} severity)",
            if ai.is_spam { "SPAM" } else { "CLEAN" },
            ai.severity
        ),
        format!("AI Reasoning: {}", ai.reasoning),
    ];
    if !ai.categories.is_empty() {
        lines.push(format!("AI Categories: {}", ai.categories.join(", ")));
    }
    lines
}

fn request_error(error: &str) -> String {
    format!("{} {}", "❌ Request error:".red(), error)
}

fn request_failed(status: u16) -> String {
    format!("{}", format!("❌ Request failed (status: {})", status).red())
}

pub fn summary(count: usize, base_url: &str) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        rule(),
        format!("{}", "🎯 Test Summary:".bold()),
        format!("✅ Tested {} posts", count),
        "📈 Results show both normal and spam detection capabilities".to_string(),
        "🔧 Adjust thresholds in /config endpoint if needed".to_string(),
        String::new(),
        "💡 Try these commands to interact with the service:".to_string(),
    ];
    for path in ["/health", "/config", "/ai-status", "/blocked-ips"] {
        lines.push(format!("   curl {}{}", base_url, path));
    }
    lines
}

pub fn completed() -> Vec<String> {
    vec![String::new(), format!("{}", "✨ Test completed!".green())]
}

/// Raw dump of an informational endpoint such as `/config`
pub fn inspect(path: &str, result: &RequestResult) -> Vec<String> {
    let mut lines = vec![String::new(), format!("🔍 GET {}", path)];

    if result.status == 0 {
        lines.push(request_error(result.error.as_deref().unwrap_or("unknown error")));
        return lines;
    }

    if !result.is_ok() {
        lines.push(request_failed(result.status));
        return lines;
    }

    match &result.data {
        Some(ResponseBody::Json(value)) => match serde_json::to_string_pretty(value) {
            Ok(pretty) => lines.extend(pretty.lines().map(|l| format!("   {}", l))),
            Err(e) => lines.push(request_error(&e.to_string())),
        },
        Some(ResponseBody::Text(text)) => lines.push(format!("   {}", text)),
        None => lines.push("   (empty response)".to_string()),
    }
    lines
}

pub fn interrupted() -> Vec<String> {
    vec![String::new(), String::new(), "⏹️  Test interrupted by user".to_string()]
}

/// Top-level failure with its full cause chain
pub fn failed(error: &anyhow::Error) -> Vec<String> {
    vec![String::new(), format!("💥 Test script failed: {:#}", error)]
}
