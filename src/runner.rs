//! Test runner
//!
//! Walks through the service sequentially: health probe, AI status, one
//! validation request per sample post, then a summary. Only a failed health
//! probe stops the run; every other failure is reported and skipped.

use std::io::Write;

use chrono::Utc;
use tracing::{debug, info};

use crate::client::ServiceClient;
use crate::config::TesterConfig;
use crate::models::{RequestResult, SamplePost, ValidatePostRequest};
use crate::report;
use crate::samples::SAMPLE_POSTS;
use crate::Result;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every sample was sent; `tested` is the number of samples
    Completed { tested: usize },
    /// The health probe failed and nothing else was attempted
    ServiceUnavailable,
}

impl RunOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::Completed { .. } => 0,
            RunOutcome::ServiceUnavailable => 1,
        }
    }
}

/// Sequential test runner writing its report to `out`
pub struct TestRunner<W: Write> {
    client: ServiceClient,
    posts: &'static [SamplePost],
    out: W,
}

impl<W: Write> TestRunner<W> {
    pub fn new(config: TesterConfig, out: W) -> Result<Self> {
        Ok(Self {
            client: ServiceClient::new(config)?,
            posts: SAMPLE_POSTS,
            out,
        })
    }

    /// Replace the built-in sample list
    pub fn with_posts(mut self, posts: &'static [SamplePost]) -> Self {
        self.posts = posts;
        self
    }

    pub fn config(&self) -> &TesterConfig {
        self.client.config()
    }

    pub fn into_output(self) -> W {
        self.out
    }

    fn emit(&mut self, lines: Vec<String>) -> Result<()> {
        for line in lines {
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()?;
        Ok(())
    }

    /// Probe `/health`; false when the service is unreachable, not 200 or
    /// answers with a body that is not JSON
    pub async fn check_health(&mut self) -> Result<bool> {
        self.emit(vec![report::health_checking()])?;

        let result = self.client.get("/health").await;
        let healthy = result.is_ok() && result.error.is_none();
        debug!("health probe status {} -> healthy={}", result.status, healthy);

        self.emit(report::health(&result))?;
        Ok(healthy)
    }

    /// Report `/ai-status`; never fails the run
    pub async fn check_ai_status(&mut self) -> Result<()> {
        self.emit(report::ai_status_checking())?;
        let result = self.client.get("/ai-status").await;
        self.emit(report::ai_status(&result))
    }

    /// Send one sample to `/validate-post` and report the verdict.
    /// `index` is 0-based and also names the test user.
    pub async fn validate_post(&mut self, post: &SamplePost, index: usize) -> Result<()> {
        self.emit(report::post_header(post, index))?;

        let request = ValidatePostRequest::for_sample(post, index, Utc::now());
        let result: RequestResult = self.client.post("/validate-post", &request).await;
        debug!(
            "validate-post #{} ({}) -> status {}",
            index + 1,
            post.category,
            result.status
        );

        self.emit(report::validation(&result))
    }

    /// Dump `/config` and `/blocked-ips` as returned by the service
    pub async fn inspect_service(&mut self) -> Result<()> {
        for path in ["/config", "/blocked-ips"] {
            let result = self.client.get(path).await;
            self.emit(report::inspect(path, &result))?;
        }
        Ok(())
    }

    /// Full run: health, AI status, every sample, summary
    pub async fn run_all(&mut self) -> Result<RunOutcome> {
        self.emit(report::banner())?;

        if !self.check_health().await? {
            let base_url = self.config().base_url_str().to_string();
            self.emit(report::health_abort(&base_url))?;
            return Ok(RunOutcome::ServiceUnavailable);
        }

        self.check_ai_status().await?;

        let posts = self.posts;
        info!("Testing {} posts against {}", posts.len(), self.config().base_url_str());
        self.emit(report::run_header(posts.len()))?;

        let delay = self.config().delay();
        for (index, post) in posts.iter().enumerate() {
            self.validate_post(post, index).await?;

            if index + 1 < posts.len() && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        let base_url = self.config().base_url_str().to_string();
        self.emit(report::summary(posts.len(), &base_url))?;

        if self.config().inspect {
            self.inspect_service().await?;
        }

        self.emit(report::completed())?;
        Ok(RunOutcome::Completed {
            tested: posts.len(),
        })
    }
}
