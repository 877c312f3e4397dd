//! Spam Detection Tester CLI
//!
//! Runs the sample posts against a spam detection service and prints the
//! verdicts. With no flags it targets `http://localhost:3000`.
//!
//! Run with: cargo run --bin spam-tester

use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use spam_detection_tester::{report, RunOutcome, TestRunner, TesterConfig};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "spam-tester")]
#[command(about = "Send sample posts to a spam detection service and report the verdicts")]
#[command(version)]
struct Cli {
    /// Base URL of the spam detection service
    #[arg(long, env = "SPAM_SERVICE_URL", default_value = spam_detection_tester::DEFAULT_BASE_URL)]
    base_url: String,

    /// Delay between validation requests in milliseconds
    #[arg(long, env = "SPAM_TEST_DELAY_MS", default_value_t = spam_detection_tester::config::DEFAULT_DELAY_MS)]
    delay_ms: u64,

    /// Per-request timeout in seconds
    #[arg(long, env = "SPAM_TEST_TIMEOUT_SECS", default_value_t = spam_detection_tester::config::DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Also dump /config and /blocked-ips after the summary
    #[arg(long)]
    inspect: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

async fn run(cli: Cli) -> Result<RunOutcome> {
    let config = TesterConfig::default()
        .with_base_url(&cli.base_url)
        .context("Invalid --base-url")?
        .with_delay_ms(cli.delay_ms)
        .with_timeout_secs(cli.timeout_secs)
        .with_inspect(cli.inspect);

    info!("Target service: {}", config.base_url_str());
    debug!(
        "delay={}ms timeout={}s inspect={}",
        config.delay_ms, config.timeout_secs, config.inspect
    );

    let mut runner = TestRunner::new(config, std::io::stdout())
        .context("Failed to initialize test runner")?;
    let outcome = runner.run_all().await?;
    Ok(outcome)
}

#[tokio::main]
async fn main() {
    // .env is optional
    let _ = dotenv();

    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the report
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = tokio::select! {
        result = run(cli) => match result {
            Ok(outcome) => outcome.exit_code(),
            Err(e) => {
                print_lines(report::failed(&e));
                1
            }
        },
        Ok(()) = tokio::signal::ctrl_c() => {
            print_lines(report::interrupted());
            0
        }
    };

    std::process::exit(exit_code);
}
