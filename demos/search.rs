//! Search form demonstration.
//!
//! Demonstrates:
//! - Launching geckodriver or attaching to a running driver
//! - Composing locators with `&`, `|` and `!`
//! - Waiting for the document and for elements
//! - Writing into a field and reading results
//! - Structured protocol errors
//!
//! Usage:
//!   cargo run --example search
//!   cargo run --example search -- --attach http://127.0.0.1:4444
//!   cargo run --example search -- --debug
//!
//! `GECKODRIVER` overrides the geckodriver path.

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use anyhow::Context;
use remote_webdriver::{
    By, DocumentCondition, Driver, ElementCondition, FirefoxOptions, HtmlTag, WaitOptions,
};
use tracing_subscriber::EnvFilter;

// ============================================================================
// Constants
// ============================================================================

const TEST_URL: &str = "https://html.duckduckgo.com/html/";
const DEFAULT_GECKODRIVER: &str = "/usr/local/bin/geckodriver";

// ============================================================================
// Args
// ============================================================================

#[derive(Debug, Clone)]
struct Args {
    debug: bool,
    attach: Option<String>,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = std::env::args().collect();
        Self {
            debug: args.iter().any(|a| a == "--debug"),
            attach: args
                .iter()
                .position(|a| a == "--attach")
                .and_then(|i| args.get(i + 1).cloned()),
        }
    }
}

fn init_logging(debug: bool) {
    let filter = if debug {
        "remote_webdriver=debug"
    } else {
        "remote_webdriver=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .init();
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.debug);

    if let Err(e) = run(args).await {
        eprintln!("\n[ERROR] {e:#}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    println!("=== Search ===\n");

    // ========================================================================
    // Setup
    // ========================================================================

    let builder = Driver::builder().firefox(FirefoxOptions::headless().with_window_size(1280, 720));
    let builder = match &args.attach {
        Some(url) => builder.attach(url),
        None => builder.binary(
            std::env::var("GECKODRIVER").unwrap_or_else(|_| DEFAULT_GECKODRIVER.to_string()),
        ),
    };

    let session = builder
        .build()
        .context("driver configuration")?
        .launch()
        .await
        .context("session creation")?;
    println!("[Setup] Session {}", session.id());

    let window = session.window().await?;
    window.navigate(TEST_URL).await?;
    window
        .wait_for_document(DocumentCondition::Ready, WaitOptions::default())
        .await?;
    println!("[1] Loaded: {}", window.title().await?);

    // ========================================================================
    // Locate and write
    // ========================================================================

    let field = By::tag(HtmlTag::INPUT) & (By::name().equals("q") | By::r#type().equals("search"));
    println!("[2] Query: {}", field.compile()?);

    let input = window
        .wait_for_element(field, ElementCondition::Enabled, WaitOptions::default())
        .await?;
    input.write("rust webdriver").await?;

    // ========================================================================
    // Results
    // ========================================================================

    let results = By::tag(HtmlTag::A) & By::class().contains("result__a") & !By::href().contains("ad_");
    let first = window
        .wait_for_element(
            &results,
            ElementCondition::Presence,
            WaitOptions::default().with_timeout(Duration::from_secs(10)),
        )
        .await?;
    println!("[3] First result: {}", first.text().await?);

    let all = window.find_elements(&results).await?;
    println!("    {} results on the page", all.len());

    // ========================================================================
    // Errors
    // ========================================================================

    match window.find_element(By::id().equals("does-not-exist")).await {
        Ok(_) => println!("[4] Unexpectedly found the missing element"),
        Err(e) if e.is_no_such_element() => println!("[4] Missing element reported as:\n{e}"),
        Err(e) => return Err(e.into()),
    }

    session.close().await?;
    println!("\n=== Done ===");
    Ok(())
}
