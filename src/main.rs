// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Fetch Interceptor CLI
//!
//! Pattern testing plus blocking and watching requests on a live DevTools target.

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;

use fetch_interceptor::network::{get_url_pattern_regex, UrlPattern};
use fetch_interceptor::{
    CdpSession, ErrorReason, Interception, InterceptorConfig, RequestInterceptionManager,
    RequestModification,
};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("fetch_interceptor=info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    let result = match args[1].as_str() {
        "match" => {
            if args.len() < 4 {
                eprintln!("Usage: fetch-interceptor match <pattern> <url>");
                return ExitCode::from(1);
            }
            match_url(&args[2], &args[3])
        }
        "block" => {
            if args.len() < 4 {
                eprintln!("Usage: fetch-interceptor block <ws-url> <pattern> [error-reason]");
                return ExitCode::from(1);
            }
            block(&args[2], &args[3], args.get(4).map(String::as_str)).await
        }
        "watch" => {
            if args.len() < 4 {
                eprintln!("Usage: fetch-interceptor watch <ws-url> <pattern>");
                return ExitCode::from(1);
            }
            watch(&args[2], &args[3]).await
        }
        "--help" | "-h" | "help" => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        "--version" | "-v" | "version" => {
            println!("fetch-interceptor {}", fetch_interceptor::VERSION);
            return ExitCode::SUCCESS;
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            return ExitCode::from(1);
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"Fetch Interceptor - DevTools request interception

USAGE:
    fetch-interceptor <COMMAND> [OPTIONS]

COMMANDS:
    match <pattern> <url>                      Test a URL glob against a URL
    block <ws-url> <pattern> [error-reason]    Fail matching requests until Ctrl-C
    watch <ws-url> <pattern>                   Log matching responses until Ctrl-C
    help                                       Show this help message
    version                                    Show version information

PATTERNS:
    *    any run of characters, including none
    ?    exactly one character

EXAMPLES:
    fetch-interceptor match "*://example.com/*" https://example.com/app.js
    fetch-interceptor block ws://127.0.0.1:9222/devtools/page/ABC "*.png" BlockedByClient
    fetch-interceptor watch ws://127.0.0.1:9222/devtools/page/ABC "*/api/*"

Set RUST_LOG=fetch_interceptor=debug for per-request tracing.
"#
    );
}

fn match_url(pattern: &str, url: &str) -> anyhow::Result<ExitCode> {
    let compiled = UrlPattern::compile(pattern)?;

    println!("Pattern: {}", pattern);
    println!("Regex:   {}", get_url_pattern_regex(pattern));
    println!("URL:     {}", url);

    if compiled.is_match(url) {
        println!("Result:  match");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("Result:  no match");
        Ok(ExitCode::from(2))
    }
}

async fn block(ws_url: &str, pattern: &str, reason: Option<&str>) -> anyhow::Result<ExitCode> {
    let reason: ErrorReason = match reason {
        Some(r) => r.parse()?,
        None => ErrorReason::BlockedByClient,
    };

    let (session, events) = CdpSession::connect(ws_url)
        .await
        .with_context(|| format!("Failed to connect to {}", ws_url))?;
    let manager = Arc::new(RequestInterceptionManager::with_config(
        session,
        InterceptorConfig::for_exclusive_session(),
    ));
    let subscription = manager.listen(events);

    manager
        .intercept([Interception::new(pattern).modify_request(move |event| async move {
            println!("Blocked: {} {}", event.request.method, event.url());
            Ok(Some(RequestModification::fail(reason)))
        })])
        .await
        .context("Failed to enable interception")?;

    println!("Blocking {} with {} (Ctrl-C to stop)", pattern, reason);
    run_until_interrupted(&manager).await?;

    subscription.unsubscribe();
    Ok(ExitCode::SUCCESS)
}

async fn watch(ws_url: &str, pattern: &str) -> anyhow::Result<ExitCode> {
    let (session, events) = CdpSession::connect(ws_url)
        .await
        .with_context(|| format!("Failed to connect to {}", ws_url))?;
    let manager = Arc::new(RequestInterceptionManager::with_config(
        session,
        InterceptorConfig::for_exclusive_session(),
    ));
    let subscription = manager.listen(events);

    manager
        .intercept([Interception::new(pattern).modify_response(|body, event| async move {
            println!(
                "{} {} ({} bytes)",
                event.response_status_code.unwrap_or_default(),
                event.url(),
                body.len()
            );
            Ok(None)
        })])
        .await
        .context("Failed to enable interception")?;

    println!("Watching {} (Ctrl-C to stop)", pattern);
    run_until_interrupted(&manager).await?;

    subscription.unsubscribe();
    Ok(ExitCode::SUCCESS)
}

async fn run_until_interrupted(
    manager: &RequestInterceptionManager<CdpSession>,
) -> anyhow::Result<()> {
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;

    manager.clear().await.context("Failed to disable interception")?;

    let report = manager.metrics().report();
    println!("\n=== Metrics ===");
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
