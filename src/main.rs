// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! authfetch CLI
//!
//! Runs single calls through the interceptor against a configured backend.

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use authfetch::{
    AuthConfig, CredentialStore, FetchInterceptor, HttpClient, HttpClientConfig,
    MemoryCredentialStore, Request,
};
use reqwest::Method;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("authfetch=info".parse().expect("static directive")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    match args[1].as_str() {
        "fetch" => {
            if args.len() < 3 {
                eprintln!("Usage: authfetch fetch <url> [--method M] [--data BODY]");
                return ExitCode::from(1);
            }
            run(fetch_url(&args[2], &args[3..])).await
        }
        "me" => run(current_user()).await,
        "refresh" => run(force_refresh()).await,
        "--help" | "-h" | "help" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "--version" | "-v" | "version" => {
            println!("authfetch {}", authfetch::VERSION);
            ExitCode::SUCCESS
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"authfetch - Bearer-token fetch interceptor

USAGE:
    authfetch <COMMAND> [OPTIONS]

COMMANDS:
    fetch <url>     Send one request through the interceptor
    me              Show the current user
    refresh         Force a token refresh and show the payload
    help            Show this help message
    version         Show version information

OPTIONS (fetch):
    --method <M>    HTTP method (default GET)
    --data <BODY>   Request body

ENVIRONMENT:
    AUTHFETCH_CONFIG              JSON config file (replaces the variables below)
    AUTHFETCH_API_BASE            Backend base URL
    AUTHFETCH_TOKEN               Initial access token
    AUTHFETCH_REFRESH_TOKEN       Initial refresh token
    AUTHFETCH_REFRESH_TOKEN_KEY   Storage key for the refresh token
    RUST_LOG                      Log filter, e.g. authfetch=debug

EXAMPLES:
    AUTHFETCH_API_BASE=http://localhost:3000 AUTHFETCH_TOKEN=T1 authfetch fetch /api/widgets
    authfetch fetch /api/items --method POST --data '{{"name":"a"}}'
"#
    );
}

async fn run(fut: impl std::future::Future<Output = anyhow::Result<()>>) -> ExitCode {
    match fut.await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

/// Interceptor plus the store it writes to
fn build() -> anyhow::Result<(FetchInterceptor, Arc<MemoryCredentialStore>)> {
    let config = match env::var("AUTHFETCH_CONFIG") {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path))?;
            AuthConfig::from_json(&json).with_context(|| format!("invalid config {}", path))?
        }
        Err(_) => AuthConfig::from_env(),
    };

    let mut http_config = HttpClientConfig::default();
    if config.api_base.starts_with("http") {
        http_config = http_config
            .origin(&config.api_base)
            .context("invalid AUTHFETCH_API_BASE")?;
    }
    let http = HttpClient::with_config(http_config).context("failed to build HTTP client")?;

    let store = Arc::new(MemoryCredentialStore::new(&config));
    if let Ok(token) = env::var("AUTHFETCH_TOKEN") {
        store.set_token(&token);
    }
    if let Ok(token) = env::var("AUTHFETCH_REFRESH_TOKEN") {
        store.set_refresh_token(&token);
    }

    let interceptor = FetchInterceptor::new(Arc::new(http), config, Some(store.clone()));
    Ok((interceptor, store))
}

async fn fetch_url(url: &str, options: &[String]) -> anyhow::Result<()> {
    let (interceptor, store) = build()?;

    let mut method = Method::GET;
    let mut data = None;
    let mut iter = options.iter();
    while let Some(opt) = iter.next() {
        match opt.as_str() {
            "--method" | "-X" => {
                let value = iter.next().context("--method needs a value")?;
                method = value
                    .to_uppercase()
                    .parse()
                    .with_context(|| format!("invalid method {}", value))?;
            }
            "--data" | "-d" => {
                data = Some(iter.next().context("--data needs a value")?.clone());
            }
            other => anyhow::bail!("unknown option {}", other),
        }
    }

    let mut request = Request::new(method, url);
    if let Some(body) = data {
        request = request.body(body);
    }

    println!(
        "Fetching: {} ({})",
        url,
        interceptor.classifier().classify(url)
    );
    let response = interceptor.fetch(request).await?;

    println!("\n=== Response ===");
    println!("Status: {}", response.status);
    println!("URL: {}", response.url);
    println!("Content-Type: {:?}", response.content_type());
    println!("Time: {}ms", response.response_time_ms);
    println!("\n{}", response.text_lossy());

    if store.token().as_deref() != env::var("AUTHFETCH_TOKEN").ok().as_deref() {
        println!("\n[i] Access token was refreshed during the call");
    }

    Ok(())
}

async fn current_user() -> anyhow::Result<()> {
    let (interceptor, _) = build()?;
    let user = interceptor.auth_api().get_current_user().await?;
    println!("{}", serde_json::to_string_pretty(&user)?);
    Ok(())
}

async fn force_refresh() -> anyhow::Result<()> {
    let (interceptor, _) = build()?;
    let payload = interceptor.auth_api().force_refresh().await?;
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
