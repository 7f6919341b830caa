use honeypot::config::HoneypotConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = HoneypotConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("  export HONEYPOT_API_KEY=...");
        std::process::exit(1);
    });

    eprintln!("🍯 Honeypot v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Listening: http://{}/api/honeypot", config.listen_addr);
    eprintln!("   Callback: {}", config.callback.url);
    eprintln!(
        "   Callback timeout: {}s, attempts: {}",
        config.callback.timeout.as_secs(),
        config.callback.max_attempts
    );
    match config.max_tracked_sessions {
        Some(max) => eprintln!("   Session memory: bounded ({} sessions)", max),
        None => eprintln!("   Session memory: unbounded"),
    }

    honeypot::server::serve(config).await?;
    Ok(())
}
