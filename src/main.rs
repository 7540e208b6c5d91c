#![cfg_attr(not(test), deny(clippy::panic))]

use clap::Parser;
use emotisound_signaling::config;
use emotisound_signaling::logging;
use emotisound_signaling::relay::SignalingRelay;
use emotisound_signaling::websocket;
use std::net::SocketAddr;

/// EmotiSound signaling relay -- WebSocket rendezvous for P2P video calls
#[derive(Parser, Debug)]
#[command(name = "emotisound-signaling")]
#[command(about = "A lightweight, in-memory WebSocket signaling relay for peer-to-peer video calls")]
#[command(version)]
struct Cli {
    /// Validate configuration and exit without starting the server.
    /// Useful for CI/CD pipelines and pre-deployment checks.
    #[arg(long, short = 'c', conflicts_with = "print_config")]
    validate_config: bool,

    /// Print the loaded configuration to stdout (as JSON) and exit.
    /// Useful for debugging configuration loading from multiple sources.
    #[arg(long, conflicts_with = "validate_config")]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration from config.json if present; otherwise use code defaults.
    let cfg = config::load();

    // Handle --print-config: output the loaded configuration as JSON
    if cli.print_config {
        let json = serde_json::to_string_pretty(&cfg)
            .map_err(|e| anyhow::anyhow!("Failed to serialize config: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    // config::load() already validates but only warns on stderr; capture the
    // result here for a proper exit code and hard failure at startup.
    let validation_result = config::validate(&cfg);

    // Handle --validate-config: exit after validation
    if cli.validate_config {
        match validation_result {
            Ok(()) => {
                println!("Configuration validation passed");
                println!();
                println!("Configuration summary:");
                println!("  Port: {}", cfg.port);
                println!("  Max message size: {} bytes", cfg.relay.max_message_size);
                println!(
                    "  Max connections per IP: {}",
                    cfg.relay.max_connections_per_ip
                );
                println!(
                    "  Outbound queue size: {}",
                    cfg.relay.outbound_queue_size
                );
                println!("  CORS origins: {}", cfg.relay.cors_origins);
                return Ok(());
            }
            Err(e) => {
                eprintln!("Configuration validation failed:\n{e}");
                std::process::exit(1);
            }
        }
    }

    // In normal operation, propagate validation errors
    validation_result?;

    // Initialize logging from config.
    logging::init_with_config(&cfg.logging);

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));

    tracing::info!(%addr, "Starting EmotiSound signaling relay");

    let relay = SignalingRelay::new(cfg.relay.clone());

    let app = websocket::create_router(&cfg.relay.cors_origins)
        .fallback(|| async {
            "EmotiSound signaling relay. Use /ws for the WebSocket protocol, /health for liveness, /metrics for counters."
        })
        .with_state(relay);

    // Plain TCP; TLS termination belongs to the reverse proxy in front.
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        cors_origins = %cfg.relay.cors_origins,
        "Relay started - WebSocket: /ws, Health: /health, Metrics: /metrics"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

#[cfg(test)]
mod cli_tests {
    use super::Cli;
    use clap::Parser;

    #[test]
    fn test_cli_default_no_flags() {
        let cli = Cli::try_parse_from(["emotisound-signaling"]).unwrap();
        assert!(!cli.validate_config);
        assert!(!cli.print_config);
    }

    #[test]
    fn test_cli_validate_config_long() {
        let cli = Cli::try_parse_from(["emotisound-signaling", "--validate-config"]).unwrap();
        assert!(cli.validate_config);
        assert!(!cli.print_config);
    }

    #[test]
    fn test_cli_validate_config_short() {
        let cli = Cli::try_parse_from(["emotisound-signaling", "-c"]).unwrap();
        assert!(cli.validate_config);
        assert!(!cli.print_config);
    }

    #[test]
    fn test_cli_print_config() {
        let cli = Cli::try_parse_from(["emotisound-signaling", "--print-config"]).unwrap();
        assert!(!cli.validate_config);
        assert!(cli.print_config);
    }

    #[test]
    fn test_cli_validate_and_print_config_conflict() {
        // --validate-config and --print-config are mutually exclusive
        let result = Cli::try_parse_from([
            "emotisound-signaling",
            "--validate-config",
            "--print-config",
        ]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("cannot be used with"));
    }

    #[test]
    fn test_cli_version() {
        let result = Cli::try_parse_from(["emotisound-signaling", "--version"]);
        assert!(result.is_err()); // --version causes early exit
    }
}
