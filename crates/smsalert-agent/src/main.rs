mod config;

use anyhow::Result;
use config::AgentConfig;
use smsalert_common::types::AlertEvent;
use smsalert_notify::plugin::PluginRegistry;
use smsalert_notify::schema::clickatell_configuration;
use smsalert_notify::{AlarmCallback, CallOutcome};
use std::io::Read;
use tracing_subscriber::EnvFilter;

#[allow(clippy::print_stderr)]
fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  smsalert-agent schema                   Print the requested configuration");
    eprintln!("  smsalert-agent check <config.toml>      Validate configuration against the gateway");
    eprintln!("  smsalert-agent send <config.toml> <event.json|->");
    eprintln!("                                          Send an alert event as SMS");
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("smsalert=info".parse()?))
        .init();

    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("schema") => {
            println!("{}", serde_json::to_string_pretty(&clickatell_configuration())?);
            Ok(())
        }
        Some("check") => {
            let config_path = args.get(2).ok_or_else(|| {
                print_usage();
                anyhow::anyhow!("check requires <config.toml> argument")
            })?;
            run_check(config_path).await
        }
        Some("send") => {
            let config_path = args.get(2).ok_or_else(|| {
                print_usage();
                anyhow::anyhow!("send requires <config.toml> and <event.json> arguments")
            })?;
            let event_path = args.get(3).ok_or_else(|| {
                print_usage();
                anyhow::anyhow!("send requires <event.json> argument")
            })?;
            run_send(config_path, event_path).await
        }
        _ => {
            print_usage();
            Err(anyhow::anyhow!("missing or unknown command"))
        }
    }
}

async fn activate(config_path: &str) -> Result<Box<dyn AlarmCallback>> {
    let config = AgentConfig::load(config_path)?;
    let registry = PluginRegistry::default();
    let callback = registry.create_callback(&config.plugin, &config.gateway)?;
    callback.initialize(&config.alarm).await?;
    tracing::info!(callback = callback.name(), "Alarm callback active");
    Ok(callback)
}

async fn run_check(config_path: &str) -> Result<()> {
    let callback = activate(config_path).await?;
    callback.check_configuration().await?;
    for (_, pair) in callback.attributes().await {
        println!("{pair}");
    }
    Ok(())
}

fn read_event(path: &str) -> Result<AlertEvent> {
    let content = if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&content)?)
}

async fn run_send(config_path: &str, event_path: &str) -> Result<()> {
    let event = read_event(event_path)?;
    let callback = activate(config_path).await?;

    match callback.call(&event).await? {
        CallOutcome::Skipped => {
            tracing::warn!("Alarm callback inactive, nothing sent");
        }
        CallOutcome::Sent { text, results } => {
            tracing::info!(message = %text, "Short message dispatched");
            for result in results {
                println!(
                    "{}\t{}\t{}",
                    result.recipient,
                    if result.accepted { "accepted" } else { "rejected" },
                    result
                        .message_id
                        .or(result.error)
                        .unwrap_or_else(|| "-".to_string())
                );
            }
        }
        CallOutcome::Failed { error, .. } => {
            return Err(anyhow::anyhow!("Sending short message failed: {error}"));
        }
    }
    Ok(())
}
