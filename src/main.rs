use std::error::Error;
use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

use waybill::application::agent::{Agent, RunStatus};
use waybill::application::console::{self, ConsoleObserver};
use waybill::application::tooling::builtin_registry;
use waybill::cli::Cli;
use waybill::config::AppConfig;
use waybill::infrastructure::model::GeminiClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    info!("Starting waybill");
    let cli = Cli::parse();
    debug!(config = ?cli.config, json = cli.json, "CLI arguments parsed");

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(path) = &cli.config {
        info!(path = %path.display(), "Loaded configuration from file");
    } else {
        info!("Loaded configuration using default path or defaults");
    }
    apply_cli_overrides(&cli, &mut config);

    let registry = Arc::new(builtin_registry()?);
    info!(tools = registry.len(), "Tool registry assembled");

    let model = GeminiClient::from_config(&config.provider);
    let agent = Agent::new(model, registry, config.agent.clone());

    match load_query(&cli)? {
        Some(query) => {
            if cli.json {
                let report = agent.run(&query).await;
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                let agent = agent.with_observer(Arc::new(ConsoleObserver));
                let report = agent.run(&query).await;
                console::separator("RESPONSE", '-');
                if report.status == RunStatus::Failed {
                    if let Some(failure) = &report.failure {
                        println!("The run failed: {failure}");
                    }
                } else if let Some(answer) = &report.answer {
                    println!("{answer}");
                }
            }
        }
        None => {
            let agent = agent.with_observer(Arc::new(ConsoleObserver));
            console::run_interactive(&agent).await?;
        }
    }

    info!("Waybill execution finished");
    Ok(())
}

fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_level(true)
            .init();
    });
}

fn apply_cli_overrides(cli: &Cli, config: &mut AppConfig) {
    if let Some(delay_ms) = cli.delay_ms {
        config.agent.step_delay = (delay_ms > 0).then(|| Duration::from_millis(delay_ms));
        info!(delay_ms, "Step delay overridden from CLI");
    }
    if let Some(max_iterations) = cli.max_iterations {
        config.agent.max_iterations = max_iterations.max(1);
        info!(max_iterations, "Iteration cap overridden from CLI");
    }
}

fn load_query(cli: &Cli) -> Result<Option<String>, Box<dyn Error>> {
    if !cli.query.is_empty() {
        info!("Using query provided through CLI arguments");
        let joined = cli.query.join(" ");
        return Ok(Some(joined.trim().to_string()));
    }

    if atty::isnt(atty::Stream::Stdin) {
        info!("Reading query from standard input");
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        let trimmed = buffer.trim();
        if !trimmed.is_empty() {
            return Ok(Some(trimmed.to_string()));
        }
    }

    Ok(None)
}
