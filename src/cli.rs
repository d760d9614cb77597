use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "waybill",
    version,
    about = "ReAct logistics agent powered by Gemini"
)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Emit the full run report as JSON instead of console narration
    #[arg(long)]
    pub json: bool,
    /// Delay in milliseconds inserted before each model and tool call
    #[arg(long)]
    pub delay_ms: Option<u64>,
    /// Maximum reason-act iterations per query
    #[arg(long)]
    pub max_iterations: Option<usize>,
    /// Query text; enters interactive mode when omitted
    #[arg()]
    pub query: Vec<String>,
}
