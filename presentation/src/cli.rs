//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the code-explainer gateway
#[derive(Parser, Debug)]
#[command(name = "code-explainer")]
#[command(
    author,
    version,
    about = "Gateway that explains and visualizes pasted code via OpenRouter"
)]
#[command(long_about = r#"
Code Explainer serves a small HTTP API for a browser frontend:

  POST /explain     Explain pasted source code as markdown
  POST /visualize   Render a diagram image of pasted source code
  GET  /health      Liveness probe

Upstream calls go to OpenRouter through an ordered fallback list of
candidate models with bounded retries and linear backoff.

Configuration is loaded from (in priority order):
1. EXPLAINER_* environment variables (and OPENROUTER_API_KEY)
2. --config <path>     Explicit config file
3. ./explainer.toml    Project-level config

Example:
  OPENROUTER_API_KEY=sk-or-... code-explainer --port 5050 -v
"#)]
pub struct Cli {
    /// Port to listen on (overrides configuration)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Host address to bind (overrides configuration)
    #[arg(long)]
    pub host: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
