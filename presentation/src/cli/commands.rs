//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for revchat
#[derive(Parser, Debug)]
#[command(name = "revchat")]
#[command(author, version, about = "Streaming chat client for a reverse-proxied Claude API")]
#[command(long_about = r#"
revchat sends messages to a chat API and renders the streamed reply as it
arrives. The server assigns each conversation an identifier on the first
reply; later messages continue the same conversation.

Without a question, revchat starts an interactive session.

Configuration files are loaded from (in priority order):
1. REVCHAT_* env vars     e.g. REVCHAT_SERVER__BASE_URL
2. --config <path>        Explicit config file
3. ./revchat.toml         Project-level config
4. ~/.config/revchat/config.toml   Global config

Example:
  revchat "Explain lifetimes in one paragraph"
  revchat --model claude-3-opus-20240229
  revchat --base-url http://localhost:6238 --transcript chat.html
"#)]
pub struct Cli {
    /// Send a single message and exit (interactive mode if omitted)
    pub question: Option<String>,

    /// Model to use (overrides [chat] model)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// API key (overrides [auth] settings)
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Server base URL (overrides [server] base_url)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Append each rendered reply to an HTML transcript
    #[arg(long, value_name = "PATH")]
    pub transcript: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Also write logs to a daily-rolling file in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

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
