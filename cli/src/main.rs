//! CLI entrypoint for revchat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use revchat_application::{ListModelsUseCase, SendMessageUseCase};
use revchat_domain::{ApiKey, Conversation};
use revchat_infrastructure::{
    ConfigLoader, Endpoint, HttpChatGateway, JsonlConversationLogger, renderer_for,
};
use revchat_presentation::{
    ChatRepl, Cli, ConsoleFormatter, OutputConfig, ReplConfig, TranscriptWriter,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered file logs are flushed on exit.
    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref());

    if cli.show_config {
        print!("{}", ConfigLoader::describe_config_sources());
        return Ok(());
    }

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };

    if let Some(base_url) = &cli.base_url {
        config.server.base_url = base_url.clone();
    }
    if let Some(model) = &cli.model {
        config.chat.model = Some(model.clone());
    }

    let issues = config.validate();
    if !issues.is_empty() {
        eprintln!("{}", ConsoleFormatter::config_issues(&issues));
    }
    if issues.iter().any(|issue| issue.is_error()) {
        bail!("Invalid configuration");
    }

    let output = OutputConfig {
        format: config.output_format(),
        color: config.output.color,
    };
    if !output.color {
        colored::control::set_override(false);
    }

    let credential = match cli.api_key.as_deref() {
        Some(key) => Some(ApiKey::try_new(key).context("Invalid --api-key")?),
        None => config.auth.resolve_api_key(),
    };

    info!(
        "Starting revchat (server: {}, provider: {}, model: {})",
        config.server.base_url,
        config.server.provider,
        config.chat.model()
    );

    // === Dependency Injection ===
    let endpoint = Endpoint::new(&config.server.base_url, &config.server.provider)?;
    let server_label = endpoint.chat().to_string();
    let gateway = Arc::new(HttpChatGateway::new(
        endpoint,
        config.server.connect_timeout_secs.map(Duration::from_secs),
    )?);

    let mut send = SendMessageUseCase::new(gateway.clone(), renderer_for(output.format));
    if let Some(path) = &config.logging.conversation_log
        && let Some(logger) = JsonlConversationLogger::open(path)
    {
        send = send.with_conversation_logger(Arc::new(logger));
    }

    let transcript = cli
        .transcript
        .as_deref()
        .map(TranscriptWriter::open)
        .transpose()
        .context("Failed to open transcript")?;

    let repl_config = ReplConfig {
        show_progress: config.repl.show_progress && !cli.quiet,
        history_file: config.repl.history_path(),
    };

    let one_shot_without_key = cli.question.is_some() && credential.is_none();

    let mut repl = ChatRepl::new(
        send,
        ListModelsUseCase::new(gateway),
        Conversation::new(config.chat.model()),
    )
    .with_credential(credential)
    .with_options(config.chat.request_options())
    .with_config(repl_config)
    .with_server_label(server_label)
    .with_transcript(transcript);

    match cli.question {
        Some(question) => {
            if one_shot_without_key {
                bail!(
                    "An API key is required: pass --api-key or set {}",
                    config.auth.api_key_env
                );
            }
            if !repl.send(&question).await {
                bail!("The reply did not complete");
            }
        }
        None => repl.run().await.context("Interactive session failed")?,
    }

    Ok(())
}

/// Install the tracing subscriber.
///
/// Logs go to stderr so they never mix with replies streamed on stdout.
/// With a log directory they are also written to a daily-rolling file.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let Some(dir) = log_dir else {
        tracing_subscriber::registry()
            .with(EnvFilter::new(level))
            .with(stderr_layer)
            .init();
        return None;
    };

    std::fs::create_dir_all(dir).ok();
    let file_appender = tracing_appender::rolling::daily(dir, "revchat.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(stderr_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(false),
        )
        .init();

    Some(guard)
}
