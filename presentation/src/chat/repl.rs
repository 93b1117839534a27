//! REPL (Read-Eval-Print Loop) for interactive chat

use super::command::ReplCommand;
use crate::config::ReplConfig;
use crate::output::console::ConsoleFormatter;
use crate::output::terminal::TerminalSurface;
use crate::output::transcript::TranscriptWriter;
use crate::progress::reporter::ProgressReporter;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use revchat_application::{
    ListModelsError, ListModelsUseCase, SendMessageError, SendMessageInput, SendMessageUseCase,
};
use revchat_domain::{ApiKey, Conversation, Model, RequestOptions};
use std::io;
use tracing::{debug, info, warn};

const HISTORY_CAPACITY: usize = 1000;

/// Interactive chat REPL
///
/// Messages are sent one at a time: no new line is read until the current
/// reply has finished streaming.
pub struct ChatRepl {
    send: SendMessageUseCase,
    list_models: ListModelsUseCase,
    conversation: Conversation,
    credential: Option<ApiKey>,
    options: RequestOptions,
    config: ReplConfig,
    server_label: String,
    transcript: Option<TranscriptWriter>,
}

impl ChatRepl {
    pub fn new(
        send: SendMessageUseCase,
        list_models: ListModelsUseCase,
        conversation: Conversation,
    ) -> Self {
        Self {
            send,
            list_models,
            conversation,
            credential: None,
            options: RequestOptions::default(),
            config: ReplConfig::default(),
            server_label: String::new(),
            transcript: None,
        }
    }

    pub fn with_credential(mut self, credential: Option<ApiKey>) -> Self {
        self.credential = credential;
        self
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    /// Server description shown in the welcome banner
    pub fn with_server_label(mut self, label: impl Into<String>) -> Self {
        self.server_label = label.into();
        self
    }

    pub fn with_transcript(mut self, transcript: Option<TranscriptWriter>) -> Self {
        self.transcript = transcript;
        self
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> io::Result<()> {
        let mut line_editor = self.line_editor();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("revchat".to_string()),
            DefaultPromptSegment::Empty,
        );

        println!();
        println!(
            "{}",
            ConsoleFormatter::welcome(self.conversation.model(), &self.server_label)
        );

        loop {
            let line = match line_editor.read_line(&prompt)? {
                Signal::Success(line) => line,
                Signal::CtrlC => {
                    println!("^C");
                    continue;
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match ReplCommand::parse(line) {
                ReplCommand::Quit => {
                    println!("Bye!");
                    break;
                }
                ReplCommand::Message(message) => {
                    println!();
                    self.send(&message).await;
                    println!();
                }
                command => self.handle_command(command).await,
            }
        }

        Ok(())
    }

    /// Send one message and stream the reply to stdout.
    ///
    /// Returns `true` when the reply streamed to completion.
    pub async fn send(&mut self, message: &str) -> bool {
        let input = SendMessageInput::new(message, self.credential.clone())
            .with_options(self.options.clone());
        let mut surface = TerminalSurface::stdout();

        let result = if self.config.show_progress {
            let progress = ProgressReporter::new();
            self.send
                .execute_with_progress(&mut self.conversation, input, &mut surface, &progress)
                .await
        } else {
            self.send
                .execute(&mut self.conversation, input, &mut surface)
                .await
        };
        surface.finish();

        match result {
            Ok(outcome) => {
                if let Some(id) = &outcome.assigned_id {
                    debug!("REPL joined conversation {}", id);
                }
                if !outcome.is_completed() {
                    eprintln!("{}", ConsoleFormatter::failure(&outcome));
                }
                if let Some(transcript) = self.transcript.as_mut() {
                    transcript.record(&self.conversation, message, &outcome);
                }
                outcome.is_completed()
            }
            Err(SendMessageError::MissingCredential) => {
                self.request_credential();
                false
            }
            Err(e) => {
                eprintln!("{}", ConsoleFormatter::error(&e.to_string()));
                false
            }
        }
    }

    async fn handle_command(&mut self, command: ReplCommand) {
        match command {
            ReplCommand::Help => println!("\n{}", ConsoleFormatter::help()),
            ReplCommand::Models => self.show_models().await,
            ReplCommand::Model(Some(name)) => {
                let model = Model::from(name.as_str());
                info!("Switching model to {}", model);
                self.conversation.set_model(model);
                println!(
                    "{}",
                    ConsoleFormatter::notice(&format!("Model: {}", self.conversation.model()))
                );
            }
            ReplCommand::Model(None) => println!(
                "{}",
                ConsoleFormatter::notice(&format!("Model: {}", self.conversation.model()))
            ),
            ReplCommand::Key(Some(key)) => self.set_credential(&key),
            ReplCommand::Key(None) => self.request_credential(),
            ReplCommand::New => {
                self.conversation.reset();
                println!("{}", ConsoleFormatter::notice("Started a new conversation"));
            }
            ReplCommand::Conversation => {
                println!("{}", ConsoleFormatter::conversation(&self.conversation))
            }
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
            ReplCommand::Message(_) | ReplCommand::Quit => {}
        }
    }

    async fn show_models(&mut self) {
        match self.list_models.execute(self.credential.as_ref()).await {
            Ok(models) => println!(
                "\n{}",
                ConsoleFormatter::models(&models, self.conversation.model())
            ),
            Err(ListModelsError::MissingCredential) => self.request_credential(),
            Err(e) => eprintln!("{}", ConsoleFormatter::error(&e.to_string())),
        }
    }

    /// Ask for an API key on a history-less prompt.
    fn request_credential(&mut self) {
        println!(
            "{}",
            ConsoleFormatter::notice("An API key is required. Enter it below (empty to cancel).")
        );

        let mut editor = Reedline::create();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("api key".to_string()),
            DefaultPromptSegment::Empty,
        );
        match editor.read_line(&prompt) {
            Ok(Signal::Success(key)) if !key.trim().is_empty() => self.set_credential(&key),
            Ok(_) => println!("{}", ConsoleFormatter::notice("No API key set")),
            Err(e) => warn!("Failed to read API key: {}", e),
        }
    }

    fn set_credential(&mut self, key: &str) {
        match ApiKey::try_new(key) {
            Ok(key) => {
                println!(
                    "{}",
                    ConsoleFormatter::notice(&format!("API key set ({})", key.masked()))
                );
                self.credential = Some(key);
            }
            Err(e) => eprintln!("{}", ConsoleFormatter::error(&e.to_string())),
        }
    }

    fn line_editor(&self) -> Reedline {
        let editor = Reedline::create();
        let Some(path) = self.config.resolved_history_file() else {
            return editor;
        };
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone()) {
            Ok(history) => editor.with_history(Box::new(history)),
            Err(e) => {
                warn!("History disabled, cannot use {}: {}", path.display(), e);
                editor
            }
        }
    }
}
