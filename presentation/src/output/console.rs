//! Console formatting for banners, notices and errors

use colored::Colorize;
use revchat_application::ExchangeOutcome;
use revchat_domain::{ConfigIssue, Conversation, Model, Severity};

/// Formats non-reply output for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Welcome banner shown when the REPL starts
    pub fn welcome(model: &Model, base_url: &str) -> String {
        let mut output = String::new();
        output.push_str(&Self::header("revchat"));
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Model:".cyan().bold(), model));
        output.push_str(&format!("{} {}\n\n", "Server:".cyan().bold(), base_url));
        output.push_str(&Self::help());
        output
    }

    pub fn help() -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n", "Commands:".bold()));
        output.push_str("  /help, /h, /?      - Show this help\n");
        output.push_str("  /models            - List models offered by the server\n");
        output.push_str("  /model <name>      - Switch model\n");
        output.push_str("  /key <key>         - Set the API key\n");
        output.push_str("  /new               - Start a new conversation\n");
        output.push_str("  /conversation      - Show the conversation identifier\n");
        output.push_str("  /quit, /exit, /q   - Exit\n");
        output
    }

    /// Model catalogue, marking the one in use
    pub fn models(models: &[Model], current: &Model) -> String {
        if models.is_empty() {
            return format!("{}\n", "The server offers no models".dimmed());
        }
        let mut output = format!("{}\n", "Available models:".cyan().bold());
        for model in models {
            if model == current {
                output.push_str(&format!("  {} {}\n", "*".green(), model.to_string().bold()));
            } else {
                output.push_str(&format!("    {}\n", model));
            }
        }
        output
    }

    pub fn conversation(conversation: &Conversation) -> String {
        match conversation.id() {
            Some(id) if id.is_empty() => format!(
                "{} {}",
                "Conversation:".cyan().bold(),
                "(empty identifier)".dimmed()
            ),
            Some(id) => format!("{} {}", "Conversation:".cyan().bold(), id),
            None => format!("{}", "No conversation yet (assigned on first reply)".dimmed()),
        }
    }

    /// Describe a failed exchange
    pub fn failure(outcome: &ExchangeOutcome) -> String {
        let reason = outcome.error.as_deref().unwrap_or("unknown error");
        if outcome.rendered.is_empty() {
            format!("{} {}", "Request failed:".red().bold(), reason)
        } else {
            format!(
                "{} {} (partial reply kept)",
                "Stream interrupted:".red().bold(),
                reason
            )
        }
    }

    /// One line per configuration issue
    pub fn config_issues(issues: &[ConfigIssue]) -> String {
        issues
            .iter()
            .map(|issue| match issue.severity {
                Severity::Error => format!("{} {}", "config error:".red().bold(), issue.message),
                Severity::Warning => {
                    format!("{} {}", "config warning:".yellow().bold(), issue.message)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn notice(message: &str) -> String {
        format!("{} {}", "->".cyan(), message)
    }

    pub fn error(message: &str) -> String {
        format!("{} {}", "Error:".red().bold(), message)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(48);
        format!("{}\n{:^48}\n{}", line.cyan(), title.bold(), line.cyan())
    }
}
