//! Input line parsing.

/// What the visitor typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Free text to send to the assistant.
    Say(String),
    /// `/new`: start a fresh conversation.
    NewConversation,
    /// `/retry`: activate the most recent re-check action.
    Retry,
    /// `/quit`: leave.
    Quit,
    /// `/help` or an unrecognized slash command.
    Help,
}

impl Command {
    /// Parses one input line.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let Some(name) = trimmed.strip_prefix('/') else {
            return Self::Say(line.to_string());
        };
        match name.trim().to_ascii_lowercase().as_str() {
            "new" | "nouveau" => Self::NewConversation,
            "retry" | "reverifier" => Self::Retry,
            "quit" | "exit" => Self::Quit,
            _ => Self::Help,
        }
    }
}

/// Usage shown for `/help` and unknown commands.
pub const HELP: &str = "Commandes : /new (nouvelle conversation), /retry (re-vérifier le ticket), /quit";
