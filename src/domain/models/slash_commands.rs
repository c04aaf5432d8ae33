#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

pub struct SlashCommand {
    command: String,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let prefix = text.trim().split(' ').next().unwrap_or_default();
        let cmd = SlashCommand {
            command: prefix.to_string(),
        };
        if cmd.is_quit() || cmd.is_transcript() || cmd.is_document() || cmd.is_help() {
            return Some(cmd);
        }

        return None;
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_transcript(&self) -> bool {
        return ["/t", "/transcript", "/history"].contains(&self.command.as_str());
    }

    pub fn is_document(&self) -> bool {
        return ["/d", "/document"].contains(&self.command.as_str());
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }
}

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /transcript /history (/t) - Prints every question and answer of this conversation.
- /document (/d) - Shows the document being discussed and whether it is ready for questions.
- /quit /exit (/q) - Leave the chat.
- /help (/h) - Provides this help menu.

Anything else is sent to the backend as a question about the document.
        "#;

    return text.trim().to_string();
}
