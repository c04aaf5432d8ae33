#[cfg(test)]
#[path = "notify_test.rs"]
mod tests;

use yansi::Paint;

use crate::domain::models::ClientError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
    Warning,
}

/// A single line of feedback shown to the user after a command or question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub text: String,
}

impl Notification {
    pub fn success(text: &str) -> Notification {
        return Notification {
            level: Level::Success,
            text: text.to_string(),
        };
    }

    pub fn error(text: &str) -> Notification {
        return Notification {
            level: Level::Error,
            text: text.to_string(),
        };
    }

    pub fn warning(text: &str) -> Notification {
        return Notification {
            level: Level::Warning,
            text: text.to_string(),
        };
    }

    pub fn from_error(err: &ClientError) -> Notification {
        match err {
            ClientError::Validation(message) => return Notification::warning(message),
            ClientError::Unauthenticated(message) => return Notification::error(message),
            ClientError::Remote { message, .. } => return Notification::error(message),
        }
    }

    pub fn render(&self) -> String {
        match self.level {
            Level::Success => return Paint::green(&self.text).to_string(),
            Level::Error => return Paint::red(&self.text).to_string(),
            Level::Warning => return Paint::yellow(&self.text).to_string(),
        }
    }

    pub fn print(&self) {
        if self.level == Level::Error {
            eprintln!("{}", self.render());
        } else {
            println!("{}", self.render());
        }
    }
}
