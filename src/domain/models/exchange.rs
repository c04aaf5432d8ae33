#[cfg(test)]
#[path = "exchange_test.rs"]
mod tests;

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Answer {
    Pending,
    Answered(String),
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Pending => return write!(f, "..."),
            Answer::Answered(text) => return write!(f, "{text}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatExchange {
    pub question: String,
    pub answer: Answer,
}

impl ChatExchange {
    pub fn pending(question: &str) -> ChatExchange {
        return ChatExchange {
            question: question.to_string(),
            answer: Answer::Pending,
        };
    }

    pub fn is_pending(&self) -> bool {
        return self.answer == Answer::Pending;
    }
}

/// Ordered question/answer pairs of the running conversation. Entries are
/// appended as tentative and then either committed with the real answer or
/// reverted, so a pending entry never outlives its request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transcript {
    exchanges: Vec<ChatExchange>,
}

impl Transcript {
    pub fn exchanges(&self) -> &[ChatExchange] {
        return &self.exchanges;
    }

    pub fn len(&self) -> usize {
        return self.exchanges.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.exchanges.is_empty();
    }

    pub fn has_pending(&self) -> bool {
        return self.exchanges.iter().any(|e| return e.is_pending());
    }

    /// Appends a pending exchange and returns its index.
    pub fn begin(&mut self, question: &str) -> usize {
        self.exchanges.push(ChatExchange::pending(question));
        return self.exchanges.len() - 1;
    }

    pub fn commit(&mut self, idx: usize, answer: &str) {
        if let Some(exchange) = self.exchanges.get_mut(idx) {
            exchange.answer = Answer::Answered(answer.to_string());
        }
    }

    pub fn revert(&mut self, idx: usize) {
        if idx < self.exchanges.len() && self.exchanges[idx].is_pending() {
            self.exchanges.remove(idx);
        }
    }
}
