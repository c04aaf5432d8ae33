#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;

use crate::domain::models::ChatGateway;
use crate::domain::models::ChatMode;
use crate::domain::models::ClientError;
use crate::domain::models::Document;
use crate::domain::models::EmbeddingStatus;
use crate::domain::models::Transcript;

/// State behind the chat screen: the document being discussed, whether the
/// backend is ready to answer questions about it, and the transcript.
pub struct Conversation {
    pub mode: ChatMode,
    pub document: Option<Document>,
    pub transcript: Transcript,
    ready: bool,
}

impl Conversation {
    pub fn new(mode: ChatMode) -> Conversation {
        return Conversation {
            mode,
            document: None,
            transcript: Transcript::default(),
            ready: false,
        };
    }

    pub fn is_ready(&self) -> bool {
        return self.ready;
    }

    /// Swapping documents in two-phase mode requires indexing the new one
    /// before any further question.
    pub fn attach_document(&mut self, document: Document) {
        self.document = Some(document);
        self.ready = !self.mode.requires_embeddings();
    }

    pub async fn prepare(
        &mut self,
        gateway: &(dyn ChatGateway + Send + Sync),
    ) -> Result<EmbeddingStatus, ClientError> {
        if self.document.is_none() {
            return Err(ClientError::validation("Please upload a PDF file first"));
        }

        if !self.mode.requires_embeddings() {
            self.ready = true;
            return Ok(EmbeddingStatus {
                status: "not required".to_string(),
                error: None,
            });
        }

        self.ready = false;
        let status = gateway.generate_embeddings().await?;
        self.ready = status.is_complete();
        tracing::debug!(status = ?status, ready = self.ready, "embeddings generated");

        return Ok(status);
    }

    pub fn check_send(&self, question: &str) -> Result<(), ClientError> {
        if self.document.is_none() {
            return Err(ClientError::validation("Please upload a PDF file first"));
        }
        if question.trim().is_empty() {
            return Err(ClientError::validation("Please enter a question"));
        }
        if !self.ready {
            return Err(ClientError::validation(
                "The document is still being indexed, try again once it is ready",
            ));
        }
        if self.transcript.has_pending() {
            return Err(ClientError::validation(
                "Please wait for the previous answer",
            ));
        }

        return Ok(());
    }

    /// Adds the question as pending, then commits the answer or drops the
    /// pending entry so a failure leaves the transcript as it was.
    pub async fn ask(
        &mut self,
        gateway: &(dyn ChatGateway + Send + Sync),
        question: &str,
    ) -> Result<String, ClientError> {
        self.check_send(question)?;

        let idx = self.transcript.begin(question);
        let document = match self.mode {
            ChatMode::Combined => self.document.as_ref(),
            ChatMode::TwoPhase => None,
        };

        match gateway.send_message(question, document).await {
            Ok(answer) => {
                self.transcript.commit(idx, &answer);
                return Ok(answer);
            }
            Err(err) => {
                tracing::error!(err = ?err, "question failed, reverting transcript");
                self.transcript.revert(idx);
                return Err(err);
            }
        }
    }
}
