#[cfg(test)]
#[path = "app_test.rs"]
mod tests;

use std::path::Path;

use anyhow::Result;
use tokio::io;
use tokio::io::AsyncBufRead;
use tokio::io::AsyncBufReadExt;

use super::Notification;
use crate::domain::models::help_text;
use crate::domain::models::AuthGatewayBox;
use crate::domain::models::ChatGatewayBox;
use crate::domain::models::ClientError;
use crate::domain::models::Document;
use crate::domain::models::HistoryGatewayBox;
use crate::domain::models::Route;
use crate::domain::models::RouteDecision;
use crate::domain::models::SlashCommand;
use crate::domain::models::UploadGatewayBox;
use crate::domain::services::Conversation;
use crate::domain::services::RouteGuard;
use crate::domain::services::SessionStore;
use crate::infrastructure::api::ApiAuth;
use crate::infrastructure::api::ApiChat;
use crate::infrastructure::api::ApiClient;
use crate::infrastructure::api::ApiHistory;
use crate::infrastructure::api::ApiUpload;
use crate::infrastructure::storage::LocalStorage;

/// Every command runs through `App`. It owns the session and the gateways,
/// checks the route guard before touching the network, and turns gateway
/// failures into notifications.
pub struct App {
    pub session: SessionStore,
    auth: AuthGatewayBox,
    upload: UploadGatewayBox,
    chat: ChatGatewayBox,
    history: HistoryGatewayBox,
}

impl App {
    pub fn new(
        session: SessionStore,
        auth: AuthGatewayBox,
        upload: UploadGatewayBox,
        chat: ChatGatewayBox,
        history: HistoryGatewayBox,
    ) -> App {
        return App {
            session,
            auth,
            upload,
            chat,
            history,
        };
    }

    /// Builds the HTTP gateways against the configured API URL, sharing one
    /// session store between them.
    pub fn from_config() -> Result<App> {
        let session = SessionStore::load(LocalStorage::default())?;
        let client = ApiClient::from_config(session.clone());

        return Ok(App::new(
            session,
            Box::new(ApiAuth::new(client.clone())),
            Box::new(ApiUpload::new(client.clone())),
            Box::new(ApiChat::from_config(client.clone())),
            Box::new(ApiHistory::new(client)),
        ));
    }

    /// Where the user lands when no command is given.
    pub fn landing(&self) -> Route {
        return RouteGuard::resolve(&self.session, Route::Root);
    }

    fn enter(&self, route: Route) -> bool {
        match RouteGuard::check(&self.session, route) {
            RouteDecision::Allow => return true,
            RouteDecision::Redirect(Route::Login) => {
                Notification::warning("Please login first with `pdfchat login`").print();
            }
            RouteDecision::Redirect(target) => {
                Notification::warning(&format!(
                    "You are already logged in, continue with `pdfchat {target}`"
                ))
                .print();
            }
        }

        tracing::debug!(route = %route, "route refused");
        return false;
    }

    fn report(&self, err: &ClientError) {
        Notification::from_error(err).print();
        if err.is_unauthenticated() {
            Notification::warning("Run `pdfchat login` to start a new session").print();
        }
    }

    async fn open_document(&self, path: &Path) -> Option<Document> {
        match Document::open(path).await {
            Ok(document) => return Some(document),
            Err(err) => {
                tracing::error!(err = ?err, path = %path.display(), "failed to read document");
                self.report(&ClientError::validation(&format!(
                    "Could not read {}",
                    path.display()
                )));
                return None;
            }
        }
    }

    pub async fn signup(&self, user_name: &str, email: &str, password: &str) -> Result<bool> {
        if !self.enter(Route::Signup) {
            return Ok(false);
        }

        match self.auth.signup(user_name, email, password).await {
            Ok(res) => {
                let mut text = res.message;
                if text.is_empty() {
                    text = format!("Account created for {}", res.email);
                }
                Notification::success(&format!("{text}. Please login to continue")).print();
                return Ok(true);
            }
            Err(err) => {
                self.report(&err);
                return Ok(false);
            }
        }
    }

    /// Stores the token, then loads the profile. A failed profile fetch does
    /// not undo the login.
    pub async fn login(&self, email: &str, password: &str) -> Result<bool> {
        if !self.enter(Route::Login) {
            return Ok(false);
        }

        if let Err(err) = self.auth.login(email, password).await {
            self.report(&err);
            return Ok(false);
        }

        match self.auth.current_user().await {
            Ok(user) => {
                Notification::success(&format!("Logged in as {}", user.user_name)).print();
            }
            Err(err) => {
                tracing::warn!(err = ?err, "profile fetch after login failed");
                Notification::success("Logged in").print();
            }
        }

        return Ok(true);
    }

    pub fn logout(&self) {
        self.auth.logout();
        Notification::success("Logged out").print();
    }

    pub async fn whoami(&self) -> Result<bool> {
        if !self.enter(Route::Profile) {
            return Ok(false);
        }

        match self.auth.current_user().await {
            Ok(user) => {
                println!("{} <{}> (ID: {})", user.user_name, user.email, user.id);
                return Ok(true);
            }
            Err(err) => {
                self.report(&err);
                return Ok(false);
            }
        }
    }

    pub async fn upload(&self, path: &Path) -> Result<bool> {
        if !self.enter(Route::Upload) {
            return Ok(false);
        }

        let document = match self.open_document(path).await {
            Some(document) => document,
            None => return Ok(false),
        };
        if let Err(err) = document.ensure_pdf() {
            self.report(&err);
            return Ok(false);
        }

        match self.upload.upload_file(&document).await {
            Ok(res) if res.success => {
                Notification::success(&res.message).print();
                return Ok(true);
            }
            Ok(res) => {
                Notification::error(&res.message).print();
                return Ok(false);
            }
            Err(err) => {
                self.report(&err);
                return Ok(false);
            }
        }
    }

    pub async fn history(&self, show_messages: bool) -> Result<bool> {
        if !self.enter(Route::History) {
            return Ok(false);
        }

        let sessions = match self.history.fetch_history().await {
            Ok(sessions) => sessions,
            Err(err) => {
                self.report(&err);
                return Ok(false);
            }
        };

        if sessions.is_empty() {
            println!("No chat history yet. Upload a PDF and ask your first question!");
            return Ok(true);
        }

        for session in sessions {
            println!("{}", session.summary());
            if show_messages {
                for message in session.messages {
                    println!("    Q: {}", message.question);
                    println!("    A: {}", message.answer);
                }
            }
        }

        return Ok(true);
    }

    pub async fn chat(&self, path: &Path) -> Result<bool> {
        let mut conversation = Conversation::new(self.chat.mode());
        let stdin = io::BufReader::new(io::stdin());
        return self.chat_with(&mut conversation, path, stdin).await;
    }

    /// Attaches the document, indexes it when the mode asks for it, then
    /// answers one question per input line until the input ends or the user
    /// quits.
    pub async fn chat_with<R: AsyncBufRead + Unpin>(
        &self,
        conversation: &mut Conversation,
        path: &Path,
        input: R,
    ) -> Result<bool> {
        if !self.enter(Route::Chat) {
            return Ok(false);
        }

        let document = match self.open_document(path).await {
            Some(document) => document,
            None => return Ok(false),
        };
        if let Err(err) = document.ensure_pdf() {
            self.report(&err);
            return Ok(false);
        }

        conversation.attach_document(document.clone());
        if conversation.mode.requires_embeddings() {
            match self.upload.upload_file(&document).await {
                Ok(res) if res.success => {
                    tracing::debug!(file_id = ?res.file_id, "document uploaded");
                }
                Ok(res) => {
                    Notification::error(&res.message).print();
                    return Ok(false);
                }
                Err(err) => {
                    self.report(&err);
                    return Ok(false);
                }
            }
        }

        match conversation.prepare(self.chat.as_ref()).await {
            Ok(status) if conversation.is_ready() => {
                tracing::debug!(status = %status.status, "document ready");
                Notification::success(&format!(
                    "{} is ready, ask away. Type /help for commands.",
                    document.file_name
                ))
                .print();
            }
            Ok(status) => {
                Notification::warning(&format!(
                    "{} could not be indexed: {}",
                    document.file_name,
                    status.error.unwrap_or(status.status)
                ))
                .print();
                return Ok(false);
            }
            Err(err) => {
                self.report(&err);
                return Ok(false);
            }
        }

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if let Some(cmd) = SlashCommand::parse(&line) {
                if cmd.is_quit() {
                    break;
                }
                if cmd.is_transcript() {
                    print_transcript(conversation);
                } else if cmd.is_document() {
                    println!(
                        "{} ({}), ready: {}",
                        document.file_name,
                        conversation.mode,
                        conversation.is_ready()
                    );
                } else if cmd.is_help() {
                    println!("{}", help_text());
                }
                continue;
            }

            match conversation.ask(self.chat.as_ref(), &line).await {
                Ok(answer) => println!("{answer}\n"),
                Err(err) => {
                    self.report(&err);
                    if err.is_unauthenticated() {
                        return Ok(false);
                    }
                }
            }
        }

        return Ok(true);
    }
}

fn print_transcript(conversation: &Conversation) {
    if conversation.transcript.is_empty() {
        println!("No questions asked yet.");
        return;
    }

    for exchange in conversation.transcript.exchanges() {
        println!("Q: {}", exchange.question);
        println!("A: {}\n", exchange.answer);
    }
}
