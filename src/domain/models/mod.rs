mod document;
mod error;
mod exchange;
mod gateway;
mod history;
mod route;
mod session;
mod slash_commands;

pub use document::*;
pub use error::*;
pub use exchange::*;
pub use gateway::*;
pub use history::*;
pub use route::*;
pub use session::*;
pub use slash_commands::*;
