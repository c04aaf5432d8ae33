mod app;
pub mod cli;
mod notify;

pub use app::*;
pub use notify::*;
