mod conversation;
mod route_guard;
mod session_store;
pub mod validation;

pub use conversation::*;
pub use route_guard::*;
pub use session_store::*;
