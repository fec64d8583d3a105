mod config;
mod error;
mod room;
mod session;
mod signaling;

pub use config::*;
pub use error::*;
pub use room::*;
pub use session::*;
pub use signaling::*;
