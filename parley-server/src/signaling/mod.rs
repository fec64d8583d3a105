mod authenticator;
mod ice_handler;
mod routes;
mod signaling_service;
mod ws_handler;

pub use authenticator::*;
pub use ice_handler::*;
pub use routes::*;
pub use signaling_service::*;
pub use ws_handler::*;
