mod peer_handle;
mod room;
mod room_command;
mod room_handle;
mod room_settings;

pub use peer_handle::*;
pub use room::*;
pub use room_command::*;
pub use room_handle::*;
pub use room_settings::*;
