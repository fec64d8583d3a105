use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomSettings {
    /// Capacity of the room's command intake.
    pub command_buffer: usize,
    /// Refuse a second connection that authenticates with a name already in the room.
    pub reject_duplicate_identities: bool,
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self {
            command_buffer: 256,
            reject_duplicate_identities: false,
        }
    }
}
