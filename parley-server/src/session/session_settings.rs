use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-connection knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Envelopes queued for a peer's socket writer before deliveries to it
    /// start waiting.
    pub outbound_buffer: usize,
    /// Disconnect a peer that sends nothing for this long. Unset means a
    /// silent peer stays in the room indefinitely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_timeout_secs: Option<u64>,
    /// How long a departing peer's writer may keep flushing before it is
    /// aborted and the socket dropped.
    pub flush_timeout_secs: u64,
}

impl SessionSettings {
    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout_secs.map(Duration::from_secs)
    }

    pub fn flush_timeout(&self) -> Duration {
        Duration::from_secs(self.flush_timeout_secs)
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            outbound_buffer: 64,
            idle_timeout_secs: None,
            flush_timeout_secs: 5,
        }
    }
}
