use crate::room::RoomSettings;
use crate::session::SessionSettings;
use parley_core::IceServerConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Everything the relay needs at startup. Every section is optional in the
/// TOML file; missing values fall back to [`RelayConfig::default`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    pub bind: SocketAddr,
    /// Directory served at `/` for the browser client, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,
    /// username -> password
    pub users: BTreeMap<String, String>,
    pub ice_servers: Vec<IceServerConfig>,
    pub room: RoomSettings,
    pub session: SessionSettings,
}

impl RelayConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            static_dir: None,
            users: [("alice", "alice"), ("bob", "bob")]
                .into_iter()
                .map(|(user, pass)| (user.to_owned(), pass.to_owned()))
                .collect(),
            ice_servers: vec![
                IceServerConfig::stun("stun:stun.l.google.com:19302"),
                IceServerConfig::turn("turn:your-turn-server-ip:3478", "webrtc", "turn_password"),
            ],
            room: RoomSettings::default(),
            session: SessionSettings::default(),
        }
    }
}
