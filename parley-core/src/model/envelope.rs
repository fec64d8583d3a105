use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

/// Value of the `type` field.
///
/// The set is closed by convention only: anything the relay does not know
/// is kept verbatim in [`EnvelopeKind::Other`] and routed by target like an
/// offer would be.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EnvelopeKind {
    Offer,
    Answer,
    Candidate,
    Join,
    Leave,
    Other(String),
    #[default]
    Empty,
}

impl EnvelopeKind {
    /// Presence kinds are fanned out to the whole room regardless of `target`.
    pub fn is_broadcast(&self) -> bool {
        matches!(self, EnvelopeKind::Join | EnvelopeKind::Leave)
    }

    pub fn as_str(&self) -> &str {
        match self {
            EnvelopeKind::Offer => "offer",
            EnvelopeKind::Answer => "answer",
            EnvelopeKind::Candidate => "candidate",
            EnvelopeKind::Join => "join",
            EnvelopeKind::Leave => "leave",
            EnvelopeKind::Other(other) => other,
            EnvelopeKind::Empty => "",
        }
    }
}

impl From<String> for EnvelopeKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "offer" => EnvelopeKind::Offer,
            "answer" => EnvelopeKind::Answer,
            "candidate" => EnvelopeKind::Candidate,
            "join" => EnvelopeKind::Join,
            "leave" => EnvelopeKind::Leave,
            "" => EnvelopeKind::Empty,
            _ => EnvelopeKind::Other(value),
        }
    }
}

impl From<EnvelopeKind> for String {
    fn from(kind: EnvelopeKind) -> Self {
        match kind {
            EnvelopeKind::Other(other) => other,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for EnvelopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("malformed envelope: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

/// One signaling message as it travels over the socket:
/// `{"type": ..., "payload": ..., "username": ..., "target": ...}`.
///
/// `payload` is an SDP blob or ICE candidate and is never looked at.
/// Every field is optional on the wire: absent or `null` reads as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: EnvelopeKind,
    #[serde(default, deserialize_with = "null_as_default")]
    pub payload: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub target: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Envelope {
    pub fn new(kind: EnvelopeKind, payload: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            kind,
            payload: payload.into(),
            username: String::new(),
            target: target.into(),
        }
    }

    pub fn join(username: impl Into<String>) -> Self {
        Self {
            kind: EnvelopeKind::Join,
            username: username.into(),
            ..Default::default()
        }
    }

    pub fn leave(username: impl Into<String>) -> Self {
        Self {
            kind: EnvelopeKind::Leave,
            username: username.into(),
            ..Default::default()
        }
    }

    pub fn decode(text: &str) -> Result<Self, DecodeError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Replace whatever sender the peer claimed with its authenticated name.
    pub fn stamp_sender(&mut self, username: &str) {
        self.username.clear();
        self.username.push_str(username);
    }

    /// Whether a member named `identity` should receive this envelope.
    pub fn is_addressed_to(&self, identity: &str) -> bool {
        self.kind.is_broadcast() || self.target == identity
    }
}
