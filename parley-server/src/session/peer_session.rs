use crate::room::{PeerHandle, RoomHandle};
use crate::session::{DisconnectReason, SessionSettings, SessionState};
use axum::extract::ws::{CloseFrame, Message, close_code};
use futures::{Sink, SinkExt, Stream, StreamExt};
use parley_core::{Envelope, PeerId};
use std::fmt;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Drives one authenticated connection from registration to departure.
///
/// The session's own task reads frames and hands them to the room; a second
/// task owns the write half and drains whatever the room delivers.
pub struct PeerSession {
    peer_id: PeerId,
    identity: String,
    room: RoomHandle,
    settings: SessionSettings,
    state: SessionState,
}

impl PeerSession {
    pub fn new(identity: impl Into<String>, room: RoomHandle, settings: SessionSettings) -> Self {
        Self {
            peer_id: PeerId::new(),
            identity: identity.into(),
            room,
            settings,
            state: SessionState::Connecting,
        }
    }

    pub fn peer_id(&self) -> &PeerId {
        &self.peer_id
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Runs until the peer goes away and returns the reason. By then the peer
    /// has been deregistered and its socket closed.
    pub async fn run<W, R, E>(mut self, mut sink: W, mut stream: R) -> DisconnectReason
    where
        W: Sink<Message> + Unpin + Send + 'static,
        W::Error: fmt::Display,
        R: Stream<Item = Result<Message, E>> + Unpin + Send,
        E: fmt::Display + Send,
    {
        let (outbound_tx, outbound_rx) = mpsc::channel(self.settings.outbound_buffer.max(1));
        let handle = PeerHandle::new(self.peer_id.clone(), self.identity.clone(), outbound_tx);

        if let Err(e) = self.room.register(handle).await {
            warn!(
                peer_id = %self.peer_id,
                identity = %self.identity,
                error = %e,
                "Registration refused"
            );

            let frame = CloseFrame {
                code: close_code::POLICY,
                reason: e.to_string().into(),
            };
            if let Err(e) = sink.send(Message::Close(Some(frame))).await {
                debug!(peer_id = %self.peer_id, error = %e, "Failed to send close frame");
            }

            self.transition(SessionState::Disconnected);
            return DisconnectReason::Refused(e);
        }

        self.transition(SessionState::Joined);

        let mut writer = tokio::spawn(write_loop(self.peer_id.clone(), sink, outbound_rx));

        let reason = match self
            .room
            .route(Envelope::join(self.identity.as_str()), &self.identity)
            .await
        {
            Ok(()) => {
                self.transition(SessionState::Relaying);
                self.read_loop(&mut stream).await
            }
            Err(_) => DisconnectReason::RoomClosed,
        };

        self.transition(SessionState::Disconnected);
        info!(peer_id = %self.peer_id, identity = %self.identity, %reason, "Peer disconnected");

        if let Err(e) = self.room.deregister(&self.peer_id).await {
            warn!(peer_id = %self.peer_id, error = %e, "Deregistration failed");
        }

        // Deregistration dropped the room's sender, so the writer flushes what
        // is queued and closes the socket. A peer that stopped reading gets
        // its socket dropped instead.
        match tokio::time::timeout(self.settings.flush_timeout(), &mut writer).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!(peer_id = %self.peer_id, error = %e, "Writer task panicked"),
            Err(_) => {
                warn!(peer_id = %self.peer_id, "Writer did not flush in time, aborting");
                writer.abort();
            }
        }

        reason
    }

    async fn read_loop<R, E>(&self, stream: &mut R) -> DisconnectReason
    where
        R: Stream<Item = Result<Message, E>> + Unpin,
        E: fmt::Display,
    {
        loop {
            let next = match self.settings.idle_timeout() {
                Some(limit) => match tokio::time::timeout(limit, stream.next()).await {
                    Ok(next) => next,
                    Err(_) => return DisconnectReason::IdleTimeout,
                },
                None => stream.next().await,
            };

            let frame = match next {
                Some(Ok(frame)) => frame,
                Some(Err(e)) => return DisconnectReason::ReadError(e.to_string()),
                None => return DisconnectReason::Closed,
            };

            let decoded = match frame {
                Message::Text(text) => Envelope::decode(text.as_str()),
                Message::Binary(data) => Envelope::from_slice(&data),
                Message::Close(_) => return DisconnectReason::Closed,
                Message::Ping(_) | Message::Pong(_) => continue,
            };

            let envelope = match decoded {
                Ok(envelope) => envelope,
                Err(e) => {
                    warn!(
                        peer_id = %self.peer_id,
                        identity = %self.identity,
                        error = %e,
                        "Malformed frame"
                    );
                    return DisconnectReason::Decode(e);
                }
            };

            if self.room.route(envelope, &self.identity).await.is_err() {
                return DisconnectReason::RoomClosed;
            }
        }
    }

    fn transition(&mut self, next: SessionState) {
        debug!(
            peer_id = %self.peer_id,
            identity = %self.identity,
            from = ?self.state,
            to = ?next,
            "Session state change"
        );
        self.state = next;
    }
}

async fn write_loop<W>(peer_id: PeerId, mut sink: W, mut outbound: mpsc::Receiver<Envelope>)
where
    W: Sink<Message> + Unpin,
    W::Error: fmt::Display,
{
    while let Some(envelope) = outbound.recv().await {
        let json = match envelope.encode() {
            Ok(json) => json,
            Err(e) => {
                error!(%peer_id, error = %e, "Failed to serialize envelope");
                continue;
            }
        };

        if let Err(e) = sink.send(Message::Text(json.into())).await {
            warn!(%peer_id, error = %e, "Socket write failed, dropping writer");
            break;
        }
    }

    if let Err(e) = sink.close().await {
        debug!(%peer_id, error = %e, "Socket close failed");
    }
}
