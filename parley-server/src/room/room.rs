use crate::error::RelayError;
use crate::room::{PeerHandle, RoomCommand, RoomSettings};
use parley_core::{Envelope, PeerId};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The connection registry.
///
/// Membership is owned by the event loop alone, and every command (including
/// the deliveries it triggers) finishes before the next one is read, so no
/// two register/deregister/route effects ever interleave.
pub struct Room {
    members: HashMap<PeerId, PeerHandle>,
    command_rx: mpsc::Receiver<RoomCommand>,
    settings: RoomSettings,
}

impl Room {
    pub fn new(command_rx: mpsc::Receiver<RoomCommand>, settings: RoomSettings) -> Self {
        Self {
            members: HashMap::new(),
            command_rx,
            settings,
        }
    }

    pub async fn run(mut self) {
        info!("Room event loop started");

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd).await;
        }

        info!("Command channel closed. Room event loop finished");
    }

    async fn handle_command(&mut self, cmd: RoomCommand) {
        match cmd {
            RoomCommand::Register { peer, reply } => {
                let _ = reply.send(self.register(peer));
            }

            RoomCommand::Deregister { peer_id, reply } => {
                self.deregister(&peer_id).await;
                let _ = reply.send(());
            }

            RoomCommand::Route { sender, envelope } => {
                self.route(envelope, &sender).await;
            }

            RoomCommand::MemberNames { reply } => {
                let mut names: Vec<String> = self
                    .members
                    .values()
                    .map(|member| member.identity().to_owned())
                    .collect();
                names.sort();
                let _ = reply.send(names);
            }

            RoomCommand::IsMember { peer_id, reply } => {
                let _ = reply.send(self.members.contains_key(&peer_id));
            }
        }
    }

    fn register(&mut self, peer: PeerHandle) -> Result<(), RelayError> {
        if self.members.contains_key(peer.peer_id()) {
            warn!(peer_id = %peer.peer_id(), "Peer is already registered");
            return Err(RelayError::AlreadyRegistered(peer.peer_id().clone()));
        }

        if self.settings.reject_duplicate_identities
            && self
                .members
                .values()
                .any(|member| member.identity() == peer.identity())
        {
            warn!(identity = peer.identity(), "Refusing duplicate identity");
            return Err(RelayError::DuplicateIdentity(peer.identity().to_owned()));
        }

        info!(
            peer_id = %peer.peer_id(),
            identity = peer.identity(),
            members = self.members.len() + 1,
            "Peer registered"
        );
        self.members.insert(peer.peer_id().clone(), peer);

        Ok(())
    }

    async fn deregister(&mut self, peer_id: &PeerId) {
        let Some(peer) = self.members.remove(peer_id) else {
            debug!(%peer_id, "Deregister for non-member ignored");
            return;
        };

        info!(
            %peer_id,
            identity = peer.identity(),
            members = self.members.len(),
            "Peer deregistered"
        );

        self.deliver_matching(&Envelope::leave(peer.identity())).await;
    }

    async fn route(&mut self, mut envelope: Envelope, sender: &str) {
        envelope.stamp_sender(sender);

        debug!(
            kind = %envelope.kind,
            from = sender,
            to = envelope.target.as_str(),
            "Routing envelope"
        );

        if self.deliver_matching(&envelope).await == 0 {
            debug!(
                kind = %envelope.kind,
                to = envelope.target.as_str(),
                "No recipient, envelope dropped"
            );
        }
    }

    /// Linear scan over the membership; rooms are small.
    async fn deliver_matching(&self, envelope: &Envelope) -> usize {
        let mut delivered = 0;

        for member in self.members.values() {
            if !envelope.is_addressed_to(member.identity()) {
                continue;
            }

            match member.deliver(envelope.clone()).await {
                Ok(()) => delivered += 1,
                Err(e) => warn!(
                    identity = member.identity(),
                    error = %e,
                    "Skipping recipient"
                ),
            }
        }

        delivered
    }
}
