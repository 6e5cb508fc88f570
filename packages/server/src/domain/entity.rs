//! Domain entities: connections and rooms.

use std::net::SocketAddr;

use super::{ConnectionId, DisplayName, Role, RoomId, Timestamp};

/// Canonical record of one open realtime connection, owned by the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub id: ConnectionId,
    pub role: Role,
    /// Room the connection currently belongs to, with the name it joined as.
    pub room: Option<RoomMembership>,
    pub connected_at: Timestamp,
    pub remote_address: Option<SocketAddr>,
}

/// Room membership as recorded on the connection itself.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomMembership {
    pub room_id: RoomId,
    pub display_name: DisplayName,
}

impl Connection {
    pub fn new(
        id: ConnectionId,
        connected_at: Timestamp,
        remote_address: Option<SocketAddr>,
    ) -> Self {
        Self {
            id,
            role: Role::default(),
            room: None,
            connected_at,
            remote_address,
        }
    }

    pub fn room_id(&self) -> Option<&RoomId> {
        self.room.as_ref().map(|m| &m.room_id)
    }

    pub fn display_name(&self) -> Option<&DisplayName> {
        self.room.as_ref().map(|m| &m.display_name)
    }
}

/// A room member: a non-owning reference to a registry record plus the
/// metadata it joined with.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomMember {
    pub connection_id: ConnectionId,
    pub display_name: DisplayName,
    pub joined_at: Timestamp,
}

/// A named set of connections sharing broadcast scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: RoomId,
    /// Members in join order.
    pub members: Vec<RoomMember>,
    pub created_at: Timestamp,
}

impl Room {
    pub fn new(id: RoomId, created_at: Timestamp) -> Self {
        Self {
            id,
            members: Vec::new(),
            created_at,
        }
    }

    /// Add a member. A connection that is already a member keeps its
    /// position and gets its display name refreshed.
    pub fn add_member(&mut self, member: RoomMember) {
        match self
            .members
            .iter_mut()
            .find(|m| m.connection_id == member.connection_id)
        {
            Some(existing) => existing.display_name = member.display_name,
            None => self.members.push(member),
        }
    }

    /// Remove a member, returning it if it was present.
    pub fn remove_member(&mut self, connection_id: &ConnectionId) -> Option<RoomMember> {
        let index = self
            .members
            .iter()
            .position(|m| &m.connection_id == connection_id)?;
        Some(self.members.remove(index))
    }

    pub fn contains(&self, connection_id: &ConnectionId) -> bool {
        self.members.iter().any(|m| &m.connection_id == connection_id)
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn member_ids(&self) -> Vec<ConnectionId> {
        self.members.iter().map(|m| m.connection_id.clone()).collect()
    }
}

/// Result of removing a member from a room.
#[derive(Debug, Clone, PartialEq)]
pub struct LeftRoom {
    pub room_id: RoomId,
    pub member: RoomMember,
    /// Ids of the members still in the room, snapshotted at removal time.
    pub remaining: Vec<ConnectionId>,
}

impl LeftRoom {
    pub fn remaining_count(&self) -> usize {
        self.remaining.len()
    }
}
