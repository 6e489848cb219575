use crate::building::{Building, Connection, ResourceKind};
use crate::id::{BuildingId, ConnectionId};
use slotmap::SlotMap;

/// The arena snapshot the day orchestrator operates on: every placed
/// building and every wired connection.
///
/// The placement layer builds and mutates a `World` between days;
/// [`crate::day::advance_day`] clones it and returns a new snapshot, so the
/// previous day's state stays valid until the caller commits the new one.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct World {
    pub buildings: SlotMap<BuildingId, Building>,
    pub connections: SlotMap<ConnectionId, Connection>,
}

// Key-wise equality; the arenas themselves do not implement `PartialEq`.
impl PartialEq for World {
    fn eq(&self, other: &Self) -> bool {
        self.buildings.len() == other.buildings.len()
            && self.connections.len() == other.connections.len()
            && self
                .buildings
                .iter()
                .all(|(k, b)| other.buildings.get(k) == Some(b))
            && self
                .connections
                .iter()
                .all(|(k, c)| other.connections.get(k) == Some(c))
    }
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a building, returning its arena key.
    pub fn add_building(&mut self, building: Building) -> BuildingId {
        self.buildings.insert(building)
    }

    /// Wire a typed connection between two placed buildings. Returns `None`
    /// (and wires nothing) when either endpoint is missing.
    pub fn connect(
        &mut self,
        from: BuildingId,
        to: BuildingId,
        resource: ResourceKind,
    ) -> Option<ConnectionId> {
        if !self.buildings.contains_key(from) || !self.buildings.contains_key(to) {
            return None;
        }
        Some(self.connections.insert(Connection { from, to, resource }))
    }

    /// Remove a connection. Missing ids are ignored.
    pub fn disconnect(&mut self, connection: ConnectionId) {
        self.connections.remove(connection);
    }

    /// Remove a building along with every connection touching it.
    pub fn remove_building(&mut self, building: BuildingId) {
        if self.buildings.remove(building).is_none() {
            return;
        }
        self.connections
            .retain(|_, c| c.from != building && c.to != building);
    }

    pub fn building(&self, id: BuildingId) -> Option<&Building> {
        self.buildings.get(id)
    }

    pub fn building_mut(&mut self, id: BuildingId) -> Option<&mut Building> {
        self.buildings.get_mut(id)
    }

    pub fn building_count(&self) -> usize {
        self.buildings.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}
