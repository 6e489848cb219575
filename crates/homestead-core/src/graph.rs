use crate::id::{BuildingId, ConnectionId};
use crate::world::World;
use slotmap::SecondaryMap;
use std::collections::{HashSet, VecDeque};

/// Adjacency derived from the connection set for one day.
///
/// Built fresh at the start of every day (the connection set is small and
/// the placement layer may have rewired anything since the last one).
/// Connections whose endpoints are missing from the arena are skipped.
#[derive(Debug, Default)]
pub struct GraphIndex {
    /// source -> distinct targets, in connection order.
    forward: SecondaryMap<BuildingId, Vec<BuildingId>>,
    /// target -> distinct sources, in connection order.
    reverse: SecondaryMap<BuildingId, Vec<BuildingId>>,
    /// source -> its outgoing connection ids, in wiring order. This is the
    /// order the downstream distributor assigns remainders in.
    outgoing: SecondaryMap<BuildingId, Vec<ConnectionId>>,
}

impl GraphIndex {
    /// Build forward and reverse adjacency from the world's connections.
    pub fn build(world: &World) -> Self {
        let mut index = Self::default();
        for id in world.buildings.keys() {
            index.forward.insert(id, Vec::new());
            index.reverse.insert(id, Vec::new());
            index.outgoing.insert(id, Vec::new());
        }

        for (cid, conn) in &world.connections {
            if !world.buildings.contains_key(conn.from) || !world.buildings.contains_key(conn.to)
            {
                log::debug!("skipping connection {cid:?}: dangling endpoint");
                continue;
            }
            let targets = &mut index.forward[conn.from];
            if !targets.contains(&conn.to) {
                targets.push(conn.to);
            }
            let sources = &mut index.reverse[conn.to];
            if !sources.contains(&conn.from) {
                sources.push(conn.from);
            }
            index.outgoing[conn.from].push(cid);
        }
        index
    }

    /// Distinct downstream neighbors of a building, in connection order.
    pub fn targets_of(&self, building: BuildingId) -> &[BuildingId] {
        self.forward
            .get(building)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Distinct upstream neighbors of a building, in connection order.
    pub fn sources_of(&self, building: BuildingId) -> &[BuildingId] {
        self.reverse
            .get(building)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Outgoing connection ids of a building, in wiring order.
    pub fn outgoing_connections(&self, building: BuildingId) -> &[ConnectionId] {
        self.outgoing
            .get(building)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}

// ---------------------------------------------------------------------------
// Sink classification
// ---------------------------------------------------------------------------

/// Buildings whose active method credits the global ledger, in arena order.
pub fn sinks(world: &World) -> Vec<BuildingId> {
    world
        .buildings
        .iter()
        .filter(|(_, b)| b.is_sink())
        .map(|(id, _)| id)
        .collect()
}

// ---------------------------------------------------------------------------
// Traversal order
// ---------------------------------------------------------------------------

/// Breadth-first walk backward from the sink set along reverse adjacency.
///
/// Sinks start visited (they are processed separately and never appear in
/// the result). Every newly discovered source is appended and enqueued, so
/// the result contains every sink-reachable non-sink building, ordered by
/// increasing distance from the nearest sink.
pub fn traversal_order(index: &GraphIndex, sink_set: &[BuildingId]) -> Vec<BuildingId> {
    let mut visited: HashSet<BuildingId> = sink_set.iter().copied().collect();
    let mut queue: VecDeque<BuildingId> = sink_set.iter().copied().collect();
    let mut order = Vec::new();

    while let Some(building) = queue.pop_front() {
        for &source in index.sources_of(building) {
            if visited.insert(source) {
                order.push(source);
                queue.push_back(source);
            }
        }
    }
    order
}

/// Non-sink buildings outside the ordered walk, in arena order. They still
/// push resources downstream and advance production each day.
pub fn unreached(
    world: &World,
    sink_set: &[BuildingId],
    order: &[BuildingId],
) -> Vec<BuildingId> {
    let covered: HashSet<BuildingId> = sink_set
        .iter()
        .chain(order.iter())
        .copied()
        .collect();
    world
        .buildings
        .keys()
        .filter(|id| !covered.contains(id))
        .collect()
}

// ===========================================================================
// Tests
// ===========================================================================
