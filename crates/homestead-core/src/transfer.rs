//! Resource movement along connections: the pairwise transfer primitive and
//! the even downstream distributor used when one building feeds several
//! consumers of the same resource.

use crate::graph::GraphIndex;
use crate::id::{BuildingId, ConnectionId, ResourceId};
use crate::stats::DayStats;
use crate::world::World;

// ---------------------------------------------------------------------------
// Pairwise transfer
// ---------------------------------------------------------------------------

/// Move up to `requested` units of `resource` from `source` to `target`
/// (`None` requests all available). Returns the amount actually moved.
///
/// The moved amount is `min(requested, available, capacity)` where
/// availability prefers the source's direct entry over its pooled breakdown
/// and capacity prefers the target's direct entry over its pooled headroom.
/// Anything that would move zero -- missing buildings, self-transfer, empty
/// source, full target -- is a silent no-op that leaves both stockpiles
/// untouched.
pub fn transfer(
    world: &mut World,
    stats: &mut DayStats,
    connection: ConnectionId,
    source: BuildingId,
    target: BuildingId,
    resource: ResourceId,
    requested: Option<u32>,
) -> u32 {
    if source == target {
        return 0;
    }
    let Some([src, tgt]) = world.buildings.get_disjoint_mut([source, target]) else {
        return 0;
    };

    let available = src.stock.available(resource);
    let capacity = tgt.stock.capacity_for(resource);
    let moved = requested.unwrap_or(available).min(available).min(capacity);
    if moved == 0 {
        return 0;
    }

    let removed = src.stock.remove(resource, moved);
    let added = tgt.stock.add(resource, removed);
    debug_assert_eq!(removed, moved);
    debug_assert_eq!(added, moved);

    stats.record_removed(source, resource, moved);
    stats.record_added(target, resource, moved);
    stats.record_transfer(connection, resource, moved);
    log::trace!("moved {moved} of {resource:?} over {connection:?}");
    moved
}

// ---------------------------------------------------------------------------
// Even downstream distributor
// ---------------------------------------------------------------------------

/// One consumer's slot in an allocation group. Parallel connections to the
/// same building get separate slots but share that building's capacity,
/// tracked through `capacity_slot`.
struct GroupTarget {
    connection: ConnectionId,
    building: BuildingId,
    allocation: u32,
    capacity_slot: usize,
}

/// Push everything `source` has to its downstream consumers.
///
/// Outgoing connections are grouped by concrete resource: specifically-typed
/// connections join their resource's group in wiring order, then each
/// wildcard connection joins the group of every resource the source
/// currently holds. Within a group of `n` targets sharing `available`
/// units, the first `available % n` targets receive one extra unit
/// (round-robin remainder rule), allocations are clipped to each target's
/// capacity, and the clipped shortfall is handed greedily to whichever
/// targets still have room. Parallel connections to one building count its
/// capacity once, shared between their slots. The total removed from the
/// source never exceeds what it had, and no target is pushed past
/// `max_amount`.
pub fn distribute_downstream(
    world: &mut World,
    stats: &mut DayStats,
    index: &GraphIndex,
    source: BuildingId,
) {
    let Some(building) = world.building(source) else {
        return;
    };
    let available_resources = building.stock.resources_available();

    // Resolve outgoing connections, keeping wiring order.
    let mut specific: Vec<(ConnectionId, BuildingId, ResourceId)> = Vec::new();
    let mut wildcard: Vec<(ConnectionId, BuildingId)> = Vec::new();
    for &cid in index.outgoing_connections(source) {
        let Some(conn) = world.connections.get(cid) else {
            continue;
        };
        match conn.resource.as_specific() {
            Some(resource) => specific.push((cid, conn.to, resource)),
            None => wildcard.push((cid, conn.to)),
        }
    }
    if specific.is_empty() && wildcard.is_empty() {
        return;
    }

    // Group consumers per resource in first-seen key order.
    let mut groups: Vec<(ResourceId, Vec<(ConnectionId, BuildingId)>)> = Vec::new();
    let mut group_mut = |groups: &mut Vec<(ResourceId, Vec<(ConnectionId, BuildingId)>)>,
                         resource: ResourceId|
     -> usize {
        if let Some(idx) = groups.iter().position(|(r, _)| *r == resource) {
            idx
        } else {
            groups.push((resource, Vec::new()));
            groups.len() - 1
        }
    };
    for &(cid, to, resource) in &specific {
        let idx = group_mut(&mut groups, resource);
        groups[idx].1.push((cid, to));
    }
    for &(cid, to) in &wildcard {
        for &resource in &available_resources {
            let idx = group_mut(&mut groups, resource);
            groups[idx].1.push((cid, to));
        }
    }

    for (resource, members) in groups {
        let available = world
            .building(source)
            .map(|b| b.stock.available(resource))
            .unwrap_or(0);
        if available == 0 || members.is_empty() {
            continue;
        }

        let n = members.len() as u32;
        let base = available / n;
        let remainder = available % n;

        // Remaining capacity per distinct target building, shared by every
        // slot that points at it.
        let mut capacity_left: Vec<(BuildingId, u32)> = Vec::new();
        let mut targets: Vec<GroupTarget> = Vec::with_capacity(members.len());
        for (i, (connection, building)) in members.into_iter().enumerate() {
            let capacity_slot = match capacity_left.iter().position(|(b, _)| *b == building) {
                Some(idx) => idx,
                None => {
                    let capacity = world
                        .building(building)
                        .map(|b| b.stock.capacity_for(resource))
                        .unwrap_or(0);
                    capacity_left.push((building, capacity));
                    capacity_left.len() - 1
                }
            };
            targets.push(GroupTarget {
                connection,
                building,
                allocation: base + u32::from((i as u32) < remainder),
                capacity_slot,
            });
        }

        // Clip to capacity, then redistribute the shortfall greedily.
        let mut leftover = 0u32;
        for t in &mut targets {
            let capacity = &mut capacity_left[t.capacity_slot].1;
            let granted = t.allocation.min(*capacity);
            leftover += t.allocation - granted;
            t.allocation = granted;
            *capacity -= granted;
        }
        for t in &mut targets {
            if leftover == 0 {
                break;
            }
            let capacity = &mut capacity_left[t.capacity_slot].1;
            let take = (*capacity).min(leftover);
            t.allocation += take;
            *capacity -= take;
            leftover -= take;
        }

        for t in &targets {
            if t.allocation > 0 {
                transfer(
                    world,
                    stats,
                    t.connection,
                    source,
                    t.building,
                    resource,
                    Some(t.allocation),
                );
            }
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
