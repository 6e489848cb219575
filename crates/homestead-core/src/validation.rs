//! Invariant checking over a [`World`].
//!
//! The day pipeline is total and maintains these invariants itself; this
//! module exists for tests and for the external diagnostic layer, which
//! logs violations instead of aborting a day (a malformed building is
//! skipped by the pipeline, not fatal).

use crate::id::{BuildingId, ConnectionId};
use crate::method::ProductionStatus;
use crate::stock::StockEntry;
use crate::world::World;

/// A broken invariant found in a world snapshot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("building {building:?}: stock entry {entry} holds {amount} of max {max_amount}")]
    OverCapacity {
        building: BuildingId,
        entry: usize,
        amount: u32,
        max_amount: u32,
    },
    #[error(
        "building {building:?}: pooled entry {entry} breakdown sums to {breakdown_total}, amount is {amount}"
    )]
    PooledMismatch {
        building: BuildingId,
        entry: usize,
        breakdown_total: u32,
        amount: u32,
    },
    #[error("building {building:?}: pooled entry {entry} holds a zero-quantity breakdown key")]
    ZeroBreakdownKey { building: BuildingId, entry: usize },
    #[error("connection {connection:?} references a missing building")]
    DanglingConnection { connection: ConnectionId },
    #[error(
        "building {building:?} is complete at progress {progress}, below the method duration {duration}"
    )]
    PrematureComplete {
        building: BuildingId,
        progress: u32,
        duration: u32,
    },
}

/// Check every invariant over a world snapshot. An empty result means the
/// snapshot is sound.
pub fn check_world(world: &World) -> Vec<Violation> {
    let mut violations = Vec::new();

    for (id, building) in &world.buildings {
        for (entry_idx, entry) in building.stock.entries().iter().enumerate() {
            if entry.amount() > entry.max_amount() {
                violations.push(Violation::OverCapacity {
                    building: id,
                    entry: entry_idx,
                    amount: entry.amount(),
                    max_amount: entry.max_amount(),
                });
            }
            if let StockEntry::Pooled { amount, breakdown, .. } = entry {
                let breakdown_total: u32 = breakdown.values().sum();
                if breakdown_total != *amount {
                    violations.push(Violation::PooledMismatch {
                        building: id,
                        entry: entry_idx,
                        breakdown_total,
                        amount: *amount,
                    });
                }
                if breakdown.values().any(|&q| q == 0) {
                    violations.push(Violation::ZeroBreakdownKey {
                        building: id,
                        entry: entry_idx,
                    });
                }
            }
        }

        if building.state.status == ProductionStatus::Complete
            && let Some(method) = &building.method
            && building.state.progress < method.duration
        {
            violations.push(Violation::PrematureComplete {
                building: id,
                progress: building.state.progress,
                duration: method.duration,
            });
        }
    }

    for (cid, conn) in &world.connections {
        if !world.buildings.contains_key(conn.from) || !world.buildings.contains_key(conn.to) {
            violations.push(Violation::DanglingConnection { connection: cid });
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::building::Building;
    use crate::id::{BuildingTypeId, ResourceId};
    use crate::method::ProductionState;
    use crate::stock::Stockpile;
    use crate::test_utils::*;
    use std::collections::BTreeMap;

    #[test]
    fn sound_world_has_no_violations() {
        let mut world = World::new();
        let producer = world.add_building(make_producer(wood(), 1, 1, 10));
        let market = world.add_building(make_marketplace(50));
        world.connect(producer, market, crate::building::ResourceKind::Any);
        assert!(check_world(&world).is_empty());
    }

    #[test]
    fn over_capacity_detected() {
        let mut world = World::new();
        let id = world.add_building(Building::new(BuildingTypeId(0)).with_stock(
            Stockpile::with_entries(vec![StockEntry::Simple {
                resource: wood(),
                amount: 11,
                max_amount: 10,
            }]),
        ));
        let violations = check_world(&world);
        assert_eq!(
            violations,
            vec![Violation::OverCapacity {
                building: id,
                entry: 0,
                amount: 11,
                max_amount: 10,
            }]
        );
    }

    #[test]
    fn pooled_mismatch_and_zero_key_detected() {
        let mut breakdown = BTreeMap::new();
        breakdown.insert(ResourceId(0), 3);
        breakdown.insert(ResourceId(1), 0);
        let mut world = World::new();
        let id = world.add_building(Building::new(BuildingTypeId(0)).with_stock(
            Stockpile::with_entries(vec![StockEntry::Pooled {
                amount: 5,
                max_amount: 10,
                breakdown,
            }]),
        ));

        let violations = check_world(&world);
        assert!(violations.contains(&Violation::PooledMismatch {
            building: id,
            entry: 0,
            breakdown_total: 3,
            amount: 5,
        }));
        assert!(violations.contains(&Violation::ZeroBreakdownKey { building: id, entry: 0 }));
    }

    #[test]
    fn premature_complete_detected() {
        let mut world = World::new();
        let id = world.add_building(
            Building::new(BuildingTypeId(0))
                .with_method(make_method(vec![], vec![(wood(), 1, false)], 5)),
        );
        world.building_mut(id).unwrap().state = ProductionState {
            progress: 2,
            status: ProductionStatus::Complete,
        };
        assert_eq!(
            check_world(&world),
            vec![Violation::PrematureComplete {
                building: id,
                progress: 2,
                duration: 5,
            }]
        );
    }

    #[test]
    fn violations_format_for_diagnostics() {
        let mut world = World::new();
        world.add_building(Building::new(BuildingTypeId(0)).with_stock(
            Stockpile::with_entries(vec![StockEntry::Simple {
                resource: wood(),
                amount: 2,
                max_amount: 1,
            }]),
        ));
        let text = check_world(&world)[0].to_string();
        assert!(text.contains("holds 2 of max 1"));
    }
}
