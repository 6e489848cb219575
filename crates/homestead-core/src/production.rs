//! The per-building production state machine, evaluated once per day.
//!
//! `Idle` starts a cycle by consuming inputs when they are satisfiable and
//! the non-global outputs have room; `Active` accrues one day of progress
//! and emits outputs when the method's duration is reached; `Paused` holds
//! progress while output capacity is blocked; `Complete` is transient and
//! resets to `Idle` the same day it is observed.

use crate::building::Building;
use crate::fixed::Fixed64;
use crate::id::BuildingId;
use crate::ledger::GlobalLedger;
use crate::method::{ProductionMethod, ProductionStatus};
use crate::stats::DayStats;
use crate::stock::Stockpile;

/// True when every input of `method` is available in `stock`.
pub fn inputs_satisfied(stock: &Stockpile, method: &ProductionMethod) -> bool {
    method
        .inputs
        .iter()
        .all(|input| stock.available(input.resource) >= input.amount)
}

/// True when every non-global output of `method` fits in `stock`. A method
/// with no local outputs always has capacity.
pub fn outputs_have_capacity(stock: &Stockpile, method: &ProductionMethod) -> bool {
    method
        .local_outputs()
        .all(|output| stock.capacity_for(output.resource) >= output.amount)
}

/// Advance one building's production by one day.
///
/// A building with no active method is skipped entirely. Global-flagged
/// outputs are credited to `ledger`; the rest land in local stock, capped at
/// the matching entry's `max_amount`. Every stock mutation is recorded in
/// `stats`, plus a produced summary when a cycle completes.
pub fn advance_production(
    id: BuildingId,
    building: &mut Building,
    ledger: &mut GlobalLedger,
    stats: &mut DayStats,
) {
    let Some(method) = building.method.clone() else {
        return;
    };

    // Completion is transient: reset and fall through to the idle evaluation.
    if building.state.status == ProductionStatus::Complete {
        building.state.progress = 0;
        building.state.status = ProductionStatus::Idle;
    }

    match building.state.status {
        ProductionStatus::Idle => {
            if inputs_satisfied(&building.stock, &method)
                && outputs_have_capacity(&building.stock, &method)
            {
                for input in &method.inputs {
                    let removed = building.stock.remove(input.resource, input.amount);
                    debug_assert_eq!(removed, input.amount);
                    stats.record_removed(id, input.resource, removed);
                }
                building.state.progress = 0;
                building.state.status = ProductionStatus::Active;
                log::trace!("{id:?} started {:?}", method.name);
                // The start day counts: fall through to the active evaluation.
                advance_active(id, building, &method, ledger, stats);
            }
        }
        ProductionStatus::Paused => {
            // Resuming only flips status; progress resumes next day.
            if outputs_have_capacity(&building.stock, &method) {
                building.state.status = ProductionStatus::Active;
            }
        }
        ProductionStatus::Active => {
            advance_active(id, building, &method, ledger, stats);
        }
        ProductionStatus::Complete => unreachable!("complete resets to idle above"),
    }
}

fn advance_active(
    id: BuildingId,
    building: &mut Building,
    method: &ProductionMethod,
    ledger: &mut GlobalLedger,
    stats: &mut DayStats,
) {
    if !outputs_have_capacity(&building.stock, method) {
        building.state.status = ProductionStatus::Paused;
        return;
    }

    building.state.progress += 1;
    if building.state.progress < method.duration {
        return;
    }

    // Cycle complete: apply outputs.
    let mut produced = Vec::with_capacity(method.outputs.len());
    for output in &method.outputs {
        if output.global {
            ledger.credit(output.resource, Fixed64::saturating_from_num(output.amount));
            produced.push((output.resource, output.amount));
        } else {
            let added = building.stock.add(output.resource, output.amount);
            stats.record_added(id, output.resource, added);
            produced.push((output.resource, added));
        }
    }
    stats.record_produced(id, produced);
    building.state.status = ProductionStatus::Complete;
    log::trace!("{id:?} completed {:?}", method.name);
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::BuildingTypeId;
    use crate::stock::StockEntry;
    use crate::test_utils::*;
    use crate::world::World;

    fn advance(world: &mut World, id: BuildingId) -> (GlobalLedger, DayStats) {
        let mut ledger = GlobalLedger::new();
        let mut stats = DayStats::new();
        let building = world.building_mut(id).unwrap();
        advance_production(id, building, &mut ledger, &mut stats);
        (ledger, stats)
    }

    #[test]
    fn state_machine_full_trace() {
        // duration 3, exactly one cycle of inputs, roomy output.
        let mut world = World::new();
        let id = world.add_building(
            Building::new(BuildingTypeId(0))
                .with_method(make_method(vec![(wood(), 2)], vec![(plank(), 1, false)], 3))
                .with_stock(Stockpile::with_entries(vec![
                    StockEntry::simple(wood(), 2, 10),
                    StockEntry::simple(plank(), 0, 10),
                ])),
        );

        // Day 1: consume inputs, active with progress 1.
        let (_, stats) = advance(&mut world, id);
        let b = world.building(id).unwrap();
        assert_eq!(b.state.status, ProductionStatus::Active);
        assert_eq!(b.state.progress, 1);
        assert_eq!(b.stock.available(wood()), 0);
        let wood_delta = stats.building(id).unwrap().deltas()[0];
        assert_eq!(wood_delta.removed, 2);

        // Day 2: progress 2.
        advance(&mut world, id);
        assert_eq!(world.building(id).unwrap().state.progress, 2);

        // Day 3: complete, outputs applied.
        let (_, stats) = advance(&mut world, id);
        let b = world.building(id).unwrap();
        assert_eq!(b.state.status, ProductionStatus::Complete);
        assert_eq!(b.state.progress, 3);
        assert_eq!(b.stock.available(plank()), 1);
        assert_eq!(
            stats.building(id).unwrap().produced.as_deref(),
            Some(&[(plank(), 1)][..])
        );

        // Day 4: back to idle with no inputs left.
        advance(&mut world, id);
        let b = world.building(id).unwrap();
        assert_eq!(b.state.status, ProductionStatus::Idle);
        assert_eq!(b.state.progress, 0);
    }

    #[test]
    fn complete_chains_into_next_cycle_when_inputs_remain() {
        // Two cycles' worth of inputs, duration 1: day 2 restarts immediately.
        let mut world = World::new();
        let id = world.add_building(
            Building::new(BuildingTypeId(0))
                .with_method(make_method(vec![(wood(), 1)], vec![(plank(), 1, false)], 1))
                .with_stock(Stockpile::with_entries(vec![
                    StockEntry::simple(wood(), 2, 10),
                    StockEntry::simple(plank(), 0, 10),
                ])),
        );

        advance(&mut world, id);
        assert_eq!(world.building(id).unwrap().state.status, ProductionStatus::Complete);
        assert_eq!(world.building(id).unwrap().stock.available(plank()), 1);

        // Complete -> idle -> consumes the second wood and runs again.
        advance(&mut world, id);
        let b = world.building(id).unwrap();
        assert_eq!(b.state.status, ProductionStatus::Complete);
        assert_eq!(b.stock.available(wood()), 0);
        assert_eq!(b.stock.available(plank()), 2);
    }

    #[test]
    fn idle_without_inputs_stays_idle() {
        let mut world = World::new();
        let id = world.add_building(
            Building::new(BuildingTypeId(0))
                .with_method(make_method(vec![(wood(), 5)], vec![(plank(), 1, false)], 2))
                .with_stock(Stockpile::with_entries(vec![
                    StockEntry::simple(wood(), 4, 10),
                    StockEntry::simple(plank(), 0, 10),
                ])),
        );

        advance(&mut world, id);
        let b = world.building(id).unwrap();
        assert_eq!(b.state.status, ProductionStatus::Idle);
        assert_eq!(b.stock.available(wood()), 4);
    }

    #[test]
    fn idle_without_output_capacity_stays_idle() {
        let mut world = World::new();
        let id = world.add_building(
            Building::new(BuildingTypeId(0))
                .with_method(make_method(vec![(wood(), 1)], vec![(plank(), 2, false)], 2))
                .with_stock(Stockpile::with_entries(vec![
                    StockEntry::simple(wood(), 5, 10),
                    StockEntry::simple(plank(), 9, 10),
                ])),
        );

        advance(&mut world, id);
        let b = world.building(id).unwrap();
        assert_eq!(b.state.status, ProductionStatus::Idle);
        assert_eq!(b.stock.available(wood()), 5);
    }

    #[test]
    fn pause_and_resume_preserve_progress() {
        let mut world = World::new();
        let id = world.add_building(
            Building::new(BuildingTypeId(0))
                .with_method(make_method(vec![(wood(), 1)], vec![(plank(), 1, false)], 5))
                .with_stock(Stockpile::with_entries(vec![
                    StockEntry::simple(wood(), 1, 10),
                    StockEntry::simple(plank(), 0, 1),
                ])),
        );

        // Two days of progress.
        advance(&mut world, id);
        advance(&mut world, id);
        assert_eq!(world.building(id).unwrap().state.progress, 2);

        // Fill the output entry: next day pauses without losing progress.
        let _ = world.building_mut(id).unwrap().stock.add(plank(), 1);
        advance(&mut world, id);
        let b = world.building(id).unwrap();
        assert_eq!(b.state.status, ProductionStatus::Paused);
        assert_eq!(b.state.progress, 2);

        // Still blocked: stays paused.
        advance(&mut world, id);
        assert_eq!(world.building(id).unwrap().state.status, ProductionStatus::Paused);

        // Free capacity: resumes at the same progress, no increment that day.
        let _ = world.building_mut(id).unwrap().stock.remove(plank(), 1);
        advance(&mut world, id);
        let b = world.building(id).unwrap();
        assert_eq!(b.state.status, ProductionStatus::Active);
        assert_eq!(b.state.progress, 2);

        // Back to normal accrual.
        advance(&mut world, id);
        assert_eq!(world.building(id).unwrap().state.progress, 3);
    }

    #[test]
    fn global_outputs_credit_the_ledger() {
        let mut world = World::new();
        let id = world.add_building(
            Building::new(BuildingTypeId(0))
                .with_method(make_method(vec![], vec![(gold(), 3, true)], 1)),
        );

        let (ledger, stats) = advance(&mut world, id);
        assert_eq!(ledger.get(gold()), Fixed64::from_num(3));
        // Nothing landed in local stock.
        assert_eq!(world.building(id).unwrap().stock.available(gold()), 0);
        assert_eq!(
            stats.building(id).unwrap().produced.as_deref(),
            Some(&[(gold(), 3)][..])
        );
    }

    #[test]
    fn oversized_global_output_saturates_the_credit() {
        // An output amount beyond i32::MAX does not fit in Q32.32; the
        // cycle still completes and the credit saturates.
        let mut world = World::new();
        let id = world.add_building(
            Building::new(BuildingTypeId(0))
                .with_method(make_method(vec![], vec![(gold(), u32::MAX, true)], 1)),
        );

        let (ledger, _) = advance(&mut world, id);
        assert_eq!(ledger.get(gold()), Fixed64::MAX);
        assert_eq!(world.building(id).unwrap().state.status, ProductionStatus::Complete);
    }

    #[test]
    fn building_without_method_is_skipped() {
        let mut world = World::new();
        let id = world.add_building(Building::new(BuildingTypeId(0)));
        let before = world.building(id).unwrap().clone();

        let (ledger, stats) = advance(&mut world, id);
        assert_eq!(world.building(id).unwrap(), &before);
        assert!(ledger.is_empty());
        assert!(stats.building(id).is_none());
    }

    #[test]
    fn local_output_capped_at_max_amount() {
        // Output entry has headroom exactly equal to the output amount; the
        // next cycle then finds no capacity and idles instead of overfilling.
        let mut world = World::new();
        let id = world.add_building(
            Building::new(BuildingTypeId(0))
                .with_method(make_method(vec![], vec![(plank(), 2, false)], 1))
                .with_stock(Stockpile::with_entries(vec![StockEntry::simple(
                    plank(),
                    0,
                    2,
                )])),
        );

        advance(&mut world, id);
        assert_eq!(world.building(id).unwrap().stock.available(plank()), 2);

        advance(&mut world, id);
        let b = world.building(id).unwrap();
        assert_eq!(b.state.status, ProductionStatus::Idle);
        assert_eq!(b.stock.available(plank()), 2);
    }
}
