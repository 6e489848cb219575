//! The day orchestrator: composes indexing, sink liquidation, ordered
//! resource flow, and production into one simulation day.

use crate::graph::{self, GraphIndex};
use crate::ledger::{GlobalLedger, ResourceValues};
use crate::market;
use crate::production;
use crate::stats::DayStats;
use crate::transfer;
use crate::world::World;

/// Everything one simulated day produces.
#[derive(Debug)]
pub struct DayOutcome {
    /// The updated arena. The input world is untouched; the caller commits
    /// this snapshot (or discards it to "undo" the day).
    pub world: World,
    /// Global resources earned this day. Merge into cumulative totals via
    /// [`GlobalLedger::merge`].
    pub ledger: GlobalLedger,
    /// Per-building and per-connection deltas for UI feedback.
    pub stats: DayStats,
}

/// Advance the world by one day.
///
/// Strictly single-threaded and total: operates on a snapshot, never fails,
/// and skips malformed buildings or connections rather than aborting the
/// day. Callers are responsible for running at most one day at a time and
/// for not mutating `world` while it computes.
pub fn advance_day(world: &World, values: &ResourceValues) -> DayOutcome {
    let mut next = world.clone();
    let mut ledger = GlobalLedger::new();
    let mut stats = DayStats::new();

    // Index and classify against the snapshot before anything moves.
    let index = GraphIndex::build(&next);
    let sink_set = graph::sinks(&next);

    // Sinks first: liquidate the stock they accumulated during the previous
    // day before new deliveries arrive.
    for &id in &sink_set {
        if let Some(building) = next.building_mut(id) {
            market::process_sink(id, building, values, &mut ledger, &mut stats);
        }
    }

    // Sink-first ordering: consumers closest to a sink drain their upstream
    // before producers further out push more in.
    let order = graph::traversal_order(&index, &sink_set);
    for &id in &order {
        transfer::distribute_downstream(&mut next, &mut stats, &index, id);
    }
    for &id in &order {
        if let Some(building) = next.building_mut(id) {
            production::advance_production(id, building, &mut ledger, &mut stats);
        }
    }

    // Buildings unreachable from any sink still flow and produce.
    let stragglers = graph::unreached(&next, &sink_set, &order);
    for &id in &stragglers {
        transfer::distribute_downstream(&mut next, &mut stats, &index, id);
    }
    for &id in &stragglers {
        if let Some(building) = next.building_mut(id) {
            production::advance_production(id, building, &mut ledger, &mut stats);
        }
    }

    log::debug!(
        "day advanced: {} buildings ({} sinks, {} ordered, {} unreached)",
        next.building_count(),
        sink_set.len(),
        order.len(),
        stragglers.len()
    );

    DayOutcome {
        world: next,
        ledger,
        stats,
    }
}

// ===========================================================================
// Tests
// ===========================================================================
