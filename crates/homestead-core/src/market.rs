//! The sink processor: buildings that liquidate arbitrary accumulated stock
//! into a global currency instead of running an ordinary recipe.
//!
//! A marketplace accepts anything into its pooled entry over the day; at the
//! start of the next day this processor empties the pool, crediting
//! `quantity x per-unit value x output multiplier` per resource to the
//! ledger under the method's global output.

use crate::building::Building;
use crate::fixed::{checked_mul_64, Fixed64};
use crate::id::BuildingId;
use crate::ledger::{GlobalLedger, ResourceValues};
use crate::method::ProductionStatus;
use crate::stats::DayStats;

/// Liquidate one sink building's pooled stock into the ledger.
///
/// With an empty (or absent) pool the building goes `Idle` and nothing else
/// happens. Otherwise every resource in the breakdown is drained in full,
/// valued via `values` (unknown resources drain for zero credit), and the
/// building ends the day `Complete`. Credits that exceed the fixed-point
/// range saturate at `Fixed64::MAX` with a warning rather than panicking.
pub fn process_sink(
    id: BuildingId,
    building: &mut Building,
    values: &ResourceValues,
    ledger: &mut GlobalLedger,
    stats: &mut DayStats,
) {
    let Some((output, duration)) = building
        .method
        .as_ref()
        .and_then(|m| m.global_output().map(|o| (o.clone(), m.duration)))
    else {
        return;
    };
    let multiplier = Fixed64::saturating_from_num(output.amount);

    let pool_empty = building.stock.pooled().is_none_or(|(amount, _)| amount == 0);
    if pool_empty {
        building.state.progress = 0;
        building.state.status = ProductionStatus::Idle;
        return;
    }

    let mut earned = Fixed64::ZERO;
    for (resource, quantity) in building.stock.drain_pooled() {
        let credit = checked_mul_64(Fixed64::saturating_from_num(quantity), values.get(resource))
            .and_then(|v| checked_mul_64(v, multiplier))
            .unwrap_or_else(|| {
                log::warn!("credit overflow liquidating {quantity} of {resource:?}, saturating");
                Fixed64::MAX
            });
        earned = earned.saturating_add(credit);
        stats.record_removed(id, resource, quantity);
    }
    ledger.credit(output.resource, earned);
    // A sale counts as a finished cycle, so the state reads like any other
    // completed method.
    building.state.progress = duration;
    building.state.status = ProductionStatus::Complete;
    log::trace!("{id:?} liquidated stock for {earned} {:?}", output.resource);
}

// ===========================================================================
// Tests
// ===========================================================================
