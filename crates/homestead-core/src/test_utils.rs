//! Shared test helpers for unit tests, integration tests, and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these are
//! available everywhere test code runs (benchmarks pull them in via the
//! `test-utils` feature).

use crate::building::{Building, ResourceKind};
use crate::fixed::Fixed64;
use crate::id::{BuildingId, BuildingTypeId, ResourceId};
use crate::ledger::ResourceValues;
use crate::method::{MethodInput, MethodOutput, ProductionMethod};
use crate::stock::{StockEntry, Stockpile};
use crate::world::World;

// ===========================================================================
// Resource constructors
// ===========================================================================

pub fn wood() -> ResourceId {
    ResourceId(0)
}
pub fn stone() -> ResourceId {
    ResourceId(1)
}
pub fn plank() -> ResourceId {
    ResourceId(2)
}
pub fn grain() -> ResourceId {
    ResourceId(3)
}
/// The globally-tracked currency.
pub fn gold() -> ResourceId {
    ResourceId(9)
}

// ===========================================================================
// Method and building constructors
// ===========================================================================

pub fn make_method(
    inputs: Vec<(ResourceId, u32)>,
    outputs: Vec<(ResourceId, u32, bool)>,
    duration: u32,
) -> ProductionMethod {
    ProductionMethod {
        name: "test_method".into(),
        inputs: inputs
            .into_iter()
            .map(|(resource, amount)| MethodInput { resource, amount })
            .collect(),
        outputs: outputs
            .into_iter()
            .map(|(resource, amount, global)| MethodOutput {
                resource,
                amount,
                global,
            })
            .collect(),
        duration,
    }
}

/// A building that produces `amount` of `resource` from nothing every
/// `duration` days, into a simple entry with capacity `out_cap`.
pub fn make_producer(resource: ResourceId, amount: u32, duration: u32, out_cap: u32) -> Building {
    Building::new(BuildingTypeId(1))
        .with_method(make_method(vec![], vec![(resource, amount, false)], duration))
        .with_stock(Stockpile::with_entries(vec![StockEntry::simple(
            resource, 0, out_cap,
        )]))
}

/// A building that converts `input` into `output` every `duration` days.
pub fn make_converter(
    input: (ResourceId, u32),
    output: (ResourceId, u32),
    duration: u32,
    cap: u32,
) -> Building {
    Building::new(BuildingTypeId(2))
        .with_method(make_method(
            vec![input],
            vec![(output.0, output.1, false)],
            duration,
        ))
        .with_stock(Stockpile::with_entries(vec![
            StockEntry::simple(input.0, 0, cap),
            StockEntry::simple(output.0, 0, cap),
        ]))
}

/// A marketplace: pooled stock of capacity `pool_cap`, selling for gold at
/// multiplier 1.
pub fn make_marketplace(pool_cap: u32) -> Building {
    make_sink_with_multiplier(pool_cap, 1)
}

/// A sink whose global output amount (the liquidation multiplier) is
/// `multiplier`.
pub fn make_sink_with_multiplier(pool_cap: u32, multiplier: u32) -> Building {
    Building::new(BuildingTypeId(3))
        .with_method(make_method(vec![], vec![(gold(), multiplier, true)], 1))
        .with_stock(Stockpile::with_entries(vec![StockEntry::pooled(pool_cap)]))
}

// ===========================================================================
// World builders
// ===========================================================================

/// Market values used across tests: wood 2, stone 3, plank 5, grain 1.
pub fn standard_values() -> ResourceValues {
    let mut values = ResourceValues::new();
    values.set(wood(), Fixed64::from_num(2));
    values.set(stone(), Fixed64::from_num(3));
    values.set(plank(), Fixed64::from_num(5));
    values.set(grain(), Fixed64::from_num(1));
    values
}

/// A linear economy: `producers` woodcutters feeding one sawmill chain into
/// a marketplace. Returns the world plus the marketplace id.
pub fn build_chain_world(producers: usize) -> (World, BuildingId) {
    let mut world = World::new();
    let market = world.add_building(make_marketplace(10_000));
    let sawmill = world.add_building(make_converter((wood(), 2), (plank(), 1), 1, 1_000));
    world.connect(sawmill, market, ResourceKind::Specific(plank()));
    for _ in 0..producers {
        let cutter = world.add_building(make_producer(wood(), 2, 1, 100));
        world.connect(cutter, sawmill, ResourceKind::Specific(wood()));
    }
    (world, market)
}
