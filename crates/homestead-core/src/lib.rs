//! Homestead Core -- the day-tick simulation engine for the canvas
//! factory-building game.
//!
//! Players place buildings on a canvas, wire them together with typed
//! resource connections, and advance simulated days. This crate computes one
//! discrete day: which buildings convert inputs to outputs, how much of each
//! resource moves across which connections, and how sink buildings (the
//! marketplace) liquidate accumulated stock into globally-tracked currencies.
//! Rendering, placement, and persistence encoding live in other crates.
//!
//! # Day Pipeline
//!
//! Each call to [`day::advance_day`] runs, over a cloned arena snapshot:
//!
//! 1. **Index** -- build forward/reverse adjacency from the connection set.
//! 2. **Sinks** -- classify global-output buildings and liquidate their
//!    pooled stock into the ledger.
//! 3. **Order** -- breadth-first walk backward from the sinks to get a
//!    deterministic sink-first processing order.
//! 4. **Flow** -- in order, push each building's stock downstream, splitting
//!    fairly when one source feeds several consumers of the same resource.
//! 5. **Produce** -- in the same order, advance every production state
//!    machine (consume inputs, accrue progress, emit outputs).
//! 6. **Stragglers** -- buildings unreachable from any sink still flow and
//!    produce, outside the ordered walk.
//!
//! The input [`world::World`] is never mutated; the caller commits the
//! returned snapshot (or discards it) and merges the ledger delta.
//!
//! # Key Types
//!
//! - [`world::World`] -- arena of buildings and connections.
//! - [`stock::StockEntry`] -- `Simple` bounded stock, or `Pooled` wildcard
//!   stock with a per-resource breakdown.
//! - [`method::ProductionMethod`] -- recipe of inputs, outputs, duration.
//! - [`method::ProductionState`] -- idle/active/paused/complete machine.
//! - [`ledger::GlobalLedger`] -- explicit accumulator of global resources.
//! - [`stats::DayStats`] -- per-building and per-connection deltas for UI
//!   feedback; never consumed by the next day.
//! - [`fixed::Fixed64`] -- Q32.32 fixed-point type for deterministic money
//!   math.

pub mod building;
#[cfg(feature = "data-loader")]
pub mod data_loader;
pub mod day;
pub mod fixed;
pub mod graph;
pub mod id;
pub mod ledger;
pub mod market;
pub mod method;
pub mod production;
pub mod stats;
pub mod stock;
pub mod transfer;
pub mod validation;
pub mod world;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
