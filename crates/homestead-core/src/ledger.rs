use crate::fixed::Fixed64;
use crate::id::ResourceId;
use std::collections::BTreeMap;

/// Accumulated totals of globally-tracked resources (currencies).
///
/// [`crate::day::advance_day`] returns the delta earned in one day; the
/// caller merges it into its cumulative ledger. Passed explicitly so
/// multiple simulations (tests, replays) run independently -- there is no
/// module-level singleton.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GlobalLedger {
    totals: BTreeMap<ResourceId, Fixed64>,
}

impl GlobalLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to the total for `resource`. Zero credits are dropped;
    /// totals saturate at `Fixed64::MAX` instead of overflowing.
    pub fn credit(&mut self, resource: ResourceId, amount: Fixed64) {
        if amount == Fixed64::ZERO {
            return;
        }
        let total = self.totals.entry(resource).or_insert(Fixed64::ZERO);
        *total = total.saturating_add(amount);
    }

    pub fn get(&self, resource: ResourceId) -> Fixed64 {
        self.totals.get(&resource).copied().unwrap_or(Fixed64::ZERO)
    }

    /// Fold another ledger (typically a day delta) into this one.
    pub fn merge(&mut self, delta: &GlobalLedger) {
        for (&resource, &amount) in &delta.totals {
            self.credit(resource, amount);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceId, Fixed64)> + '_ {
        self.totals.iter().map(|(&r, &v)| (r, v))
    }
}

/// Per-unit market values used when a sink liquidates stock.
///
/// A resource with no entry is worth nothing: it still drains from the sink
/// but credits zero, matching the silent-no-op posture of the rest of the
/// day pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ResourceValues {
    values: BTreeMap<ResourceId, Fixed64>,
}

impl ResourceValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, resource: ResourceId, per_unit: Fixed64) {
        self.values.insert(resource, per_unit);
    }

    pub fn get(&self, resource: ResourceId) -> Fixed64 {
        self.values.get(&resource).copied().unwrap_or(Fixed64::ZERO)
    }
}
