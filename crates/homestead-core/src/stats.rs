//! Per-day statistics for UI feedback (toasts, progress displays).
//!
//! Collected inline while the day runs: every stock mutation records an
//! added/removed delta against its building, and every executed transfer
//! records the amount moved on its connection. The next day never reads
//! these; they are purely an output of [`crate::day::advance_day`].

use crate::id::{BuildingId, ConnectionId, ResourceId};
use slotmap::SecondaryMap;

/// Net stock movement of one resource at one building over one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ResourceDelta {
    pub resource: ResourceId,
    pub added: u32,
    pub removed: u32,
}

impl ResourceDelta {
    pub fn net(&self) -> i64 {
        i64::from(self.added) - i64::from(self.removed)
    }
}

/// One building's deltas for the day, ordered by first touch.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BuildingDayStats {
    deltas: Vec<ResourceDelta>,
    /// Outputs emitted by a completed production cycle, if one finished.
    pub produced: Option<Vec<(ResourceId, u32)>>,
}

impl BuildingDayStats {
    fn delta_mut(&mut self, resource: ResourceId) -> &mut ResourceDelta {
        if let Some(idx) = self.deltas.iter().position(|d| d.resource == resource) {
            &mut self.deltas[idx]
        } else {
            self.deltas.push(ResourceDelta {
                resource,
                added: 0,
                removed: 0,
            });
            self.deltas.last_mut().unwrap()
        }
    }

    pub fn deltas(&self) -> &[ResourceDelta] {
        &self.deltas
    }
}

/// Everything the UI layer wants to know about one simulated day.
#[derive(Debug, Clone, Default)]
pub struct DayStats {
    buildings: SecondaryMap<BuildingId, BuildingDayStats>,
    /// Per-connection transferred amounts. A wildcard connection can carry
    /// several resource types in one day, hence the list.
    transfers: SecondaryMap<ConnectionId, Vec<(ResourceId, u32)>>,
}

impl DayStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_added(&mut self, building: BuildingId, resource: ResourceId, quantity: u32) {
        if quantity == 0 {
            return;
        }
        self.building_mut(building).delta_mut(resource).added += quantity;
    }

    pub fn record_removed(&mut self, building: BuildingId, resource: ResourceId, quantity: u32) {
        if quantity == 0 {
            return;
        }
        self.building_mut(building).delta_mut(resource).removed += quantity;
    }

    pub fn record_transfer(
        &mut self,
        connection: ConnectionId,
        resource: ResourceId,
        quantity: u32,
    ) {
        if quantity == 0 {
            return;
        }
        let records = self.transfers.entry(connection).unwrap().or_default();
        if let Some(entry) = records.iter_mut().find(|(r, _)| *r == resource) {
            entry.1 += quantity;
        } else {
            records.push((resource, quantity));
        }
    }

    pub fn record_produced(&mut self, building: BuildingId, outputs: Vec<(ResourceId, u32)>) {
        self.building_mut(building).produced = Some(outputs);
    }

    fn building_mut(&mut self, building: BuildingId) -> &mut BuildingDayStats {
        self.buildings.entry(building).unwrap().or_default()
    }

    /// Stats for one building; `None` when nothing touched it this day.
    pub fn building(&self, building: BuildingId) -> Option<&BuildingDayStats> {
        self.buildings.get(building)
    }

    /// Amounts moved over one connection this day.
    pub fn transferred(&self, connection: ConnectionId) -> &[(ResourceId, u32)] {
        self.transfers
            .get(connection)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn iter_buildings(&self) -> impl Iterator<Item = (BuildingId, &BuildingDayStats)> {
        self.buildings.iter()
    }
}
