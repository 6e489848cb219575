use crate::id::{BuildingId, BuildingTypeId, ResourceId};
use crate::method::{ProductionMethod, ProductionState};
use crate::stock::Stockpile;

// ---------------------------------------------------------------------------
// Connections
// ---------------------------------------------------------------------------

/// The resource a connection is typed to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ResourceKind {
    /// Exactly one concrete resource flows on this connection.
    Specific(ResourceId),
    /// The wildcard: whatever the source has available flows, into the
    /// target's pooled entry (marketplace feeds are wired this way).
    Any,
}

impl ResourceKind {
    pub fn as_specific(&self) -> Option<ResourceId> {
        match self {
            Self::Specific(r) => Some(*r),
            Self::Any => None,
        }
    }
}

/// A directed, typed resource edge between two placed buildings.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Connection {
    pub from: BuildingId,
    pub to: BuildingId,
    pub resource: ResourceKind,
}

// ---------------------------------------------------------------------------
// Buildings
// ---------------------------------------------------------------------------

/// One building placed on the canvas.
///
/// Owned by the day orchestrator during a tick; the orchestrator replaces
/// the whole record set per day rather than letting outside code mutate it.
/// A building with no active method is skipped by every day operation.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Building {
    pub building_type: BuildingTypeId,
    pub method: Option<ProductionMethod>,
    pub state: ProductionState,
    pub stock: Stockpile,
}

impl Building {
    pub fn new(building_type: BuildingTypeId) -> Self {
        Self {
            building_type,
            method: None,
            state: ProductionState::idle(),
            stock: Stockpile::new(),
        }
    }

    pub fn with_method(mut self, method: ProductionMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn with_stock(mut self, stock: Stockpile) -> Self {
        self.stock = stock;
        self
    }

    /// True when the active method credits the global ledger (sink signal).
    pub fn is_sink(&self) -> bool {
        self.method
            .as_ref()
            .is_some_and(|m| m.has_global_output())
    }
}
