use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// Identifies a building instance placed on the canvas.
    pub struct BuildingId;

    /// Identifies a connection (typed resource edge) between two buildings.
    pub struct ConnectionId;
}

/// Identifies a concrete resource type. Cheap to copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceId(pub u32);

/// Identifies a building template (woodcutter, sawmill, marketplace, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildingTypeId(pub u32);
