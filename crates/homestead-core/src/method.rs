use crate::fixed::Days;
use crate::id::ResourceId;

// ---------------------------------------------------------------------------
// Production methods
// ---------------------------------------------------------------------------

/// An input requirement of a production method.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MethodInput {
    pub resource: ResourceId,
    pub amount: u32,
}

/// An output product of a production method.
///
/// `global` outputs are credited to the account-wide ledger instead of the
/// building's local stock; they are what makes a building a sink.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MethodOutput {
    pub resource: ResourceId,
    pub amount: u32,
    #[serde(default)]
    pub global: bool,
}

/// A named recipe a building executes repeatedly: consume the inputs, wait
/// `duration` days, emit the outputs.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ProductionMethod {
    pub name: String,
    pub inputs: Vec<MethodInput>,
    pub outputs: Vec<MethodOutput>,
    /// Days to complete one production cycle.
    pub duration: Days,
}

impl ProductionMethod {
    /// True when any output is credited to the global ledger. This is the
    /// single signal consulted for sink classification.
    pub fn has_global_output(&self) -> bool {
        self.outputs.iter().any(|o| o.global)
    }

    /// The first global-flagged output, if any.
    pub fn global_output(&self) -> Option<&MethodOutput> {
        self.outputs.iter().find(|o| o.global)
    }

    /// Outputs that land in local stock rather than the ledger.
    pub fn local_outputs(&self) -> impl Iterator<Item = &MethodOutput> {
        self.outputs.iter().filter(|o| !o.global)
    }
}

// ---------------------------------------------------------------------------
// Production state
// ---------------------------------------------------------------------------

/// Where a building is in its production cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ProductionStatus {
    /// Waiting to start a cycle (inputs missing or outputs blocked).
    #[default]
    Idle,
    /// Mid-cycle; `progress` advances one per day.
    Active,
    /// Mid-cycle but output capacity is blocked; `progress` is preserved.
    Paused,
    /// A cycle finished this day. Transient: the next evaluation resets to Idle.
    Complete,
}

/// Runtime production state of one building.
///
/// Invariants: `progress` only advances while `Active`; `Complete` implies
/// `progress >= duration` of the active method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ProductionState {
    pub progress: u32,
    pub status: ProductionStatus,
}

impl ProductionState {
    pub fn idle() -> Self {
        Self::default()
    }
}
