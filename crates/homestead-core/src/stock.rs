use crate::id::ResourceId;
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Stock entries
// ---------------------------------------------------------------------------

/// A bounded quantity of resources held by a building.
///
/// `Simple` holds one concrete resource type. `Pooled` is the wildcard
/// ("any") category: several concrete types share one bounded pool, tracked
/// per type in `breakdown`. The breakdown values always sum to `amount` and
/// never hold zero-valued keys.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum StockEntry {
    Simple {
        resource: ResourceId,
        amount: u32,
        max_amount: u32,
    },
    Pooled {
        amount: u32,
        max_amount: u32,
        breakdown: BTreeMap<ResourceId, u32>,
    },
}

impl StockEntry {
    /// A simple entry holding `amount` of one resource, clamped to `max_amount`.
    pub fn simple(resource: ResourceId, amount: u32, max_amount: u32) -> Self {
        Self::Simple {
            resource,
            amount: amount.min(max_amount),
            max_amount,
        }
    }

    /// An empty pooled (wildcard) entry with the given capacity.
    pub fn pooled(max_amount: u32) -> Self {
        Self::Pooled {
            amount: 0,
            max_amount,
            breakdown: BTreeMap::new(),
        }
    }

    /// Total quantity currently held.
    pub fn amount(&self) -> u32 {
        match self {
            Self::Simple { amount, .. } | Self::Pooled { amount, .. } => *amount,
        }
    }

    /// Upper bound on `amount`.
    pub fn max_amount(&self) -> u32 {
        match self {
            Self::Simple { max_amount, .. } | Self::Pooled { max_amount, .. } => *max_amount,
        }
    }

    /// Remaining capacity (`max_amount - amount`).
    pub fn headroom(&self) -> u32 {
        self.max_amount().saturating_sub(self.amount())
    }
}

// ---------------------------------------------------------------------------
// Stockpile
// ---------------------------------------------------------------------------

/// The ordered stock entries of one building.
///
/// Lookups prefer a direct `Simple` entry for the requested resource and
/// fall back to the pooled entry. A building has at most one pooled entry;
/// if several exist, the first is used.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Stockpile {
    entries: Vec<StockEntry>,
}

impl Stockpile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<StockEntry>) -> Self {
        Self { entries }
    }

    pub fn push(&mut self, entry: StockEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[StockEntry] {
        &self.entries
    }

    /// Quantity of `resource` available: the direct entry's amount, or the
    /// pooled breakdown's sub-quantity when no direct entry exists.
    pub fn available(&self, resource: ResourceId) -> u32 {
        for entry in &self.entries {
            if let StockEntry::Simple { resource: r, amount, .. } = entry
                && *r == resource
            {
                return *amount;
            }
        }
        self.pooled()
            .map(|(_, breakdown)| breakdown.get(&resource).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// Remaining capacity for `resource`: the direct entry's headroom, else
    /// the pooled entry's headroom, else 0 (no matching entry accepts it).
    pub fn capacity_for(&self, resource: ResourceId) -> u32 {
        for entry in &self.entries {
            if let StockEntry::Simple { resource: r, .. } = entry
                && *r == resource
            {
                return entry.headroom();
            }
        }
        for entry in &self.entries {
            if matches!(entry, StockEntry::Pooled { .. }) {
                return entry.headroom();
            }
        }
        0
    }

    /// Add up to `quantity` of `resource`. Returns the amount actually added,
    /// which may be less when the matching entry lacks headroom and is 0 when
    /// no entry accepts the resource.
    #[must_use = "returns the quantity actually added, which may be less than requested"]
    pub fn add(&mut self, resource: ResourceId, quantity: u32) -> u32 {
        if quantity == 0 {
            return 0;
        }
        for entry in &mut self.entries {
            if let StockEntry::Simple { resource: r, amount, max_amount } = entry
                && *r == resource
            {
                let to_add = quantity.min(max_amount.saturating_sub(*amount));
                *amount += to_add;
                return to_add;
            }
        }
        for entry in &mut self.entries {
            if let StockEntry::Pooled { amount, max_amount, breakdown } = entry {
                let to_add = quantity.min(max_amount.saturating_sub(*amount));
                if to_add > 0 {
                    *amount += to_add;
                    *breakdown.entry(resource).or_insert(0) += to_add;
                }
                return to_add;
            }
        }
        0
    }

    /// Remove up to `quantity` of `resource`. Returns the amount actually
    /// removed. Pooled breakdown keys are dropped once they reach zero.
    #[must_use = "returns the quantity actually removed, which may be less than requested"]
    pub fn remove(&mut self, resource: ResourceId, quantity: u32) -> u32 {
        if quantity == 0 {
            return 0;
        }
        for entry in &mut self.entries {
            if let StockEntry::Simple { resource: r, amount, .. } = entry
                && *r == resource
            {
                let to_remove = quantity.min(*amount);
                *amount -= to_remove;
                return to_remove;
            }
        }
        for entry in &mut self.entries {
            if let StockEntry::Pooled { amount, breakdown, .. } = entry {
                let Some(sub) = breakdown.get_mut(&resource) else {
                    return 0;
                };
                let to_remove = quantity.min(*sub);
                *sub -= to_remove;
                *amount -= to_remove;
                if *sub == 0 {
                    breakdown.remove(&resource);
                }
                return to_remove;
            }
        }
        0
    }

    /// The pooled entry's total amount and breakdown, if the building has one.
    pub fn pooled(&self) -> Option<(u32, &BTreeMap<ResourceId, u32>)> {
        self.entries.iter().find_map(|entry| match entry {
            StockEntry::Pooled { amount, breakdown, .. } => Some((*amount, breakdown)),
            StockEntry::Simple { .. } => None,
        })
    }

    /// Empty the pooled entry, returning its former breakdown in resource order.
    pub fn drain_pooled(&mut self) -> Vec<(ResourceId, u32)> {
        for entry in &mut self.entries {
            if let StockEntry::Pooled { amount, breakdown, .. } = entry {
                *amount = 0;
                let drained = std::mem::take(breakdown);
                return drained.into_iter().collect();
            }
        }
        Vec::new()
    }

    /// Resource types with a nonzero quantity anywhere in this stockpile:
    /// simple entries in entry order, then pooled breakdown keys in resource
    /// order, without duplicates.
    pub fn resources_available(&self) -> Vec<ResourceId> {
        let mut seen = Vec::new();
        for entry in &self.entries {
            if let StockEntry::Simple { resource, amount, .. } = entry
                && *amount > 0
                && !seen.contains(resource)
            {
                seen.push(*resource);
            }
        }
        if let Some((_, breakdown)) = self.pooled() {
            for (&resource, &qty) in breakdown {
                if qty > 0 && !seen.contains(&resource) {
                    seen.push(resource);
                }
            }
        }
        seen
    }
}

// ===========================================================================
// Tests
// ===========================================================================
