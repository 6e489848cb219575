//! Data-driven game content loading from JSON.
//!
//! Feature-gated behind `data-loader`. The placement layer ships resource
//! names, production methods, building templates, and market values as data
//! files; this module interns names into ids and produces ready-to-place
//! [`Building`] values.

use crate::building::Building;
use crate::fixed::Fixed64;
use crate::id::{BuildingTypeId, ResourceId};
use crate::ledger::ResourceValues;
use crate::method::{MethodInput, MethodOutput, ProductionMethod};
use crate::stock::{StockEntry, Stockpile};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during content loading.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
    #[error("duplicate resource name: {0}")]
    DuplicateResource(String),
    #[error("unknown resource reference: {0}")]
    UnknownResourceRef(String),
    #[error("unknown method reference: {0}")]
    UnknownMethodRef(String),
}

// ---------------------------------------------------------------------------
// JSON data structures
// ---------------------------------------------------------------------------

/// Top-level content file structure.
#[derive(Debug, serde::Deserialize)]
pub struct ContentData {
    #[serde(default)]
    pub resources: Vec<String>,
    #[serde(default)]
    pub methods: Vec<MethodData>,
    #[serde(default)]
    pub buildings: Vec<BuildingTemplateData>,
    /// Per-unit market values, keyed by resource name.
    #[serde(default)]
    pub values: BTreeMap<String, f64>,
}

#[derive(Debug, serde::Deserialize)]
pub struct MethodData {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<MethodEntryData>,
    #[serde(default)]
    pub outputs: Vec<MethodEntryData>,
    pub duration: u32,
}

#[derive(Debug, serde::Deserialize)]
pub struct MethodEntryData {
    pub resource: String,
    pub amount: u32,
    #[serde(default)]
    pub global: bool,
}

#[derive(Debug, serde::Deserialize)]
pub struct BuildingTemplateData {
    pub name: String,
    /// References a method by name.
    pub method: Option<String>,
    #[serde(default)]
    pub stock: Vec<StockEntryData>,
}

/// One stock entry of a template. No `resource` means the pooled wildcard
/// entry.
#[derive(Debug, serde::Deserialize)]
pub struct StockEntryData {
    pub resource: Option<String>,
    pub max_amount: u32,
}

// ---------------------------------------------------------------------------
// Loaded content
// ---------------------------------------------------------------------------

/// A building template ready to instantiate onto the canvas.
#[derive(Debug, Clone)]
pub struct BuildingTemplate {
    pub name: String,
    pub building_type: BuildingTypeId,
    method: Option<ProductionMethod>,
    stock: Stockpile,
}

impl BuildingTemplate {
    /// A fresh building instance of this template (empty stock, idle state).
    pub fn instantiate(&self) -> Building {
        let mut building = Building::new(self.building_type).with_stock(self.stock.clone());
        building.method = self.method.clone();
        building
    }
}

/// Interned game content: resources, methods, templates, and market values.
#[derive(Debug, Default)]
pub struct Content {
    resource_names: Vec<String>,
    methods: Vec<ProductionMethod>,
    templates: Vec<BuildingTemplate>,
    pub values: ResourceValues,
}

impl Content {
    pub fn resource(&self, name: &str) -> Option<ResourceId> {
        self.resource_names
            .iter()
            .position(|n| n == name)
            .map(|i| ResourceId(i as u32))
    }

    pub fn method(&self, name: &str) -> Option<&ProductionMethod> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn template(&self, name: &str) -> Option<&BuildingTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }

    pub fn resource_count(&self) -> usize {
        self.resource_names.len()
    }
}

// ---------------------------------------------------------------------------
// Loading functions
// ---------------------------------------------------------------------------

/// Load game content from a JSON string.
pub fn load_content_json(json: &str) -> Result<Content, ContentError> {
    let data: ContentData = serde_json::from_str(json)?;
    build_content(data)
}

/// Load game content from JSON bytes.
pub fn load_content_json_bytes(bytes: &[u8]) -> Result<Content, ContentError> {
    let data: ContentData = serde_json::from_slice(bytes)?;
    build_content(data)
}

fn build_content(data: ContentData) -> Result<Content, ContentError> {
    let mut content = Content::default();

    for name in data.resources {
        if content.resource_names.contains(&name) {
            return Err(ContentError::DuplicateResource(name));
        }
        content.resource_names.push(name);
    }

    let resolve = |content: &Content, name: &str| -> Result<ResourceId, ContentError> {
        content
            .resource(name)
            .ok_or_else(|| ContentError::UnknownResourceRef(name.to_string()))
    };

    for method in data.methods {
        let inputs = method
            .inputs
            .iter()
            .map(|e| {
                Ok(MethodInput {
                    resource: resolve(&content, &e.resource)?,
                    amount: e.amount,
                })
            })
            .collect::<Result<Vec<_>, ContentError>>()?;
        let outputs = method
            .outputs
            .iter()
            .map(|e| {
                Ok(MethodOutput {
                    resource: resolve(&content, &e.resource)?,
                    amount: e.amount,
                    global: e.global,
                })
            })
            .collect::<Result<Vec<_>, ContentError>>()?;
        content.methods.push(ProductionMethod {
            name: method.name,
            inputs,
            outputs,
            duration: method.duration,
        });
    }

    for (idx, template) in data.buildings.into_iter().enumerate() {
        let method = match &template.method {
            Some(name) => Some(
                content
                    .method(name)
                    .cloned()
                    .ok_or_else(|| ContentError::UnknownMethodRef(name.clone()))?,
            ),
            None => None,
        };
        let mut stock = Stockpile::new();
        for entry in &template.stock {
            match &entry.resource {
                Some(name) => {
                    stock.push(StockEntry::simple(resolve(&content, name)?, 0, entry.max_amount))
                }
                None => stock.push(StockEntry::pooled(entry.max_amount)),
            }
        }
        content.templates.push(BuildingTemplate {
            name: template.name,
            building_type: BuildingTypeId(idx as u32),
            method,
            stock,
        });
    }

    for (name, per_unit) in &data.values {
        let resource = resolve(&content, name)?;
        content.values.set(resource, Fixed64::from_num(*per_unit));
    }

    Ok(content)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT: &str = r#"{
        "resources": ["wood", "plank", "gold"],
        "methods": [
            {
                "name": "saw_planks",
                "inputs": [{"resource": "wood", "amount": 2}],
                "outputs": [{"resource": "plank", "amount": 1}],
                "duration": 3
            },
            {
                "name": "sell_goods",
                "outputs": [{"resource": "gold", "amount": 1, "global": true}],
                "duration": 1
            }
        ],
        "buildings": [
            {
                "name": "sawmill",
                "method": "saw_planks",
                "stock": [
                    {"resource": "wood", "max_amount": 20},
                    {"resource": "plank", "max_amount": 10}
                ]
            },
            {
                "name": "marketplace",
                "method": "sell_goods",
                "stock": [{"max_amount": 100}]
            }
        ],
        "values": {"wood": 2.0, "plank": 5.5}
    }"#;

    #[test]
    fn loads_and_interns_content() {
        let content = load_content_json(CONTENT).unwrap();
        assert_eq!(content.resource_count(), 3);
        assert_eq!(content.resource("wood"), Some(ResourceId(0)));
        assert_eq!(content.resource("iron"), None);

        let saw = content.method("saw_planks").unwrap();
        assert_eq!(saw.duration, 3);
        assert_eq!(saw.inputs[0].resource, ResourceId(0));
        assert!(!saw.has_global_output());
        assert!(content.method("sell_goods").unwrap().has_global_output());

        assert_eq!(
            content.values.get(ResourceId(1)),
            Fixed64::from_num(5.5)
        );
    }

    #[test]
    fn templates_instantiate_buildings() {
        let content = load_content_json(CONTENT).unwrap();
        let sawmill = content.template("sawmill").unwrap().instantiate();
        assert_eq!(sawmill.method.as_ref().unwrap().name, "saw_planks");
        assert_eq!(sawmill.stock.capacity_for(ResourceId(0)), 20);

        let market = content.template("marketplace").unwrap().instantiate();
        assert!(market.is_sink());
        assert!(market.stock.pooled().is_some());
        assert_eq!(market.stock.capacity_for(ResourceId(0)), 100);
    }

    #[test]
    fn duplicate_resource_rejected() {
        let err = load_content_json(r#"{"resources": ["wood", "wood"]}"#).unwrap_err();
        assert!(matches!(err, ContentError::DuplicateResource(name) if name == "wood"));
    }

    #[test]
    fn unknown_references_rejected() {
        let err = load_content_json(
            r#"{"resources": [], "methods": [{"name": "m", "inputs": [{"resource": "ore", "amount": 1}], "duration": 1}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ContentError::UnknownResourceRef(name) if name == "ore"));

        let err = load_content_json(
            r#"{"resources": [], "buildings": [{"name": "b", "method": "missing"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ContentError::UnknownMethodRef(name) if name == "missing"));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            load_content_json("{"),
            Err(ContentError::JsonParse(_))
        ));
    }
}
