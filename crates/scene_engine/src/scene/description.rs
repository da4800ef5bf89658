//! Decoded scene descriptions

use serde_json::Value;

use super::SceneError;

/// One entity declared by a scene
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDescription {
    /// Entity name (its identity in the world)
    pub name: String,
    /// `(kind, input record)` pairs in document order
    pub components: Vec<(String, Value)>,
}

/// A validated scene document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneDescription {
    /// Entities in document order
    pub entities: Vec<EntityDescription>,
    /// Name of the entity that represents the world itself, if any
    pub world_entity: Option<String>,
}

impl SceneDescription {
    /// Validate and decode a raw payload
    ///
    /// `label` names the document in errors. A falsy payload (`null`,
    /// `false`, `0`, `""`) is a [`SceneError::Format`]; a payload without an
    /// object-valued `entities` field is a [`SceneError::Schema`].
    pub fn from_value(payload: &Value, label: &str) -> Result<Self, SceneError> {
        if is_falsy(payload) {
            return Err(SceneError::Format(label.to_string()));
        }

        let Some(entities) = payload.get("entities").and_then(Value::as_object) else {
            return Err(SceneError::Schema(label.to_string()));
        };

        let entities = entities
            .iter()
            .map(|(name, declaration)| EntityDescription {
                name: name.clone(),
                components: component_records(name, declaration),
            })
            .collect();

        let world_entity = payload
            .get("worldEntity")
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(Self {
            entities,
            world_entity,
        })
    }

    /// Distinct component kinds referenced anywhere in the scene, in order of
    /// first appearance
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = Vec::new();
        for (kind, _) in self.entities.iter().flat_map(|e| e.components.iter()) {
            if !kinds.contains(&kind.as_str()) {
                kinds.push(kind.as_str());
            }
        }
        kinds
    }
}

fn component_records(entity: &str, declaration: &Value) -> Vec<(String, Value)> {
    match declaration.get("components") {
        Some(Value::Object(components)) => components
            .iter()
            .map(|(kind, record)| (kind.clone(), record.clone()))
            .collect(),
        Some(other) => {
            log::warn!("Entity '{entity}' has a non-object components field ({other}); ignoring it");
            Vec::new()
        }
        None => Vec::new(),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
