//! Component kinds, payloads and the component container

use std::any::Any;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use super::EntityKey;

/// Identifier of a component kind
///
/// Scene files refer to kinds by this string. Each payload type declares its
/// kind through [`ComponentType::KIND`], and the registry is keyed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentKind(&'static str);

impl ComponentKind {
    /// Create a kind from its identifier
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    /// The identifier string
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Typed component payload
///
/// Payloads are plain data decoded from scene input records, so every field
/// should tolerate being absent (`#[serde(default)]`).
pub trait ComponentType: Serialize + DeserializeOwned + Default + fmt::Debug + 'static {
    /// Kind this payload is registered under
    const KIND: ComponentKind;
}

/// Object-safe view of a payload
pub trait ComponentData: fmt::Debug {
    /// Shallow JSON snapshot of the payload's fields
    fn snapshot(&self) -> Value;
    /// Upcast for downcasting to the concrete payload
    fn as_any(&self) -> &dyn Any;
    /// Mutable upcast for downcasting to the concrete payload
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: ComponentType> ComponentData for T {
    fn snapshot(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|err| {
            log::warn!("Could not snapshot '{}' component: {err}", T::KIND);
            Value::Null
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A component attached (or attachable) to an entity
///
/// Wraps a typed payload with the lifecycle flags every component shares and
/// a non-owning handle to the entity that holds it.
#[derive(Debug)]
pub struct Component {
    kind: ComponentKind,
    /// Set while the owning system's load hook runs for this entity
    pub loading: bool,
    /// Set once the owning system's load hook has completed
    pub loaded: bool,
    /// Systems may skip disabled components
    pub enabled: bool,
    entity: Option<EntityKey>,
    data: Box<dyn ComponentData>,
}

impl Component {
    /// Wrap a payload; the component starts enabled and unloaded
    pub fn new<C: ComponentType>(data: C) -> Self {
        Self {
            kind: C::KIND,
            loading: false,
            loaded: false,
            enabled: true,
            entity: None,
            data: Box::new(data),
        }
    }

    /// Build a component from a scene input record
    ///
    /// `enabled` is read from the record (default `true`). The payload is
    /// decoded from the same record; a record that does not fit the payload
    /// type leaves every field at its default. A record holding nothing but
    /// `enabled` is not decoded, so unit-struct payloads accept `{}`.
    pub fn from_record<C: ComponentType>(record: &Value) -> Self {
        let data = match record {
            Value::Object(fields) if fields.keys().all(|field| field == "enabled") => C::default(),
            Value::Object(_) => serde_json::from_value::<C>(record.clone()).unwrap_or_else(|err| {
                log::warn!("Malformed '{}' record ({err}); using defaults", C::KIND);
                C::default()
            }),
            Value::Null => C::default(),
            other => {
                log::warn!("'{}' record is not an object ({other}); using defaults", C::KIND);
                C::default()
            }
        };

        let mut component = Self::new(data);
        component.enabled = record
            .get("enabled")
            .and_then(Value::as_bool)
            .unwrap_or(true);
        component
    }

    /// Kind of this component
    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Entity holding this component, if attached
    pub fn entity(&self) -> Option<EntityKey> {
        self.entity
    }

    pub(crate) fn set_entity(&mut self, entity: Option<EntityKey>) {
        self.entity = entity;
    }

    /// Typed payload, `None` if this component holds a different type
    pub fn data<C: ComponentType>(&self) -> Option<&C> {
        self.data.as_any().downcast_ref::<C>()
    }

    /// Typed payload, mutable
    pub fn data_mut<C: ComponentType>(&mut self) -> Option<&mut C> {
        self.data.as_any_mut().downcast_mut::<C>()
    }

    /// Payload fields plus lifecycle flags, without the entity handle
    pub fn snapshot(&self) -> Value {
        let mut fields = match self.data.snapshot() {
            Value::Object(fields) => fields,
            Value::Null => Map::new(),
            other => {
                let mut fields = Map::new();
                fields.insert("value".to_string(), other);
                fields
            }
        };
        fields.insert("loading".to_string(), Value::Bool(self.loading));
        fields.insert("loaded".to_string(), Value::Bool(self.loaded));
        fields.insert("enabled".to_string(), Value::Bool(self.enabled));
        Value::Object(fields)
    }

    /// `{ <kind>: <snapshot> }`
    pub fn serialize(&self) -> Value {
        let mut keyed = Map::new();
        keyed.insert(self.kind.as_str().to_string(), self.snapshot());
        Value::Object(keyed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    #[serde(default)]
    struct Health {
        current: i32,
        max: i32,
    }

    impl ComponentType for Health {
        const KIND: ComponentKind = ComponentKind::new("Health");
    }

    #[test]
    fn test_from_record_assigns_fields_and_enabled() {
        let component = Component::from_record::<Health>(&json!({
            "current": 3,
            "max": 10,
            "enabled": false
        }));

        assert_eq!(component.kind(), Health::KIND);
        assert!(!component.enabled);
        assert!(!component.loading);
        assert!(!component.loaded);
        assert!(component.entity().is_none());
        assert_eq!(component.data::<Health>(), Some(&Health { current: 3, max: 10 }));
    }

    #[test]
    fn test_enabled_defaults_to_true() {
        let component = Component::from_record::<Health>(&json!({ "current": 1 }));
        assert!(component.enabled);
        assert_eq!(component.data::<Health>().unwrap().max, 0);
    }

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    struct Marker;

    impl ComponentType for Marker {
        const KIND: ComponentKind = ComponentKind::new("Marker");
    }

    #[test]
    fn test_unit_payload_accepts_empty_record() {
        let component = Component::from_record::<Marker>(&json!({}));
        assert_eq!(component.data::<Marker>(), Some(&Marker));
        assert!(component.enabled);

        let component = Component::from_record::<Marker>(&json!({ "enabled": false }));
        assert_eq!(component.data::<Marker>(), Some(&Marker));
        assert!(!component.enabled);
    }

    #[test]
    fn test_malformed_record_falls_back_to_defaults() {
        let component = Component::from_record::<Health>(&json!({ "current": "lots" }));
        assert_eq!(component.data::<Health>(), Some(&Health::default()));

        let component = Component::from_record::<Health>(&json!(42));
        assert_eq!(component.data::<Health>(), Some(&Health::default()));
        assert!(component.enabled);
    }

    #[test]
    fn test_serialize_is_keyed_by_kind_without_entity() {
        let mut component = Component::new(Health { current: 5, max: 5 });
        component.loaded = true;

        let serialized = component.serialize();
        assert_eq!(
            serialized,
            json!({
                "Health": {
                    "current": 5,
                    "max": 5,
                    "loading": false,
                    "loaded": true,
                    "enabled": true
                }
            })
        );
        assert!(serialized["Health"].get("entity").is_none());
    }

    #[test]
    fn test_data_mut_edits_payload() {
        let mut component = Component::new(Health::default());
        component.data_mut::<Health>().unwrap().current = 7;
        assert_eq!(component.data::<Health>().unwrap().current, 7);
    }
}
