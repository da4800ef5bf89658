//! Entity implementation
//!
//! An entity is a named node: it carries a transform and visibility like any
//! scene-graph node, plus at most one component per kind.

use std::collections::BTreeMap;

use serde_json::{json, Map, Value};

use super::{Component, ComponentKind, ComponentType, EcsError};
use crate::foundation::math::Transform;

slotmap::new_key_type! {
    /// Handle to an entity registered in a [`World`](super::World)
    ///
    /// Components store this instead of a reference, so they never keep
    /// their entity alive.
    pub struct EntityKey;
}

/// A named game object
#[derive(Debug)]
pub struct Entity {
    name: String,
    key: Option<EntityKey>,
    components: BTreeMap<ComponentKind, Component>,
    /// Local transform of the node
    pub transform: Transform,
    /// Whether the node is drawn
    pub visible: bool,
}

impl Entity {
    /// Create an unregistered entity with no components
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: None,
            components: BTreeMap::new(),
            transform: Transform::identity(),
            visible: true,
        }
    }

    /// Entity name (its identity in the world)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handle in the owning world, `None` until registered
    pub fn key(&self) -> Option<EntityKey> {
        self.key
    }

    /// Record the world handle and point every held component at it
    pub(crate) fn attach(&mut self, key: EntityKey) {
        self.key = Some(key);
        for component in self.components.values_mut() {
            component.set_entity(Some(key));
        }
    }

    /// Attach a component, replacing any component of the same kind
    pub fn add_component(&mut self, mut component: Component) -> &mut Self {
        component.set_entity(self.key);
        if self.components.insert(component.kind(), component).is_some() {
            log::trace!("Entity '{}' replaced an existing component", self.name);
        }
        self
    }

    /// Detach the component of `kind`; absent kinds are ignored
    pub fn remove_component(&mut self, kind: ComponentKind) -> &mut Self {
        self.take_component(kind);
        self
    }

    /// Detach and return the component of `kind`
    pub fn take_component(&mut self, kind: ComponentKind) -> Option<Component> {
        let mut component = self.components.remove(&kind)?;
        component.set_entity(None);
        Some(component)
    }

    /// Component of `kind`
    ///
    /// Callers are expected to know the component is present (via
    /// [`has_component`](Self::has_component) or a world query); a missing
    /// component is an error naming both the kind and this entity.
    pub fn get_component(&self, kind: ComponentKind) -> Result<&Component, EcsError> {
        self.components
            .get(&kind)
            .ok_or_else(|| not_found(kind, &self.name))
    }

    /// Component of `kind`, mutable
    pub fn get_component_mut(&mut self, kind: ComponentKind) -> Result<&mut Component, EcsError> {
        let name = &self.name;
        self.components
            .get_mut(&kind)
            .ok_or_else(|| not_found(kind, name))
    }

    /// Whether a component of `kind` is attached
    pub fn has_component(&self, kind: ComponentKind) -> bool {
        self.components.contains_key(&kind)
    }

    /// Whether components of every kind in `kinds` are attached
    pub fn has_all(&self, kinds: &[ComponentKind]) -> bool {
        kinds.iter().all(|kind| self.has_component(*kind))
    }

    /// Typed payload of component `C`
    pub fn get<C: ComponentType>(&self) -> Result<&C, EcsError> {
        self.get_component(C::KIND)?
            .data::<C>()
            .ok_or_else(|| mismatch::<C>(&self.name))
    }

    /// Typed payload of component `C`, mutable
    pub fn get_mut<C: ComponentType>(&mut self) -> Result<&mut C, EcsError> {
        let name = &self.name;
        self.components
            .get_mut(&C::KIND)
            .ok_or_else(|| not_found(C::KIND, name))?
            .data_mut::<C>()
            .ok_or_else(|| mismatch::<C>(name))
    }

    /// Whether component `C` is attached
    pub fn has<C: ComponentType>(&self) -> bool {
        self.has_component(C::KIND)
    }

    /// Number of attached components
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Attached components ordered by kind
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    /// Attached components ordered by kind, mutable
    pub fn components_mut(&mut self) -> impl Iterator<Item = &mut Component> {
        self.components.values_mut()
    }

    /// `{ name, components: { kind: snapshot } }`
    ///
    /// Snapshots never include the entity handle, so the output is always a
    /// finite tree.
    pub fn serialize(&self) -> Value {
        let components: Map<String, Value> = self
            .components
            .iter()
            .map(|(kind, component)| (kind.as_str().to_string(), component.snapshot()))
            .collect();

        json!({
            "name": self.name,
            "components": components,
        })
    }

    /// [`serialize`](Self::serialize) rendered as a JSON string
    pub fn to_json(&self) -> String {
        self.serialize().to_string()
    }
}

fn not_found(kind: ComponentKind, entity: &str) -> EcsError {
    EcsError::ComponentNotFound {
        kind,
        entity: entity.to_string(),
    }
}

fn mismatch<C: ComponentType>(entity: &str) -> EcsError {
    EcsError::KindMismatch {
        kind: C::KIND,
        entity: entity.to_string(),
        expected: std::any::type_name::<C>(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use slotmap::SlotMap;

    #[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Tag {
        label: String,
    }

    impl ComponentType for Tag {
        const KIND: ComponentKind = ComponentKind::new("Tag");
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Marker;

    impl ComponentType for Marker {
        const KIND: ComponentKind = ComponentKind::new("Marker");
    }

    fn tag(label: &str) -> Component {
        Component::new(Tag {
            label: label.to_string(),
        })
    }

    #[test]
    fn test_add_then_get() {
        let mut entity = Entity::new("Player");
        entity.add_component(tag("first"));

        assert!(entity.has_component(Tag::KIND));
        assert!(entity.has::<Tag>());
        assert_eq!(entity.get::<Tag>().unwrap().label, "first");
        assert_eq!(entity.get_component(Tag::KIND).unwrap().kind(), Tag::KIND);
    }

    #[test]
    fn test_same_kind_replaces() {
        let mut entity = Entity::new("Player");
        entity.add_component(tag("first")).add_component(tag("second"));

        assert_eq!(entity.component_count(), 1);
        assert_eq!(entity.get::<Tag>().unwrap().label, "second");
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut entity = Entity::new("Player");
        entity.add_component(tag("only"));

        entity.remove_component(Marker::KIND);
        assert_eq!(entity.component_count(), 1);

        entity.remove_component(Tag::KIND);
        assert_eq!(entity.component_count(), 0);
        assert!(!entity.has::<Tag>());
    }

    #[test]
    fn test_missing_component_names_kind_and_entity() {
        let entity = Entity::new("Crate");
        let err = entity.get_component(Tag::KIND).unwrap_err();

        assert!(matches!(
            &err,
            EcsError::ComponentNotFound { kind, entity } if *kind == Tag::KIND && entity == "Crate"
        ));
        assert_eq!(err.to_string(), "Component 'Tag' not found on entity 'Crate'");
    }

    #[test]
    fn test_components_follow_entity_key() {
        let mut keys: SlotMap<EntityKey, ()> = SlotMap::with_key();
        let key = keys.insert(());

        let mut entity = Entity::new("Player");
        entity.add_component(tag("before"));
        entity.attach(key);
        entity.add_component(Component::new(Marker));

        assert!(entity.components().all(|c| c.entity() == Some(key)));

        let detached = entity.take_component(Marker::KIND).unwrap();
        assert_eq!(detached.entity(), None);
    }

    #[test]
    fn test_serialize_shape() {
        let mut entity = Entity::new("Player");
        entity.add_component(tag("hero"));

        let value = entity.serialize();
        assert_eq!(value["name"], "Player");
        assert_eq!(value["components"]["Tag"]["label"], "hero");
        assert_eq!(value["components"]["Tag"]["enabled"], true);
    }

    #[test]
    fn test_to_json_name_round_trip() {
        let bare = Entity::new("Empty");
        let parsed: Value = serde_json::from_str(&bare.to_json()).unwrap();
        assert_eq!(parsed["name"], "Empty");
        assert_eq!(parsed["components"], json!({}));

        let mut full = Entity::new("Full");
        full.add_component(tag("x")).add_component(Component::new(Marker));
        let parsed: Value = serde_json::from_str(&full.to_json()).unwrap();
        assert_eq!(parsed["name"], "Full");
        assert!(parsed["components"]["Marker"].is_object());
    }
}
