use indexmap::IndexMap;
use indexmap::map::Entry;
use serde_json::{Map, Value};

use crate::error::{BwError, BwResult};
use crate::identifier::Identifier;

/// One engine capability: an identifier plus its schema-shaped payload.
///
/// The payload is only checked structurally. Whether the engine accepts
/// it is the caller's concern.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    identifier: Identifier,
    payload: Map<String, Value>,
}

impl Component {
    /// Create an empty component from an explicit namespace and name.
    pub fn new(namespace: &str, name: &str) -> BwResult<Self> {
        Ok(Self::from_identifier(Identifier::new(namespace, name)?))
    }

    /// Create an empty component for an already-validated identifier.
    pub fn from_identifier(identifier: Identifier) -> Self {
        Self {
            identifier,
            payload: Map::new(),
        }
    }

    /// Create a component with an initial payload.
    pub fn with_payload(identifier: Identifier, payload: Map<String, Value>) -> Self {
        Self {
            identifier,
            payload,
        }
    }

    /// The component's identifier, e.g. `minecraft:health`.
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// Set or overwrite a payload entry.
    pub fn add_field(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.payload.insert(key.into(), value.into());
    }

    /// Builder form of [`Component::add_field`].
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.add_field(key, value);
        self
    }

    /// Set the engine's `priority` field (lower runs first).
    pub fn with_priority(self, priority: u32) -> Self {
        self.with_field("priority", priority)
    }

    /// Read a payload entry.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    /// The raw payload.
    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    /// The payload as a JSON value. Components are already schema-shaped.
    pub fn to_json(&self) -> Value {
        Value::Object(self.payload.clone())
    }
}

/// Components keyed by identifier in declaration order.
///
/// Inserting an identifier that is already present replaces the payload in
/// place, so the first declaration fixes the position and the last one
/// fixes the content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentMap {
    components: IndexMap<Identifier, Component>,
}

impl ComponentMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a component. Returns the replaced one, if any.
    pub fn insert(&mut self, component: Component) -> Option<Component> {
        self.components
            .insert(component.identifier.clone(), component)
    }

    /// Insert a component, failing if its identifier is already present.
    pub fn insert_strict(&mut self, component: Component) -> BwResult<()> {
        match self.components.entry(component.identifier.clone()) {
            Entry::Occupied(e) => Err(BwError::DuplicateDeclaration {
                kind: "component",
                identifier: e.key().to_string(),
            }),
            Entry::Vacant(e) => {
                e.insert(component);
                Ok(())
            }
        }
    }

    /// Merge another map into this one, later entries winning.
    pub fn merge(&mut self, other: &ComponentMap) {
        for component in other.iter() {
            if self.insert(component.clone()).is_some() {
                tracing::trace!(component = %component.identifier, "component overridden");
            }
        }
    }

    /// Look up a component by identifier.
    pub fn get(&self, identifier: &Identifier) -> Option<&Component> {
        self.components.get(identifier)
    }

    /// Look up a component mutably by identifier.
    pub fn get_mut(&mut self, identifier: &Identifier) -> Option<&mut Component> {
        self.components.get_mut(identifier)
    }

    /// Remove a component, keeping the order of the others.
    pub fn remove(&mut self, identifier: &Identifier) -> Option<Component> {
        self.components.shift_remove(identifier)
    }

    /// Returns true if a component with this identifier is present.
    pub fn contains(&self, identifier: &Identifier) -> bool {
        self.components.contains_key(identifier)
    }

    /// Iterate in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns true if there are no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// The `{"<identifier>": payload, ...}` object the engine expects.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.components
                .iter()
                .map(|(id, c)| (id.to_string(), c.to_json()))
                .collect(),
        )
    }
}

impl FromIterator<Component> for ComponentMap {
    fn from_iter<I: IntoIterator<Item = Component>>(iter: I) -> Self {
        let mut map = Self::new();
        for component in iter {
            map.insert(component);
        }
        map
    }
}

impl Extend<Component> for ComponentMap {
    fn extend<I: IntoIterator<Item = Component>>(&mut self, iter: I) {
        for component in iter {
            self.insert(component);
        }
    }
}
