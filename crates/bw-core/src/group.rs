use serde_json::Value;

use crate::component::{Component, ComponentMap};
use crate::error::BwResult;

/// A named set of components that events add to or remove from an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentGroup {
    name: String,
    components: ComponentMap,
}

impl ComponentGroup {
    /// An empty group. The name is how events refer to it.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            components: ComponentMap::new(),
        }
    }

    /// The group's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Insert or overwrite a component.
    pub fn add_component(&mut self, component: Component) {
        self.components.insert(component);
    }

    /// Insert a component, failing if one with the same identifier exists.
    pub fn add_component_strict(&mut self, component: Component) -> BwResult<()> {
        self.components.insert_strict(component)
    }

    /// Builder form of [`ComponentGroup::add_component`].
    pub fn with_component(mut self, component: Component) -> Self {
        self.add_component(component);
        self
    }

    /// Builder form adding several components at once.
    pub fn with_components(mut self, components: impl IntoIterator<Item = Component>) -> Self {
        self.components.extend(components);
        self
    }

    /// The group's components.
    pub fn components(&self) -> &ComponentMap {
        &self.components
    }

    /// `{"<component id>": payload, ...}`.
    pub fn to_json(&self) -> Value {
        self.components.to_json()
    }
}
