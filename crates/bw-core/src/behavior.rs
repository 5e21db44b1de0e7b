use indexmap::IndexMap;
use indexmap::map::Entry;
use serde_json::{Map, Value, json};

use crate::command::Command;
use crate::component::{Component, ComponentMap};
use crate::config::CompileConfig;
use crate::error::{BwError, BwResult};
use crate::event::{EventDefinition, EventRandomizer};
use crate::group::ComponentGroup;
use crate::identifier::Identifier;
use crate::property::EntityProperty;

/// The event the engine fires when an entity is created.
pub const SPAWN_EVENT: &str = "minecraft:entity_spawned";

/// A named bundle of server-side logic attached to one entity.
///
/// Behaviors hold components, component groups, events and entity
/// properties, all keyed and overwritten by name. They can also declare what
/// happens at spawn, attach commands to trigger components, and reference
/// animation states by name for the owning entity to resolve.
#[derive(Debug, Clone, PartialEq)]
pub struct Behavior {
    identifier: Identifier,
    components: ComponentMap,
    groups: IndexMap<String, ComponentGroup>,
    events: IndexMap<String, EventDefinition>,
    properties: IndexMap<String, EntityProperty>,
    spawn: EventDefinition,
    commands: Vec<(Identifier, Command)>,
    animation_refs: Vec<String>,
}

impl Behavior {
    /// An empty behavior named `namespace:name`.
    pub fn new(namespace: &str, name: &str) -> BwResult<Self> {
        Ok(Self::for_identifier(Identifier::new(namespace, name)?))
    }

    /// An empty behavior for an already-validated identifier.
    pub fn for_identifier(identifier: Identifier) -> Self {
        Self {
            identifier,
            components: ComponentMap::new(),
            groups: IndexMap::new(),
            events: IndexMap::new(),
            properties: IndexMap::new(),
            spawn: EventDefinition::new(),
            commands: Vec::new(),
            animation_refs: Vec::new(),
        }
    }

    /// The behavior's identifier.
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// Insert or overwrite a component.
    pub fn add_component(&mut self, component: Component) {
        self.components.insert(component);
    }

    /// Insert a component, failing if one with the same identifier exists.
    pub fn add_component_strict(&mut self, component: Component) -> BwResult<()> {
        self.components.insert_strict(component)
    }

    /// Builder form of [`Behavior::add_component`].
    pub fn with_component(mut self, component: Component) -> Self {
        self.add_component(component);
        self
    }

    /// Insert or overwrite an event.
    pub fn add_event(&mut self, name: impl Into<String>, event: EventDefinition) {
        self.events.insert(name.into(), event);
    }

    /// Insert an event, failing if one with the same name exists.
    pub fn add_event_strict(
        &mut self,
        name: impl Into<String>,
        event: EventDefinition,
    ) -> BwResult<()> {
        insert_strict(&mut self.events, "event", name.into(), event)
    }

    /// Builder form of [`Behavior::add_event`].
    pub fn with_event(mut self, name: impl Into<String>, event: EventDefinition) -> Self {
        self.add_event(name, event);
        self
    }

    /// Insert or overwrite a component group.
    pub fn add_group(&mut self, group: ComponentGroup) {
        self.groups.insert(group.name().to_string(), group);
    }

    /// Builder form of [`Behavior::add_group`].
    pub fn with_group(mut self, group: ComponentGroup) -> Self {
        self.add_group(group);
        self
    }

    /// Declare an entity property.
    pub fn add_property(&mut self, property: EntityProperty) {
        self.properties.insert(property.name().to_string(), property);
    }

    /// Add a component group when the entity spawns.
    pub fn add_spawn_group(&mut self, group: impl Into<String>) {
        self.spawn.add_group(group);
    }

    /// Pick among weighted options when the entity spawns.
    pub fn add_spawn_randomizer(&mut self, randomizer: EventRandomizer) {
        self.spawn.add_randomizer(randomizer);
    }

    /// Run another event body after the spawn event's own.
    pub fn add_spawn_sequential(&mut self, event: EventDefinition) {
        self.spawn.add_sequential(event);
    }

    /// Assign an entity property when the entity spawns.
    pub fn set_spawn_property(&mut self, property: &str, value: impl Into<Value>) {
        self.spawn.set_property(property, value);
    }

    /// Fire `command` whenever the `trigger` component's event fires.
    pub fn add_command(&mut self, trigger: Identifier, command: Command) {
        self.commands.push((trigger, command));
    }

    /// Play the animation bound to `state` in the entity's graphics.
    pub fn add_animation_ref(&mut self, state: impl Into<String>) {
        let state = state.into();
        if !self.animation_refs.contains(&state) {
            self.animation_refs.push(state);
        }
    }

    /// Builder form of [`Behavior::add_animation_ref`].
    pub fn with_animation_ref(mut self, state: impl Into<String>) -> Self {
        self.add_animation_ref(state);
        self
    }

    /// Look up a component.
    pub fn component(&self, identifier: &Identifier) -> Option<&Component> {
        self.components.get(identifier)
    }

    /// Look up an event.
    pub fn event(&self, name: &str) -> Option<&EventDefinition> {
        self.events.get(name)
    }

    /// Animation states this behavior references.
    pub fn animation_refs(&self) -> &[String] {
        &self.animation_refs
    }

    /// Lower with the default configuration.
    pub fn lower(&self) -> BwResult<LoweredBehavior> {
        self.lower_with(&CompileConfig::default())
    }

    /// Lower commands and the spawn declarations into plain components and
    /// events. The behavior itself is left untouched.
    ///
    /// Commands are merged with [`CommandLowering::merge_into`]: under
    /// `strict_declarations` a command whose trigger component or event is
    /// already declared fails, otherwise commands sharing a trigger all run.
    ///
    /// [`CommandLowering::merge_into`]: crate::command::CommandLowering::merge_into
    pub fn lower_with(&self, config: &CompileConfig) -> BwResult<LoweredBehavior> {
        let mut lowered = LoweredBehavior {
            components: self.components.clone(),
            groups: self.groups.clone(),
            events: self.events.clone(),
            properties: self.properties.clone(),
            animation_refs: self.animation_refs.clone(),
        };
        for (trigger, command) in &self.commands {
            command.compile(trigger)?.merge_into(
                &mut lowered.components,
                &mut lowered.events,
                config.strict_declarations,
            )?;
        }
        if self.spawn != EventDefinition::new() {
            lowered
                .events
                .entry(SPAWN_EVENT.to_string())
                .or_default()
                .absorb(&self.spawn);
        }
        Ok(lowered)
    }

    /// Compile this behavior alone under a `minecraft:entity_behavior` root.
    ///
    /// The body has the same shape as an entity's. Animation references are
    /// emitted unresolved since only the owning entity knows its graphics.
    pub fn to_json(&self, config: &CompileConfig) -> BwResult<Value> {
        let lowered = self.lower_with(config)?;
        let mut description = Map::new();
        description.insert("identifier".into(), json!(self.identifier));
        if let Some(properties) = lowered.properties_json() {
            description.insert("properties".into(), properties);
        }
        Ok(json!({
            "format_version": config.behavior_format_version,
            "minecraft:entity_behavior": lowered.body_json(description),
        }))
    }
}

/// A behavior with commands and spawn declarations folded into plain
/// components and events, ready to be merged into an entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoweredBehavior {
    /// Top-level components.
    pub components: ComponentMap,
    /// Component groups by name.
    pub groups: IndexMap<String, ComponentGroup>,
    /// Events by name.
    pub events: IndexMap<String, EventDefinition>,
    /// Entity properties by bare name.
    pub properties: IndexMap<String, EntityProperty>,
    /// Referenced animation states.
    pub animation_refs: Vec<String>,
}

impl LoweredBehavior {
    /// Merge `later` into `self`, `later` winning on every collision.
    ///
    /// With `strict_declarations` set, any collision fails instead. The
    /// spawn event is exempt: every behavior may contribute to it, so its
    /// bodies are folded together.
    pub fn merge(&mut self, later: LoweredBehavior, config: &CompileConfig) -> BwResult<()> {
        for component in later.components.iter() {
            if config.strict_declarations {
                self.components.insert_strict(component.clone())?;
            } else if self.components.insert(component.clone()).is_some() {
                tracing::debug!(
                    component = %component.identifier(),
                    "component overridden by later behavior"
                );
            }
        }
        for (name, group) in later.groups {
            if config.strict_declarations {
                insert_strict(&mut self.groups, "component group", name, group)?;
            } else {
                self.groups.insert(name, group);
            }
        }
        for (name, event) in later.events {
            if name == SPAWN_EVENT {
                self.events.entry(name).or_default().absorb(&event);
            } else if config.strict_declarations {
                insert_strict(&mut self.events, "event", name, event)?;
            } else {
                self.events.insert(name, event);
            }
        }
        for (name, property) in later.properties {
            if config.strict_declarations {
                insert_strict(&mut self.properties, "property", name, property)?;
            } else {
                self.properties.insert(name, property);
            }
        }
        for state in later.animation_refs {
            if !self.animation_refs.contains(&state) {
                self.animation_refs.push(state);
            }
        }
        Ok(())
    }

    /// `description.properties`, or `None` when there are no properties.
    pub fn properties_json(&self) -> Option<Value> {
        if self.properties.is_empty() {
            return None;
        }
        let props: Map<String, Value> = self
            .properties
            .iter()
            .map(|(name, p)| (format!("{}{name}", crate::event::PROPERTY_PREFIX), p.to_json()))
            .collect();
        Some(Value::Object(props))
    }

    /// The `minecraft:entity` body around a finished description.
    pub fn body_json(&self, description: Map<String, Value>) -> Value {
        let groups: Map<String, Value> = self
            .groups
            .iter()
            .map(|(name, g)| (name.clone(), g.to_json()))
            .collect();
        let events: Map<String, Value> = self
            .events
            .iter()
            .map(|(name, e)| (name.clone(), e.to_json()))
            .collect();
        json!({
            "description": description,
            "components": self.components.to_json(),
            "component_groups": groups,
            "events": events,
        })
    }
}

fn insert_strict<V>(
    map: &mut IndexMap<String, V>,
    kind: &'static str,
    name: String,
    value: V,
) -> BwResult<()> {
    match map.entry(name) {
        Entry::Occupied(e) => Err(BwError::DuplicateDeclaration {
            kind,
            identifier: e.key().clone(),
        }),
        Entry::Vacant(e) => {
            e.insert(value);
            Ok(())
        }
    }
}
