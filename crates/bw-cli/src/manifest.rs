//! The JSON add-on manifest and its translation into `bw_core` objects.

use std::fs;
use std::path::Path;

use bw_core::{
    Animation, AnimationController, AnimationFile, Behavior, BwResult, Command, Component,
    ComponentGroup, ControllerState, Entity, EntityGraphics, EntityProperty, EventDefinition,
    EntitySounds, EventRandomizer, Identifier, Item, LoopState, Projectile, StringVariables,
    TimelineEntry,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

type Payload = Map<String, Value>;

/// A whole add-on: one namespace, its entities, items and animations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub namespace: String,
    #[serde(default, skip_serializing_if = "StringVariables::is_empty")]
    pub variables: StringVariables,
    #[serde(default)]
    pub entities: Vec<EntitySpec>,
    #[serde(default)]
    pub items: Vec<ItemSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub animations: Vec<AnimationSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub controllers: Vec<ControllerSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projectiles: Vec<ProjectileSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntitySpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_identifier: Option<String>,
    #[serde(default = "yes")]
    pub spawnable: bool,
    #[serde(default = "yes")]
    pub summonable: bool,
    #[serde(default, skip_serializing_if = "StringVariables::is_empty")]
    pub variables: StringVariables,
    #[serde(default)]
    pub behaviors: Vec<BehaviorSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graphics: Option<GraphicsSpec>,
    #[serde(default)]
    pub despawnable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sounds: Option<SoundsSpec>,
    /// Behavior-pack controllers animated by the entity.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub controllers: Vec<ControllerSpec>,
    /// Resource-pack controllers animated through the graphics.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resource_controllers: Vec<ControllerSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub loop_states: Vec<LoopStateSpec>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SoundsSpec {
    pub ambient: Option<String>,
    pub step: Option<String>,
    pub hurt: Option<String>,
    pub death: Option<String>,
    pub pitch: Option<[f64; 2]>,
    pub volume: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoopStateSpec {
    pub name: Option<String>,
    pub components: IndexMap<String, Payload>,
    pub on_entry: Vec<String>,
    pub on_exit: Vec<String>,
    pub timer: Option<f64>,
    pub timer_target: Option<String>,
    pub last: bool,
    pub connections: Vec<String>,
    pub animation: Option<String>,
    pub end_animation_with_state: Option<bool>,
    pub blend: Option<f64>,
    pub set_properties: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectileSpec {
    pub name: String,
    pub damage: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graphics: Option<GraphicsSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collision_box_size: Option<f64>,
    #[serde(default = "yes")]
    pub knockback: bool,
    #[serde(default)]
    pub enflame: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spawn: Option<SpawnSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hit_sound: Option<String>,
    #[serde(default)]
    pub stick_in_ground: bool,
    #[serde(default = "yes")]
    pub destroyed_on_hit: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spread: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gravity: Option<f64>,
    #[serde(default)]
    pub remove_on_hit: bool,
}

/// An entity spawned where a projectile lands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpawnSpec {
    pub entity: String,
    #[serde(default = "full_chance")]
    pub chance: f64,
    #[serde(default = "one")]
    pub count: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BehaviorSpec {
    pub name: String,
    pub components: IndexMap<String, Payload>,
    pub groups: IndexMap<String, IndexMap<String, Payload>>,
    pub events: IndexMap<String, EventSpec>,
    pub properties: Vec<PropertySpec>,
    pub spawn_groups: Vec<String>,
    pub spawn_properties: IndexMap<String, Value>,
    pub commands: Vec<CommandSpec>,
    pub animations: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EventSpec {
    pub add_groups: Vec<String>,
    pub remove_groups: Vec<String>,
    pub set_properties: IndexMap<String, Value>,
    pub randomize: Vec<RandomizerSpec>,
    pub sequence: Vec<EventSpec>,
    pub trigger: Option<String>,
    pub run_command: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RandomizerSpec {
    #[serde(default = "one")]
    pub weight: u32,
    #[serde(default)]
    pub add_groups: Vec<String>,
    #[serde(default)]
    pub remove_groups: Vec<String>,
    #[serde(default)]
    pub set_properties: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", deny_unknown_fields)]
pub enum PropertySpec {
    Int {
        name: String,
        min: i64,
        max: i64,
        default: i64,
        #[serde(default)]
        client_sync: bool,
    },
    Bool {
        name: String,
        default: bool,
        #[serde(default)]
        client_sync: bool,
    },
    Enum {
        name: String,
        values: Vec<Value>,
        default: Value,
        #[serde(default)]
        client_sync: bool,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandSpec {
    #[serde(default = "default_trigger")]
    pub trigger: String,
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub bindings: IndexMap<String, String>,
}

/// An item's on-use command: plain text or the full form with bindings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OnUseSpec {
    Text(String),
    Full(CommandSpec),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphicsSpec {
    pub material: Option<String>,
    pub textures: IndexMap<String, String>,
    pub geometry: IndexMap<String, String>,
    pub render_controllers: Vec<String>,
    pub spawn_egg: Option<[String; 2]>,
    pub invisible: bool,
    pub scale: Option<f64>,
    pub animations: IndexMap<String, String>,
    pub animate: Vec<String>,
    pub particle_effects: IndexMap<String, String>,
    pub humanoid: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub components: IndexMap<String, Payload>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub events: IndexMap<String, EventSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_use: Option<OnUseSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnimationSpec {
    pub id: String,
    #[serde(default)]
    pub looping: bool,
    #[serde(default)]
    pub length: Option<f64>,
    /// Seconds (as text) to the commands run at that time.
    #[serde(default)]
    pub timeline: IndexMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ControllerSpec {
    pub id: String,
    #[serde(default)]
    pub initial_state: Option<String>,
    pub states: IndexMap<String, StateSpec>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StateSpec {
    /// Target state to Molang condition.
    pub transitions: IndexMap<String, String>,
    pub on_entry: Vec<String>,
    pub on_exit: Vec<String>,
    pub animations: Vec<String>,
    pub blend_transition: Option<f64>,
}

fn yes() -> bool {
    true
}

fn one() -> u32 {
    1
}

fn full_chance() -> f64 {
    100.0
}

fn default_trigger() -> String {
    "minecraft:on_interact".to_string()
}

/// Everything a manifest describes, as `bw_core` objects.
#[derive(Debug, Clone)]
pub struct Addon {
    pub namespace: String,
    pub entities: Vec<Entity>,
    pub items: Vec<Item>,
    pub animations: AnimationFile,
    pub controllers: Vec<AnimationController>,
}

impl Manifest {
    /// Read and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self, String> {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        serde_json::from_str(&text).map_err(|e| format!("invalid manifest {}: {e}", path.display()))
    }

    /// Build the object graph. Errors name the entity or item at fault.
    pub fn to_addon(&self) -> Result<Addon, String> {
        let mut entities = Vec::with_capacity(self.entities.len());
        for spec in &self.entities {
            let entity = self
                .build_entity(spec)
                .map_err(|e| format!("entity \"{}\": {e}", spec.name))?;
            entities.push(entity);
        }

        let mut items = Vec::with_capacity(self.items.len());
        for spec in &self.items {
            let item = self
                .build_item(spec)
                .map_err(|e| format!("item \"{}\": {e}", spec.name))?;
            items.push(item);
        }

        for spec in &self.projectiles {
            let projectile = self
                .build_projectile(spec)
                .map_err(|e| format!("projectile \"{}\": {e}", spec.name))?;
            entities.push(projectile);
        }

        let mut animations = AnimationFile::new();
        for spec in &self.animations {
            animations.add_animation(build_animation(spec)?);
        }
        let controllers = self.controllers.iter().map(build_controller).collect();

        Ok(Addon {
            namespace: self.namespace.clone(),
            entities,
            items,
            animations,
            controllers,
        })
    }

    fn build_entity(&self, spec: &EntitySpec) -> BwResult<Entity> {
        let mut entity = Entity::new(&self.namespace, &spec.name)?;
        if let Some(runtime) = &spec.runtime_identifier {
            entity.set_runtime_identifier(Identifier::parse(runtime)?);
        }
        entity.set_spawnable(spec.spawnable);
        entity.set_summonable(spec.summonable);

        let mut variables = self.variables.clone();
        for (key, value) in spec.variables.iter() {
            variables.set(key, value.clone());
        }
        entity.set_variables(variables);

        for behavior in &spec.behaviors {
            entity.add_behavior(self.build_behavior(behavior)?)?;
        }
        if let Some(graphics) = &spec.graphics {
            entity.set_graphics(build_graphics(entity.identifier().clone(), graphics));
        }
        entity.set_despawnable(spec.despawnable);
        if let Some(sounds) = &spec.sounds {
            entity.set_sounds(build_sounds(sounds));
        }
        for controller in &spec.controllers {
            entity.add_behavior_controller(build_controller(controller))?;
        }
        for controller in &spec.resource_controllers {
            entity.add_resource_controller(build_controller(controller))?;
        }
        for state in &spec.loop_states {
            entity.add_loop_state(build_loop_state(state)?);
        }
        Ok(entity)
    }

    fn build_projectile(&self, spec: &ProjectileSpec) -> BwResult<Entity> {
        let mut projectile = Projectile::new(&self.namespace, &spec.name, spec.damage.clone())?
            .with_knockback(spec.knockback)
            .with_enflame(spec.enflame)
            .with_stick_in_ground(spec.stick_in_ground)
            .with_destroyed_on_hit(spec.destroyed_on_hit)
            .with_remove_on_hit(spec.remove_on_hit);
        if let Some(graphics) = &spec.graphics {
            let identifier = Identifier::new(&self.namespace, &spec.name)?;
            projectile = projectile.with_graphics(build_graphics(identifier, graphics));
        }
        if let Some(size) = spec.collision_box_size {
            projectile = projectile.with_collision_box_size(size);
        }
        if let Some(spawn) = &spec.spawn {
            projectile = projectile.with_spawn(spawn.entity.clone(), spawn.chance, spawn.count);
        }
        if let Some(sound) = &spec.hit_sound {
            projectile = projectile.with_hit_sound(sound.clone());
        }
        if let Some(spread) = spec.spread {
            projectile = projectile.with_spread(spread);
        }
        if let Some(power) = spec.power {
            projectile = projectile.with_power(power);
        }
        if let Some(gravity) = spec.gravity {
            projectile = projectile.with_gravity(gravity);
        }
        let mut entity = projectile.build()?;
        entity.set_variables(self.variables.clone());
        Ok(entity)
    }

    fn build_behavior(&self, spec: &BehaviorSpec) -> BwResult<Behavior> {
        let mut behavior = Behavior::new(&self.namespace, &spec.name)?;
        for (id, payload) in &spec.components {
            behavior.add_component(component(id, payload)?);
        }
        for (name, components) in &spec.groups {
            let mut group = ComponentGroup::new(name.clone());
            for (id, payload) in components {
                group.add_component(component(id, payload)?);
            }
            behavior.add_group(group);
        }
        for (name, event) in &spec.events {
            behavior.add_event(name.clone(), build_event(event));
        }
        for property in &spec.properties {
            behavior.add_property(build_property(property)?);
        }
        for group in &spec.spawn_groups {
            behavior.add_spawn_group(group.clone());
        }
        for (property, value) in &spec.spawn_properties {
            behavior.set_spawn_property(property, value.clone());
        }
        for command in &spec.commands {
            let trigger = parse_component_id(&command.trigger)?;
            behavior.add_command(trigger, build_command(command)?);
        }
        for state in &spec.animations {
            behavior.add_animation_ref(state.clone());
        }
        Ok(behavior)
    }

    fn build_item(&self, spec: &ItemSpec) -> BwResult<Item> {
        let mut item = match &spec.id {
            Some(id) => Item::new(&self.namespace, id, &spec.name)?,
            None => Item::from_display_name(&self.namespace, &spec.name)?,
        };
        if let Some(texture) = &spec.texture {
            item.set_texture_name(texture);
        }
        if let Some(category) = &spec.category {
            item.set_category(category.clone());
        }
        for (id, payload) in &spec.components {
            item.add_component(component(id, payload)?)?;
        }
        for (name, event) in &spec.events {
            item.add_event(name.clone(), build_event(event));
        }
        match &spec.on_use {
            Some(OnUseSpec::Text(text)) => item.set_on_use_command(Command::parse(text)?),
            Some(OnUseSpec::Full(command)) => item.set_on_use_command(build_command(command)?),
            None => {}
        }
        Ok(item)
    }
}

/// Component keys may omit the `minecraft:` namespace.
fn parse_component_id(key: &str) -> BwResult<Identifier> {
    if key.contains(':') {
        Identifier::parse(key)
    } else {
        Identifier::minecraft(key)
    }
}

fn component(key: &str, payload: &Payload) -> BwResult<Component> {
    Ok(Component::with_payload(parse_component_id(key)?, payload.clone()))
}

fn build_event(spec: &EventSpec) -> EventDefinition {
    let mut event = EventDefinition::new();
    for group in &spec.add_groups {
        event.add_group(group.clone());
    }
    for group in &spec.remove_groups {
        event.remove_group(group.clone());
    }
    for (property, value) in &spec.set_properties {
        event.set_property(property, value.clone());
    }
    for option in &spec.randomize {
        let mut randomizer = EventRandomizer::new(option.weight);
        for group in &option.add_groups {
            randomizer = randomizer.with_add_group(group.clone());
        }
        for group in &option.remove_groups {
            randomizer = randomizer.with_remove_group(group.clone());
        }
        for (property, value) in &option.set_properties {
            randomizer = randomizer.with_set_property(property, value.clone());
        }
        event.add_randomizer(randomizer);
    }
    for step in &spec.sequence {
        event.add_sequential(build_event(step));
    }
    if let Some(next) = &spec.trigger {
        event = event.with_trigger(next.clone());
    }
    if !spec.run_command.is_empty() {
        event = event.with_run_command(spec.run_command.clone(), "self");
    }
    event
}

fn build_sounds(spec: &SoundsSpec) -> EntitySounds {
    let mut sounds = EntitySounds::new();
    if let Some(sound) = &spec.ambient {
        sounds = sounds.with_ambient(sound.clone());
    }
    if let Some(sound) = &spec.step {
        sounds = sounds.with_step(sound.clone());
    }
    if let Some(sound) = &spec.hurt {
        sounds = sounds.with_hurt(sound.clone());
    }
    if let Some(sound) = &spec.death {
        sounds = sounds.with_death(sound.clone());
    }
    if let Some([min, max]) = spec.pitch {
        sounds = sounds.with_pitch(min, max);
    }
    if let Some(volume) = spec.volume {
        sounds = sounds.with_volume(volume);
    }
    sounds
}

fn build_loop_state(spec: &LoopStateSpec) -> BwResult<LoopState> {
    let mut state = LoopState::new().with_last(spec.last);
    if let Some(name) = &spec.name {
        state = state.named(name.clone());
    }
    for (id, payload) in &spec.components {
        state = state.with_component(component(id, payload)?);
    }
    for command in &spec.on_entry {
        state = state.with_entry_command(command.clone());
    }
    for command in &spec.on_exit {
        state = state.with_exit_command(command.clone());
    }
    if let Some(seconds) = spec.timer {
        state = state.with_timer(seconds);
    }
    if let Some(target) = &spec.timer_target {
        state = state.with_timer_target(target.clone());
    }
    for connection in &spec.connections {
        state = state.with_connection(connection.clone());
    }
    if let Some(animation) = &spec.animation {
        state = state.with_animation(animation.clone());
    }
    if let Some(end) = spec.end_animation_with_state {
        state = state.with_end_animation_with_state(end);
    }
    if let Some(seconds) = spec.blend {
        state = state.with_blend(seconds);
    }
    for (property, value) in &spec.set_properties {
        state = state.with_set_property(property.clone(), value.clone());
    }
    Ok(state)
}

fn build_property(spec: &PropertySpec) -> BwResult<EntityProperty> {
    Ok(match spec {
        PropertySpec::Int {
            name,
            min,
            max,
            default,
            client_sync,
        } => EntityProperty::int_range(name.clone(), *min, *max, *default)?
            .with_client_sync(*client_sync),
        PropertySpec::Bool {
            name,
            default,
            client_sync,
        } => EntityProperty::boolean(name.clone(), *default).with_client_sync(*client_sync),
        PropertySpec::Enum {
            name,
            values,
            default,
            client_sync,
        } => EntityProperty::enumeration(name.clone(), values.clone(), default.clone())?
            .with_client_sync(*client_sync),
    })
}

fn build_command(spec: &CommandSpec) -> BwResult<Command> {
    let mut command = Command::parse(&spec.command)?;
    for (name, value) in &spec.bindings {
        command.set_binding(name.clone(), value.clone());
    }
    if let Some(target) = &spec.target {
        command = command.with_target(target.clone());
    }
    Ok(command)
}

fn build_graphics(identifier: Identifier, spec: &GraphicsSpec) -> EntityGraphics {
    let mut graphics = EntityGraphics::for_identifier(identifier).with_invisible(spec.invisible);
    if let Some(material) = &spec.material {
        graphics = graphics.with_material(material.clone());
    }
    if let Some([base, overlay]) = &spec.spawn_egg {
        graphics = graphics.with_spawn_egg(base.clone(), overlay.clone());
    }
    if let Some(scale) = spec.scale {
        graphics = graphics.with_scale(scale);
    }
    for (key, path) in &spec.textures {
        graphics.add_texture(key.clone(), path);
    }
    for (key, name) in &spec.geometry {
        graphics.add_geometry(key.clone(), name);
    }
    for controller in &spec.render_controllers {
        graphics.add_render_controller(controller.clone());
    }
    if spec.humanoid {
        graphics.add_humanoid_animations();
    }
    for (state, animation) in &spec.animations {
        graphics.add_animation(state.clone(), animation.clone());
    }
    for state in &spec.animate {
        graphics.add_animate(state.clone());
    }
    for (key, effect) in &spec.particle_effects {
        graphics.add_particle_effect(key.clone(), effect.clone());
    }
    graphics
}

fn build_animation(spec: &AnimationSpec) -> Result<Animation, String> {
    let mut animation = Animation::new(spec.id.clone()).with_looping(spec.looping);
    if let Some(length) = spec.length {
        animation = animation.with_length(length);
    }
    for (time, commands) in &spec.timeline {
        let seconds: f64 = time.parse().map_err(|_| {
            format!("animation \"{}\": timeline key \"{time}\" is not a number", spec.id)
        })?;
        let mut entry = TimelineEntry::new(seconds);
        entry.commands.extend(commands.iter().cloned());
        animation.add_timeline_entry(entry);
    }
    Ok(animation)
}

fn build_controller(spec: &ControllerSpec) -> AnimationController {
    let mut controller = AnimationController::new(spec.id.clone());
    if let Some(initial) = &spec.initial_state {
        controller = controller.with_initial_state(initial.clone());
    }
    for (name, state_spec) in &spec.states {
        let mut state = ControllerState::new();
        for (target, condition) in &state_spec.transitions {
            state = state.with_transition(target.clone(), condition.clone());
        }
        for command in &state_spec.on_entry {
            state = state.with_entry_command(command.clone());
        }
        for command in &state_spec.on_exit {
            state = state.with_exit_command(command.clone());
        }
        for animation in &state_spec.animations {
            state = state.with_animation(animation.clone());
        }
        if let Some(seconds) = state_spec.blend_transition {
            state = state.with_blend_transition(seconds);
        }
        controller.add_state(name.clone(), state);
    }
    controller
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn manifest(value: Value) -> Manifest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn minimal_manifest() {
        let m = manifest(json!({ "namespace": "dev" }));
        let addon = m.to_addon().unwrap();
        assert!(addon.entities.is_empty() && addon.items.is_empty());
    }

    #[test]
    fn unknown_fields_rejected() {
        let result: Result<Manifest, _> =
            serde_json::from_value(json!({ "namespace": "dev", "entitys": [] }));
        assert!(result.is_err());
    }

    #[test]
    fn bare_component_keys_are_vanilla() {
        let m = manifest(json!({
            "namespace": "dev",
            "entities": [{
                "name": "goblin",
                "behaviors": [{ "name": "core", "components": { "health": { "value": 5 } } }],
            }],
        }));
        let addon = m.to_addon().unwrap();
        let docs = addon.entities[0].get_json().unwrap();
        assert_eq!(
            docs.behavior["minecraft:entity"]["components"]["minecraft:health"]["value"],
            5
        );
    }

    #[test]
    fn entity_variables_override_global() {
        let m = manifest(json!({
            "namespace": "dev",
            "variables": { "hp": 10, "speed": 0.2 },
            "entities": [{
                "name": "goblin",
                "variables": { "hp": 30 },
                "behaviors": [{ "name": "core", "components": {
                    "health": { "value": "%hp" },
                    "movement": { "value": "%speed" },
                } }],
            }],
        }));
        let docs = m.to_addon().unwrap().entities[0].get_json().unwrap();
        let components = &docs.behavior["minecraft:entity"]["components"];
        assert_eq!(components["minecraft:health"]["value"], 30);
        assert_eq!(components["minecraft:movement"]["value"], 0.2);
    }

    #[test]
    fn item_on_use_text_and_full() {
        let m = manifest(json!({
            "namespace": "dev",
            "items": [
                { "name": "Magic Wand", "on_use": "/say hello" },
                { "name": "Rod", "id": "rod", "on_use": {
                    "command": "/kill {who:selector}",
                    "bindings": { "who": "@e[type=pig]" },
                } },
            ],
        }));
        let addon = m.to_addon().unwrap();
        assert_eq!(addon.items[0].identifier().to_string(), "dev:magic_wand");
        let rod = addon.items[1].get_json().unwrap();
        assert_eq!(
            rod["minecraft:item"]["events"]["on_use"]["run_command"]["command"],
            json!(["/kill @e[type=pig]"])
        );
    }

    #[test]
    fn entity_extras() {
        let m = manifest(json!({
            "namespace": "dev",
            "entities": [{
                "name": "golem",
                "despawnable": true,
                "sounds": { "ambient": "mob.golem.say", "pitch": [1.0, 1.0] },
                "controllers": [{
                    "id": "controller.animation.golem_watch",
                    "states": { "init": { "on_entry": ["/say watching"] } },
                }],
                "loop_states": [
                    { "name": "sleep", "timer": 10.0 },
                    { "name": "wake", "timer": 3.0, "timer_target": "sleep",
                      "components": { "movement": { "value": 0.2 } } },
                ],
            }],
        }));
        let docs = m.to_addon().unwrap().entities[0].get_json().unwrap();
        let body = &docs.behavior["minecraft:entity"];
        assert!(body["events"]["despawn"].is_object());
        assert_eq!(
            body["description"]["animations"]["banco_0"],
            "controller.animation.golem_watch"
        );
        let wake = &body["component_groups"]["state_1"];
        assert_eq!(wake["minecraft:movement"]["value"], 0.2);
        assert_eq!(wake["minecraft:timer"]["time_down_event"]["event"], "state_0");
        assert_eq!(docs.sounds.unwrap()["pitch"], json!([1.0, 1.0]));
    }

    #[test]
    fn unknown_loop_state_target_names_entity() {
        let m = manifest(json!({
            "namespace": "dev",
            "entities": [{
                "name": "golem",
                "loop_states": [{ "timer": 1.0, "timer_target": "nap" }],
            }],
        }));
        let entity = &m.to_addon().unwrap().entities[0];
        let err = entity.get_json().unwrap_err();
        assert!(err.to_string().contains("nap"));
    }

    #[test]
    fn projectiles_become_entities() {
        let m = manifest(json!({
            "namespace": "dev",
            "variables": { "dmg": 7 },
            "projectiles": [{
                "name": "bolt",
                "damage": "%dmg",
                "gravity": 0.0,
                "spawn": { "entity": "chicken" },
            }],
        }));
        let addon = m.to_addon().unwrap();
        assert_eq!(addon.entities.len(), 1);
        let docs = addon.entities[0].get_json().unwrap();
        let projectile = &docs.behavior["minecraft:entity"]["components"]["minecraft:projectile"];
        assert_eq!(projectile["on_hit"]["impact_damage"]["damage"], 7);
        assert_eq!(projectile["gravity"], 0.0);
        assert_eq!(projectile["on_hit"]["spawn_chance"]["first_spawn_percent_chance"], 100.0);
        assert_eq!(projectile["on_hit"]["spawn_chance"]["first_spawn_count"], 1);
    }

    #[test]
    fn item_backing_component_must_be_string() {
        let m = manifest(json!({
            "namespace": "dev",
            "items": [{ "name": "Rod", "components": { "display_name": { "value": 3 } } }],
        }));
        let err = m.to_addon().unwrap_err();
        assert!(err.contains("item \"Rod\""), "{err}");
        assert!(err.contains("display_name"), "{err}");
    }

    #[test]
    fn errors_name_the_culprit() {
        let m = manifest(json!({
            "namespace": "dev",
            "entities": [{ "name": "bad name" }],
        }));
        let err = m.to_addon().unwrap_err();
        assert!(err.starts_with("entity \"bad name\""));
    }

    #[test]
    fn properties_and_spawn() {
        let m = manifest(json!({
            "namespace": "dev",
            "entities": [{
                "name": "goblin",
                "behaviors": [{
                    "name": "core",
                    "properties": [{
                        "type": "enum",
                        "name": "mood",
                        "values": ["calm", "angry"],
                        "default": "calm",
                    }],
                    "spawn_groups": ["adult"],
                    "spawn_properties": { "mood": "angry" },
                }],
            }],
        }));
        let docs = m.to_addon().unwrap().entities[0].get_json().unwrap();
        let body = &docs.behavior["minecraft:entity"];
        assert_eq!(body["description"]["properties"]["property:mood"]["type"], "enum");
        assert_eq!(
            body["events"]["minecraft:entity_spawned"]["set_property"]["property:mood"],
            "'angry'"
        );
    }

    #[test]
    fn timeline_keys_must_be_numbers() {
        let m = manifest(json!({
            "namespace": "dev",
            "animations": [{ "id": "animation.x", "timeline": { "soon": ["/say"] } }],
        }));
        assert!(m.to_addon().unwrap_err().contains("soon"));
    }
}
