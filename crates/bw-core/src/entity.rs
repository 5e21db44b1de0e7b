use serde_json::{Map, Value, json};

use crate::animation::AnimationController;
use crate::behavior::{Behavior, LoweredBehavior};
use crate::config::CompileConfig;
use crate::error::{BwError, BwResult};
use crate::event::EventDefinition;
use crate::graphics::EntityGraphics;
use crate::group::ComponentGroup;
use crate::identifier::Identifier;
use crate::loop_state::{self, LoopState};
use crate::sounds::EntitySounds;
use crate::variables::StringVariables;
use crate::vanilla;

/// Name of the group and event that remove a despawnable entity.
pub const DESPAWN: &str = "despawn";

/// A compiled animation controller and the identifier it was declared with.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerDocument {
    /// The controller's dotted identifier.
    pub identifier: String,
    /// The `animation_controllers` document.
    pub document: Value,
}

/// The compiled form of an [`Entity`].
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDocuments {
    /// The behavior-pack `minecraft:entity` document.
    pub behavior: Value,
    /// The resource-pack `minecraft:client_entity` document, present only
    /// when the entity has graphics.
    pub resource: Option<Value>,
    /// Behavior-pack controllers the behavior document animates.
    pub behavior_controllers: Vec<ControllerDocument>,
    /// Resource-pack controllers the client entity animates.
    pub resource_controllers: Vec<ControllerDocument>,
    /// This entity's entry for the resource pack's `sounds.json`.
    pub sounds: Option<Value>,
}

impl EntityDocuments {
    /// How many entity documents were produced: 1 or 2. Controllers and
    /// sounds are not counted.
    pub fn len(&self) -> usize {
        1 + usize::from(self.resource.is_some())
    }

    /// Always false; there is at least the behavior document.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The documents in pack order: behavior first.
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        std::iter::once(&self.behavior).chain(self.resource.as_ref())
    }
}

/// A game entity: the aggregate root for behaviors and graphics.
///
/// Behaviors are kept in declaration order, which is also their priority
/// order: when two behaviors declare the same component or event, the one
/// added later wins.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    identifier: Identifier,
    behaviors: Vec<Behavior>,
    graphics: Option<EntityGraphics>,
    variables: StringVariables,
    runtime_identifier: Option<Identifier>,
    is_spawnable: bool,
    is_summonable: bool,
    is_experimental: bool,
    despawnable: bool,
    sounds: Option<EntitySounds>,
    behavior_controllers: Vec<AnimationController>,
    resource_controllers: Vec<AnimationController>,
    loop_states: Vec<LoopState>,
}

impl Entity {
    /// A new entity `namespace:name` with no behaviors and no graphics.
    pub fn new(namespace: &str, name: &str) -> BwResult<Self> {
        Ok(Self::for_identifier(Identifier::new(namespace, name)?))
    }

    /// A new entity for an already-validated identifier.
    pub fn for_identifier(identifier: Identifier) -> Self {
        Self {
            identifier,
            behaviors: Vec::new(),
            graphics: None,
            variables: StringVariables::new(),
            runtime_identifier: None,
            is_spawnable: true,
            is_summonable: true,
            is_experimental: false,
            despawnable: false,
            sounds: None,
            behavior_controllers: Vec::new(),
            resource_controllers: Vec::new(),
            loop_states: Vec::new(),
        }
    }

    /// The entity's identifier.
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// The entity's namespace.
    pub fn namespace(&self) -> &str {
        self.identifier.namespace()
    }

    /// Attach a behavior after the existing ones.
    ///
    /// Behavior identifiers are unique within an entity; attaching a second
    /// behavior with the same identifier fails.
    pub fn add_behavior(&mut self, behavior: Behavior) -> BwResult<()> {
        if self.behavior(behavior.identifier()).is_some() {
            return Err(BwError::DuplicateDeclaration {
                kind: "behavior",
                identifier: behavior.identifier().to_string(),
            });
        }
        self.behaviors.push(behavior);
        Ok(())
    }

    /// Look up an attached behavior.
    pub fn behavior(&self, identifier: &Identifier) -> Option<&Behavior> {
        self.behaviors.iter().find(|b| b.identifier() == identifier)
    }

    /// Look up an attached behavior mutably.
    pub fn behavior_mut(&mut self, identifier: &Identifier) -> Option<&mut Behavior> {
        self.behaviors.iter_mut().find(|b| b.identifier() == identifier)
    }

    /// Attached behaviors in declaration order.
    pub fn behaviors(&self) -> &[Behavior] {
        &self.behaviors
    }

    /// Set or replace the graphics.
    pub fn set_graphics(&mut self, graphics: EntityGraphics) {
        self.graphics = Some(graphics);
    }

    /// Remove the graphics; the entity then compiles to one document.
    pub fn clear_graphics(&mut self) -> Option<EntityGraphics> {
        self.graphics.take()
    }

    /// The graphics, if set.
    pub fn graphics(&self) -> Option<&EntityGraphics> {
        self.graphics.as_ref()
    }

    /// Mutable access to the graphics, if set.
    pub fn graphics_mut(&mut self) -> Option<&mut EntityGraphics> {
        self.graphics.as_mut()
    }

    /// `%key` substitutions applied to both compiled documents.
    pub fn set_variables(&mut self, variables: StringVariables) {
        self.variables = variables;
    }

    /// Inherit engine behavior from a vanilla entity type.
    pub fn set_runtime_identifier(&mut self, runtime: Identifier) {
        self.runtime_identifier = Some(runtime);
    }

    /// Whether the entity gets a spawn egg.
    pub fn set_spawnable(&mut self, spawnable: bool) {
        self.is_spawnable = spawnable;
    }

    /// Whether `/summon` can create the entity.
    pub fn set_summonable(&mut self, summonable: bool) {
        self.is_summonable = summonable;
    }

    /// Whether the entity relies on experimental features.
    pub fn set_experimental(&mut self, experimental: bool) {
        self.is_experimental = experimental;
    }

    /// Give the entity a `despawn` event that removes it instantly.
    pub fn set_despawnable(&mut self, despawnable: bool) {
        self.despawnable = despawnable;
    }

    /// Whether the entity has a `despawn` event.
    pub fn is_despawnable(&self) -> bool {
        self.despawnable
    }

    /// Set the sound events written to `sounds.json`.
    pub fn set_sounds(&mut self, sounds: EntitySounds) {
        self.sounds = Some(sounds);
    }

    /// The sound events, if set.
    pub fn sounds(&self) -> Option<&EntitySounds> {
        self.sounds.as_ref()
    }

    /// Run a behavior-pack animation controller on this entity.
    ///
    /// Controllers are animated in the order they are added, each under a
    /// `banco_<n>` key of the behavior description.
    pub fn add_behavior_controller(&mut self, controller: AnimationController) -> BwResult<()> {
        check_unique(&self.behavior_controllers, &controller)?;
        self.behavior_controllers.push(controller);
        Ok(())
    }

    /// Run a resource-pack animation controller through the graphics.
    pub fn add_resource_controller(&mut self, controller: AnimationController) -> BwResult<()> {
        check_unique(&self.resource_controllers, &controller)?;
        self.resource_controllers.push(controller);
        Ok(())
    }

    /// Append a state to the entity's skin-id state machine. States are
    /// numbered from 0 in the order they are added.
    pub fn add_loop_state(&mut self, state: LoopState) {
        self.loop_states.push(state);
    }

    /// The loop states in order.
    pub fn loop_states(&self) -> &[LoopState] {
        &self.loop_states
    }

    /// Compile with the default configuration.
    pub fn get_json(&self) -> BwResult<EntityDocuments> {
        self.get_json_with(&CompileConfig::default())
    }

    /// Compile the entity into its behavior-pack document and, when graphics
    /// are set, its resource-pack document.
    ///
    /// The despawn declarations come first so behaviors can override them.
    /// Loop states are expanded after the behaviors and merged last.
    ///
    /// Never mutates the entity. Fails on the first command that cannot be
    /// lowered, on declaration collisions under `strict_declarations`, and
    /// on unresolved animation states under `strict_graphics_references`.
    pub fn get_json_with(&self, config: &CompileConfig) -> BwResult<EntityDocuments> {
        let mut merged = if self.despawnable {
            despawn_lowering()
        } else {
            LoweredBehavior::default()
        };
        for behavior in &self.behaviors {
            tracing::trace!(
                entity = %self.identifier,
                behavior = %behavior.identifier(),
                "merging behavior"
            );
            merged.merge(behavior.lower_with(config)?, config)?;
        }

        let mut behavior_controllers = self.behavior_controllers.clone();
        let mut resource_controllers = self.resource_controllers.clone();
        if !self.loop_states.is_empty() {
            let expansion = loop_state::expand(self.identifier.name(), &self.loop_states)?;
            merged.merge(expansion.lowered, config)?;
            behavior_controllers.extend(expansion.commands);
            resource_controllers.extend(expansion.animations);
        }

        let mut description = Map::new();
        description.insert("identifier".into(), json!(self.identifier));
        if let Some(runtime) = &self.runtime_identifier {
            description.insert("runtime_identifier".into(), json!(runtime));
        }
        description.insert("is_spawnable".into(), json!(self.is_spawnable));
        description.insert("is_summonable".into(), json!(self.is_summonable));
        description.insert("is_experimental".into(), json!(self.is_experimental));
        if let Some(properties) = merged.properties_json() {
            description.insert("properties".into(), properties);
        }
        let mut animations = Map::new();
        let mut animate = Vec::new();
        for (n, controller) in behavior_controllers.iter().enumerate() {
            let key = format!("banco_{n}");
            let mut entry = Map::new();
            entry.insert(key.clone(), json!("1"));
            animate.push(Value::Object(entry));
            animations.insert(key, json!(controller.identifier()));
        }
        if !merged.animation_refs.is_empty() {
            let (resolved, states) = self.resolve_animation_refs(&merged.animation_refs, config)?;
            animations.extend(resolved);
            animate.extend(states.into_iter().map(Value::String));
        }
        if !animate.is_empty() {
            description.insert("animations".into(), Value::Object(animations));
            description.insert("scripts".into(), json!({ "animate": animate }));
        }

        let mut behavior = json!({
            "format_version": config.behavior_format_version,
            "minecraft:entity": merged.body_json(description),
        });
        let mut resource = match &self.graphics {
            Some(graphics) => {
                let mut graphics = graphics.clone();
                for controller in &resource_controllers {
                    graphics.add_controller(controller);
                }
                Some(graphics.to_json(config))
            }
            None => {
                if let Some(controller) = resource_controllers.first() {
                    self.unbound_resource_controller(controller, config)?;
                }
                None
            }
        };

        self.variables.apply(&mut behavior);
        if let Some(doc) = resource.as_mut() {
            self.variables.apply(doc);
        }

        tracing::debug!(
            entity = %self.identifier,
            behaviors = self.behaviors.len(),
            components = merged.components.len(),
            events = merged.events.len(),
            graphics = resource.is_some(),
            controllers = behavior_controllers.len() + resource_controllers.len(),
            "entity compiled"
        );
        Ok(EntityDocuments {
            behavior,
            resource,
            behavior_controllers: self.controller_documents(&behavior_controllers, config),
            resource_controllers: self.controller_documents(&resource_controllers, config),
            sounds: self.sounds.as_ref().map(EntitySounds::to_json),
        })
    }

    fn controller_documents(
        &self,
        controllers: &[AnimationController],
        config: &CompileConfig,
    ) -> Vec<ControllerDocument> {
        controllers
            .iter()
            .map(|controller| {
                let mut document = controller.get_json_with(config);
                self.variables.apply(&mut document);
                ControllerDocument {
                    identifier: controller.identifier().to_string(),
                    document,
                }
            })
            .collect()
    }

    fn unbound_resource_controller(
        &self,
        controller: &AnimationController,
        config: &CompileConfig,
    ) -> BwResult<()> {
        if config.strict_graphics_references {
            return Err(BwError::MissingGraphicsReference {
                entity: self.identifier.clone(),
                state: controller.identifier().to_string(),
            });
        }
        tracing::warn!(
            entity = %self.identifier,
            controller = controller.identifier(),
            "resource controller on an entity without graphics"
        );
        Ok(())
    }

    fn resolve_animation_refs(
        &self,
        states: &[String],
        config: &CompileConfig,
    ) -> BwResult<(Map<String, Value>, Vec<String>)> {
        let mut animations = Map::new();
        let mut animate = Vec::new();
        for state in states {
            let resolved = self.graphics.as_ref().and_then(|g| g.resolve_animation(state));
            let target = match resolved {
                Some(id) => id.to_string(),
                None if config.strict_graphics_references => {
                    return Err(BwError::MissingGraphicsReference {
                        entity: self.identifier.clone(),
                        state: state.clone(),
                    });
                }
                None => {
                    tracing::warn!(
                        entity = %self.identifier,
                        state = %state,
                        "animation state has no graphics binding"
                    );
                    state.clone()
                }
            };
            animations.insert(state.clone(), Value::String(target));
            animate.push(state.clone());
        }
        Ok((animations, animate))
    }
}

fn check_unique(existing: &[AnimationController], added: &AnimationController) -> BwResult<()> {
    if existing.iter().any(|c| c.identifier() == added.identifier()) {
        return Err(BwError::DuplicateDeclaration {
            kind: "animation controller",
            identifier: added.identifier().to_string(),
        });
    }
    Ok(())
}

fn despawn_lowering() -> LoweredBehavior {
    let mut lowered = LoweredBehavior::default();
    lowered.groups.insert(
        DESPAWN.to_string(),
        ComponentGroup::new(DESPAWN).with_component(vanilla::instant_despawn()),
    );
    lowered
        .events
        .insert(DESPAWN.to_string(), EventDefinition::new().with_add_group(DESPAWN));
    lowered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::SPAWN_EVENT;
    use crate::command::Command;
    use crate::event::EventDefinition;
    use crate::vanilla;

    fn goblin() -> Entity {
        Entity::new("dev", "goblin").unwrap()
    }

    fn behavior(name: &str) -> Behavior {
        Behavior::new("dev", name).unwrap()
    }

    fn entity_body(docs: &EntityDocuments) -> &Value {
        &docs.behavior["minecraft:entity"]
    }

    #[test]
    fn later_behavior_overrides_component() {
        let mut e = goblin();
        e.add_behavior(behavior("a").with_component(vanilla::health(10))).unwrap();
        e.add_behavior(behavior("b").with_component(vanilla::health(20))).unwrap();
        let docs = e.get_json().unwrap();
        assert_eq!(entity_body(&docs)["components"]["minecraft:health"]["value"], 20);
    }

    #[test]
    fn later_behavior_overrides_event() {
        let mut e = goblin();
        let a = behavior("a").with_event("dev:go", EventDefinition::new().with_add_group("a"));
        let b = behavior("b").with_event("dev:go", EventDefinition::new().with_add_group("b"));
        e.add_behavior(a).unwrap();
        e.add_behavior(b).unwrap();
        let docs = e.get_json().unwrap();
        assert_eq!(
            entity_body(&docs)["events"]["dev:go"]["add"]["component_groups"],
            json!(["b"])
        );
    }

    #[test]
    fn document_count_follows_graphics() {
        let mut e = goblin();
        assert_eq!(e.get_json().unwrap().len(), 1);
        e.set_graphics(EntityGraphics::new("dev", "goblin").unwrap());
        let docs = e.get_json().unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs.iter().count(), 2);
        assert_eq!(
            docs.resource.unwrap()["minecraft:client_entity"]["description"]["identifier"],
            "dev:goblin"
        );
    }

    #[test]
    fn description_defaults() {
        let docs = goblin().get_json().unwrap();
        assert_eq!(docs.behavior["format_version"], "1.16.0");
        let desc = &entity_body(&docs)["description"];
        assert_eq!(desc["identifier"], "dev:goblin");
        assert_eq!(desc["is_spawnable"], true);
        assert_eq!(desc["is_summonable"], true);
        assert_eq!(desc["is_experimental"], false);
        assert!(desc.get("runtime_identifier").is_none());
    }

    #[test]
    fn duplicate_behavior_rejected() {
        let mut e = goblin();
        e.add_behavior(behavior("a")).unwrap();
        let err = e.add_behavior(behavior("a")).unwrap_err();
        assert!(matches!(err, BwError::DuplicateDeclaration { kind: "behavior", .. }));
    }

    #[test]
    fn get_json_is_idempotent() {
        let mut e = goblin();
        let mut b = behavior("a").with_component(vanilla::physics());
        b.add_command(
            Identifier::minecraft("on_interact").unwrap(),
            Command::with_args("say", ["x"]),
        );
        b.add_spawn_group("adult");
        e.add_behavior(b).unwrap();
        let before = e.clone();
        assert_eq!(e.get_json().unwrap(), e.get_json().unwrap());
        assert_eq!(e, before);
    }

    #[test]
    fn spawn_event_created() {
        let mut e = goblin();
        let mut b = behavior("a");
        b.add_spawn_group("adult");
        e.add_behavior(b).unwrap();
        let docs = e.get_json().unwrap();
        assert_eq!(
            entity_body(&docs)["events"][SPAWN_EVENT]["add"]["component_groups"],
            json!(["adult"])
        );
    }

    #[test]
    fn animation_refs_resolve_through_graphics() {
        let mut e = goblin();
        e.add_behavior(behavior("a").with_animation_ref("walk").with_animation_ref("fly"))
            .unwrap();
        e.set_graphics(
            EntityGraphics::new("dev", "goblin")
                .unwrap()
                .with_animation("walk", "animation.goblin.walk"),
        );
        let docs = e.get_json().unwrap();
        let desc = &entity_body(&docs)["description"];
        assert_eq!(desc["animations"]["walk"], "animation.goblin.walk");
        assert_eq!(desc["animations"]["fly"], "fly");
        assert_eq!(desc["scripts"]["animate"], json!(["walk", "fly"]));
    }

    #[test]
    fn strict_graphics_rejects_dangling_state() {
        let mut e = goblin();
        e.add_behavior(behavior("a").with_animation_ref("fly")).unwrap();
        let config = CompileConfig::default().with_strict_graphics_references(true);
        let err = e.get_json_with(&config).unwrap_err();
        assert!(matches!(
            err,
            BwError::MissingGraphicsReference { ref state, .. } if state == "fly"
        ));
    }

    #[test]
    fn failing_command_yields_no_document() {
        let mut e = goblin();
        let mut b = behavior("a");
        b.add_command(Identifier::minecraft("on_interact").unwrap(), Command::new("/bad"));
        e.add_behavior(b).unwrap();
        assert!(matches!(e.get_json(), Err(BwError::CommandCompilation { .. })));
    }

    #[test]
    fn variables_substituted_in_both_documents() {
        let mut e = goblin();
        let movement = vanilla::movement(0.0).with_field("value", "%speed");
        e.add_behavior(behavior("a").with_component(movement)).unwrap();
        let graphics = EntityGraphics::new("dev", "goblin").unwrap();
        e.set_graphics(graphics.with_texture("default", "%skin"));
        e.set_variables(StringVariables::new().with("speed", 0.3).with("skin", "goblin_green"));
        let docs = e.get_json().unwrap();
        assert_eq!(entity_body(&docs)["components"]["minecraft:movement"]["value"], 0.3);
        assert_eq!(
            docs.resource.unwrap()["minecraft:client_entity"]["description"]["textures"]["default"],
            "textures/entity/goblin_green"
        );
    }

    #[test]
    fn behavior_controllers_animate_before_states() {
        let mut e = goblin();
        e.add_behavior(behavior("a").with_animation_ref("walk")).unwrap();
        e.add_behavior_controller(AnimationController::new("controller.animation.goblin_a"))
            .unwrap();
        e.add_behavior_controller(AnimationController::new("controller.animation.goblin_b"))
            .unwrap();
        let docs = e.get_json().unwrap();
        let desc = &entity_body(&docs)["description"];
        assert_eq!(
            desc["scripts"]["animate"],
            json!([{ "banco_0": "1" }, { "banco_1": "1" }, "walk"])
        );
        assert_eq!(desc["animations"]["banco_1"], "controller.animation.goblin_b");
        let ids: Vec<_> = docs.behavior_controllers.iter().map(|c| c.identifier.as_str()).collect();
        assert_eq!(ids, ["controller.animation.goblin_a", "controller.animation.goblin_b"]);
    }

    #[test]
    fn duplicate_controller_rejected() {
        let mut e = goblin();
        e.add_resource_controller(AnimationController::new("controller.animation.x")).unwrap();
        let err = e
            .add_resource_controller(AnimationController::new("controller.animation.x"))
            .unwrap_err();
        assert!(matches!(err, BwError::DuplicateDeclaration { kind: "animation controller", .. }));
    }

    #[test]
    fn resource_controllers_bound_in_graphics() {
        let mut e = goblin();
        e.add_resource_controller(AnimationController::new("controller.animation.goblin_arms"))
            .unwrap();
        assert!(e.get_json().unwrap().resource.is_none());
        let strict = CompileConfig::default().with_strict_graphics_references(true);
        assert!(e.get_json_with(&strict).is_err());

        e.set_graphics(EntityGraphics::new("dev", "goblin").unwrap());
        let docs = e.get_json_with(&strict).unwrap();
        let desc = &docs.resource.unwrap()["minecraft:client_entity"]["description"];
        assert_eq!(
            desc["animations"]["controller.animation.goblin_arms"],
            "controller.animation.goblin_arms"
        );
        assert_eq!(desc["scripts"]["animate"], json!(["controller.animation.goblin_arms"]));
        assert_eq!(docs.resource_controllers.len(), 1);
        let graphics = e.graphics().unwrap();
        assert!(graphics.resolve_animation("controller.animation.goblin_arms").is_none());
    }

    #[test]
    fn loop_states_compile_with_controllers() {
        let mut e = goblin();
        e.set_graphics(EntityGraphics::new("dev", "goblin").unwrap());
        e.add_loop_state(
            LoopState::new()
                .with_timer(2.0)
                .with_entry_command("/say %greeting")
                .with_animation("animation.goblin.idle"),
        );
        e.add_loop_state(LoopState::new().with_timer(1.0).with_last(true));
        e.set_variables(StringVariables::new().with("greeting", "hi"));
        let docs = e.get_json().unwrap();

        let body = entity_body(&docs);
        assert_eq!(body["component_groups"]["state_1"]["minecraft:skin_id"]["value"], 1);
        assert_eq!(body["events"]["state_0"]["remove"]["component_groups"], json!(["state_1"]));
        assert_eq!(
            body["description"]["animations"]["banco_0"],
            "controller.animation.goblin_loop_commands"
        );

        let commands = &docs.behavior_controllers[0].document["animation_controllers"]
            ["controller.animation.goblin_loop_commands"];
        assert_eq!(commands["states"]["state_0"]["on_entry"], json!(["/say hi"]));

        assert_eq!(
            docs.resource_controllers[0].identifier,
            "controller.animation.goblin_loop_animations"
        );
        let client = &docs.resource.unwrap()["minecraft:client_entity"]["description"];
        assert_eq!(
            client["scripts"]["animate"],
            json!(["controller.animation.goblin_loop_animations"])
        );
    }

    #[test]
    fn strict_rejects_loop_group_collision() {
        let mut e = goblin();
        e.add_behavior(behavior("a").with_group(ComponentGroup::new("state_0"))).unwrap();
        e.add_loop_state(LoopState::new());
        assert!(e.get_json().is_ok());
        let err = e.get_json_with(&CompileConfig::strict()).unwrap_err();
        assert!(matches!(err, BwError::DuplicateDeclaration { kind: "component group", .. }));
    }

    #[test]
    fn despawnable_adds_group_and_event() {
        let mut e = goblin();
        let docs = e.get_json().unwrap();
        assert!(entity_body(&docs)["events"].get(DESPAWN).is_none());

        e.set_despawnable(true);
        let docs = e.get_json().unwrap();
        let body = entity_body(&docs);
        assert_eq!(
            body["component_groups"][DESPAWN],
            json!({ "minecraft:instant_despawn": {} })
        );
        assert_eq!(body["events"][DESPAWN]["add"]["component_groups"], json!([DESPAWN]));
    }

    #[test]
    fn sounds_compiled_alongside() {
        let mut e = goblin();
        assert!(e.get_json().unwrap().sounds.is_none());
        e.set_sounds(EntitySounds::new().with_ambient("mob.goblin.say"));
        let sounds = e.get_json().unwrap().sounds.unwrap();
        assert_eq!(sounds["events"]["ambient"], "mob.goblin.say");
        assert_eq!(sounds["volume"], 1.0);
    }

    #[test]
    fn custom_format_version() {
        let config = CompileConfig::default().with_behavior_format_version("1.20.0");
        let docs = goblin().get_json_with(&config).unwrap();
        assert_eq!(docs.behavior["format_version"], "1.20.0");
    }
}
