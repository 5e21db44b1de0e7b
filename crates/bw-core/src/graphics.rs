use indexmap::IndexMap;
use serde_json::{Map, Value, json};

use crate::animation::AnimationController;
use crate::config::CompileConfig;
use crate::error::BwResult;
use crate::identifier::Identifier;

const DEFAULT_RENDER_CONTROLLER: &str = "controller.render.default_controller";
const DEFAULT_MATERIAL: &str = "basic";

/// Animation bindings for a player-like humanoid rig.
const HUMANOID_ANIMATIONS: &[(&str, &str)] = &[
    ("root", "controller.animation.humanoid.root"),
    ("base_controller", "controller.animation.player.base"),
    ("hudplayer", "controller.animation.humanoid.hudplayer"),
    ("humanoid_base_pose", "animation.humanoid.base_pose"),
    ("look_at_target", "controller.animation.humanoid.look_at_target"),
    ("look_at_target_ui", "animation.player.look_at_target.ui"),
    ("look_at_target_default", "animation.humanoid.look_at_target.default"),
    ("look_at_target_gliding", "animation.humanoid.look_at_target.gliding"),
    ("look_at_target_swimming", "animation.humanoid.look_at_target.swimming"),
    ("look_at_target_inverted", "animation.player.look_at_target.inverted"),
    ("cape", "animation.player.cape"),
    ("move.arms", "animation.player.move.arms"),
    ("move.legs", "animation.player.move.legs"),
    ("swimming", "animation.player.swim"),
    ("swimming.legs", "animation.player.swim.legs"),
    ("riding.arms", "animation.player.riding.arms"),
    ("riding.legs", "animation.player.riding.legs"),
    ("holding", "animation.player.holding"),
    ("brandish_spear", "animation.humanoid.brandish_spear"),
    ("charging", "animation.humanoid.charging"),
    ("attack.positions", "animation.player.attack.positions"),
    ("attack.rotations", "animation.player.attack.rotations"),
    ("sneaking", "animation.player.sneaking"),
    ("bob", "animation.player.bob"),
    ("damage_nearby_mobs", "animation.humanoid.damage_nearby_mobs"),
    ("fishing_rod", "animation.humanoid.fishing_rod"),
    ("use_item_progress", "animation.humanoid.use_item_progress"),
    ("skeleton_attack", "animation.skeleton.attack"),
    ("sleeping", "animation.player.sleeping"),
    ("first_person_base_pose", "animation.player.first_person.base_pose"),
    ("first_person_empty_hand", "animation.player.first_person.empty_hand"),
    ("first_person_swap_item", "animation.player.first_person.swap_item"),
    ("first_person_attack_controller", "controller.animation.player.first_person_attack"),
    ("first_person_attack_rotation", "animation.player.first_person.attack_rotation"),
    ("first_person_attack_rotation_item", "animation.player.first_person.attack_rotation"),
    ("first_person_vr_attack_rotation", "animation.player.first_person.vr_attack_rotation"),
    ("first_person_walk", "animation.player.first_person.walk"),
    ("first_person_map_controller", "controller.animation.player.first_person_map"),
    ("first_person_map_hold", "animation.player.first_person.map_hold"),
    ("first_person_map_hold_attack", "animation.player.first_person.map_hold_attack"),
    ("first_person_map_hold_off_hand", "animation.player.first_person.map_hold_off_hand"),
    ("first_person_map_hold_main_hand", "animation.player.first_person.map_hold_main_hand"),
    ("first_person_crossbow_equipped", "animation.player.first_person.crossbow_equipped"),
    ("third_person_crossbow_equipped", "animation.player.crossbow_equipped"),
    ("third_person_bow_equipped", "animation.player.bow_equipped"),
    ("crossbow_hold", "animation.player.crossbow_hold"),
    ("crossbow_controller", "controller.animation.player.crossbow"),
    ("shield_block_main_hand", "animation.player.shield_block_main_hand"),
    ("shield_block_off_hand", "animation.player.shield_block_off_hand"),
    ("blink", "controller.animation.persona.blink"),
];

const HUMANOID_INITIALIZE: &[&str] = &[
    "variable.is_holding_right = 0.0;",
    "variable.is_blinking = 0.0;",
    "variable.last_blink_time = 0.0;",
    "variable.hand_bob = 0.0;",
    "variable.is_paperdoll = 0.0;",
    "variable.is_first_person = 0.0;",
    "variable.map_face_icon = 0.0;",
    "variable.item_use_normalized = 0.0;",
];

const HUMANOID_PRE_ANIMATION: &[&str] = &[
    "variable.helmet_layer_visible = 1.0;",
    "variable.leg_layer_visible = 1.0;",
    "variable.boot_layer_visible = 1.0;",
    "variable.chest_layer_visible = 1.0;",
    "variable.attack_body_rot_y = Math.sin(360*Math.sqrt(variable.attack_time)) * 5.0;",
    concat!(
        "variable.tcos0 = (math.cos(query.modified_distance_moved * 38.17)",
        " * query.modified_move_speed / variable.gliding_speed_value) * 57.3;"
    ),
];

/// Client-side presentation of an entity: the resource-pack document.
///
/// Besides textures, geometry and render controllers it holds the mapping
/// from symbolic animation state names (`walk`, `attack`) to animation
/// identifiers. Behaviors refer to states by name; the entity resolves them
/// through this map when it compiles.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityGraphics {
    identifier: Identifier,
    material: String,
    textures: IndexMap<String, String>,
    geometry: IndexMap<String, String>,
    render_controllers: Vec<String>,
    egg_colors: (String, String),
    invisible: bool,
    animations: IndexMap<String, String>,
    particle_effects: IndexMap<String, String>,
    scale: f64,
    animate: Vec<String>,
    initialize: Vec<String>,
    pre_animation: Vec<String>,
}

impl EntityGraphics {
    /// Graphics for the entity `namespace:name`.
    ///
    /// Until overridden, the texture is `textures/entity/<name>` and the
    /// geometry `geometry.<name>`.
    pub fn new(namespace: &str, name: &str) -> BwResult<Self> {
        Ok(Self::for_identifier(Identifier::new(namespace, name)?))
    }

    /// Graphics for an already-validated identifier.
    pub fn for_identifier(identifier: Identifier) -> Self {
        Self {
            identifier,
            material: DEFAULT_MATERIAL.to_string(),
            textures: IndexMap::new(),
            geometry: IndexMap::new(),
            render_controllers: Vec::new(),
            egg_colors: ("#550077".to_string(), "#88cc88".to_string()),
            invisible: false,
            animations: IndexMap::new(),
            particle_effects: IndexMap::new(),
            scale: 1.0,
            animate: Vec::new(),
            initialize: Vec::new(),
            pre_animation: Vec::new(),
        }
    }

    /// The client entity's identifier.
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// Register a texture under `key`; `path` is relative to `textures/entity/`.
    pub fn add_texture(&mut self, key: impl Into<String>, path: &str) {
        self.textures
            .insert(key.into(), format!("textures/entity/{path}"));
    }

    /// Builder form of [`EntityGraphics::add_texture`].
    pub fn with_texture(mut self, key: impl Into<String>, path: &str) -> Self {
        self.add_texture(key, path);
        self
    }

    /// Register a geometry under `key`; `name` gets the `geometry.` prefix.
    pub fn add_geometry(&mut self, key: impl Into<String>, name: &str) {
        self.geometry.insert(key.into(), format!("geometry.{name}"));
    }

    /// Builder form of [`EntityGraphics::add_geometry`].
    pub fn with_geometry(mut self, key: impl Into<String>, name: &str) -> Self {
        self.add_geometry(key, name);
        self
    }

    /// Append a render controller.
    pub fn add_render_controller(&mut self, controller: impl Into<String>) {
        self.render_controllers.push(controller.into());
    }

    /// The default material (`basic` unless changed).
    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = material.into();
        self
    }

    /// Spawn egg base and overlay colors, as `#rrggbb`.
    pub fn with_spawn_egg(mut self, base: impl Into<String>, overlay: impl Into<String>) -> Self {
        self.egg_colors = (base.into(), overlay.into());
        self
    }

    /// Render nothing: drops materials, textures and render controllers.
    pub fn with_invisible(mut self, invisible: bool) -> Self {
        self.invisible = invisible;
        self
    }

    /// Render scale.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Bind a symbolic state name to an animation identifier. Rebinding replaces.
    pub fn add_animation(&mut self, state: impl Into<String>, animation: impl Into<String>) {
        self.animations.insert(state.into(), animation.into());
    }

    /// Builder form of [`EntityGraphics::add_animation`].
    pub fn with_animation(
        mut self,
        state: impl Into<String>,
        animation: impl Into<String>,
    ) -> Self {
        self.add_animation(state, animation);
        self
    }

    /// The animation identifier bound to `state`, if any.
    pub fn resolve_animation(&self, state: &str) -> Option<&str> {
        self.animations.get(state).map(String::as_str)
    }

    /// All state bindings in declaration order.
    pub fn animations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.animations.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Bind a particle effect under a local name.
    pub fn add_particle_effect(&mut self, key: impl Into<String>, effect: impl Into<String>) {
        self.particle_effects.insert(key.into(), effect.into());
    }

    /// Play a bound state every frame (`scripts.animate`).
    pub fn add_animate(&mut self, state: impl Into<String>) {
        let state = state.into();
        if !self.animate.contains(&state) {
            self.animate.push(state);
        }
    }

    /// Molang run once when the entity is created.
    pub fn add_initialize(&mut self, expression: impl Into<String>) {
        self.initialize.push(expression.into());
    }

    /// Molang run before each animation pass.
    pub fn add_pre_animation(&mut self, expression: impl Into<String>) {
        self.pre_animation.push(expression.into());
    }

    /// Bind a resource-pack controller under its own identifier and animate it.
    pub fn add_controller(&mut self, controller: &AnimationController) {
        let id = controller.identifier().to_string();
        self.add_animation(id.clone(), id.clone());
        self.add_animate(id);
    }

    /// Add the standard humanoid animation set and its scripts.
    pub fn add_humanoid_animations(&mut self) {
        for (state, animation) in HUMANOID_ANIMATIONS {
            self.add_animation(*state, *animation);
        }
        self.add_animate("root");
        self.initialize
            .extend(HUMANOID_INITIALIZE.iter().map(|s| s.to_string()));
        self.pre_animation
            .extend(HUMANOID_PRE_ANIMATION.iter().map(|s| s.to_string()));
    }

    /// Compile the `minecraft:client_entity` document.
    pub fn to_json(&self, config: &CompileConfig) -> Value {
        let mut desc = Map::new();
        desc.insert("identifier".into(), json!(self.identifier));
        if self.invisible {
            desc.insert("geometry".into(), json!({ "default": "geometry.humanoid" }));
        } else {
            desc.insert("materials".into(), json!({ "default": self.material }));
            let controllers: Vec<&str> = if self.render_controllers.is_empty() {
                vec![DEFAULT_RENDER_CONTROLLER]
            } else {
                self.render_controllers.iter().map(String::as_str).collect()
            };
            desc.insert("render_controllers".into(), json!(controllers));
            desc.insert("geometry".into(), self.keyed_or_default(&self.geometry, "geometry."));
            desc.insert(
                "textures".into(),
                self.keyed_or_default(&self.textures, "textures/entity/"),
            );
        }
        desc.insert(
            "spawn_egg".into(),
            json!({ "base_color": self.egg_colors.0, "overlay_color": self.egg_colors.1 }),
        );
        if !self.animations.is_empty() {
            desc.insert("animations".into(), json!(self.animations));
        }
        if !self.particle_effects.is_empty() {
            desc.insert("particle_effects".into(), json!(self.particle_effects));
        }

        let mut scripts = Map::new();
        scripts.insert("scale".into(), json!(format!("{:?}", self.scale)));
        if !self.animate.is_empty() {
            scripts.insert("animate".into(), json!(self.animate));
        }
        if !self.initialize.is_empty() {
            scripts.insert("initialize".into(), json!(self.initialize));
        }
        if !self.pre_animation.is_empty() {
            scripts.insert("pre_animation".into(), json!(self.pre_animation));
        }
        desc.insert("scripts".into(), Value::Object(scripts));

        json!({
            "format_version": config.resource_format_version,
            "minecraft:client_entity": { "description": desc },
        })
    }

    fn keyed_or_default(&self, entries: &IndexMap<String, String>, prefix: &str) -> Value {
        if entries.is_empty() {
            json!({ "default": format!("{prefix}{}", self.identifier.name()) })
        } else {
            json!(entries)
        }
    }
}
