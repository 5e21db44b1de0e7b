use serde_json::{Value, json};

use crate::behavior::Behavior;
use crate::component::Component;
use crate::entity::Entity;
use crate::error::BwResult;
use crate::graphics::EntityGraphics;
use crate::identifier::Identifier;
use crate::vanilla;

/// A projectile entity: an arrow-like entity with a `minecraft:projectile`
/// component describing what happens on impact.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    identifier: Identifier,
    damage: Value,
    graphics: Option<EntityGraphics>,
    collision_box_size: f64,
    knockback: bool,
    enflame: bool,
    spawn: Option<(String, f64, u32)>,
    hit_sound: String,
    stick_in_ground: bool,
    destroyed_on_hit: bool,
    spread: f64,
    power: f64,
    gravity: f64,
    remove_on_hit: bool,
}

impl Projectile {
    /// A projectile `namespace:name` dealing `damage` on impact.
    pub fn new(namespace: &str, name: &str, damage: impl Into<Value>) -> BwResult<Self> {
        Ok(Self {
            identifier: Identifier::new(namespace, name)?,
            damage: damage.into(),
            graphics: None,
            collision_box_size: 0.25,
            knockback: true,
            enflame: false,
            spawn: None,
            hit_sound: "bow.hit".to_string(),
            stick_in_ground: false,
            destroyed_on_hit: true,
            spread: 10.0,
            power: 1.0,
            gravity: 0.05,
            remove_on_hit: false,
        })
    }

    /// Client-side graphics for the projectile.
    pub fn with_graphics(mut self, graphics: EntityGraphics) -> Self {
        self.graphics = Some(graphics);
        self
    }

    /// Width and height of the collision box.
    pub fn with_collision_box_size(mut self, size: f64) -> Self {
        self.collision_box_size = size;
        self
    }

    /// Whether the impact knocks the target back.
    pub fn with_knockback(mut self, knockback: bool) -> Self {
        self.knockback = knockback;
        self
    }

    /// Set targets on fire.
    pub fn with_enflame(mut self, enflame: bool) -> Self {
        self.enflame = enflame;
        self
    }

    /// Spawn `count` of `entity` on impact with `chance` percent probability.
    pub fn with_spawn(mut self, entity: impl Into<String>, chance: f64, count: u32) -> Self {
        self.spawn = Some((entity.into(), chance, count));
        self
    }

    /// Sound played on impact.
    pub fn with_hit_sound(mut self, sound: impl Into<String>) -> Self {
        self.hit_sound = sound.into();
        self
    }

    /// Stick in the ground instead of bouncing off.
    pub fn with_stick_in_ground(mut self, stick: bool) -> Self {
        self.stick_in_ground = stick;
        self
    }

    /// Whether the projectile stops at the first entity it hits.
    pub fn with_destroyed_on_hit(mut self, destroyed: bool) -> Self {
        self.destroyed_on_hit = destroyed;
        self
    }

    /// Base inaccuracy when fired.
    pub fn with_spread(mut self, spread: f64) -> Self {
        self.spread = spread;
        self
    }

    /// Launch speed.
    pub fn with_power(mut self, power: f64) -> Self {
        self.power = power;
        self
    }

    /// Downward acceleration per tick.
    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    /// Remove the projectile entity on impact.
    pub fn with_remove_on_hit(mut self, remove: bool) -> Self {
        self.remove_on_hit = remove;
        self
    }

    /// The `minecraft:projectile` component.
    pub fn component(&self) -> Component {
        let mut on_hit = json!({
            "impact_damage": {
                "damage": self.damage,
                "knockback": self.knockback,
                "semi_random_diff_damage": false,
                "destroy_on_hit": self.destroyed_on_hit,
            },
        });
        if self.stick_in_ground {
            on_hit["stick_in_ground"] = json!({ "shake_time": 0.35 });
        }
        if let Some((entity, chance, count)) = &self.spawn {
            on_hit["spawn_chance"] = json!({
                "spawn_definition": entity,
                "first_spawn_percent_chance": chance,
                "first_spawn_count": count,
            });
        }
        if self.remove_on_hit {
            on_hit["remove_on_hit"] = json!({});
        }

        let component = Component::from_identifier(Identifier::vanilla("projectile"))
            .with_field("on_hit", on_hit)
            .with_field("hit_sound", self.hit_sound.as_str())
            .with_field("power", self.power)
            .with_field("gravity", self.gravity)
            .with_field("uncertainty_base", self.spread)
            .with_field("uncertainty_multiplier", 0)
            .with_field("anchor", 1)
            .with_field("should_bounce", true)
            .with_field("offset", json!([0, -0.1, 0]))
            .with_field("catch_fire", self.enflame);
        if self.destroyed_on_hit {
            component.with_field("stop_on_hurt", json!({}))
        } else {
            component
        }
    }

    /// The finished entity: it inherits arrow behavior, is despawnable and
    /// carries one behavior with the collision box, physics and projectile
    /// components.
    pub fn build(self) -> BwResult<Entity> {
        let size = self.collision_box_size;
        let behavior = Behavior::for_identifier(self.identifier.clone())
            .with_component(vanilla::collision_box(size, size))
            .with_component(vanilla::physics())
            .with_component(self.component());

        let mut entity = Entity::for_identifier(self.identifier);
        entity.set_runtime_identifier(Identifier::vanilla("arrow"));
        entity.set_despawnable(true);
        if let Some(graphics) = self.graphics {
            entity.set_graphics(graphics);
        }
        entity.add_behavior(behavior)?;
        Ok(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::DESPAWN;

    fn arrow() -> Projectile {
        Projectile::new("dev", "arrow", 4).unwrap()
    }

    #[test]
    fn default_component() {
        let json = arrow().component().to_json();
        assert_eq!(
            json,
            json!({
                "on_hit": {
                    "impact_damage": {
                        "damage": 4,
                        "knockback": true,
                        "semi_random_diff_damage": false,
                        "destroy_on_hit": true,
                    },
                },
                "hit_sound": "bow.hit",
                "power": 1.0,
                "gravity": 0.05,
                "uncertainty_base": 10.0,
                "uncertainty_multiplier": 0,
                "anchor": 1,
                "should_bounce": true,
                "offset": [0, -0.1, 0],
                "catch_fire": false,
                "stop_on_hurt": {},
            })
        );
    }

    #[test]
    fn optional_impact_effects() {
        let json = arrow()
            .with_stick_in_ground(true)
            .with_spawn("chicken", 12.5, 2)
            .with_remove_on_hit(true)
            .with_destroyed_on_hit(false)
            .component()
            .to_json();
        let on_hit = &json["on_hit"];
        assert_eq!(on_hit["stick_in_ground"], json!({ "shake_time": 0.35 }));
        assert_eq!(
            on_hit["spawn_chance"],
            json!({
                "spawn_definition": "chicken",
                "first_spawn_percent_chance": 12.5,
                "first_spawn_count": 2,
            })
        );
        assert_eq!(on_hit["remove_on_hit"], json!({}));
        assert_eq!(on_hit["impact_damage"]["destroy_on_hit"], false);
        assert!(json.get("stop_on_hurt").is_none());
    }

    #[test]
    fn built_entity() {
        let entity = arrow()
            .with_collision_box_size(0.5)
            .with_graphics(EntityGraphics::new("dev", "arrow").unwrap())
            .build()
            .unwrap();
        let docs = entity.get_json().unwrap();
        assert_eq!(docs.len(), 2);
        let body = &docs.behavior["minecraft:entity"];
        assert_eq!(body["description"]["runtime_identifier"], "minecraft:arrow");
        assert_eq!(body["components"]["minecraft:collision_box"]["width"], 0.5);
        assert!(body["components"]["minecraft:physics"].is_object());
        assert!(body["components"]["minecraft:projectile"].is_object());
        assert!(body["events"][DESPAWN].is_object());
    }
}
