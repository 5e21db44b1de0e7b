//! Constructors for commonly used `minecraft:` components.
//!
//! Each function returns a ready-to-attach [`Component`] whose payload
//! matches what the engine expects for that capability.

use serde_json::{Value, json};

use crate::component::Component;
use crate::error::{BwError, BwResult};
use crate::identifier::Identifier;

fn vanilla(name: &'static str) -> Component {
    Component::from_identifier(Identifier::vanilla(name))
}

/// Melee damage: a fixed amount or an inclusive random range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Damage {
    /// Always deal this much.
    Fixed(i64),
    /// Deal a random amount between the two bounds.
    Range(i64, i64),
}

impl From<i64> for Damage {
    fn from(value: i64) -> Self {
        Self::Fixed(value)
    }
}

impl From<Damage> for Value {
    fn from(damage: Damage) -> Self {
        match damage {
            Damage::Fixed(n) => json!(n),
            Damage::Range(lo, hi) => json!([lo, hi]),
        }
    }
}

/// `minecraft:type_family`: tags the entity with families usable in filters.
pub fn family<S: AsRef<str>>(families: &[S]) -> Component {
    let families: Vec<&str> = families.iter().map(AsRef::as_ref).collect();
    vanilla("type_family").with_field("family", families)
}

/// `minecraft:timer`: fires `event` after `length` seconds.
pub fn timer(length: f64, event: &str) -> Component {
    vanilla("timer")
        .with_field("randomInterval", false)
        .with_field("time", length)
        .with_field("time_down_event", json!({ "event": event }))
}

/// `minecraft:skin_id`.
pub fn skin_id(value: i64) -> Component {
    vanilla("skin_id").with_field("value", value)
}

/// `minecraft:variant`.
pub fn variant(value: i64) -> Component {
    vanilla("variant").with_field("value", value)
}

/// `minecraft:mark_variant`.
pub fn mark_variant(value: i64) -> Component {
    vanilla("mark_variant").with_field("value", value)
}

/// `minecraft:scale`.
pub fn scale(value: f64) -> Component {
    vanilla("scale").with_field("value", value)
}

/// `minecraft:movement`: base movement speed.
pub fn movement(speed: f64) -> Component {
    vanilla("movement").with_field("value", speed)
}

/// `minecraft:behavior.random_stroll`.
pub fn stroll(speed: f64, priority: u32) -> Component {
    vanilla("behavior.random_stroll")
        .with_priority(priority)
        .with_field("speed_multiplier", speed)
}

/// `minecraft:behavior.random_look_around`.
pub fn random_look(priority: u32) -> Component {
    vanilla("behavior.random_look_around").with_priority(priority)
}

/// `minecraft:attack`, optionally applying a potion effect on hit.
///
/// The effect name and duration go together; giving only one is an error.
pub fn attack(
    damage: impl Into<Damage>,
    effect_name: Option<&str>,
    effect_duration: Option<f64>,
) -> BwResult<Component> {
    let comp = vanilla("attack").with_field("damage", damage.into());
    match (effect_name, effect_duration) {
        (Some(name), Some(duration)) => Ok(comp
            .with_field("effect_name", name)
            .with_field("effect_duration", duration)),
        (None, None) => Ok(comp),
        _ => Err(BwError::InvalidComponent {
            component: "attack",
            reason: "effect name and effect duration must be given together".into(),
        }),
    }
}

/// `minecraft:behavior.melee_attack`. Unset options are left to engine defaults.
pub fn melee_attack(
    speed_multiplier: Option<f64>,
    track_target: Option<bool>,
    reach_multiplier: Option<f64>,
) -> Component {
    let mut comp = vanilla("behavior.melee_attack");
    if let Some(v) = speed_multiplier {
        comp.add_field("speed_multiplier", v);
    }
    if let Some(v) = track_target {
        comp.add_field("track_target", v);
    }
    if let Some(v) = reach_multiplier {
        comp.add_field("reach_multiplier", v);
    }
    comp
}

/// `minecraft:behavior.ranged_attack`.
pub fn ranged_attack(attack_range: f64, interval_min: f64, interval_max: f64) -> Component {
    vanilla("behavior.ranged_attack")
        .with_field("attack_radius", attack_range)
        .with_field("attack_interval_min", interval_min)
        .with_field("attack_interval_max", interval_max)
}

/// `minecraft:area_attack`: damages everything within `range` each tick.
pub fn area_attack(range: f64, damage_per_tick: i64) -> Component {
    vanilla("area_attack")
        .with_field("damage_range", range)
        .with_field("damage_per_tick", damage_per_tick)
}

/// `minecraft:health`, starting at full health.
pub fn health(max: i64) -> Component {
    vanilla("health").with_field("max", max).with_field("value", max)
}

/// `minecraft:collision_box`.
pub fn collision_box(width: f64, height: f64) -> Component {
    vanilla("collision_box")
        .with_field("width", width)
        .with_field("height", height)
}

/// `minecraft:follow_range`.
pub fn follow_range(range: f64) -> Component {
    vanilla("follow_range")
        .with_field("value", range)
        .with_field("max", range)
}

/// `minecraft:damage_sensor` that makes the entity immune to all damage.
pub fn no_damage() -> Component {
    vanilla("damage_sensor").with_field(
        "triggers",
        json!({
            "on_damage": { "filters": {} },
            "deals_damage": false
        }),
    )
}

/// Options for [`nav_generic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavOptions {
    /// May path across water surfaces.
    pub can_path_over_water: bool,
    /// Prefers to stay out of water.
    pub avoid_water: bool,
    /// May walk through open doors.
    pub can_pass_doors: bool,
    /// May open closed doors.
    pub can_open_doors: bool,
    /// Avoids blocks that hurt it.
    pub avoid_damage_blocks: bool,
}

impl Default for NavOptions {
    fn default() -> Self {
        Self {
            can_path_over_water: true,
            avoid_water: true,
            can_pass_doors: true,
            can_open_doors: false,
            avoid_damage_blocks: true,
        }
    }
}

/// `minecraft:navigation.generic`.
pub fn nav_generic(options: NavOptions) -> Component {
    vanilla("navigation.generic")
        .with_field("can_path_over_water", options.can_path_over_water)
        .with_field("avoid_water", options.avoid_water)
        .with_field("can_pass_doors", options.can_pass_doors)
        .with_field("can_open_doors", options.can_open_doors)
        .with_field("avoid_damage_blocks", options.avoid_damage_blocks)
}

/// `minecraft:rideable` with one seat per position.
pub fn rideable<S: AsRef<str>>(
    seat_positions: &[[f64; 3]],
    family_types: &[S],
    pull_in_entities: bool,
) -> Component {
    let families: Vec<&str> = family_types.iter().map(AsRef::as_ref).collect();
    let seats: Vec<Value> = seat_positions
        .iter()
        .map(|pos| json!({ "position": pos }))
        .collect();
    vanilla("rideable")
        .with_field("seat_count", seat_positions.len())
        .with_field("family_types", families)
        .with_field("pull_in_entities", pull_in_entities)
        .with_field("seats", seats)
}

/// Components that make an entity walk straight to the nearest member of
/// `target_family` and fire `reached_event` once within `sensor_range`.
pub fn list_pathfinding(
    target_family: &str,
    reached_event: &str,
    sensor_range: f64,
) -> Vec<Component> {
    let family_filter = json!({
        "test": "is_family",
        "subject": "other",
        "value": target_family
    });
    let target = vanilla("behavior.nearest_attackable_target")
        .with_priority(0)
        .with_field("reselect_targets", true)
        .with_field("target_search_height", 1000)
        .with_field("within_radius", 1000)
        .with_field("scan_interval", 20)
        .with_field("must_see", false)
        .with_field(
            "entity_types",
            json!([{ "filters": family_filter.clone(), "max_dist": 1000 }]),
        );
    let melee = vanilla("behavior.melee_attack")
        .with_priority(0)
        .with_field("reach_multiplier", 0.0);
    let sensor = vanilla("entity_sensor")
        .with_field("event_filters", json!([family_filter]))
        .with_field("event", reached_event)
        .with_field("sensor_range", sensor_range);
    vec![
        target,
        vanilla("attack").with_field("damage", 0),
        melee,
        sensor,
    ]
}

/// `minecraft:knockback_resistance` at full resistance.
pub fn no_knockback() -> Component {
    vanilla("knockback_resistance").with_field("value", 1.0)
}

/// `minecraft:shooter` firing `projectile`, optionally tipped with a potion.
pub fn shooter(projectile: &str, potion_effect: Option<i64>) -> Component {
    let comp = vanilla("shooter").with_field("def", projectile);
    match potion_effect {
        Some(aux) => comp.with_field("aux_val", aux),
        None => comp,
    }
}

/// `minecraft:environment_sensor` firing `event` while the entity has `tag`.
pub fn tag_sensor(tag: &str, event: &str) -> Component {
    vanilla("environment_sensor").with_field(
        "triggers",
        json!([{ "filters": { "test": "has_tag", "value": tag }, "event": event }]),
    )
}

/// `minecraft:environment_sensor` pairing each tag with the event at the same index.
pub fn tag_sensor_list<S: AsRef<str>, E: AsRef<str>>(
    tags: &[S],
    events: &[E],
) -> BwResult<Component> {
    if tags.len() != events.len() {
        return Err(BwError::InvalidComponent {
            component: "environment_sensor",
            reason: format!("{} tags but {} events", tags.len(), events.len()),
        });
    }
    let triggers: Vec<Value> = tags
        .iter()
        .zip(events)
        .map(|(tag, event)| {
            json!({
                "filters": { "test": "has_tag", "value": tag.as_ref() },
                "event": event.as_ref()
            })
        })
        .collect();
    Ok(vanilla("environment_sensor").with_field("triggers", triggers))
}

/// `minecraft:physics`.
pub fn physics() -> Component {
    vanilla("physics")
}

/// `minecraft:instant_despawn`.
pub fn instant_despawn() -> Component {
    vanilla("instant_despawn")
}

/// `minecraft:display_name` for items.
pub fn display_name(value: &str) -> Component {
    vanilla("display_name").with_field("value", value)
}

/// `minecraft:icon` for items.
pub fn icon(texture: &str) -> Component {
    vanilla("icon").with_field("texture", texture)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_sets_max_and_value() {
        let c = health(20);
        assert_eq!(c.identifier().to_string(), "minecraft:health");
        assert_eq!(c.to_json(), json!({ "max": 20, "value": 20 }));
    }

    #[test]
    fn timer_payload() {
        let c = timer(2.5, "next_state");
        assert_eq!(
            c.to_json(),
            json!({
                "randomInterval": false,
                "time": 2.5,
                "time_down_event": { "event": "next_state" }
            })
        );
    }

    #[test]
    fn stroll_carries_priority_first() {
        let c = stroll(1.0, 5);
        let keys: Vec<_> = c.payload().keys().cloned().collect();
        assert_eq!(keys, vec!["priority", "speed_multiplier"]);
    }

    #[test]
    fn attack_range_damage() {
        let c = attack(Damage::Range(2, 4), None, None).unwrap();
        assert_eq!(c.to_json(), json!({ "damage": [2, 4] }));
    }

    #[test]
    fn attack_with_effect() {
        let c = attack(3, Some("poison"), Some(5.0)).unwrap();
        assert_eq!(c.field("effect_name"), Some(&json!("poison")));
        assert_eq!(c.field("effect_duration"), Some(&json!(5.0)));
    }

    #[test]
    fn attack_half_effect_rejected() {
        assert!(attack(3, Some("poison"), None).is_err());
        assert!(attack(3, None, Some(5.0)).is_err());
    }

    #[test]
    fn melee_attack_omits_unset_fields() {
        let c = melee_attack(Some(1.5), None, None);
        assert_eq!(c.to_json(), json!({ "speed_multiplier": 1.5 }));
    }

    #[test]
    fn rideable_builds_seats() {
        let c = rideable(&[[0.0, 1.0, 0.0], [0.0, 1.0, -1.0]], &["player"], false);
        let json = c.to_json();
        assert_eq!(json["seat_count"], 2);
        assert_eq!(json["seats"][1]["position"], json!([0.0, 1.0, -1.0]));
        assert_eq!(json["family_types"], json!(["player"]));
    }

    #[test]
    fn list_pathfinding_bundle() {
        let comps = list_pathfinding("player", "reached", 3.0);
        let ids: Vec<_> = comps.iter().map(|c| c.identifier().to_string()).collect();
        assert_eq!(
            ids,
            vec![
                "minecraft:behavior.nearest_attackable_target",
                "minecraft:attack",
                "minecraft:behavior.melee_attack",
                "minecraft:entity_sensor",
            ]
        );
        assert_eq!(comps[3].field("event"), Some(&json!("reached")));
    }

    #[test]
    fn shooter_with_potion() {
        let c = shooter("minecraft:arrow", Some(19));
        assert_eq!(c.to_json(), json!({ "def": "minecraft:arrow", "aux_val": 19 }));
    }

    #[test]
    fn tag_sensor_list_pairs_tags_and_events() {
        let c = tag_sensor_list(&["a", "b"], &["on_a", "on_b"]).unwrap();
        let triggers = c.field("triggers").unwrap().as_array().unwrap();
        assert_eq!(triggers.len(), 2);
        assert_eq!(triggers[1]["filters"]["value"], "b");
        assert_eq!(triggers[1]["event"], "on_b");
    }

    #[test]
    fn tag_sensor_list_length_mismatch() {
        assert!(tag_sensor_list(&["a"], &["x", "y"]).is_err());
    }

    #[test]
    fn nav_generic_defaults() {
        let c = nav_generic(NavOptions::default());
        assert_eq!(c.field("can_open_doors"), Some(&json!(false)));
        assert_eq!(c.field("avoid_water"), Some(&json!(true)));
    }
}
