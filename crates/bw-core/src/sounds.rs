use serde_json::{Map, Value, json};

use crate::identifier::Identifier;

/// Pitch range used unless one is set.
pub const DEFAULT_PITCH: [f64; 2] = [0.8, 1.2];

/// Sound events an entity plays, for the resource pack's `sounds.json`.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySounds {
    ambient: Option<String>,
    step: Option<String>,
    hurt: Option<String>,
    death: Option<String>,
    pitch: [f64; 2],
    volume: f64,
}

impl Default for EntitySounds {
    fn default() -> Self {
        Self {
            ambient: None,
            step: None,
            hurt: None,
            death: None,
            pitch: DEFAULT_PITCH,
            volume: 1.0,
        }
    }
}

impl EntitySounds {
    /// No sound events, default pitch and volume.
    pub fn new() -> Self {
        Self::default()
    }

    /// Played at random while idle.
    pub fn with_ambient(mut self, sound: impl Into<String>) -> Self {
        self.ambient = Some(sound.into());
        self
    }

    /// Played while walking.
    pub fn with_step(mut self, sound: impl Into<String>) -> Self {
        self.step = Some(sound.into());
        self
    }

    /// Played on damage.
    pub fn with_hurt(mut self, sound: impl Into<String>) -> Self {
        self.hurt = Some(sound.into());
        self
    }

    /// Played on death.
    pub fn with_death(mut self, sound: impl Into<String>) -> Self {
        self.death = Some(sound.into());
        self
    }

    /// Random pitch range.
    pub fn with_pitch(mut self, min: f64, max: f64) -> Self {
        self.pitch = [min, max];
        self
    }

    /// Volume for every event.
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }

    /// The entity's entry: `events` only when at least one is set.
    pub fn to_json(&self) -> Value {
        let mut events = Map::new();
        let named = [
            ("ambient", &self.ambient),
            ("step", &self.step),
            ("hurt", &self.hurt),
            ("death", &self.death),
        ];
        for (event, sound) in named {
            if let Some(sound) = sound {
                events.insert(event.into(), json!(sound));
            }
        }
        let mut obj = Map::new();
        if !events.is_empty() {
            obj.insert("events".into(), Value::Object(events));
        }
        obj.insert("pitch".into(), json!(self.pitch));
        obj.insert("volume".into(), json!(self.volume));
        Value::Object(obj)
    }
}

/// Gather per-entity sound entries into one `sounds.json` document.
pub fn sounds_document<'a>(entries: impl IntoIterator<Item = (&'a Identifier, Value)>) -> Value {
    let entities: Map<String, Value> = entries
        .into_iter()
        .map(|(id, sounds)| (id.to_string(), sounds))
        .collect();
    json!({ "entity_sounds": { "entities": entities } })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_events() {
        assert_eq!(EntitySounds::new().to_json(), json!({ "pitch": [0.8, 1.2], "volume": 1.0 }));
    }

    #[test]
    fn only_set_events_emitted() {
        let sounds = EntitySounds::new()
            .with_hurt("mob.zombie.hurt")
            .with_death("mob.zombie.death")
            .with_volume(0.5);
        assert_eq!(
            sounds.to_json(),
            json!({
                "events": { "hurt": "mob.zombie.hurt", "death": "mob.zombie.death" },
                "pitch": [0.8, 1.2],
                "volume": 0.5,
            })
        );
    }

    #[test]
    fn document_keys_by_identifier() {
        let id = Identifier::new("dev", "goblin").unwrap();
        let doc = sounds_document([(&id, EntitySounds::new().with_pitch(1.0, 1.0).to_json())]);
        assert_eq!(doc["entity_sounds"]["entities"]["dev:goblin"]["pitch"], json!([1.0, 1.0]));
    }
}
