use indexmap::IndexMap;
use serde_json::{Map, Value, json};

/// Prefix the engine puts in front of every entity property key.
pub const PROPERTY_PREFIX: &str = "property:";

/// A property assignment as the engine reads it.
///
/// String values are Molang expressions in the engine, so a plain string
/// literal has to be wrapped in single quotes. `raw` skips the quoting for
/// values that already are expressions.
fn property_value(value: Value, raw: bool) -> Value {
    match value {
        Value::String(s) if !raw => Value::String(format!("'{s}'")),
        other => other,
    }
}

fn groups_json(groups: &[String]) -> Value {
    json!({ "component_groups": groups })
}

/// One weighted option inside an event's `randomize` list.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRandomizer {
    weight: u32,
    add_groups: Vec<String>,
    remove_groups: Vec<String>,
    set_properties: IndexMap<String, Value>,
}

impl Default for EventRandomizer {
    fn default() -> Self {
        Self::new(1)
    }
}

impl EventRandomizer {
    /// An option with the given relative weight.
    pub fn new(weight: u32) -> Self {
        Self {
            weight,
            add_groups: Vec::new(),
            remove_groups: Vec::new(),
            set_properties: IndexMap::new(),
        }
    }

    /// Add a component group when this option is picked.
    pub fn with_add_group(mut self, group: impl Into<String>) -> Self {
        self.add_groups.push(group.into());
        self
    }

    /// Remove a component group when this option is picked.
    pub fn with_remove_group(mut self, group: impl Into<String>) -> Self {
        self.remove_groups.push(group.into());
        self
    }

    /// Set an entity property when this option is picked. Strings are quoted.
    pub fn with_set_property(mut self, property: &str, value: impl Into<Value>) -> Self {
        self.set_properties.insert(
            format!("{PROPERTY_PREFIX}{property}"),
            property_value(value.into(), false),
        );
        self
    }

    /// The option's weight.
    pub fn weight(&self) -> u32 {
        self.weight
    }

    /// The engine JSON for this option.
    pub fn to_json(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("weight".into(), self.weight.into());
        if !self.add_groups.is_empty() {
            obj.insert("add".into(), groups_json(&self.add_groups));
        }
        if !self.remove_groups.is_empty() {
            obj.insert("remove".into(), groups_json(&self.remove_groups));
        }
        if !self.set_properties.is_empty() {
            obj.insert("set_property".into(), json!(self.set_properties));
        }
        Value::Object(obj)
    }
}

/// What happens when an event fires.
///
/// Group changes and property assignments apply directly. Once any
/// randomizer is present they are emitted as steps of a `sequence` ending in
/// the `randomize` step instead. Sequential sub-events wrap the whole body in
/// an outer `sequence`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventDefinition {
    add_groups: Vec<String>,
    remove_groups: Vec<String>,
    randomizers: Vec<EventRandomizer>,
    sequence: Vec<EventDefinition>,
    set_properties: IndexMap<String, Value>,
    trigger: Option<String>,
    run_command: Option<(Vec<String>, String)>,
    extra: Map<String, Value>,
}

impl EventDefinition {
    /// An event that does nothing yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component group when fired.
    pub fn add_group(&mut self, group: impl Into<String>) {
        let group = group.into();
        if !self.add_groups.contains(&group) {
            self.add_groups.push(group);
        }
    }

    /// Builder form of [`EventDefinition::add_group`].
    pub fn with_add_group(mut self, group: impl Into<String>) -> Self {
        self.add_group(group);
        self
    }

    /// Remove a component group when fired.
    pub fn remove_group(&mut self, group: impl Into<String>) {
        let group = group.into();
        if !self.remove_groups.contains(&group) {
            self.remove_groups.push(group);
        }
    }

    /// Builder form of [`EventDefinition::remove_group`].
    pub fn with_remove_group(mut self, group: impl Into<String>) -> Self {
        self.remove_group(group);
        self
    }

    /// Add a weighted random option.
    pub fn add_randomizer(&mut self, randomizer: EventRandomizer) {
        self.randomizers.push(randomizer);
    }

    /// Builder form of [`EventDefinition::add_randomizer`].
    pub fn with_randomizer(mut self, randomizer: EventRandomizer) -> Self {
        self.add_randomizer(randomizer);
        self
    }

    /// Run another event body after this one, in order.
    pub fn add_sequential(&mut self, event: EventDefinition) {
        self.sequence.push(event);
    }

    /// Builder form of [`EventDefinition::add_sequential`].
    pub fn with_sequential(mut self, event: EventDefinition) -> Self {
        self.add_sequential(event);
        self
    }

    /// Assign an entity property. String values are single-quoted.
    pub fn set_property(&mut self, property: &str, value: impl Into<Value>) {
        self.set_properties.insert(
            format!("{PROPERTY_PREFIX}{property}"),
            property_value(value.into(), false),
        );
    }

    /// Assign an entity property to a Molang expression, without quoting.
    pub fn set_property_raw(&mut self, property: &str, expression: impl Into<String>) {
        self.set_properties.insert(
            format!("{PROPERTY_PREFIX}{property}"),
            Value::String(expression.into()),
        );
    }

    /// Builder form of [`EventDefinition::set_property`].
    pub fn with_set_property(mut self, property: &str, value: impl Into<Value>) -> Self {
        self.set_property(property, value);
        self
    }

    /// Fire another event on the same entity afterwards.
    pub fn with_trigger(mut self, event: impl Into<String>) -> Self {
        self.trigger = Some(event.into());
        self
    }

    /// Run slash commands when fired. `target` picks who runs them.
    pub fn with_run_command(mut self, commands: Vec<String>, target: &str) -> Self {
        self.run_command = Some((commands, target.to_string()));
        self
    }

    /// Attach a field the builder has no method for. It is emitted as-is.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Append `other`'s `run_command` list to this event's own. The target
    /// already set here is kept.
    pub fn append_run_command(&mut self, other: &EventDefinition) {
        let Some((commands, target)) = &other.run_command else {
            return;
        };
        match &mut self.run_command {
            Some((existing, _)) => existing.extend(commands.iter().cloned()),
            None => self.run_command = Some((commands.clone(), target.clone())),
        }
    }

    /// Commands run when the event fires.
    pub fn run_commands(&self) -> &[String] {
        self.run_command
            .as_ref()
            .map_or(&[][..], |(commands, _)| commands.as_slice())
    }

    /// Component groups this event adds.
    pub fn add_groups(&self) -> &[String] {
        &self.add_groups
    }

    /// Component groups this event removes.
    pub fn remove_groups(&self) -> &[String] {
        &self.remove_groups
    }

    /// Fold another body into this one: groups and randomizers append,
    /// property assignments and extra fields overwrite.
    pub fn absorb(&mut self, other: &EventDefinition) {
        for group in &other.add_groups {
            self.add_group(group.clone());
        }
        for group in &other.remove_groups {
            self.remove_group(group.clone());
        }
        self.randomizers.extend(other.randomizers.iter().cloned());
        self.sequence.extend(other.sequence.iter().cloned());
        for (key, value) in &other.set_properties {
            self.set_properties.insert(key.clone(), value.clone());
        }
        if other.trigger.is_some() {
            self.trigger.clone_from(&other.trigger);
        }
        if other.run_command.is_some() {
            self.run_command.clone_from(&other.run_command);
        }
        for (key, value) in &other.extra {
            self.extra.insert(key.clone(), value.clone());
        }
    }

    /// The engine JSON for this event.
    pub fn to_json(&self) -> Value {
        let mut obj = Map::new();
        if self.randomizers.is_empty() {
            if !self.add_groups.is_empty() {
                obj.insert("add".into(), groups_json(&self.add_groups));
            }
            if !self.remove_groups.is_empty() {
                obj.insert("remove".into(), groups_json(&self.remove_groups));
            }
            if !self.set_properties.is_empty() {
                obj.insert("set_property".into(), json!(self.set_properties));
            }
            if let Some(run) = self.run_command_json() {
                obj.insert("run_command".into(), run);
            }
        } else {
            let mut steps = Vec::new();
            if !self.add_groups.is_empty() {
                steps.push(json!({ "add": groups_json(&self.add_groups) }));
            }
            if !self.remove_groups.is_empty() {
                steps.push(json!({ "remove": groups_json(&self.remove_groups) }));
            }
            if !self.set_properties.is_empty() {
                steps.push(json!({ "set_property": self.set_properties }));
            }
            if let Some(run) = self.run_command_json() {
                steps.push(json!({ "run_command": run }));
            }
            let options: Vec<Value> =
                self.randomizers.iter().map(EventRandomizer::to_json).collect();
            steps.push(json!({ "randomize": options }));
            obj.insert("sequence".into(), Value::Array(steps));
        }

        if !self.sequence.is_empty() {
            let mut steps = vec![Value::Object(obj)];
            steps.extend(self.sequence.iter().map(EventDefinition::to_json));
            obj = Map::new();
            obj.insert("sequence".into(), Value::Array(steps));
        }
        if let Some(next) = &self.trigger {
            obj.insert("trigger".into(), json!({ "event": next, "target": "self" }));
        }
        for (key, value) in &self.extra {
            obj.insert(key.clone(), value.clone());
        }
        Value::Object(obj)
    }

    fn run_command_json(&self) -> Option<Value> {
        self.run_command
            .as_ref()
            .map(|(commands, target)| json!({ "command": commands, "target": target }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_emitted_directly() {
        let event = EventDefinition::new()
            .with_add_group("grown")
            .with_remove_group("baby");
        assert_eq!(
            event.to_json(),
            json!({
                "add": { "component_groups": ["grown"] },
                "remove": { "component_groups": ["baby"] },
            })
        );
    }

    #[test]
    fn set_property_quotes_strings() {
        let mut event = EventDefinition::new().with_set_property("level", 5);
        event.set_property("mood", "angry");
        event.set_property_raw("phase", "query.variant");
        assert_eq!(
            event.to_json()["set_property"],
            json!({
                "property:level": 5,
                "property:mood": "'angry'",
                "property:phase": "query.variant",
            })
        );
    }

    #[test]
    fn randomizers_move_body_into_sequence() {
        let event = EventDefinition::new()
            .with_add_group("base")
            .with_set_property("level", 1)
            .with_randomizer(EventRandomizer::new(9001).with_add_group("red"))
            .with_randomizer(EventRandomizer::default().with_add_group("blue"));
        let json = event.to_json();
        let steps = json["sequence"].as_array().unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0]["add"]["component_groups"], json!(["base"]));
        assert_eq!(steps[1]["set_property"]["property:level"], 1);
        assert_eq!(steps[2]["randomize"][0]["weight"], 9001);
        assert_eq!(steps[2]["randomize"][1]["weight"], 1);
        assert!(json.get("add").is_none());
    }

    #[test]
    fn sequential_events_wrap_body() {
        let event = EventDefinition::new()
            .with_add_group("tag_2")
            .with_sequential(EventDefinition::new().with_add_group("tag_1"));
        let json = event.to_json();
        assert_eq!(json["sequence"][0]["add"]["component_groups"], json!(["tag_2"]));
        assert_eq!(json["sequence"][1]["add"]["component_groups"], json!(["tag_1"]));
    }

    #[test]
    fn trigger_targets_self() {
        let json = EventDefinition::new().with_trigger("next_event").to_json();
        assert_eq!(json["trigger"], json!({ "event": "next_event", "target": "self" }));
    }

    #[test]
    fn run_command_shape() {
        let json = EventDefinition::new()
            .with_run_command(vec!["/say hi".into()], "holder")
            .to_json();
        assert_eq!(
            json,
            json!({ "run_command": { "command": ["/say hi"], "target": "holder" } })
        );
    }

    #[test]
    fn randomizer_property_and_groups() {
        let r = EventRandomizer::new(3)
            .with_remove_group("old")
            .with_set_property("color", "red");
        assert_eq!(
            r.to_json(),
            json!({
                "weight": 3,
                "remove": { "component_groups": ["old"] },
                "set_property": { "property:color": "'red'" },
            })
        );
    }

    #[test]
    fn absorb_appends_groups_without_duplicates() {
        let mut spawn = EventDefinition::new().with_add_group("a");
        spawn.absorb(&EventDefinition::new().with_add_group("a").with_add_group("b"));
        assert_eq!(spawn.add_groups(), ["a", "b"]);
    }

    #[test]
    fn extra_fields_pass_through() {
        let json = EventDefinition::new()
            .with_field("emit_vibration", json!({ "vibration": "entity_act" }))
            .to_json();
        assert_eq!(json["emit_vibration"]["vibration"], "entity_act");
    }
}
