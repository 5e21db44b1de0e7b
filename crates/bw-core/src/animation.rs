//! Behavior-pack animations and animation controllers.
//!
//! These compile to standalone documents, separate from the entity files.
//! Their identifiers use the engine's dotted form (`animation.goblin.walk`,
//! `controller.animation.goblin.main`) rather than `namespace:name`.

use indexmap::IndexMap;
use serde_json::{Map, Value, json};

use crate::config::CompileConfig;

/// Commands fired at one point of an animation's timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry {
    /// Seconds from the animation's start.
    pub time: f64,
    /// Commands to run, each with a leading `/`.
    pub commands: Vec<String>,
}

impl TimelineEntry {
    /// An entry with no commands yet.
    pub fn new(time: f64) -> Self {
        Self {
            time,
            commands: Vec::new(),
        }
    }

    /// Append a command.
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.commands.push(command.into());
        self
    }

    /// The timeline key, always with a fractional part (`1.0`, `0.25`).
    pub fn key(&self) -> String {
        format!("{:?}", self.time)
    }

    /// A single command is emitted as a bare string, several as a list.
    pub fn to_json(&self) -> Value {
        match self.commands.as_slice() {
            [single] => json!(single),
            many => json!(many),
        }
    }
}

/// One behavior-pack animation.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    identifier: String,
    looping: bool,
    length: Option<f64>,
    timeline: Vec<TimelineEntry>,
}

impl Animation {
    /// An empty, non-looping animation.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            looping: false,
            length: None,
            timeline: Vec::new(),
        }
    }

    /// Restart when finished.
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Duration in seconds.
    pub fn with_length(mut self, seconds: f64) -> Self {
        self.length = Some(seconds);
        self
    }

    /// Add a timeline entry.
    pub fn add_timeline_entry(&mut self, entry: TimelineEntry) {
        self.timeline.push(entry);
    }

    /// Builder form of [`Animation::add_timeline_entry`].
    pub fn with_timeline_entry(mut self, entry: TimelineEntry) -> Self {
        self.add_timeline_entry(entry);
        self
    }

    /// The animation's dotted identifier.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The animation body (without its identifier).
    pub fn to_json(&self) -> Value {
        let mut obj = Map::new();
        if self.looping {
            obj.insert("loop".into(), json!(true));
        }
        if let Some(length) = self.length {
            obj.insert("animation_length".into(), json!(length));
        }
        if !self.timeline.is_empty() {
            let timeline: Map<String, Value> = self
                .timeline
                .iter()
                .map(|entry| (entry.key(), entry.to_json()))
                .collect();
            obj.insert("timeline".into(), Value::Object(timeline));
        }
        Value::Object(obj)
    }
}

/// A document holding several animations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationFile {
    animations: Vec<Animation>,
}

impl AnimationFile {
    /// An empty file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an animation.
    pub fn add_animation(&mut self, animation: Animation) {
        self.animations.push(animation);
    }

    /// Builder form of [`AnimationFile::add_animation`].
    pub fn with_animation(mut self, animation: Animation) -> Self {
        self.add_animation(animation);
        self
    }

    /// The animations in declaration order.
    pub fn animations(&self) -> &[Animation] {
        &self.animations
    }

    /// Compile with the default configuration.
    pub fn get_json(&self) -> Value {
        self.get_json_with(&CompileConfig::default())
    }

    /// Compile with an explicit configuration.
    pub fn get_json_with(&self, config: &CompileConfig) -> Value {
        let animations: Map<String, Value> = self
            .animations
            .iter()
            .map(|a| (a.identifier.clone(), a.to_json()))
            .collect();
        json!({
            "format_version": config.animation_format_version,
            "animations": animations,
        })
    }
}

/// One state of an animation controller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControllerState {
    transitions: Vec<(String, String)>,
    on_entry: Vec<String>,
    on_exit: Vec<String>,
    animations: Vec<String>,
    blend_transition: Option<f64>,
}

impl ControllerState {
    /// A state that does nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to `state` once the Molang `condition` holds.
    pub fn with_transition(
        mut self,
        state: impl Into<String>,
        condition: impl Into<String>,
    ) -> Self {
        self.transitions.push((state.into(), condition.into()));
        self
    }

    /// Run a command when the state is entered.
    pub fn with_entry_command(mut self, command: impl Into<String>) -> Self {
        self.on_entry.push(command.into());
        self
    }

    /// Run a command when the state is left.
    pub fn with_exit_command(mut self, command: impl Into<String>) -> Self {
        self.on_exit.push(command.into());
        self
    }

    /// Play an animation while in this state.
    pub fn with_animation(mut self, animation: impl Into<String>) -> Self {
        self.animations.push(animation.into());
        self
    }

    /// Seconds to blend into the next state.
    pub fn with_blend_transition(mut self, seconds: f64) -> Self {
        self.blend_transition = Some(seconds);
        self
    }

    /// Transition targets and their conditions.
    pub fn transitions(&self) -> &[(String, String)] {
        &self.transitions
    }

    /// The state body.
    pub fn to_json(&self) -> Value {
        let mut obj = Map::new();
        if !self.transitions.is_empty() {
            let transitions: Vec<Value> = self
                .transitions
                .iter()
                .map(|(state, condition)| {
                    let mut transition = Map::new();
                    transition.insert(state.clone(), json!(condition));
                    Value::Object(transition)
                })
                .collect();
            obj.insert("transitions".into(), Value::Array(transitions));
        }
        if !self.on_entry.is_empty() {
            obj.insert("on_entry".into(), json!(self.on_entry));
        }
        if !self.on_exit.is_empty() {
            obj.insert("on_exit".into(), json!(self.on_exit));
        }
        if !self.animations.is_empty() {
            obj.insert("animations".into(), json!(self.animations));
        }
        if let Some(time) = self.blend_transition {
            obj.insert("blend_transition".into(), json!(time));
        }
        Value::Object(obj)
    }
}

/// A state machine that plays animations and runs commands.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationController {
    identifier: String,
    initial_state: String,
    states: IndexMap<String, ControllerState>,
}

impl AnimationController {
    /// A controller starting in the `init` state.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            initial_state: "init".to_string(),
            states: IndexMap::new(),
        }
    }

    /// Start somewhere other than `init`.
    pub fn with_initial_state(mut self, state: impl Into<String>) -> Self {
        self.initial_state = state.into();
        self
    }

    /// Add or replace a state.
    pub fn add_state(&mut self, name: impl Into<String>, state: ControllerState) {
        self.states.insert(name.into(), state);
    }

    /// Builder form of [`AnimationController::add_state`].
    pub fn with_state(mut self, name: impl Into<String>, state: ControllerState) -> Self {
        self.add_state(name, state);
        self
    }

    /// Returns true if a state with this name exists.
    pub fn has_state(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    /// Look up a state.
    pub fn state(&self, name: &str) -> Option<&ControllerState> {
        self.states.get(name)
    }

    /// The controller's dotted identifier.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Transitions pointing at states the controller does not define.
    pub fn dangling_transitions(&self) -> Vec<(&str, &str)> {
        self.states
            .iter()
            .flat_map(|(from, state)| {
                state
                    .transitions
                    .iter()
                    .filter(|(to, _)| !self.states.contains_key(to))
                    .map(move |(to, _)| (from.as_str(), to.as_str()))
            })
            .collect()
    }

    /// Compile with the default configuration.
    pub fn get_json(&self) -> Value {
        self.get_json_with(&CompileConfig::default())
    }

    /// Compile with an explicit configuration.
    pub fn get_json_with(&self, config: &CompileConfig) -> Value {
        let states: Map<String, Value> = self
            .states
            .iter()
            .map(|(name, state)| (name.clone(), state.to_json()))
            .collect();
        let mut controllers = Map::new();
        controllers.insert(
            self.identifier.clone(),
            json!({ "initial_state": self.initial_state, "states": states }),
        );
        json!({
            "format_version": config.animation_controller_format_version,
            "animation_controllers": controllers,
        })
    }
}
