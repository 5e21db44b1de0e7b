use indexmap::IndexMap;
use serde_json::Value;

use crate::animation::{AnimationController, ControllerState};
use crate::behavior::{LoweredBehavior, SPAWN_EVENT};
use crate::component::Component;
use crate::error::{BwError, BwResult};
use crate::event::EventDefinition;
use crate::group::ComponentGroup;
use crate::vanilla;

/// Seconds a looping state's animation blends into the next one.
pub const DEFAULT_BLEND: f64 = 0.2;

/// One state of an entity's skin-id state machine.
///
/// State `i` compiles to a component group and an event, both named
/// `state_i`. The group sets `minecraft:skin_id` to `i`, which is what the
/// generated animation controllers watch to run commands and play
/// animations while the state is active.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopState {
    components: Vec<Component>,
    entry_commands: Vec<String>,
    exit_commands: Vec<String>,
    timer: Option<f64>,
    timer_target: Option<String>,
    last: bool,
    name: Option<String>,
    connections: Vec<String>,
    animation: Option<String>,
    end_animation_with_state: bool,
    blend: f64,
    set_properties: IndexMap<String, Value>,
}

impl Default for LoopState {
    fn default() -> Self {
        Self {
            components: Vec::new(),
            entry_commands: Vec::new(),
            exit_commands: Vec::new(),
            timer: None,
            timer_target: None,
            last: false,
            name: None,
            connections: Vec::new(),
            animation: None,
            end_animation_with_state: true,
            blend: DEFAULT_BLEND,
            set_properties: IndexMap::new(),
        }
    }
}

impl LoopState {
    /// An empty state that only sets its skin id.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component active only while in this state.
    pub fn with_component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    /// Run a command when the state is entered.
    pub fn with_entry_command(mut self, command: impl Into<String>) -> Self {
        self.entry_commands.push(command.into());
        self
    }

    /// Run a command when the state is left.
    pub fn with_exit_command(mut self, command: impl Into<String>) -> Self {
        self.exit_commands.push(command.into());
        self
    }

    /// Leave the state after `seconds`.
    ///
    /// The timer moves to the next state, or back to the first one from
    /// the last state, unless [`LoopState::with_timer_target`] names another.
    pub fn with_timer(mut self, seconds: f64) -> Self {
        self.timer = Some(seconds);
        self
    }

    /// Send the timer to a named state instead of the next one.
    pub fn with_timer_target(mut self, name: impl Into<String>) -> Self {
        self.timer_target = Some(name.into());
        self
    }

    /// Close the loop: entering the first state again clears this one.
    pub fn with_last(mut self, last: bool) -> Self {
        self.last = last;
        self
    }

    /// Give the state a name that timers and connections can refer to.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Declare a jump from this state to a named one; the target's event
    /// then also removes this state's group.
    pub fn with_connection(mut self, name: impl Into<String>) -> Self {
        self.connections.push(name.into());
        self
    }

    /// Play an animation while in this state.
    pub fn with_animation(mut self, animation: impl Into<String>) -> Self {
        self.animation = Some(animation.into());
        self
    }

    /// When false, the animation runs to its end even if the state changes.
    pub fn with_end_animation_with_state(mut self, end: bool) -> Self {
        self.end_animation_with_state = end;
        self
    }

    /// Seconds to blend out of the animation.
    pub fn with_blend(mut self, seconds: f64) -> Self {
        self.blend = seconds;
        self
    }

    /// Set an entity property when the state is entered. Properties of the
    /// first state are also applied on spawn.
    pub fn with_set_property(
        mut self,
        property: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.set_properties.insert(property.into(), value.into());
        self
    }

    /// The state's name, if it has one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Name of the group and event for state `index`.
pub fn state_name(index: usize) -> String {
    format!("state_{index}")
}

/// What a sequence of loop states compiles to.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct LoopExpansion {
    pub lowered: LoweredBehavior,
    /// Runs entry and exit commands; bound in the behavior document.
    pub commands: Option<AnimationController>,
    /// Plays state animations; bound in the client entity.
    pub animations: Option<AnimationController>,
}

/// Expand `states` for the entity whose bare name is `owner`.
pub(crate) fn expand(owner: &str, states: &[LoopState]) -> BwResult<LoopExpansion> {
    let mut names: IndexMap<&str, usize> = IndexMap::new();
    for (index, state) in states.iter().enumerate() {
        if let Some(name) = state.name() {
            names.insert(name, index);
        }
    }
    let resolve = |target: &str| -> BwResult<usize> {
        if let Some(index) = names.get(target) {
            return Ok(*index);
        }
        target
            .strip_prefix("state_")
            .and_then(|n| n.parse::<usize>().ok())
            .filter(|n| *n < states.len())
            .ok_or_else(|| BwError::InvalidComponent {
                component: "loop state",
                reason: format!("no state named \"{target}\""),
            })
    };

    let mut expansion = LoopExpansion::default();
    let mut command_init = ControllerState::new();
    let mut command_states = Vec::new();
    let mut animation_init = ControllerState::new();
    let mut animation_states = Vec::new();
    // (event to patch, group it removes)
    let mut removals: Vec<(usize, usize)> = Vec::new();

    for (index, state) in states.iter().enumerate() {
        let current = state_name(index);
        let skin = i64::try_from(index).map_err(|_| BwError::InvalidComponent {
            component: "loop state",
            reason: format!("too many states ({})", states.len()),
        })?;

        let mut group = ComponentGroup::new(current.clone()).with_component(vanilla::skin_id(skin));
        let mut connections: Vec<usize> = Vec::new();
        if let Some(seconds) = state.timer {
            let next = match &state.timer_target {
                Some(target) => {
                    let resolved = resolve(target)?;
                    connections.push(resolved);
                    resolved
                }
                None if state.last || index + 1 == states.len() => 0,
                None => index + 1,
            };
            group.add_component(vanilla::timer(seconds, &state_name(next)));
        }
        for component in &state.components {
            group.add_component(component.clone());
        }
        expansion.lowered.groups.insert(current.clone(), group);

        let mut event = EventDefinition::new().with_add_group(current.clone());
        if index > 0 {
            event.remove_group(state_name(index - 1));
        }
        for (property, value) in &state.set_properties {
            event.set_property(property, value.clone());
        }
        expansion.lowered.events.insert(current.clone(), event);

        if index == 0 && !state.set_properties.is_empty() {
            let mut spawn = EventDefinition::new();
            for (property, value) in &state.set_properties {
                spawn.set_property(property, value.clone());
            }
            expansion.lowered.events.insert(SPAWN_EVENT.to_string(), spawn);
        }
        if state.last && index > 0 {
            removals.push((0, index));
        }
        for target in &state.connections {
            connections.push(resolve(target)?);
        }
        removals.extend(connections.into_iter().map(|target| (target, index)));

        let leave = format!("query.skin_id!={index}");
        let enter = format!("query.skin_id=={index}");
        if !state.entry_commands.is_empty() || !state.exit_commands.is_empty() {
            let mut controller_state =
                ControllerState::new().with_transition("init", leave.clone());
            for command in &state.entry_commands {
                controller_state = controller_state.with_entry_command(command.clone());
            }
            for command in &state.exit_commands {
                controller_state = controller_state.with_exit_command(command.clone());
            }
            command_states.push((current.clone(), controller_state));
            command_init = command_init.with_transition(current.clone(), enter.clone());
        }
        if let Some(animation) = &state.animation {
            let exit = if state.end_animation_with_state {
                leave
            } else {
                "query.all_animations_finished".to_string()
            };
            let controller_state = ControllerState::new()
                .with_transition("init", exit)
                .with_animation(animation.clone())
                .with_blend_transition(state.blend);
            animation_states.push((current.clone(), controller_state));
            animation_init = animation_init.with_transition(current, enter);
        }
    }

    for (target, removed) in removals {
        if let Some(event) = expansion.lowered.events.get_mut(&state_name(target)) {
            event.remove_group(state_name(removed));
        }
    }

    expansion.commands = controller(owner, "loop_commands", command_init, command_states);
    expansion.animations = controller(owner, "loop_animations", animation_init, animation_states);
    tracing::debug!(
        entity = owner,
        states = states.len(),
        commands = expansion.commands.is_some(),
        animations = expansion.animations.is_some(),
        "loop states expanded"
    );
    Ok(expansion)
}

fn controller(
    owner: &str,
    suffix: &str,
    init: ControllerState,
    states: Vec<(String, ControllerState)>,
) -> Option<AnimationController> {
    if states.is_empty() {
        return None;
    }
    let mut controller = AnimationController::new(format!("controller.animation.{owner}_{suffix}"))
        .with_state("init", init);
    for (name, state) in states {
        controller.add_state(name, state);
    }
    Some(controller)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn groups_json(expansion: &LoopExpansion) -> Value {
        let groups: serde_json::Map<String, Value> = expansion
            .lowered
            .groups
            .iter()
            .map(|(name, g)| (name.clone(), g.to_json()))
            .collect();
        Value::Object(groups)
    }

    #[test]
    fn timers_chain_and_wrap() {
        let states = [
            LoopState::new().with_timer(2.0),
            LoopState::new().with_timer(3.0),
            LoopState::new().with_timer(1.0).with_last(true),
        ];
        let expansion = expand("golem", &states).unwrap();
        let groups = groups_json(&expansion);
        assert_eq!(groups["state_0"]["minecraft:skin_id"]["value"], 0);
        assert_eq!(groups["state_2"]["minecraft:skin_id"]["value"], 2);
        assert_eq!(groups["state_0"]["minecraft:timer"]["time_down_event"]["event"], "state_1");
        assert_eq!(groups["state_1"]["minecraft:timer"]["time_down_event"]["event"], "state_2");
        assert_eq!(groups["state_2"]["minecraft:timer"]["time_down_event"]["event"], "state_0");

        let events = &expansion.lowered.events;
        assert_eq!(events["state_1"].add_groups(), ["state_1"]);
        assert_eq!(events["state_1"].remove_groups(), ["state_0"]);
        assert_eq!(events["state_0"].remove_groups(), ["state_2"]);
        assert!(expansion.commands.is_none());
        assert!(expansion.animations.is_none());
    }

    #[test]
    fn named_timer_target_and_connections() {
        let states = [
            LoopState::new().named("idle").with_timer(5.0),
            LoopState::new().named("walk").with_timer(4.0).with_timer_target("idle"),
            LoopState::new().named("attack").with_connection("idle"),
        ];
        let expansion = expand("golem", &states).unwrap();
        let groups = groups_json(&expansion);
        assert_eq!(groups["state_1"]["minecraft:timer"]["time_down_event"]["event"], "state_0");
        assert_eq!(expansion.lowered.events["state_0"].remove_groups(), ["state_1", "state_2"]);
    }

    #[test]
    fn unknown_name_rejected() {
        let states = [LoopState::new().with_connection("nowhere")];
        let err = expand("golem", &states).unwrap_err();
        assert!(err.to_string().contains("nowhere"));
    }

    #[test]
    fn command_controller_tracks_skin_id() {
        let states = [
            LoopState::new().with_entry_command("/say start"),
            LoopState::new(),
            LoopState::new().with_exit_command("/say done"),
        ];
        let controller = expand("golem", &states).unwrap().commands.unwrap();
        assert_eq!(controller.identifier(), "controller.animation.golem_loop_commands");
        let json = controller.get_json();
        let body = &json["animation_controllers"]["controller.animation.golem_loop_commands"];
        assert_eq!(body["initial_state"], "init");
        assert_eq!(
            body["states"]["init"]["transitions"],
            json!([{ "state_0": "query.skin_id==0" }, { "state_2": "query.skin_id==2" }])
        );
        assert_eq!(body["states"]["state_0"]["on_entry"], json!(["/say start"]));
        assert_eq!(body["states"]["state_2"]["on_exit"], json!(["/say done"]));
        assert_eq!(
            body["states"]["state_2"]["transitions"],
            json!([{ "init": "query.skin_id!=2" }])
        );
        assert!(!controller.has_state("state_1"));
        assert!(controller.dangling_transitions().is_empty());
    }

    #[test]
    fn animation_controller_blends() {
        let states = [
            LoopState::new().with_animation("spin"),
            LoopState::new()
                .with_animation("slam")
                .with_end_animation_with_state(false)
                .with_blend(0.5),
        ];
        let controller = expand("golem", &states).unwrap().animations.unwrap();
        let slam = controller.state("state_1").unwrap().to_json();
        assert_eq!(slam["animations"], json!(["slam"]));
        assert_eq!(slam["blend_transition"], 0.5);
        assert_eq!(slam["transitions"], json!([{ "init": "query.all_animations_finished" }]));
        let spin = controller.state("state_0").unwrap().to_json();
        assert_eq!(spin["blend_transition"], 0.2);
    }

    #[test]
    fn first_state_properties_apply_on_spawn() {
        let states = [
            LoopState::new().with_set_property("phase", "calm"),
            LoopState::new().with_set_property("phase", "angry"),
        ];
        let events = expand("golem", &states).unwrap().lowered.events;
        let spawn = events[SPAWN_EVENT].to_json();
        assert_eq!(spawn["set_property"]["property:phase"], "'calm'");
        let state_1 = events["state_1"].to_json();
        assert_eq!(state_1["set_property"]["property:phase"], "'angry'");
    }
}
