use std::fmt;

use super::Command;

/// A world position; each axis may be absolute (`12`), relative (`~2`) or local (`^1`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    x: String,
    y: String,
    z: String,
}

impl Position {
    /// A position from any three displayable axis values.
    pub fn new(x: impl fmt::Display, y: impl fmt::Display, z: impl fmt::Display) -> Self {
        Self {
            x: x.to_string(),
            y: y.to_string(),
            z: z.to_string(),
        }
    }

    /// `~ ~ ~`: wherever the command runs.
    pub fn here() -> Self {
        Self::new("~", "~", "~")
    }

    fn push_onto(&self, cmd: Command) -> Command {
        cmd.args([self.x.as_str(), self.y.as_str(), self.z.as_str()])
    }
}

/// The optional `detect` clause of legacy `execute`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecuteDetect {
    /// Where to look for the block.
    pub position: Position,
    /// Block identifier, e.g. `stone`.
    pub block: String,
    /// Block data value.
    pub data: u32,
}

impl ExecuteDetect {
    /// Detect `block` (data 0) at the execution point.
    pub fn block(block: impl Into<String>) -> Self {
        Self {
            position: Position::here(),
            block: block.into(),
            data: 0,
        }
    }
}

/// `execute [selector] <x y z> [detect ...] <command>` in the legacy syntax.
pub fn execute(
    inner: Command,
    selector: Option<&str>,
    position: &Position,
    detect: Option<&ExecuteDetect>,
) -> Command {
    let mut cmd = Command::new("execute");
    if let Some(selector) = selector {
        cmd = cmd.arg(selector);
    }
    cmd = position.push_onto(cmd);
    if let Some(detect) = detect {
        cmd = detect.position.push_onto(cmd.arg("detect"));
        cmd = cmd.arg(detect.block.as_str()).arg(detect.data.to_string());
    }
    cmd.append_command(inner)
}

/// Where `tp` sends its victim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TpDestination {
    /// To another entity.
    Target(String),
    /// To a position.
    Position(Position),
}

/// Which way the victim faces after `tp`.
#[derive(Debug, Clone, PartialEq)]
pub enum TpFacing {
    /// Explicit rotation.
    Rotation {
        /// Pitch.
        x_rot: f64,
        /// Yaw.
        y_rot: f64,
    },
    /// Towards an entity.
    Selector(String),
    /// Towards a position.
    Position(Position),
}

/// `tp [victim] <destination> [facing] [check_for_blocks]`.
pub fn tp(
    victim: Option<&str>,
    destination: TpDestination,
    facing: Option<TpFacing>,
    check_for_blocks: bool,
) -> Command {
    let mut cmd = Command::new("tp");
    if let Some(victim) = victim {
        cmd = cmd.arg(victim);
    }
    cmd = match destination {
        TpDestination::Target(target) => cmd.arg(target),
        TpDestination::Position(pos) => pos.push_onto(cmd),
    };
    cmd = match facing {
        Some(TpFacing::Rotation { x_rot, y_rot }) => {
            cmd.args([x_rot.to_string(), y_rot.to_string()])
        }
        Some(TpFacing::Selector(selector)) => cmd.arg(selector),
        Some(TpFacing::Position(pos)) => pos.push_onto(cmd),
        None => cmd,
    };
    if check_for_blocks {
        cmd = cmd.arg("true");
    }
    cmd
}

/// What `effect` does to its targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectAction {
    /// Apply a potion effect.
    Apply {
        /// Effect name, e.g. `poison`.
        effect: String,
        /// Duration in seconds.
        duration: u32,
        /// Amplifier level.
        level: u32,
        /// Suppress the particle swirl.
        hide_particles: bool,
    },
    /// Remove every effect.
    Clear,
}

impl EffectAction {
    /// Apply `effect` for one second at level one.
    pub fn apply(effect: impl Into<String>) -> Self {
        Self::Apply {
            effect: effect.into(),
            duration: 1,
            level: 1,
            hide_particles: false,
        }
    }
}

/// `effect <selector> <effect> <duration> <level> [hide]` or `effect <selector> clear`.
pub fn effect(selector: &str, action: EffectAction) -> Command {
    let cmd = Command::new("effect").arg(selector);
    match action {
        EffectAction::Clear => cmd.arg("clear"),
        EffectAction::Apply {
            effect,
            duration,
            level,
            hide_particles,
        } => {
            let cmd = cmd
                .arg(effect)
                .arg(duration.to_string())
                .arg(level.to_string());
            if hide_particles { cmd.arg("true") } else { cmd }
        }
    }
}

/// Orientation of a freshly summoned entity.
#[derive(Debug, Clone, PartialEq)]
pub enum SummonOrientation {
    /// Explicit rotation.
    Rotation {
        /// Yaw.
        y_rot: f64,
        /// Pitch.
        x_rot: f64,
    },
    /// Face an entity.
    FacingTarget(String),
    /// Face a position.
    FacingPosition(Position),
}

/// `summon <entity> ...`.
///
/// With only a name (no orientation or spawn event) the short form
/// `summon <entity> "<name>" [position]` is used. Otherwise the long form
/// `summon <entity> <position> [orientation] [spawn_event] ["<name>"]`,
/// defaulting the position to `~ ~ ~` when omitted.
pub fn summon(
    entity_id: &str,
    position: Option<&Position>,
    orientation: Option<&SummonOrientation>,
    spawn_event: Option<&str>,
    name: Option<&str>,
) -> Command {
    let cmd = Command::new("summon").arg(entity_id);
    if orientation.is_none() && spawn_event.is_none() {
        let cmd = match name {
            Some(name) => cmd.arg(format!("\"{name}\"")),
            None => cmd,
        };
        return match position {
            Some(pos) => pos.push_onto(cmd),
            None => cmd,
        };
    }
    let here = Position::here();
    let mut cmd = position.unwrap_or(&here).push_onto(cmd);
    cmd = match orientation {
        Some(SummonOrientation::Rotation { y_rot, x_rot }) => {
            cmd.args([y_rot.to_string(), x_rot.to_string()])
        }
        Some(SummonOrientation::FacingTarget(target)) => cmd.arg("facing").arg(target.as_str()),
        Some(SummonOrientation::FacingPosition(pos)) => pos.push_onto(cmd.arg("facing")),
        None => cmd,
    };
    if let Some(event) = spawn_event {
        cmd = cmd.arg(event);
    }
    if let Some(name) = name {
        cmd = cmd.arg(format!("\"{name}\""));
    }
    cmd
}

/// What `tag` does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagMode {
    /// Add a tag.
    Add(String),
    /// Remove a tag.
    Remove(String),
    /// List tags.
    List,
}

/// `tag <selector> add|remove <tag>` or `tag <selector> list`.
pub fn tag(selector: &str, mode: TagMode) -> Command {
    let cmd = Command::new("tag").arg(selector);
    match mode {
        TagMode::Add(tag) => cmd.arg("add").arg(tag),
        TagMode::Remove(tag) => cmd.arg("remove").arg(tag),
        TagMode::List => cmd.arg("list"),
    }
}

/// `ride <target> summon_rider <rider> [spawn_event ["<nametag>"]]`.
///
/// A nametag can only follow a spawn event, so it is ignored without one.
pub fn summon_rider(
    target: &str,
    rider_type: &str,
    spawn_event: Option<&str>,
    nametag: Option<&str>,
) -> Command {
    let cmd = Command::new("ride")
        .arg(target)
        .arg("summon_rider")
        .arg(rider_type);
    match (spawn_event, nametag) {
        (Some(event), Some(tag)) => cmd.arg(event).arg(format!("\"{tag}\"")),
        (Some(event), None) => cmd.arg(event),
        (None, _) => cmd,
    }
}

/// `event entity <selector> <event>`.
pub fn event(selector: &str, event_name: &str) -> Command {
    Command::new("event")
        .arg("entity")
        .arg(selector)
        .arg(event_name)
}

/// `kill <selector>`.
pub fn kill(selector: &str) -> Command {
    Command::new("kill").arg(selector)
}
