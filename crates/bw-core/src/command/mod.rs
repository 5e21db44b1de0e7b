//! Structured engine commands and their lowering into component + event pairs.

/// Builders for the common slash commands.
pub mod builders;
/// Target selector builder (`@e[tag=...]`).
pub mod selector;

use std::fmt;

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde_json::json;

use crate::component::{Component, ComponentMap};
use crate::error::{BwError, BwResult};
use crate::event::EventDefinition;
use crate::identifier::Identifier;

pub use builders::{
    EffectAction, ExecuteDetect, Position, SummonOrientation, TagMode, TpDestination, TpFacing,
    effect, event, execute, kill, summon, summon_rider, tag, tp,
};
pub use selector::{Selector, SelectorBase};

/// What kind of value a placeholder accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderKind {
    /// Any single token.
    Text,
    /// A plain number.
    Number,
    /// A target selector (`@p`, `@e[...]`) or a player name.
    Selector,
    /// A world coordinate: a number, optionally prefixed with `~` or `^`.
    Coordinate,
}

impl PlaceholderKind {
    /// Parse the `kind` part of a `{name:kind}` placeholder.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "text" => Some(Self::Text),
            "number" => Some(Self::Number),
            "selector" => Some(Self::Selector),
            "coordinate" | "coord" => Some(Self::Coordinate),
            _ => None,
        }
    }

    fn accepts(self, value: &str) -> bool {
        if value.is_empty() {
            return false;
        }
        match self {
            Self::Text => true,
            Self::Number => value.parse::<f64>().is_ok(),
            Self::Selector => {
                value.starts_with('@') || !value.chars().any(char::is_whitespace)
            }
            Self::Coordinate => {
                let rest = value.strip_prefix(|c| c == '~' || c == '^').unwrap_or(value);
                rest.is_empty() || rest.parse::<f64>().is_ok()
            }
        }
    }
}

impl fmt::Display for PlaceholderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Number => write!(f, "number"),
            Self::Selector => write!(f, "selector"),
            Self::Coordinate => write!(f, "coordinate"),
        }
    }
}

/// One argument of a command: fixed text or a value bound later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandArgument {
    /// Emitted verbatim.
    Literal(String),
    /// Replaced by the bound value at compile time.
    Placeholder {
        /// Binding name.
        name: String,
        /// Accepted value shape.
        kind: PlaceholderKind,
    },
}

impl fmt::Display for CommandArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(s) => write!(f, "{s}"),
            Self::Placeholder { name, .. } => write!(f, "{{{name}}}"),
        }
    }
}

/// The run target used when a command fires from an item.
pub const DEFAULT_COMMAND_TARGET: &str = "holder";

/// An engine command: an action followed by ordered arguments.
///
/// A command has no JSON form of its own. It only appears in a document once
/// an owning item or behavior lowers it with [`Command::compile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    action: String,
    parameters: Vec<CommandArgument>,
    bindings: IndexMap<String, String>,
    target: String,
}

/// The result of lowering a command against a trigger.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandLowering {
    /// The trigger component, pointing at [`CommandLowering::event_name`].
    pub component: Component,
    /// The synthetic event's name.
    pub event_name: String,
    /// The event carrying the `run_command` payload.
    pub event: EventDefinition,
}

impl CommandLowering {
    /// Merge the pair into an owner's components and events.
    ///
    /// With `strict` set, neither the trigger component nor the event may
    /// already exist. Otherwise the trigger component is replaced, with a
    /// warning when the replaced payload differed, and the commands are
    /// appended to an existing event of the same name so earlier commands
    /// and event fields survive.
    pub fn merge_into(
        self,
        components: &mut ComponentMap,
        events: &mut IndexMap<String, EventDefinition>,
        strict: bool,
    ) -> BwResult<()> {
        if strict {
            components.insert_strict(self.component)?;
            return match events.entry(self.event_name) {
                Entry::Occupied(e) => Err(BwError::DuplicateDeclaration {
                    kind: "event",
                    identifier: e.key().clone(),
                }),
                Entry::Vacant(e) => {
                    e.insert(self.event);
                    Ok(())
                }
            };
        }

        match components.insert(self.component.clone()) {
            Some(previous) if previous != self.component => {
                tracing::warn!(
                    component = %previous.identifier(),
                    "declared trigger component replaced by a command"
                );
            }
            _ => {}
        }
        match events.entry(self.event_name) {
            Entry::Occupied(mut e) => e.get_mut().append_run_command(&self.event),
            Entry::Vacant(e) => {
                e.insert(self.event);
            }
        }
        Ok(())
    }
}

impl Command {
    /// A command with no arguments.
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            parameters: Vec::new(),
            bindings: IndexMap::new(),
            target: DEFAULT_COMMAND_TARGET.to_string(),
        }
    }

    /// A command with literal arguments.
    pub fn with_args<I, S>(action: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(action).args(args)
    }

    /// Parse command text such as `/give {who:selector} diamond 1`.
    ///
    /// Tokens split on whitespace, double-quoted runs stay one literal token
    /// (quotes included), and `{name}` or `{name:kind}` become placeholders.
    pub fn parse(text: &str) -> BwResult<Self> {
        let trimmed = text.trim();
        let body = trimmed.strip_prefix('/').unwrap_or(trimmed);
        let mut tokens = tokenize(body).map_err(|reason| BwError::command(text, reason))?;
        if tokens.is_empty() {
            return Err(BwError::command(text, "no action"));
        }
        let action = tokens.remove(0);
        let mut command = Self::new(action);
        for token in tokens {
            command.parameters.push(parse_argument(&token, text)?);
        }
        Ok(command)
    }

    /// Append a literal argument.
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.parameters.push(CommandArgument::Literal(value.into()));
        self
    }

    /// Append several literal arguments.
    pub fn args<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameters
            .extend(values.into_iter().map(|v| CommandArgument::Literal(v.into())));
        self
    }

    /// Append a placeholder argument.
    pub fn placeholder(mut self, name: impl Into<String>, kind: PlaceholderKind) -> Self {
        self.parameters.push(CommandArgument::Placeholder {
            name: name.into(),
            kind,
        });
        self
    }

    /// Bind a value for a placeholder. Rebinding replaces the old value.
    pub fn bind(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_binding(name, value);
        self
    }

    /// In-place form of [`Command::bind`].
    pub fn set_binding(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.bindings.insert(name.into(), value.into());
    }

    /// Who the command runs as once fired (`holder`, `self`, `other`, ...).
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// The command's action word, e.g. `say`.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// The ordered arguments.
    pub fn parameters(&self) -> &[CommandArgument] {
        &self.parameters
    }

    /// The run target.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Appends another command's action and arguments as trailing arguments,
    /// carrying its bindings over. Used by wrappers like `execute`.
    pub(crate) fn append_command(mut self, inner: Command) -> Self {
        self.parameters.push(CommandArgument::Literal(inner.action));
        self.parameters.extend(inner.parameters);
        for (name, value) in inner.bindings {
            self.bindings.entry(name).or_insert(value);
        }
        self
    }

    /// Render the command string, e.g. `/say hello`.
    ///
    /// Fails if the action is malformed or a placeholder has no valid binding.
    pub fn to_command_string(&self, include_slash: bool) -> BwResult<String> {
        self.check_action()?;
        let mut out = String::new();
        if include_slash {
            out.push('/');
        }
        out.push_str(&self.action);
        for param in &self.parameters {
            out.push(' ');
            match param {
                CommandArgument::Literal(s) => out.push_str(s),
                CommandArgument::Placeholder { name, kind } => {
                    let value = self.bindings.get(name).ok_or_else(|| {
                        let reason = format!("placeholder \"{name}\" is unbound");
                        BwError::command(self.to_string(), reason)
                    })?;
                    if !kind.accepts(value) {
                        return Err(BwError::command(
                            self.to_string(),
                            format!("value \"{value}\" is not a valid {kind} for \"{name}\""),
                        ));
                    }
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }

    /// Lower this command against `trigger` into a component and an event.
    ///
    /// The component is keyed by `trigger` and fires an event named after
    /// the trigger's name; the event runs the rendered command. The result
    /// depends only on the command and the trigger.
    pub fn compile(&self, trigger: &Identifier) -> BwResult<CommandLowering> {
        let command_string = self.to_command_string(true)?;
        let event_name = trigger.name().to_string();
        let component = Component::from_identifier(trigger.clone()).with_field(
            trigger.name(),
            json!({ "event": event_name, "target": "self" }),
        );
        let event = EventDefinition::new().with_run_command(vec![command_string], &self.target);
        tracing::trace!(%trigger, command = %self, "command lowered");
        Ok(CommandLowering {
            component,
            event_name,
            event,
        })
    }

    fn check_action(&self) -> BwResult<()> {
        let reason = if self.action.is_empty() {
            Some("action is empty")
        } else if self.action.starts_with('/') {
            Some("action must not include the leading slash")
        } else if self.action.trim() != self.action {
            Some("action has surrounding whitespace")
        } else if self.action.chars().any(char::is_control) {
            Some("action contains control characters")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(BwError::command(self.to_string(), reason)),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.action)?;
        for param in &self.parameters {
            write!(f, " {param}")?;
        }
        Ok(())
    }
}

fn tokenize(body: &str) -> Result<Vec<String>, &'static str> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for c in body.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if in_quotes {
        return Err("unterminated quote");
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    Ok(tokens)
}

fn parse_argument(token: &str, text: &str) -> BwResult<CommandArgument> {
    let Some(inner) = token.strip_prefix('{').and_then(|t| t.strip_suffix('}')) else {
        return Ok(CommandArgument::Literal(token.to_string()));
    };
    let (name, kind) = match inner.split_once(':') {
        Some((name, kind)) => {
            let kind = PlaceholderKind::parse(kind).ok_or_else(|| {
                BwError::command(text, format!("unknown placeholder kind \"{kind}\""))
            })?;
            (name, kind)
        }
        None => (inner, PlaceholderKind::Text),
    };
    if name.is_empty() {
        return Err(BwError::command(text, "placeholder has no name"));
    }
    Ok(CommandArgument::Placeholder {
        name: name.to_string(),
        kind,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn on_use() -> Identifier {
        Identifier::minecraft("on_use").unwrap()
    }

    #[test]
    fn renders_with_and_without_slash() {
        let cmd = Command::with_args("say", ["hello"]);
        assert_eq!(cmd.to_command_string(true).unwrap(), "/say hello");
        assert_eq!(cmd.to_command_string(false).unwrap(), "say hello");
    }

    #[test]
    fn merge_appends_to_existing_event() {
        let mut components = ComponentMap::new();
        let mut events = IndexMap::new();
        for word in ["one", "two"] {
            Command::with_args("say", [word])
                .compile(&on_use())
                .unwrap()
                .merge_into(&mut components, &mut events, false)
                .unwrap();
        }
        assert_eq!(components.len(), 1);
        assert_eq!(events["on_use"].run_commands(), ["/say one", "/say two"]);

        let again = Command::new("kill").compile(&on_use()).unwrap();
        let err = again.merge_into(&mut components, &mut events, true).unwrap_err();
        assert!(matches!(err, BwError::DuplicateDeclaration { kind: "component", .. }));
    }

    #[test]
    fn compile_produces_trigger_and_event() {
        let lowered = Command::with_args("say", ["hello"]).compile(&on_use()).unwrap();
        assert_eq!(lowered.component.identifier().to_string(), "minecraft:on_use");
        assert_eq!(
            lowered.component.to_json(),
            json!({ "on_use": { "event": "on_use", "target": "self" } })
        );
        assert_eq!(lowered.event_name, "on_use");
        assert_eq!(
            lowered.event.to_json(),
            json!({ "run_command": { "command": ["/say hello"], "target": "holder" } })
        );
    }

    #[test]
    fn compile_is_idempotent() {
        let cmd = Command::with_args("say", ["hello"]);
        assert_eq!(cmd.compile(&on_use()).unwrap(), cmd.compile(&on_use()).unwrap());
    }

    #[test]
    fn unbound_placeholder_fails() {
        let cmd = Command::new("kill").placeholder("victim", PlaceholderKind::Selector);
        let err = cmd.compile(&on_use()).unwrap_err();
        assert!(matches!(err, BwError::CommandCompilation { .. }));
        assert!(err.to_string().contains("victim"));
    }

    #[test]
    fn bound_placeholder_substituted() {
        let cmd = Command::new("kill")
            .placeholder("victim", PlaceholderKind::Selector)
            .bind("victim", "@e[type=pig]");
        assert_eq!(cmd.to_command_string(true).unwrap(), "/kill @e[type=pig]");
    }

    #[test]
    fn placeholder_kind_checked() {
        let cmd = Command::new("tp")
            .arg("@s")
            .placeholder("x", PlaceholderKind::Coordinate)
            .bind("x", "north");
        assert!(cmd.to_command_string(true).is_err());

        let cmd = cmd.bind("x", "~5");
        assert_eq!(cmd.to_command_string(true).unwrap(), "/tp @s ~5");
    }

    #[test]
    fn malformed_action_fails() {
        assert!(Command::new("").to_command_string(true).is_err());
        assert!(Command::new("/say").to_command_string(true).is_err());
        assert!(Command::new(" say").to_command_string(true).is_err());
    }

    #[test]
    fn parse_reads_quotes_and_placeholders() {
        let cmd = Command::parse("/summon {mob} 1 2 3 \"Big Bob\" {n:number}").unwrap();
        assert_eq!(cmd.action(), "summon");
        assert_eq!(cmd.parameters().len(), 6);
        assert_eq!(
            cmd.parameters()[4],
            CommandArgument::Literal("\"Big Bob\"".into())
        );
        assert_eq!(
            cmd.parameters()[5],
            CommandArgument::Placeholder {
                name: "n".into(),
                kind: PlaceholderKind::Number
            }
        );
        let rendered = cmd
            .bind("mob", "custom:goblin")
            .bind("n", "4")
            .to_command_string(true)
            .unwrap();
        assert_eq!(rendered, "/summon custom:goblin 1 2 3 \"Big Bob\" 4");
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(Command::parse("   ").is_err());
        assert!(Command::parse("/say \"open").is_err());
        assert!(Command::parse("/say {x:colour}").is_err());
    }

    #[test]
    fn custom_target_carried_into_event() {
        let lowered = Command::with_args("say", ["hi"])
            .with_target("self")
            .compile(&on_use())
            .unwrap();
        assert_eq!(lowered.event.to_json()["run_command"]["target"], "self");
    }
}
