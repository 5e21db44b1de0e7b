use crate::identifier::Identifier;

/// Alias for `Result<T, BwError>`.
pub type BwResult<T> = Result<T, BwError>;

/// Errors that can occur while building or compiling add-on content.
///
/// Compilation fails fast: the first error aborts `get_json()` and no
/// partial document is returned.
#[derive(Debug, thiserror::Error)]
pub enum BwError {
    /// A namespace or name is empty or contains characters the engine rejects.
    #[error("invalid identifier \"{value}\": {reason}")]
    InvalidIdentifier {
        /// The offending text.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A declaration collided with an existing one while strict mode was on.
    #[error("duplicate {kind} declaration: \"{identifier}\"")]
    DuplicateDeclaration {
        /// What was declared twice (component, event, behavior, ...).
        kind: &'static str,
        /// The colliding key.
        identifier: String,
    },

    /// A command could not be lowered into a component and event.
    #[error("cannot compile command \"{command}\": {reason}")]
    CommandCompilation {
        /// The command as far as it could be rendered.
        command: String,
        /// What went wrong.
        reason: String,
    },

    /// A behavior references an animation state the entity graphics do not define.
    #[error("entity {entity} references animation state \"{state}\" with no graphics binding")]
    MissingGraphicsReference {
        /// The entity being compiled.
        entity: Identifier,
        /// The unresolved animation state name.
        state: String,
    },

    /// A component or builder received inconsistent arguments.
    #[error("invalid {component} component: {reason}")]
    InvalidComponent {
        /// The component type being built.
        component: &'static str,
        /// What was wrong with the arguments.
        reason: String,
    },

    /// A document could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BwError {
    pub(crate) fn invalid_identifier(value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn command(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CommandCompilation {
            command: command.into(),
            reason: reason.into(),
        }
    }
}
