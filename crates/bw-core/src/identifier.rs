use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{BwError, BwResult};

/// The namespace every vanilla engine component and event lives in.
pub const MINECRAFT: &str = "minecraft";

/// A canonical `namespace:name` address.
///
/// Both halves must be non-empty and may only contain ASCII letters,
/// digits, `_`, `-` and `.`. Identifiers are immutable once built and
/// compare by value, so they work as map keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier {
    namespace: String,
    name: String,
}

impl Identifier {
    /// Build an identifier from an explicit namespace and name.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> BwResult<Self> {
        let namespace = namespace.into();
        let name = name.into();
        validate_part(&namespace, "namespace")?;
        validate_part(&name, "name")?;
        Ok(Self { namespace, name })
    }

    /// Build an identifier in the `minecraft` namespace.
    pub fn minecraft(name: impl Into<String>) -> BwResult<Self> {
        Self::new(MINECRAFT, name)
    }

    /// Built-in engine names known to be valid at compile time.
    pub(crate) fn vanilla(name: &'static str) -> Self {
        debug_assert!(validate_part(name, "name").is_ok(), "bad vanilla name {name}");
        Self {
            namespace: MINECRAFT.to_string(),
            name: name.to_string(),
        }
    }

    /// Parse the canonical `namespace:name` form.
    pub fn parse(s: &str) -> BwResult<Self> {
        let (namespace, name) = s
            .split_once(':')
            .ok_or_else(|| BwError::invalid_identifier(s, "expected \"namespace:name\""))?;
        Self::new(namespace, name)
    }

    /// The namespace half.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The name half.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a copy of this identifier with a different name in the same namespace.
    pub fn with_name(&self, name: impl Into<String>) -> BwResult<Self> {
        Self::new(self.namespace.clone(), name)
    }
}

fn validate_part(part: &str, which: &str) -> BwResult<()> {
    if part.is_empty() {
        return Err(BwError::invalid_identifier(part, format!("{which} is empty")));
    }
    if let Some(bad) = part.chars().find(|c| !is_allowed(*c)) {
        return Err(BwError::invalid_identifier(
            part,
            format!("{which} contains disallowed character {bad:?}"),
        ));
    }
    Ok(())
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.name)
    }
}

impl FromStr for Identifier {
    type Err = BwError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn display_joins_with_colon() {
        let id = Identifier::new("testspace", "goblin").unwrap();
        assert_eq!(id.to_string(), "testspace:goblin");
    }

    #[test]
    fn empty_namespace_rejected() {
        let err = Identifier::new("", "goblin").unwrap_err();
        assert!(matches!(err, BwError::InvalidIdentifier { .. }));
    }

    #[test]
    fn empty_name_rejected() {
        assert!(Identifier::new("testspace", "").is_err());
    }

    #[test]
    fn disallowed_characters_rejected() {
        assert!(Identifier::new("test space", "goblin").is_err());
        assert!(Identifier::new("testspace", "gob:lin").is_err());
        assert!(Identifier::new("testspace", "gob/lin").is_err());
    }

    #[test]
    fn dotted_component_names_allowed() {
        let id = Identifier::minecraft("behavior.random_stroll").unwrap();
        assert_eq!(id.to_string(), "minecraft:behavior.random_stroll");
    }

    #[test]
    fn parse_requires_separator() {
        assert!(Identifier::parse("goblin").is_err());
        assert!(Identifier::parse("a:b:c").is_err());
    }

    #[test]
    fn serde_uses_canonical_string() {
        let id = Identifier::new("testspace", "goblin").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"testspace:goblin\"");
        let back: Identifier = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    proptest! {
        #[test]
        fn display_then_parse_round_trips(
            namespace in "[a-z0-9_.-]{1,12}",
            name in "[A-Za-z0-9_.-]{1,16}",
        ) {
            let id = Identifier::new(namespace.clone(), name.clone()).unwrap();
            let text = id.to_string();
            prop_assert_eq!(&text, &format!("{namespace}:{name}"));
            prop_assert_eq!(Identifier::parse(&text).unwrap(), id);
        }
    }
}
