use serde_json::{Map, Value, json};

use crate::error::{BwError, BwResult};

/// The value space of an entity property.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKind {
    /// An integer in `min..=max`.
    IntRange {
        /// Lowest allowed value.
        min: i64,
        /// Highest allowed value.
        max: i64,
        /// Starting value.
        default: i64,
    },
    /// `true` or `false`.
    Bool {
        /// Starting value.
        default: bool,
    },
    /// One of a fixed list of values.
    Enum {
        /// Allowed values, in order.
        values: Vec<Value>,
        /// Starting value; must be one of `values`.
        default: Value,
    },
}

/// A piece of per-entity state the engine stores and events can change.
///
/// Emitted under `description.properties` as `property:<name>`.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityProperty {
    name: String,
    kind: PropertyKind,
    client_sync: bool,
}

impl EntityProperty {
    /// An integer property. Fails if `default` lies outside `min..=max`.
    pub fn int_range(name: impl Into<String>, min: i64, max: i64, default: i64) -> BwResult<Self> {
        if min > max || !(min..=max).contains(&default) {
            return Err(invalid(format!(
                "default {default} outside range {min}..={max}"
            )));
        }
        Ok(Self::with_kind(name, PropertyKind::IntRange { min, max, default }))
    }

    /// A boolean property.
    pub fn boolean(name: impl Into<String>, default: bool) -> Self {
        Self::with_kind(name, PropertyKind::Bool { default })
    }

    /// An enum property. Fails if `default` is not among `values`.
    pub fn enumeration(
        name: impl Into<String>,
        values: Vec<Value>,
        default: impl Into<Value>,
    ) -> BwResult<Self> {
        let default = default.into();
        if !values.contains(&default) {
            return Err(invalid(format!("default {default} is not an allowed value")));
        }
        Ok(Self::with_kind(name, PropertyKind::Enum { values, default }))
    }

    fn with_kind(name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            kind,
            client_sync: false,
        }
    }

    /// Sync the value to clients so resource packs can read it.
    pub fn with_client_sync(mut self, sync: bool) -> Self {
        self.client_sync = sync;
        self
    }

    /// The bare property name, without the `property:` prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value space.
    pub fn kind(&self) -> &PropertyKind {
        &self.kind
    }

    /// The engine JSON for this property's declaration.
    pub fn to_json(&self) -> Value {
        let mut obj = Map::new();
        match &self.kind {
            PropertyKind::IntRange { min, max, default } => {
                obj.insert("range".into(), json!([min, max]));
                obj.insert("default".into(), json!(default));
                obj.insert("type".into(), json!("int"));
            }
            PropertyKind::Bool { default } => {
                obj.insert("values".into(), json!([false, true]));
                obj.insert("default".into(), json!(default));
                obj.insert("type".into(), json!("bool"));
            }
            PropertyKind::Enum { values, default } => {
                obj.insert("values".into(), json!(values));
                obj.insert("default".into(), default.clone());
                obj.insert("type".into(), json!("enum"));
            }
        }
        if self.client_sync {
            obj.insert("client_sync".into(), json!(true));
        }
        Value::Object(obj)
    }
}

fn invalid(reason: String) -> BwError {
    BwError::InvalidComponent {
        component: "entity property",
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_range_json() {
        let prop = EntityProperty::int_range("level", 0, 10, 5).unwrap();
        assert_eq!(
            prop.to_json(),
            json!({ "range": [0, 10], "default": 5, "type": "int" })
        );
    }

    #[test]
    fn int_range_default_checked() {
        assert!(EntityProperty::int_range("level", 0, 10, 11).is_err());
        assert!(EntityProperty::int_range("level", 5, 1, 3).is_err());
    }

    #[test]
    fn bool_with_client_sync() {
        let prop = EntityProperty::boolean("angry", false).with_client_sync(true);
        assert_eq!(
            prop.to_json(),
            json!({
                "values": [false, true],
                "default": false,
                "type": "bool",
                "client_sync": true,
            })
        );
    }

    #[test]
    fn enum_accepts_mixed_values() {
        let prop =
            EntityProperty::enumeration("mood", vec![json!("hi"), json!("bye")], "hi").unwrap();
        assert_eq!(prop.to_json()["values"], json!(["hi", "bye"]));
        let stages = vec![json!(1), json!(3), json!(5)];
        let prop = EntityProperty::enumeration("stage", stages, 1).unwrap();
        assert_eq!(prop.to_json()["values"], json!([1, 3, 5]));
    }

    #[test]
    fn enum_default_checked() {
        let err = EntityProperty::enumeration("mood", vec![json!("hi")], "meh").unwrap_err();
        assert!(err.to_string().contains("not an allowed value"));
    }
}
