use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `%key` substitutions applied to compiled documents.
///
/// A string that is exactly `%key` becomes the variable's JSON value, so a
/// number stays a number. Any other occurrence of `%key` inside a string is
/// replaced with the value's text. Keys are applied in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StringVariables {
    vars: IndexMap<String, Value>,
}

impl StringVariables {
    /// No variables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Define or redefine a variable.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Builder form of [`StringVariables::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Look up a variable.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.vars.get(key)
    }

    /// Variables in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns true if no variables are defined.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Substitute every variable throughout `doc`, in place.
    pub fn apply(&self, doc: &mut Value) {
        if self.is_empty() {
            return;
        }
        match doc {
            Value::String(s) => {
                if let Some(replacement) = self.substitute(s) {
                    *doc = replacement;
                }
            }
            Value::Array(items) => items.iter_mut().for_each(|v| self.apply(v)),
            Value::Object(map) => map.values_mut().for_each(|v| self.apply(v)),
            _ => {}
        }
    }

    fn substitute(&self, s: &str) -> Option<Value> {
        let mut current = s.to_string();
        let mut changed = false;
        for (key, value) in &self.vars {
            let pattern = format!("%{key}");
            if current == pattern {
                // A whole-string match may swap in a non-string value, which
                // ends substitution for this string.
                match value {
                    Value::String(text) => {
                        current.clone_from(text);
                        changed = true;
                        continue;
                    }
                    other => return Some(other.clone()),
                }
            }
            if current.contains(&pattern) {
                current = current.replace(&pattern, &value_text(value));
                changed = true;
            }
        }
        changed.then_some(Value::String(current))
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for StringVariables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vars = Self::new();
        for (k, v) in iter {
            vars.set(k, v);
        }
        vars
    }
}
