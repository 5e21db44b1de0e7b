use indexmap::IndexMap;
use serde_json::{Value, json};

use crate::command::Command;
use crate::component::{Component, ComponentMap};
use crate::config::CompileConfig;
use crate::error::{BwError, BwResult};
use crate::event::EventDefinition;
use crate::identifier::Identifier;
use crate::vanilla;

/// Creative-inventory category used unless one is set.
pub const DEFAULT_CATEGORY: &str = "Items";

/// Components whose string fields back the item's name and icon.
const BACKING_FIELDS: [(&str, &str); 2] = [("display_name", "value"), ("icon", "texture")];

/// A custom item type.
///
/// The display name and icon texture are stored only in the item's
/// `minecraft:display_name` and `minecraft:icon` components. The setters
/// write into those payloads and the getters read back from them, so the
/// values seen through the API are always the values that get compiled.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    identifier: Identifier,
    category: String,
    components: ComponentMap,
    events: IndexMap<String, EventDefinition>,
    on_use_command: Option<Command>,
}

impl Item {
    /// An item `namespace:id` shown as `name`, with the icon texture `id`.
    pub fn new(namespace: &str, id: &str, name: &str) -> BwResult<Self> {
        let identifier = Identifier::new(namespace, id)?;
        let mut components = ComponentMap::new();
        components.insert(vanilla::display_name(name));
        components.insert(vanilla::icon(id));
        Ok(Self {
            identifier,
            category: DEFAULT_CATEGORY.to_string(),
            components,
            events: IndexMap::new(),
            on_use_command: None,
        })
    }

    /// An item whose id is derived from its display name: lowercased, with
    /// spaces turned into underscores.
    pub fn from_display_name(namespace: &str, name: &str) -> BwResult<Self> {
        let id = name.to_lowercase().replace(' ', "_");
        Self::new(namespace, &id, name)
    }

    /// The item's identifier.
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// The display name, read from the `minecraft:display_name` payload.
    pub fn name(&self) -> &str {
        self.payload_str("display_name", "value")
    }

    /// Set the display name; writes through to `minecraft:display_name`.
    pub fn set_name(&mut self, name: &str) {
        self.write_through("display_name", "value", name);
    }

    /// The icon texture, read from the `minecraft:icon` payload.
    pub fn texture_name(&self) -> &str {
        self.payload_str("icon", "texture")
    }

    /// Set the icon texture; writes through to `minecraft:icon`.
    pub fn set_texture_name(&mut self, texture: &str) {
        self.write_through("icon", "texture", texture);
    }

    /// The creative-inventory category.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Set the creative-inventory category.
    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    /// Insert or overwrite a component.
    ///
    /// A replacement `minecraft:display_name` must carry a string `value` and
    /// a replacement `minecraft:icon` a string `texture`, since those fields
    /// back [`Item::name`] and [`Item::texture_name`].
    pub fn add_component(&mut self, component: Component) -> BwResult<()> {
        for (name, key) in BACKING_FIELDS {
            if component.identifier() != &Identifier::vanilla(name) {
                continue;
            }
            if !component.field(key).is_some_and(Value::is_string) {
                return Err(BwError::InvalidComponent {
                    component: name,
                    reason: format!("`{key}` must be a string"),
                });
            }
        }
        self.components.insert(component);
        Ok(())
    }

    /// Insert or overwrite an event.
    pub fn add_event(&mut self, name: impl Into<String>, event: EventDefinition) {
        self.events.insert(name.into(), event);
    }

    /// Run `command` when the item is used. Replaces any previous command.
    pub fn set_on_use_command(&mut self, command: Command) {
        self.on_use_command = Some(command);
    }

    /// Stop running a command on use.
    pub fn clear_on_use_command(&mut self) -> Option<Command> {
        self.on_use_command.take()
    }

    /// The command run on use, if any.
    pub fn on_use_command(&self) -> Option<&Command> {
        self.on_use_command.as_ref()
    }

    /// Compile with the default configuration.
    pub fn get_json(&self) -> BwResult<Value> {
        self.get_json_with(&CompileConfig::default())
    }

    /// Compile the `minecraft:item` document.
    ///
    /// An on-use command is lowered against the fixed `minecraft:on_use`
    /// trigger and merged into the components and events. Under
    /// `strict_declarations` that merge fails if the item already declares
    /// the trigger component or its event.
    pub fn get_json_with(&self, config: &CompileConfig) -> BwResult<Value> {
        let mut components = self.components.clone();
        let mut events = self.events.clone();
        if let Some(command) = &self.on_use_command {
            command.compile(&Identifier::vanilla("on_use"))?.merge_into(
                &mut components,
                &mut events,
                config.strict_declarations,
            )?;
        }

        let events: serde_json::Map<String, Value> = events
            .iter()
            .map(|(name, e)| (name.clone(), e.to_json()))
            .collect();
        tracing::debug!(
            item = %self.identifier,
            components = components.len(),
            events = events.len(),
            "item compiled"
        );
        Ok(json!({
            "format_version": config.item_format_version,
            "minecraft:item": {
                "description": {
                    "identifier": self.identifier,
                    "category": self.category,
                },
                "components": components.to_json(),
                "events": events,
            },
        }))
    }

    fn payload_str(&self, component: &'static str, key: &str) -> &str {
        self.components
            .get(&Identifier::vanilla(component))
            .and_then(|c| c.field(key))
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    fn write_through(&mut self, component: &'static str, key: &str, value: &str) {
        let id = Identifier::vanilla(component);
        match self.components.get_mut(&id) {
            Some(c) => c.add_field(key, value),
            None => {
                self.components
                    .insert(Component::from_identifier(id).with_field(key, value));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn item() -> Item {
        Item::new("testspace", "test_id", "Test Item").unwrap()
    }

    #[test]
    fn constructor_backs_properties_with_components() {
        let item = item();
        assert_eq!(item.name(), "Test Item");
        assert_eq!(item.texture_name(), "test_id");
        assert_eq!(item.category(), "Items");
        let json = item.get_json().unwrap();
        let body = &json["minecraft:item"];
        assert_eq!(json["format_version"], "1.16.100");
        assert_eq!(body["description"]["identifier"], "testspace:test_id");
        assert_eq!(body["description"]["category"], "Items");
        assert_eq!(body["components"]["minecraft:display_name"]["value"], "Test Item");
        assert_eq!(body["components"]["minecraft:icon"]["texture"], "test_id");
    }

    #[test]
    fn id_derived_from_display_name() {
        let item = Item::from_display_name("testspace", "Test Item").unwrap();
        assert_eq!(item.identifier().to_string(), "testspace:test_item");
    }

    #[test]
    fn setters_write_through() {
        let mut item = item();
        item.set_texture_name("test_texture");
        item.set_category("Tools");
        let body = item.get_json().unwrap()["minecraft:item"].clone();
        assert_eq!(body["components"]["minecraft:icon"]["texture"], "test_texture");
        assert_eq!(body["description"]["category"], "Tools");
    }

    #[test]
    fn replacing_backing_component_stays_consistent() {
        let mut item = item();
        item.add_component(vanilla::display_name("Other")).unwrap();
        assert_eq!(item.name(), "Other");
        let json = item.get_json().unwrap();
        let components = &json["minecraft:item"]["components"];
        assert_eq!(components["minecraft:display_name"]["value"], "Other");
    }

    #[test]
    fn backing_component_without_string_field_rejected() {
        let mut item = item();
        let numeric = Component::from_identifier(Identifier::vanilla("display_name"))
            .with_field("value", 5);
        let err = item.add_component(numeric).unwrap_err();
        assert!(matches!(err, BwError::InvalidComponent { component: "display_name", .. }));

        let bare = Component::from_identifier(Identifier::vanilla("icon"));
        assert!(item.add_component(bare).is_err());

        assert_eq!(item.name(), "Test Item");
        assert_eq!(item.texture_name(), "test_id");
        let json = item.get_json().unwrap();
        let components = &json["minecraft:item"]["components"];
        assert_eq!(components["minecraft:display_name"]["value"], "Test Item");
        assert_eq!(components["minecraft:icon"]["texture"], "test_id");
    }

    #[test]
    fn unrelated_components_accepted() {
        let mut item = item();
        item.add_component(vanilla::health(3)).unwrap();
        let json = item.get_json().unwrap();
        assert!(json["minecraft:item"]["components"]["minecraft:health"].is_object());
    }

    #[test]
    fn on_use_command_lowered() {
        let mut item = item();
        item.set_on_use_command(Command::with_args("say", ["hello"]));
        let json = item.get_json().unwrap();
        let body = &json["minecraft:item"];
        assert_eq!(
            body["components"]["minecraft:on_use"],
            json!({ "on_use": { "event": "on_use", "target": "self" } })
        );
        assert_eq!(body["events"].as_object().unwrap().len(), 1);
        assert_eq!(
            body["events"]["on_use"],
            json!({ "run_command": { "command": ["/say hello"], "target": "holder" } })
        );
        assert_eq!(json, item.get_json().unwrap());
        assert!(item.components.get(&Identifier::vanilla("on_use")).is_none());
    }

    #[test]
    fn bad_command_fails_whole_compile() {
        let mut item = item();
        let kill =
            Command::new("kill").placeholder("who", crate::command::PlaceholderKind::Selector);
        item.set_on_use_command(kill);
        assert!(matches!(item.get_json(), Err(BwError::CommandCompilation { .. })));
    }

    #[test]
    fn strict_rejects_declared_on_use_event() {
        let mut item = item();
        item.add_event("on_use", EventDefinition::new());
        item.set_on_use_command(Command::with_args("say", ["hi"]));
        assert!(item.get_json().is_ok());
        let err = item.get_json_with(&CompileConfig::strict()).unwrap_err();
        assert!(matches!(err, BwError::DuplicateDeclaration { kind: "event", .. }));
    }

    proptest! {
        #[test]
        fn name_round_trips_through_json(name in "\\PC{0,40}") {
            let mut item = item();
            item.set_name(&name);
            prop_assert_eq!(item.name(), name.as_str());
            let json = item.get_json().unwrap();
            prop_assert_eq!(
                json["minecraft:item"]["components"]["minecraft:display_name"]["value"].as_str(),
                Some(name.as_str())
            );
        }
    }
}
