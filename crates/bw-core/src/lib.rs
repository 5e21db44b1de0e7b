//! Core compilation engine for Blockwright add-ons.
//!
//! Entities and items are built programmatically from behaviors,
//! components, events and commands, then compiled with `get_json()` into the
//! JSON documents the game engine loads from behavior and resource packs.
//! This crate never touches the filesystem; writing the documents out is
//! left to the caller.

/// Behavior-pack animations and animation controllers.
pub mod animation;
/// Behaviors: bundles of components, groups and events attached to an entity.
pub mod behavior;
/// Engine commands, selectors and their lowering into component + event pairs.
pub mod command;
/// Components and the ordered, overwrite-by-identifier component map.
pub mod component;
/// Format versions and strictness switches.
pub mod config;
/// The entity aggregate and its compilation.
pub mod entity;
/// Error types used throughout the crate.
pub mod error;
/// Event definitions and weighted randomizers.
pub mod event;
/// Client-side entity graphics.
pub mod graphics;
/// Named component groups.
pub mod group;
/// `namespace:name` identifiers.
pub mod identifier;
/// The item aggregate and its compilation.
pub mod item;
/// Skin-id state machines expanded into groups, events and controllers.
pub mod loop_state;
/// Projectile entities.
pub mod projectile;
/// Entity property declarations.
pub mod property;
/// Entity sound events for the resource pack.
pub mod sounds;
/// Constructors for commonly used vanilla components.
pub mod vanilla;
/// `%key` string variables substituted into compiled documents.
pub mod variables;

/// Re-export animation types.
pub use animation::{Animation, AnimationController, AnimationFile, ControllerState, TimelineEntry};
/// Re-export behavior types.
pub use behavior::{Behavior, SPAWN_EVENT};
/// Re-export command types.
pub use command::{
    Command, CommandArgument, CommandLowering, PlaceholderKind, Selector, SelectorBase,
};
/// Re-export component types.
pub use component::{Component, ComponentMap};
/// Re-export compile configuration.
pub use config::CompileConfig;
/// Re-export entity types.
pub use entity::{ControllerDocument, DESPAWN, Entity, EntityDocuments};
/// Re-export error types.
pub use error::{BwError, BwResult};
/// Re-export event types.
pub use event::{EventDefinition, EventRandomizer};
/// Re-export graphics types.
pub use graphics::EntityGraphics;
/// Re-export component groups.
pub use group::ComponentGroup;
/// Re-export identifier types.
pub use identifier::{Identifier, MINECRAFT};
/// Re-export item types.
pub use item::Item;
/// Re-export loop states.
pub use loop_state::LoopState;
/// Re-export projectile types.
pub use projectile::Projectile;
/// Re-export property types.
pub use property::{EntityProperty, PropertyKind};
/// Re-export sound types.
pub use sounds::{EntitySounds, sounds_document};
/// Re-export string variables.
pub use variables::StringVariables;
