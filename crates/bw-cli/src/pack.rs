//! Laying compiled documents out as behavior and resource pack files.

use std::fs;
use std::path::{Path, PathBuf};

use bw_core::{CompileConfig, ControllerDocument, Identifier, sounds_document};
use serde_json::Value;

use crate::manifest::Addon;

/// One compiled document and where it lives inside the output directory.
#[derive(Debug, Clone)]
pub struct PackFile {
    pub path: PathBuf,
    /// Identifier of the entity, item or controller it came from.
    pub source: String,
    pub document: Value,
}

fn controller_file(dir: &str, controller: ControllerDocument) -> PackFile {
    PackFile {
        path: Path::new(dir).join(format!("{}.json", controller.identifier)),
        source: controller.identifier,
        document: controller.document,
    }
}

/// Compile everything in `addon`, stopping at the first failure.
///
/// Sound entries of all entities are gathered into one
/// `resource_pack/sounds.json`.
pub fn compile(addon: &Addon, config: &CompileConfig) -> Result<Vec<PackFile>, String> {
    let mut files = Vec::new();
    let mut sounds: Vec<(Identifier, Value)> = Vec::new();

    for entity in &addon.entities {
        let id = entity.identifier();
        let docs = entity
            .get_json_with(config)
            .map_err(|e| format!("entity {id}: {e}"))?;
        files.push(PackFile {
            path: Path::new("behavior_pack/entities").join(format!("{}.json", id.name())),
            source: id.to_string(),
            document: docs.behavior,
        });
        if let Some(resource) = docs.resource {
            files.push(PackFile {
                path: Path::new("resource_pack/entity")
                    .join(format!("{}.entity.json", id.name())),
                source: id.to_string(),
                document: resource,
            });
        }
        for controller in docs.behavior_controllers {
            files.push(controller_file("behavior_pack/animation_controllers", controller));
        }
        for controller in docs.resource_controllers {
            files.push(controller_file("resource_pack/animation_controllers", controller));
        }
        if let Some(entry) = docs.sounds {
            sounds.push((id.clone(), entry));
        }
    }

    if !sounds.is_empty() {
        files.push(PackFile {
            path: PathBuf::from("resource_pack/sounds.json"),
            source: addon.namespace.clone(),
            document: sounds_document(sounds.iter().map(|(id, entry)| (id, entry.clone()))),
        });
    }

    for item in &addon.items {
        let id = item.identifier();
        let document = item
            .get_json_with(config)
            .map_err(|e| format!("item {id}: {e}"))?;
        files.push(PackFile {
            path: Path::new("behavior_pack/items").join(format!("{}.json", id.name())),
            source: id.to_string(),
            document,
        });
    }

    if !addon.animations.animations().is_empty() {
        files.push(PackFile {
            path: Path::new("behavior_pack/animations")
                .join(format!("{}.animation.json", addon.namespace)),
            source: addon.namespace.clone(),
            document: addon.animations.get_json_with(config),
        });
    }

    for controller in &addon.controllers {
        let dangling = controller.dangling_transitions();
        if !dangling.is_empty() {
            let described: Vec<String> = dangling
                .iter()
                .map(|(from, to)| format!("{from} -> {to}"))
                .collect();
            if config.strict_graphics_references {
                return Err(format!(
                    "controller {}: transitions to undeclared states: {}",
                    controller.identifier(),
                    described.join(", ")
                ));
            }
            tracing::warn!(
                controller = controller.identifier(),
                transitions = %described.join(", "),
                "transition to undeclared state"
            );
        }
        files.push(controller_file(
            "behavior_pack/animation_controllers",
            ControllerDocument {
                identifier: controller.identifier().to_string(),
                document: controller.get_json_with(config),
            },
        ));
    }

    Ok(files)
}

/// Write `files` under `out` as pretty-printed JSON, creating directories.
pub fn write(out: &Path, files: &[PackFile]) -> Result<(), String> {
    for file in files {
        let path = out.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("cannot create {}: {e}", parent.display()))?;
        }
        let text = serde_json::to_string_pretty(&file.document)
            .map_err(|e| format!("JSON serialization error: {e}"))?;
        fs::write(&path, text + "\n")
            .map_err(|e| format!("cannot write {}: {e}", path.display()))?;
        tracing::info!(path = %path.display(), source = %file.source, "wrote");
    }
    Ok(())
}
