use std::path::Path;

pub fn run(manifest: &Path, strict: bool) -> Result<(), String> {
    let (addon, files) = super::compile_manifest(manifest, strict)?;

    println!("  All checks passed for '{}'.", addon.namespace);
    println!(
        "  {}, {}, {}",
        super::plural(addon.entities.len(), "entity"),
        super::plural(addon.items.len(), "item"),
        super::plural(files.len(), "document"),
    );

    Ok(())
}
