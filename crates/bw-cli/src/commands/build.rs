use std::path::Path;

use crate::pack;

pub fn run(manifest: &Path, out: &Path, strict: bool) -> Result<(), String> {
    let (addon, files) = super::compile_manifest(manifest, strict)?;
    pack::write(out, &files)?;

    println!("  Compiled '{}' successfully.", addon.namespace);
    println!();
    for file in &files {
        println!("    {}", file.path.display());
    }
    println!();
    println!(
        "  {} written to {}",
        super::plural(files.len(), "document"),
        out.display()
    );

    Ok(())
}
