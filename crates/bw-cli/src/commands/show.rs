use std::path::Path;

use colored::Colorize;

pub fn run(manifest: &Path, identifier: &str) -> Result<(), String> {
    let (addon, files) = super::compile_manifest(manifest, false)?;

    let wanted = if identifier.contains(':') {
        identifier.to_string()
    } else {
        format!("{}:{identifier}", addon.namespace)
    };

    let matching: Vec<_> = files.iter().filter(|f| f.source == wanted).collect();
    if matching.is_empty() {
        return Err(format!("not found: \"{identifier}\""));
    }

    for file in matching {
        println!("  {} [{}]", wanted.bold(), file.path.display().to_string().dimmed());
        println!();
        let text = serde_json::to_string_pretty(&file.document)
            .map_err(|e| format!("JSON serialization error: {e}"))?;
        println!("{text}");
        println!();
    }

    Ok(())
}
