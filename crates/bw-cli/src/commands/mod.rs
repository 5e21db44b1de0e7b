pub mod build;
pub mod check;
pub mod init;
pub mod list;
pub mod show;

use std::path::Path;

use bw_core::CompileConfig;

use crate::manifest::{Addon, Manifest};
use crate::pack::{self, PackFile};

/// Load a manifest and build its object graph.
fn load_addon(path: &Path) -> Result<Addon, String> {
    let manifest = Manifest::load(path)?;
    manifest.to_addon()
}

/// Load a manifest and compile every document it describes.
fn compile_manifest(path: &Path, strict: bool) -> Result<(Addon, Vec<PackFile>), String> {
    let addon = load_addon(path)?;
    let config = if strict {
        CompileConfig::strict()
    } else {
        CompileConfig::default()
    };
    let files = pack::compile(&addon, &config)?;
    Ok((addon, files))
}

fn plural(count: usize, word: &str) -> String {
    format!("{count} {word}{}", if count == 1 { "" } else { "s" })
}
