use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(manifest: &Path) -> Result<(), String> {
    let addon = super::load_addon(manifest)?;

    if addon.entities.is_empty() && addon.items.is_empty() {
        println!("  No entities or items found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Identifier", "Kind", "Details"]);

    for entity in &addon.entities {
        let behaviors: Vec<String> = entity
            .behaviors()
            .iter()
            .map(|b| b.identifier().name().to_string())
            .collect();
        let mut details = if behaviors.is_empty() {
            "no behaviors".to_string()
        } else {
            behaviors.join(", ")
        };
        if entity.graphics().is_some() {
            details.push_str(" (+graphics)");
        }
        if !entity.loop_states().is_empty() {
            details.push_str(&format!(" ({} loop states)", entity.loop_states().len()));
        }
        table.add_row(vec![entity.identifier().to_string(), "entity".into(), details]);
    }

    for item in &addon.items {
        let details = format!("\"{}\" in {}", item.name(), item.category());
        table.add_row(vec![item.identifier().to_string(), "item".into(), details]);
    }

    println!("{table}");
    println!();
    println!(
        "  {}, {}",
        super::plural(addon.entities.len(), "entity"),
        super::plural(addon.items.len(), "item")
    );

    Ok(())
}
