use std::fs;
use std::path::Path;

pub fn run(name: &str) -> Result<(), String> {
    let dir = Path::new(name);

    if dir.exists() {
        return Err(format!("directory '{name}' already exists"));
    }

    let namespace = name.to_lowercase().replace(['-', ' '], "_");
    fs::create_dir_all(dir).map_err(|e| format!("cannot create directory: {e}"))?;

    let manifest = format!(
        r#"{{
  "namespace": "{namespace}",
  "variables": {{
    "max_health": 20
  }},
  "entities": [
    {{
      "name": "example",
      "behaviors": [
        {{
          "name": "core",
          "components": {{
            "minecraft:health": {{ "value": "%max_health", "max": "%max_health" }},
            "minecraft:physics": {{}}
          }},
          "commands": [
            {{ "trigger": "minecraft:on_interact", "command": "/say hello" }}
          ]
        }}
      ],
      "graphics": {{
        "humanoid": true
      }}
    }}
  ],
  "items": [
    {{ "name": "Example Wand", "on_use": "/say zap" }}
  ]
}}
"#
    );

    fs::write(dir.join("addon.json"), manifest)
        .map_err(|e| format!("cannot write addon.json: {e}"))?;

    println!("Created add-on '{name}' in {name}/");
    println!("  addon.json  entities, items and animations");
    println!();
    println!("Get started:");
    println!("  cd {name}");
    println!("  bw check          # Compile and report problems");
    println!("  bw list           # List entities and items");
    println!("  bw show <name>    # Print compiled JSON");
    println!("  bw build          # Write build/behavior_pack and build/resource_pack");

    Ok(())
}
