use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::json;

use kwd_decoder::loader::read_headers;
use kwd_decoder::{EventCollector, KwdLoader};

#[derive(Parser)]
#[command(name = "kwd-dump")]
#[command(about = "Inspect KWD level and catalog files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Level metadata and path table
    Info {
        /// Game root the path table is relative to
        #[arg(long)]
        base: PathBuf,
        level: PathBuf,
    },
    /// Chunk headers of a single file
    Header { file: PathBuf },
    /// Load a level and print catalog sizes, derived records and diagnostics
    Summary {
        #[arg(long)]
        base: PathBuf,
        level: PathBuf,
        #[arg(long)]
        verify_checksums: bool,
        #[arg(long)]
        editor_folder: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Info { base, level } => {
            let file = KwdLoader::new().open(base, level)?;
            println!("{}", serde_json::to_string_pretty(file.level())?);
        }
        Commands::Header { file } => {
            let data = std::fs::read(&file)?;
            let mut sink = EventCollector::new();
            let headers = read_headers(&data, &mut sink).map_err(|e| e.in_file(&file))?;
            let diagnostics: Vec<String> = sink.events().iter().map(ToString::to_string).collect();
            let out = json!({ "headers": headers, "diagnostics": diagnostics });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Commands::Summary { base, level, verify_checksums, editor_folder } => {
            let mut loader = KwdLoader::new().verify_checksums(verify_checksums);
            if let Some(folder) = editor_folder {
                loader = loader.editor_folder(folder);
            }
            let file = loader.load(base, level)?;
            let Some(model) = file.model() else {
                return Err("level was not fully loaded".into());
            };

            let variables = model.variables();
            let out = json!({
                "name": model.level().name,
                "map": { "width": model.map().width(), "height": model.map().height() },
                "catalogs": {
                    "terrain": model.terrain_list().count(),
                    "rooms": model.rooms().count(),
                    "doors": model.doors().count(),
                    "traps": model.traps().count(),
                    "creatures": model.creatures().count(),
                    "objects": model.objects().count(),
                    "creature_spells": model.creature_spells().count(),
                    "keeper_spells": model.keeper_spells().count(),
                    "shots": model.shots().count(),
                    "players": model.players().count(),
                    "effects": model.effects().count(),
                    "effect_elements": model.effect_elements().count(),
                },
                "things": model.things().len(),
                "triggers": model.triggers().len(),
                "variables": {
                    "availabilities": variables.availabilities.len(),
                    "sacrifices": variables.sacrifices.len(),
                    "unknown": variables.unknown.len(),
                    "misc": variables.misc.len(),
                },
                "derived": {
                    "imp": model.imp().map(|c| c.name.clone()),
                    "level_gem": model.level_gem().map(|o| o.name.clone()),
                    "portal": model.portal().map(|r| r.name.clone()),
                    "water_terrain": model.water_terrain().map(|t| t.name.clone()),
                    "lava_terrain": model.lava_terrain().map(|t| t.name.clone()),
                },
                "diagnostics": file.diagnostics().iter().map(ToString::to_string).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }

    Ok(())
}
