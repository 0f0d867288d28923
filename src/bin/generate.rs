use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use battlemap_gen::battle::MapSummary;
use battlemap_gen::catalog::BattleMapDef;
use battlemap_gen::content::{JsonContentSource, TileLibrary};
use battlemap_gen::mapgen::{generate_battle_map, GenerationOptions, MissionRequest};
use battlemap_gen::rng::Rng;
use battlemap_gen::types::MissionType;
use chrono::{SecondsFormat, Utc};
use clap::Parser;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(author, version, about = "Assemble a battle map from a sector catalog")]
struct Cli {
    /// Map definition (JSON).
    #[arg(long)]
    map: PathBuf,
    /// Directory holding `tilesets/` and `sectors/` JSON content.
    #[arg(long)]
    content: PathBuf,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value = "ufo_recovery")]
    mission: String,
    #[arg(long, default_value = "")]
    location: String,
    #[arg(long)]
    craft: Option<String>,
    #[arg(long)]
    no_stacking: bool,
    #[arg(long)]
    no_larger: bool,
    /// Seat every mandatory sector, not only the most constraining one.
    #[arg(long)]
    all_mandatory: bool,
    #[arg(long)]
    summary_out: Option<PathBuf>,
}

#[derive(Clone, Debug, Serialize)]
struct RunSummary {
    #[serde(rename = "generatedAtIso")]
    generated_at_iso: String,
    seed: u64,
    #[serde(flatten)]
    map: MapSummary,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let Some(mission_type) = MissionType::parse(cli.mission.trim()) else {
        log::error!("unknown mission type \"{}\"", cli.mission);
        return ExitCode::FAILURE;
    };
    let def = match BattleMapDef::load(&cli.map) {
        Ok(def) => def,
        Err(error) => {
            log::error!("{error}");
            return ExitCode::FAILURE;
        }
    };

    let seed = cli.seed.unwrap_or_else(now_ms);
    let options = GenerationOptions {
        allow_vertical_stacking: !cli.no_stacking,
        allow_larger_maps: !cli.no_larger,
        require_only_largest_mandatory_sector: !cli.all_mandatory,
    };
    let mission = MissionRequest {
        mission_type,
        location_id: if cli.location.is_empty() {
            def.id.clone()
        } else {
            cli.location.clone()
        },
        craft: cli.craft.clone(),
    };

    let mut library = TileLibrary::new(JsonContentSource::new(&cli.content));
    let mut rng = Rng::new(seed);
    let map = match generate_battle_map(&def, &mut library, &mission, &options, &mut rng) {
        Ok(map) => map,
        Err(error) => {
            log::error!("{error}");
            return ExitCode::FAILURE;
        }
    };

    let summary = RunSummary {
        generated_at_iso: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        seed,
        map: map.summary(),
    };
    match serde_json::to_string(&summary) {
        Ok(line) => println!("{line}"),
        Err(error) => {
            log::error!("failed to serialize summary: {error}");
            return ExitCode::FAILURE;
        }
    }

    if let Some(path) = cli.summary_out.as_deref() {
        if let Err(error) = write_summary(path, &summary) {
            log::error!("failed to write summary {}: {error}", path.display());
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}

fn write_summary(path: &Path, summary: &RunSummary) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let text = serde_json::to_string_pretty(summary).map_err(io::Error::other)?;
    fs::write(path, text)
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
