use std::path::PathBuf;

use clap::Args;
use poke_calc::config::CalcSettings;
use poke_calc::{resolve_set, SetDescription};

use super::{load_dex, print_json, read_json};
use crate::error::RunnerError;
use crate::models::StatsReport;

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Dex JSON file
    #[arg(long)]
    pub dex: PathBuf,

    /// Set as inline JSON or a path to a JSON file
    #[arg(long)]
    pub set: String,
}

pub fn execute(args: StatsArgs, settings: &CalcSettings) -> Result<(), RunnerError> {
    let dex = load_dex(&args.dex)?;
    let mut set: SetDescription = read_json(&args.set)?;
    set.level.get_or_insert(settings.default_level);

    let combatant = resolve_set(&set, &dex)?;
    let report = StatsReport {
        species: combatant.species.clone(),
        level: combatant.level,
        nature: combatant.nature.map(|n| format!("{n:?}")),
        stats: combatant.final_stats()?,
    };
    print_json(&report)
}
