use std::path::PathBuf;

use clap::Args;
use poke_calc::batch::{speed_tiers, SpeedBounds, SpeedEntry};
use poke_calc::config::CalcSettings;
use poke_calc::resolve_set;
use poke_calc::speed::SpeedHolder;

use super::{load_dex, print_json, read_json};
use crate::error::RunnerError;
use crate::models::{SpeedQuery, SpeedReport};

#[derive(Args, Debug)]
pub struct SpeedArgs {
    /// Dex JSON file
    #[arg(long)]
    pub dex: PathBuf,

    /// Query as inline JSON or a path to a JSON file
    #[arg(long)]
    pub query: String,
}

pub fn execute(args: SpeedArgs, settings: &CalcSettings) -> Result<(), RunnerError> {
    let dex = load_dex(&args.dex)?;
    let query: SpeedQuery = read_json(&args.query)?;

    let entries = query
        .entries
        .iter()
        .map(|set| {
            let mut set = set.clone();
            set.level.get_or_insert(settings.default_level);
            let combatant = resolve_set(&set, &dex)?;
            Ok(SpeedEntry {
                name: combatant.species.clone(),
                holder: SpeedHolder::from_combatant(&combatant)?,
            })
        })
        .collect::<Result<Vec<_>, RunnerError>>()?;

    let bounds = SpeedBounds {
        min: query.min,
        max: query.max,
    };
    print_json(&SpeedReport {
        tiers: speed_tiers(&query.conditions, &entries, bounds),
    })
}
