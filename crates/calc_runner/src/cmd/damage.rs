use std::path::PathBuf;

use clap::Args;
use poke_calc::batch::{damage_against_all, Target};
use poke_calc::config::CalcSettings;
use poke_calc::dex::{resolve_set, Dex};

use super::{load_dex, print_json, read_json};
use crate::error::RunnerError;
use crate::models::{DamageQuery, DamageReport, MoveReport, SideQuery};

#[derive(Args, Debug)]
pub struct DamageArgs {
    /// Dex JSON file
    #[arg(long)]
    pub dex: PathBuf,

    /// Query as inline JSON or a path to a JSON file
    #[arg(long)]
    pub query: String,
}

fn resolve_side(
    side: &SideQuery,
    dex: &dyn Dex,
    settings: &CalcSettings,
) -> Result<poke_calc::Combatant, RunnerError> {
    let mut set = side.set.clone();
    set.level.get_or_insert(settings.default_level);
    Ok(resolve_set(&set, dex)?)
}

pub fn execute(args: DamageArgs, settings: &CalcSettings) -> Result<(), RunnerError> {
    let dex = load_dex(&args.dex)?;
    let query: DamageQuery = read_json(&args.query)?;

    let attacker = resolve_side(&query.attacker, &dex, settings)?
        .attacker()?
        .terastallize(query.attacker.terastallized)
        .burned(query.attacker.burned);

    let targets = query
        .defenders
        .iter()
        .map(|side| {
            let defender = resolve_side(side, &dex, settings)?
                .defender()?
                .terastallize(side.terastallized);
            Ok(Target {
                name: side.set.species.clone(),
                defender,
            })
        })
        .collect::<Result<Vec<_>, RunnerError>>()?;

    let move_names = if query.moves.is_empty() {
        &query.attacker.set.moves
    } else {
        &query.moves
    };
    let field = query.field.to_field(settings.format);
    let options = query.options(settings.hits);

    let mut results = Vec::with_capacity(move_names.len());
    for name in move_names {
        let move_data = dex.move_data(name)?;
        let table = damage_against_all(&attacker, &move_data, &field, &options, &targets)?;
        results.push(MoveReport {
            move_name: move_data.name,
            table,
        });
    }

    print_json(&DamageReport {
        attacker: query.attacker.set.species.clone(),
        results,
    })
}
