//! Command-line interface for the mobilization planner.

use lexopt::prelude::*;
use std::path::PathBuf;

/// Command-line arguments for the planner.
#[derive(Debug, Clone)]
pub struct CliArgs {
    pub command: Command,
    pub store_file: PathBuf,
    pub catalog_file: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub target: Option<String>,
    pub unconstrained: bool,
    pub json: bool,
    pub verbose: bool,
    pub quiet: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Plan,
    Explain,
    Quests,
    Cost,
    Catalog,
    Set { key: String, value: String },
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            command: Command::Plan,
            store_file: PathBuf::from("mobilization_store.json"),
            catalog_file: None,
            config_file: None,
            target: None,
            unconstrained: false,
            json: false,
            verbose: false,
            quiet: false,
        }
    }
}

pub fn parse_args() -> Result<CliArgs, lexopt::Error> {
    parse_from(lexopt::Parser::from_env())
}

pub fn parse_from(mut args: lexopt::Parser) -> Result<CliArgs, lexopt::Error> {
    let mut cli_args = CliArgs::default();
    let mut subcommand: Option<String> = None;
    let mut positional = Vec::new();

    while let Some(arg) = args.next()? {
        match arg {
            Value(val) => {
                let val_str = val.string()?;
                if subcommand.is_none() {
                    subcommand = Some(val_str);
                } else {
                    positional.push(val_str);
                }
            }
            Long("store") => cli_args.store_file = PathBuf::from(args.value()?.string()?),
            Long("catalog") => cli_args.catalog_file = Some(PathBuf::from(args.value()?.string()?)),
            Long("config") => cli_args.config_file = Some(PathBuf::from(args.value()?.string()?)),
            Long("target") | Short('t') => cli_args.target = Some(args.value()?.string()?),
            Long("unconstrained") => cli_args.unconstrained = true,
            Long("json") => cli_args.json = true,
            Long("verbose") | Short('v') => cli_args.verbose = true,
            Long("quiet") | Short('q') => cli_args.quiet = true,
            Long("help") | Short('h') => {
                print_help();
                std::process::exit(0);
            }
            _ => return Err(arg.unexpected()),
        }
    }

    cli_args.command = match subcommand.as_deref() {
        Some("plan") | None => Command::Plan,
        Some("explain") => Command::Explain,
        Some("quests") => Command::Quests,
        Some("cost") => Command::Cost,
        Some("catalog") => Command::Catalog,
        Some("set") => {
            let mut values = positional.drain(..);
            match (values.next(), values.next()) {
                (Some(key), Some(value)) => Command::Set { key, value },
                _ => return Err(lexopt::Error::from("set requires KEY and VALUE")),
            }
        }
        Some(cmd) => return Err(lexopt::Error::from(format!("Unknown command: {}", cmd))),
    };

    Ok(cli_args)
}

pub fn print_help() {
    println!("\nMobilization Planner\n");
    println!("USAGE:");
    println!("    mobilization-planner [COMMAND] [OPTIONS]\n");

    println!("COMMANDS:");
    println!("    plan             Plan quests for the stored inventory (default)");
    println!("    explain          Show every fill and upgrade decision");
    println!("    quests           List quest variants affordable now and out of reach");
    println!("    cost             Diamond cost of the slots needed for the target");
    println!("    catalog          Print the quest catalog in use");
    println!("    set KEY VALUE    Store an inventory field or the target\n");

    println!("OPTIONS:");
    println!("    --store <FILE>         Key-value store (default: mobilization_store.json)");
    println!("    --catalog <FILE>       Quest catalog, JSON or YAML");
    println!("    --config <FILE>        Planner config, JSON or YAML");
    println!("    -t, --target <N>       Override the target completion count");
    println!("    --unconstrained        Let every pool fill past the target");
    println!("    --json                 Print results as JSON");
    println!("    -v, --verbose          Enable debug logging");
    println!("    -q, --quiet            Only log warnings and errors");
    println!("    -h, --help             Print help information\n");

    println!("KEYS:");
    println!("    target, diamonds, hammers, hero_shards, stamina,");
    println!("    speedup_general, speedup_troop, speedup_building, speedup_research");
    println!("    Values accept separators and k/m/g suffixes, e.g. 1.5m\n");

    println!("EXAMPLES:");
    println!("    mobilization-planner set diamonds 62k");
    println!("    mobilization-planner set speedup_general 900");
    println!("    mobilization-planner plan --target 51");
}
