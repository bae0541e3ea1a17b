use mobilization_planner::catalog::QuestCatalog;
use mobilization_planner::cli::{self, CliArgs, Command};
use mobilization_planner::config::PlannerConfig;
use mobilization_planner::error::PlannerError;
use mobilization_planner::feasibility::quest_availability;
use mobilization_planner::host::Session;
use mobilization_planner::input::parse_quantity;
use mobilization_planner::projection::project_cost;
use mobilization_planner::store::{JsonFileStore, Store};
use mobilization_planner::FillMode;

fn main() {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Run with --help for usage");
            std::process::exit(1);
        }
    };

    init_logging(&args);

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(args: &CliArgs) {
    let default_level = if args.verbose {
        "debug"
    } else if args.quiet {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn run(args: &CliArgs) -> Result<(), PlannerError> {
    let mut config = match &args.config_file {
        Some(path) => PlannerConfig::load_from_file(path)?,
        None => PlannerConfig::default(),
    };
    if args.unconstrained {
        config.fill_mode = FillMode::Unconstrained;
    }

    let catalog = match &args.catalog_file {
        Some(path) => QuestCatalog::load_from_file(path)?,
        None => QuestCatalog::standard(),
    };

    let store = JsonFileStore::open(&args.store_file)?;
    let mut session = Session::load(store, config);
    if let Some(raw) = &args.target {
        session.override_target(parse_quantity(raw));
    }

    match &args.command {
        Command::Plan => {
            let report = session.plan(&catalog);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report);
            }
        }
        Command::Explain => {
            let report = session.plan(&catalog);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report.plan.trace)?);
            } else {
                print!("{}", report.plan.trace);
                println!();
                println!("{}", report.plan);
            }
        }
        Command::Quests => {
            let availability = quest_availability(session.inventory(), &catalog);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&availability)?);
            } else {
                print!("{}", availability);
            }
        }
        Command::Cost => {
            let config = session.config();
            let projection = project_cost(
                session.target(),
                config.free_quests,
                config.event_days,
                &config.slot_prices,
            );
            if args.json {
                println!("{}", serde_json::to_string_pretty(&projection)?);
            } else {
                print!("{}", projection);
            }
        }
        Command::Catalog => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&catalog)?);
            } else {
                print!("{}", catalog);
            }
        }
        Command::Set { key, value } => {
            let stored = session.set_field(key, value)?;
            session.store_mut().flush()?;
            if !args.quiet {
                println!(
                    "{} = {} (saved to {})",
                    key,
                    stored,
                    session.store().path().display()
                );
            }
            log::debug!("store now holds {:?}", session.store().get(key));
        }
    }

    Ok(())
}
