use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use softkeys::config::Settings;
use softkeys::geometry::{LayoutDef, LayoutLoader};
use softkeys::layouts::{KnownLayout, LayoutSet};
use std::path::Path;
use std::process;
use std::str::FromStr;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Layout JSON file. Takes precedence over --builtin.
    #[arg(global = true, short, long)]
    layout: Option<String>,

    /// Built-in layouts to cycle through, comma separated.
    #[arg(global = true, short, long, default_value = "qwerty,symbols,numpad,clipboard")]
    builtin: String,

    #[arg(global = true, long)]
    settings: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Inspect(cmd::inspect::InspectArgs),
    Hit(cmd::hit::HitArgs),
    Replay(cmd::replay::ReplayArgs),
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_layouts(cli: &Cli) -> Result<LayoutSet, String> {
    if let Some(path) = &cli.layout {
        info!("📂 Loading Layout: {}", path);
        let def = LayoutDef::load_from_file(path).map_err(|e| format!("❌ {}: {}", path, e))?;
        let name = Path::new(path)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "custom".to_string());
        // The clipboard layout stays reachable from custom layouts.
        let clipboard = KnownLayout::Clipboard;
        return LayoutSet::new(vec![
            (name, def),
            (clipboard.to_string(), clipboard.definition()),
        ])
        .map_err(|e| e.to_string());
    }

    let names: Vec<&str> = cli.builtin.split(',').map(str::trim).collect();
    for name in &names {
        if KnownLayout::from_str(name).is_err() {
            return Err(format!("❌ Unknown built-in layout '{}'", name));
        }
    }
    LayoutSet::from_names(&names).map_err(|e| e.to_string())
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    init_tracing(cli.debug);

    let (cli_settings, sub_matches) = match &cli.command {
        Commands::Inspect(args) => (&args.settings, matches.subcommand_matches("inspect")),
        Commands::Hit(args) => (&args.settings, matches.subcommand_matches("hit")),
        Commands::Replay(args) => (&args.settings, matches.subcommand_matches("replay")),
    };

    let settings = match (&cli.settings, sub_matches) {
        (Some(path), Some(sub)) => {
            info!("⚖️  Loading Settings from: {}", path);
            let mut file_settings = Settings::load_from_file(path).unwrap_or_else(|e| {
                error!("❌ Failed to load settings '{}': {}", path, e);
                process::exit(1);
            });
            file_settings.merge_from_cli(cli_settings, sub);
            file_settings
        }
        _ => cli_settings.clone(),
    };

    if let Err(e) = settings.validate() {
        error!("{}", e);
        process::exit(1);
    }

    let layouts = load_layouts(&cli).unwrap_or_else(|e| {
        error!("{}", e);
        process::exit(1);
    });

    let result = match cli.command {
        Commands::Inspect(args) => cmd::inspect::run(args, &settings, &layouts),
        Commands::Hit(args) => cmd::hit::run(args, &settings, &layouts),
        Commands::Replay(args) => cmd::replay::run(args, settings, layouts),
    };

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}
